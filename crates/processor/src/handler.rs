//! Webhook event handler

use std::fmt::Debug;
use std::sync::Arc;

use common::models::OutboundComment;
use github::{
    EventKind, IssueCommentEvent, IssueCommenter, PullRequestEvent, PushEvent, WebhookPayload,
};
use tracing::{debug, info, warn};

/// Comment bodies containing this get a greeting back
const GREETING_TRIGGER: &str = "Hello there.";

/// Handles incoming webhook events
pub struct EventHandler {
    commenter: Arc<dyn IssueCommenter>,
}

impl EventHandler {
    pub fn new(commenter: Arc<dyn IssueCommenter>) -> Self {
        Self { commenter }
    }

    /// Process a webhook payload, returning the kind that was handled.
    ///
    /// Every delivery is acted on, so replaying the same payload repeats
    /// its side effects.
    pub async fn handle(&self, payload: WebhookPayload) -> Result<EventKind, common::Error> {
        match payload {
            WebhookPayload::PullRequest(event) => {
                self.handle_pull_request(event).await?;
                Ok(EventKind::PullRequest)
            }
            WebhookPayload::Push(event) => {
                handle_push(&event);
                Ok(EventKind::Push)
            }
            WebhookPayload::PullRequestReview(event) => {
                handle_other(EventKind::PullRequestReview, &event);
                Ok(EventKind::PullRequestReview)
            }
            WebhookPayload::PullRequestReviewComment(event) => {
                handle_other(EventKind::PullRequestReviewComment, &event);
                Ok(EventKind::PullRequestReviewComment)
            }
            WebhookPayload::IssueComment(event) => {
                self.handle_issue_comment(event).await?;
                Ok(EventKind::IssueComment)
            }
            WebhookPayload::Unrecognized { event_type } => {
                warn!("Unrecognized event: {}", event_type);
                Err(common::Error::UnrecognizedEventKind(event_type))
            }
        }
    }

    async fn handle_issue_comment(&self, event: IssueCommentEvent) -> Result<(), common::Error> {
        info!(
            "Comment from {} on {}#{}{}: {:?}",
            event.sender.login,
            event.repository.name,
            event.issue.number,
            if event.issue.is_pull_request() { " (PR)" } else { "" },
            event.comment.body
        );

        if !event.comment.body.contains(GREETING_TRIGGER) {
            return Ok(());
        }

        let comment = OutboundComment::new(
            event.repository.owner.login,
            event.repository.name,
            event.issue.number,
            format!("Hello @{}", event.sender.login),
        );
        self.post(comment).await
    }

    /// Comments on every action. Only opened, reopened and synchronize
    /// reflect code changes, but nothing filters on that yet.
    async fn handle_pull_request(&self, event: PullRequestEvent) -> Result<(), common::Error> {
        info!(
            "PR #{} in {}/{}: {} by {} ({})",
            event.number,
            event.repository.owner.login,
            event.repository.name,
            event.action,
            event.sender.login,
            event
                .pull_request
                .as_ref()
                .and_then(|pr| pr.title.as_deref())
                .unwrap_or("untitled")
        );

        let comment = OutboundComment::new(
            event.repository.owner.login,
            event.repository.name,
            event.number,
            format!("PR event: {}", event.action),
        );
        self.post(comment).await
    }

    async fn post(&self, comment: OutboundComment) -> Result<(), common::Error> {
        debug!(
            "Commenting on {}/{}#{}: {:?}",
            comment.owner, comment.repo, comment.issue_number, comment.body
        );
        self.commenter.create_comment(&comment).await?;
        Ok(())
    }
}

fn handle_push(event: &PushEvent) {
    info!(
        "Push to {} in {}/{} by {}: {} -> {} ({} commits, head: {})",
        event.git_ref,
        event.repository.owner.login,
        event.repository.name,
        event
            .pusher
            .as_ref()
            .and_then(|p| p.name.as_deref())
            .unwrap_or("unknown"),
        event.before.as_deref().unwrap_or("?"),
        event.after.as_deref().unwrap_or("?"),
        event.commits.len(),
        event
            .head_commit
            .as_ref()
            .and_then(|c| c.message.as_deref())
            .unwrap_or("")
    );
}

/// Acknowledge an event kind that has no reaction yet
fn handle_other<E: Debug>(kind: EventKind, event: &E) {
    debug!("Unhandled {} event: {:#?}", kind, event);
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use github::ClientError;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingCommenter {
        posted: Mutex<Vec<OutboundComment>>,
        fail: bool,
    }

    impl RecordingCommenter {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn posted(&self) -> Vec<OutboundComment> {
            self.posted.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl IssueCommenter for RecordingCommenter {
        async fn create_comment(&self, comment: &OutboundComment) -> Result<(), ClientError> {
            self.posted.lock().unwrap().push(comment.clone());
            if self.fail {
                return Err(ClientError::Api {
                    status: 502,
                    message: "Bad Gateway".to_string(),
                });
            }
            Ok(())
        }
    }

    fn handler_with(commenter: &Arc<RecordingCommenter>) -> EventHandler {
        EventHandler::new(commenter.clone())
    }

    fn repository() -> serde_json::Value {
        json!({
            "name": "kontext",
            "full_name": "mattmoor/kontext",
            "owner": { "login": "mattmoor" }
        })
    }

    fn pull_request() -> serde_json::Value {
        json!({ "number": 5, "title": "Add greeting", "state": "open" })
    }

    fn parse(event_type: &str, body: serde_json::Value) -> WebhookPayload {
        WebhookPayload::parse(event_type, body.to_string().as_bytes()).unwrap()
    }

    fn issue_comment(body: &str) -> WebhookPayload {
        parse(
            "issue_comment",
            json!({
                "action": "created",
                "issue": { "number": 12 },
                "comment": { "body": body },
                "repository": repository(),
                "sender": { "login": "obi-wan" }
            }),
        )
    }

    fn pull_request_event(action: &str) -> WebhookPayload {
        parse(
            "pull_request",
            json!({
                "action": action,
                "number": 5,
                "pull_request": pull_request(),
                "repository": repository(),
                "sender": { "login": "octocat" }
            }),
        )
    }

    fn push_event() -> WebhookPayload {
        parse(
            "push",
            json!({
                "ref": "refs/heads/main",
                "before": "0000",
                "after": "1111",
                "commits": [{ "id": "1111", "message": "Initial" }],
                "pusher": { "name": "mattmoor" },
                "repository": repository()
            }),
        )
    }

    fn review_event() -> WebhookPayload {
        parse(
            "pull_request_review",
            json!({
                "action": "submitted",
                "review": { "id": 1, "state": "approved" },
                "pull_request": pull_request(),
                "repository": repository(),
                "sender": { "login": "reviewer" }
            }),
        )
    }

    fn review_comment_event() -> WebhookPayload {
        parse(
            "pull_request_review_comment",
            json!({
                "action": "created",
                "comment": { "body": "Hello there." },
                "pull_request": pull_request(),
                "repository": repository(),
                "sender": { "login": "reviewer" }
            }),
        )
    }

    #[tokio::test]
    async fn test_greeting_replies_to_sender() {
        let commenter = Arc::new(RecordingCommenter::default());
        let handler = handler_with(&commenter);

        let kind = handler.handle(issue_comment("Hello there.")).await.unwrap();

        assert_eq!(kind, EventKind::IssueComment);
        assert_eq!(
            commenter.posted(),
            vec![OutboundComment::new("mattmoor", "kontext", 12, "Hello @obi-wan")]
        );
    }

    #[tokio::test]
    async fn test_greeting_trigger_matches_substring() {
        let commenter = Arc::new(RecordingCommenter::default());
        let handler = handler_with(&commenter);

        handler
            .handle(issue_comment("Why, Hello there. General Kenobi."))
            .await
            .unwrap();

        assert_eq!(commenter.posted().len(), 1);
    }

    #[tokio::test]
    async fn test_other_comment_posts_nothing() {
        let commenter = Arc::new(RecordingCommenter::default());
        let handler = handler_with(&commenter);

        let kind = handler.handle(issue_comment("Goodbye.")).await.unwrap();

        assert_eq!(kind, EventKind::IssueComment);
        assert!(commenter.posted().is_empty());
    }

    #[tokio::test]
    async fn test_replayed_comment_is_answered_twice() {
        let commenter = Arc::new(RecordingCommenter::default());
        let handler = handler_with(&commenter);

        handler.handle(issue_comment("Hello there.")).await.unwrap();
        handler.handle(issue_comment("Hello there.")).await.unwrap();

        let posted = commenter.posted();
        assert_eq!(posted.len(), 2);
        assert_eq!(posted[0], posted[1]);
    }

    #[tokio::test]
    async fn test_pull_request_comments_action() {
        let commenter = Arc::new(RecordingCommenter::default());
        let handler = handler_with(&commenter);

        let kind = handler.handle(pull_request_event("opened")).await.unwrap();

        assert_eq!(kind, EventKind::PullRequest);
        assert_eq!(
            commenter.posted(),
            vec![OutboundComment::new("mattmoor", "kontext", 5, "PR event: opened")]
        );
    }

    #[tokio::test]
    async fn test_pull_request_actions_are_not_filtered() {
        let commenter = Arc::new(RecordingCommenter::default());
        let handler = handler_with(&commenter);

        for action in ["closed", "labeled", "synchronize"] {
            handler.handle(pull_request_event(action)).await.unwrap();
        }

        let bodies: Vec<String> = commenter.posted().into_iter().map(|c| c.body).collect();
        assert_eq!(
            bodies,
            vec!["PR event: closed", "PR event: labeled", "PR event: synchronize"]
        );
    }

    #[tokio::test]
    async fn test_push_has_no_side_effect() {
        let commenter = Arc::new(RecordingCommenter::default());
        let handler = handler_with(&commenter);

        let kind = handler.handle(push_event()).await.unwrap();

        assert_eq!(kind, EventKind::Push);
        assert!(commenter.posted().is_empty());
    }

    #[tokio::test]
    async fn test_review_events_are_acknowledged() {
        let commenter = Arc::new(RecordingCommenter::default());
        let handler = handler_with(&commenter);

        let kind = handler.handle(review_event()).await.unwrap();
        assert_eq!(kind, EventKind::PullRequestReview);

        // The greeting trigger only applies to issue comments
        let kind = handler.handle(review_comment_event()).await.unwrap();
        assert_eq!(kind, EventKind::PullRequestReviewComment);

        assert!(commenter.posted().is_empty());
    }

    #[tokio::test]
    async fn test_every_kind_routes_to_itself() {
        let commenter = Arc::new(RecordingCommenter::default());
        let handler = handler_with(&commenter);

        let payloads = vec![
            pull_request_event("opened"),
            push_event(),
            review_event(),
            review_comment_event(),
            issue_comment("Goodbye."),
        ];
        for payload in payloads {
            let expected = payload.kind().unwrap();
            assert_eq!(handler.handle(payload).await.unwrap(), expected);
        }
    }

    #[tokio::test]
    async fn test_unrecognized_event_is_rejected() {
        let commenter = Arc::new(RecordingCommenter::default());
        let handler = handler_with(&commenter);

        let err = handler
            .handle(parse("watch", json!({ "action": "started" })))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            common::Error::UnrecognizedEventKind(ref kind) if kind == "watch"
        ));
        assert!(err.is_client_error());
        assert!(commenter.posted().is_empty());
    }

    #[tokio::test]
    async fn test_outbound_failure_propagates() {
        let commenter = Arc::new(RecordingCommenter::failing());
        let handler = handler_with(&commenter);

        let err = handler.handle(pull_request_event("opened")).await.unwrap_err();

        assert!(matches!(err, common::Error::OutboundCall(_)));
        assert!(!err.is_client_error());
        assert!(err.to_string().contains("502"));
        assert_eq!(commenter.posted().len(), 1);
    }

    #[tokio::test]
    async fn test_failing_commenter_unused_without_trigger() {
        let commenter = Arc::new(RecordingCommenter::failing());
        let handler = handler_with(&commenter);

        assert!(handler.handle(issue_comment("Goodbye.")).await.is_ok());
        assert!(handler.handle(push_event()).await.is_ok());
    }
}

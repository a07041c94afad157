//! Webhook payload parsing

use std::fmt;

use crate::events::*;
use tracing::{debug, warn};

/// Segment of `dev.knative.source.github.<kind>` that carries the event kind
const LEGACY_KIND_SEGMENT: usize = 4;

/// The event kinds this service understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PullRequest,
    Push,
    PullRequestReview,
    PullRequestReviewComment,
    IssueComment,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::PullRequest,
        EventKind::Push,
        EventKind::PullRequestReview,
        EventKind::PullRequestReviewComment,
        EventKind::IssueComment,
    ];

    /// The `X-GitHub-Event` label for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::PullRequest => "pull_request",
            EventKind::Push => "push",
            EventKind::PullRequestReview => "pull_request_review",
            EventKind::PullRequestReviewComment => "pull_request_review_comment",
            EventKind::IssueComment => "issue_comment",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == label)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Work out the event type label of a delivery.
///
/// `github_event` is the value of the `X-GitHub-Event` header and wins when
/// present. `legacy_ce_type` is the value of the `ce-eventtype` header set by
/// the Knative GitHub source, e.g. `dev.knative.source.github.issue_comment`.
/// Reading it is deprecated and only kept for deliveries relayed that way.
pub fn resolve_event_type(
    github_event: Option<&str>,
    legacy_ce_type: Option<&str>,
) -> Option<String> {
    if let Some(label) = github_event.map(str::trim).filter(|s| !s.is_empty()) {
        return Some(label.to_string());
    }

    let ce_type = legacy_ce_type?;
    let label = ce_type
        .split('.')
        .nth(LEGACY_KIND_SEGMENT)
        .map(str::trim)
        .filter(|s| !s.is_empty())?;

    warn!(
        "Deriving event type from deprecated ce-eventtype header ({}), send X-GitHub-Event instead",
        ce_type
    );
    Some(label.to_string())
}

/// Parsed webhook payload
#[derive(Debug)]
pub enum WebhookPayload {
    PullRequest(PullRequestEvent),
    Push(PushEvent),
    PullRequestReview(PullRequestReviewEvent),
    PullRequestReviewComment(PullRequestReviewCommentEvent),
    IssueComment(IssueCommentEvent),
    Unrecognized { event_type: String },
}

impl WebhookPayload {
    /// Parse a webhook payload from the event type and body.
    ///
    /// Unknown event types are not decoded at all and come back as
    /// [`WebhookPayload::Unrecognized`].
    pub fn parse(event_type: &str, body: &[u8]) -> Result<Self, serde_json::Error> {
        debug!("Parsing webhook: {}", event_type);

        let Some(kind) = EventKind::from_label(event_type) else {
            debug!("No payload type for event: {}", event_type);
            return Ok(WebhookPayload::Unrecognized {
                event_type: event_type.to_string(),
            });
        };

        let payload = match kind {
            EventKind::PullRequest => WebhookPayload::PullRequest(serde_json::from_slice(body)?),
            EventKind::Push => WebhookPayload::Push(serde_json::from_slice(body)?),
            EventKind::PullRequestReview => {
                WebhookPayload::PullRequestReview(serde_json::from_slice(body)?)
            }
            EventKind::PullRequestReviewComment => {
                WebhookPayload::PullRequestReviewComment(serde_json::from_slice(body)?)
            }
            EventKind::IssueComment => WebhookPayload::IssueComment(serde_json::from_slice(body)?),
        };
        Ok(payload)
    }

    /// The kind of a recognized payload
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            WebhookPayload::PullRequest(_) => Some(EventKind::PullRequest),
            WebhookPayload::Push(_) => Some(EventKind::Push),
            WebhookPayload::PullRequestReview(_) => Some(EventKind::PullRequestReview),
            WebhookPayload::PullRequestReviewComment(_) => {
                Some(EventKind::PullRequestReviewComment)
            }
            WebhookPayload::IssueComment(_) => Some(EventKind::IssueComment),
            WebhookPayload::Unrecognized { .. } => None,
        }
    }
}

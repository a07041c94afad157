//! GitHub event types
//!
//! Only the fields the handlers read are required. Everything else is
//! optional so new or missing payload fields never break decoding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// GitHub user (as appears in webhook payloads)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub id: Option<i64>,
    pub avatar_url: Option<String>,
}

/// GitHub repository (as appears in webhook payloads)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRepo {
    pub name: String,
    pub owner: GitHubUser,
    pub id: Option<i64>,
    pub full_name: Option<String>,
}

/// GitHub pull request (as appears in webhook payloads)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubPullRequest {
    pub number: Option<u64>,
    pub id: Option<i64>,
    pub title: Option<String>,
    pub state: Option<String>,
    pub html_url: Option<String>,
    pub user: Option<GitHubUser>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub merged: Option<bool>,
}

/// GitHub review (as appears in webhook payloads)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubReview {
    pub id: Option<i64>,
    pub user: Option<GitHubUser>,
    pub body: Option<String>,
    pub state: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
}

/// GitHub comment (as appears in webhook payloads)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubComment {
    pub body: String,
    pub id: Option<i64>,
    pub user: Option<GitHubUser>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Review comment on a pull request diff
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubReviewComment {
    pub id: Option<i64>,
    pub body: Option<String>,
    pub path: Option<String>,
    pub user: Option<GitHubUser>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Pull request event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestEvent {
    pub action: String,
    pub number: u64,
    pub pull_request: Option<GitHubPullRequest>,
    pub repository: GitHubRepo,
    pub sender: GitHubUser,
}

/// Push event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushEvent {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub before: Option<String>,
    pub after: Option<String>,
    pub head_commit: Option<PushCommit>,
    #[serde(default)]
    pub commits: Vec<PushCommit>,
    pub pusher: Option<Pusher>,
    pub repository: GitHubRepo,
    pub sender: Option<GitHubUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushCommit {
    pub id: Option<String>,
    pub message: Option<String>,
}

/// The git identity that pushed; not necessarily a GitHub account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pusher {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Pull request review event payload
///
/// Nothing reacts to reviews yet, so every field is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestReviewEvent {
    pub action: Option<String>,
    pub review: Option<GitHubReview>,
    pub pull_request: Option<GitHubPullRequest>,
    pub repository: Option<GitHubRepo>,
    pub sender: Option<GitHubUser>,
}

/// Pull request review comment event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestReviewCommentEvent {
    pub action: Option<String>,
    pub comment: Option<GitHubReviewComment>,
    pub pull_request: Option<GitHubPullRequest>,
    pub repository: Option<GitHubRepo>,
    pub sender: Option<GitHubUser>,
}

/// Issue comment event payload (also used for PR comments)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueCommentEvent {
    pub action: Option<String>,
    pub issue: IssueOrPr,
    pub comment: GitHubComment,
    pub repository: GitHubRepo,
    pub sender: GitHubUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueOrPr {
    pub number: u64,
    pub id: Option<i64>,
    pub title: Option<String>,
    pub pull_request: Option<serde_json::Value>, // Present if it's a PR
}

impl IssueOrPr {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

//! GitHub webhook payloads and the REST client used to answer them

pub mod client;
pub mod events;
pub mod webhooks;

pub use client::{ClientError, CreatedComment, GitHubClient, IssueCommenter};
pub use events::*;
pub use webhooks::{resolve_event_type, EventKind, WebhookPayload};

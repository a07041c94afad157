//! Domain models

/// A comment to post on an issue or pull request thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundComment {
    pub owner: String,
    pub repo: String,
    pub issue_number: u64,
    pub body: String,
}

impl OutboundComment {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        issue_number: u64,
        body: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            issue_number,
            body: body.into(),
        }
    }
}

//! GitHub REST API client for answering webhook events

use std::time::Duration;

use async_trait::async_trait;
use common::models::OutboundComment;
use common::Config;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Rate limited, retry after {retry_after} seconds")]
    RateLimited { retry_after: u64 },
    #[error("GitHub API error: {status} - {message}")]
    Api { status: u16, message: String },
}

impl From<ClientError> for common::Error {
    fn from(err: ClientError) -> Self {
        common::Error::OutboundCall(err.to_string())
    }
}

/// Capability to post comments on issue and pull request threads
#[async_trait]
pub trait IssueCommenter: Send + Sync {
    async fn create_comment(&self, comment: &OutboundComment) -> Result<(), ClientError>;
}

/// GitHub API client
pub struct GitHubClient {
    client: reqwest::Client,
    token: Option<String>,
    api_url: String,
}

#[derive(Serialize)]
struct CreateCommentRequest<'a> {
    body: &'a str,
}

/// Comment as returned by GitHub API after creation
#[derive(Debug, Deserialize)]
pub struct CreatedComment {
    pub id: i64,
    pub html_url: Option<String>,
}

impl GitHubClient {
    /// Every request made through the client gives up after `timeout`.
    pub fn new(
        token: Option<String>,
        api_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            token,
            api_url: api_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        Self::new(
            config.github_token.clone(),
            config.github_api_url.clone(),
            config.github_timeout,
        )
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("hello-hook/0.1"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(ref token) = self.token {
            if let Ok(val) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                headers.insert(AUTHORIZATION, val);
            }
        }
        headers
    }

    async fn post<B, T>(&self, url: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("POST {}", url);
        let resp = self
            .client
            .post(url)
            .headers(self.headers())
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        let exhausted = resp
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            == Some("0");
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || (status == reqwest::StatusCode::FORBIDDEN && exhausted)
        {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(ClientError::RateLimited { retry_after });
        }
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json().await?)
    }

    fn comments_url(&self, owner: &str, repo: &str, issue_number: u64) -> String {
        format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.api_url, owner, repo, issue_number
        )
    }

    /// Post a comment on an issue or pull request
    pub async fn create_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        body: &str,
    ) -> Result<CreatedComment, ClientError> {
        let url = self.comments_url(owner, repo, issue_number);
        let created: CreatedComment = self.post(&url, &CreateCommentRequest { body }).await?;
        info!(
            "Posted comment {} on {}/{}#{}",
            created.id, owner, repo, issue_number
        );
        Ok(created)
    }
}

#[async_trait]
impl IssueCommenter for GitHubClient {
    async fn create_comment(&self, comment: &OutboundComment) -> Result<(), ClientError> {
        self.create_issue_comment(
            &comment.owner,
            &comment.repo,
            comment.issue_number,
            &comment.body,
        )
        .await
        .map(|_| ())
    }
}

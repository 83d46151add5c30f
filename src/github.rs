use crate::config::{AppConfig, RepoId};
use crate::releases::GitHubRelease;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use std::fmt;

/// Why a single repository could not be fetched.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("GitHub API error: {}", status_line(.code, .reason))]
    Status { code: u16, reason: String },
    #[error("Fetch failed: {0}")]
    Transport(#[from] octocrab::Error),
    #[error("Fetch failed: {0}")]
    Decode(#[from] serde_json::Error),
}

/// "404 Not Found", or just "599" when the status has no reason phrase.
fn status_line(code: impl fmt::Display, reason: &str) -> String {
    if reason.is_empty() {
        code.to_string()
    } else {
        format!("{code} {reason}")
    }
}

#[derive(Clone)]
pub struct GitHubClient {
    octocrab: Octocrab,
}

impl GitHubClient {
    /// Builds a client for `config.github_api_url`.
    ///
    /// The token, when configured, is sent as `Authorization: Bearer` on every request.
    /// Octocrab only attaches it for the configured base URI, so requests use relative routes.
    /// Retries are disabled; each request is attempted once within the configured timeout.
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let timeout = Some(config.request_timeout());
        let mut builder = Octocrab::builder()
            .base_uri(config.github_api_url.as_str())?
            .add_retry_config(RetryConfig::None)
            .set_connect_timeout(timeout)
            .set_read_timeout(timeout);
        if let Some(token) = &config.github_token {
            builder = builder.personal_token(token.clone());
        }

        Ok(Self {
            octocrab: builder.build()?,
        })
    }

    /// Lists the releases of a repository, in the order GitHub returns them.
    pub async fn list_releases(&self, repo_id: &RepoId) -> Result<Vec<GitHubRelease>, FetchError> {
        let route = format!("/repos/{}/{}/releases", repo_id.owner, repo_id.repo);

        let response = self.octocrab._get(route.as_str()).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = self.octocrab.body_to_string(response).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

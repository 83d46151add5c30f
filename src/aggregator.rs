//! Service layer for collecting releases across repositories.
//!
//! This module implements `ReleaseAggregator`, the entry point used by both the JSON
//! endpoint and the HTML pages. It:
//! 1. Resolves which repositories were requested (one explicit identifier, or the
//!    configured defaults).
//! 2. Fetches every repository concurrently, one upstream request each.
//! 3. Turns each response, or failure, into a `RepositoryResult`.
//!
//! A failing repository never aborts the others. Results come back in request order.

use crate::config::{AppConfig, RepoId};
use crate::github::GitHubClient;
use crate::releases::{Release, RepositoryResult};
use futures::future;

#[derive(Clone)]
pub struct ReleaseAggregator {
    client: GitHubClient,
    default_repos: Vec<RepoId>,
}

impl ReleaseAggregator {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: GitHubClient::new(config)?,
            default_repos: config.release_repos.clone(),
        })
    }

    /// Fetches a single raw identifier if given, otherwise the configured defaults.
    ///
    /// A blank identifier counts as not given. One that is not of the form `owner/name`
    /// produces one failed result without contacting GitHub.
    pub async fn fetch_requested(&self, repo: Option<&str>) -> Vec<RepositoryResult> {
        match repo.filter(|raw| !raw.trim().is_empty()) {
            Some(raw) => match raw.parse::<RepoId>() {
                Ok(repo_id) => vec![self.fetch_one(&repo_id).await],
                Err(e) => {
                    tracing::warn!(repo = %raw, "Rejected repository identifier: {}", e);
                    vec![RepositoryResult::failure(raw, e.to_string())]
                }
            },
            None => self.fetch_all(&self.default_repos).await,
        }
    }

    /// Fetches all repositories concurrently and waits for every one of them.
    pub async fn fetch_all(&self, repos: &[RepoId]) -> Vec<RepositoryResult> {
        future::join_all(repos.iter().map(|repo_id| self.fetch_one(repo_id))).await
    }

    /// Fetches one repository, capturing any failure in the result.
    pub async fn fetch_one(&self, repo_id: &RepoId) -> RepositoryResult {
        match self.client.list_releases(repo_id).await {
            Ok(upstream) => {
                let releases: Vec<Release> = upstream
                    .into_iter()
                    .map(|release| Release::from_upstream(repo_id, release))
                    .collect();
                tracing::debug!(repo_id = %repo_id, count = releases.len(), "Fetched releases");
                RepositoryResult::success(repo_id.to_string(), releases)
            }
            Err(e) => {
                tracing::warn!(repo_id = %repo_id, "Failed to fetch releases: {}", e);
                RepositoryResult::failure(repo_id.to_string(), e.to_string())
            }
        }
    }
}

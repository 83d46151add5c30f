//! Application configuration and environment variable parsing.
//!
//! This module handles loading configuration settings from the environment (e.g., .env file).
//! It defines the `AppConfig` struct which governs the upstream GitHub connection, the
//! default list of mirrored repositories and the listen port.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

/// Repositories listed when no explicit `repo` is requested.
pub const DEFAULT_RELEASE_REPOS: &[&str] = &[
    "Anuken/Mindustry",
    "ankando/itch-mirror",
    "TinyLake/MindustryX",
    "Jackson11500/Mindustry-CN-ARC-Builds",
    "Catana791/Asthosus",
];

/// A unique identifier for a GitHub repository.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RepoId {
    /// The owner of the repository (e.g., "Anuken").
    pub owner: String,
    /// The name of the repository (e.g., "Mindustry").
    pub repo: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid repository identifier '{0}', expected owner/name")]
pub struct ParseRepoIdError(pub String);

impl FromStr for RepoId {
    type Err = ParseRepoIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ParseRepoIdError(trimmed.to_string());

        let (owner, repo) = trimmed.split_once('/').ok_or_else(invalid)?;
        let (owner, repo) = (owner.trim(), repo.trim());

        // Keep the upstream path to exactly /repos/{owner}/{repo}.
        let bad_segment =
            |seg: &str| seg.is_empty() || seg == "." || seg == ".." || seg.contains('/');
        if bad_segment(owner) || bad_segment(repo) {
            return Err(invalid());
        }

        Ok(Self::new(owner, repo))
    }
}

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    /// Optional GitHub token, sent as a bearer credential on every upstream request.
    #[serde(default)]
    pub github_token: Option<String>,

    /// Repositories shown on the listing page.
    /// Expected format: comma-separated string of "owner/repo" pairs.
    /// Example: "Anuken/Mindustry,TinyLake/MindustryX"
    #[serde(
        default = "default_release_repos",
        deserialize_with = "deserialize_release_repos"
    )]
    pub release_repos: Vec<RepoId>,

    /// Base URL of the GitHub REST API.
    #[serde(default = "default_github_api_url")]
    pub github_api_url: String,

    /// Connect and read timeout applied to each upstream request.
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,

    /// Port the HTTP server listens on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_release_repos() -> Vec<RepoId> {
    DEFAULT_RELEASE_REPOS
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect()
}

fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_request_timeout_seconds() -> u64 {
    30
}

fn default_port() -> u16 {
    3000
}

impl AppConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    pub fn request_timeout(&self) -> StdDuration {
        StdDuration::from_secs(self.request_timeout_seconds)
    }
}

fn deserialize_release_repos<'de, D>(deserializer: D) -> Result<Vec<RepoId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    Ok(parse_release_repos(&s))
}

fn parse_release_repos(s: &str) -> Vec<RepoId> {
    s.split(',')
        .filter_map(|part| match part.parse::<RepoId>() {
            Ok(id) => Some(id),
            Err(e) => {
                if !part.trim().is_empty() {
                    tracing::warn!("Skipping entry in RELEASE_REPOS: {}", e);
                }
                None
            }
        })
        .collect()
}

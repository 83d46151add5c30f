//! Release data as served by `/releases-api`.
//!
//! Upstream release objects are reduced to the tag, the asset download links and the
//! derived source archive links. Nothing here outlives a single request.

use crate::config::RepoId;
use crate::links;
use serde::{Deserialize, Serialize};

/// A GitHub release. Does not contain all fields.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRelease {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<GitHubAsset>,
}

/// A release's asset. Does not contain all fields.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubAsset {
    pub name: String,
    pub browser_download_url: String,
}

/// A downloadable file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub tag: String,
    pub source_zip: String,
    pub source_tar: String,
    pub assets: Vec<Asset>,
}

impl Release {
    pub fn from_upstream(repo_id: &RepoId, release: GitHubRelease) -> Self {
        let archives = links::repo_archive_urls(repo_id, &release.tag_name);
        Self {
            tag: release.tag_name,
            source_zip: archives.zip,
            source_tar: archives.tar,
            assets: release
                .assets
                .into_iter()
                .map(|a| Asset {
                    name: a.name,
                    url: a.browser_download_url,
                })
                .collect(),
        }
    }
}

/// Outcome of fetching one repository. Serialized flat, so the JSON carries either
/// `releases` or `error`, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepoOutcome {
    Success { releases: Vec<Release> },
    Failure { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryResult {
    /// The identifier as requested, e.g. "Anuken/Mindustry".
    pub repo: String,
    #[serde(flatten)]
    pub outcome: RepoOutcome,
}

impl RepositoryResult {
    pub fn success(repo: impl Into<String>, releases: Vec<Release>) -> Self {
        Self {
            repo: repo.into(),
            outcome: RepoOutcome::Success { releases },
        }
    }

    pub fn failure(repo: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            outcome: RepoOutcome::Failure {
                error: error.into(),
            },
        }
    }

    /// Releases on success, `None` if the fetch failed.
    pub fn releases(&self) -> Option<&[Release]> {
        match &self.outcome {
            RepoOutcome::Success { releases } => Some(releases),
            RepoOutcome::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            RepoOutcome::Success { .. } => None,
            RepoOutcome::Failure { error } => Some(error),
        }
    }

    /// Number of releases, counting a failed fetch as zero.
    pub fn release_count(&self) -> usize {
        self.releases().map_or(0, <[Release]>::len)
    }

    /// Second segment of the identifier, or the whole identifier if there is none.
    pub fn display_name(&self) -> &str {
        self.repo
            .split('/')
            .nth(1)
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream(body: &str) -> Vec<GitHubRelease> {
        serde_json::from_str(body).expect("valid upstream json")
    }

    #[test]
    fn test_from_upstream_maps_assets_and_archives() {
        let body = r#"[{
            "id": 1,
            "tag_name": "v146",
            "name": "Build 146",
            "assets": [
                {"name": "Mindustry.jar", "browser_download_url": "https://github.com/Anuken/Mindustry/releases/download/v146/Mindustry.jar", "size": 10}
            ]
        }]"#;
        let repo_id = RepoId::new("Anuken", "Mindustry");

        let release = Release::from_upstream(&repo_id, upstream(body).remove(0));

        assert_eq!(release.tag, "v146");
        assert_eq!(
            release.source_zip,
            "https://github.com/Anuken/Mindustry/archive/refs/tags/v146.zip"
        );
        assert_eq!(
            release.source_tar,
            "https://github.com/Anuken/Mindustry/archive/refs/tags/v146.tar.gz"
        );
        assert_eq!(
            release.assets,
            vec![Asset {
                name: "Mindustry.jar".to_string(),
                url: "https://github.com/Anuken/Mindustry/releases/download/v146/Mindustry.jar"
                    .to_string(),
            }]
        );
    }

    #[test]
    fn test_missing_assets_field_is_empty() {
        let release = Release::from_upstream(
            &RepoId::new("o", "n"),
            upstream(r#"[{"tag_name": "t"}]"#).remove(0),
        );
        assert!(release.assets.is_empty());
    }

    #[test]
    fn test_result_json_shape() {
        let ok = serde_json::to_value(RepositoryResult::success("o/n", vec![])).unwrap();
        assert_eq!(ok, serde_json::json!({"repo": "o/n", "releases": []}));

        let err = serde_json::to_value(RepositoryResult::failure("o/x", "boom")).unwrap();
        assert_eq!(err, serde_json::json!({"repo": "o/x", "error": "boom"}));
    }

    #[test]
    fn test_result_json_reads_back() {
        let parsed: Vec<RepositoryResult> = serde_json::from_str(
            r#"[{"repo": "o/n", "releases": []}, {"repo": "o/x", "error": "boom"}]"#,
        )
        .unwrap();
        assert_eq!(parsed[0], RepositoryResult::success("o/n", vec![]));
        assert_eq!(parsed[1].error(), Some("boom"));
    }

    #[test]
    fn test_release_count_and_display_name() {
        let failed = RepositoryResult::failure("Anuken/Mindustry", "GitHub API error: 404 Not Found");
        assert_eq!(failed.release_count(), 0);
        assert_eq!(failed.display_name(), "Mindustry");

        let bare = RepositoryResult::success("standalone", vec![]);
        assert_eq!(bare.display_name(), "standalone");
        assert_eq!(bare.release_count(), 0);
    }
}

//! Download link derivation.
//!
//! Source archives are not listed as release assets by GitHub, so their URLs are built
//! from the repository and tag. Accelerated links route any URL through the mirror proxy.

use crate::config::RepoId;

/// Proxy prefix for accelerated downloads.
pub const MIRROR_PREFIX: &str = "https://ghfast.top/";

const GITHUB_WEB_BASE: &str = "https://github.com";

/// Source code archive URLs for a single tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceArchives {
    pub zip: String,
    pub tar: String,
}

/// Builds the zip and tar.gz archive URLs for `tag`. The tag is used verbatim.
pub fn archive_urls(owner: &str, name: &str, tag: &str) -> SourceArchives {
    let base = format!("{GITHUB_WEB_BASE}/{owner}/{name}/archive/refs/tags/{tag}");
    SourceArchives {
        zip: format!("{base}.zip"),
        tar: format!("{base}.tar.gz"),
    }
}

pub fn repo_archive_urls(repo_id: &RepoId, tag: &str) -> SourceArchives {
    archive_urls(&repo_id.owner, &repo_id.repo, tag)
}

/// Prefixes `url` with the mirror proxy. No parsing or re-encoding takes place.
pub fn mirror_url(url: &str) -> String {
    format!("{MIRROR_PREFIX}{url}")
}

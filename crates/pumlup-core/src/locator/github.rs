//! Primary source: the GitHub releases listing.

use serde::Deserialize;

use super::{ReleaseCandidate, Source};
use crate::artifact::ArtifactPattern;
use crate::error::{Result, SyncError};
use crate::http::HttpClient;

/// One entry of `GET /repos/{owner}/{repo}/releases`. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub tag_name: Option<String>,
    pub draft: bool,
    pub prerelease: bool,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

#[derive(Debug, Deserialize)]
pub struct Asset {
    pub name: String,
    pub browser_download_url: String,
}

impl Release {
    pub fn is_eligible(&self) -> bool {
        !self.draft && !self.prerelease
    }
}

pub fn parse_releases(body: &[u8]) -> Result<Vec<Release>> {
    serde_json::from_slice(body).map_err(|e| SyncError::parse("GitHub releases response", e))
}

/// First matching asset of the first eligible release that has one.
/// Releases are taken in the order given (GitHub lists newest first).
pub fn select<'a>(releases: &'a [Release], pattern: &ArtifactPattern) -> Option<&'a Asset> {
    releases
        .iter()
        .filter(|r| {
            if !r.is_eligible() {
                tracing::debug!(tag = ?r.tag_name, "skipping draft/pre-release");
            }
            r.is_eligible()
        })
        .find_map(|r| r.assets.iter().find(|a| pattern.is_candidate(&a.name)))
}

pub fn locate(
    client: &dyn HttpClient,
    url: &str,
    pattern: &ArtifactPattern,
) -> Result<Option<ReleaseCandidate>> {
    tracing::info!(url, "fetching GitHub releases");
    let body = client.get(url)?;
    let releases = parse_releases(&body)?;
    tracing::debug!(count = releases.len(), "releases listed");

    let Some(asset) = select(&releases, pattern) else {
        return Ok(None);
    };
    // The primary source is trusted for ordering; the version is informational.
    let version = pattern.version_of(&asset.name).ok().flatten();
    ReleaseCandidate::new(
        &asset.browser_download_url,
        &asset.name,
        version,
        Source::GithubRelease,
    )
    .map(Some)
}

//! Fallback source: an RSS feed of published files (SourceForge mirror).
//!
//! The feed is not ordered by version, so every qualifying item is compared
//! and the highest version wins.

use serde::Deserialize;

use super::{ReleaseCandidate, Source};
use crate::artifact::{base_name, ArtifactPattern};
use crate::error::{Result, SyncError};
use crate::http::HttpClient;
use crate::version::Version;

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(default, rename = "item")]
    items: Vec<FeedItem>,
}

/// `<item>` of the feed; the title is the file path, e.g. `/1.2025.7/plantuml-mit-1.2025.7.jar`.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

pub fn parse_items(body: &[u8]) -> Result<Vec<FeedItem>> {
    let text = std::str::from_utf8(body).map_err(|e| SyncError::parse("release feed", e))?;
    let rss: Rss = quick_xml::de::from_str(text).map_err(|e| SyncError::parse("release feed", e))?;
    Ok(rss.channel.items)
}

/// Highest-versioned qualifying item, with its version. On equal versions the
/// earlier item is kept.
pub fn select_latest<'a>(
    items: &'a [FeedItem],
    pattern: &ArtifactPattern,
) -> Result<Option<(Version, &'a FeedItem)>> {
    let mut best: Option<(Version, &FeedItem)> = None;
    for item in items {
        let Some(title) = item.title.as_deref().map(str::trim) else {
            continue;
        };
        if !pattern.is_candidate(title) {
            continue;
        }
        let Some(version) = pattern.version_of(title)? else {
            continue;
        };
        if item.link.is_none() {
            tracing::debug!(title, "feed item has no link, skipping");
            continue;
        }
        if best.as_ref().map_or(true, |(v, _)| version > *v) {
            best = Some((version, item));
        }
    }
    Ok(best)
}

pub fn locate(
    client: &dyn HttpClient,
    url: &str,
    pattern: &ArtifactPattern,
) -> Result<Option<ReleaseCandidate>> {
    tracing::info!(url, "fetching release feed");
    let body = client.get(url)?;
    let items = parse_items(&body)?;
    tracing::debug!(count = items.len(), "feed items");

    let Some((version, item)) = select_latest(&items, pattern)? else {
        return Ok(None);
    };
    let title = item.title.as_deref().map(str::trim).unwrap_or_default();
    let link = item.link.as_deref().map(str::trim).unwrap_or_default();
    ReleaseCandidate::new(link, base_name(title), Some(version), Source::Feed).map(Some)
}

//! Finds the newest eligible artifact: GitHub releases first, the RSS feed
//! only when GitHub has nothing that matches.
//!
//! Errors from either source are final; a failing GitHub request does not
//! fall through to the feed.

pub mod feed;
pub mod github;

use std::fmt;

use crate::config::Settings;
use crate::error::{Result, SyncError};
use crate::http::HttpClient;
use crate::version::Version;

/// Where a candidate was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    GithubRelease,
    Feed,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::GithubRelease => f.write_str("GitHub releases"),
            Source::Feed => f.write_str("release feed"),
        }
    }
}

/// A located, not yet downloaded, artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseCandidate {
    pub url: String,
    pub filename: String,
    /// Parsed from the file name when it follows the naming pattern.
    pub version: Option<Version>,
    pub source: Source,
}

impl ReleaseCandidate {
    /// Builds a candidate after checking that `url` is an absolute http(s) URL
    /// and `filename` is a bare file name that cannot escape the store.
    pub fn new(
        url: &str,
        filename: &str,
        version: Option<Version>,
        source: Source,
    ) -> Result<Self> {
        let parsed = url::Url::parse(url)
            .map_err(|e| SyncError::parse("download URL", format!("`{url}`: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SyncError::parse(
                "download URL",
                format!("`{url}` is not http(s)"),
            ));
        }
        if filename.is_empty()
            || filename == "."
            || filename == ".."
            || filename.contains(['/', '\\', '\0'])
        {
            return Err(SyncError::parse(
                "artifact name",
                format!("`{filename}` is not a plain file name"),
            ));
        }
        Ok(Self {
            url: url.to_string(),
            filename: filename.to_string(),
            version,
            source,
        })
    }
}

/// Asks the primary source, then the fallback. `Ok(None)` when neither has a match.
pub fn locate_latest(
    client: &dyn HttpClient,
    settings: &Settings,
) -> Result<Option<ReleaseCandidate>> {
    if let Some(found) =
        github::locate(client, &settings.github_releases_url, &settings.artifact)?
    {
        return Ok(Some(found));
    }
    tracing::info!("no matching asset in GitHub releases, trying the feed");
    feed::locate(client, &settings.feed_url, &settings.artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::testing::FakeClient;

    const GH: &str = "https://gh.test/releases";
    const FEED: &str = "https://feed.test/rss";

    fn settings() -> Settings {
        Settings {
            github_releases_url: GH.to_string(),
            feed_url: FEED.to_string(),
            ..Settings::default()
        }
    }

    const ONE_RELEASE: &str = r#"[{"draft":false,"prerelease":false,"assets":[
        {"name":"plantuml-mit-1.2025.7.jar","browser_download_url":"https://dl.test/plantuml-mit-1.2025.7.jar"}]}]"#;

    const ONE_ITEM: &str = r#"<rss version="2.0"><channel>
        <item><title>/v1.2025.6/plantuml-mit-1.2025.6.jar</title><link>https://dl.test/sf/1.2025.6</link></item>
        </channel></rss>"#;

    #[test]
    fn candidate_rejects_bad_urls_and_names() {
        let ok = ReleaseCandidate::new("https://x.test/a.jar", "a.jar", None, Source::Feed);
        assert!(ok.is_ok());
        for (url, name) in [
            ("ftp://x.test/a.jar", "a.jar"),
            ("not a url", "a.jar"),
            ("https://x.test/a.jar", "../a.jar"),
            ("https://x.test/a.jar", ""),
        ] {
            let err = ReleaseCandidate::new(url, name, None, Source::Feed).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Parse, "{url} {name}");
        }
    }

    #[test]
    fn primary_match_skips_feed() {
        let client = FakeClient::new().route(GH, ONE_RELEASE).route(FEED, ONE_ITEM);
        let found = locate_latest(&client, &settings()).unwrap().unwrap();
        assert_eq!(found.filename, "plantuml-mit-1.2025.7.jar");
        assert_eq!(found.source, Source::GithubRelease);
        assert_eq!(client.requested(), vec![GH.to_string()]);
    }

    #[test]
    fn empty_primary_falls_back_to_feed() {
        let client = FakeClient::new().route(GH, "[]").route(FEED, ONE_ITEM);
        let found = locate_latest(&client, &settings()).unwrap().unwrap();
        assert_eq!(found.filename, "plantuml-mit-1.2025.6.jar");
        assert_eq!(found.url, "https://dl.test/sf/1.2025.6");
        assert_eq!(found.source, Source::Feed);
        assert_eq!(client.requested(), vec![GH.to_string(), FEED.to_string()]);
    }

    #[test]
    fn both_empty_is_not_found() {
        let client = FakeClient::new()
            .route(GH, "[]")
            .route(FEED, "<rss><channel></channel></rss>");
        assert!(locate_latest(&client, &settings()).unwrap().is_none());
    }

    #[test]
    fn primary_failure_is_fatal() {
        let client = FakeClient::new().status(GH, 403).route(FEED, ONE_ITEM);
        let err = locate_latest(&client, &settings()).unwrap_err();
        assert!(matches!(err, SyncError::Http { status: 403, .. }));
        assert_eq!(client.requested(), vec![GH.to_string()]);
    }

    #[test]
    fn malformed_primary_is_fatal() {
        let client = FakeClient::new().route(GH, "{not json").route(FEED, ONE_ITEM);
        let err = locate_latest(&client, &settings()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}

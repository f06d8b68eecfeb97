//! One sync run: locate, fetch, point the config at the jar, prune old jars.
//!
//! Steps run strictly in order and any error stops the run where it occurred.
//! Completed steps are not rolled back: a downloaded jar stays on disk even if
//! the config rewrite then fails.

use crate::config::Settings;
use crate::error::{Result, SyncError};
use crate::http::HttpClient;
use crate::ini::{self, KeyUpdate};
use crate::locator::{self, ReleaseCandidate};
use crate::store::{ArtifactStore, FetchOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Neither source had a matching artifact; nothing was changed.
    NotFound,
    Updated(SyncReport),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub candidate: ReleaseCandidate,
    pub fetch: FetchOutcome,
    pub config: KeyUpdate,
    /// Superseded artifacts deleted from the store.
    pub removed: Vec<String>,
}

/// Result of a dry lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub candidate: ReleaseCandidate,
    pub present: bool,
    pub configured: bool,
}

/// Local state only; no network access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    /// Value of the config key, `None` if the key is absent.
    pub configured: Option<String>,
    pub artifacts: Vec<String>,
}

pub fn store_for(settings: &Settings) -> ArtifactStore {
    ArtifactStore::new(&settings.resources_dir, settings.artifact.clone())
}

pub fn run(settings: &Settings, client: &dyn HttpClient) -> Result<SyncOutcome> {
    let Some(candidate) = locator::locate_latest(client, settings)? else {
        tracing::warn!("no matching artifact on any source");
        return Ok(SyncOutcome::NotFound);
    };
    tracing::info!(
        file = %candidate.filename,
        source = %candidate.source,
        "found latest artifact"
    );

    let store = store_for(settings);
    let fetch = store.ensure(client, &candidate)?;
    let config = ini::update_file(&settings.ini_file, &settings.config_key, &candidate.filename)?;
    let removed = store.prune(&candidate.filename)?;

    Ok(SyncOutcome::Updated(SyncReport {
        candidate,
        fetch,
        config,
        removed,
    }))
}

/// Locates the latest artifact and compares it with local state without changing anything.
pub fn check(settings: &Settings, client: &dyn HttpClient) -> Result<Option<CheckReport>> {
    let Some(candidate) = locator::locate_latest(client, settings)? else {
        return Ok(None);
    };
    let present = store_for(settings).contains(&candidate.filename);
    let configured = configured_jar(settings)?.as_deref() == Some(candidate.filename.as_str());
    Ok(Some(CheckReport {
        candidate,
        present,
        configured,
    }))
}

pub fn status(settings: &Settings) -> Result<StatusReport> {
    Ok(StatusReport {
        configured: configured_jar(settings)?,
        artifacts: store_for(settings).list()?,
    })
}

/// A missing INI file configures nothing.
fn configured_jar(settings: &Settings) -> Result<Option<String>> {
    let path = &settings.ini_file;
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(SyncError::io("read", path)(e)),
    };
    Ok(ini::read_key(&contents, &settings.config_key))
}

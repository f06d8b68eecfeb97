//! The artifact store: the resources directory holding the downloaded jar.
//!
//! Downloads go to `<name>.part` and are renamed into place once the transfer
//! finished with a 2xx status, so a complete-looking file is never partial.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::artifact::ArtifactPattern;
use crate::error::{Result, SyncError};
use crate::http::HttpClient;
use crate::locator::ReleaseCandidate;

/// Suffix of an in-flight download.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `a.jar` → `a.jar.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A file with the candidate's name was already there; nothing was fetched.
    AlreadyPresent,
    Downloaded { bytes: u64 },
}

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
    pattern: ArtifactPattern,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>, pattern: ArtifactPattern) -> Self {
        Self {
            dir: dir.into(),
            pattern,
        }
    }

    pub fn path_of(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.path_of(filename).is_file()
    }

    /// Names of managed artifacts currently in the store, sorted.
    /// A missing directory is an empty store.
    pub fn list(&self) -> Result<Vec<String>> {
        Ok(self
            .entries()?
            .into_iter()
            .filter(|name| self.pattern.is_managed(name))
            .collect())
    }

    /// Sorted names of every non-directory entry. Symlinks are entries
    /// themselves, whatever they point at.
    fn entries(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(SyncError::io("list", &self.dir)(e)),
        };
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(SyncError::io("list", &self.dir))?;
            let is_dir = entry
                .file_type()
                .map_err(SyncError::io("stat", &entry.path()))?
                .is_dir();
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if !is_dir {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    /// Makes sure the candidate's file exists in the store, downloading it only
    /// if it is missing.
    pub fn ensure(
        &self,
        client: &dyn HttpClient,
        candidate: &ReleaseCandidate,
    ) -> Result<FetchOutcome> {
        let final_path = self.path_of(&candidate.filename);
        if final_path.exists() {
            tracing::info!(path = %final_path.display(), "artifact already present");
            return Ok(FetchOutcome::AlreadyPresent);
        }

        fs::create_dir_all(&self.dir).map_err(SyncError::io("create", &self.dir))?;
        let part = temp_path(&final_path);
        tracing::info!(url = %candidate.url, path = %part.display(), "downloading artifact");

        let bytes = match download_to(client, &candidate.url, &part) {
            Ok(bytes) => bytes,
            Err(e) => {
                if let Err(rm) = fs::remove_file(&part) {
                    if rm.kind() != std::io::ErrorKind::NotFound {
                        tracing::warn!(path = %part.display(), "could not remove partial download: {}", rm);
                    }
                }
                return Err(e);
            }
        };

        fs::rename(&part, &final_path).map_err(SyncError::io("rename", &part))?;
        tracing::info!(path = %final_path.display(), bytes, "saved artifact");
        Ok(FetchOutcome::Downloaded { bytes })
    }

    /// Deletes every managed artifact except `keep`, along with leftover
    /// `.part` files of interrupted downloads. Returns the removed artifact
    /// names, sorted.
    pub fn prune(&self, keep: &str) -> Result<Vec<String>> {
        let mut removed = Vec::new();
        for name in self.entries()? {
            if self.pattern.is_managed(&name) {
                if name == keep {
                    continue;
                }
                let path = self.path_of(&name);
                fs::remove_file(&path).map_err(SyncError::io("remove", &path))?;
                tracing::info!(path = %path.display(), "removed old artifact");
                removed.push(name);
            } else if self.is_stale_part(&name) {
                let path = self.path_of(&name);
                fs::remove_file(&path).map_err(SyncError::io("remove", &path))?;
                tracing::info!(path = %path.display(), "removed partial download");
            }
        }
        Ok(removed)
    }

    fn is_stale_part(&self, name: &str) -> bool {
        name.strip_suffix(TEMP_SUFFIX)
            .is_some_and(|stem| self.pattern.is_managed(stem))
    }
}

fn download_to(client: &dyn HttpClient, url: &str, part: &Path) -> Result<u64> {
    let file = File::create(part).map_err(SyncError::io("create", part))?;
    let mut out = BufWriter::new(file);
    let bytes = client.download(url, &mut out)?;
    let file = out
        .into_inner()
        .map_err(|e| SyncError::io("write", part)(e.into_error()))?;
    file.sync_all().map_err(SyncError::io("sync", part))?;
    Ok(bytes)
}

//! Rewrites the `jar=` line of the viewer's INI file.
//!
//! The file is treated as plain lines, not parsed as INI: sections, comments
//! and spacing of every other line survive byte for byte.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{Result, SyncError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyUpdate {
    /// The key was rewritten; `previous` is the first old value.
    Replaced { previous: String },
    /// The key already named the file; the file was not touched.
    Unchanged,
    /// No line carries the key; the file was not touched and the key was not added.
    Missing,
}

/// Returns `contents` with every `key=` line set to `key=value`, plus the
/// first previous value if any line matched.
///
/// A line matches when, ignoring surrounding whitespace, it starts with
/// `key=`. The replacement keeps the line's terminator (`\n`, `\r\n` or none).
pub fn rewrite_key(contents: &str, key: &str, value: &str) -> (String, Option<String>) {
    let prefix = format!("{key}=");
    let mut out = String::with_capacity(contents.len() + value.len());
    let mut previous = None;

    for line in contents.split_inclusive('\n') {
        let body = line.trim_end_matches(['\r', '\n']);
        let trimmed = body.trim();
        match trimmed.strip_prefix(&prefix) {
            Some(old) => {
                if previous.is_none() {
                    previous = Some(old.to_string());
                }
                out.push_str(&prefix);
                out.push_str(value);
                out.push_str(&line[body.len()..]);
            }
            None => out.push_str(line),
        }
    }
    (out, previous)
}

/// Value of the first `key=` line, if any.
pub fn read_key(contents: &str, key: &str) -> Option<String> {
    let prefix = format!("{key}=");
    contents
        .lines()
        .find_map(|l| l.trim().strip_prefix(&prefix).map(str::to_owned))
}

/// Points `key` in the file at `path` to `value`.
///
/// The whole file is read first, then the new content is written to a temp
/// file next to it and renamed over the original.
pub fn update_file(path: &Path, key: &str, value: &str) -> Result<KeyUpdate> {
    let contents = fs::read_to_string(path).map_err(SyncError::io("read", path))?;
    let (updated, previous) = rewrite_key(&contents, key, value);

    let Some(previous) = previous else {
        tracing::warn!(path = %path.display(), key, "key not present; config left unchanged");
        return Ok(KeyUpdate::Missing);
    };
    if updated == contents {
        tracing::debug!(path = %path.display(), key, value, "config already up to date");
        return Ok(KeyUpdate::Unchanged);
    }

    write_replacing(path, updated.as_bytes())?;
    tracing::info!(path = %path.display(), key, from = %previous, to = value, "config updated");
    Ok(KeyUpdate::Replaced { previous })
}

fn write_replacing(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".pumlup-")
        .tempfile_in(dir)
        .map_err(SyncError::io("create temp file in", dir))?;
    tmp.write_all(data).map_err(SyncError::io("write", tmp.path()))?;
    tmp.as_file()
        .sync_all()
        .map_err(SyncError::io("sync", tmp.path()))?;
    if let Ok(meta) = fs::metadata(path) {
        // tempfile creates 0600 files; keep the original's permissions.
        let _ = fs::set_permissions(tmp.path(), meta.permissions());
    }
    tmp.persist(path)
        .map_err(|e| SyncError::io("replace", path)(e.error))?;
    Ok(())
}

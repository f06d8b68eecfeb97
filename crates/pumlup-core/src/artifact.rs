//! Naming rules for the managed artifact (`plantuml-mit-<version>.jar`).

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::version::Version;

/// Which published files count as the artifact, and which local files are ours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactPattern {
    /// Prefix of every managed file name; the version follows it.
    pub prefix: String,
    /// Extension including the dot.
    pub extension: String,
    /// Substring identifying the MIT-licensed build among the other license variants.
    pub license_marker: String,
    /// Names containing any of these are never selected (source and doc bundles).
    pub exclude: Vec<String>,
}

impl Default for ArtifactPattern {
    fn default() -> Self {
        Self {
            prefix: "plantuml-mit-".to_string(),
            extension: ".jar".to_string(),
            license_marker: "mit".to_string(),
            exclude: vec!["sources".to_string(), "javadoc".to_string()],
        }
    }
}

impl ArtifactPattern {
    /// True if a published asset/feed title is an eligible download.
    pub fn is_candidate(&self, name: &str) -> bool {
        name.contains(&self.license_marker)
            && name.ends_with(&self.extension)
            && !self.exclude.iter().any(|marker| name.contains(marker.as_str()))
    }

    /// True if a file in the store is a copy of the artifact this tool manages.
    pub fn is_managed(&self, file_name: &str) -> bool {
        file_name.starts_with(&self.prefix) && file_name.ends_with(&self.extension)
    }

    /// Extracts the version that follows the prefix, e.g. `1.2025.7` out of
    /// `/1.2025.7/plantuml-mit-1.2025.7.jar`.
    ///
    /// `Ok(None)` if the prefix or the extension is absent; an error if the
    /// text between them is not a dotted integer version.
    pub fn version_of(&self, name: &str) -> Result<Option<Version>> {
        let Some(start) = name.find(&self.prefix) else {
            return Ok(None);
        };
        let rest = &name[start + self.prefix.len()..];
        let Some(end) = rest.find(&self.extension) else {
            return Ok(None);
        };
        rest[..end].parse().map(Some)
    }
}

/// Last `/`-separated segment, i.e. the file name of a feed path like `/1.2025.7/x.jar`.
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

//! Dotted integer versions (`1.2025.7`) with tuple ordering.

use std::fmt;
use std::str::FromStr;

use crate::error::SyncError;

/// A version such as `1.2025.10`.
///
/// Ordering is component by component, so `1.2025.10 > 1.2025.9` and a
/// shorter version sorts before any longer one it prefixes (`1.2 < 1.2.0`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(Vec<u64>);

impl Version {
    pub fn components(&self) -> &[u64] {
        &self.0
    }
}

impl FromStr for Version {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(SyncError::parse("version", "empty version string"));
        }
        s.split('.')
            .map(|part| {
                part.parse::<u64>().map_err(|_| {
                    SyncError::parse("version", format!("`{part}` in `{s}` is not an integer"))
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Version)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        s.parse().unwrap()
    }

    #[test]
    fn numeric_not_textual_order() {
        assert!(v("1.2025.10") > v("1.2025.9"));
        assert!(v("1.2025.9") < v("1.2026.0"));
        assert!(v("2.0") > v("1.9999.9999"));
        assert_eq!(v("1.2025.7"), v("1.2025.7"));
    }

    #[test]
    fn prefix_sorts_first() {
        assert!(v("1.2") < v("1.2.0"));
        assert!(v("1.2.0") < v("1.10"));
    }

    #[test]
    fn max_picks_newest() {
        let versions = ["1.2024.8", "1.2025.10", "1.2025.9", "1.2025.1"];
        let newest = versions.iter().map(|s| v(s)).max().unwrap();
        assert_eq!(newest.to_string(), "1.2025.10");
    }

    #[test]
    fn rejects_non_numeric() {
        assert!("1.2025.7-beta".parse::<Version>().is_err());
        assert!("".parse::<Version>().is_err());
        assert!("1..2".parse::<Version>().is_err());
    }

    #[test]
    fn display_roundtrips_text() {
        assert_eq!(v("1.2025.7").to_string(), "1.2025.7");
        assert_eq!(v("1.2025.7").components(), &[1, 2025, 7]);
    }
}

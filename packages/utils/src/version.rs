//! Appliance versions and version-keyed strategy tables.

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use semver::{BuildMetadata, Version};
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

static NUMERIC_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*v?(\d+(?:\.\d+)*)").expect("static version pattern"));

/// Names under which development builds report themselves.
const STREAM_HEADS: [&str; 3] = ["master", "latest", "upstream"];

/// Version reported by an appliance, e.g. `5.8.3.0` or `master`.
///
/// The first three numeric components map onto a semver triple, anything
/// past them is kept as build metadata so that `5.9.0.2 < 5.9.0.10` still
/// holds. Stream heads compare above every released version.
#[derive(Debug, Clone)]
pub struct ApplianceVersion {
    raw: String,
    version: Version,
}

impl ApplianceVersion {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if STREAM_HEADS.contains(&trimmed.to_lowercase().as_str()) {
            return Ok(Self {
                raw: trimmed.to_string(),
                version: Version::new(u64::MAX, 0, 0),
            });
        }

        let captures = NUMERIC_PREFIX
            .captures(trimmed)
            .ok_or_else(|| anyhow!("Invalid appliance version '{raw}'"))?;
        let components = captures[1]
            .split('.')
            .map(|part| {
                part.parse::<u64>()
                    .map_err(|err| anyhow!("Invalid version component '{part}' in '{raw}': {err}"))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut version = Version::new(
            components[0],
            components.get(1).copied().unwrap_or(0),
            components.get(2).copied().unwrap_or(0),
        );
        if components.len() > 3 {
            let rest = components[3..]
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(".");
            version.build = BuildMetadata::new(&rest)?;
        }

        Ok(Self {
            raw: trimmed.to_string(),
            version,
        })
    }

    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            raw: format!("{major}.{minor}.{patch}"),
            version: Version::new(major, minor, patch),
        }
    }

    /// Lower bound used as the first branch of a [`VersionPicker`].
    pub fn lowest() -> Self {
        Self {
            raw: "0".to_string(),
            version: Version::new(0, 0, 0),
        }
    }

    pub fn latest() -> Self {
        Self {
            raw: "master".to_string(),
            version: Version::new(u64::MAX, 0, 0),
        }
    }

    pub fn is_stream_head(&self) -> bool {
        self.version.major == u64::MAX
    }

    pub fn as_semver(&self) -> &Version {
        &self.version
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for ApplianceVersion {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
    }
}

impl Eq for ApplianceVersion {}

impl Hash for ApplianceVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.version.hash(state);
    }
}

impl PartialOrd for ApplianceVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ApplianceVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.version.cmp(&other.version)
    }
}

impl FromStr for ApplianceVersion {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ApplianceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Strategy table keyed by version range.
///
/// Each branch starts at its lower bound and runs until the next bound;
/// `pick` returns the value of the branch the given version falls in.
#[derive(Debug, Clone)]
pub struct VersionPicker<T> {
    branches: Vec<(ApplianceVersion, T)>,
}

impl<T> VersionPicker<T> {
    pub fn new(mut branches: Vec<(ApplianceVersion, T)>) -> Self {
        branches.sort_by(|a, b| a.0.cmp(&b.0));
        Self { branches }
    }

    /// Build a picker from string bounds, failing on the first unparsable one.
    pub fn from_bounds<I>(branches: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'static str, T)>,
    {
        let branches = branches
            .into_iter()
            .map(|(bound, value)| Ok((ApplianceVersion::parse(bound)?, value)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(branches))
    }

    pub fn pick(&self, version: &ApplianceVersion) -> Option<&T> {
        self.branches
            .iter()
            .rev()
            .find(|(bound, _)| bound <= version)
            .map(|(_, value)| value)
    }

    pub fn branches(&self) -> impl Iterator<Item = (&ApplianceVersion, &T)> {
        self.branches.iter().map(|(bound, value)| (bound, value))
    }
}

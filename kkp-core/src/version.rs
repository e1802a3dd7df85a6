use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A Kubernetes release version such as `1.24.3`
///
/// Parsing is lenient in the ways Kubernetes versions are commonly written:
/// a leading `v` is accepted and a missing patch (or minor) component is taken as zero.
///
/// ```
/// use kkp_core::KubernetesVersion;
/// let v: KubernetesVersion = "v1.24".parse().unwrap();
/// assert_eq!(v.to_string(), "1.24.0");
/// assert_eq!(v.major_minor(), "1.24");
/// assert!(v.at_least(1, 24));
/// assert!(!v.at_least(1, 25));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KubernetesVersion(semver::Version);

/// Failure to parse a [`KubernetesVersion`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{input:?} is not a valid version: {reason}")]
pub struct ParseVersionError {
    input: String,
    reason: String,
}

impl KubernetesVersion {
    /// Builds a version from its numeric components
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(semver::Version::new(major, minor, patch))
    }

    /// Parses a version string
    pub fn parse(input: &str) -> Result<Self, ParseVersionError> {
        let err = |reason: String| ParseVersionError {
            input: input.to_string(),
            reason,
        };
        let trimmed = input.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Err(err("empty version".into()));
        }

        // pad "1" and "1.24" out to a full triple before handing it to semver
        let (core, rest) = match trimmed.find(&['-', '+'][..]) {
            Some(idx) => trimmed.split_at(idx),
            None => (trimmed, ""),
        };
        let padded = match core.split('.').count() {
            1 => format!("{core}.0.0{rest}"),
            2 => format!("{core}.0{rest}"),
            _ => trimmed.to_string(),
        };
        semver::Version::parse(&padded)
            .map(Self)
            .map_err(|e| err(e.to_string()))
    }

    /// Major version
    pub fn major(&self) -> u64 {
        self.0.major
    }

    /// Minor version
    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    /// Patch version
    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    /// `<major>.<minor>`, as used in versioned resource names
    pub fn major_minor(&self) -> String {
        format!("{}.{}", self.0.major, self.0.minor)
    }

    /// Whether this version is at or above `major.minor`, ignoring patch and pre-release parts
    pub fn at_least(&self, major: u64, minor: u64) -> bool {
        (self.0.major, self.0.minor) >= (major, minor)
    }

    /// Access the underlying semantic version
    pub fn as_semver(&self) -> &semver::Version {
        &self.0
    }
}

impl FromStr for KubernetesVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for KubernetesVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<semver::Version> for KubernetesVersion {
    fn from(v: semver::Version) -> Self {
        Self(v)
    }
}

impl Serialize for KubernetesVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for KubernetesVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(de::Error::custom)
    }
}

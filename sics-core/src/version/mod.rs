//! Semantic version parsing, ordering, and range matching.
//!
//! Parsing follows the strict semver 2.0 grammar. Ranges use npm-style syntax
//! and are translated onto [`semver::VersionReq`] (see [`range`]).

mod range;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::VersionError;

pub use range::VersionRange;

/// `major.minor.patch[-prerelease][+build]`.
///
/// Ordering and equality ignore build metadata.
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<String>,
    pub build: Option<String>,
}

impl SemanticVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
            build: None,
        }
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    pub(crate) fn to_semver(&self) -> Result<semver::Version, VersionError> {
        let invalid = |_| VersionError::InvalidFormat(self.to_string());
        Ok(semver::Version {
            major: self.major,
            minor: self.minor,
            patch: self.patch,
            pre: match &self.prerelease {
                Some(p) => semver::Prerelease::new(p).map_err(invalid)?,
                None => semver::Prerelease::EMPTY,
            },
            build: match &self.build {
                Some(b) => semver::BuildMetadata::new(b).map_err(invalid)?,
                None => semver::BuildMetadata::EMPTY,
            },
        })
    }
}

impl From<semver::Version> for SemanticVersion {
    fn from(v: semver::Version) -> Self {
        Self {
            major: v.major,
            minor: v.minor,
            patch: v.patch,
            prerelease: (!v.pre.is_empty()).then(|| v.pre.as_str().to_string()),
            build: (!v.build.is_empty()).then(|| v.build.as_str().to_string()),
        }
    }
}

impl FromStr for SemanticVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{pre}")?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{build}")?;
        }
        Ok(())
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.prerelease, &other.prerelease) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => compare_prerelease(a, b),
            })
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

pub fn parse(input: &str) -> Result<SemanticVersion, VersionError> {
    semver::Version::parse(input)
        .map(SemanticVersion::from)
        .map_err(|_| VersionError::InvalidFormat(input.to_string()))
}

pub fn format(version: &SemanticVersion) -> String {
    version.to_string()
}

pub fn compare(a: &SemanticVersion, b: &SemanticVersion) -> Ordering {
    a.cmp(b)
}

/// True iff `version` parses and matches at least one alternative of `range`.
pub fn satisfies(version: &str, range: &str) -> bool {
    let Ok(v) = semver::Version::parse(version) else {
        return false;
    };
    match VersionRange::parse(range) {
        Ok(r) => r.matches_semver(&v),
        Err(e) => {
            tracing::warn!(range, error = %e, "ignoring unparsable version range");
            false
        }
    }
}

// Dot-separated identifiers: numeric ones compare numerically and sort before
// alphanumeric ones; a shorter list that is a prefix of a longer one sorts first.
fn compare_prerelease(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (numeric_identifier(x), numeric_identifier(y)) {
                    (Some(m), Some(n)) => m.cmp(&n),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => x.cmp(y),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn numeric_identifier(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An opaque version tag (`map-vtag`) stamping one snapshot of map data.
///
/// Tags are compared only for equality; clients use them to detect that two
/// responses were produced from the same map state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionTag(String);

impl VersionTag {
    /// Wrap an existing tag supplied by a map source.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Mint a fresh opaque tag for a newly built map.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VersionTag {
    fn from(tag: &str) -> Self {
        Self(tag.to_string())
    }
}

impl From<String> for VersionTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

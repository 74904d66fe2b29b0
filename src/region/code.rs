use std::{fmt, sync::Arc};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Canonical identifier for a country or administrative region.
/// Keeps the normalized text (trimmed, uppercase, alias-resolved) without repeated owned Strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionCode(Arc<str>);

impl RegionCode {
    /// Wrap text that is already canonical. Use [`super::Normalizer`] for raw input.
    pub(crate) fn from_canonical(code: &str) -> Self {
        Self(Arc::from(code))
    }

    /// Get the code as a string slice.
    #[inline] pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RegionCode {
    fn as_ref(&self) -> &str { &self.0 }
}

impl Serialize for RegionCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RegionCode {
    /// Deserialized codes are normalized with the builtin alias table.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(super::normalize(&raw))
    }
}

/// Trim surrounding whitespace and uppercase.
pub(crate) fn canonical_text(raw: &str) -> String {
    raw.trim().to_uppercase()
}

//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a material record.
///
/// Opaque string. Freshly generated ids are UUIDv7 (time-ordered), but any
/// non-empty string is accepted when parsing so records written by earlier
/// versions of the store keep their identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MaterialId(String);

impl MaterialId {
    /// Create a new, collision-resistant identifier.
    ///
    /// Prefer passing IDs explicitly in tests for determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MaterialId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for MaterialId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Uuid> for MaterialId {
    fn from(value: Uuid) -> Self {
        Self::from_uuid(value)
    }
}

impl TryFrom<String> for MaterialId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MaterialId> for String {
    fn from(value: MaterialId) -> Self {
        value.0
    }
}

impl FromStr for MaterialId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_id("MaterialId: empty"));
        }
        Ok(Self(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_unique() {
        let a = MaterialId::new();
        let b = MaterialId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn parses_legacy_timestamp_ids() {
        let id: MaterialId = "1712345678901".parse().unwrap();
        assert_eq!(id.as_str(), "1712345678901");
    }

    #[test]
    fn rejects_blank_ids() {
        let err = "   ".parse::<MaterialId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = MaterialId::from_uuid(Uuid::nil());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", Uuid::nil()));

        let back: MaterialId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn stored_ids_follow_the_parse_rules() {
        assert!(serde_json::from_str::<MaterialId>("\"\"").is_err());
        assert!(serde_json::from_str::<MaterialId>("\"  \"").is_err());

        let legacy: MaterialId = serde_json::from_str("\"1712345678901\"").unwrap();
        assert_eq!(legacy.as_str(), "1712345678901");
    }
}

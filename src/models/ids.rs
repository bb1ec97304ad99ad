//! Transaction identifier
//!
//! A UUID newtype so record ids can't be confused with other strings.
//! Displayed in a short `txn-xxxxxxxx` form for tables and prompts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const DISPLAY_PREFIX: &str = "txn-";

/// Unique identifier of a transaction record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parse an ID from a string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        s.parse()
    }

    /// Lowercase hex digits of the UUID without hyphens
    pub fn simple(&self) -> String {
        self.0.simple().to_string()
    }

    /// Strip the display prefix from user input, if present
    pub fn strip_prefix(s: &str) -> &str {
        s.strip_prefix(DISPLAY_PREFIX).unwrap_or(s)
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", DISPLAY_PREFIX, &self.simple()[..8])
    }
}

impl FromStr for TransactionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = Self::strip_prefix(s.trim());
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = TransactionId::new();
        assert!(!id.as_uuid().is_nil());
        assert_ne!(id, TransactionId::new());
    }

    #[test]
    fn test_id_display() {
        let id = TransactionId::new();
        let display = format!("{}", id);
        assert!(display.starts_with("txn-"));
        assert_eq!(display.len(), 12); // "txn-" + 8 chars
        assert!(id.simple().starts_with(&display[4..]));
    }

    #[test]
    fn test_id_serialization() {
        let id = TransactionId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));

        let deserialized: TransactionId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_id_parse() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id = TransactionId::parse(uuid_str).unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);

        let prefixed: TransactionId = format!("txn-{}", uuid_str).parse().unwrap();
        assert_eq!(prefixed, id);

        assert!(TransactionId::parse("txn-550e8400").is_err());
    }
}

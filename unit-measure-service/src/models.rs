//! Unit of measure domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a unit measure name, matching the column width
pub const MAX_NAME_LENGTH: usize = 255;

/// A stored unit of measure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitMeasure {
    /// Store-generated identifier, immutable after creation
    pub id: i64,
    /// Unique name
    pub name: String,
}

/// A validated unit measure name
///
/// Surrounding whitespace is trimmed; the result is non-empty, free of
/// control characters and at most [`MAX_NAME_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitMeasureName(String);

impl UnitMeasureName {
    /// Validate a raw name
    pub fn parse(raw: &str) -> Result<Self, NameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(NameError::Empty);
        }
        if let Some(c) = trimmed.chars().find(|c| c.is_control()) {
            return Err(NameError::ControlCharacter { code: u32::from(c) });
        }
        let length = trimmed.chars().count();
        if length > MAX_NAME_LENGTH {
            return Err(NameError::TooLong { length });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitMeasureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a name was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    /// Blank after trimming
    #[error("name must not be empty")]
    Empty,
    /// Contains NUL or another control character, which the text column rejects
    #[error("name must not contain control characters, found U+{code:04X}")]
    ControlCharacter {
        /// Code point of the first offending character
        code: u32,
    },
    /// Exceeds the column width
    #[error("name must be at most {MAX_NAME_LENGTH} characters, got {length}")]
    TooLong {
        /// Length of the rejected name in characters
        length: usize,
    },
}

/// Request body for creating or renaming a unit measure
#[derive(Debug, Clone, Deserialize)]
pub struct UnitMeasurePayload {
    /// Requested name
    pub name: String,
}

impl UnitMeasurePayload {
    /// Validate the payload into a name
    pub fn validate(&self) -> Result<UnitMeasureName, NameError> {
        UnitMeasureName::parse(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_trimmed() {
        let name = UnitMeasureName::parse("  kg ").unwrap();
        assert_eq!(name.as_str(), "kg");
    }

    #[test]
    fn test_blank_name_rejected() {
        assert_eq!(UnitMeasureName::parse(""), Err(NameError::Empty));
        assert_eq!(UnitMeasureName::parse("   "), Err(NameError::Empty));
    }

    #[test]
    fn test_long_name_rejected() {
        let raw = "m".repeat(MAX_NAME_LENGTH + 1);
        assert_eq!(
            UnitMeasureName::parse(&raw),
            Err(NameError::TooLong {
                length: MAX_NAME_LENGTH + 1
            })
        );
        assert!(UnitMeasureName::parse(&"m".repeat(MAX_NAME_LENGTH)).is_ok());
    }

    #[test]
    fn test_control_characters_rejected() {
        assert_eq!(
            UnitMeasureName::parse("a\u{0000}b"),
            Err(NameError::ControlCharacter { code: 0 })
        );
        assert_eq!(
            UnitMeasureName::parse("k\u{0007}g"),
            Err(NameError::ControlCharacter { code: 7 })
        );
        assert_eq!(
            NameError::ControlCharacter { code: 0 }.to_string(),
            "name must not contain control characters, found U+0000"
        );
        // trailing newline is whitespace and gets trimmed first
        assert!(UnitMeasureName::parse("kg\n").is_ok());
    }

    #[test]
    fn test_payload_deserialize() {
        let payload: UnitMeasurePayload = serde_json::from_str(r#"{"name":"litre"}"#).unwrap();
        assert_eq!(payload.validate().unwrap().as_str(), "litre");
    }
}

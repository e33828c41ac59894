//! Human-readable envelope messages
//!
//! The wording is part of the wire contract, including the missing space in
//! [`Message::RecordDeleted`].

use std::fmt;

/// Resource label interpolated into every message
pub const RESOURCE: &str = "unit measure";

/// Envelope message templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message<'a> {
    /// A record (or page of records) was read
    RecordFound { resource: &'a str },
    /// A record was created
    RecordCreated { resource: &'a str },
    /// A record was renamed
    RecordUpdated { resource: &'a str, id: i64 },
    /// A record was deleted
    RecordDeleted { resource: &'a str, id: i64 },
    /// No record has the requested id
    RecordNotFound { resource: &'a str, id: i64 },
    /// A record with the same name exists
    RecordAlreadyExists { resource: &'a str },
    /// The request could not be parsed or validated
    InvalidRequest { resource: &'a str },
    /// Unexpected failure
    InternalError,
}

impl fmt::Display for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RecordFound { resource } => {
                write!(f, "The {} has been found successfully", resource)
            }
            Self::RecordCreated { resource } => {
                write!(f, "The {} has been created successfully", resource)
            }
            Self::RecordUpdated { resource, id } => write!(
                f,
                "The {} with id '{}' has been updated successfully",
                resource, id
            ),
            Self::RecordDeleted { resource, id } => write!(
                f,
                "The {} with id '{}'has been deleted successfully",
                resource, id
            ),
            Self::RecordNotFound { resource, id } => {
                write!(f, "The {} with id '{}' has not been found", resource, id)
            }
            Self::RecordAlreadyExists { resource } => {
                write!(f, "The {} already exists", resource)
            }
            Self::InvalidRequest { resource } => {
                write!(f, "The request for the {} is invalid", resource)
            }
            Self::InternalError => {
                write!(f, "An error occurred during your request, please try again")
            }
        }
    }
}

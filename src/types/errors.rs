use std::fmt;

use crate::types::bookmark::BookmarkKind;

// === RegistryError ===

/// Errors from bookmark registry operations.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// The bookmark's kind does not match the registry it was handed to.
    KindMismatch {
        expected: BookmarkKind,
        actual: BookmarkKind,
    },
    /// A bookmark with the same id already exists in this registry.
    DuplicateId(u32),
    /// No bookmark with the given id exists in this registry.
    NotFound(u32),
    /// The bookmark's owning vessel could not be located at creation time.
    Unresolvable(u32),
    /// Move past the first or last position; a no-op.
    AtBoundary(u32),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::KindMismatch { expected, actual } => {
                write!(f, "Bookmark kind mismatch: registry holds {}, got {}", expected, actual)
            }
            RegistryError::DuplicateId(id) => write!(f, "Duplicate bookmark id: {}", id),
            RegistryError::NotFound(id) => write!(f, "Bookmark not found: {}", id),
            RegistryError::Unresolvable(id) => {
                write!(f, "Bookmark target could not be resolved: {}", id)
            }
            RegistryError::AtBoundary(id) => {
                write!(f, "Bookmark already at boundary position: {}", id)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

// === DecodeError ===

/// Errors from decoding a persisted bookmark node.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// A mandatory field is absent from the node.
    MissingField(&'static str),
    /// A field value could not be parsed.
    InvalidValue { field: &'static str, value: String },
    /// The persisted kind string is not a known bookmark kind.
    UnknownKind(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::MissingField(field) => {
                write!(f, "Missing mandatory bookmark field: {}", field)
            }
            DecodeError::InvalidValue { field, value } => {
                write!(f, "Invalid value for bookmark field {}: {}", field, value)
            }
            DecodeError::UnknownKind(kind) => write!(f, "Unknown bookmark kind: {}", kind),
        }
    }
}

impl std::error::Error for DecodeError {}

// === TextError ===

/// Errors from parsing the save-text form of a node tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TextError {
    /// The input is not a well-formed node document.
    Syntax(String),
    /// Parsing stopped before the end of the input.
    TrailingInput(String),
}

impl fmt::Display for TextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextError::Syntax(msg) => write!(f, "Save text syntax error: {}", msg),
            TextError::TrailingInput(rest) => {
                write!(f, "Trailing input after node document: {:.40}", rest)
            }
        }
    }
}

impl std::error::Error for TextError {}

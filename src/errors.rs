//! Error types for bit string, address and range operations.

use thiserror::Error;

/// Errors raised by [`BitString`](crate::models::BitString) and the types built on it.
///
/// Each variant is a distinct failure category so callers can match on it
/// instead of inspecting messages.
#[derive(Debug, Error)]
pub enum BitError {
    /// A negative magnitude was supplied to a bit string constructor.
    #[error("Negative values not handled: {0}")]
    UnsupportedValue(String),

    /// A value does not fit its declared length, or two lengths are incompatible.
    #[error("Length error: {0}")]
    Length(String),

    /// A bit index is out of range after resolving negative indices.
    #[error("index {index} out of range for length {length}")]
    Index { index: isize, length: usize },

    /// Malformed literal (digit string, address, CIDR).
    #[error("Parse error: {0}")]
    Parse(String),

    /// A length or an address is not aligned to the required boundary.
    #[error("Alignment error: {0}")]
    Alignment(String),

    /// An argument is outside the values the operation accepts.
    #[error("Invalid argument: {0}")]
    Argument(String),

    /// I/O error while writing a table.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for bit string operations.
pub type Result<T> = std::result::Result<T, BitError>;

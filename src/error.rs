//! Error types for libcat-manager.

use thiserror::Error;

/// Failure kinds raised by catalog lookups and propagated through composite
/// operations (borrow, return, remove) up to the command dispatcher.
///
/// Expected-but-non-exceptional outcomes (book unavailable, username taken,
/// permission denied) are not errors; they are reported through the outcome
/// enums in [`crate::catalog`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("no such user: {0}")]
    UserNotFound(String),

    #[error("book {0} does not exist")]
    BookNotFound(u32),
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

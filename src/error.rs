//! Error types for cowtrie
//!
//! Trie operations themselves are infallible: a missing key or a type
//! mismatch is reported as `None`. These errors belong to the replay
//! session that drives tries from a script.

use thiserror::Error;

/// Result type alias for cowtrie operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while replaying commands
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Unknown version: {0}")]
    UnknownVersion(usize),
}

//! Error types for the Kanabigram library.
//!
//! All errors are represented by the [`KanabigramError`] enum. Tokenization
//! itself never fails on content: every character classifies to something.
//! What can fail is the character source underneath (I/O, bad UTF-8) and
//! configuration loading when the caller asks for the strict loader.
//!
//! # Examples
//!
//! ```
//! use kanabigram::error::{KanabigramError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(KanabigramError::config("capitalize_kana must be true or false"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Kanabigram operations.
#[derive(Error, Debug)]
pub enum KanabigramError {
    /// I/O errors raised by a character source or a config file read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A byte source produced something that is not UTF-8.
    #[error("Invalid UTF-8 at byte {offset}")]
    InvalidUtf8 {
        /// Byte offset in the source where decoding failed.
        offset: usize,
    },

    /// Configuration errors (only surfaced by the strict loader).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Analysis-related errors (tokenizer misuse, poisoned state).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with KanabigramError.
pub type Result<T> = std::result::Result<T, KanabigramError>;

impl KanabigramError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        KanabigramError::Config(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        KanabigramError::Analysis(msg.into())
    }

    /// Whether this error came from the underlying character source.
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            KanabigramError::Io(_) | KanabigramError::InvalidUtf8 { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = KanabigramError::config("bad key");
        assert_eq!(error.to_string(), "Configuration error: bad key");

        let error = KanabigramError::analysis("poisoned");
        assert_eq!(error.to_string(), "Analysis error: poisoned");

        let error = KanabigramError::InvalidUtf8 { offset: 7 };
        assert_eq!(error.to_string(), "Invalid UTF-8 at byte 7");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::UnexpectedEof, "truncated");
        let error = KanabigramError::from(io_error);

        match error {
            KanabigramError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
        assert!(KanabigramError::InvalidUtf8 { offset: 0 }.is_source_error());
        assert!(!KanabigramError::config("x").is_source_error());
    }
}

//! Text analysis module for Kanabigram.
//!
//! Tokens and the tokenizers that produce them.

pub mod token;
pub mod tokenizer;

// Re-export commonly used types
pub use token::*;
pub use tokenizer::*;

//! # Kanabigram
//!
//! A tokenizer for search text that mixes Japanese and Latin script.
//!
//! ## Features
//!
//! - Overlapping 2-grams over kana and kanji runs
//! - Whole-word tokens for Latin letters and digits
//! - Hyphen-free joins of hyphen chains (`Cyber-Shot` → `cybershot`)
//! - Half-width/full-width folding and half-width kana voicing merge
//! - Streaming over any character source, with exact source offsets

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;

pub mod prelude {
    pub use crate::analysis::token::{Token, TokenKind, TokenStream};
    pub use crate::analysis::tokenizer::{
        CharSource, CjkBigramStream, CjkBigramTokenizer, IterSource, ReaderSource, Tokenizer,
        TokenizerFactory,
    };
    pub use crate::config::{TokenizerConfig, WordMode};
    pub use crate::error::{KanabigramError, Result};
}

//! Tokenizer implementations for text analysis.
//!
//! Tokenizers break text into tokens. The one provided here targets search
//! text that mixes Japanese and Latin script:
//!
//! - kana/kanji runs become overlapping 2-grams,
//! - Latin/digit runs become whole words, or 2-grams in [`WordMode::Bigram`],
//! - hyphen chains such as `Cyber-Shot` also yield their hyphen-free joins.
//!
//! # Available Tokenizers
//!
//! - [`cjk_bigram::CjkBigramTokenizer`] - `&str` tokenizer
//! - [`cjk_bigram::CjkBigramStream`] - pull-based scanner over any [`source::CharSource`]
//! - [`factory::TokenizerFactory`] - creates streams from one configuration
//!
//! # Examples
//!
//! ```
//! use kanabigram::analysis::tokenizer::Tokenizer;
//! use kanabigram::analysis::tokenizer::cjk_bigram::CjkBigramTokenizer;
//!
//! let tokenizer = CjkBigramTokenizer::default();
//! let tokens: Vec<_> = tokenizer.tokenize("ﾊﾟｰｸ").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[0].text, "パー");
//! assert_eq!((tokens[0].start_offset, tokens[0].end_offset), (0, 3));
//! ```
//!
//! [`WordMode::Bigram`]: crate::config::WordMode::Bigram

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so a configured tokenizer can be shared
/// between indexing threads.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

mod bigram;
pub mod cjk_bigram;
pub mod classifier;
pub mod factory;
mod hyphen;
pub mod sign;
pub mod source;

pub use cjk_bigram::{CjkBigramStream, CjkBigramTokenizer};
pub use classifier::{CharClass, Classifier, capitalize_kana};
pub use factory::TokenizerFactory;
pub use hyphen::{MAX_HYPHEN, MAX_WORD_LEN};
pub use sign::SignTable;
pub use source::{CharSource, IterSource, ReaderSource};

//! Factory for creating tokenizer streams.
//!
//! This is the integration point for a host indexing pipeline: it holds one
//! configuration snapshot and hands out a fresh [`CjkBigramStream`] for every
//! character source the host wants tokenized.

use std::io::BufRead;
use std::path::Path;

use log::debug;

use super::cjk_bigram::{CjkBigramStream, CjkBigramTokenizer};
use super::source::{CharSource, ReaderSource};
use crate::config::{TokenizerConfig, WordMode};

/// Factory for creating tokenizer streams.
///
/// # Example
///
/// ```
/// use kanabigram::analysis::tokenizer::factory::TokenizerFactory;
/// use kanabigram::config::WordMode;
///
/// # fn main() -> kanabigram::error::Result<()> {
/// let factory = TokenizerFactory::for_mode(WordMode::Word);
/// let mut stream = factory.create_for_reader("Cyber-Shot".as_bytes());
/// let tokens = stream.collect_tokens()?;
/// assert_eq!(tokens.len(), 3);
/// assert_eq!(stream.end_offset(), 10);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct TokenizerFactory {
    config: TokenizerConfig,
}

impl TokenizerFactory {
    pub fn new(config: TokenizerConfig) -> Self {
        TokenizerFactory { config }
    }

    /// Default settings in the given mode.
    pub fn for_mode(mode: WordMode) -> Self {
        Self::new(TokenizerConfig::default().with_mode(mode))
    }

    /// Load settings from a file. Missing or unreadable files fall back to
    /// the defaults.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let config = TokenizerConfig::load(path);
        debug!("tokenizer factory configured: {config:?}");
        Self::new(config)
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Create a stream over any character source.
    pub fn create<S: CharSource>(&self, source: S) -> CjkBigramStream<S> {
        CjkBigramStream::new(source, &self.config)
    }

    /// Create a stream decoding UTF-8 from a buffered reader.
    pub fn create_for_reader<R: BufRead>(&self, reader: R) -> CjkBigramStream<ReaderSource<R>> {
        self.create(ReaderSource::new(reader))
    }

    /// A `&str` tokenizer sharing this factory's settings.
    pub fn tokenizer(&self) -> CjkBigramTokenizer {
        CjkBigramTokenizer::new(self.config.clone())
    }
}

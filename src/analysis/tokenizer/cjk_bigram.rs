//! Bigram tokenizer for mixed Japanese/Latin text.
//!
//! [`CjkBigramStream`] is the pull-based scanner: it reads characters from a
//! [`CharSource`], dispatches double-width runs to the bigram scanner and
//! single-width runs to either the word/hyphen engine or, in
//! [`WordMode::Bigram`], to a second bigram scanner. [`CjkBigramTokenizer`]
//! wraps it behind the [`Tokenizer`] trait for `&str` input.
//!
//! # Examples
//!
//! ```
//! use kanabigram::analysis::tokenizer::Tokenizer;
//! use kanabigram::analysis::tokenizer::cjk_bigram::CjkBigramTokenizer;
//!
//! let tokenizer = CjkBigramTokenizer::default();
//! let tokens: Vec<_> = tokenizer
//!     .tokenize("Cyber-Shotの新型")
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//! assert_eq!(tokens, vec!["cyber", "shot", "cybershot", "の新", "新型"]);
//! ```

use log::{debug, trace};

use super::Tokenizer;
use super::bigram::{BigramScanner, BigramStep};
use super::classifier::{CharClass, Classifier};
use super::hyphen::{HyphenChain, scan_word};
use super::sign::SignTable;
use super::source::{CharSource, Cursor, IterSource};
use crate::analysis::token::{IntoTokenStream, Token, TokenKind, TokenStream};
use crate::config::{TokenizerConfig, WordMode};
use crate::error::{KanabigramError, Result};

/// Bridge set for single-width runs in [`WordMode::Bigram`].
const SINGLE_BRIDGE: &str = "-";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
    Active,
    Exhausted,
    Poisoned,
}

/// Streaming tokenizer over a character source.
///
/// Tokens come out of [`CjkBigramStream::next_token`] one at a time in a
/// deterministic order. `Ok(None)` marks the end of the stream and keeps
/// being returned on later calls. A read error from the source is returned
/// once; afterwards the stream refuses to continue until
/// [`CjkBigramStream::reset`] is called.
#[derive(Debug)]
pub struct CjkBigramStream<S> {
    cursor: Cursor<S>,
    classifier: Classifier,
    double: BigramScanner,
    /// Present in [`WordMode::Bigram`] only.
    single: Option<BigramScanner>,
    chain: HyphenChain,
    /// The last token was a 2-gram whose tail is waiting in the cursor.
    tail_pending: bool,
    emitted: usize,
    status: Status,
}

impl<S: CharSource> CjkBigramStream<S> {
    /// Create a stream over `source`. The settings of `config` are copied.
    pub fn new(source: S, config: &TokenizerConfig) -> Self {
        let classifier = Classifier::new(
            SignTable::new(&config.allowed_sign),
            config.capitalize_kana,
        );
        let bridges = SignTable::new(&config.concat_char);
        let (double, single) = match config.mode {
            WordMode::Word => (
                BigramScanner::new(CharClass::Double, bridges, TokenKind::Bigram),
                None,
            ),
            WordMode::Bigram => (
                BigramScanner::new(CharClass::Double, bridges, TokenKind::BigramDouble),
                Some(BigramScanner::new(
                    CharClass::Single,
                    SignTable::new(SINGLE_BRIDGE),
                    TokenKind::BigramSingle,
                )),
            ),
        };

        CjkBigramStream {
            cursor: Cursor::new(source),
            classifier,
            double,
            single,
            chain: HyphenChain::new(),
            tail_pending: false,
            emitted: 0,
            status: Status::Active,
        }
    }

    /// The word mode this stream was built with.
    pub fn mode(&self) -> WordMode {
        if self.single.is_some() {
            WordMode::Bigram
        } else {
            WordMode::Word
        }
    }

    /// Start over on a new source, dropping all scanning state.
    pub fn reset(&mut self, source: S) {
        self.cursor = Cursor::new(source);
        self.chain.reset();
        self.tail_pending = false;
        self.emitted = 0;
        self.status = Status::Active;
        debug!("tokenizer reset");
    }

    /// Number of source characters consumed so far.
    ///
    /// Once the stream is exhausted this is the length of the input.
    pub fn end_offset(&self) -> usize {
        self.cursor.position()
    }

    /// Produce the next token, `Ok(None)` at end of stream.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        match self.status {
            Status::Poisoned => {
                return Err(KanabigramError::analysis(
                    "tokenizer must be reset after a read error",
                ));
            }
            Status::Exhausted => return Ok(None),
            Status::Active => {}
        }

        match self.advance() {
            Ok(Some(token)) => {
                let token = token.with_position(self.emitted);
                self.emitted += 1;
                trace!(
                    "{} {:?} [{}, {})",
                    token.kind, token.text, token.start_offset, token.end_offset
                );
                Ok(Some(token))
            }
            Ok(None) => {
                self.status = Status::Exhausted;
                debug!(
                    "end of stream after {} tokens at offset {}",
                    self.emitted,
                    self.end_offset()
                );
                Ok(None)
            }
            Err(e) => {
                self.status = Status::Poisoned;
                Err(e)
            }
        }
    }

    /// Collect every remaining token.
    pub fn collect_tokens(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn advance(&mut self) -> Result<Option<Token>> {
        if let Some(joined) = self.chain.pop_joined() {
            return Ok(Some(joined));
        }

        let mut covered = std::mem::take(&mut self.tail_pending);
        loop {
            let Some(c) = self.classifier.classify(&mut self.cursor)? else {
                self.chain.interrupt();
                return Ok(self.chain.pop_joined());
            };

            match c.class {
                CharClass::Symbol => {
                    if self.chain.interrupt() {
                        return Ok(self.chain.pop_joined());
                    }
                }
                CharClass::Double => {
                    if self.chain.interrupt() {
                        self.cursor.unread(c.unit());
                        return Ok(self.chain.pop_joined());
                    }
                    let step = self
                        .double
                        .scan(c, covered, &self.classifier, &mut self.cursor)?;
                    if let Some(token) = self.take_step(step) {
                        return Ok(Some(token));
                    }
                }
                CharClass::Single => {
                    if let Some(single) = &self.single {
                        let step = single.scan(c, covered, &self.classifier, &mut self.cursor)?;
                        if let Some(token) = self.take_step(step) {
                            return Ok(Some(token));
                        }
                    } else {
                        self.chain.begin_run();
                        let run = scan_word(c, &self.classifier, &mut self.cursor)?;
                        self.chain.end_run(&run);
                        return Ok(Some(run.to_token()));
                    }
                }
            }
            covered = false;
        }
    }

    fn take_step(&mut self, step: BigramStep) -> Option<Token> {
        match step {
            BigramStep::Pair(token) => {
                self.tail_pending = true;
                Some(token)
            }
            BigramStep::Lone(token) => Some(token),
            BigramStep::Covered => None,
        }
    }
}

/// Yields `Ok(token)` until the end of the stream. A read error is yielded
/// once and ends the iteration.
impl<S: CharSource> Iterator for CjkBigramStream<S> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.status == Status::Poisoned {
            return None;
        }
        self.next_token().transpose()
    }
}

/// [`Tokenizer`] over `&str` input using a fixed configuration.
#[derive(Clone, Debug, Default)]
pub struct CjkBigramTokenizer {
    config: TokenizerConfig,
}

impl CjkBigramTokenizer {
    pub fn new(config: TokenizerConfig) -> Self {
        CjkBigramTokenizer { config }
    }

    /// Tokenizer with the default settings in the given mode.
    pub fn with_mode(mode: WordMode) -> Self {
        Self::new(TokenizerConfig::default().with_mode(mode))
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Open a stream over any character source with this configuration.
    pub fn stream<S: CharSource>(&self, source: S) -> CjkBigramStream<S> {
        CjkBigramStream::new(source, &self.config)
    }
}

impl Tokenizer for CjkBigramTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens = self.stream(IterSource::from(text)).collect_tokens()?;
        Ok(tokens.into_token_stream())
    }

    fn name(&self) -> &'static str {
        match self.config.mode {
            WordMode::Word => "cjk_bigram",
            WordMode::Bigram => "cjk_bigram_ng",
        }
    }
}

//! Token types produced by the tokenizers.
//!
//! # Core Types
//!
//! - [`Token`] - A single emitted token with text, offsets and kind
//! - [`TokenKind`] - Which scanner produced the token
//! - [`TokenStream`] - Type alias for boxed iterator of tokens
//!
//! Offsets count source characters (Unicode scalar values), not bytes.
//! A token's `end_offset` may exceed `start_offset + text.chars().count()`
//! when a bridge character, a hyphen or a combined half-width kana mark is
//! spanned without appearing in the text.
//!
//! # Examples
//!
//! ```
//! use kanabigram::analysis::token::{Token, TokenKind};
//!
//! let token = Token::new("だひ", 0, 3, TokenKind::Bigram);
//! assert_eq!(token.text, "だひ");
//! assert_eq!(token.start_offset, 0);
//! assert_eq!(token.end_offset, 3);
//! assert_eq!(token.kind.as_str(), "BIGRAM");
//! ```

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A token represents a single unit of text after tokenization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The normalized text content of the token
    pub text: String,

    /// The position of the token in the emitted stream (0-based)
    pub position: usize,

    /// Character offset where this token starts in the source
    pub start_offset: usize,

    /// Character offset just past the last source character this token spans
    pub end_offset: usize,

    /// Which scanner produced the token
    pub kind: TokenKind,
}

/// Token kind, mirroring the type names a host indexing pipeline sees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    /// Whole Latin/digit run (word mode)
    Word,
    /// 2-gram (or trailing singleton) over a double-width run (word mode)
    Bigram,
    /// Hyphen-free concatenation of runs from one hyphen chain
    Joined,
    /// 2-gram over a single-width run (bigram mode)
    BigramSingle,
    /// 2-gram over a double-width run (bigram mode)
    BigramDouble,
}

impl TokenKind {
    /// The type name reported to hosts.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Word => "WORD",
            TokenKind::Bigram => "BIGRAM",
            TokenKind::Joined => "JOINED",
            TokenKind::BigramSingle => "BIGRAM_SINGLE",
            TokenKind::BigramDouble => "BIGRAM_DOUBLE",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Token {
    /// Create a new token. The stream position is assigned by the scanner.
    pub fn new<S: Into<String>>(
        text: S,
        start_offset: usize,
        end_offset: usize,
        kind: TokenKind,
    ) -> Self {
        Token {
            text: text.into(),
            position: 0,
            start_offset,
            end_offset,
            kind,
        }
    }

    /// Set the stream position.
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    /// Number of characters in the token text.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of source characters the token spans.
    pub fn span(&self) -> usize {
        self.end_offset.saturating_sub(self.start_offset)
    }

    /// Translate the character offsets into a byte range of `source`.
    ///
    /// Returns `None` when the offsets do not fit `source`, e.g. when the
    /// token came from a different text.
    pub fn byte_range_in(&self, source: &str) -> Option<Range<usize>> {
        let mut start = None;
        for (index, (byte, _)) in source.char_indices().enumerate() {
            if index == self.start_offset {
                start = Some(byte);
            }
            if index == self.end_offset {
                return start.map(|s| s..byte);
            }
        }
        let total = source.chars().count();
        if self.end_offset == total {
            let start = if self.start_offset == total {
                source.len()
            } else {
                start?
            };
            return Some(start..source.len());
        }
        None
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Trait for types that can produce a token stream.
pub trait IntoTokenStream {
    /// Convert this type into a token stream.
    fn into_token_stream(self) -> TokenStream;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream(self) -> TokenStream {
        Box::new(self.into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("cyber", 0, 5, TokenKind::Word);
        assert_eq!(token.text, "cyber");
        assert_eq!(token.position, 0);
        assert_eq!(token.start_offset, 0);
        assert_eq!(token.end_offset, 5);
        assert_eq!(token.kind, TokenKind::Word);
    }

    #[test]
    fn test_token_span_exceeds_text() {
        let token = Token::new("ab", 0, 3, TokenKind::Joined).with_position(4);
        assert_eq!(token.position, 4);
        assert_eq!(token.len(), 2);
        assert_eq!(token.span(), 3);

        let reversed = Token::new("x", 5, 3, TokenKind::Word);
        assert_eq!(reversed.span(), 0);
        assert_eq!(reversed.byte_range_in("abcdef"), None);
    }

    #[test]
    fn test_byte_range_in() {
        let source = "楽々ERD";
        let token = Token::new("erd", 2, 5, TokenKind::Word);
        assert_eq!(token.byte_range_in(source), Some(6..9));
        assert_eq!(&source[6..9], "ERD");

        let token = Token::new("楽々", 0, 2, TokenKind::Bigram);
        assert_eq!(token.byte_range_in(source), Some(0..6));

        let token = Token::new("x", 4, 9, TokenKind::Word);
        assert_eq!(token.byte_range_in(source), None);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(TokenKind::BigramSingle.as_str(), "BIGRAM_SINGLE");
        assert_eq!(TokenKind::Joined.to_string(), "JOINED");
        let json = serde_json::to_string(&TokenKind::BigramDouble).unwrap();
        assert_eq!(json, "\"BIGRAM_DOUBLE\"");
    }

    #[test]
    fn test_token_display() {
        let token = Token::new("hello", 0, 5, TokenKind::Word);
        assert_eq!(format!("{token}"), "hello");
    }

    #[test]
    fn test_token_stream() {
        let tokens = vec![
            Token::new("a", 0, 1, TokenKind::Word),
            Token::new("b", 2, 3, TokenKind::Word),
        ];

        let collected: Vec<_> = tokens.into_token_stream().collect();

        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].text, "a");
        assert_eq!(collected[1].text, "b");
    }
}

//! Overlapping 2-gram scanning over runs of one character class.
//!
//! The scanner is handed the opening character of a run and pulls at most
//! a few more characters from the cursor:
//!
//! - another character of the same class completes a 2-gram; that second
//!   character is pushed back so it opens the next window,
//! - a single bridge character is stepped over (`だ☆ひ` → `だひ` spanning
//!   offsets 0..3), a second consecutive one cancels the bridge,
//! - anything else ends the run. The opening character is then emitted on
//!   its own unless it was already the tail of the previous 2-gram.

use super::classifier::{CharClass, Classified, Classifier};
use super::sign::SignTable;
use super::source::{CharSource, Cursor};
use crate::analysis::token::{Token, TokenKind};
use crate::error::Result;

/// Result of scanning from one opening character.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum BigramStep {
    /// A 2-gram; its second character has been pushed back.
    Pair(Token),
    /// The opening character alone.
    Lone(Token),
    /// Nothing to emit; the opening character was already covered.
    Covered,
}

/// Emits overlapping 2-grams for one character class.
#[derive(Clone, Debug)]
pub(crate) struct BigramScanner {
    class: CharClass,
    bridges: SignTable,
    kind: TokenKind,
}

impl BigramScanner {
    pub fn new(class: CharClass, bridges: SignTable, kind: TokenKind) -> Self {
        BigramScanner {
            class,
            bridges,
            kind,
        }
    }

    /// The class of runs this scanner handles.
    pub fn class(&self) -> CharClass {
        self.class
    }

    /// Scan forward from `first`, the opening character of a run.
    ///
    /// `covered` tells whether `first` is the pushed-back tail of the
    /// 2-gram emitted just before.
    pub fn scan<S: CharSource>(
        &self,
        first: Classified,
        covered: bool,
        classifier: &Classifier,
        cursor: &mut Cursor<S>,
    ) -> Result<BigramStep> {
        debug_assert_eq!(first.class, self.class);
        let mut bridged = false;

        loop {
            let Some(next) = classifier.classify(cursor)? else {
                break;
            };
            if next.class == self.class {
                cursor.unread(next.unit());
                let text: String = [first.value, next.value].iter().collect();
                return Ok(BigramStep::Pair(Token::new(
                    text,
                    first.start,
                    next.end(),
                    self.kind,
                )));
            }
            if next.class != CharClass::Symbol {
                // Runs of different classes never combine.
                cursor.unread(next.unit());
                break;
            }
            if !self.bridges.contains(next.value) || bridged {
                break;
            }
            bridged = true;
        }

        if covered {
            Ok(BigramStep::Covered)
        } else {
            Ok(BigramStep::Lone(Token::new(
                first.value.to_string(),
                first.start,
                first.end(),
                self.kind,
            )))
        }
    }
}

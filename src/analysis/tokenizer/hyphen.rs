//! Whole-word scanning and hyphen-chain joining.
//!
//! Single-width runs are emitted as whole words. When runs are separated by
//! single hyphens, every contiguous sub-chain of two or more runs is also
//! emitted with the hyphens removed, so `Cyber-Shot` yields `cyber`, `shot`
//! and `cybershot`. Joined tokens are queued while the chain grows and are
//! handed out once it closes.

use std::collections::VecDeque;

use log::debug;

use super::classifier::{CharClass, Classified, Classifier};
use super::source::{CharSource, Cursor};
use crate::analysis::token::{Token, TokenKind};
use crate::error::Result;

/// Longest word emitted; longer runs are cut and continue as a new word.
pub const MAX_WORD_LEN: usize = 255;

/// Runs held by a chain before a trailing hyphen forces it closed.
pub const MAX_HYPHEN: usize = 5;

const HYPHEN: char = '-';

/// What ended a word run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Boundary {
    /// A `-`, consumed.
    Hyphen,
    /// A double-width character, pushed back.
    Double,
    /// Any other symbol (consumed) or end of input.
    Other,
    /// The run reached [`MAX_WORD_LEN`].
    Overflow,
}

/// One scanned word run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct WordRun {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub boundary: Boundary,
}

impl WordRun {
    pub fn to_token(&self) -> Token {
        Token::new(self.text.clone(), self.start, self.end, TokenKind::Word)
    }
}

/// Collect a run of single-width characters starting with `first`.
pub(crate) fn scan_word<S: CharSource>(
    first: Classified,
    classifier: &Classifier,
    cursor: &mut Cursor<S>,
) -> Result<WordRun> {
    debug_assert_eq!(first.class, CharClass::Single);
    let mut text = String::new();
    text.push(first.value);
    let mut len = 1;
    let mut end = first.end();

    let boundary = loop {
        if len >= MAX_WORD_LEN {
            break Boundary::Overflow;
        }
        match classifier.classify(cursor)? {
            Some(next) if next.class == CharClass::Single => {
                text.push(next.value);
                len += 1;
                end = next.end();
            }
            Some(next) if next.class == CharClass::Double => {
                cursor.unread(next.unit());
                break Boundary::Double;
            }
            Some(next) if next.value == HYPHEN => break Boundary::Hyphen,
            _ => break Boundary::Other,
        }
    };

    Ok(WordRun {
        text,
        start: first.start,
        end,
        boundary,
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HyphenState {
    /// No chain.
    Normal,
    /// One run followed by a hyphen.
    NormalHyphen,
    /// Inside a run that continues a chain.
    Hyphen,
    /// Two or more runs, the last followed by a hyphen.
    HyphenHyphen,
    /// Chain closed; joined tokens are being handed out.
    Returning,
}

/// A joined prefix that later runs are appended to.
#[derive(Clone, Debug)]
struct Candidate {
    buffer: String,
    start: usize,
    end: usize,
}

/// Tracks a hyphen chain across word runs.
#[derive(Debug)]
pub(crate) struct HyphenChain {
    state: HyphenState,
    candidates: Vec<Candidate>,
    queue: VecDeque<Token>,
}

impl Default for HyphenChain {
    fn default() -> Self {
        HyphenChain::new()
    }
}

impl HyphenChain {
    pub fn new() -> Self {
        HyphenChain {
            state: HyphenState::Normal,
            candidates: Vec::with_capacity(MAX_HYPHEN + 1),
            queue: VecDeque::new(),
        }
    }

    /// Drop all chain state.
    pub fn reset(&mut self) {
        self.state = HyphenState::Normal;
        self.candidates.clear();
        self.queue.clear();
    }

    /// Hand out the next joined token of a closed chain.
    pub fn pop_joined(&mut self) -> Option<Token> {
        if self.state != HyphenState::Returning {
            return None;
        }
        let token = self.queue.pop_front();
        if self.queue.is_empty() {
            self.state = HyphenState::Normal;
        }
        token
    }

    /// A word run is about to be scanned.
    pub fn begin_run(&mut self) {
        if matches!(
            self.state,
            HyphenState::NormalHyphen | HyphenState::HyphenHyphen
        ) {
            self.state = HyphenState::Hyphen;
        }
    }

    /// A word run has been scanned.
    pub fn end_run(&mut self, run: &WordRun) {
        match run.boundary {
            Boundary::Hyphen if self.candidates.len() >= MAX_HYPHEN => {
                self.join(run);
                self.close();
            }
            Boundary::Hyphen => {
                self.join(run);
                self.state = match self.state {
                    HyphenState::Hyphen => HyphenState::HyphenHyphen,
                    _ => HyphenState::NormalHyphen,
                };
            }
            Boundary::Double | Boundary::Other | Boundary::Overflow => {
                if self.candidates.is_empty() {
                    self.reset();
                } else {
                    self.join(run);
                    self.close();
                }
            }
        }
    }

    /// A non-word character was read outside any run: a doubled hyphen,
    /// another symbol, a double-width character or end of input.
    ///
    /// Returns true when this closed a chain with joined tokens pending.
    pub fn interrupt(&mut self) -> bool {
        match self.state {
            HyphenState::HyphenHyphen => {
                self.close();
                self.state == HyphenState::Returning
            }
            HyphenState::NormalHyphen => {
                self.reset();
                false
            }
            _ => false,
        }
    }

    fn join(&mut self, run: &WordRun) {
        for candidate in &mut self.candidates {
            candidate.buffer.push_str(&run.text);
            candidate.end = run.end;
            self.queue.push_back(Token::new(
                candidate.buffer.clone(),
                candidate.start,
                candidate.end,
                TokenKind::Joined,
            ));
        }
        self.candidates.push(Candidate {
            buffer: run.text.clone(),
            start: run.start,
            end: run.end,
        });
    }

    fn close(&mut self) {
        debug!(
            "closing hyphen chain of {} runs with {} joined tokens",
            self.candidates.len(),
            self.queue.len()
        );
        self.candidates.clear();
        self.state = if self.queue.is_empty() {
            HyphenState::Normal
        } else {
            HyphenState::Returning
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tokenizer::sign::SignTable;
    use crate::analysis::tokenizer::source::IterSource;

    fn run(text: &str, start: usize, boundary: Boundary) -> WordRun {
        WordRun {
            text: text.to_string(),
            start,
            end: start + text.chars().count(),
            boundary,
        }
    }

    fn drain(chain: &mut HyphenChain) -> Vec<(String, usize, usize)> {
        std::iter::from_fn(|| chain.pop_joined())
            .map(|t| (t.text, t.start_offset, t.end_offset))
            .collect()
    }

    #[test]
    fn test_scan_word_boundaries() {
        let classifier = Classifier::default();
        let mut cursor = Cursor::new(IterSource::from("Cyber-Shot"));
        let first = classifier.classify(&mut cursor).unwrap().unwrap();
        let word = scan_word(first, &classifier, &mut cursor).unwrap();
        assert_eq!(word, run("cyber", 0, Boundary::Hyphen));
        assert_eq!(cursor.position(), 6);

        let mut cursor = Cursor::new(IterSource::from("m052互換"));
        let first = classifier.classify(&mut cursor).unwrap().unwrap();
        let word = scan_word(first, &classifier, &mut cursor).unwrap();
        assert_eq!(word, run("m052", 0, Boundary::Double));
        assert_eq!(cursor.position(), 4);

        let mut cursor = Cursor::new(IterSource::from("ab cd"));
        let first = classifier.classify(&mut cursor).unwrap().unwrap();
        let word = scan_word(first, &classifier, &mut cursor).unwrap();
        assert_eq!(word.boundary, Boundary::Other);
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn test_scan_word_overflow() {
        let classifier = Classifier::new(SignTable::empty(), true);
        let text = "9".repeat(MAX_WORD_LEN + 3);
        let mut cursor = Cursor::new(IterSource::from(text.as_str()));
        let first = classifier.classify(&mut cursor).unwrap().unwrap();
        let word = scan_word(first, &classifier, &mut cursor).unwrap();
        assert_eq!(word.boundary, Boundary::Overflow);
        assert_eq!(word.text.len(), MAX_WORD_LEN);
        assert_eq!(word.end, MAX_WORD_LEN);
        assert_eq!(cursor.position(), MAX_WORD_LEN);
    }

    #[test]
    fn test_chain_of_three() {
        let mut chain = HyphenChain::new();
        chain.begin_run();
        chain.end_run(&run("a", 0, Boundary::Hyphen));
        assert!(chain.pop_joined().is_none());

        chain.begin_run();
        chain.end_run(&run("b", 2, Boundary::Hyphen));
        assert!(chain.pop_joined().is_none());

        chain.begin_run();
        chain.end_run(&run("c", 4, Boundary::Other));
        assert_eq!(
            drain(&mut chain),
            vec![
                ("ab".to_string(), 0, 3),
                ("abc".to_string(), 0, 5),
                ("bc".to_string(), 2, 5),
            ]
        );
        assert_eq!(chain.state, HyphenState::Normal);
    }

    #[test]
    fn test_double_hyphen_closes_chain() {
        let mut chain = HyphenChain::new();
        chain.begin_run();
        chain.end_run(&run("1", 0, Boundary::Hyphen));
        chain.begin_run();
        chain.end_run(&run("2", 2, Boundary::Hyphen));
        assert!(chain.interrupt());
        assert_eq!(drain(&mut chain), vec![("12".to_string(), 0, 3)]);
    }

    #[test]
    fn test_double_hyphen_after_one_run_resets() {
        let mut chain = HyphenChain::new();
        chain.begin_run();
        chain.end_run(&run("1", 0, Boundary::Hyphen));
        assert!(!chain.interrupt());
        assert_eq!(chain.state, HyphenState::Normal);
        assert!(chain.candidates.is_empty());
    }

    #[test]
    fn test_cap_closes_after_six_runs() {
        let mut chain = HyphenChain::new();
        for (i, text) in ["a", "b", "c", "d", "e", "f"].iter().enumerate() {
            chain.begin_run();
            chain.end_run(&run(text, i * 2, Boundary::Hyphen));
        }
        let joined = drain(&mut chain);
        assert_eq!(joined.len(), 15);
        assert_eq!(joined.first(), Some(&("ab".to_string(), 0, 3)));
        assert_eq!(joined.last(), Some(&("ef".to_string(), 8, 11)));
        assert_eq!(chain.state, HyphenState::Normal);
    }

    #[test]
    fn test_lone_run_emits_nothing_joined() {
        let mut chain = HyphenChain::new();
        chain.begin_run();
        chain.end_run(&run("abc", 0, Boundary::Double));
        assert!(chain.pop_joined().is_none());
        assert!(!chain.interrupt());
    }

    #[test]
    fn test_reset_clears_pending() {
        let mut chain = HyphenChain::new();
        chain.begin_run();
        chain.end_run(&run("a", 0, Boundary::Hyphen));
        chain.begin_run();
        chain.end_run(&run("b", 2, Boundary::Other));
        chain.reset();
        assert!(chain.pop_joined().is_none());
        assert!(chain.queue.is_empty());
    }
}

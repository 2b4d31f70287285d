//! Configuration for the tokenizers.
//!
//! A [`TokenizerConfig`] is an immutable snapshot: the tokenizer copies what
//! it needs at construction, so editing a config afterwards never changes a
//! tokenizer that is already running.
//!
//! Settings come either from a properties file (the `key=value` format the
//! tokenizer has always been configured with) or from JSON. A missing or
//! unreadable file is not an error for [`TokenizerConfig::load`]; it falls
//! back to the defaults and logs a warning.
//!
//! # Example
//!
//! ```
//! use kanabigram::config::{TokenizerConfig, WordMode};
//!
//! let config = TokenizerConfig::from_properties_str(
//!     "allowed_sign=()+_#\ncapitalize_kana=false\n",
//! );
//! assert_eq!(config.allowed_sign, "()+_#");
//! assert!(!config.capitalize_kana);
//! assert_eq!(config.concat_char, "・＝=☆★･");
//! assert_eq!(config.mode, WordMode::Word);
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{KanabigramError, Result};

/// Default extra punctuation treated as part of Latin words.
pub const DEFAULT_ALLOWED_SIGN: &str = "+_#";

/// Default characters that may splice two double-width runs.
pub const DEFAULT_CONCAT_CHAR: &str = "・＝=☆★･";

/// How single-width (Latin/digit) runs are tokenized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordMode {
    /// Whole words, plus hyphen-free joins of hyphen chains.
    #[default]
    Word,
    /// Everything is bigrammed; `-` bridges single-width runs.
    Bigram,
}

impl FromStr for WordMode {
    type Err = KanabigramError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "word" => Ok(WordMode::Word),
            "bigram" | "ng" => Ok(WordMode::Bigram),
            other => Err(KanabigramError::config(format!(
                "unknown word mode '{other}' (expected 'word' or 'bigram')"
            ))),
        }
    }
}

/// Tokenizer settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Extra punctuation treated as single-width word characters.
    pub allowed_sign: String,

    /// Fold small kana (ぁ, ャ, ッ, ...) to their plain forms.
    pub capitalize_kana: bool,

    /// Bridge characters that splice two double-width runs.
    pub concat_char: String,

    /// Word handling mode.
    pub mode: WordMode,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        TokenizerConfig {
            allowed_sign: DEFAULT_ALLOWED_SIGN.to_string(),
            capitalize_kana: true,
            concat_char: DEFAULT_CONCAT_CHAR.to_string(),
            mode: WordMode::Word,
        }
    }
}

impl TokenizerConfig {
    /// Set the allowed sign characters.
    pub fn with_allowed_sign<S: Into<String>>(mut self, allowed_sign: S) -> Self {
        self.allowed_sign = allowed_sign.into();
        self
    }

    /// Enable or disable small-kana folding.
    pub fn with_capitalize_kana(mut self, capitalize_kana: bool) -> Self {
        self.capitalize_kana = capitalize_kana;
        self
    }

    /// Set the bridge characters.
    pub fn with_concat_char<S: Into<String>>(mut self, concat_char: S) -> Self {
        self.concat_char = concat_char.into();
        self
    }

    /// Set the word mode.
    pub fn with_mode(mut self, mode: WordMode) -> Self {
        self.mode = mode;
        self
    }

    /// Parse properties text. Unknown keys are ignored and bad values keep
    /// the default.
    ///
    /// `capitalize_kana` is on only for the literal value `true`.
    pub fn from_properties_str(text: &str) -> Self {
        let mut config = TokenizerConfig::default();
        for (key, value) in parse_properties(text) {
            match key.as_str() {
                "allowed_sign" => config.allowed_sign = value,
                "capitalize_kana" => config.capitalize_kana = value == "true",
                "concat_char" => config.concat_char = value,
                "mode" => match value.parse() {
                    Ok(mode) => config.mode = mode,
                    Err(e) => warn!("ignoring mode setting: {e}"),
                },
                _ => {}
            }
        }
        config
    }

    /// Parse JSON text; absent fields keep their defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load from a file, returning any error to the caller.
    ///
    /// Files ending in `.json` are read as JSON, anything else as properties.
    pub fn try_load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Ok(Self::from_properties_str(&text))
        }
    }

    /// Load from a file, falling back to the defaults on any failure.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "failed to load tokenizer config from {}: {e}; using defaults",
                    path.display()
                );
                TokenizerConfig::default()
            }
        }
    }
}

/// Split properties text into `(key, value)` pairs.
///
/// Supports `=`, `:` or whitespace separators, `#`/`!` comments, line
/// continuations and the usual backslash escapes including `\uXXXX`.
fn parse_properties(text: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut logical = String::new();

    for raw in text.lines() {
        let line = raw.trim_start();
        if logical.is_empty()
            && (line.is_empty() || line.starts_with('#') || line.starts_with('!'))
        {
            continue;
        }
        if ends_with_continuation(line) {
            logical.push_str(&line[..line.len() - 1]);
            continue;
        }
        logical.push_str(line);
        if let Some(pair) = split_pair(&logical) {
            pairs.push(pair);
        }
        logical.clear();
    }
    if !logical.is_empty() {
        if let Some(pair) = split_pair(&logical) {
            pairs.push(pair);
        }
    }
    pairs
}

/// A line continues when it ends with an odd number of backslashes.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_pair(line: &str) -> Option<(String, String)> {
    let mut key_end = line.len();
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }
    let key = unescape(&line[..key_end]);
    if key.is_empty() {
        return None;
    }

    let mut rest = line[key_end..].trim_start_matches([' ', '\t']);
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start_matches([' ', '\t']);
    }
    Some((key, unescape(rest)))
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        warn!("malformed \\u escape '\\u{hex}' in properties");
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn temp_file(suffix: &str) -> tempfile::NamedTempFile {
        tempfile::Builder::new().suffix(suffix).tempfile().unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = TokenizerConfig::default();
        assert_eq!(config.allowed_sign, "+_#");
        assert!(config.capitalize_kana);
        assert_eq!(config.concat_char, "・＝=☆★･");
        assert_eq!(config.mode, WordMode::Word);
    }

    #[test]
    fn test_properties_parsing() {
        let text = "# tokenizer settings\n\
                    ! another comment\n\
                    allowed_sign = ()+_#\n\
                    capitalize_kana: false\n\
                    concat_char=\\u2606\\u2605\n\
                    mode bigram\n\
                    unknown_key=whatever\n";
        let config = TokenizerConfig::from_properties_str(text);
        assert_eq!(config.allowed_sign, "()+_#");
        assert!(!config.capitalize_kana);
        assert_eq!(config.concat_char, "☆★");
        assert_eq!(config.mode, WordMode::Bigram);
    }

    #[test]
    fn test_properties_non_literal_true_disables_folding() {
        let config = TokenizerConfig::from_properties_str("capitalize_kana=TRUE");
        assert!(!config.capitalize_kana);
        let config = TokenizerConfig::from_properties_str("capitalize_kana=true");
        assert!(config.capitalize_kana);
    }

    #[test]
    fn test_properties_continuation_and_bad_mode() {
        let text = "allowed_sign=+\\\n    _#\nmode=trigram\n";
        let config = TokenizerConfig::from_properties_str(text);
        assert_eq!(config.allowed_sign, "+_#");
        assert_eq!(config.mode, WordMode::Word);
    }

    #[test]
    fn test_json_parsing_with_defaults() {
        let json = r#"{"capitalize_kana": false, "mode": "bigram"}"#;
        let config = TokenizerConfig::from_json_str(json).unwrap();
        assert!(!config.capitalize_kana);
        assert_eq!(config.mode, WordMode::Bigram);
        assert_eq!(config.allowed_sign, DEFAULT_ALLOWED_SIGN);

        assert!(TokenizerConfig::from_json_str("{not json").is_err());
    }

    #[test]
    fn test_load_from_files() {
        let mut file = temp_file(".properties");
        writeln!(file, "concat_char=・").unwrap();
        let config = TokenizerConfig::load(file.path());
        assert_eq!(config.concat_char, "・");

        let mut file = temp_file(".json");
        write!(file, r#"{{"allowed_sign": "-"}}"#).unwrap();
        let config = TokenizerConfig::try_load(file.path()).unwrap();
        assert_eq!(config.allowed_sign, "-");
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.properties");
        assert!(TokenizerConfig::try_load(&path).is_err());
        assert_eq!(TokenizerConfig::load(&path), TokenizerConfig::default());
    }

    #[test]
    fn test_word_mode_from_str() {
        assert_eq!("Word".parse::<WordMode>().unwrap(), WordMode::Word);
        assert_eq!("bigram".parse::<WordMode>().unwrap(), WordMode::Bigram);
        assert!("other".parse::<WordMode>().is_err());
    }
}

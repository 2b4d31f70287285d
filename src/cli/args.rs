//! Command line argument parsing for the kanabigram CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{TokenizerConfig, WordMode};
use crate::error::Result;

/// Kanabigram - bigram tokenizer for mixed Japanese/Latin search text
#[derive(Parser, Debug, Clone)]
#[command(name = "kanabigram")]
#[command(about = "Tokenize mixed Japanese/Latin text into bigrams and words")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct KanabigramArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug, 4=trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl KanabigramArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Tokenize text from an argument, a file or stdin
    Tokenize(TokenizeArgs),

    /// Show the effective tokenizer configuration
    Config(ConfigArgs),
}

/// Settings shared by every command that builds a tokenizer.
#[derive(Parser, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Configuration file (.json, anything else is read as properties)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Word handling mode
    #[arg(short, long)]
    pub mode: Option<ModeArg>,

    /// Extra punctuation kept inside Latin words
    #[arg(long, value_name = "CHARS")]
    pub allowed_sign: Option<String>,

    /// Bridge characters between double-width runs
    #[arg(long, value_name = "CHARS")]
    pub concat_char: Option<String>,

    /// Keep small kana as they are
    #[arg(long)]
    pub no_capitalize_kana: bool,
}

impl ConfigArgs {
    /// Load the configuration file, if any, and apply the overrides.
    ///
    /// Unlike the library loader, a config file named on the command line
    /// must be readable.
    pub fn resolve(&self) -> Result<TokenizerConfig> {
        let mut config = match &self.config {
            Some(path) => TokenizerConfig::try_load(path)?,
            None => TokenizerConfig::default(),
        };
        if let Some(mode) = self.mode {
            config = config.with_mode(mode.into());
        }
        if let Some(allowed_sign) = &self.allowed_sign {
            config = config.with_allowed_sign(allowed_sign.as_str());
        }
        if let Some(concat_char) = &self.concat_char {
            config = config.with_concat_char(concat_char.as_str());
        }
        if self.no_capitalize_kana {
            config = config.with_capitalize_kana(false);
        }
        Ok(config)
    }
}

/// Arguments for tokenizing
#[derive(Parser, Debug, Clone)]
pub struct TokenizeArgs {
    /// Text to tokenize (reads stdin when neither TEXT nor --file is given)
    #[arg(value_name = "TEXT", conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub settings: ConfigArgs,
}

/// Word mode as given on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Whole words plus hyphen-free joins
    Word,
    /// Bigrams for every run
    Bigram,
}

impl From<ModeArg> for WordMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Word => WordMode::Word,
            ModeArg::Bigram => WordMode::Bigram,
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

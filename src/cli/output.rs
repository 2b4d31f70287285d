//! Output formatting for CLI commands.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::cli::args::{KanabigramArgs, OutputFormat};
use crate::config::{TokenizerConfig, WordMode};
use crate::error::Result;

/// Result structure for the tokenize command.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenizeResult {
    pub mode: WordMode,
    pub tokens: Vec<Token>,
    pub end_offset: usize,
}

/// Result structure for the config command.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigResult {
    pub source: Option<String>,
    pub config: TokenizerConfig,
}

/// Results that know how to print themselves for people.
pub trait HumanOutput {
    fn write_human<W: Write>(&self, out: &mut W) -> Result<()>;
}

impl HumanOutput for TokenizeResult {
    fn write_human<W: Write>(&self, out: &mut W) -> Result<()> {
        let width = self
            .tokens
            .iter()
            .map(|t| t.len())
            .max()
            .unwrap_or(0)
            .max("TEXT".len());

        writeln!(
            out,
            "{:>4}  {:<width$}  {:>5}  {:>5}  KIND",
            "POS", "TEXT", "START", "END"
        )?;
        for token in &self.tokens {
            writeln!(
                out,
                "{:>4}  {:<width$}  {:>5}  {:>5}  {}",
                token.position, token.text, token.start_offset, token.end_offset, token.kind
            )?;
        }
        writeln!(out)?;
        let count = self.tokens.len();
        writeln!(out, "{count} tokens, end offset {}", self.end_offset)?;
        Ok(())
    }
}

impl HumanOutput for ConfigResult {
    fn write_human<W: Write>(&self, out: &mut W) -> Result<()> {
        match &self.source {
            Some(source) => writeln!(out, "source: {source}")?,
            None => writeln!(out, "source: (defaults)")?,
        }
        writeln!(out, "mode: {}", mode_name(self.config.mode))?;
        writeln!(out, "allowed_sign: {}", self.config.allowed_sign)?;
        writeln!(out, "capitalize_kana: {}", self.config.capitalize_kana)?;
        writeln!(out, "concat_char: {}", self.config.concat_char)?;
        Ok(())
    }
}

fn mode_name(mode: WordMode) -> &'static str {
    match mode {
        WordMode::Word => "word",
        WordMode::Bigram => "bigram",
    }
}

/// Output a result in the specified format.
pub fn output_result<T, W>(result: &T, args: &KanabigramArgs, out: &mut W) -> Result<()>
where
    T: Serialize + HumanOutput,
    W: Write,
{
    match args.output_format {
        OutputFormat::Human => result.write_human(out),
        OutputFormat::Json => output_json(result, args.pretty, out),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize, W: Write>(result: &T, pretty: bool, out: &mut W) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    writeln!(out, "{json}")?;
    Ok(())
}

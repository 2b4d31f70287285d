//! Command implementations for the kanabigram CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};

use anyhow::{Context, Result};
use log::info;

use crate::analysis::tokenizer::factory::TokenizerFactory;
use crate::analysis::tokenizer::source::{CharSource, IterSource, ReaderSource};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::TokenizerConfig;

/// Execute a CLI command.
pub fn execute_command(args: KanabigramArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &args.command {
        Command::Tokenize(tokenize_args) => tokenize(tokenize_args, &args, &mut out),
        Command::Config(config_args) => show_config(config_args, &args, &mut out),
    }
}

/// Tokenize the given text, file or stdin.
fn tokenize<W: Write>(args: &TokenizeArgs, cli_args: &KanabigramArgs, out: &mut W) -> Result<()> {
    let config = args
        .settings
        .resolve()
        .context("failed to resolve tokenizer configuration")?;
    let factory = TokenizerFactory::new(config);

    let result = match (&args.text, &args.file) {
        (Some(text), _) => run(&factory, IterSource::from(text.as_str()))?,
        (None, Some(path)) => {
            info!("Reading text from: {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            run(&factory, ReaderSource::new(BufReader::new(file)))
                .with_context(|| format!("failed to tokenize {}", path.display()))?
        }
        (None, None) => {
            info!("Reading text from stdin");
            let stdin = io::stdin();
            run(&factory, ReaderSource::new(stdin.lock()))
                .context("failed to tokenize stdin")?
        }
    };

    output_result(&result, cli_args, out)?;
    Ok(())
}

fn run<S: CharSource>(
    factory: &TokenizerFactory,
    source: S,
) -> crate::error::Result<TokenizeResult> {
    let mut stream = factory.create(source);
    let tokens = stream.collect_tokens()?;
    Ok(TokenizeResult {
        mode: stream.mode(),
        tokens,
        end_offset: stream.end_offset(),
    })
}

/// Show the effective configuration.
fn show_config<W: Write>(args: &ConfigArgs, cli_args: &KanabigramArgs, out: &mut W) -> Result<()> {
    let config: TokenizerConfig = args
        .resolve()
        .context("failed to resolve tokenizer configuration")?;
    let result = ConfigResult {
        source: args.config.as_ref().map(|p| p.display().to_string()),
        config,
    };
    output_result(&result, cli_args, out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use clap::Parser;

    use super::*;

    fn execute_to_string(argv: &[&str]) -> Result<String> {
        let args = KanabigramArgs::try_parse_from(argv)?;
        let mut out = Vec::new();
        match &args.command {
            Command::Tokenize(tokenize_args) => tokenize(tokenize_args, &args, &mut out)?,
            Command::Config(config_args) => show_config(config_args, &args, &mut out)?,
        }
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_tokenize_text_as_json() {
        let output = execute_to_string(&[
            "kanabigram",
            "-f",
            "json",
            "tokenize",
            "Cyber-Shot",
        ])
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        let texts: Vec<_> = value["tokens"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["text"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(texts, vec!["cyber", "shot", "cybershot"]);
        assert_eq!(value["end_offset"], 10);
    }

    #[test]
    fn test_tokenize_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "つのだ☆ひろ").unwrap();
        let path = file.path().to_str().unwrap();

        let output = execute_to_string(&[
            "kanabigram",
            "-f",
            "json",
            "tokenize",
            "--file",
            path,
            "--mode",
            "bigram",
        ])
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["mode"], "bigram");
        assert_eq!(value["tokens"].as_array().unwrap().len(), 4);
        assert_eq!(value["tokens"][2]["text"], "だひ");
        assert_eq!(value["tokens"][2]["kind"], "BIGRAM_DOUBLE");
    }

    #[test]
    fn test_tokenize_missing_file() {
        let err = execute_to_string(&["kanabigram", "tokenize", "--file", "/nonexistent/input"])
            .unwrap_err();
        assert!(err.to_string().contains("failed to open"));
    }

    #[test]
    fn test_config_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"concat_char": "☆"}}"#).unwrap();
        let path = file.path().to_str().unwrap();

        let output = execute_to_string(&[
            "kanabigram",
            "config",
            "--config",
            path,
            "--mode",
            "bigram",
        ])
        .unwrap();
        assert!(output.contains("concat_char: ☆"));
        assert!(output.contains("mode: bigram"));
    }
}

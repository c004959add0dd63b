//! The BLang command-line front end.
//!
//! `blang [options] [script]`
//!
//! - no script: interactive mode placeholder
//! - script: read the file, tokenize it, report lexical errors on stderr and
//!   print a token summary
//!
//! Options:
//! - `-h`, `--help` - Show usage
//! - `-v`, `--version` - Show version information
//! - `--tokens` - Print every token
//! - `--json` - Output tokens, diagnostics and the summary as JSON lines
//! - `--no-comments` - Drop comment tokens
//! - `--no-color` - Disable colorized diagnostics
//!
//! Logging is off unless `BLANG_LOG` (or `RUST_LOG`) holds a filter, e.g.
//! `BLANG_LOG=blang_lexer=trace`.

mod diagnostics;

use std::path::{Path, PathBuf};
use std::process;

use blang_lexer::{tokenize_with, LexerOptions};
use clap::{ArgAction, Parser};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use diagnostics::{render_lex_error, DiagnosticOptions};

#[derive(Parser)]
#[command(
    name = "blang",
    version,
    about = "BLang - Object-Oriented Programming Language",
    disable_version_flag = true
)]
struct Cli {
    /// Script file to tokenize
    script: Option<PathBuf>,

    /// Show version information
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,

    /// Print every token
    #[arg(long)]
    tokens: bool,

    /// Output tokens, diagnostics and the summary as JSON (one object per line)
    #[arg(long)]
    json: bool,

    /// Drop comment tokens from the output
    #[arg(long = "no-comments")]
    no_comments: bool,

    /// Disable colorized output
    #[arg(long = "no-color")]
    no_color: bool,
}

/// Settings for one script run, derived from the command line.
struct RunOptions {
    lexer: LexerOptions,
    diagnostics: DiagnosticOptions,
    print_tokens: bool,
}

/// Outcome of tokenizing one script.
#[derive(Debug, PartialEq, Eq)]
struct Summary {
    tokens: usize,
    errors: usize,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if !cli.json {
        println!("BLang - Object-Oriented Programming Language");
        println!("Version {}", env!("CARGO_PKG_VERSION"));
    }

    let Some(script) = cli.script else {
        println!("Interactive mode not implemented yet.");
        return;
    };

    let mut diagnostics = DiagnosticOptions::colorless();
    diagnostics.color = !cli.no_color && !cli.json;
    diagnostics.json = cli.json;

    let opts = RunOptions {
        lexer: LexerOptions {
            emit_comments: !cli.no_comments,
        },
        diagnostics,
        print_tokens: cli.tokens,
    };

    match run(&script, &opts) {
        Ok(summary) => {
            if cli.json {
                let msg = serde_json::json!({
                    "file": script.display().to_string(),
                    "tokens": summary.tokens,
                    "errors": summary.errors,
                });
                println!("{msg}");
            } else {
                println!(
                    "{}: {} tokens, {} errors",
                    script.display(),
                    summary.tokens,
                    summary.errors
                );
            }
        }
        Err(e) => {
            if cli.json {
                let msg = serde_json::json!({
                    "code": "C0001",
                    "severity": "error",
                    "message": e,
                    "file": script.display().to_string(),
                });
                eprintln!("{msg}");
            } else {
                eprintln!("error: {e}");
            }
            process::exit(1);
        }
    }
}

/// Read and tokenize one script, printing tokens and diagnostics as configured.
fn run(path: &Path, opts: &RunOptions) -> Result<Summary, String> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
    tracing::debug!(path = %path.display(), bytes = source.len(), "read script");

    let tokens = tokenize_with(&source, opts.lexer);

    if opts.print_tokens {
        for token in &tokens {
            if opts.diagnostics.json {
                let line = serde_json::to_string(token)
                    .map_err(|e| format!("Failed to serialize token: {e}"))?;
                println!("{line}");
            } else {
                println!("{token}");
            }
        }
    }

    let file_name = path.display().to_string();
    let mut errors = 0;
    for error in tokens.iter().filter_map(|t| t.error()) {
        errors += 1;
        eprint!(
            "{}",
            render_lex_error(&error, &source, &file_name, &opts.diagnostics)
        );
    }

    Ok(Summary {
        tokens: tokens.len(),
        errors,
    })
}

/// Install a stderr subscriber when a log filter is set in the environment.
fn init_tracing() {
    let filter = std::env::var("BLANG_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok();
    if let Some(filter) = filter {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::new(filter))
            .init();
    }
}

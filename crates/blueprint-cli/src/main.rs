//! `blueprint` CLI — verify, parse, and tokenize JSON from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Verify a data file against a schema
//! blueprint verify --schema schema.json --data payload.json
//!
//! # Verify stdin, reporting as JSON
//! cat payload.json | blueprint verify --schema schema.json --format json
//!
//! # Print the canonical rendering of a document
//! blueprint parse -i payload.json
//!
//! # Dump the token stream with byte offsets
//! echo '{"a": [1, true]}' | blueprint lex
//!
//! # Show debug logging from the validator
//! blueprint -vv verify --schema schema.json --data payload.json
//! ```

use std::io::{self, Read, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use blueprint_core::{Lexer, ParseOptions, TokenKind};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "blueprint",
    version,
    about = "Blueprint JSON schema verifier"
)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Maximum container nesting accepted when parsing
    #[arg(long, global = true, default_value_t = 512)]
    max_depth: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Verify a JSON document against a schema
    Verify {
        /// Schema file
        #[arg(short, long)]
        schema: String,
        /// Data file (reads from stdin if omitted)
        #[arg(short, long)]
        data: Option<String>,
        /// Report format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Parse JSON and print its canonical rendering
    Parse {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the token stream, one token per line
    Lex {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Machine-readable outcome of `blueprint verify --format json`.
#[derive(Serialize)]
struct Report {
    valid: bool,
    error: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let options = ParseOptions::new().with_max_depth(cli.max_depth);
    tracing::debug!(max_depth = cli.max_depth, "blueprint CLI starting");

    let result = match cli.command {
        Commands::Verify {
            schema,
            data,
            format,
        } => run_verify(&schema, data.as_deref(), format, &options),
        Commands::Parse { input, output } => {
            run_parse(input.as_deref(), output.as_deref(), &options)
        }
        Commands::Lex { input } => run_lex(input.as_deref()),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run_verify(
    schema_path: &str,
    data_path: Option<&str>,
    format: Format,
    options: &ParseOptions,
) -> Result<ExitCode> {
    let schema = read_input(Some(schema_path), "schema")?;
    let data = read_input(data_path, "data")?;

    let outcome = blueprint_core::verify_with_options(&schema, &data, options);
    if let Err(e) = &outcome {
        tracing::info!(schema = schema_path, "verification failed: {e}");
    }

    match format {
        Format::Text => match &outcome {
            Ok(()) => println!("valid"),
            Err(e) => println!("invalid: {e}"),
        },
        Format::Json => {
            let report = Report {
                valid: outcome.is_ok(),
                error: outcome.as_ref().err().map(ToString::to_string),
            };
            let json = serde_json::to_string(&report).context("Failed to serialize report")?;
            println!("{json}");
        }
    }

    Ok(if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_parse(input: Option<&str>, output: Option<&str>, options: &ParseOptions) -> Result<ExitCode> {
    let text = read_input(input, "input")?;
    let value = blueprint_core::parse_with_options(&text, options)
        .context("Failed to parse JSON")?;
    write_output(output, &format!("{value}\n"))?;
    Ok(ExitCode::SUCCESS)
}

fn run_lex(input: Option<&str>) -> Result<ExitCode> {
    let text = read_input(input, "input")?;
    for token in Lexer::new(&text) {
        let token = token.context("Failed to tokenize input")?;
        match token.kind {
            TokenKind::EndOfFile => println!("{} {}", token.kind, token.position),
            TokenKind::String => println!("{} {} \"{}\"", token.kind, token.position, token.text),
            _ => println!("{} {} {}", token.kind, token.position, token.text),
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Read `path`, or all of stdin when no path is given. `what` names the
/// document in error messages.
fn read_input(path: Option<&str>, what: &str) -> Result<String> {
    let Some(path) = path else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .with_context(|| format!("Failed to read {what} from stdin"))?;
        return Ok(buf);
    };
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {what} file: {path}"))
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write output file: {path}")),
        None => io::stdout()
            .write_all(content.as_bytes())
            .context("Failed to write to stdout"),
    }
}

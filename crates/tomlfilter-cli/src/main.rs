//! `tomlfilter` CLI — run the `from_toml` / `to_toml` filters from the command line.
//!
//! JSON is the interchange format on the structured side.
//!
//! ## Usage
//!
//! ```sh
//! # TOML to pretty-printed JSON (stdin → stdout)
//! echo 'title = "TOML Example"' | tomlfilter from-toml
//!
//! # File to file, compact JSON
//! tomlfilter from-toml -i Cargo.toml -o cargo.json --compact
//!
//! # JSON object back to TOML
//! echo '{"a":1,"b":[1,2,3]}' | tomlfilter to-toml
//!
//! # Validate a TOML file
//! tomlfilter check -i config.toml
//!
//! # List the registered filters
//! tomlfilter filters
//! ```
//!
//! Logs go to stderr. `TOMLFILTER_LOG` takes an `EnvFilter` directive
//! (e.g. `debug`); `--verbose` forces debug.

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tomlfilter_core::{FilterModule, Value};
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "TOMLFILTER_LOG";

#[derive(Parser)]
#[command(
    name = "tomlfilter",
    version,
    about = "Convert between TOML and JSON with the from_toml / to_toml filters"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level (overrides TOMLFILTER_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse TOML and print it as JSON
    FromToml {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Emit single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
    /// Read a JSON object and print it as TOML
    ToToml {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Check that the input is valid TOML
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// List the registered filter names
    Filters,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let filters = FilterModule::new();
    tracing::debug!(?filters, "filter module ready");

    match cli.command {
        Commands::FromToml {
            input,
            output,
            compact,
        } => {
            let bytes = read_input(input.as_deref())?;
            let value = filters
                .parse_slice(&bytes)
                .context("Failed to convert TOML to JSON")?;
            let json = serde_json::Value::from(value);
            let rendered = if compact {
                serde_json::to_string(&json)?
            } else {
                serde_json::to_string_pretty(&json)?
            };
            write_output(output.as_deref(), &format!("{rendered}\n"))?;
        }
        Commands::ToToml { input, output } => {
            let bytes = read_input(input.as_deref())?;
            let json: serde_json::Value =
                serde_json::from_slice(&bytes).context("Input is not valid JSON")?;
            let toml = match filters
                .to_toml(&Value::from(json))
                .context("Failed to convert JSON to TOML")?
            {
                Value::String(text) => text,
                other => anyhow::bail!("to_toml returned a {}", other.type_name()),
            };
            write_output(output.as_deref(), &toml)?;
        }
        Commands::Check { input } => {
            let bytes = read_input(input.as_deref())?;
            let value = filters.parse_slice(&bytes).context("Invalid TOML")?;
            let keys = value.as_map().map_or(0, <[_]>::len);
            println!("OK: {} top-level key{}", keys, if keys == 1 { "" } else { "s" });
        }
        Commands::Filters => {
            for name in filters.filters().keys() {
                println!("{name}");
            }
        }
    }

    Ok(())
}

/// Install the stderr log subscriber. `--verbose` wins over `TOMLFILTER_LOG`,
/// which wins over the `warn` default.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

/// Read raw bytes so the UTF-8 check happens strictly inside the filter.
fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).with_context(|| format!("Failed to read file: {}", path)),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}

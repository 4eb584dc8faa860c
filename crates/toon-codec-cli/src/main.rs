//! `toonc` — convert between JSON and TOON from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Encode JSON to TOON (stdin → stdout)
//! echo '{"name":"Alice","age":30}' | toonc encode
//!
//! # Encode from file to file, pipe-delimited, four-space indent
//! toonc encode -i data.json -o data.toon --delimiter pipe --indent 4
//!
//! # Decode TOON back to pretty-printed JSON, enforcing declared lengths
//! toonc decode -i data.toon --strict
//!
//! # Show size statistics for a JSON document
//! toonc stats -i data.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use toon_codec::{DecodeOptions, Delimiter, EncodeOptions, Value};

#[derive(Parser)]
#[command(
    name = "toonc",
    version,
    about = "TOON (Token-Oriented Object Notation) converter"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode JSON to TOON format
    Encode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Field delimiter for inline arrays and tabular rows
        #[arg(long, value_enum, default_value_t = DelimiterArg::Comma)]
        delimiter: DelimiterArg,
        /// Spaces per indentation level
        #[arg(long, default_value_t = 2)]
        indent: usize,
    },
    /// Decode TOON back to JSON format
    Decode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Enforce declared array lengths and exact row widths
        #[arg(long)]
        strict: bool,
    },
    /// Show encoding statistics (byte counts, reduction ratio)
    Stats {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DelimiterArg {
    Comma,
    Tab,
    Pipe,
}

impl From<DelimiterArg> for Delimiter {
    fn from(arg: DelimiterArg) -> Self {
        match arg {
            DelimiterArg::Comma => Delimiter::Comma,
            DelimiterArg::Tab => Delimiter::Tab,
            DelimiterArg::Pipe => Delimiter::Pipe,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            input,
            output,
            delimiter,
            indent,
        } => {
            let json = read_input(input.as_deref())?;
            let parsed: serde_json::Value =
                serde_json::from_str(&json).context("Input is not valid JSON")?;
            let options = EncodeOptions::new()
                .with_delimiter(delimiter.into())
                .with_indent_unit(indent);
            let toon = toon_codec::encode_with_options(&Value::from(parsed), options)
                .context("Failed to encode JSON as TOON")?;
            write_output(output.as_deref(), &toon)?;
        }
        Commands::Decode {
            input,
            output,
            strict,
        } => {
            let toon = read_input(input.as_deref())?;
            let options = DecodeOptions::new().with_strict(strict);
            let value = toon_codec::decode_with_options(&toon, options)
                .map_err(|e| anyhow::anyhow!("{e} (line {})", e.location(&toon).line))
                .context("Failed to decode TOON")?;
            let pretty = serde_json::to_string_pretty(&serde_json::Value::from(value))?;
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Stats { input } => {
            let json = read_input(input.as_deref())?;
            let parsed: serde_json::Value =
                serde_json::from_str(&json).context("Input is not valid JSON")?;
            let toon = toon_codec::encode(&Value::from(parsed))
                .context("Failed to encode JSON as TOON")?;
            let json_bytes = json.trim().len();
            let toon_bytes = toon.len();
            let ratio = if json_bytes > 0 {
                (1.0 - (toon_bytes as f64 / json_bytes as f64)) * 100.0
            } else {
                0.0
            };
            println!("JSON size:  {} bytes", json_bytes);
            println!("TOON size:  {} bytes", toon_bytes);
            println!("Reduction:  {:.1}%", ratio);
        }
    }

    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
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
            println!("{}", content);
        }
    }
    Ok(())
}

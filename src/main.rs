//! # CharConv CLI - Charset Conversion Tool
//!
//! Command-line interface for converting files between character encodings
//! through the catalog-resolved codecs of the `charconv` library.

#[cfg(feature = "cli")]
use std::collections::HashMap;
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use serde::Serialize;

#[cfg(feature = "cli")]
use charconv::{Catalog, CatalogEntry, EncodingDef};

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI features disabled. Enable with --features cli");
    std::process::exit(1);
}

/// CharConv: convert bytes between named character encodings
#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "charconv")]
#[command(version, about, long_about = None)]
#[command(author = "CharConv Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Extra encoding definitions to merge into the catalog (JSON map)
    #[arg(long, global = true)]
    tables: Option<PathBuf>,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Convert input bytes from one encoding to another
    Convert(ConvertArgs),

    /// List all encoding names known to the catalog
    List(ListArgs),
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct ConvertArgs {
    /// Encoding of the input bytes
    #[arg(short = 'f', long = "from", default_value = "utf8")]
    from: String,

    /// Encoding of the output bytes
    #[arg(short = 't', long = "to", default_value = "utf8")]
    to: String,

    /// Input file (stdin if not specified)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct ListArgs {
    /// Show what each name resolves through
    #[arg(long)]
    details: bool,
}

#[cfg(feature = "cli")]
#[derive(Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Serialize)]
struct ConversionReport {
    success: bool,
    from: String,
    to: String,
    bytes_read: usize,
    bytes_written: usize,
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut catalog = Catalog::new();
    if let Some(ref path) = cli.tables {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read table definitions: {}", path.display()))?;
        let defs: HashMap<String, EncodingDef> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse table definitions: {}", path.display()))?;
        catalog.register_defs(&defs);
        if cli.verbose {
            eprintln!("Merged {} definitions from {}", defs.len(), path.display());
        }
    }

    match cli.command {
        Commands::Convert(ref args) => convert_command(args, &cli, &catalog)?,
        Commands::List(ref args) => list_command(args, &cli, &catalog),
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn convert_command(args: &ConvertArgs, cli: &Cli, catalog: &Catalog) -> Result<()> {
    let decoder = catalog
        .resolve(&args.from)
        .with_context(|| format!("Failed to resolve input encoding '{}'", args.from))?;
    let encoder = catalog
        .resolve(&args.to)
        .with_context(|| format!("Failed to resolve output encoding '{}'", args.to))?;

    let input_data = if let Some(ref input_path) = args.input {
        if cli.verbose {
            eprintln!("Reading from: {}", input_path.display());
        }
        fs::read(input_path)
            .with_context(|| format!("Failed to read input file: {}", input_path.display()))?
    } else {
        let mut buffer = Vec::new();
        io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    };

    let text = decoder.decode(&input_data);
    let output_data = encoder.encode(&text);

    if let Some(ref output_path) = args.output {
        fs::write(output_path, &output_data)
            .with_context(|| format!("Failed to write output file: {}", output_path.display()))?;
        if cli.verbose {
            eprintln!("Wrote to: {}", output_path.display());
        }
    } else {
        io::stdout()
            .write_all(&output_data)
            .context("Failed to write to stdout")?;
    }

    if cli.verbose {
        eprintln!(
            "Converted {} bytes ({}) -> {} bytes ({})",
            input_data.len(),
            args.from,
            output_data.len(),
            args.to
        );
    }

    if matches!(cli.format, OutputFormat::Json) {
        let report = ConversionReport {
            success: true,
            from: args.from.clone(),
            to: args.to.clone(),
            bytes_read: input_data.len(),
            bytes_written: output_data.len(),
        };
        eprintln!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn list_command(args: &ListArgs, cli: &Cli, catalog: &Catalog) {
    let mut entries: Vec<(&str, &CatalogEntry)> = catalog.entries().collect();
    entries.sort_by_key(|(name, _)| *name);

    match cli.format {
        OutputFormat::Json => {
            let listed: Vec<_> = entries
                .iter()
                .map(|(name, entry)| {
                    serde_json::json!({
                        "name": name,
                        "kind": entry_kind(entry),
                        "target": entry_target(entry),
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&listed).unwrap_or_default()
            );
        }
        OutputFormat::Text => {
            println!("Known encodings ({} total):", entries.len());
            for (name, entry) in entries {
                if args.details {
                    match entry_target(entry) {
                        Some(target) => println!("{:15} {} -> {}", name, entry_kind(entry), target),
                        None => println!("{:15} {}", name, entry_kind(entry)),
                    }
                } else {
                    println!("{name}");
                }
            }
        }
    }
}

#[cfg(feature = "cli")]
fn entry_kind(entry: &CatalogEntry) -> &'static str {
    match entry {
        CatalogEntry::Alias(_) => "alias",
        CatalogEntry::Options { .. } => "options",
        CatalogEntry::Factory(_) => "codec",
    }
}

#[cfg(feature = "cli")]
fn entry_target(entry: &CatalogEntry) -> Option<&str> {
    match entry {
        CatalogEntry::Alias(target) => Some(target),
        CatalogEntry::Options { base, .. } => Some(base),
        CatalogEntry::Factory(_) => None,
    }
}

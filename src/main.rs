//! luadoc — generate Lua doc comments from documented method models.
//!
//! - **doc**: `luadoc doc -m models/ -s signatures.json > out.lua`
//! - **check**: `luadoc check -m models/*.json < signatures.json`
//! - **fmt**: `luadoc fmt models/player.json`
//!
//! Signatures are a JSON array of `{ "name", "isStatic", "params": [{ "name" }] }`
//! and are read from stdin when `-s` is omitted.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use luadoc::{create_builder, DocOutcome, Format, LuaMethod, Model, ModelLibrary};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "luadoc",
    about = "Match Lua method signatures against documented models and emit doc comments"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a doc block for every documented signature
    Doc {
        #[command(flatten)]
        input: Input,

        /// Text starting every emitted line
        #[arg(short, long, default_value = "--- ", env = "LUADOC_PREFIX")]
        prefix: String,

        /// Output format: emmylua (default), json
        #[arg(short, long, default_value = "emmylua")]
        format: Format,
    },
    /// Report whether each signature matches its documented model
    Check {
        #[command(flatten)]
        input: Input,
    },
    /// Print a library file normalized through load/save
    Fmt {
        /// Library JSON file
        file: PathBuf,
    },
}

#[derive(Args)]
struct Input {
    /// Library files, directories or glob patterns
    #[arg(short, long = "model", required = true)]
    models: Vec<String>,

    /// Signatures JSON file. If omitted, reads from stdin.
    #[arg(short, long)]
    signatures: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Doc {
            input,
            prefix,
            format,
        } => doc_command(&input, &prefix, format),
        Command::Check { input } => check_command(&input),
        Command::Fmt { file } => fmt_command(&file),
    }
}

/// Render every signature that has a matching model, blocks separated by a
/// blank line.
fn doc_command(input: &Input, prefix: &str, format: Format) -> Result<ExitCode> {
    let library = load_library(&input.models)?;
    let signatures = read_signatures(input.signatures.as_deref())?;

    let mut blocks = Vec::new();
    for sig in &signatures {
        let mut builder = create_builder(format);
        match library.document(builder.as_mut(), prefix, sig) {
            DocOutcome::Documented(text) => blocks.push(text),
            DocOutcome::Empty => info!(method = %sig.name, "nothing to document"),
            DocOutcome::NotMatched => warn!(method = %sig.name, "no matching model"),
        }
    }

    // EmmyLua blocks end with a newline, so this leaves a blank line between
    // them; JSON blocks come out one per line.
    print!("{}", blocks.join("\n"));
    if format == Format::Json && !blocks.is_empty() {
        println!();
    }
    Ok(ExitCode::SUCCESS)
}

/// Print one status line per signature. Fails when a documented method no
/// longer matches its model.
fn check_command(input: &Input) -> Result<ExitCode> {
    let library = load_library(&input.models)?;
    let signatures = read_signatures(input.signatures.as_deref())?;

    let mut mismatches = 0;
    for sig in &signatures {
        let status = match library.get(&sig.name) {
            None => "undocumented",
            Some(model) if model.test_signature(sig) => "ok",
            Some(_) => {
                mismatches += 1;
                "mismatch"
            }
        };
        println!("{}: {}", sig.name, status);
    }

    if mismatches > 0 {
        eprintln!("{} signature(s) do not match their models", mismatches);
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn fmt_command(file: &Path) -> Result<ExitCode> {
    let library = ModelLibrary::from_file(file)?;
    let json = serde_json::to_string_pretty(&library.save())
        .context("failed to serialize library")?;
    println!("{}", json);
    Ok(ExitCode::SUCCESS)
}

/// Load and merge all library files, in sorted path order.
fn load_library(patterns: &[String]) -> Result<ModelLibrary> {
    let files = expand_globs(patterns)?;
    if files.is_empty() {
        anyhow::bail!("no library files found");
    }

    let mut library = ModelLibrary::default();
    for path in &files {
        library.merge(ModelLibrary::from_file(path)?);
    }
    info!(files = files.len(), methods = library.len(), "library loaded");
    Ok(library)
}

fn read_signatures(path: Option<&Path>) -> Result<Vec<LuaMethod>> {
    let content = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            input
        }
    };
    serde_json::from_str(&content).context("invalid signatures JSON")
}

/// File extensions recognized as library files.
const SUPPORTED_EXTENSIONS: &[&str] = &["json"];

/// Resolve library arguments to files. Each argument may be a file, a
/// directory (its `.json` files, not recursive) or a glob pattern.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let found = library_files(pattern)?;
        if found.is_empty() {
            warn!(pattern = %pattern, "no library files matched");
        }
        files.extend(found);
    }
    // Merge order follows path order
    files.sort();
    files.dedup();
    Ok(files)
}

fn library_files(pattern: &str) -> Result<Vec<PathBuf>> {
    let path = Path::new(pattern);
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if path.is_dir() {
        let entries = fs::read_dir(path)
            .with_context(|| format!("failed to read directory: {}", path.display()))?;
        return Ok(entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && has_supported_extension(p))
            .collect());
    }
    let paths = glob::glob(pattern).with_context(|| format!("invalid glob pattern: {}", pattern))?;
    Ok(paths.flatten().filter(|p| p.is_file()).collect())
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

//! Keyline CLI: find and show the source line of a key in a JSON document.

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use keyline::render::{render_window, Style};
use keyline::{KeyPath, LocateConfig, Locator, NOT_FOUND};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod document;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "KEYLINE_LOG";

#[derive(Debug, Parser)]
#[command(name = "keyline")]
#[command(about = "Find the source line of a nested key in a JSON document", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug output to stderr (overrides KEYLINE_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the line number of a key (-1 if not found)
    Locate(LocateArgs),
    /// Print the lines around a key with the key's line marked
    Show(ShowArgs),
    /// Print a JSON document in the two-space layout the locator expects
    Normalize(NormalizeArgs),
}

#[derive(Debug, Args)]
struct KeyArgs {
    /// Key to locate, e.g. `tauri.bundle.identifier` or `plugins.2.name`
    key: String,

    /// Input file (reads from stdin if not provided)
    file: Option<PathBuf>,

    /// How KEY is spelled
    #[arg(short, long, value_enum, default_value = "dotted")]
    syntax: SyntaxArg,

    /// Indentation unit of the document, in spaces
    #[arg(short, long, default_value = "2", value_parser = clap::value_parser!(u8).range(1..=16))]
    indent: u8,

    /// Re-format the document as two-space JSON before locating
    #[arg(short, long, conflicts_with = "indent")]
    normalize: bool,
}

#[derive(Debug, Args)]
struct LocateArgs {
    #[command(flatten)]
    key: KeyArgs,
}

#[derive(Debug, Args)]
struct ShowArgs {
    #[command(flatten)]
    key: KeyArgs,

    /// Lines of context around the key
    #[arg(short = 'A', long, default_value = "3")]
    context: usize,

    /// Quiet mode: exit code only when the key is not found
    #[arg(short, long)]
    quiet: bool,

    /// Force color output even when not a TTY
    #[arg(short = 'C', long = "color")]
    color: bool,

    /// Disable color output
    #[arg(short = 'M', long = "no-color", conflicts_with = "color")]
    no_color: bool,
}

#[derive(Debug, Args)]
struct NormalizeArgs {
    /// Input file (reads from stdin if not provided)
    file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SyntaxArg {
    /// Dot-separated segments: `plugins.2.name`
    Dotted,
    /// JSON Pointer: `/plugins/2/name`
    Pointer,
    /// jq path: `.plugins[2].name`
    Jq,
}

/// Exit codes.
mod exit_codes {
    /// The key was found.
    pub const SUCCESS: i32 = 0;
    /// The key was not found.
    pub const NOT_FOUND: i32 = 1;
    /// I/O error, invalid input or invalid key.
    pub const ERROR: i32 = 2;
}

fn parse_key(key: &str, syntax: SyntaxArg) -> Result<KeyPath> {
    let path = match syntax {
        SyntaxArg::Dotted => KeyPath::parse(key),
        SyntaxArg::Pointer => KeyPath::from_json_pointer(key)?,
        SyntaxArg::Jq => KeyPath::from_jq(key)?,
    };
    Ok(path)
}

/// Load the document and locate the key. Returns the text that was searched
/// (normalized if requested) and the line, if found.
fn find(args: &KeyArgs) -> Result<(String, Option<usize>)> {
    let path = parse_key(&args.key, args.syntax)?;

    let mut text = document::load(args.file.as_deref())?;
    if args.normalize {
        text = document::normalize(&text)?;
    }

    let config = LocateConfig::default().with_indent_width(usize::from(args.indent));
    let found = Locator::new(config).locate(&text, &path);

    match &found {
        Some(m) => tracing::debug!(key = %path, line = m.line, indent = m.indent, "located key"),
        None => tracing::debug!(key = %path, "key not found"),
    }

    Ok((text, found.map(|m| m.line)))
}

fn run_locate(args: LocateArgs) -> Result<i32> {
    let (_, line) = find(&args.key)?;
    match line {
        Some(line) => {
            println!("{}", line);
            Ok(exit_codes::SUCCESS)
        }
        None => {
            println!("{}", NOT_FOUND);
            Ok(exit_codes::NOT_FOUND)
        }
    }
}

fn run_show(args: ShowArgs) -> Result<i32> {
    let use_color = if args.no_color {
        false
    } else if args.color {
        true
    } else {
        atty::is(atty::Stream::Stdout)
    };

    let (text, line) = find(&args.key)?;
    let window = line.and_then(|line| render_window(&text, line, args.context, &Style::new(use_color)));

    match window {
        Some(window) => {
            println!("{}", window);
            Ok(exit_codes::SUCCESS)
        }
        None => {
            if !args.quiet {
                eprintln!("key not found: {}", args.key.key);
            }
            Ok(exit_codes::NOT_FOUND)
        }
    }
}

fn run_normalize(args: NormalizeArgs) -> Result<i32> {
    let text = document::load(args.file.as_deref())?;
    println!("{}", document::normalize(&text)?);
    Ok(exit_codes::SUCCESS)
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Locate(args) => run_locate(args),
        Command::Show(args) => run_show(args),
        Command::Normalize(args) => run_normalize(args),
    };

    let code = match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}

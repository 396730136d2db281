/// osmbin command-line tool: inspect, convert, encode, and decode binary
/// OSM entity streams.
///
/// # Command overview
///
/// ```text
/// osmbin <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print one summary line per record
///   stats      Print per-kind counts, size, and skip-ahead offsets
///   convert    Re-encode a stream as flat records or framed blocks
///   encode     Create a flat stream from a JSON manifest
///   decode     Print records as JSON lines
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Log at debug level
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                 |
/// |------|-----------------------------------------|
/// | 0    | Success                                 |
/// | 1    | Error (I/O failure, invalid file, etc.) |
///
/// Logs and error details go to stderr so stdout can be piped cleanly.
use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use structured_logger::Builder;
use structured_logger::json::new_writer;

mod cmd_convert;
mod cmd_decode;
mod cmd_encode;
mod cmd_inspect;
mod cmd_stats;
mod input;
mod json;

use input::{Chunking, FilterArgs, Format};

// ── CLI root ──────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "osmbin", version, about = "Binary OSM entity stream tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level (skip-ahead seeks, skipped blocks, resets).
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print one summary line per accepted record.
    Inspect(InspectArgs),
    /// Print per-kind counts, byte size, and discovered skip-ahead offsets.
    Stats(StatsArgs),
    /// Re-encode a stream in another layout.
    Convert(ConvertArgs),
    /// Create a flat record stream from a JSON manifest.
    Encode(EncodeArgs),
    /// Print records as JSON lines.
    Decode(DecodeArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `osmbin inspect`.
///
/// ```text
/// ┌──────────────────┬─────────────────────────────────────────────┐
/// │ Flag             │ Effect                                      │
/// ├──────────────────┼─────────────────────────────────────────────┤
/// │ --format         │ flat (default) | block                      │
/// │ --skip-<kind>    │ suppress nodes, ways, or relations          │
/// │ --limit N        │ stop after N records                        │
/// │ --chunking       │ legacy (default) | contiguous               │
/// └──────────────────┴─────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the input file.
    pub file: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Flat)]
    pub format: Format,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Stop after this many records.
    #[arg(long)]
    pub limit: Option<usize>,

    #[arg(long, value_enum, default_value_t = Chunking::Legacy)]
    pub chunking: Chunking,
}

/// Arguments for `osmbin stats`.
#[derive(clap::Args)]
pub struct StatsArgs {
    /// Path to the input file.
    pub file: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Flat)]
    pub format: Format,

    #[arg(long, value_enum, default_value_t = Chunking::Legacy)]
    pub chunking: Chunking,
}

/// Arguments for `osmbin convert`.
///
/// ```text
/// ┌──────────────────┬─────────────────────────────────────────────┐
/// │ Flag             │ Effect                                      │
/// ├──────────────────┼─────────────────────────────────────────────┤
/// │ --from / --to    │ flat | block                                │
/// │ --compress       │ zstd-compress block bodies (block output)   │
/// │ --block-size N   │ records per block (block output)            │
/// │ --skip-*         │ drop a kind while converting                │
/// └──────────────────┴─────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct ConvertArgs {
    /// Path to the input file.
    pub input: PathBuf,

    /// Output file path.
    #[arg(short, long)]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Flat)]
    pub from: Format,

    #[arg(long, value_enum, default_value_t = Format::Block)]
    pub to: Format,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Compress block bodies with zstd.
    #[arg(long)]
    pub compress: bool,

    /// Maximum records per block.
    #[arg(long, default_value_t = 8000)]
    pub block_size: usize,

    #[arg(long, value_enum, default_value_t = Chunking::Legacy)]
    pub chunking: Chunking,
}

/// Arguments for `osmbin encode`.
///
/// The manifest is a JSON object with an `entities` array; see
/// [`json::JsonEntity`] for the entry format.
#[derive(clap::Args)]
pub struct EncodeArgs {
    /// Path to the JSON manifest.
    pub input: PathBuf,

    /// Output file path.
    #[arg(short, long)]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value_t = Chunking::Legacy)]
    pub chunking: Chunking,
}

/// Arguments for `osmbin decode`.
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Path to the input file.
    pub file: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Flat)]
    pub format: Format,

    #[command(flatten)]
    pub filter: FilterArgs,

    #[arg(long, value_enum, default_value_t = Chunking::Legacy)]
    pub chunking: Chunking,

    /// Write JSON lines to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    Builder::with_level(if verbose { "debug" } else { "info" })
        .with_target_writer("*", new_writer(io::stderr()))
        .init();
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Stats(args) => cmd_stats::run(&args),
        Commands::Convert(args) => cmd_convert::run(&args),
        Commands::Encode(args) => cmd_encode::run(&args),
        Commands::Decode(args) => cmd_decode::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

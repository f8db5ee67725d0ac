//! svmcsr Command Line Interface
//!
//! Inspect and convert datasets in the svmlight/libsvm sparse text format.

use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::{error, info};
use std::path::PathBuf;
use std::process;
use svmcsr::core::{Result, SvmlightError};
use svmcsr::parse::{load_from_path_with_options, LoadOptions};
use svmcsr::stats::DatasetStats;
use svmcsr::writer::dump_to_path;

#[derive(Parser)]
#[command(name = "svmcsr")]
#[command(about = "Loader and writer for the svmlight/libsvm sparse data format")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "svmcsr contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a dataset and print a summary
    Info(InfoArgs),
    /// Load a dataset and write it back out, optionally rebased
    Convert(ConvertArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Dataset file in svmlight/libsvm format
    file: PathBuf,

    /// Emit the summary as JSON
    #[arg(long)]
    json: bool,

    /// Capture per-row trailing comments
    #[arg(long)]
    comments: bool,

    /// Capture per-row qid markers
    #[arg(long)]
    qids: bool,

    /// Read-buffer size hint in MiB (minimum 1)
    #[arg(long, default_value = "40")]
    buffer_mb: usize,
}

#[derive(Args)]
struct ConvertArgs {
    /// Input dataset file
    input: PathBuf,

    /// Output dataset file
    output: PathBuf,

    /// Write 1-based feature indices instead of the stored 0-based ones
    #[arg(long)]
    one_based: bool,

    /// Preserve per-row trailing comments
    #[arg(long)]
    comments: bool,

    /// Read-buffer size hint in MiB (minimum 1)
    #[arg(long, default_value = "40")]
    buffer_mb: usize,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Info(args) => info_command(args),
        Commands::Convert(args) => convert_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn load_options(comments: bool, qids: bool, buffer_mb: usize) -> LoadOptions {
    LoadOptions::new()
        .with_comments(comments)
        .with_qids(qids)
        .with_buffer_bytes(buffer_mb.saturating_mul(1024 * 1024))
}

fn info_command(args: InfoArgs) -> Result<()> {
    info!("Loading dataset from {:?}", args.file);

    let options = load_options(args.comments, args.qids, args.buffer_mb);
    let dataset = load_from_path_with_options(&args.file, &options)?;

    info!(
        "Loaded {} rows with {} stored entries",
        dataset.n_rows(),
        dataset.nnz()
    );

    let stats = DatasetStats::compute(&dataset);
    if args.json {
        let json = serde_json::to_string_pretty(&stats)
            .map_err(|e| SvmlightError::Serialization(e.to_string()))?;
        println!("{json}");
    } else {
        stats.print_summary();
        if let Some(qids) = dataset.qids() {
            let with_qid = qids.iter().filter(|&&q| q >= 0).count();
            println!("Rows w/ qid: {with_qid}");
        }
        if let Some(comments) = dataset.comments() {
            let with_comment = comments.iter().filter(|c| !c.is_empty()).count();
            println!("Rows w/ comment: {with_comment}");
        }
    }

    Ok(())
}

fn convert_command(args: ConvertArgs) -> Result<()> {
    info!("Loading dataset from {:?}", args.input);

    let options = load_options(args.comments, false, args.buffer_mb);
    let dataset = load_from_path_with_options(&args.input, &options)?;

    info!(
        "Writing {} rows to {:?} ({}-based indices)",
        dataset.n_rows(),
        args.output,
        if args.one_based { 1 } else { 0 }
    );

    dump_to_path(&args.output, &dataset, !args.one_based)?;

    info!("Done");
    Ok(())
}

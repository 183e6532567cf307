//! rocketlink Ground Station
//!
//! Main entry point: decodes telemetry payload lines and prints one JSON
//! object per packet.

use std::io::Cursor;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;
use rlink_app::{run_pipeline, AppConfig, PayloadEmulator};
use tokio::io::{AsyncBufRead, BufReader};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file with `<kind> <hex>` lines (defaults to stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Generate this many emulated altitude payloads instead of reading input
    #[arg(short, long, conflicts_with = "input")]
    emulate: Option<usize>,

    /// Seed for the payload emulator
    #[arg(long)]
    seed: Option<u64>,

    /// Override the queue capacity between pipeline stages
    #[arg(long)]
    queue_capacity: Option<usize>,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

async fn open_source(args: &Args) -> anyhow::Result<Box<dyn AsyncBufRead + Unpin + Send>> {
    if let Some(count) = args.emulate {
        let mut emulator = match args.seed {
            Some(seed) => PayloadEmulator::with_seed(seed),
            None => PayloadEmulator::new(),
        };
        info!("Emulating {count} altitude payloads");
        return Ok(Box::new(Cursor::new(emulator.generate_lines(count).into_bytes())));
    }

    match &args.input {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open input file {}", path.display()))?;
            info!("Reading payloads from {}", path.display());
            Ok(Box::new(BufReader::new(file)))
        }
        None => {
            info!("Reading payloads from stdin");
            Ok(Box::new(BufReader::new(tokio::io::stdin())))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(capacity) = args.queue_capacity {
        config.queue_capacity = capacity;
    }
    if args.pretty {
        config.pretty = true;
    }
    config.validate()?;

    let source = open_source(&args).await?;
    let stats = run_pipeline(source, tokio::io::stdout(), &config).await?;

    if stats.rejected > 0 {
        info!("{} of {} payloads rejected", stats.rejected, stats.received);
    }
    Ok(())
}

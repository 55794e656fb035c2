//! skopos CLI: stream gateway configuration snapshots into a config
//! directory, pruning structurally empty sections along the way.

use anyhow::{Context, Result};
use clap::Parser;
use skopos::{OutputConfig, SnapshotReader, SnapshotSink};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "skopos")]
#[command(author = "Infernet <dev@infernet.org>")]
#[command(version)]
#[command(about = "Mirror pruned gateway configuration snapshots to a config directory")]
struct Cli {
    /// Directory to store the mirrored configuration file
    #[arg(long, default_value = "/etc/gateway/conf.d")]
    output_dir: PathBuf,

    /// Output filename (default: <username>.yaml)
    #[arg(long)]
    output: Option<String>,

    /// Snapshot source: a JSON-lines file or FIFO, or `-` for stdin
    #[arg(long, default_value = "-")]
    input: String,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn setup_logging(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::INFO };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    let target = OutputConfig::new(cli.output_dir, cli.output);
    let path = target.path();

    let reader = if cli.input == "-" {
        SnapshotReader::stdin()
    } else {
        SnapshotReader::file(PathBuf::from(&cli.input))
    };

    debug!(input = %cli.input, path = %path.display(), "Starting snapshot mirror");

    // Unbuffered handoff: the sink paces the producer.
    let (tx, rx) = mpsc::channel(1);
    let producer = tokio::spawn(reader.provide(tx));

    SnapshotSink::new(path).run(rx).await;

    producer
        .await
        .context("Snapshot producer task panicked")?
        .context("Snapshot stream failed")?;

    Ok(())
}

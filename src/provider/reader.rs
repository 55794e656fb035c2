//! Inbound snapshot producers.
//!
//! Discovery itself lives outside this crate: anything holding the channel
//! sender is a valid producer. The shipped reader turns a JSON-lines byte
//! stream (stdin, a file, or a FIFO written by a discovery process) into
//! configuration snapshots.
//!
//! Epistemic mapping:
//! - B_i: Any single line may be malformed; it is skipped with a warning
//!   and the stream continues
//! - I^B: Producer cadence is unknown; a full channel suspends the reader
//!   until the sink catches up

use crate::models::{GatewayConfig, Result, SkoposError};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Where snapshots are read from.
#[derive(Debug, Clone)]
enum SnapshotSource {
    Stdin,
    File(PathBuf),
}

/// Streams configuration snapshots from a JSON-lines source into a channel.
///
/// One document per line. Blank lines are ignored, malformed lines are
/// skipped with a warning, and the stream ends at end of input.
#[derive(Debug, Clone)]
pub struct SnapshotReader {
    source: SnapshotSource,
}

impl SnapshotReader {
    /// Read snapshots from standard input.
    pub fn stdin() -> Self {
        Self {
            source: SnapshotSource::Stdin,
        }
    }

    /// Read snapshots from a file or FIFO.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: SnapshotSource::File(path.into()),
        }
    }

    /// Provenance label recorded on every delivered document.
    fn origin(&self) -> String {
        match &self.source {
            SnapshotSource::Stdin => "stdin".to_string(),
            SnapshotSource::File(path) => path.display().to_string(),
        }
    }

    /// Deliver every parseable document to `tx`, in input order.
    ///
    /// Returns when the source is exhausted or the receiving side is gone.
    /// Only failures to open or read the source are errors; document-level
    /// problems never are.
    pub async fn provide(self, tx: mpsc::Sender<GatewayConfig>) -> Result<()> {
        let origin = self.origin();
        match self.source {
            SnapshotSource::Stdin => pump(BufReader::new(tokio::io::stdin()), origin, tx).await,
            SnapshotSource::File(path) => {
                let file = tokio::fs::File::open(&path).await.map_err(|e| {
                    SkoposError::io(format!("opening snapshot source {}", path.display()), e)
                })?;
                pump(BufReader::new(file), origin, tx).await
            }
        }
    }
}

async fn pump<R>(reader: R, origin: String, tx: mpsc::Sender<GatewayConfig>) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut line_no = 0usize;

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| SkoposError::io("reading snapshot stream", e))?
    {
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }

        let mut config: GatewayConfig = match serde_json::from_str(&line) {
            Ok(config) => config,
            Err(source) => {
                let err = SkoposError::Parse {
                    line: line_no,
                    source,
                };
                warn!(error = %err, "Skipping malformed configuration document");
                continue;
            }
        };
        config.origin = origin.clone();

        debug!(line = line_no, "Configuration snapshot parsed");

        if tx.send(config).await.is_err() {
            // Receiver dropped: shutdown governs both sides.
            break;
        }
    }

    Ok(())
}

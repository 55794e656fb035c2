//! Snapshot sink: prune and persist each received document.
//!
//! Epistemic foundation:
//! - K_i: One writer owns the target file; documents land strictly in
//!   arrival order, each write a full replacement
//! - B_i: Any single write may fail; the failure is reported and the loop
//!   keeps consuming
//! - I^B: A crash mid-write must not corrupt the target, so the payload is
//!   staged in the same directory and renamed over it

use crate::models::{GatewayConfig, Result, SkoposError};
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Consumes configuration snapshots and mirrors each one to a file.
///
/// The target file is replaced wholesale per snapshot: after document N is
/// processed its content reflects exactly document N, never a merge of
/// earlier documents.
pub struct SnapshotSink {
    /// Final path of the mirrored configuration
    path: PathBuf,
    /// Staging path in the same directory, so the rename never crosses
    /// filesystems
    staging: PathBuf,
}

impl SnapshotSink {
    /// Create a sink owning the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let staging = staging_path(&path);
        Self { path, staging }
    }

    /// Consume documents until the producer closes the stream.
    ///
    /// Stream close is the sole normal termination. A failed write is
    /// reported and the next document is awaited; the previous file
    /// content stays in place until a later document succeeds.
    pub async fn run(self, mut rx: mpsc::Receiver<GatewayConfig>) {
        while let Some(mut config) = rx.recv().await {
            debug!(origin = %config.origin, "Configuration snapshot received");

            config.prune();

            if let Err(err) = self.write_snapshot(&config) {
                error!(
                    path = %self.path.display(),
                    error = %err,
                    "Failed to write configuration snapshot"
                );
            }
        }

        info!(path = %self.path.display(), "Configuration stream closed");
    }

    /// Serialize `config` and replace the target file in one rename.
    fn write_snapshot(&self, config: &GatewayConfig) -> Result<()> {
        let data = serde_yaml::to_string(config).map_err(|source| SkoposError::Serialize {
            path: self.path.clone(),
            source,
        })?;

        {
            let mut file = open_staging(&self.staging)?;
            file.write_all(data.as_bytes())
                .map_err(|e| SkoposError::io("writing staged snapshot", e))?;
        }

        fs::rename(&self.staging, &self.path)
            .map_err(|e| SkoposError::io("replacing configuration snapshot", e))?;

        debug!(path = %self.path.display(), bytes = data.len(), "Snapshot written");
        Ok(())
    }
}

/// Open the staging file: create-if-missing, truncate-existing, read-write,
/// owner and group only.
fn open_staging(path: &Path) -> Result<fs::File> {
    let mut options = OpenOptions::new();
    options.read(true).write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o660);
    }

    options
        .open(path)
        .map_err(|e| SkoposError::io("creating staged snapshot", e))
}

/// Staging filename: the target filename with a `.tmp` suffix appended.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("snapshot"));
    name.push(".tmp");
    path.with_file_name(name)
}

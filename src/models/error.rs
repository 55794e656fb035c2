//! Error types for skopos.
//!
//! Epistemic taxonomy:
//! - B_i falsified: malformed inbound documents (Parse) - skip and move on
//! - I^B materialized: filesystem and serializer failures (Io, Serialize) -
//!   report, keep the previous snapshot, keep consuming

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for skopos.
#[derive(Debug, Error)]
pub enum SkoposError {
    #[error("Failed to serialize configuration for {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration document on line {line}: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },
}

impl SkoposError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Result type alias for skopos.
pub type Result<T> = std::result::Result<T, SkoposError>;

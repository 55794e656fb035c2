//! skopos: mirror pruned gateway configuration snapshots to disk.
//!
//! ## Architecture
//!
//! Two components composed linearly:
//! - **Emptiness oracle** ([`inspect`]): a pure structural test deciding
//!   whether a value would serialize to nothing worth keeping.
//! - **Snapshot sink** ([`sink`]): consumes configuration documents from a
//!   channel one at a time, prunes structurally empty sections with the
//!   oracle, and atomically replaces the output file.
//!
//! Producers ([`provider`]) are deliberately thin: discovery is an external
//! collaborator, modeled as anything that feeds the channel.
//!
//! ## Epistemic Design
//!
//! This library distinguishes:
//! - **K_i (Knowledge)**: closed structural kinds and a fixed precedence
//!   order, enforced through types
//! - **B_i (Beliefs)**: per-document parsing and per-write persistence may
//!   fail; failures are reported and the stream continues
//! - **I^R (Resolvable ignorance)**: output location and verbosity resolve
//!   from flags and environment
//! - **I^B (Bounded ignorance)**: producer cadence is unknown; an
//!   unbuffered handoff channel lets the sink pace the producer

pub mod inspect;
pub mod models;
pub mod provider;
pub mod sink;

// Re-export main types for convenience
pub use inspect::{is_empty, FieldView, Inspect, SelfEmpty, View, Visibility};
pub use models::{
    GatewayConfig, HttpConfig, OutputConfig, Result, SkoposError, TcpConfig, TlsConfig, UdpConfig,
};
pub use provider::SnapshotReader;
pub use sink::SnapshotSink;

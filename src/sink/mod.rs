//! Snapshot sink: consumption loop and durable file replacement.

mod snapshot;

pub use snapshot::*;

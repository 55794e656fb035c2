//! Inbound producers feeding the snapshot channel.

mod reader;

pub use reader::*;

//! Core data models for skopos.
//!
//! Epistemic mapping:
//! - K_i (Knowledge): closed document schema with per-field visibility
//! - B_i (Beliefs): fallible serialization and persistence, modeled as Result
//! - I^R (Resolvable): output location comes from flags and environment

mod config;
mod document;
mod error;

pub use config::*;
pub use document::*;
pub use error::*;

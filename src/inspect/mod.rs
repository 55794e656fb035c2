//! Emptiness oracle: structural views and the recursive emptiness test.

mod oracle;
mod view;

pub use oracle::*;
pub use view::*;

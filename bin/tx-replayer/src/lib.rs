//! Command-line front end for [`tx_replay`].

mod cmd;
pub use cmd::*;

/// Shared CLI plumbing: errors, logging and output rendering.
pub mod common;
pub use common::*;

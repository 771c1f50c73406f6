//! Replay historical transactions as read-only calls.
//!
//! A transaction is fetched by hash from a JSON-RPC node, rebuilt into an `eth_call` request
//! pinned to the block it was included in, executed, and the returned bytes are decoded as a
//! UTF-8 string. Reverts can be mapped to readable reasons through [`RevertDecoder`]s.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod constants;

mod decode;
pub use decode::*;

mod error;
pub use error::*;

mod replayer;
pub use replayer::*;

mod request;
pub use request::*;

mod revert;
pub use revert::*;

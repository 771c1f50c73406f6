//! Revert reason decoding.
//!
//! When a replayed call reverts, the node usually returns the raw revert data in the JSON-RPC
//! error payload. [`RevertDecoder`]s turn that data into something a human can read.

use std::{fmt, fs, path::Path};

use alloy_dyn_abi::{DynSolValue, JsonAbiExt};
use alloy_json_abi::JsonAbi;
use alloy_primitives::hex;
use alloy_sol_types::{Panic, Revert, SolError};
use tracing::debug;

use crate::{ReplayError, Result};

/// Maps raw revert data to a readable reason.
pub trait RevertDecoder: fmt::Debug + Send + Sync {
    /// Returns the decoded reason, or `None` if the data is not recognised.
    fn decode(&self, data: &[u8]) -> Option<String>;
}

/// Decodes the builtin Solidity `Error(string)` and `Panic(uint256)` reverts.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRevertDecoder;

impl RevertDecoder for StandardRevertDecoder {
    fn decode(&self, data: &[u8]) -> Option<String> {
        if let Ok(revert) = Revert::abi_decode(data) {
            return Some(format!("Error(\"{}\")", revert.reason()));
        }

        if let Ok(panic) = Panic::abi_decode(data) {
            return Some(match panic.kind() {
                Some(kind) => format!("Panic: {kind}"),
                None => format!("Panic(0x{:x})", panic.code),
            });
        }

        None
    }
}

/// Decodes custom errors declared in a contract ABI.
#[derive(Debug, Clone)]
pub struct AbiRevertDecoder {
    abi: JsonAbi,
}

impl AbiRevertDecoder {
    /// Creates a decoder for the errors of `abi`.
    pub const fn new(abi: JsonAbi) -> Self {
        Self { abi }
    }

    /// Loads the ABI from a JSON file.
    ///
    /// Accepts a bare ABI array or a build artifact carrying the ABI under an `abi` key.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let load_error =
            |reason: String| ReplayError::AbiLoad { path: path.to_path_buf(), reason };

        let contents = fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
        let abi = parse_abi(&contents).map_err(|e| load_error(e.to_string()))?;
        debug!(path = %path.display(), errors = abi.errors().count(), "Loaded ABI");

        Ok(Self::new(abi))
    }
}

impl RevertDecoder for AbiRevertDecoder {
    fn decode(&self, data: &[u8]) -> Option<String> {
        let (selector, args) = data.split_first_chunk::<4>()?;
        let error = self.abi.errors().find(|error| error.selector().0 == *selector)?;
        let values = error.abi_decode_input(args).ok()?;
        Some(format!("{}({})", error.name, join_values(&values)))
    }
}

/// Runs `decoders` in order and returns the first reason decoded.
pub fn decode_revert_reason(decoders: &[Box<dyn RevertDecoder>], data: &[u8]) -> Option<String> {
    if data.is_empty() {
        return None;
    }
    decoders.iter().find_map(|decoder| decoder.decode(data))
}

fn parse_abi(json: &str) -> serde_json::Result<JsonAbi> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let abi = match value {
        serde_json::Value::Object(mut artifact) if artifact.contains_key("abi") => {
            artifact.remove("abi").unwrap_or_default()
        }
        other => other,
    };
    serde_json::from_value(abi)
}

fn join_values(values: &[DynSolValue]) -> String {
    values.iter().map(format_value).collect::<Vec<_>>().join(", ")
}

fn format_value(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Address(address) => address.to_string(),
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Int(int, _) => int.to_string(),
        DynSolValue::Uint(uint, _) => uint.to_string(),
        DynSolValue::FixedBytes(word, size) => hex::encode_prefixed(&word[..*size]),
        DynSolValue::Bytes(bytes) => hex::encode_prefixed(bytes),
        DynSolValue::String(s) => format!("{s:?}"),
        DynSolValue::Array(values) | DynSolValue::FixedArray(values) => {
            format!("[{}]", join_values(values))
        }
        DynSolValue::Tuple(values) => format!("({})", join_values(values)),
        other => format!("{other:?}"),
    }
}

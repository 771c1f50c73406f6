use std::path::PathBuf;

use alloy_primitives::B256;
use alloy_provider::ProviderBuilder;
use clap::Parser;
use reqwest::Url;
use tracing::info;
use tx_replay::{
    constants::DEFAULT_HEADER_LEN, AbiRevertDecoder, ReplayOutcome, ResponseDecoder,
    TransactionReplayer,
};

use crate::{print_outcome, LogArgs, Result};

/// Replay a mined transaction as an `eth_call` at its block and print the string it returns
#[derive(Parser, Debug)]
#[command(name = "tx-replayer", version)]
pub struct Cmd {
    /// Transaction hash to replay
    #[arg(value_name = "TX_HASH", env = "TX_HASH")]
    pub tx_hash: B256,

    /// RPC URL of the node to fetch the transaction from and execute the call on
    #[arg(long = "rpc", env = "RPC_URL", default_value = "http://localhost:8545")]
    pub rpc: Url,

    /// Number of hex characters, `0x` prefix included, stripped from the call response before
    /// decoding
    #[arg(long = "header-len", value_name = "CHARS", default_value_t = DEFAULT_HEADER_LEN)]
    pub header_len: usize,

    /// Contract ABI (bare array or build artifact) used to decode custom revert errors. May be
    /// repeated.
    #[arg(long = "abi", value_name = "PATH")]
    pub abi: Vec<PathBuf>,

    /// Logging configuration
    #[command(flatten)]
    pub log_args: LogArgs,
}

impl Cmd {
    /// Replays the transaction and returns the outcome without printing it.
    ///
    /// Fails only on invalid arguments, unreadable ABI files or a failed transaction lookup.
    pub async fn replay(&self) -> Result<ReplayOutcome> {
        let response_decoder = ResponseDecoder::new(self.header_len)?;
        let provider =
            ProviderBuilder::new().disable_recommended_fillers().connect_http(self.rpc.clone());

        let mut replayer =
            TransactionReplayer::new(provider).with_response_decoder(response_decoder);
        for path in &self.abi {
            replayer = replayer.with_revert_decoder(AbiRevertDecoder::from_file(path)?);
        }

        info!(
            tx_hash = %self.tx_hash,
            rpc = %self.rpc,
            header_len = self.header_len,
            "Replaying transaction"
        );
        Ok(replayer.replay(self.tx_hash).await?)
    }

    /// Execute the replay command and print its outcome to stdout
    pub async fn run(&self) -> Result<()> {
        let outcome = self.replay().await?;
        print_outcome(&outcome, &mut std::io::stdout().lock())?;
        Ok(())
    }
}

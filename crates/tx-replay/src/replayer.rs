use alloy_network::Ethereum;
use alloy_primitives::{Bytes, TxHash};
use alloy_provider::Provider;
use alloy_rpc_types_eth::Transaction;
use tracing::{debug, info, warn};

use crate::{
    decode_revert_reason, DecodedResponse, ReplayError, ReplayRequest, ResponseDecoder, Result,
    RevertDecoder, StandardRevertDecoder,
};

/// Result of replaying one transaction.
#[derive(Debug)]
pub enum ReplayOutcome {
    /// The node does not know the transaction. Nothing was executed.
    NotFound,
    /// The call succeeded and its response was decoded.
    Decoded(DecodedResponse),
    /// The transaction was found but replaying it failed.
    Failed(ReplayFailure),
}

/// A failure caught while replaying a found transaction.
#[derive(Debug)]
pub struct ReplayFailure {
    /// The caught error.
    pub error: ReplayError,
    /// Raw revert data returned by the node, if any.
    pub revert_data: Option<Bytes>,
    /// Revert reason produced by the first decoder that recognised the data.
    pub revert_reason: Option<String>,
}

/// Replays mined transactions as `eth_call`s at their inclusion block.
#[derive(Debug)]
pub struct TransactionReplayer<P> {
    provider: P,
    response_decoder: ResponseDecoder,
    revert_decoders: Vec<Box<dyn RevertDecoder>>,
}

impl<P: Provider<Ethereum>> TransactionReplayer<P> {
    /// Creates a replayer using the default response header and the standard revert decoder.
    pub fn new(provider: P) -> Self {
        Self { provider, response_decoder: ResponseDecoder::default(), revert_decoders: Vec::new() }
    }

    /// Sets the decoder applied to successful call responses.
    pub fn with_response_decoder(mut self, response_decoder: ResponseDecoder) -> Self {
        self.response_decoder = response_decoder;
        self
    }

    /// Adds a revert decoder. Added decoders run in insertion order, before the builtin
    /// `Error(string)` / `Panic(uint256)` decoder.
    pub fn with_revert_decoder(mut self, decoder: impl RevertDecoder + 'static) -> Self {
        self.revert_decoders.push(Box::new(decoder));
        self
    }

    /// Looks the transaction up by hash. `None` if the node does not know it.
    pub async fn fetch_transaction(&self, tx_hash: TxHash) -> Result<Option<Transaction>> {
        debug!(%tx_hash, "Fetching transaction");
        self.provider
            .get_transaction_by_hash(tx_hash)
            .await
            .map_err(ReplayError::TransactionLookup)
    }

    /// Rebuilds the call request for `tx`, pinned to its inclusion block.
    pub fn build_call_request(&self, tx: &Transaction) -> Result<ReplayRequest> {
        ReplayRequest::from_transaction(tx)
    }

    /// Executes the request as a read-only call and returns the raw response.
    pub async fn execute_call(&self, request: &ReplayRequest) -> Result<Bytes> {
        debug!(block_number = request.block_number, to = ?request.to, "Executing call");
        self.provider
            .call(request.to_transaction_request())
            .block(request.block_id())
            .await
            .map_err(ReplayError::Call)
    }

    /// Strips the configured header from `response` and decodes the remainder as UTF-8.
    pub fn decode_response(&self, response: &[u8]) -> Result<DecodedResponse> {
        self.response_decoder.decode(response)
    }

    /// Fetches, rebuilds, executes and decodes the transaction `tx_hash`.
    ///
    /// Only a failed lookup is returned as `Err`. Everything after the lookup is caught and
    /// reported as [`ReplayOutcome::Failed`].
    pub async fn replay(&self, tx_hash: TxHash) -> Result<ReplayOutcome> {
        let Some(tx) = self.fetch_transaction(tx_hash).await? else {
            debug!(%tx_hash, "Transaction not found");
            return Ok(ReplayOutcome::NotFound);
        };
        info!(%tx_hash, block_number = ?tx.block_number, "Transaction found");

        match self.replay_transaction(&tx).await {
            Ok(decoded) => Ok(ReplayOutcome::Decoded(decoded)),
            Err(error) => Ok(ReplayOutcome::Failed(self.failure(error))),
        }
    }

    async fn replay_transaction(&self, tx: &Transaction) -> Result<DecodedResponse> {
        let request = self.build_call_request(tx)?;
        let response = self.execute_call(&request).await?;
        debug!(response_len = response.len(), "Call returned");
        self.decode_response(&response)
    }

    fn failure(&self, error: ReplayError) -> ReplayFailure {
        let revert_data = error.revert_data();
        let revert_reason = revert_data.as_deref().and_then(|data| {
            decode_revert_reason(&self.revert_decoders, data)
                .or_else(|| StandardRevertDecoder.decode(data))
        });
        warn!(%error, ?revert_reason, "Replay failed");
        ReplayFailure { error, revert_data, revert_reason }
    }
}

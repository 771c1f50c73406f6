use alloy_consensus::{Transaction as _, TxEnvelope};
use alloy_eips::{eip2930::AccessList, eip7702::SignedAuthorization, BlockId, Typed2718 as _};
use alloy_primitives::{Address, BlockNumber, Bytes, ChainId, TxKind, B256, U256};
use alloy_rpc_types_eth::{Transaction, TransactionInput, TransactionRequest};
use tracing::trace;

use crate::{ReplayError, Result};

/// A call request rebuilt from a mined transaction.
///
/// Every field is copied from exactly one transaction. The call is evaluated at
/// [`ReplayRequest::block_number`], the block the transaction was included in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayRequest {
    /// Recipient, or [`TxKind::Create`] for contract creations.
    pub to: TxKind,
    /// Sender recovered by the node.
    pub from: Address,
    /// Sender nonce.
    pub nonce: u64,
    /// Gas limit.
    pub gas: u64,
    /// Gas price of legacy and EIP-2930 transactions.
    pub gas_price: Option<u128>,
    /// Max fee per gas of dynamic-fee transactions.
    pub max_fee_per_gas: Option<u128>,
    /// Max priority fee per gas of dynamic-fee transactions.
    pub max_priority_fee_per_gas: Option<u128>,
    /// Call data.
    pub input: Bytes,
    /// Value transferred.
    pub value: U256,
    /// Chain id, absent for pre-EIP-155 legacy transactions.
    pub chain_id: Option<ChainId>,
    /// EIP-2718 transaction type.
    pub tx_type: u8,
    /// EIP-2930 access list.
    pub access_list: Option<AccessList>,
    /// EIP-7702 authorization list.
    pub authorization_list: Option<Vec<SignedAuthorization>>,
    /// EIP-4844 blob versioned hashes.
    pub blob_versioned_hashes: Option<Vec<B256>>,
    /// EIP-4844 max fee per blob gas.
    pub max_fee_per_blob_gas: Option<u128>,
    /// Block the call is evaluated at.
    pub block_number: BlockNumber,
}

impl ReplayRequest {
    /// Builds the request from a transaction returned by the node.
    ///
    /// Fails with [`ReplayError::MissingBlockNumber`] for transactions that are still pending.
    pub fn from_transaction(tx: &Transaction<TxEnvelope>) -> Result<Self> {
        let envelope = tx.inner.inner();
        let block_number =
            tx.block_number.ok_or_else(|| ReplayError::MissingBlockNumber(*envelope.tx_hash()))?;

        let (gas_price, max_fee_per_gas, max_priority_fee_per_gas) = if envelope.is_dynamic_fee() {
            (None, Some(envelope.max_fee_per_gas()), envelope.max_priority_fee_per_gas())
        } else {
            (envelope.gas_price(), None, None)
        };

        let request = Self {
            to: envelope.kind(),
            from: tx.inner.signer(),
            nonce: envelope.nonce(),
            gas: envelope.gas_limit(),
            gas_price,
            max_fee_per_gas,
            max_priority_fee_per_gas,
            input: envelope.input().clone(),
            value: envelope.value(),
            chain_id: envelope.chain_id(),
            tx_type: envelope.ty(),
            access_list: envelope.access_list().cloned(),
            authorization_list: envelope.authorization_list().map(<[_]>::to_vec),
            blob_versioned_hashes: envelope.blob_versioned_hashes().map(<[_]>::to_vec),
            max_fee_per_blob_gas: envelope.max_fee_per_blob_gas(),
            block_number,
        };
        trace!(?request, "Call request built");
        Ok(request)
    }

    /// Block tag the call is pinned to.
    pub fn block_id(&self) -> BlockId {
        BlockId::number(self.block_number)
    }

    /// Converts the request into the RPC call envelope.
    pub fn to_transaction_request(&self) -> TransactionRequest {
        TransactionRequest {
            from: Some(self.from),
            to: Some(self.to),
            gas_price: self.gas_price,
            max_fee_per_gas: self.max_fee_per_gas,
            max_priority_fee_per_gas: self.max_priority_fee_per_gas,
            gas: Some(self.gas),
            value: Some(self.value),
            input: TransactionInput::new(self.input.clone()),
            nonce: Some(self.nonce),
            chain_id: self.chain_id,
            access_list: self.access_list.clone(),
            transaction_type: Some(self.tx_type),
            authorization_list: self.authorization_list.clone(),
            blob_versioned_hashes: self.blob_versioned_hashes.clone(),
            max_fee_per_blob_gas: self.max_fee_per_blob_gas,
            ..Default::default()
        }
    }
}

impl TryFrom<&Transaction<TxEnvelope>> for ReplayRequest {
    type Error = ReplayError;

    fn try_from(tx: &Transaction<TxEnvelope>) -> Result<Self> {
        Self::from_transaction(tx)
    }
}

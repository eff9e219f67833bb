//! Checkout actions: one on-chain transaction each.

use alloy_primitives::{Address, Bytes, B256, U256};
use efp_types::ChainId;
use serde::Serialize;

use crate::location::StorageLocation;

/// What an action does on chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionKind {
    /// Mint a new list pointing at `location`.
    CreateList { location: StorageLocation },
    /// Apply packed list ops at `nonce`.
    ApplyOperations { nonce: U256, ops: Vec<Bytes> },
}

/// A contract call ready to be signed and sent by a wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractCall {
    pub chain_id: ChainId,
    pub to: Address,
    /// ABI-encoded calldata.
    pub input: Bytes,
}

/// One queued checkout step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    pub kind: ActionKind,
    /// Chain the wallet must be connected to before submitting.
    pub chain_id: ChainId,
    pub label: String,
    pub call: ContractCall,
    /// Set while the wallet is asked to sign and send this action.
    pub pending_confirmation: bool,
    /// Hash returned by the wallet once submitted.
    pub tx_hash: Option<B256>,
}

impl Action {
    pub(crate) fn new(kind: ActionKind, label: String, call: ContractCall) -> Self {
        Self { kind, chain_id: call.chain_id, label, call, pending_confirmation: false, tx_hash: None }
    }

    #[inline]
    pub fn is_create_list(&self) -> bool {
        matches!(self.kind, ActionKind::CreateList { .. })
    }

    #[inline]
    pub fn is_submitted(&self) -> bool {
        self.tx_hash.is_some()
    }
}

//! Error types for checkout orchestration.

use efp_listops::{LocationError, PlanError};
use efp_types::{ChainId, ListId};
use thiserror::Error;

use crate::checkout::Step;

/// Errors reported by a wallet collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalletError {
    /// The user declined the request.
    #[error("rejected by user")]
    Rejected,

    /// Anything else: RPC failure, insufficient funds, unsupported chain.
    #[error("{0}")]
    Other(String),
}

/// Errors that can occur while checking out.
///
/// None of these end the session: the flow stays where it was and the
/// failing step can be triggered again.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Registry read failed.
    #[error("registry lookup failed for list {list_id}: {reason}")]
    Registry { list_id: ListId, reason: String },

    /// Registry returned a malformed location.
    #[error("storage location error: {0}")]
    Location(#[from] LocationError),

    /// Registry points at a chain we have no deployment for.
    #[error("list is stored on unknown chain {0}")]
    UnknownChain(ChainId),

    /// Wallet declined or failed to switch chains.
    #[error("switch to chain {chain_id} failed: {source}")]
    ChainSwitchRejected { chain_id: ChainId, source: WalletError },

    /// Submission attempted on the wrong chain. Never sent to the wallet.
    #[error("wallet is on chain {connected}, action requires chain {required}")]
    WrongChain { required: ChainId, connected: ChainId },

    /// Wallet failed to submit the transaction.
    #[error("submitting '{label}' failed: {source}")]
    Submission { label: String, source: WalletError },

    /// Planning failed (bad cart item, no target chain).
    #[error("plan error: {0}")]
    Plan(#[from] PlanError),

    /// Chain selection changed after a list was minted for the current one.
    #[error("chain selection is locked: a list was already minted on chain {0}")]
    ChainLocked(ChainId),

    /// Operation called from a step that doesn't allow it.
    #[error("not allowed in step {0:?}")]
    InvalidStep(Step),

    /// JSON-RPC error response.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<reqwest::Error> for CheckoutError {
    fn from(e: reqwest::Error) -> Self {
        CheckoutError::Http(e.to_string())
    }
}

impl From<serde_json::Error> for CheckoutError {
    fn from(e: serde_json::Error) -> Self {
        CheckoutError::Json(e.to_string())
    }
}

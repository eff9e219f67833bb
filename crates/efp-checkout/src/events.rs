//! Events emitted while a checkout runs.

use alloy_primitives::B256;
use efp_types::ChainId;
use serde::Serialize;

use crate::checkout::{StallReason, Step};

/// Events emitted by [`Checkout`](crate::Checkout).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckoutEvent {
    /// Flow moved to a new step.
    StepChanged { step: Step },
    /// Action queue was rebuilt.
    Planned { actions: usize, chain_id: ChainId },
    /// Wallet was asked to switch chains.
    ChainSwitchRequested { chain_id: ChainId },
    /// Wallet refused or failed the switch.
    ChainSwitchFailed { chain_id: ChainId, reason: String },
    /// Wallet is asked to sign the action at `index`.
    ActionPending { index: usize, label: String },
    /// Action at `index` was accepted by the wallet.
    ActionSubmitted { index: usize, label: String, tx_hash: B256 },
    /// Action at `index` failed to submit.
    ActionFailed { index: usize, label: String, reason: String },
    /// Flow could not make progress.
    Stalled { reason: StallReason },
    /// All actions submitted and session state reconciled.
    Finished,
}

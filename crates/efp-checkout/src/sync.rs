//! Keeps the wallet on the chain the current action needs.

use alloy_primitives::B256;
use efp_listops::ContractCall;
use efp_types::ChainId;

use super::{host::Wallet, CheckoutError};

/// Result of [`ChainSynchronizer::ensure_chain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainSync {
    /// Already connected to the required chain.
    Ready,
    /// A switch was requested and the wallet accepted it.
    Switched,
}

/// Wraps the wallet so every chain-sensitive call goes through one place.
pub struct ChainSynchronizer<W> {
    wallet: W,
}

impl<W: Wallet> ChainSynchronizer<W> {
    pub fn new(wallet: W) -> Self {
        Self { wallet }
    }

    #[inline]
    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    #[inline]
    pub fn connected_chain(&self) -> ChainId {
        self.wallet.connected_chain()
    }

    /// Request a switch to `required` unless already there.
    pub async fn ensure_chain(&self, required: ChainId) -> Result<ChainSync, CheckoutError> {
        let connected = self.wallet.connected_chain();
        if connected == required {
            return Ok(ChainSync::Ready);
        }

        tracing::info!(
            target: "efp_checkout::sync",
            from = connected,
            to = required,
            "requesting chain switch"
        );

        match self.wallet.switch_chain(required).await {
            Ok(()) => Ok(ChainSync::Switched),
            Err(source) => {
                tracing::warn!(
                    target: "efp_checkout::sync",
                    chain_id = required,
                    error = %source,
                    "chain switch failed"
                );
                Err(CheckoutError::ChainSwitchRejected { chain_id: required, source })
            }
        }
    }

    /// Whether the wallet is connected to `required` right now.
    #[inline]
    pub fn is_on(&self, required: ChainId) -> bool {
        self.wallet.connected_chain() == required
    }

    /// Submit `call`, refusing if the wallet is not on the call's chain.
    pub async fn submit(&self, label: &str, call: &ContractCall) -> Result<B256, CheckoutError> {
        let connected = self.wallet.connected_chain();
        if connected != call.chain_id {
            return Err(CheckoutError::WrongChain { required: call.chain_id, connected });
        }

        self.wallet
            .submit(call)
            .await
            .map_err(|source| CheckoutError::Submission { label: label.to_string(), source })
    }
}

//! Collaborators the checkout flow drives but does not own.
//!
//! The wallet and chain reader are async and may be shared. The cart, profile
//! cache and navigation make up the host session, which is lent to a
//! [`Checkout`](crate::Checkout) for its whole lifetime.

use alloy_primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use efp_listops::ContractCall;
use efp_types::{ChainId, ListIdentity, PendingEdit};

use crate::{CheckoutError, WalletError};

/// Connected wallet able to switch chains and send transactions.
#[async_trait]
pub trait Wallet: Send + Sync {
    /// Chain the wallet is currently connected to.
    fn connected_chain(&self) -> ChainId;

    /// Ask the wallet to switch chains. Resolves once the user responds.
    async fn switch_chain(&self, chain_id: ChainId) -> Result<(), WalletError>;

    /// Sign and send `call`, returning the transaction hash once accepted.
    async fn submit(&self, call: &ContractCall) -> Result<B256, WalletError>;
}

/// Read-only contract calls against the home chain.
#[async_trait]
pub trait ChainReader: Send + Sync {
    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes, CheckoutError>;
}

/// The user's staged list edits.
pub trait CartStore {
    /// Cart items in insertion order.
    fn cart_items(&self) -> &[PendingEdit];

    fn cart_len(&self) -> usize {
        self.cart_items().len()
    }

    fn clear_cart(&mut self);
}

/// Cached profile and list state.
pub trait ProfileCache {
    /// Registration state of the connected account's list.
    fn identity(&self) -> ListIdentity;

    /// Drop cached queries under `key`.
    fn invalidate_queries(&mut self, key: &str);

    fn refetch_lists(&mut self);

    fn refetch_profile(&mut self);

    fn refetch_following(&mut self);
}

/// App navigation.
pub trait Navigator {
    fn navigate_to_profile(&mut self);
}

/// Everything the session exposes to the checkout flow.
pub trait Host: CartStore + ProfileCache + Navigator {}

impl<T: CartStore + ProfileCache + Navigator> Host for T {}

//! Async checkout orchestration for EFP list ops.
//!
//! Drives a cart of list edits to chain:
//! - Resolving where the user's list is stored (registry lookup, cached)
//! - Planning the action queue (optional list mint, then the batched ops)
//! - Switching the wallet to each action's chain before it is sent
//! - Reconciling host state once everything is submitted
//!
//! # Quick Start
//!
//! ```ignore
//! use efp_checkout::{Checkout, CheckoutConfig, RpcChainReader, Step, StepOutcome};
//!
//! let reader = RpcChainReader::new("https://mainnet.base.org");
//! let mut checkout = Checkout::new(CheckoutConfig::default(), wallet, reader, &mut session);
//!
//! checkout.select_chain(10).await?;
//! checkout.confirm_chain()?;
//!
//! let mut outcome = checkout.initiate().await?;
//! while outcome != StepOutcome::Finished {
//!     outcome = match checkout.step() {
//!         Step::InitiateTransactions => checkout.initiate().await?,
//!         _ => checkout.advance().await?,
//!     };
//! }
//! ```

mod checkout;
mod error;
mod events;
mod resolver;
mod rpc;
mod sync;

pub mod host;

#[cfg(test)]
mod tests;

pub use checkout::{
    Checkout, CheckoutConfig, StallReason, Step, StepOutcome, FOLLOW_STATE_QUERY_KEY,
};
pub use error::{CheckoutError, WalletError};
pub use events::CheckoutEvent;
pub use host::{CartStore, ChainReader, Host, Navigator, ProfileCache, Wallet};
pub use resolver::StorageResolver;
pub use rpc::RpcChainReader;
pub use sync::{ChainSync, ChainSynchronizer};

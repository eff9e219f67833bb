//! Core logic for checking out a cart of EFP list ops.
//!
//! This crate is synchronous and does no I/O:
//! - List op encoding (packed `applyListOps` payloads)
//! - List storage location blobs (registry wire format)
//! - Action planning (optional list mint, then the batched ops)
//! - Deployment constants and contract ABIs

mod action;
mod plan;

pub mod abi;
pub mod config;
pub mod location;
pub mod ops;

#[cfg(test)]
mod tests;

pub use action::{Action, ActionKind, ContractCall};
pub use config::{ChainInfo, HOME_CHAIN_ID, KNOWN_CHAINS, LIST_MINTER, LIST_REGISTRY};
pub use location::{decode_location, LocationError, StorageLocation};
pub use ops::{encode_op, encode_ops, EncodeError};
pub use plan::{PlanError, PlanRequest, Planner, PlannerConfig, CREATE_LIST_LABEL};

//! EFP mainnet deployment constants.
//!
//! Core contracts (registry, minter) live on the home chain. List records
//! contracts exist on every chain a list can be stored on.

use alloy_primitives::{address, Address};
use efp_types::ChainId;
use serde::Serialize;

/// Base, where the list registry and minter are deployed.
pub const HOME_CHAIN_ID: ChainId = 8453;

/// Optimism mainnet.
pub const OPTIMISM_CHAIN_ID: ChainId = 10;

/// Ethereum mainnet.
pub const MAINNET_CHAIN_ID: ChainId = 1;

/// EFPListRegistry on Base, source of truth for list storage locations.
/// <https://basescan.org/address/0x0E688f5DCa4a0a4729946ACbC44C792341714e08>
pub const LIST_REGISTRY: Address = address!("0E688f5DCa4a0a4729946ACbC44C792341714e08");

/// EFPListMinter on Base.
/// <https://basescan.org/address/0xDb17Bfc64aBf7B7F080a49f0Bbbf799dDbb48Ce5>
pub const LIST_MINTER: Address = address!("Db17Bfc64aBf7B7F080a49f0Bbbf799dDbb48Ce5");

/// EFPListRecords on Base.
pub const BASE_LIST_RECORDS: Address = address!("41Aa48Ef3c0446b46a5b1cc6337FF3d3716E2A33");

/// EFPListRecords on Optimism.
pub const OPTIMISM_LIST_RECORDS: Address = address!("4Ca00413d850DcFa3516E14d21DAE2772F2aCb85");

/// EFPListRecords on Ethereum mainnet.
pub const MAINNET_LIST_RECORDS: Address = address!("5289fE5daBC021D02FDDf23d4a4DF96F4E0F17EF");

/// Default Base JSON-RPC endpoint used for registry reads.
pub const DEFAULT_HOME_RPC_URL: &str = "https://mainnet.base.org";

/// A chain a list can be stored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChainInfo {
    pub id: ChainId,
    pub name: &'static str,
    /// List records contract deployed on this chain.
    pub list_records: Address,
}

/// Chains with a list records deployment, home chain first.
pub const KNOWN_CHAINS: [ChainInfo; 3] = [
    ChainInfo { id: HOME_CHAIN_ID, name: "Base", list_records: BASE_LIST_RECORDS },
    ChainInfo { id: OPTIMISM_CHAIN_ID, name: "OP Mainnet", list_records: OPTIMISM_LIST_RECORDS },
    ChainInfo { id: MAINNET_CHAIN_ID, name: "Ethereum", list_records: MAINNET_LIST_RECORDS },
];

/// Look up a chain in `chains` by id.
#[inline]
pub fn find_chain(chains: &[ChainInfo], id: ChainId) -> Option<&ChainInfo> {
    chains.iter().find(|c| c.id == id)
}

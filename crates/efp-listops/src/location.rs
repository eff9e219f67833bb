//! List storage location blobs, as stored in `EFPListRegistry`.
//!
//! ```text
//! | Offset | Size | Field                               |
//! |--------|------|-------------------------------------|
//! | 0      | 1    | location version (1)                |
//! | 1      | 1    | location type (1 = EVM contract)    |
//! | 2      | 32   | chain id (uint256)                  |
//! | 34     | 20   | list records contract               |
//! | 54     | 32   | slot / nonce (uint256)              |
//! ```
//!
//! Clients read the chain id from hex chars `[64, 70)` of the `0x`-prefixed
//! blob, i.e. only the low three bytes of the chain id word. We keep that
//! exact window so both sides agree on which chain a list lives on.

use std::ops::Range;

use alloy_primitives::{Address, Bytes, U256};
use efp_types::ChainId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Location version written when minting.
pub const LOCATION_VERSION: u8 = 1;

/// Location type for an EVM list records contract.
pub const LOCATION_TYPE_EVM_CONTRACT: u8 = 1;

/// Full length of a version 1 EVM contract location.
pub const LOCATION_LEN: usize = 86;

/// Bytes holding the chain id (hex chars 64..70 of the 0x-prefixed string).
pub const CHAIN_ID_RANGE: Range<usize> = 31..34;

/// Bytes holding the list records contract (hex chars 70..110).
pub const CONTRACT_RANGE: Range<usize> = 34..54;

/// Trailing bytes holding the slot.
pub const NONCE_LEN: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("storage location too short: expected at least 86 bytes, got {0}")]
    TooShort(usize),
}

/// Where a list's records live and the slot its ops must target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorageLocation {
    pub chain_id: ChainId,
    pub contract: Address,
    pub nonce: U256,
}

impl StorageLocation {
    pub const fn new(chain_id: ChainId, contract: Address, nonce: U256) -> Self {
        Self { chain_id, contract, nonce }
    }

    /// Decode a location blob returned by the registry.
    #[inline]
    pub fn decode(blob: &[u8]) -> Result<Self, LocationError> {
        decode_location(blob)
    }

    /// Encode this location for `mintPrimaryListNoMeta`.
    #[inline]
    pub fn encode(&self) -> Bytes {
        let mut buf = Vec::with_capacity(LOCATION_LEN);
        encode_location_into(self, &mut buf);
        Bytes::from(buf)
    }
}

/// Decode a location blob. Only the fixed windows documented above are read.
pub fn decode_location(blob: &[u8]) -> Result<StorageLocation, LocationError> {
    if blob.len() < LOCATION_LEN {
        return Err(LocationError::TooShort(blob.len()));
    }

    let chain = &blob[CHAIN_ID_RANGE];
    let chain_id = u32::from_be_bytes([0, chain[0], chain[1], chain[2]]) as ChainId;

    let contract = Address::from_slice(&blob[CONTRACT_RANGE]);
    let nonce = U256::from_be_slice(&blob[blob.len() - NONCE_LEN..]);

    Ok(StorageLocation { chain_id, contract, nonce })
}

/// Encode a location into the provided buffer.
pub fn encode_location_into(location: &StorageLocation, out: &mut Vec<u8>) {
    let start = out.len();
    out.reserve(LOCATION_LEN);

    out.push(LOCATION_VERSION);
    out.push(LOCATION_TYPE_EVM_CONTRACT);

    // chain id (32 bytes)
    out.extend_from_slice(&U256::from(location.chain_id).to_be_bytes::<32>());

    // list records contract (20 bytes)
    out.extend_from_slice(location.contract.as_slice());

    // slot (32 bytes)
    out.extend_from_slice(&location.nonce.to_be_bytes::<32>());

    debug_assert_eq!(out.len() - start, LOCATION_LEN);
}

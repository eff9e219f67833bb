//! Shared types for the efp-checkout crate family.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// EVM chain id.
pub type ChainId = u64;

/// Token id of an EFP list NFT.
pub type ListId = U256;

/// Current list op version.
pub const LIST_OP_VERSION: u8 = 1;

/// List op codes understood by the list records contract.
///
/// Codes above [`ListOpCode::Unfollow`] carry a tag after the address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ListOpCode {
    /// Add an address record to the list.
    Follow = 1,
    /// Remove an address record from the list.
    Unfollow = 2,
    /// Attach a tag to an address record.
    Tag = 3,
    /// Remove a tag from an address record.
    Untag = 4,
}

impl ListOpCode {
    /// Highest opcode that does not carry a tag.
    pub const TAG_THRESHOLD: u8 = 2;

    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether ops with this code append a tag after the address.
    #[inline]
    pub const fn carries_tag(self) -> bool {
        self.as_u8() > Self::TAG_THRESHOLD
    }
}

impl TryFrom<u8> for ListOpCode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Follow),
            2 => Ok(Self::Unfollow),
            3 => Ok(Self::Tag),
            4 => Ok(Self::Untag),
            other => Err(other),
        }
    }
}

/// One cart entry: a list edit the user has staged but not yet submitted.
///
/// The opcode is kept raw because carts are loaded from outside; the encoder
/// rejects anything it doesn't recognize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEdit {
    #[serde(default = "default_version")]
    pub version: u8,
    pub opcode: u8,
    pub target: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

fn default_version() -> u8 {
    LIST_OP_VERSION
}

impl PendingEdit {
    fn new(opcode: ListOpCode, target: Address, tag: Option<String>) -> Self {
        Self { version: LIST_OP_VERSION, opcode: opcode.as_u8(), target, tag }
    }

    pub fn follow(target: Address) -> Self {
        Self::new(ListOpCode::Follow, target, None)
    }

    pub fn unfollow(target: Address) -> Self {
        Self::new(ListOpCode::Unfollow, target, None)
    }

    pub fn tag(target: Address, tag: impl Into<String>) -> Self {
        Self::new(ListOpCode::Tag, target, Some(tag.into()))
    }

    pub fn untag(target: Address, tag: impl Into<String>) -> Self {
        Self::new(ListOpCode::Untag, target, Some(tag.into()))
    }
}

/// The user's list registration state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListIdentity {
    /// Token id of the user's list, once minted and indexed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<ListId>,
    /// Storage slot to register when minting a new list.
    /// Ignored once `list_id` is known.
    #[serde(default)]
    pub mint_nonce: U256,
}

impl ListIdentity {
    pub fn registered(list_id: ListId) -> Self {
        Self { list_id: Some(list_id), mint_nonce: U256::ZERO }
    }

    pub fn unregistered(mint_nonce: U256) -> Self {
        Self { list_id: None, mint_nonce }
    }

    #[inline]
    pub fn is_registered(&self) -> bool {
        self.list_id.is_some()
    }
}

//! Packed encoding of list ops, as consumed by `EFPListRecords.applyListOps`.
//!
//! ```text
//! | Offset | Size | Field                          |
//! |--------|------|--------------------------------|
//! | 0      | 1    | op version                     |
//! | 1      | 1    | opcode                         |
//! | 2      | 1    | record version (always 1)      |
//! | 3      | 1    | record type (1 = address)      |
//! | 4      | 20   | target address                 |
//! | 24     | n    | tag, UTF-8 (tag opcodes only)  |
//! ```
//!
//! There is no length prefix or checksum. The contract splits the tag off by
//! position, so any change here silently breaks decoding on chain.

use alloy_primitives::Bytes;
use efp_types::{ListOpCode, PendingEdit};
use thiserror::Error;

/// Record version byte written after the opcode.
pub const RECORD_VERSION: u8 = 1;

/// Record type byte for plain address records.
pub const RECORD_TYPE_ADDRESS: u8 = 1;

/// Length of an op without a tag: 4 header bytes + 20 address bytes.
pub const BASE_OP_LEN: usize = 24;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("unknown list opcode: {0}")]
    UnknownOpcode(u8),
    #[error("opcode {0} requires a tag")]
    MissingTag(u8),
    #[error("opcode {0} does not take a tag")]
    UnexpectedTag(u8),
}

/// Encode a single pending edit into the provided buffer.
pub fn encode_op_into(edit: &PendingEdit, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    let opcode = ListOpCode::try_from(edit.opcode).map_err(EncodeError::UnknownOpcode)?;

    let tag = match (opcode.carries_tag(), edit.tag.as_deref()) {
        (true, Some(tag)) => Some(tag),
        (true, None) => return Err(EncodeError::MissingTag(edit.opcode)),
        (false, Some(_)) => return Err(EncodeError::UnexpectedTag(edit.opcode)),
        (false, None) => None,
    };

    out.reserve(BASE_OP_LEN + tag.map_or(0, str::len));

    out.push(edit.version);
    out.push(opcode.as_u8());
    out.push(RECORD_VERSION);
    out.push(RECORD_TYPE_ADDRESS);
    out.extend_from_slice(edit.target.as_slice());

    if let Some(tag) = tag {
        out.extend_from_slice(tag.as_bytes());
    }

    Ok(())
}

/// Encode a single pending edit.
pub fn encode_op(edit: &PendingEdit) -> Result<Bytes, EncodeError> {
    let mut buf = Vec::with_capacity(BASE_OP_LEN);
    encode_op_into(edit, &mut buf)?;
    Ok(Bytes::from(buf))
}

/// Encode a whole cart, preserving its order.
///
/// Fails on the first invalid edit; nothing is encoded partially.
pub fn encode_ops(cart: &[PendingEdit]) -> Result<Vec<Bytes>, EncodeError> {
    cart.iter().map(encode_op).collect()
}

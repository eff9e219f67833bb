use crate::ops::{encode_op, encode_op_into, encode_ops, EncodeError, BASE_OP_LEN};
use alloy_primitives::{address, Address};
use efp_types::{ListOpCode, PendingEdit};

const ALICE: Address = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
const BOB: Address = address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");

#[test]
fn test_follow_layout() {
    let op = encode_op(&PendingEdit::follow(ALICE)).unwrap();

    assert_eq!(op.len(), BASE_OP_LEN);
    assert_eq!(&op[0..4], &[1, ListOpCode::Follow.as_u8(), 1, 1]);
    assert_eq!(&op[4..24], ALICE.as_slice());
}

#[test]
fn test_follow_known_vector() {
    let op = encode_op(&PendingEdit::follow(ALICE)).unwrap();
    let expected = format!("01010101{}", "aa".repeat(20));

    assert_eq!(hex::encode(&op), expected);
}

#[test]
fn test_unfollow_has_no_tag_segment() {
    let op = encode_op(&PendingEdit::unfollow(BOB)).unwrap();

    assert_eq!(op.len(), 24);
    assert_eq!(op[1], 2);
}

#[test]
fn test_tag_appends_tag_bytes() {
    let op = encode_op(&PendingEdit::tag(BOB, "top8")).unwrap();

    assert_eq!(op.len(), BASE_OP_LEN + 4);
    assert_eq!(&op[0..4], &[1, 3, 1, 1]);
    assert_eq!(&op[4..24], BOB.as_slice());
    assert_eq!(&op[24..], b"top8");
}

#[test]
fn test_untag_multibyte_tag() {
    // length is counted in UTF-8 bytes, not chars
    let op = encode_op(&PendingEdit::untag(BOB, "frënd")).unwrap();

    assert_eq!(op[1], 4);
    assert_eq!(op.len(), BASE_OP_LEN + "frënd".len());
    assert_eq!(op.len(), 30);
}

#[test]
fn test_empty_tag_is_allowed() {
    let op = encode_op(&PendingEdit::tag(ALICE, "")).unwrap();
    assert_eq!(op.len(), BASE_OP_LEN);
}

#[test]
fn test_version_byte_passes_through() {
    let edit = PendingEdit { version: 7, ..PendingEdit::follow(ALICE) };
    let op = encode_op(&edit).unwrap();
    assert_eq!(op[0], 7);
}

#[test]
fn test_unknown_opcode_rejected() {
    let edit = PendingEdit { opcode: 9, ..PendingEdit::follow(ALICE) };
    assert_eq!(encode_op(&edit), Err(EncodeError::UnknownOpcode(9)));

    let edit = PendingEdit { opcode: 0, ..PendingEdit::follow(ALICE) };
    assert_eq!(encode_op(&edit), Err(EncodeError::UnknownOpcode(0)));
}

#[test]
fn test_tag_mismatch_rejected() {
    let missing = PendingEdit { tag: None, ..PendingEdit::tag(ALICE, "x") };
    assert_eq!(encode_op(&missing), Err(EncodeError::MissingTag(3)));

    let unexpected = PendingEdit { tag: Some("x".into()), ..PendingEdit::follow(ALICE) };
    assert_eq!(encode_op(&unexpected), Err(EncodeError::UnexpectedTag(1)));
}

#[test]
fn test_failed_encode_leaves_buffer_untouched() {
    let mut buf = vec![0xff];
    let edit = PendingEdit { opcode: 42, ..PendingEdit::follow(ALICE) };

    assert!(encode_op_into(&edit, &mut buf).is_err());
    assert_eq!(buf, vec![0xff]);
}

#[test]
fn test_encode_ops_preserves_cart_order() {
    let cart = vec![
        PendingEdit::follow(ALICE),
        PendingEdit::tag(ALICE, "top8"),
        PendingEdit::untag(ALICE, "top8"),
        PendingEdit::unfollow(BOB),
    ];

    let ops = encode_ops(&cart).unwrap();

    assert_eq!(ops.len(), cart.len());
    for (op, edit) in ops.iter().zip(&cart) {
        assert_eq!(op, &encode_op(edit).unwrap());
    }
    assert_eq!(ops.iter().map(|op| op[1]).collect::<Vec<_>>(), vec![1, 3, 4, 2]);
}

#[test]
fn test_encode_ops_lengths() {
    let cart = vec![PendingEdit::follow(ALICE), PendingEdit::tag(BOB, "muted")];
    let lens: Vec<usize> = encode_ops(&cart).unwrap().iter().map(|op| op.len()).collect();

    assert_eq!(lens, vec![24, 29]);
}

#[test]
fn test_encode_ops_fails_on_any_bad_edit() {
    let cart = vec![
        PendingEdit::follow(ALICE),
        PendingEdit { opcode: 5, ..PendingEdit::follow(BOB) },
    ];

    assert_eq!(encode_ops(&cart), Err(EncodeError::UnknownOpcode(5)));
}

#[test]
fn test_encoding_is_deterministic() {
    let edit = PendingEdit::tag(BOB, "top8");
    assert_eq!(encode_op(&edit).unwrap(), encode_op(&edit).unwrap());
}

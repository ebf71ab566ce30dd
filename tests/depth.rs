//! The 511/512 nesting-depth boundary, exercised with both arrays and
//! objects and from both directions (just under the cap, just over it).

use jsonsax::{parse, RecordingHandler};

fn nested_arrays(depth: usize) -> Vec<u8> {
    let mut buf = Vec::with_capacity(depth * 2);
    buf.extend(std::iter::repeat(b'[').take(depth));
    buf.extend(std::iter::repeat(b']').take(depth));
    buf
}

fn nested_objects(depth: usize) -> Vec<u8> {
    let mut buf = Vec::new();
    for i in 0..depth {
        buf.extend(format!(r#"{{"a{i}":"#).into_bytes());
    }
    buf.extend(b"0".to_vec());
    buf.extend(std::iter::repeat(b'}').take(depth));
    buf
}

#[test]
fn exactly_511_nested_arrays_is_accepted() {
    let mut h = RecordingHandler::new();
    assert!(parse(&nested_arrays(511), &mut h).is_ok());
}

#[test]
fn exactly_512_nested_arrays_is_rejected() {
    let mut h = RecordingHandler::new();
    assert!(parse(&nested_arrays(512), &mut h).is_err());
}

#[test]
fn exactly_511_nested_objects_is_accepted() {
    let mut h = RecordingHandler::new();
    assert!(parse(&nested_objects(511), &mut h).is_ok());
}

#[test]
fn exactly_512_nested_objects_is_rejected() {
    let mut h = RecordingHandler::new();
    assert!(parse(&nested_objects(512), &mut h).is_err());
}

#[test]
fn mixed_array_and_object_nesting_shares_the_same_cap() {
    let mut buf = Vec::new();
    for i in 0..255 {
        buf.extend(format!(r#"{{"a{i}":"#).into_bytes());
        buf.push(b'[');
    }
    buf.extend(b"0".to_vec());
    for _ in 0..255 {
        buf.push(b']');
        buf.push(b'}');
    }
    // 510 levels total: well under the cap.
    let mut h = RecordingHandler::new();
    assert!(parse(&buf, &mut h).is_ok());
}

#[test]
fn depth_error_position_is_just_past_the_offending_opening_bracket() {
    let input = nested_arrays(512);
    let mut h = RecordingHandler::new();
    let err = parse(&input, &mut h).unwrap_err();
    // The 512th `[` sits at (0-indexed) position 511; the cap is checked
    // right after it's consumed, so the cursor is already at 512.
    assert_eq!(err.position(), 512);
}

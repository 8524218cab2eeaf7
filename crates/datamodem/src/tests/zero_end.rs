use alloc::string::String;

use bstr::ByteSlice;

use crate::{ReadError, WriteError, mutf8};

#[test]
fn round_trip_with_every_grouping() {
    let text = "a\u{0}\u{80}\u{7FF}\u{800}\u{1F680}z";
    let mut buf = [0u8; 64];
    let written = mutf8::encode_zero_end(text, &mut buf, 0).unwrap();
    assert_eq!(written, mutf8::encoded_len(text) + 1);
    assert_eq!(buf[written - 1], 0x00);

    let (decoded, consumed) = mutf8::decode_zero_end(&buf, 0).unwrap();
    assert_eq!(decoded, text);
    assert_eq!(consumed, written);
}

#[test]
fn decode_stops_at_the_terminator() {
    // Embedded in a larger blob with trailing garbage the decoder must not
    // look at.
    let blob = [0xAA, 0xBB, 0x68, 0x69, 0x00, 0xFF, 0xFF];
    let (text, consumed) = mutf8::decode_zero_end(&blob, 2).unwrap();
    assert_eq!(text, "hi");
    assert_eq!(consumed, 3);
}

#[test]
fn an_empty_string_is_one_terminator_byte() {
    let mut buf = [0xEEu8; 4];
    assert_eq!(mutf8::encode_zero_end("", &mut buf, 1), Ok(1));
    assert_eq!(buf.as_bstr(), [0xEE, 0x00, 0xEE, 0xEE].as_bstr());
    assert_eq!(mutf8::decode_zero_end(&buf, 1), Ok((String::new(), 1)));
}

#[test]
fn the_null_character_does_not_collide_with_the_terminator() {
    let mut buf = [0u8; 8];
    let written = mutf8::encode_zero_end("\u{0}", &mut buf, 0).unwrap();
    assert_eq!(&buf[..written], &[0xC0, 0x80, 0x00]);
    let (text, consumed) = mutf8::decode_zero_end(&buf, 0).unwrap();
    assert_eq!(text, "\u{0}");
    assert_eq!(consumed, 3);
}

#[test]
fn a_missing_terminator_is_truncated() {
    assert_eq!(
        mutf8::decode_zero_end(&[0x61, 0x62], 0),
        Err(ReadError::TruncatedString)
    );
    // An offset at or past the end has no terminator either.
    assert_eq!(
        mutf8::decode_zero_end(&[0x61], 1),
        Err(ReadError::TruncatedString)
    );
    assert_eq!(
        mutf8::decode_zero_end(&[0x61], 5),
        Err(ReadError::TruncatedString)
    );
}

#[test]
fn malformed_offsets_are_relative_to_the_run() {
    // The broken continuation sits 3 bytes into the blob but 1 byte into
    // the run that starts at offset 2.
    let blob = [0x00, 0x00, 0xC2, 0x41, 0x00];
    assert_eq!(
        mutf8::decode_zero_end(&blob, 2),
        Err(ReadError::MalformedString { offset: 1 })
    );
}

#[test]
fn encode_refuses_a_target_without_room_for_the_terminator() {
    let mut buf = [0u8; 2];
    assert_eq!(
        mutf8::encode_zero_end("ab", &mut buf, 0),
        Err(WriteError::CapacityExceeded {
            needed: 3,
            available: 2
        })
    );
    // Nothing was written.
    assert_eq!(buf, [0, 0]);

    let mut buf = [0u8; 8];
    assert_eq!(
        mutf8::encode_zero_end("ab", &mut buf, 6),
        Err(WriteError::CapacityExceeded {
            needed: 3,
            available: 2
        })
    );
}

#[test]
fn decode_of_a_complete_run_matches_the_zero_end_decode() {
    let text = "mixed \u{4E16}\u{754C} content\u{1F680}";
    let mut buf = [0u8; 64];
    let written = mutf8::encode_zero_end(text, &mut buf, 0).unwrap();
    let resident = mutf8::decode(&buf[..written - 1]).unwrap();
    assert_eq!(resident, text);
}

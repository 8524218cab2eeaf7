use alloc::vec::Vec;

use rstest::rstest;

use super::ChunkSource;
use crate::{DataRead, ReadError, SliceReader, StreamReader};

/// Frame an encoded run behind its u16 length prefix.
fn framed(run: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(2 + run.len());
    #[expect(clippy::cast_possible_truncation)]
    bytes.extend_from_slice(&(run.len() as u16).to_be_bytes());
    bytes.extend_from_slice(run);
    bytes
}

fn read_both(bytes: &[u8]) -> [Result<alloc::string::String, ReadError>; 2] {
    let resident = SliceReader::new(bytes).read_string();
    let streamed =
        StreamReader::with_capacity(ChunkSource::new(bytes, 1), 1, 4).read_string();
    [resident, streamed]
}

#[rstest]
// Continuation with `01` top bits where `10` is required.
#[case(&[0xC2, 0x41], 1)]
// Continuation with `11` top bits.
#[case(&[0xC2, 0xC0], 1)]
// Second byte of a 3-byte sequence broken.
#[case(&[0xE2, 0x41, 0x80], 1)]
// Third byte of a 3-byte sequence broken.
#[case(&[0xE2, 0x82, 0xFF], 2)]
// A bare continuation byte cannot lead.
#[case(&[0x80], 0)]
// `1111xxxx`: no 4-byte form exists in this format.
#[case(&[0xF0, 0x90, 0x80, 0x80], 0)]
// The offset is relative to the run, not the message.
#[case(&[0x61, 0x62, 0xC2, 0x13], 3)]
fn invalid_bit_patterns_are_malformed(#[case] run: &[u8], #[case] offset: usize) {
    for result in read_both(&framed(run)) {
        assert_eq!(result, Err(ReadError::MalformedString { offset }), "run {run:?}");
    }
}

#[rstest]
// Declared length ends after the lead of a 2-byte sequence.
#[case(&[0x61, 0xC2])]
// ... and inside a 3-byte sequence, after one and after two bytes.
#[case(&[0xE2])]
#[case(&[0xE2, 0x82])]
fn a_run_ending_mid_sequence_is_truncated(#[case] run: &[u8]) {
    for result in read_both(&framed(run)) {
        assert_eq!(result, Err(ReadError::TruncatedString), "run {run:?}");
    }
}

#[test]
fn a_length_claiming_more_than_the_input_is_truncated() {
    // Prefix says 5 encoded bytes; only 3 exist before the input ends.
    let bytes = [0x00, 0x05, 0x61, 0x62, 0x63];
    for result in read_both(&bytes) {
        assert_eq!(result, Err(ReadError::TruncatedString));
    }
}

#[rstest]
// A high surrogate with no partner, alone and mid-string.
#[case(&[0xED, 0xA0, 0xBD], 0)]
#[case(&[0x61, 0xED, 0xA0, 0xBD], 1)]
// High surrogate followed by a plain character instead of a low.
#[case(&[0xED, 0xA0, 0xBD, 0x61], 0)]
// A low surrogate with no preceding high.
#[case(&[0xED, 0xBA, 0x80], 0)]
fn unpaired_surrogates_are_malformed(#[case] run: &[u8], #[case] offset: usize) {
    for result in read_both(&framed(run)) {
        assert_eq!(result, Err(ReadError::MalformedString { offset }), "run {run:?}");
    }
}

#[test]
fn a_literal_zero_payload_byte_decodes_to_nul() {
    // The encoder never emits it, but the decoder accepts it.
    let bytes = [0x00, 0x03, 0x61, 0x00, 0x62];
    for result in read_both(&bytes) {
        assert_eq!(result.unwrap(), "a\u{0}b");
    }
}

#[test]
fn a_missing_length_prefix_is_end_of_stream() {
    for bytes in [&[] as &[u8], &[0x00]] {
        for result in read_both(bytes) {
            assert_eq!(result, Err(ReadError::EndOfStream));
        }
    }
}

#[test]
fn both_readers_agree_on_every_error() {
    // A grab bag of broken inputs; whatever the verdict, it must be the
    // same from the buffered and the resident reader.
    let cases: &[&[u8]] = &[
        &[0x00, 0x02, 0xC2],
        &[0x00, 0x01, 0xF8],
        &[0x00, 0x04, 0x61, 0xE0, 0x80],
        &[0x00, 0x03, 0xED, 0xA0],
        &[0x7F, 0xFF, 0x41],
    ];
    for &bytes in cases {
        let [resident, streamed] = read_both(bytes);
        assert_eq!(resident, streamed, "input {bytes:?}");
    }
}

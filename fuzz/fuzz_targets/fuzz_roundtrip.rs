//! Arbitrary strings encoded and decoded back, with the encoded bytes split
//! across source reads at arbitrary points.

#![no_main]

use arbitrary::Arbitrary;
use datamodem::{ByteSource, DataRead, DataWriter, SliceReader, StreamReader, mutf8};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    text: String,
    splits: Vec<u8>,
}

struct Splits<'a> {
    bytes: &'a [u8],
    sizes: &'a [u8],
    next: usize,
}

impl ByteSource for Splits<'_> {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        let chunk = if self.sizes.is_empty() {
            buf.len()
        } else {
            let size = self.sizes[self.next % self.sizes.len()];
            self.next += 1;
            1 + usize::from(size) % 7
        };
        let n = chunk.min(buf.len()).min(self.bytes.len());
        buf[..n].copy_from_slice(&self.bytes[..n]);
        self.bytes = &self.bytes[n..];
        n
    }
}

fuzz_target!(|input: Input| {
    let encoded_len = mutf8::encoded_len(&input.text);
    if encoded_len > usize::from(u16::MAX) {
        return;
    }

    let mut writer = DataWriter::with_capacity(2 + encoded_len.max(1));
    writer.write_string(&input.text).unwrap();
    let bytes = writer.filled();

    let mut resident = SliceReader::new(bytes);
    assert_eq!(resident.read_string().unwrap(), input.text);

    let source = Splits {
        bytes,
        sizes: &input.splits,
        next: 0,
    };
    let mut streamed = StreamReader::with_capacity(source, 3, 16);
    assert_eq!(streamed.read_string().unwrap(), input.text);

    let mut target = vec![0u8; encoded_len + 1];
    let written = mutf8::encode_zero_end(&input.text, &mut target, 0).unwrap();
    let (decoded, consumed) = mutf8::decode_zero_end(&target, 0).unwrap();
    assert_eq!(decoded, input.text);
    assert_eq!(consumed, written);
});

//! Arbitrary bytes through every decode surface: nothing may panic, and the
//! buffered reader must agree with the resident one byte for byte.

#![no_main]

use datamodem::{ByteSource, DataRead, SliceReader, StreamReader, mutf8};
use libfuzzer_sys::fuzz_target;

/// Hands out one byte per read, so every refill lands mid-sequence.
struct OneByte<'a>(&'a [u8]);

impl ByteSource for OneByte<'_> {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        let n = 1.min(buf.len()).min(self.0.len());
        buf[..n].copy_from_slice(&self.0[..n]);
        self.0 = &self.0[n..];
        n
    }
}

fuzz_target!(|data: &[u8]| {
    let resident = SliceReader::new(data).read_string();
    let streamed = StreamReader::with_capacity(OneByte(data), 1, 4).read_string();
    assert_eq!(resident, streamed);

    let _ = mutf8::decode(data);
    let _ = mutf8::decode_zero_end(data, 0);
});

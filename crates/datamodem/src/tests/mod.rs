mod malformed;
mod zero_end;

use alloc::vec::Vec;

use crate::ByteSource;

/// Source that hands out at most `chunk` bytes per read, forcing refills to
/// land at arbitrary points inside multi-byte sequences.
pub(crate) struct ChunkSource<'a> {
    bytes: &'a [u8],
    chunk: usize,
}

impl<'a> ChunkSource<'a> {
    pub(crate) fn new(bytes: &'a [u8], chunk: usize) -> Self {
        assert!(chunk >= 1);
        Self { bytes, chunk }
    }
}

impl ByteSource for ChunkSource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        let n = self.chunk.min(buf.len()).min(self.bytes.len());
        buf[..n].copy_from_slice(&self.bytes[..n]);
        self.bytes = &self.bytes[n..];
        n
    }
}

/// Source whose read sizes cycle through an arbitrary pattern, for property
/// tests that partition the input every which way.
pub(crate) struct SplitSource<'a> {
    bytes: &'a [u8],
    sizes: Vec<usize>,
    next: usize,
}

impl<'a> SplitSource<'a> {
    pub(crate) fn new(bytes: &'a [u8], sizes: &[usize]) -> Self {
        Self {
            bytes,
            sizes: sizes.to_vec(),
            next: 0,
        }
    }
}

impl ByteSource for SplitSource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        let chunk = if self.sizes.is_empty() {
            buf.len()
        } else {
            let size = self.sizes[self.next % self.sizes.len()];
            self.next += 1;
            1 + size % 7
        };
        let n = chunk.min(buf.len()).min(self.bytes.len());
        buf[..n].copy_from_slice(&self.bytes[..n]);
        self.bytes = &self.bytes[n..];
        n
    }
}

/// Source that records the size of every read request it receives, to pin
/// down refill and read-limit behavior.
pub(crate) struct RecordingSource<'a> {
    bytes: &'a [u8],
    pub(crate) requests: Vec<usize>,
}

impl<'a> RecordingSource<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            requests: Vec::new(),
        }
    }
}

impl ByteSource for RecordingSource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        self.requests.push(buf.len());
        self.bytes.read(buf)
    }
}

//! Reader over a resident byte slice.
//!
//! The whole input is already in memory, so there is no refill and every
//! operation is a single bounds check plus decode. This is the reader for
//! payloads of any size - nothing is copied - and the only one that can
//! revisit input via `mark`/`reset`.

use alloc::string::String;

use crate::{DataRead, ReadError, mutf8};

/// A reader backed directly by a caller-supplied byte slice.
pub struct SliceReader<'a> {
    buf: &'a [u8],
    pos: usize,
    mark: Option<usize>,
}

impl<'a> SliceReader<'a> {
    /// Create a reader over `bytes`.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            buf: bytes,
            pos: 0,
            mark: None,
        }
    }

    /// Rebind the reader to a new slice, clearing the cursor and any mark.
    pub fn set_bytes(&mut self, bytes: &'a [u8]) {
        self.buf = bytes;
        self.pos = 0;
        self.mark = None;
    }

    /// Bytes left to read.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Current cursor position within the slice.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], ReadError> {
        if self.remaining() < N {
            return Err(ReadError::EndOfStream);
        }
        let mut raw = [0u8; N];
        raw.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        Ok(raw)
    }
}

impl DataRead for SliceReader<'_> {
    fn read_u8(&mut self) -> Result<u8, ReadError> {
        self.read_byte().ok_or(ReadError::EndOfStream)
    }

    fn read_byte(&mut self) -> Option<u8> {
        let &b = self.buf.get(self.pos)?;
        self.pos += 1;
        Some(b)
    }

    fn read_u16(&mut self) -> Result<u16, ReadError> {
        Ok(u16::from_be_bytes(self.take_array()?))
    }

    fn read_i32(&mut self) -> Result<i32, ReadError> {
        Ok(i32::from_be_bytes(self.take_array()?))
    }

    fn read_i64(&mut self) -> Result<i64, ReadError> {
        Ok(i64::from_be_bytes(self.take_array()?))
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), ReadError> {
        if self.remaining() < buf.len() {
            return Err(ReadError::EndOfStream);
        }
        buf.copy_from_slice(&self.buf[self.pos..self.pos + buf.len()]);
        self.pos += buf.len();
        Ok(())
    }

    fn read_into(&mut self, buf: &mut [u8]) -> usize {
        let amount = self.remaining().min(buf.len());
        buf[..amount].copy_from_slice(&self.buf[self.pos..self.pos + amount]);
        self.pos += amount;
        amount
    }

    fn read_string(&mut self) -> Result<String, ReadError> {
        let encoded_len = usize::from(self.read_u16()?);
        let end = self.buf.len().min(self.pos + encoded_len);
        let text = mutf8::decode_run(&self.buf[self.pos..end], encoded_len)?;
        self.pos += encoded_len;
        Ok(text)
    }

    fn skip(&mut self, n: usize) -> usize {
        let amount = self.remaining().min(n);
        self.pos += amount;
        amount
    }

    fn mark(&mut self) -> Result<(), ReadError> {
        self.mark = Some(self.pos);
        Ok(())
    }

    fn reset(&mut self) -> Result<(), ReadError> {
        self.pos = self.mark.ok_or(ReadError::NoMarkSet)?;
        Ok(())
    }
}

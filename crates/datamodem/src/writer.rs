//! Fixed-capacity writer with zero-copy handoff.
//!
//! The buffer never grows; a write that does not fit fails with
//! [`WriteError::CapacityExceeded`] before mutating anything, and the owning
//! collaborator is expected to size the buffer for the largest message it
//! will ever encode. The filled prefix is handed to a transport without
//! copying via [`filled`](DataWriter::filled), and
//! [`set_position`](DataWriter::set_position) allows patching a
//! previously-written length field in place.
//!
//! String encoding is two-phase to keep the no-allocation contract: measure
//! the encoded length in one forward pass, then emit. The first pass encodes
//! opportunistically into a small scratch region so that, for the common
//! short string, the measured bytes are also the finished bytes and nothing
//! is encoded twice.

#![expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use alloc::{boxed::Box, vec};

use crate::{ByteSource, WriteError, mutf8};

/// Default buffer capacity.
const DEFAULT_CAPACITY: usize = 64 * 1024;

/// Default string-encode scratch size.
const SCRATCH_CAPACITY: usize = 8 * 1024;

/// A reusable fixed-capacity writer encoding big-endian values and
/// length-prefixed modified UTF-8 strings.
pub struct DataWriter {
    buf: Box<[u8]>,
    scratch: Box<[u8]>,
    pos: usize,
}

impl DataWriter {
    /// Create a writer with the default capacity (64 KiB).
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a writer with an explicit buffer capacity.
    ///
    /// # Panics
    ///
    /// If `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_buffers(capacity, SCRATCH_CAPACITY.min(capacity))
    }

    /// Create a writer with explicit buffer and string-scratch capacities.
    ///
    /// A smaller scratch only costs short strings their single-pass fast
    /// path; correctness does not depend on it.
    ///
    /// # Panics
    ///
    /// If `capacity` is zero.
    #[must_use]
    pub fn with_buffers(capacity: usize, scratch_capacity: usize) -> Self {
        assert!(capacity >= 1, "capacity must be at least 1");
        Self {
            buf: vec![0; capacity].into_boxed_slice(),
            scratch: vec![0; scratch_capacity].into_boxed_slice(),
            pos: 0,
        }
    }

    fn ensure(&self, needed: usize) -> Result<(), WriteError> {
        let available = self.buf.len() - self.pos;
        if needed > available {
            return Err(WriteError::CapacityExceeded { needed, available });
        }
        Ok(())
    }

    fn put(&mut self, bytes: &[u8]) -> Result<(), WriteError> {
        self.ensure(bytes.len())?;
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(())
    }

    /// Append one byte.
    ///
    /// # Errors
    ///
    /// [`WriteError::CapacityExceeded`] if the buffer is full.
    pub fn write_u8(&mut self, v: u8) -> Result<(), WriteError> {
        self.put(&[v])
    }

    /// Append one byte.
    ///
    /// # Errors
    ///
    /// [`WriteError::CapacityExceeded`] if the buffer is full.
    pub fn write_i8(&mut self, v: i8) -> Result<(), WriteError> {
        self.put(&[v as u8])
    }

    /// Append a `bool` as one byte, `1` for `true` and `0` for `false`.
    ///
    /// # Errors
    ///
    /// [`WriteError::CapacityExceeded`] if the buffer is full.
    pub fn write_bool(&mut self, v: bool) -> Result<(), WriteError> {
        self.put(&[u8::from(v)])
    }

    /// Append a big-endian `u16`.
    ///
    /// # Errors
    ///
    /// [`WriteError::CapacityExceeded`] if 2 bytes do not fit.
    pub fn write_u16(&mut self, v: u16) -> Result<(), WriteError> {
        self.put(&v.to_be_bytes())
    }

    /// Append a big-endian `i16`.
    ///
    /// # Errors
    ///
    /// [`WriteError::CapacityExceeded`] if 2 bytes do not fit.
    pub fn write_i16(&mut self, v: i16) -> Result<(), WriteError> {
        self.put(&v.to_be_bytes())
    }

    /// Append a big-endian `i32`.
    ///
    /// # Errors
    ///
    /// [`WriteError::CapacityExceeded`] if 4 bytes do not fit.
    pub fn write_i32(&mut self, v: i32) -> Result<(), WriteError> {
        self.put(&v.to_be_bytes())
    }

    /// Append a big-endian `i64`.
    ///
    /// # Errors
    ///
    /// [`WriteError::CapacityExceeded`] if 8 bytes do not fit.
    pub fn write_i64(&mut self, v: i64) -> Result<(), WriteError> {
        self.put(&v.to_be_bytes())
    }

    /// Append a big-endian `f32`, bit-for-bit.
    ///
    /// # Errors
    ///
    /// [`WriteError::CapacityExceeded`] if 4 bytes do not fit.
    pub fn write_f32(&mut self, v: f32) -> Result<(), WriteError> {
        self.put(&v.to_bits().to_be_bytes())
    }

    /// Append a big-endian `f64`, bit-for-bit.
    ///
    /// # Errors
    ///
    /// [`WriteError::CapacityExceeded`] if 8 bytes do not fit.
    pub fn write_f64(&mut self, v: f64) -> Result<(), WriteError> {
        self.put(&v.to_bits().to_be_bytes())
    }

    /// Append raw bytes.
    ///
    /// # Errors
    ///
    /// [`WriteError::CapacityExceeded`] if `bytes` does not fit; nothing is
    /// written.
    pub fn write_all(&mut self, bytes: &[u8]) -> Result<(), WriteError> {
        self.put(bytes)
    }

    /// Append `[u16 big-endian byte length][modified UTF-8 bytes]`.
    ///
    /// The encoded length is measured in one forward pass before anything is
    /// emitted, encoding into the scratch region along the way so short
    /// strings are not walked twice. Both failure checks happen before the
    /// buffer is touched.
    ///
    /// # Errors
    ///
    /// [`WriteError::StringTooLong`] if the encoded form exceeds 65535
    /// bytes, [`WriteError::CapacityExceeded`] if the prefix plus encoded
    /// bytes do not fit.
    pub fn write_string(&mut self, text: &str) -> Result<(), WriteError> {
        let mut scratch_len = 0usize;
        let mut buffered_units = 0usize;
        let mut overflow = None;
        let mut units = text.encode_utf16();
        for unit in &mut units {
            let (bytes, len) = mutf8::encode_unit(unit);
            if scratch_len + len > self.scratch.len() {
                overflow = Some(unit);
                break;
            }
            self.scratch[scratch_len..scratch_len + len].copy_from_slice(&bytes[..len]);
            scratch_len += len;
            buffered_units += 1;
        }

        let mut total = scratch_len;
        if let Some(unit) = overflow {
            total += mutf8::unit_len(unit);
            for unit in units {
                total += mutf8::unit_len(unit);
            }
        }
        if total > usize::from(u16::MAX) {
            return Err(WriteError::StringTooLong { len: total });
        }
        self.ensure(2 + total)?;

        self.buf[self.pos..self.pos + 2].copy_from_slice(&(total as u16).to_be_bytes());
        self.pos += 2;
        self.buf[self.pos..self.pos + scratch_len].copy_from_slice(&self.scratch[..scratch_len]);
        self.pos += scratch_len;
        if overflow.is_some() {
            for unit in text.encode_utf16().skip(buffered_units) {
                let (bytes, len) = mutf8::encode_unit(unit);
                self.buf[self.pos..self.pos + len].copy_from_slice(&bytes[..len]);
                self.pos += len;
            }
        }
        Ok(())
    }

    /// Pull from `source` directly into the buffer tail, with no
    /// intermediate copy, until the source reports end of input. Returns the
    /// number of bytes transferred.
    ///
    /// # Errors
    ///
    /// [`WriteError::CapacityExceeded`] if the buffer fills up before the
    /// source is exhausted. A source that ends exactly as the buffer fills
    /// still fails - there is no room left to observe its end - so callers
    /// size the buffer with headroom. Bytes transferred before the failure
    /// remain in the buffer and `position` reflects them.
    pub fn write_fully_from_source<S: ByteSource>(
        &mut self,
        source: &mut S,
    ) -> Result<usize, WriteError> {
        let mut transferred = 0;
        loop {
            if self.pos >= self.buf.len() {
                return Err(WriteError::CapacityExceeded {
                    needed: 1,
                    available: 0,
                });
            }
            let read = source.read(&mut self.buf[self.pos..]);
            if read == 0 {
                return Ok(transferred);
            }
            self.pos += read;
            transferred += read;
        }
    }

    /// The filled prefix of the buffer, for zero-copy handoff.
    #[must_use]
    pub fn filled(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    /// The whole backing buffer, for callers that patch previously-written
    /// bytes in place.
    #[must_use]
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    /// Current write position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move the write cursor, typically back to patch a length field and
    /// then forward again.
    ///
    /// # Errors
    ///
    /// [`WriteError::CapacityExceeded`] if `position` exceeds the capacity.
    pub fn set_position(&mut self, position: usize) -> Result<(), WriteError> {
        if position > self.buf.len() {
            return Err(WriteError::CapacityExceeded {
                needed: position,
                available: self.buf.len(),
            });
        }
        self.pos = position;
        Ok(())
    }

    /// Buffer capacity, fixed at construction.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Reset the cursor for reuse. The backing buffer is kept, never
    /// reallocated.
    pub fn clear(&mut self) {
        self.pos = 0;
    }
}

impl Default for DataWriter {
    fn default() -> Self {
        Self::new()
    }
}

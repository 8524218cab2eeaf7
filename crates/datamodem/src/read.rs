//! The read-capability interface shared by both reader types.
//!
//! [`StreamReader`](crate::StreamReader) and
//! [`SliceReader`](crate::SliceReader) implement the same contract with
//! deliberately separate internals: one refills from an upstream source, the
//! other never needs to. The provided methods here are only the pure bit
//! reinterpretations; everything that touches a buffer is required, so
//! neither reader inherits the other's access pattern.

#![expect(clippy::cast_possible_wrap, clippy::cast_sign_loss)]

use alloc::string::String;

use crate::ReadError;

/// Decoding reads over a byte stream: fixed-width big-endian values and
/// length-prefixed modified UTF-8 strings.
///
/// Raising and non-raising reads come in pairs ([`read_u8`] and
/// [`read_byte`], [`read_exact`] and [`read_into`]); each pair is
/// behaviorally identical except for how exhaustion is signaled, so hot loops
/// that check for exhaustion themselves can use the sentinel variant.
///
/// [`read_u8`]: DataRead::read_u8
/// [`read_byte`]: DataRead::read_byte
/// [`read_exact`]: DataRead::read_exact
/// [`read_into`]: DataRead::read_into
pub trait DataRead {
    /// Read one byte.
    ///
    /// # Errors
    ///
    /// [`ReadError::EndOfStream`] if the input is exhausted.
    fn read_u8(&mut self) -> Result<u8, ReadError>;

    /// Read one byte, or `None` if the input is exhausted.
    fn read_byte(&mut self) -> Option<u8>;

    /// Read a big-endian `u16`.
    ///
    /// # Errors
    ///
    /// [`ReadError::EndOfStream`] if fewer than 2 bytes remain.
    fn read_u16(&mut self) -> Result<u16, ReadError>;

    /// Read a big-endian `i32`.
    ///
    /// # Errors
    ///
    /// [`ReadError::EndOfStream`] if fewer than 4 bytes remain.
    fn read_i32(&mut self) -> Result<i32, ReadError>;

    /// Read a big-endian `i64`.
    ///
    /// # Errors
    ///
    /// [`ReadError::EndOfStream`] if fewer than 8 bytes remain.
    fn read_i64(&mut self) -> Result<i64, ReadError>;

    /// Fill `buf` completely.
    ///
    /// # Errors
    ///
    /// [`ReadError::EndOfStream`] if the input ends first; how much of `buf`
    /// was overwritten by then is unspecified.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), ReadError>;

    /// Read up to `buf.len()` bytes, returning how many were read. `0` means
    /// the input is exhausted (or `buf` is empty).
    fn read_into(&mut self, buf: &mut [u8]) -> usize;

    /// Read a `[u16 big-endian byte length][modified UTF-8 bytes]` string.
    ///
    /// The length counts encoded bytes, not characters; the decoded text has
    /// at most that many characters.
    ///
    /// # Errors
    ///
    /// [`ReadError::EndOfStream`] if the length prefix itself cannot be read,
    /// [`ReadError::TruncatedString`] if the input or the declared length
    /// ends inside a multi-byte sequence, [`ReadError::MalformedString`] for
    /// invalid encoded bytes.
    fn read_string(&mut self) -> Result<String, ReadError>;

    /// Advance past up to `n` bytes, returning how many were actually
    /// skipped (less than `n` only at end of input).
    fn skip(&mut self, n: usize) -> usize;

    /// Capture the current position for a later [`reset`](DataRead::reset).
    ///
    /// # Errors
    ///
    /// [`ReadError::MarkUnsupported`] on readers that cannot revisit input.
    fn mark(&mut self) -> Result<(), ReadError>;

    /// Return to the position captured by [`mark`](DataRead::mark).
    ///
    /// # Errors
    ///
    /// [`ReadError::NoMarkSet`] if no mark was captured since the reader was
    /// last bound, [`ReadError::MarkUnsupported`] on readers that cannot
    /// revisit input.
    fn reset(&mut self) -> Result<(), ReadError>;

    /// Read one byte as an `i8`.
    ///
    /// # Errors
    ///
    /// [`ReadError::EndOfStream`] if the input is exhausted.
    fn read_i8(&mut self) -> Result<i8, ReadError> {
        Ok(self.read_u8()? as i8)
    }

    /// Read one byte as a `bool`; any nonzero byte is `true`.
    ///
    /// # Errors
    ///
    /// [`ReadError::EndOfStream`] if the input is exhausted.
    fn read_bool(&mut self) -> Result<bool, ReadError> {
        Ok(self.read_u8()? != 0)
    }

    /// Read a big-endian `i16`.
    ///
    /// # Errors
    ///
    /// [`ReadError::EndOfStream`] if fewer than 2 bytes remain.
    fn read_i16(&mut self) -> Result<i16, ReadError> {
        Ok(self.read_u16()? as i16)
    }

    /// Read a big-endian `f32`, bit-for-bit.
    ///
    /// # Errors
    ///
    /// [`ReadError::EndOfStream`] if fewer than 4 bytes remain.
    fn read_f32(&mut self) -> Result<f32, ReadError> {
        Ok(f32::from_bits(self.read_i32()? as u32))
    }

    /// Read a big-endian `f64`, bit-for-bit.
    ///
    /// # Errors
    ///
    /// [`ReadError::EndOfStream`] if fewer than 8 bytes remain.
    fn read_f64(&mut self) -> Result<f64, ReadError> {
        Ok(f64::from_bits(self.read_i64()? as u64))
    }
}

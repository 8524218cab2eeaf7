//! Buffered reader over an upstream byte source.
//!
//! The buffer is allocated once at construction and never resized; reuse
//! across messages is a matter of rebinding ([`set_source`], [`set_bytes`]),
//! which only resets cursors. Refills pull a deliberately small read-ahead
//! chunk rather than a full buffer, so the first read after a rebind does not
//! stall on a large upstream pull; [`set_read_limit`] widens or narrows the
//! next fill window when the caller knows where a record boundary lies.
//!
//! String decoding is the delicate part: a refill may land in the middle of a
//! multi-byte sequence, so the decode loop fetches every byte through the
//! refill-aware path and resumes mid-sequence as if the buffer boundary were
//! not there.
//!
//! [`set_source`]: StreamReader::set_source
//! [`set_bytes`]: StreamReader::set_bytes
//! [`set_read_limit`]: StreamReader::set_read_limit

use alloc::{boxed::Box, string::String, vec};

use crate::{ByteSource, DataRead, ReadError, mutf8};

/// Default refill chunk size.
const DEFAULT_READ_AHEAD: usize = 4 * 1024;

/// Default buffer capacity.
const DEFAULT_CAPACITY: usize = 32 * 1024;

/// A reusable buffered reader that decodes from a [`ByteSource`].
///
/// All reads are blocking and run on the calling thread; one instance belongs
/// to one logical owner at a time.
pub struct StreamReader<S> {
    source: S,
    buf: Box<[u8]>,
    pos: usize,
    filled: usize,
    read_ahead: usize,
    read_limit: Option<usize>,
    /// After `set_bytes`, the payload lives in the buffer and the parked
    /// source must not be touched until `set_source` rebinds it.
    detached: bool,
}

impl<S: ByteSource> StreamReader<S> {
    /// Create a reader with the default read-ahead (4 KiB) and capacity
    /// (32 KiB).
    pub fn new(source: S) -> Self {
        Self::with_capacity(source, DEFAULT_READ_AHEAD, DEFAULT_CAPACITY)
    }

    /// Create a reader with explicit buffer sizing.
    ///
    /// `read_ahead` bounds how much one default refill pulls from the source;
    /// keeping it below `capacity` bounds first-read latency after a rebind.
    ///
    /// # Panics
    ///
    /// If `read_ahead` is zero or exceeds `capacity`.
    pub fn with_capacity(source: S, read_ahead: usize, capacity: usize) -> Self {
        assert!(
            read_ahead >= 1 && read_ahead <= capacity,
            "read_ahead must be in 1..=capacity"
        );
        Self {
            source,
            buf: vec![0; capacity].into_boxed_slice(),
            pos: 0,
            filled: 0,
            read_ahead,
            read_limit: None,
            detached: false,
        }
    }

    /// Rebind the reader to a new source, discarding all buffered state.
    pub fn set_source(&mut self, source: S) {
        self.source = source;
        self.pos = 0;
        self.filled = 0;
        self.read_limit = None;
        self.detached = false;
    }

    /// Rebind the reader to a resident payload by copying it into the owned
    /// buffer. The previous source stays parked and is not read again until
    /// [`set_source`](StreamReader::set_source) replaces it.
    ///
    /// # Errors
    ///
    /// [`ReadError::SliceTooLarge`] if `bytes` exceeds the buffer capacity;
    /// payloads of any size belong in [`SliceReader`](crate::SliceReader),
    /// which reads them in place.
    pub fn set_bytes(&mut self, bytes: &[u8]) -> Result<(), ReadError> {
        if bytes.len() > self.buf.len() {
            return Err(ReadError::SliceTooLarge {
                len: bytes.len(),
                capacity: self.buf.len(),
            });
        }
        self.buf[..bytes.len()].copy_from_slice(bytes);
        self.pos = 0;
        self.filled = bytes.len();
        self.read_limit = None;
        self.detached = true;
        Ok(())
    }

    /// Budget the bytes the next refill cycle may pull from the source.
    ///
    /// While a limit is installed, a refill pulls up to `min(limit,
    /// capacity)` bytes - which may exceed the default read-ahead - and the
    /// limit shrinks by what was actually read. At zero the limit clears
    /// itself and refills revert to the default read-ahead.
    pub fn set_read_limit(&mut self, limit: usize) {
        self.read_limit = Some(limit);
    }

    /// Shared reference to the upstream source.
    pub fn get_ref(&self) -> &S {
        &self.source
    }

    /// Consume the reader, returning the upstream source. Buffered bytes not
    /// yet consumed are discarded.
    pub fn into_inner(self) -> S {
        self.source
    }

    fn fill(&mut self) {
        self.pos = 0;
        if self.detached {
            self.filled = 0;
            return;
        }
        let want = match self.read_limit {
            Some(limit) => limit.min(self.buf.len()),
            None => self.read_ahead,
        };
        let read = if want == 0 {
            0
        } else {
            self.source.read(&mut self.buf[..want])
        };
        if let Some(limit) = self.read_limit {
            let rest = limit - read;
            self.read_limit = if rest == 0 { None } else { Some(rest) };
        }
        self.filled = read;
    }

    /// Next byte, refilling once if the buffer is spent.
    #[inline]
    fn next_byte(&mut self) -> Option<u8> {
        if self.pos >= self.filled {
            self.fill();
            if self.pos >= self.filled {
                return None;
            }
        }
        let b = self.buf[self.pos];
        self.pos += 1;
        Some(b)
    }

    /// One pass of a bulk read: buffered bytes if any, otherwise either a
    /// direct source read (for requests at least as large as the buffer,
    /// avoiding the double copy) or a refill. Returns `0` at end of input.
    fn read_chunk(&mut self, buf: &mut [u8]) -> usize {
        if self.pos >= self.filled {
            if self.detached {
                return 0;
            }
            if buf.len() >= self.buf.len() {
                return self.source.read(buf);
            }
            self.fill();
            if self.pos >= self.filled {
                return 0;
            }
        }
        let amount = (self.filled - self.pos).min(buf.len());
        buf[..amount].copy_from_slice(&self.buf[self.pos..self.pos + amount]);
        self.pos += amount;
        amount
    }
}

impl<S: ByteSource> DataRead for StreamReader<S> {
    fn read_u8(&mut self) -> Result<u8, ReadError> {
        self.next_byte().ok_or(ReadError::EndOfStream)
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.next_byte()
    }

    fn read_u16(&mut self) -> Result<u16, ReadError> {
        if self.filled - self.pos >= 2 {
            let v = u16::from_be_bytes([self.buf[self.pos], self.buf[self.pos + 1]]);
            self.pos += 2;
            return Ok(v);
        }
        let hi = self.next_byte().ok_or(ReadError::EndOfStream)?;
        let lo = self.next_byte().ok_or(ReadError::EndOfStream)?;
        Ok(u16::from_be_bytes([hi, lo]))
    }

    fn read_i32(&mut self) -> Result<i32, ReadError> {
        let mut raw = [0u8; 4];
        if self.filled - self.pos >= 4 {
            raw.copy_from_slice(&self.buf[self.pos..self.pos + 4]);
            self.pos += 4;
            return Ok(i32::from_be_bytes(raw));
        }
        for slot in &mut raw {
            *slot = self.next_byte().ok_or(ReadError::EndOfStream)?;
        }
        Ok(i32::from_be_bytes(raw))
    }

    fn read_i64(&mut self) -> Result<i64, ReadError> {
        let mut raw = [0u8; 8];
        if self.filled - self.pos >= 8 {
            raw.copy_from_slice(&self.buf[self.pos..self.pos + 8]);
            self.pos += 8;
            return Ok(i64::from_be_bytes(raw));
        }
        for slot in &mut raw {
            *slot = self.next_byte().ok_or(ReadError::EndOfStream)?;
        }
        Ok(i64::from_be_bytes(raw))
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), ReadError> {
        let len = buf.len();
        if self.filled - self.pos >= len {
            buf.copy_from_slice(&self.buf[self.pos..self.pos + len]);
            self.pos += len;
            return Ok(());
        }
        let mut n = 0;
        while n < len {
            let read = self.read_chunk(&mut buf[n..]);
            if read == 0 {
                return Err(ReadError::EndOfStream);
            }
            n += read;
        }
        Ok(())
    }

    fn read_into(&mut self, buf: &mut [u8]) -> usize {
        if buf.is_empty() {
            return 0;
        }
        self.read_chunk(buf)
    }

    fn read_string(&mut self) -> Result<String, ReadError> {
        let encoded_len = usize::from(self.read_u16()?);
        let mut out = String::with_capacity(encoded_len);
        let mut units = mutf8::UnitAccumulator::default();
        let mut consumed = 0;
        // Every byte goes through `next_byte` so a refill can land between a
        // lead byte and its continuations without disturbing the decode.
        while consumed < encoded_len {
            let at = consumed;
            let lead = self.next_byte().ok_or(ReadError::TruncatedString)?;
            if lead & 0x80 == 0 {
                consumed += 1;
                units.push(u16::from(lead), at, &mut out)?;
                continue;
            }
            if lead & 0xE0 == 0xC0 {
                if consumed + 2 > encoded_len {
                    return Err(ReadError::TruncatedString);
                }
                let c2 = self.next_byte().ok_or(ReadError::TruncatedString)?;
                if c2 & 0xC0 != 0x80 {
                    return Err(ReadError::MalformedString { offset: at + 1 });
                }
                consumed += 2;
                units.push(
                    (u16::from(lead & 0x1F) << 6) | u16::from(c2 & 0x3F),
                    at,
                    &mut out,
                )?;
                continue;
            }
            if lead & 0xF0 == 0xE0 {
                if consumed + 3 > encoded_len {
                    return Err(ReadError::TruncatedString);
                }
                let c2 = self.next_byte().ok_or(ReadError::TruncatedString)?;
                let c3 = self.next_byte().ok_or(ReadError::TruncatedString)?;
                if c2 & 0xC0 != 0x80 {
                    return Err(ReadError::MalformedString { offset: at + 1 });
                }
                if c3 & 0xC0 != 0x80 {
                    return Err(ReadError::MalformedString { offset: at + 2 });
                }
                consumed += 3;
                let unit = (u16::from(lead & 0x0F) << 12)
                    | (u16::from(c2 & 0x3F) << 6)
                    | u16::from(c3 & 0x3F);
                units.push(unit, at, &mut out)?;
                continue;
            }
            return Err(ReadError::MalformedString { offset: at });
        }
        units.finish()?;
        Ok(out)
    }

    fn skip(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        let avail = self.filled - self.pos;
        if avail >= n {
            self.pos += n;
            return n;
        }
        self.pos = 0;
        self.filled = 0;
        if self.detached {
            return avail;
        }
        avail + self.source.skip(n - avail)
    }

    fn mark(&mut self) -> Result<(), ReadError> {
        Err(ReadError::MarkUnsupported)
    }

    fn reset(&mut self) -> Result<(), ReadError> {
        Err(ReadError::MarkUnsupported)
    }
}

//! Upstream byte producers.
//!
//! A [`ByteSource`] is the single seam between the readers and whatever
//! transport feeds them. It is deliberately tiny: produce up to `buf.len()`
//! bytes, or report exhaustion by producing none. Resource release belongs to
//! the source's own `Drop`; the readers never manage it.

/// A blocking producer of bytes.
///
/// The contract has no error channel: a source either hands over bytes or is
/// done. Transports that can fail surface their failures on their own side of
/// this seam, typically by reporting exhaustion here and keeping the cause.
pub trait ByteSource {
    /// Read up to `buf.len()` bytes into `buf`, returning how many were
    /// produced. `0` means the source is exhausted; it is never a transient
    /// answer for a non-empty `buf`.
    fn read(&mut self, buf: &mut [u8]) -> usize;

    /// Discard up to `n` bytes, returning how many were actually discarded.
    ///
    /// The default pulls the bytes through a small stack scratch; sources
    /// with a cheaper way to seek should override it.
    fn skip(&mut self, n: usize) -> usize {
        let mut scratch = [0u8; 64];
        let mut skipped = 0;
        while skipped < n {
            let want = (n - skipped).min(scratch.len());
            let read = self.read(&mut scratch[..want]);
            if read == 0 {
                break;
            }
            skipped += read;
        }
        skipped
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        (**self).read(buf)
    }

    fn skip(&mut self, n: usize) -> usize {
        (**self).skip(n)
    }
}

/// The minimal pass-through source: consumes a slice from the front.
impl ByteSource for &[u8] {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        let n = self.len().min(buf.len());
        let (head, tail) = self.split_at(n);
        buf[..n].copy_from_slice(head);
        *self = tail;
        n
    }

    fn skip(&mut self, n: usize) -> usize {
        let n = n.min(self.len());
        *self = &self[n..];
        n
    }
}

use thiserror::Error;

/// Errors produced by the readers and by the decode half of the codec.
///
/// All failures are detected synchronously at the call that hit them; nothing
/// is retried internally. Retry policy, if any, belongs to the caller.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadError {
    /// A fixed-width or exact read could not be satisfied before the input
    /// ended.
    #[error("unexpected end of input")]
    EndOfStream,

    /// An encoded string ran out of input, or out of its declared byte
    /// length, in the middle of a multi-byte sequence.
    #[error("truncated string: input ended inside a multi-byte sequence")]
    TruncatedString,

    /// A lead or continuation byte had an invalid bit pattern, or a decoded
    /// surrogate had no partner.
    #[error("malformed string around byte {offset}")]
    MalformedString {
        /// Byte offset within the encoded run.
        offset: usize,
    },

    /// `reset` was called with no prior `mark`.
    #[error("no mark set")]
    NoMarkSet,

    /// `mark`/`reset` on a reader that does not support them.
    #[error("mark/reset not supported by this reader")]
    MarkUnsupported,

    /// A payload handed to `set_bytes` does not fit the reader's buffer.
    #[error("slice of {len} bytes exceeds buffer capacity {capacity}")]
    SliceTooLarge {
        /// Length of the rejected payload.
        len: usize,
        /// Fixed capacity of the reader's buffer.
        capacity: usize,
    },
}

/// Errors produced by the writer and by the encode half of the codec.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteError {
    /// The fixed-capacity buffer cannot hold the write. The buffer is never
    /// grown and never silently truncated; nothing was written.
    #[error("buffer capacity exceeded: need {needed} bytes, {available} available")]
    CapacityExceeded {
        /// Bytes the operation needed.
        needed: usize,
        /// Bytes left before the capacity limit.
        available: usize,
    },

    /// The string's encoded form does not fit the 16-bit length prefix.
    #[error("encoded string too long: {len} bytes")]
    StringTooLong {
        /// Encoded byte length that was computed.
        len: usize,
    },
}

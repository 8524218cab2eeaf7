//! Reusable, allocation-minimizing binary readers and writers.
//!
//! This crate is the byte layer underneath a message protocol: fixed-width
//! big-endian numbers and length-prefixed modified UTF-8 strings, decoded
//! from and encoded into fixed-capacity buffers that are allocated once and
//! rebound between messages. Nothing here allocates per call except the
//! `String` a decode necessarily returns.
//!
//! Three components, none depending on the others:
//!
//! - [`StreamReader`] wraps an upstream [`ByteSource`] with an owned buffer
//!   and refills across reads; a multi-byte string sequence may straddle two
//!   refills and decoding resumes mid-sequence.
//! - [`SliceReader`] reads the same formats from a resident byte slice, with
//!   `mark`/`reset`.
//! - [`DataWriter`] encodes into an owned fixed-capacity buffer exposed for
//!   zero-copy handoff; overflow is an error, never a reallocation.
//!
//! Both readers implement [`DataRead`]. The [`mutf8`] module holds the codec
//! itself, including the zero-terminated variant used when strings are
//! embedded without a length prefix.
//!
//! Instances are single-owner: reads and writes are blocking, run to
//! completion on the calling thread, and nothing is synchronized. Pool the
//! instances and hand them out one use at a time.
//!
//! ```
//! use datamodem::{DataRead, DataWriter, SliceReader};
//!
//! let mut writer = DataWriter::new();
//! writer.write_i32(7)?;
//! writer.write_string("h\u{E9}llo")?;
//!
//! let mut reader = SliceReader::new(writer.filled());
//! assert_eq!(reader.read_i32()?, 7);
//! assert_eq!(reader.read_string()?, "h\u{E9}llo");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
pub mod mutf8;
mod read;
mod slice;
mod source;
mod stream;
mod writer;

#[cfg(test)]
mod tests;

pub use error::{ReadError, WriteError};
pub use read::DataRead;
pub use slice::SliceReader;
pub use source::ByteSource;
pub use stream::StreamReader;
pub use writer::DataWriter;

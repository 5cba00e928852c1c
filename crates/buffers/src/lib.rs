//! Byte buffers backing the json-witness token streams.
//!
//! - [`Writer`] accumulates encoded JSON text and hands it back on flush.
//! - [`Reader`] is a bounds-checked cursor over input bytes.

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    #[error("end of buffer")]
    EndOfBuffer,
    #[error("invalid UTF-8 at offset {0}")]
    InvalidUtf8(usize),
}

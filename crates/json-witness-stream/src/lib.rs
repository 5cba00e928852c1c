//! Token streams for the json-witness codecs.
//!
//! Witnesses never touch JSON text directly. They talk to a [`TokenSink`]
//! when writing and a [`TokenSource`] when reading:
//!
//! - [`JsonWriter`] renders tokens as compact JSON text.
//! - [`JsonReader`] is a pull cursor that lexes JSON text one token at a time.
//! - [`TokenLog`] records tokens, and [`TokenReplay`] reads them back.
//!
//! # Example
//!
//! ```
//! use json_witness_stream::{JsonReader, JsonWriter, Structure, TokenKind, TokenSink, TokenSource};
//!
//! let mut writer = JsonWriter::new();
//! writer.write_start(Structure::Array).unwrap();
//! writer.write_i64(1).unwrap();
//! writer.write_str("two").unwrap();
//! writer.write_end(Structure::Array).unwrap();
//! let text = writer.into_string().unwrap();
//! assert_eq!(text, r#"[1,"two"]"#);
//!
//! let mut reader = JsonReader::new(text.as_bytes());
//! assert_eq!(reader.advance().unwrap(), TokenKind::ArrayStart);
//! assert_eq!(reader.advance().unwrap(), TokenKind::Number);
//! assert_eq!(reader.as_i64().unwrap(), 1);
//! ```

mod error;
mod number;
mod reader;
mod sink;
mod source;
mod token;
mod writer;

pub use error::StreamError;
pub use number::format_f64;
pub use reader::{JsonReader, DEFAULT_MAX_DEPTH};
pub use sink::{TokenLog, TokenSink};
pub use source::{TokenReplay, TokenSource};
pub use token::{DuplicateKeys, Structure, Token, TokenKind};
pub use writer::JsonWriter;

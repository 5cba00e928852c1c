//! The witness contract.

use json_witness_stream::{TokenKind, TokenSink, TokenSource};

use crate::Result;

/// Statically selected read/write codec for one logical type.
///
/// Witnesses carry no state and are never instantiated; they are named only
/// as type parameters. Combinators such as [`crate::SeqOf`] take their
/// component witnesses as type parameters too, so the shape of a witness type
/// mirrors the shape of the value it encodes and mismatches are compile
/// errors.
///
/// Cursor convention for [`Witness::read`]: the source is positioned on the
/// first token of the value when the call begins, and on the token right
/// after the value when it returns.
pub trait Witness {
    type Value;

    fn write<S: TokenSink + ?Sized>(sink: &mut S, value: &Self::Value) -> Result<()>;

    fn read<R: TokenSource + ?Sized>(source: &mut R) -> Result<Self::Value>;
}

/// Witnesses for reference-like values that may be encoded as JSON `null`.
///
/// Implemented by strings, sequences, mappings and records. Pairs do not
/// implement it, so `OrNull<PairOf<..>>` is rejected at compile time.
pub trait Nullable: Witness {
    /// Writes `null` for `None`, the value otherwise.
    fn write_nullable<S: TokenSink + ?Sized>(
        sink: &mut S,
        value: Option<&Self::Value>,
    ) -> Result<()> {
        match value {
            None => Ok(sink.write_null()?),
            Some(value) => Self::write(sink, value),
        }
    }

    /// Consumes a `null` token as `None`, otherwise reads a value.
    fn read_nullable<R: TokenSource + ?Sized>(source: &mut R) -> Result<Option<Self::Value>> {
        if source.kind() == TokenKind::Null {
            source.advance()?;
            return Ok(None);
        }
        Self::read(source).map(Some)
    }
}

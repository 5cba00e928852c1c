//! Two-element tuples, encoded as a fixed-length JSON array.

use std::marker::PhantomData;

use json_witness_stream::{Structure, TokenKind, TokenSink, TokenSource};

use crate::{Result, Witness};

/// Witness for `(A, B)` given witnesses for `A` and `B`.
///
/// `(x, y)` is written as `[x, y]`. A pair is always present: reading `null`
/// fails as malformed input. Use `OrDefault<PairOf<A, B>>` to read `null` as
/// the default pair instead.
pub struct PairOf<A, B>(PhantomData<fn() -> (A, B)>);

impl<A: Witness, B: Witness> Witness for PairOf<A, B> {
    type Value = (A::Value, B::Value);

    fn write<S: TokenSink + ?Sized>(sink: &mut S, value: &Self::Value) -> Result<()> {
        sink.write_start(Structure::Array)?;
        A::write(sink, &value.0)?;
        B::write(sink, &value.1)?;
        sink.write_end(Structure::Array)?;
        Ok(())
    }

    fn read<R: TokenSource + ?Sized>(source: &mut R) -> Result<Self::Value> {
        source.expect(TokenKind::ArrayStart)?;
        source.advance()?;
        let first = A::read(source)?;
        let second = B::read(source)?;
        source.expect(TokenKind::ArrayEnd)?;
        source.advance()?;
        Ok((first, second))
    }
}

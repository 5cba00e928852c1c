//! Sequence combinators, encoded as JSON arrays.

use std::marker::PhantomData;

use json_witness_stream::{Structure, TokenKind, TokenSink, TokenSource};
use tracing::trace;

use crate::{Nullable, Result, Witness};

/// Witness for `Vec<T>` given a witness `W` for `T`.
///
/// Element order is preserved in both directions; `[]` reads as an empty
/// vector. Wrap in [`crate::OrNull`] to encode an absent sequence as `null`.
pub struct SeqOf<W>(PhantomData<fn() -> W>);

/// Witness for `Box<[T]>`. Same wire format as [`SeqOf`].
pub struct SliceOf<W>(PhantomData<fn() -> W>);

pub(crate) fn write_items<'v, W, S, I>(sink: &mut S, items: I) -> Result<()>
where
    W: Witness,
    W::Value: 'v,
    S: TokenSink + ?Sized,
    I: IntoIterator<Item = &'v W::Value>,
{
    sink.write_start(Structure::Array)?;
    for item in items {
        W::write(sink, item)?;
    }
    sink.write_end(Structure::Array)?;
    Ok(())
}

pub(crate) fn read_items<W, R>(source: &mut R) -> Result<Vec<W::Value>>
where
    W: Witness,
    R: TokenSource + ?Sized,
{
    source.expect(TokenKind::ArrayStart)?;
    trace!(offset = source.position(), "read sequence");
    source.advance()?;
    let mut items = Vec::new();
    while source.kind() != TokenKind::ArrayEnd {
        items.push(W::read(source)?);
    }
    source.advance()?;
    Ok(items)
}

impl<W: Witness> Witness for SeqOf<W> {
    type Value = Vec<W::Value>;

    fn write<S: TokenSink + ?Sized>(sink: &mut S, value: &Self::Value) -> Result<()> {
        trace!(len = value.len(), "write sequence");
        write_items::<W, _, _>(sink, value)
    }

    fn read<R: TokenSource + ?Sized>(source: &mut R) -> Result<Self::Value> {
        read_items::<W, _>(source)
    }
}

impl<W: Witness> Nullable for SeqOf<W> {}

impl<W: Witness> Witness for SliceOf<W> {
    type Value = Box<[W::Value]>;

    fn write<S: TokenSink + ?Sized>(sink: &mut S, value: &Self::Value) -> Result<()> {
        trace!(len = value.len(), "write sequence");
        write_items::<W, _, _>(sink, value.iter())
    }

    fn read<R: TokenSource + ?Sized>(source: &mut R) -> Result<Self::Value> {
        read_items::<W, _>(source).map(Vec::into_boxed_slice)
    }
}

impl<W: Witness> Nullable for SliceOf<W> {}

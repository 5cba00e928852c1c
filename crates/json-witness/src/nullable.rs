//! Null-handling adapters.

use std::marker::PhantomData;

use json_witness_stream::{TokenKind, TokenSink, TokenSource};

use crate::{Nullable, Result, Witness};

/// Witness for `Option<T>`: `None` is encoded as `null`.
///
/// Only available for [`Nullable`] witnesses, so an absent value is always
/// distinguishable from an empty collection: `None` is `null`, `Some(vec![])`
/// is `[]`.
pub struct OrNull<W>(PhantomData<fn() -> W>);

impl<W: Nullable> Witness for OrNull<W> {
    type Value = Option<W::Value>;

    fn write<S: TokenSink + ?Sized>(sink: &mut S, value: &Self::Value) -> Result<()> {
        W::write_nullable(sink, value.as_ref())
    }

    fn read<R: TokenSource + ?Sized>(source: &mut R) -> Result<Self::Value> {
        W::read_nullable(source)
    }
}

/// Reads `null` as `T::default()`; writes through to `W`.
pub struct OrDefault<W>(PhantomData<fn() -> W>);

impl<W> Witness for OrDefault<W>
where
    W: Witness,
    W::Value: Default,
{
    type Value = W::Value;

    fn write<S: TokenSink + ?Sized>(sink: &mut S, value: &Self::Value) -> Result<()> {
        W::write(sink, value)
    }

    fn read<R: TokenSource + ?Sized>(source: &mut R) -> Result<Self::Value> {
        if source.kind() == TokenKind::Null {
            source.advance()?;
            return Ok(W::Value::default());
        }
        W::read(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SeqOf, Str, I32};
    use json_witness_stream::{JsonReader, JsonWriter};

    fn write<W: Witness>(value: &W::Value) -> String {
        let mut sink = JsonWriter::new();
        W::write(&mut sink, value).unwrap();
        sink.into_string().unwrap()
    }

    fn read<W: Witness>(text: &str) -> Result<W::Value> {
        let mut source = JsonReader::new(text.as_bytes());
        source.advance()?;
        W::read(&mut source)
    }

    #[test]
    fn test_or_null_write() {
        assert_eq!(write::<OrNull<Str>>(&None), "null");
        assert_eq!(write::<OrNull<Str>>(&Some("a".into())), r#""a""#);
        assert_eq!(write::<OrNull<SeqOf<I32>>>(&Some(vec![])), "[]");
    }

    #[test]
    fn test_or_null_elements() {
        let value = vec![Some("a".to_string()), None];
        let text = write::<SeqOf<OrNull<Str>>>(&value);
        assert_eq!(text, r#"["a",null]"#);
        assert_eq!(read::<SeqOf<OrNull<Str>>>(&text), Ok(value));
    }

    #[test]
    fn test_or_default() {
        assert_eq!(read::<OrDefault<SeqOf<I32>>>("null"), Ok(vec![]));
        assert_eq!(read::<OrDefault<I32>>("null"), Ok(0));
        assert_eq!(read::<OrDefault<I32>>("5"), Ok(5));
        assert_eq!(write::<OrDefault<I32>>(&0), "0");
    }
}

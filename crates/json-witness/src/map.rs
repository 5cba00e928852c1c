//! String-keyed mapping combinators, encoded as JSON objects.
//!
//! Repeated keys within one object follow the source's
//! [`DuplicateKeys`] policy: rejected by default, or last value wins.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use indexmap::IndexMap;
use json_witness_stream::{DuplicateKeys, Structure, TokenKind, TokenSink, TokenSource};
use tracing::trace;

use crate::{Error, Nullable, Result, Witness};

/// Witness for `IndexMap<String, V>`: entries keep insertion order on write
/// and arrival order on read.
pub struct MapOf<W>(PhantomData<fn() -> W>);

/// Witness for `BTreeMap<String, V>`: entries are written in key order.
pub struct BTreeMapOf<W>(PhantomData<fn() -> W>);

fn write_entries<'v, W, S, I>(sink: &mut S, entries: I) -> Result<()>
where
    W: Witness,
    W::Value: 'v,
    S: TokenSink + ?Sized,
    I: IntoIterator<Item = (&'v String, &'v W::Value)>,
{
    sink.write_start(Structure::Object)?;
    for (key, value) in entries {
        sink.write_property_name(key)?;
        W::write(sink, value)?;
    }
    sink.write_end(Structure::Object)?;
    Ok(())
}

/// Map types a mapping witness can fill.
trait Entries<V> {
    fn contains(&self, key: &str) -> bool;
    fn put(&mut self, key: String, value: V);
}

impl<V> Entries<V> for IndexMap<String, V> {
    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn put(&mut self, key: String, value: V) {
        self.insert(key, value);
    }
}

impl<V> Entries<V> for BTreeMap<String, V> {
    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn put(&mut self, key: String, value: V) {
        self.insert(key, value);
    }
}

fn read_entries<W, R, M>(source: &mut R, map: &mut M) -> Result<()>
where
    W: Witness,
    R: TokenSource + ?Sized,
    M: Entries<W::Value>,
{
    source.expect(TokenKind::ObjectStart)?;
    trace!(offset = source.position(), "read mapping");
    source.advance()?;
    let policy = source.duplicate_keys();
    while source.kind() != TokenKind::ObjectEnd {
        let key = source.property_name()?.to_owned();
        if policy == DuplicateKeys::Reject && map.contains(&key) {
            return Err(Error::DuplicateKey(key));
        }
        source.advance()?;
        let value = W::read(source)?;
        map.put(key, value);
    }
    source.advance()?;
    Ok(())
}

impl<W: Witness> Witness for MapOf<W> {
    type Value = IndexMap<String, W::Value>;

    fn write<S: TokenSink + ?Sized>(sink: &mut S, value: &Self::Value) -> Result<()> {
        trace!(len = value.len(), "write mapping");
        write_entries::<W, _, _>(sink, value)
    }

    fn read<R: TokenSource + ?Sized>(source: &mut R) -> Result<Self::Value> {
        let mut map = IndexMap::new();
        read_entries::<W, _, _>(source, &mut map)?;
        Ok(map)
    }
}

impl<W: Witness> Nullable for MapOf<W> {}

impl<W: Witness> Witness for BTreeMapOf<W> {
    type Value = BTreeMap<String, W::Value>;

    fn write<S: TokenSink + ?Sized>(sink: &mut S, value: &Self::Value) -> Result<()> {
        trace!(len = value.len(), "write mapping");
        write_entries::<W, _, _>(sink, value)
    }

    fn read<R: TokenSource + ?Sized>(source: &mut R) -> Result<Self::Value> {
        let mut map = BTreeMap::new();
        read_entries::<W, _, _>(source, &mut map)?;
        Ok(map)
    }
}

impl<W: Witness> Nullable for BTreeMapOf<W> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OrNull, SeqOf, Str, I32};
    use json_witness_stream::{JsonReader, JsonWriter, TokenLog};

    fn reader(text: &str) -> JsonReader<'_> {
        let mut source = JsonReader::new(text.as_bytes());
        source.advance().unwrap();
        source
    }

    fn write<W: Witness>(value: &W::Value) -> String {
        let mut sink = JsonWriter::new();
        W::write(&mut sink, value).unwrap();
        sink.into_string().unwrap()
    }

    #[test]
    fn test_write_keeps_insertion_order() {
        let mut map = IndexMap::new();
        map.insert("z".to_string(), 1);
        map.insert("a".to_string(), 2);
        assert_eq!(write::<MapOf<I32>>(&map), r#"{"z":1,"a":2}"#);
    }

    #[test]
    fn test_btree_writes_sorted() {
        let mut map = BTreeMap::new();
        map.insert("z".to_string(), 1);
        map.insert("a".to_string(), 2);
        assert_eq!(write::<BTreeMapOf<I32>>(&map), r#"{"a":2,"z":1}"#);
    }

    #[test]
    fn test_read_keeps_arrival_order() {
        let map = MapOf::<SeqOf<I32>>::read(&mut reader(r#"{"b":[1],"a":[]}"#)).unwrap();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(map["b"], vec![1]);
        assert!(map["a"].is_empty());
    }

    #[test]
    fn test_empty_and_null() {
        assert_eq!(
            MapOf::<I32>::read(&mut reader("{}")),
            Ok(IndexMap::new())
        );
        assert_eq!(OrNull::<MapOf<I32>>::read(&mut reader("null")), Ok(None));
        assert_eq!(
            OrNull::<MapOf<I32>>::read(&mut reader("{}")),
            Ok(Some(IndexMap::new()))
        );
    }

    #[test]
    fn test_read_rejects_non_object() {
        assert!(matches!(
            MapOf::<I32>::read(&mut reader("[1]")),
            Err(Error::MalformedInput {
                expected: TokenKind::ObjectStart,
                found: TokenKind::ArrayStart,
                ..
            })
        ));
    }

    #[test]
    fn test_duplicate_keys_rejected_by_default() {
        assert_eq!(
            MapOf::<Str>::read(&mut reader(r#"{"k":"a","k":"b"}"#)),
            Err(Error::DuplicateKey("k".into()))
        );
        assert_eq!(
            BTreeMapOf::<Str>::read(&mut reader(r#"{"k":"a","k":"b"}"#)),
            Err(Error::DuplicateKey("k".into()))
        );
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let mut source = JsonReader::new(br#"{"k":1,"j":2,"k":3}"#)
            .with_duplicate_keys(DuplicateKeys::LastWins);
        source.advance().unwrap();
        let map = MapOf::<I32>::read(&mut source).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["k"], 3);
        assert_eq!(map.get_index(0), Some((&"k".to_string(), &3)));
    }

    #[test]
    fn test_replayed_duplicate_keys_follow_policy() {
        let mut log = TokenLog::new();
        log.write_start(Structure::Object).unwrap();
        for (key, value) in [("k", 1), ("j", 2), ("k", 3)] {
            log.write_property_name(key).unwrap();
            log.write_i64(value).unwrap();
        }
        log.write_end(Structure::Object).unwrap();

        let mut strict = log.replay();
        strict.advance().unwrap();
        assert_eq!(
            MapOf::<I32>::read(&mut strict),
            Err(Error::DuplicateKey("k".into()))
        );

        let mut lenient = log.replay().with_duplicate_keys(DuplicateKeys::LastWins);
        lenient.advance().unwrap();
        let map = MapOf::<I32>::read(&mut lenient).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["k"], 3);
        assert_eq!(lenient.kind(), TokenKind::End);
    }
}

//! Codec entry points: text in, value out and back.

use std::any::type_name;

use json_witness_stream::{
    DuplicateKeys, JsonReader, JsonWriter, TokenKind, TokenSink, TokenSource, DEFAULT_MAX_DEPTH,
};
use tracing::{debug, warn};

use crate::{Error, Result, Witness};

/// What [`Codec::deserialize`] does with input left after the top-level value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingInput {
    /// Stop after the top-level value; whatever follows is not examined.
    #[default]
    Ignore,
    /// Fail with [`Error::TrailingInput`].
    Reject,
}

/// Codec configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Maximum array/object nesting accepted on read.
    pub max_depth: usize,
    pub trailing: TrailingInput,
    /// Policy for repeated keys in mappings and records.
    pub duplicate_keys: DuplicateKeys,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            trailing: TrailingInput::Ignore,
            duplicate_keys: DuplicateKeys::Reject,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn trailing(mut self, trailing: TrailingInput) -> Self {
        self.trailing = trailing;
        self
    }

    pub fn duplicate_keys(mut self, policy: DuplicateKeys) -> Self {
        self.duplicate_keys = policy;
        self
    }
}

/// Serializes and deserializes values through their witnesses.
///
/// # Example
///
/// ```
/// use json_witness::{Codec, Error, Options, SeqOf, TrailingInput, I32};
///
/// let codec = Codec::new(Options::new().trailing(TrailingInput::Reject));
/// assert_eq!(codec.serialize::<SeqOf<I32>>(&vec![1, 2, 3]).unwrap(), "[1,2,3]");
/// assert_eq!(codec.deserialize::<SeqOf<I32>>("[1,2,3]").unwrap(), vec![1, 2, 3]);
/// assert!(matches!(
///     codec.deserialize::<SeqOf<I32>>("[1] [2]"),
///     Err(Error::TrailingInput { offset: 4 })
/// ));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Codec {
    options: Options,
}

impl Codec {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Encodes `value` as compact JSON text.
    pub fn serialize<W: Witness>(&self, value: &W::Value) -> Result<String> {
        let mut sink = JsonWriter::new();
        W::write(&mut sink, value)?;
        let text = sink.into_string()?;
        debug!(
            witness = type_name::<W>(),
            len = text.len(),
            "serialized value"
        );
        Ok(text)
    }

    /// Decodes one value from JSON text.
    pub fn deserialize<W: Witness>(&self, text: &str) -> Result<W::Value> {
        self.deserialize_slice::<W>(text.as_bytes())
    }

    /// Decodes one value from UTF-8 JSON bytes.
    pub fn deserialize_slice<W: Witness>(&self, input: &[u8]) -> Result<W::Value> {
        let mut source = JsonReader::new(input)
            .with_max_depth(self.options.max_depth)
            .with_duplicate_keys(self.options.duplicate_keys);
        let value = read_value::<W, _>(&mut source)?;
        if let Some(offset) = source.trailing() {
            match self.options.trailing {
                TrailingInput::Reject => return Err(Error::TrailingInput { offset }),
                TrailingInput::Ignore => warn!(offset, "ignoring input after top-level value"),
            }
        }
        debug!(
            witness = type_name::<W>(),
            len = input.len(),
            "deserialized value"
        );
        Ok(value)
    }
}

/// Encodes `value` with witness `W` using default options.
///
/// ```
/// use json_witness::{serialize, IndexMap, MapOf, I32};
///
/// let mut counts = IndexMap::new();
/// counts.insert("a".to_string(), 1);
/// assert_eq!(serialize::<MapOf<I32>>(&counts).unwrap(), r#"{"a":1}"#);
/// ```
pub fn serialize<W: Witness>(value: &W::Value) -> Result<String> {
    Codec::default().serialize::<W>(value)
}

/// Decodes a value with witness `W` using default options.
///
/// ```
/// use json_witness::{deserialize, PairOf, Str, I32};
///
/// let pair = deserialize::<PairOf<Str, I32>>(r#"["a", 1]"#).unwrap();
/// assert_eq!(pair, ("a".to_string(), 1));
/// ```
pub fn deserialize<W: Witness>(text: &str) -> Result<W::Value> {
    Codec::default().deserialize::<W>(text)
}

/// Writes one top-level value to any sink.
pub fn write_value<W, S>(sink: &mut S, value: &W::Value) -> Result<()>
where
    W: Witness,
    S: TokenSink + ?Sized,
{
    W::write(sink, value)
}

/// Reads one top-level value from any source, first moving a fresh source
/// onto its first token.
pub fn read_value<W, R>(source: &mut R) -> Result<W::Value>
where
    W: Witness,
    R: TokenSource + ?Sized,
{
    if source.kind() == TokenKind::None {
        source.advance()?;
    }
    W::read(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::{StreamError, TokenLog};
    use crate::{MapOf, SeqOf, Str, I32};

    #[test]
    fn test_trailing_input_ignored_by_default() {
        assert_eq!(deserialize::<SeqOf<I32>>("[1,2] trailing"), Ok(vec![1, 2]));
        assert_eq!(deserialize::<I32>("1 2"), Ok(1));
    }

    #[test]
    fn test_trailing_input_rejected() {
        let codec = Codec::new(Options::new().trailing(TrailingInput::Reject));
        assert_eq!(
            codec.deserialize::<SeqOf<I32>>("[1,2] x"),
            Err(Error::TrailingInput { offset: 6 })
        );
        assert_eq!(codec.deserialize::<SeqOf<I32>>(" [1,2]\n"), Ok(vec![1, 2]));
    }

    #[test]
    fn test_depth_limit() {
        let codec = Codec::new(Options::new().max_depth(2));
        assert_eq!(
            codec.deserialize::<SeqOf<SeqOf<SeqOf<I32>>>>("[[[1]]]"),
            Err(Error::Stream(StreamError::DepthLimitExceeded { limit: 2 }))
        );
        assert_eq!(
            codec.deserialize::<SeqOf<SeqOf<I32>>>("[[1]]"),
            Ok(vec![vec![1]])
        );
    }

    #[test]
    fn test_duplicate_key_policy() {
        let text = r#"{"a":1,"a":2}"#;
        assert_eq!(
            deserialize::<MapOf<I32>>(text),
            Err(Error::DuplicateKey("a".into()))
        );
        let codec = Codec::new(Options::new().duplicate_keys(DuplicateKeys::LastWins));
        let map = codec.deserialize::<MapOf<I32>>(text).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["a"], 2);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            deserialize::<Str>(""),
            Err(Error::Stream(StreamError::UnexpectedEnd))
        );
    }

    #[test]
    fn test_syntax_error_inside_value() {
        assert_eq!(
            deserialize::<SeqOf<I32>>("[1,,2]"),
            Err(Error::Stream(StreamError::Syntax { offset: 3 }))
        );
    }

    #[test]
    fn test_non_finite_float_fails_to_serialize() {
        assert_eq!(
            serialize::<SeqOf<crate::F64>>(&vec![1.0, f64::INFINITY]),
            Err(Error::Stream(StreamError::NonFiniteNumber))
        );
    }

    #[test]
    fn test_token_level_round_trip() {
        let value = vec!["a".to_string(), "b".to_string()];
        let mut log = TokenLog::new();
        write_value::<SeqOf<Str>, _>(&mut log, &value).unwrap();
        let mut replay = log.replay();
        assert_eq!(read_value::<SeqOf<Str>, _>(&mut replay), Ok(value));
        assert_eq!(replay.kind(), TokenKind::End);
    }
}

//! Scalar witnesses: one token in, one token out.
//!
//! Integers, booleans and floats have no null branch; a `null` where one of
//! them is expected fails as malformed input. Wrap [`Str`] in
//! [`crate::OrNull`] for an optional string.

use json_witness_stream::{StreamError, TokenSink, TokenSource};

use crate::{Nullable, Result, Witness};

/// Witness for `String`.
pub struct Str;

impl Witness for Str {
    type Value = String;

    fn write<S: TokenSink + ?Sized>(sink: &mut S, value: &String) -> Result<()> {
        Ok(sink.write_str(value)?)
    }

    fn read<R: TokenSource + ?Sized>(source: &mut R) -> Result<String> {
        let value = source.as_str()?.to_owned();
        source.advance()?;
        Ok(value)
    }
}

impl Nullable for Str {}

/// Witness for `bool`.
pub struct Bool;

impl Witness for Bool {
    type Value = bool;

    fn write<S: TokenSink + ?Sized>(sink: &mut S, value: &bool) -> Result<()> {
        Ok(sink.write_bool(*value)?)
    }

    fn read<R: TokenSource + ?Sized>(source: &mut R) -> Result<bool> {
        let value = source.as_bool()?;
        source.advance()?;
        Ok(value)
    }
}

/// Witness for `f64`.
///
/// Writing NaN or an infinity fails: JSON cannot represent them.
pub struct F64;

impl Witness for F64 {
    type Value = f64;

    fn write<S: TokenSink + ?Sized>(sink: &mut S, value: &f64) -> Result<()> {
        Ok(sink.write_f64(*value)?)
    }

    fn read<R: TokenSource + ?Sized>(source: &mut R) -> Result<f64> {
        let value = source.as_f64()?;
        source.advance()?;
        Ok(value)
    }
}

/// Witness for `f32`.
///
/// Written through its shortest decimal form, so `0.1f32` appears as `0.1`
/// rather than the text of its widened `f64`. Reading a number beyond the
/// `f32` range fails with [`StreamError::NumberOutOfRange`].
pub struct F32;

impl Witness for F32 {
    type Value = f32;

    fn write<S: TokenSink + ?Sized>(sink: &mut S, value: &f32) -> Result<()> {
        let wide = value
            .to_string()
            .parse::<f64>()
            .unwrap_or(f64::from(*value));
        Ok(sink.write_f64(wide)?)
    }

    fn read<R: TokenSource + ?Sized>(source: &mut R) -> Result<f32> {
        let value = source.as_f64()? as f32;
        if value.is_infinite() {
            return Err(StreamError::NumberOutOfRange {
                offset: source.position(),
            }
            .into());
        }
        source.advance()?;
        Ok(value)
    }
}

macro_rules! int_witness {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $wide:ty, $write:ident, $read:ident) => {
        $(#[$doc])*
        pub struct $name;

        impl Witness for $name {
            type Value = $ty;

            fn write<S: TokenSink + ?Sized>(sink: &mut S, value: &$ty) -> Result<()> {
                Ok(sink.$write(<$wide>::from(*value))?)
            }

            fn read<R: TokenSource + ?Sized>(source: &mut R) -> Result<$ty> {
                let wide = source.$read()?;
                let value = <$ty>::try_from(wide).map_err(|_| StreamError::NumberOutOfRange {
                    offset: source.position(),
                })?;
                source.advance()?;
                Ok(value)
            }
        }
    };
}

int_witness!(
    /// Witness for `i32`.
    I32, i32, i64, write_i64, as_i64
);
int_witness!(
    /// Witness for `i64`.
    I64, i64, i64, write_i64, as_i64
);
int_witness!(
    /// Witness for `u32`.
    U32, u32, u64, write_u64, as_u64
);
int_witness!(
    /// Witness for `u64`.
    U64, u64, u64, write_u64, as_u64
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use json_witness_stream::{JsonReader, JsonWriter, TokenKind};

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
    fn test_scalars_write_one_token() {
        assert_eq!(write::<I32>(&-42), "-42");
        assert_eq!(write::<U64>(&u64::MAX), "18446744073709551615");
        assert_eq!(write::<Bool>(&true), "true");
        assert_eq!(write::<F64>(&-1.1), "-1.1");
        assert_eq!(write::<F32>(&0.1), "0.1");
        assert_eq!(write::<Str>(&"Ann".to_string()), r#""Ann""#);
    }

    #[test]
    fn test_scalars_read_one_token() {
        assert_eq!(read::<I32>("39"), Ok(39));
        assert_eq!(read::<I64>("-9007199254740993"), Ok(-9007199254740993));
        assert_eq!(read::<U32>("4294967295"), Ok(u32::MAX));
        assert_eq!(read::<Bool>("false"), Ok(false));
        assert_eq!(read::<F64>("3.14"), Ok(3.14));
        assert_eq!(read::<F64>("2"), Ok(2.0));
        assert_eq!(read::<F32>("0.1"), Ok(0.1f32));
        assert_eq!(read::<Str>(r#""abc""#), Ok("abc".to_string()));
    }

    #[test]
    fn test_read_advances_past_the_token() {
        let mut source = JsonReader::new(b"[7,8]");
        source.advance().unwrap();
        source.advance().unwrap();
        assert_eq!(I32::read(&mut source), Ok(7));
        assert_eq!(source.kind(), TokenKind::Number);
        assert_eq!(I32::read(&mut source), Ok(8));
        assert_eq!(source.kind(), TokenKind::ArrayEnd);
    }

    #[test]
    fn test_integer_range() {
        assert_eq!(
            read::<I32>("2147483648"),
            Err(Error::Stream(StreamError::NumberOutOfRange { offset: 0 }))
        );
        assert!(read::<U32>("-1").is_err());
        assert!(read::<I32>("1.5").is_err());
        assert_eq!(
            read::<F32>("1e39"),
            Err(Error::Stream(StreamError::NumberOutOfRange { offset: 0 }))
        );
    }

    #[test]
    fn test_null_is_malformed_for_value_types() {
        assert_eq!(
            read::<I32>("null"),
            Err(Error::MalformedInput {
                expected: TokenKind::Number,
                found: TokenKind::Null,
                offset: 0,
            })
        );
        assert!(matches!(
            read::<Bool>("null"),
            Err(Error::MalformedInput { .. })
        ));
        assert!(matches!(
            read::<Str>("1"),
            Err(Error::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_nullable_string() {
        let mut sink = JsonWriter::new();
        Str::write_nullable(&mut sink, None).unwrap();
        assert_eq!(sink.into_string().unwrap(), "null");

        let mut source = JsonReader::new(b"null");
        source.advance().unwrap();
        assert_eq!(Str::read_nullable(&mut source), Ok(None));
        assert_eq!(source.kind(), TokenKind::End);
    }
}

//! Building blocks for record witnesses.
//!
//! A record witness writes its fields as an object in declaration order and
//! reads them back in any order, dispatching on the property name. The
//! [`record!`](crate::record!) macro generates one from a field list; the
//! pieces here are what it expands to and can be used by hand as well:
//!
//! ```
//! use json_witness::record::{read_fields, FieldSlot, RecordWriter};
//! use json_witness::stream::{TokenSink, TokenSource};
//! use json_witness::{Error, Nullable, Result, Str, Witness, I32};
//!
//! #[derive(Debug, PartialEq)]
//! struct Person {
//!     name: String,
//!     age: i32,
//! }
//!
//! struct PersonWitness;
//!
//! impl Witness for PersonWitness {
//!     type Value = Person;
//!
//!     fn write<S: TokenSink + ?Sized>(sink: &mut S, value: &Person) -> Result<()> {
//!         let mut record = RecordWriter::begin(sink)?;
//!         record.field::<Str>("Name", &value.name)?;
//!         record.field::<I32>("Age", &value.age)?;
//!         record.end()
//!     }
//!
//!     fn read<R: TokenSource + ?Sized>(source: &mut R) -> Result<Person> {
//!         let mut name = FieldSlot::new("Name");
//!         let mut age = FieldSlot::new("Age");
//!         read_fields(source, |field, source| match field {
//!             "Name" => name.read::<Str, _>(source),
//!             "Age" => age.read::<I32, _>(source),
//!             other => Err(Error::UnknownField(other.to_owned())),
//!         })?;
//!         Ok(Person {
//!             name: name.take()?,
//!             age: age.take()?,
//!         })
//!     }
//! }
//!
//! impl Nullable for PersonWitness {}
//!
//! let person = Person { name: "Ann".into(), age: 30 };
//! let json = json_witness::serialize::<PersonWitness>(&person).unwrap();
//! assert_eq!(json, r#"{"Name":"Ann","Age":30}"#);
//! let back = json_witness::deserialize::<PersonWitness>(r#"{"Age":30,"Name":"Ann"}"#).unwrap();
//! assert_eq!(back, person);
//! ```

use json_witness_stream::{DuplicateKeys, Structure, TokenKind, TokenSink, TokenSource};
use tracing::trace;

use crate::{Error, Result, Witness};

/// Writes one record as a JSON object.
pub struct RecordWriter<'s, S: TokenSink + ?Sized> {
    sink: &'s mut S,
}

impl<'s, S: TokenSink + ?Sized> RecordWriter<'s, S> {
    pub fn begin(sink: &'s mut S) -> Result<Self> {
        sink.write_start(Structure::Object)?;
        Ok(Self { sink })
    }

    /// Writes `"name": value` using witness `W`.
    pub fn field<W: Witness>(&mut self, name: &str, value: &W::Value) -> Result<()> {
        self.sink.write_property_name(name)?;
        W::write(&mut *self.sink, value)
    }

    pub fn end(self) -> Result<()> {
        self.sink.write_end(Structure::Object)?;
        Ok(())
    }
}

/// Reads the members of one object, calling `dispatch` with each property
/// name while the cursor sits on that member's value.
///
/// `dispatch` must consume exactly the value, typically through
/// [`FieldSlot::read`], or fail with [`Error::UnknownField`].
pub fn read_fields<R, F>(source: &mut R, mut dispatch: F) -> Result<()>
where
    R: TokenSource + ?Sized,
    F: FnMut(&str, &mut R) -> Result<()>,
{
    source.expect(TokenKind::ObjectStart)?;
    trace!(offset = source.position(), "read record");
    source.advance()?;
    while source.kind() != TokenKind::ObjectEnd {
        let name = source.property_name()?.to_owned();
        source.advance()?;
        dispatch(&name, source)?;
    }
    source.advance()?;
    Ok(())
}

/// Holds one field's value while a record is being read.
#[derive(Debug)]
pub struct FieldSlot<T> {
    name: &'static str,
    value: Option<T>,
}

impl<T> FieldSlot<T> {
    pub fn new(name: &'static str) -> Self {
        Self { name, value: None }
    }

    /// Reads the field's value with witness `W`.
    ///
    /// A second occurrence fails with [`Error::DuplicateField`] unless the
    /// source allows duplicate keys, in which case the last one is kept.
    pub fn read<W, R>(&mut self, source: &mut R) -> Result<()>
    where
        W: Witness<Value = T>,
        R: TokenSource + ?Sized,
    {
        if self.value.is_some() && source.duplicate_keys() == DuplicateKeys::Reject {
            return Err(Error::DuplicateField(self.name.to_owned()));
        }
        self.value = Some(W::read(source)?);
        Ok(())
    }

    /// Returns the value, failing with [`Error::MissingField`] if the field
    /// never appeared.
    pub fn take(self) -> Result<T> {
        self.value
            .ok_or_else(|| Error::MissingField(self.name.to_owned()))
    }
}

/// Declares a zero-sized record witness for a struct.
///
/// Each entry maps a JSON property name to a struct field and the witness
/// for that field. Fields are written in the order listed; on read they may
/// arrive in any order, unknown names fail with [`Error::UnknownField`], and
/// every listed field must be present. The record type may be named by a
/// path such as `model::Person`. The generated witness is
/// [`Nullable`](crate::Nullable).
///
/// ```
/// use json_witness::{record, OrNull, SeqOf, Str, F64, I32};
///
/// #[derive(Debug, PartialEq)]
/// pub struct Sample {
///     pub id: i32,
///     pub label: Option<String>,
///     pub readings: Vec<f64>,
/// }
///
/// record! {
///     pub struct SampleWitness for Sample {
///         "id" => id: I32,
///         "label" => label: OrNull<Str>,
///         "readings" => readings: SeqOf<F64>,
///     }
/// }
///
/// let sample = Sample { id: 7, label: None, readings: vec![0.5] };
/// let json = json_witness::serialize::<SampleWitness>(&sample).unwrap();
/// assert_eq!(json, r#"{"id":7,"label":null,"readings":[0.5]}"#);
/// assert_eq!(json_witness::deserialize::<SampleWitness>(&json).unwrap(), sample);
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $witness:ident for $ty:path {
            $( $json:literal => $field:ident : $fw:ty ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $witness;

        impl $crate::Witness for $witness {
            type Value = $ty;

            fn write<S: $crate::stream::TokenSink + ?Sized>(
                sink: &mut S,
                value: &$ty,
            ) -> $crate::Result<()> {
                let mut record = $crate::record::RecordWriter::begin(sink)?;
                $( record.field::<$fw>($json, &value.$field)?; )+
                record.end()
            }

            fn read<R: $crate::stream::TokenSource + ?Sized>(
                source: &mut R,
            ) -> $crate::Result<$ty> {
                $(
                    let mut $field =
                        $crate::record::FieldSlot::<<$fw as $crate::Witness>::Value>::new($json);
                )+
                $crate::record::read_fields(source, |name, source| match name {
                    $( $json => $field.read::<$fw, _>(source), )+
                    other => ::core::result::Result::Err($crate::Error::UnknownField(
                        ::std::borrow::ToOwned::to_owned(other),
                    )),
                })?;
                type __RecordValue = $ty;
                ::core::result::Result::Ok(__RecordValue {
                    $( $field: $field.take()?, )+
                })
            }
        }

        impl $crate::Nullable for $witness {}
    };
}

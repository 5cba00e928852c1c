//! Composable JSON codecs built from statically selected witnesses.
//!
//! A witness is a zero-sized type implementing [`Witness`] for one value
//! type. Scalars have primitive witnesses ([`Str`], [`I32`], [`F64`], ...);
//! structured values get witnesses assembled from their components'
//! witnesses, so the witness type spells out the shape of the data:
//!
//! | Value | Witness | JSON |
//! |---|---|---|
//! | `Vec<T>` | [`SeqOf<W>`] | array |
//! | `Box<[T]>` | [`SliceOf<W>`] | array |
//! | `IndexMap<String, V>` | [`MapOf<W>`] | object |
//! | `BTreeMap<String, V>` | [`BTreeMapOf<W>`] | object |
//! | `(A, B)` | [`PairOf<WA, WB>`] | two-element array |
//! | `Option<T>` | [`OrNull<W>`] | value or `null` |
//! | user struct | [`record!`] | object |
//!
//! Dispatch is resolved at compile time; nothing inspects value types at run
//! time and there is no registry.
//!
//! # Example
//!
//! ```
//! use json_witness::{deserialize, record, serialize, IndexMap, MapOf, PairOf, SeqOf, Str, F64, I32};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Person {
//!     name: String,
//!     age: i32,
//! }
//!
//! record! {
//!     struct PersonWitness for Person {
//!         "Name" => name: Str,
//!         "Age" => age: I32,
//!     }
//! }
//!
//! type Witness = MapOf<PairOf<PersonWitness, SeqOf<F64>>>;
//!
//! let mut value = IndexMap::new();
//! value.insert(
//!     "key".to_string(),
//!     (Person { name: "John".into(), age: 39 }, vec![3.14, -1.1]),
//! );
//!
//! let json = serialize::<Witness>(&value).unwrap();
//! assert_eq!(json, r#"{"key":[{"Name":"John","Age":39},[3.14,-1.1]]}"#);
//! assert_eq!(deserialize::<Witness>(&json).unwrap(), value);
//! ```

mod codec;
mod error;
mod map;
mod nullable;
mod pair;
mod primitive;
pub mod record;
mod seq;
mod witness;

pub use json_witness_stream as stream;

pub use codec::{deserialize, read_value, serialize, write_value, Codec, Options, TrailingInput};
pub use error::{Error, Result};
pub use indexmap::IndexMap;
pub use json_witness_stream::DuplicateKeys;
pub use map::{BTreeMapOf, MapOf};
pub use nullable::{OrDefault, OrNull};
pub use pair::PairOf;
pub use primitive::{Bool, Str, F32, F64, I32, I64, U32, U64};
pub use seq::{SeqOf, SliceOf};
pub use witness::{Nullable, Witness};

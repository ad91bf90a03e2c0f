//! An encoder for bencode. Produces exactly the bytes of the values it is given.
//!
//! # Encoding a value
//!
//! A [`Value`](crate::Value) tree is encoded with [`ToBencode::to_bencode`]:
//!
//! ```
//! # use bencoding::{encoding::ToBencode, Value};
//! let value = Value::List(vec![Value::Integer(-42), Value::string("spam")]);
//! assert_eq!(value.to_bencode().unwrap(), b"li-42e4:spame");
//! ```
//!
//! Dictionaries are written in the order their entries are stored. No sorting takes place;
//! producing the canonical, key-sorted form is up to the caller.
//!
//! # Encoding a structure
//!
//! Your own types can implement [`ToBencode`] directly, without building a `Value` first:
//!
//! ```
//! # use bencoding::encoding::{Encoder, Error, ToBencode};
//!
//! struct Message {
//!     foo: i32,
//!     bar: String,
//! }
//!
//! impl ToBencode for Message {
//!     fn encode(&self, encoder: &mut Encoder) -> Result<(), Error> {
//!         encoder.emit_dict(|e| {
//!             e.emit_pair(b"bar", &self.bar)?;
//!             e.emit_pair(b"foo", &self.foo)
//!         })
//!     }
//! }
//!
//! # fn main() -> Result<(), Error> {
//! let message = Message {
//!     foo: 1,
//!     bar: "quux".to_string(),
//! };
//!
//! assert_eq!(message.to_bencode()?, b"d3:bar4:quux3:fooi1ee");
//! # Ok(())
//! # }
//! ```
//!
//! Most primitive types and standard containers already implement [`ToBencode`].
//!
//! # Nesting depth limits
//!
//! Atoms (integers and byte strings) have depth 0. An object (a list or dict) containing only
//! atoms has depth 1, and in general an object has a depth equal to the depth of its deepest
//! member plus one. Encoders refuse to go deeper than their limit, which can be raised for
//! values known to be deep:
//!
//! ```
//! # use bencoding::{encoding::{Encoder, Error}, Value};
//! #
//! # fn main() -> Result<(), Error> {
//! let deep = Value::List(vec![Value::List(vec![Value::List(Vec::new())])]);
//!
//! let mut encoder = Encoder::new().with_max_depth(2);
//! assert!(encoder.emit(&deep).is_err());
//!
//! let mut encoder = Encoder::new().with_max_depth(3);
//! encoder.emit(&deep)?;
//! assert_eq!(encoder.get_output()?, b"llleee");
//! # Ok(())
//! # }
//! ```
//!
//! # Error handling
//!
//! The only error is [`Error::UnsupportedValue`]: an integer outside the signed 64-bit range
//! (which the decoder would not read back), or a structure deeper than the encoder's limit.
//! Once an error occurs, all future calls to the same encoder fail early with the same error.

mod encoder;
mod error;
mod printable_integer;
mod to_bencode;

pub use self::{
    encoder::{DictEncoder, Encoder},
    error::Error,
    printable_integer::PrintableInteger,
    to_bencode::{AsString, ToBencode},
};

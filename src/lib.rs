//! Encodes and decodes bencoded values.
//!
//! Bencode represents integers, byte strings, lists and dictionaries as a compact,
//! self-delimiting byte stream:
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! The decoder reads one [`Value`] at a time from a byte buffer and never recurses on the native
//! stack, so hostile inputs are bounded by a configurable nesting depth. The encoder writes a
//! value back byte for byte: dictionaries keep the order their keys were read or inserted in,
//! so `decode` followed by `encode` reproduces the input.
//!
//! ```
//! let value = bencoding::decode(b"d3:keyl1:a1:bee").unwrap();
//! assert_eq!(bencoding::encode(&value).unwrap(), b"d3:keyl1:a1:bee");
//! ```

#![cfg_attr(not(test), warn(missing_docs))]

pub mod decoding;
pub mod encoding;
mod value;

pub use crate::{
    decoding::Decoder,
    encoding::{Encoder, ToBencode},
    value::{Dict, Value},
};

/// Decode the first value in `bytes`. Trailing bytes are ignored; see
/// [`Value::from_bencode`] for a decode that requires the whole buffer to be consumed.
pub fn decode(bytes: &[u8]) -> Result<Value, decoding::Error> {
    Decoder::new(bytes).decode()
}

/// Encode a value to its bencode bytes.
pub fn encode(value: &Value) -> Result<Vec<u8>, encoding::Error> {
    value.to_bencode()
}

#[cfg(doctest)]
doc_comment::doctest!("../README.md");

//! `Value`s hold owned bencode data of any of the four bencode types.
//!
//! Dictionaries are kept in the order their entries were inserted (or read
//! from the wire), so a decoded value encodes back to the exact same bytes.
//!
//! If the `serde` feature is enabled, `Value` also implements `Serialize` and
//! `Deserialize`.

use indexmap::IndexMap;

#[cfg(feature = "serde")]
use std::{
    fmt::{self, Formatter},
    marker::PhantomData,
};

#[cfg(feature = "serde")]
use serde_ as serde;

#[cfg(feature = "serde")]
use serde::{
    Serialize,
    ser::{SerializeMap, SerializeSeq},
};

use crate::{
    decoding::{self, Decoder},
    encoding::{self, Encoder, ToBencode},
};

/// A bencode dictionary. Keys are byte strings and keep their insertion order.
pub type Dict = IndexMap<Vec<u8>, Value>;

/// An owned bencoded value.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Value {
    /// A signed integer
    Integer(i64),
    /// A byte string; not necessarily UTF-8
    Bytes(Vec<u8>),
    /// A list of values
    List(Vec<Value>),
    /// A dictionary mapping byte strings to values
    Dict(Dict),
}

impl Value {
    /// Creates a byte string value from a UTF-8 string.
    ///
    /// ```
    /// # use bencoding::Value;
    /// let value = Value::string("hello");
    /// assert_eq!(value.as_str(), Some("hello"));
    /// ```
    pub fn string(s: &str) -> Self {
        Value::Bytes(s.as_bytes().to_vec())
    }

    /// Decode a value that must span the whole buffer.
    ///
    /// Unlike [`Decoder::decode`], bytes left over after the value are an error.
    pub fn from_bencode(bytes: &[u8]) -> Result<Self, decoding::Error> {
        let mut decoder = Decoder::new(bytes);
        let value = decoder.decode()?;

        if !decoder.is_exhausted() {
            return Err(decoding::Error::malformed(
                decoder.offset(),
                format!("{} trailing bytes after value", decoder.remaining()),
            ));
        }

        Ok(value)
    }

    /// The bencode type of this value, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Bytes(_) => "byte string",
            Value::List(_) => "list",
            Value::Dict(_) => "dictionary",
        }
    }

    /// Returns the value as an integer, if it is one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the raw bytes of a byte string.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the value as a UTF-8 string, if it is a byte string holding valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Returns the elements of a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Returns the value as a dictionary reference, if it is one.
    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Consumes the value and returns the dictionary, if it is one.
    pub fn into_dict(self) -> Option<Dict> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Looks up a key if this value is a dictionary.
    ///
    /// ```
    /// # use bencoding::Value;
    /// let value = Value::from_bencode(b"d3:foo3:bare").unwrap();
    /// assert_eq!(value.get(b"foo").and_then(Value::as_str), Some("bar"));
    /// assert_eq!(value.get(b"missing"), None);
    /// ```
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.as_dict()?.get(key)
    }
}

impl ToBencode for Value {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), encoding::Error> {
        encoder.emit_value(self)
    }
}

macro_rules! impl_from_integer {
    ($($type:ty)*) => {$(
        impl From<$type> for Value {
            fn from(i: $type) -> Self {
                Value::Integer(i64::from(i))
            }
        }
    )*}
}

impl_from_integer!(u8 u16 u32 i8 i16 i32 i64);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Bytes(s.into_bytes())
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(l: Vec<Value>) -> Self {
        Value::List(l)
    }
}

impl From<Dict> for Value {
    fn from(d: Dict) -> Self {
        Value::Dict(d)
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;

    use serde_bytes::{ByteBuf, Bytes};

    impl Serialize for Value {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::ser::Serializer,
        {
            match self {
                Value::Bytes(string) => serializer.serialize_bytes(string),
                Value::Integer(int) => serializer.serialize_i64(*int),
                Value::List(list) => {
                    let mut seq = serializer.serialize_seq(Some(list.len()))?;
                    for value in list {
                        seq.serialize_element(value)?;
                    }
                    seq.end()
                },
                Value::Dict(dict) => {
                    let mut map = serializer.serialize_map(Some(dict.len()))?;
                    for (k, v) in dict {
                        map.serialize_entry(Bytes::new(k), v)?;
                    }
                    map.end()
                },
            }
        }
    }

    impl<'de> serde::de::Deserialize<'de> for Value {
        #[inline]
        fn deserialize<D>(deserializer: D) -> Result<Value, D::Error>
        where
            D: serde::de::Deserializer<'de>,
        {
            deserializer.deserialize_any(Visitor(PhantomData))
        }
    }

    struct Visitor<'de>(PhantomData<&'de ()>);

    impl<'de> serde::de::Visitor<'de> for Visitor<'de> {
        type Value = Value;

        fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
            formatter.write_str("any valid bencode value")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Value, E> {
            Ok(Value::Integer(value))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Value, E>
        where
            E: serde::de::Error,
        {
            i64::try_from(value).map(Value::Integer).map_err(|_| {
                E::invalid_value(serde::de::Unexpected::Unsigned(value), &"a signed 64-bit integer")
            })
        }

        fn visit_bool<E>(self, value: bool) -> Result<Value, E> {
            Ok(Value::Integer(i64::from(value)))
        }

        fn visit_bytes<E>(self, value: &[u8]) -> Result<Value, E> {
            Ok(Value::Bytes(value.to_vec()))
        }

        fn visit_str<E>(self, value: &str) -> Result<Value, E> {
            Ok(Value::string(value))
        }

        fn visit_string<E>(self, value: String) -> Result<Value, E> {
            Ok(Value::Bytes(value.into_bytes()))
        }

        fn visit_byte_buf<E>(self, value: Vec<u8>) -> Result<Value, E> {
            Ok(Value::Bytes(value))
        }

        fn visit_seq<V>(self, mut access: V) -> Result<Value, V::Error>
        where
            V: serde::de::SeqAccess<'de>,
        {
            let mut list = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some(e) = access.next_element()? {
                list.push(e);
            }
            Ok(Value::List(list))
        }

        fn visit_map<V>(self, mut access: V) -> Result<Value, V::Error>
        where
            V: serde::de::MapAccess<'de>,
        {
            let mut map = Dict::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((k, v)) = access.next_entry::<ByteBuf, _>()? {
                map.insert(k.into_vec(), v);
            }
            Ok(Value::Dict(map))
        }
    }
}

use std::{
    collections::{BTreeMap, HashMap, LinkedList, VecDeque},
    hash::{BuildHasher, Hash},
    rc::Rc,
    sync::Arc,
};

use indexmap::IndexMap;

use crate::encoding::{Encoder, Error};

/// An object that can be encoded into a single bencode object
pub trait ToBencode {
    /// Encode this object into the bencode stream
    fn encode(&self, encoder: &mut Encoder) -> Result<(), Error>;

    /// Encode this object to a byte string
    fn to_bencode(&self) -> Result<Vec<u8>, Error> {
        let mut encoder = Encoder::new();
        encoder.emit(self)?;
        encoder.get_output()
    }
}

/// Wrapper to allow `Vec<u8>` encoding as bencode string element.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct AsString<I>(pub I);

// Forwarding impls
impl<E: ToBencode + ?Sized> ToBencode for &E {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), Error> {
        E::encode(self, encoder)
    }
}

impl<E: ToBencode + ?Sized> ToBencode for Box<E> {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), Error> {
        E::encode(self, encoder)
    }
}

impl<E: ToBencode + ?Sized> ToBencode for Rc<E> {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), Error> {
        E::encode(self, encoder)
    }
}

impl<E: ToBencode + ?Sized> ToBencode for Arc<E> {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), Error> {
        E::encode(self, encoder)
    }
}

// Base type impls
impl ToBencode for str {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), Error> {
        encoder.emit_str(self)
    }
}

impl ToBencode for String {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), Error> {
        encoder.emit_str(self)
    }
}

macro_rules! impl_encodable_integer {
    ($($type:ty)*) => {$(
        impl ToBencode for $type {
            fn encode(&self, encoder: &mut Encoder) -> Result<(), Error> {
                encoder.emit_int(*self)
            }
        }
    )*}
}

impl_encodable_integer!(u8 u16 u32 u64 u128 usize i8 i16 i32 i64 i128 isize);

macro_rules! impl_encodable_iterable {
    ($($type:ident)*) => {$(
        impl <ContentT> ToBencode for $type<ContentT>
        where
            ContentT: ToBencode
        {
            fn encode(&self, encoder: &mut Encoder) -> Result<(), Error> {
                encoder.emit_list(|e| {
                    for item in self {
                        e.emit(item)?;
                    }
                    Ok(())
                })
            }
        }
    )*}
}

impl_encodable_iterable!(Vec VecDeque LinkedList);

impl<ContentT> ToBencode for [ContentT]
where
    ContentT: ToBencode,
{
    fn encode(&self, encoder: &mut Encoder) -> Result<(), Error> {
        encoder.emit_list(|e| {
            for item in self {
                e.emit(item)?;
            }
            Ok(())
        })
    }
}

impl<K: AsRef<[u8]>, V: ToBencode> ToBencode for BTreeMap<K, V> {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), Error> {
        encoder.emit_dict(|e| {
            for (k, v) in self {
                e.emit_pair(k.as_ref(), v)?;
            }
            Ok(())
        })
    }
}

impl<K, V, S> ToBencode for IndexMap<K, V, S>
where
    K: AsRef<[u8]>,
    V: ToBencode,
{
    fn encode(&self, encoder: &mut Encoder) -> Result<(), Error> {
        encoder.emit_dict(|e| {
            for (k, v) in self {
                e.emit_pair(k.as_ref(), v)?;
            }
            Ok(())
        })
    }
}

/// A `HashMap` has no stable iteration order, so its pairs are written sorted by key to keep
/// the output deterministic.
impl<K, V, S> ToBencode for HashMap<K, V, S>
where
    K: AsRef<[u8]> + Eq + Hash,
    V: ToBencode,
    S: BuildHasher,
{
    fn encode(&self, encoder: &mut Encoder) -> Result<(), Error> {
        encoder.emit_dict(|e| {
            let mut pairs = self
                .iter()
                .map(|(k, v)| (k.as_ref(), v))
                .collect::<Vec<_>>();
            pairs.sort_by_key(|&(k, _)| k);
            for (k, v) in pairs {
                e.emit_pair(k, v)?;
            }
            Ok(())
        })
    }
}

impl<I> ToBencode for AsString<I>
where
    I: AsRef<[u8]>,
{
    fn encode(&self, encoder: &mut Encoder) -> Result<(), Error> {
        encoder.emit_bytes(self.0.as_ref())
    }
}

impl<I> AsRef<[u8]> for AsString<I>
where
    I: AsRef<[u8]>,
{
    fn as_ref(&self) -> &'_ [u8] {
        self.0.as_ref()
    }
}

impl<'a, I> From<&'a [u8]> for AsString<I>
where
    I: From<&'a [u8]>,
{
    fn from(content: &'a [u8]) -> Self {
        AsString(I::from(content))
    }
}

use std::fmt::Display;

/// A value that can be written as a bencode integer
///
/// Every integer type can be handed to the encoder, but only values inside the signed
/// 64-bit range are written; anything wider could not be read back by the decoder.
pub trait PrintableInteger: Copy + Display {
    /// The value as a signed 64-bit integer, if it fits
    fn to_i64(self) -> Option<i64>;
}

macro_rules! impl_integer {
    ($($type:ty)*) => {$(
        impl PrintableInteger for $type {
            fn to_i64(self) -> Option<i64> {
                i64::try_from(self).ok()
            }
        }
    )*}
}

impl_integer!(u8 u16 u32 u64 u128 usize i8 i16 i32 i64 i128 isize);

//! Decodes a bencoded value
//!
//! # Basic decoding
//! For any decoding process, first we need to create a decoder:
//!
//! ```
//! # use bencoding::decoding::Decoder;
//! #
//! # let buf: &[u8] = b"d3:fooi1ee";
//! let _decoder = Decoder::new(buf);
//! ```
//!
//! Decoders have a depth limit to prevent resource exhaustion from hostile inputs. The default
//! is high enough for most structures, but production code should set the bound as tightly
//! as the expected data allows:
//!
//! ```
//! # use bencoding::decoding::Decoder;
//! #
//! # let buf: &[u8] = b"d3:fooi1ee";
//! let _decoder = Decoder::new(buf).with_max_depth(3);
//! ```
//!
//! Atoms (integers and strings) have depth zero, and lists and dicts have a depth equal to the
//! depth of their deepest member plus one. As a special case, an empty list or dict has depth 1.
//!
//! Now, you can read a value:
//!
//! ```
//! # use bencoding::{decoding::Decoder, Value};
//! #
//! # let buf: &[u8] = b"d3:fooi1ee";
//! # let mut decoder = Decoder::new(buf);
//! #
//! match decoder.decode().unwrap() {
//!     Value::List(_) => (),
//!     Value::Dict(d) => assert_eq!(d[&b"foo"[..]], Value::Integer(1)),
//!     Value::Integer(_) => (),
//!     Value::Bytes(_) => (),
//! };
//! ```
//!
//! # Error handling
//!
//! Errors are either [`Error::MalformedInput`] (the bytes break the grammar) or
//! [`Error::TruncatedInput`] (the input ends inside a value). A failed call leaves the decoder's
//! cursor where it was, so a decoder never exposes a half-read value:
//!
//! ```
//! # use bencoding::decoding::Decoder;
//! #
//! let mut decoder = Decoder::new(b"5:ab");
//! assert!(decoder.decode().unwrap_err().is_truncated());
//! assert_eq!(decoder.offset(), 0);
//! ```

mod decoder;
mod error;
mod frame;

pub use self::{decoder::Decoder, error::Error};

use std::slice;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{
    encoding::{Error, PrintableInteger, ToBencode},
    value::Value,
};

const DEFAULT_MAX_DEPTH: usize = 2048;

/// The actual encoder. Writes values into an owned output buffer in the order they are
/// emitted; dictionaries keep the order of their entries.
#[derive(Debug)]
pub struct Encoder {
    output: Vec<u8>,
    depth: usize,
    max_depth: usize,
    error: Option<Error>,
}

impl Default for Encoder {
    fn default() -> Self {
        Encoder {
            output: Vec::new(),
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            error: None,
        }
    }
}

impl Encoder {
    /// Create a new encoder
    pub fn new() -> Self {
        <Self as Default>::default()
    }

    /// Set the max depth of the encoded object
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn check_error(&self) -> Result<(), Error> {
        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn latch_err<T>(&mut self, result: Result<T, Error>) -> Result<T, Error> {
        if let Err(ref err) = result {
            if self.error.is_none() {
                debug!(error = %err, offset = self.output.len(), "failed to encode value");
                self.error = Some(err.clone());
            }
        }
        result
    }

    fn open(&mut self, tag: u8) -> Result<(), Error> {
        if self.depth >= self.max_depth {
            return self.latch_err(Err(Error::nesting_too_deep(self.max_depth)));
        }
        self.depth += 1;
        self.output.push(tag);
        Ok(())
    }

    fn close(&mut self) {
        self.depth -= 1;
        self.output.push(b'e');
    }

    /// Emit an arbitrary encodable object
    pub fn emit<E: ToBencode + ?Sized>(&mut self, value: &E) -> Result<(), Error> {
        self.check_error()?;
        let ret = value.encode(self);
        self.latch_err(ret)
    }

    /// Emit an integer. Fails if the value is outside the signed 64-bit range.
    pub fn emit_int<T: PrintableInteger>(&mut self, value: T) -> Result<(), Error> {
        self.check_error()?;
        let number = match value.to_i64() {
            Some(number) => number,
            None => {
                return self.latch_err(Err(Error::unsupported(format!(
                    "integer {} does not fit in 64 signed bits",
                    value
                ))));
            },
        };
        self.output.push(b'i');
        self.output.extend_from_slice(number.to_string().as_bytes());
        self.output.push(b'e');
        Ok(())
    }

    /// Emit a string
    pub fn emit_str(&mut self, value: &str) -> Result<(), Error> {
        self.emit_bytes(value.as_bytes())
    }

    /// Emit a byte array
    pub fn emit_bytes(&mut self, value: &[u8]) -> Result<(), Error> {
        self.check_error()?;
        self.output
            .extend_from_slice(value.len().to_string().as_bytes());
        self.output.push(b':');
        self.output.extend_from_slice(value);
        Ok(())
    }

    /// Emit an arbitrary list. The callback should emit the contents
    /// of the list to the given encoder.
    ///
    /// E.g., to emit the list `[1,2,3]`, you would write
    ///
    /// ```
    /// # use bencoding::encoding::{Encoder, Error};
    /// # fn main() -> Result<(), Error> {
    /// let mut encoder = Encoder::new();
    /// encoder.emit_list(|e| {
    ///     e.emit_int(1)?;
    ///     e.emit_int(2)?;
    ///     e.emit_int(3)
    /// })?;
    /// assert_eq!(encoder.get_output()?, b"li1ei2ei3ee");
    /// # Ok(())
    /// # }
    /// ```
    pub fn emit_list<F>(&mut self, list_cb: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Encoder) -> Result<(), Error>,
    {
        self.check_error()?;
        self.open(b'l')?;
        let ret = list_cb(self);
        self.latch_err(ret)?;
        self.close();
        Ok(())
    }

    /// Emit a dictionary. Pairs are written in the order the callback emits them; no
    /// sorting or duplicate detection takes place.
    ///
    /// ```
    /// # use bencoding::encoding::{Encoder, Error};
    /// #
    /// # fn main() -> Result<(), Error> {
    /// let mut encoder = Encoder::new();
    /// encoder.emit_dict(|e| {
    ///     e.emit_pair(b"b", &2)?;
    ///     e.emit_pair(b"a", "foo")
    /// })?;
    /// assert_eq!(encoder.get_output()?, b"d1:bi2e1:a3:fooe");
    /// # Ok(())
    /// # }
    /// ```
    pub fn emit_dict<F>(&mut self, content_cb: F) -> Result<(), Error>
    where
        F: FnOnce(&mut DictEncoder) -> Result<(), Error>,
    {
        self.check_error()?;
        self.open(b'd')?;
        let ret = content_cb(&mut DictEncoder { encoder: self });
        self.latch_err(ret)?;
        self.close();
        Ok(())
    }

    /// Emit a [`Value`] tree. Nested containers are walked with an explicit stack, so
    /// the native stack does not grow with the nesting depth of the value.
    pub fn emit_value(&mut self, value: &Value) -> Result<(), Error> {
        enum Pending<'v> {
            List(slice::Iter<'v, Value>),
            Dict(indexmap::map::Iter<'v, Vec<u8>, Value>),
        }

        self.check_error()?;

        let mut stack: SmallVec<[Pending; 16]> = SmallVec::new();
        let mut next = Some(value);

        loop {
            match next.take() {
                Some(Value::Integer(number)) => self.emit_int(*number)?,
                Some(Value::Bytes(bytes)) => self.emit_bytes(bytes)?,
                Some(Value::List(items)) => {
                    self.open(b'l')?;
                    stack.push(Pending::List(items.iter()));
                },
                Some(Value::Dict(dict)) => {
                    self.open(b'd')?;
                    stack.push(Pending::Dict(dict.iter()));
                },
                None => {},
            }

            let top = match stack.last_mut() {
                Some(top) => top,
                None => return Ok(()),
            };

            next = match top {
                Pending::List(items) => items.next(),
                Pending::Dict(entries) => match entries.next() {
                    Some((key, value)) => {
                        self.emit_bytes(key)?;
                        Some(value)
                    },
                    None => None,
                },
            };

            if next.is_none() {
                stack.pop();
                self.close();
            }
        }
    }

    /// Return the encoded bytes
    pub fn get_output(self) -> Result<Vec<u8>, Error> {
        self.check_error()?;
        trace!(produced = self.output.len(), "encoded value");
        Ok(self.output)
    }
}

/// Encodes the pairs of a dictionary. See [`Encoder::emit_dict`].
pub struct DictEncoder<'a> {
    encoder: &'a mut Encoder,
}

impl DictEncoder<'_> {
    /// Emit a key/value pair
    pub fn emit_pair<E>(&mut self, key: &[u8], value: &E) -> Result<(), Error>
    where
        E: ToBencode + ?Sized,
    {
        self.encoder.emit_bytes(key)?;
        self.encoder.emit(value)
    }
}

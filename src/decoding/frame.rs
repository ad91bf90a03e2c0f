use std::mem;

use crate::{
    decoding::Error,
    value::{Dict, Value},
};

/// One open container on the decoder's work stack
#[derive(Debug)]
pub(crate) enum Frame {
    /// An inner list. Accepts any value
    List(Vec<Value>),
    /// Inside a dict, expecting a key
    DictKey(Dict),
    /// Inside a dict, expecting the value for the contained key
    DictValue(Dict, Vec<u8>),
}

impl Frame {
    pub fn list() -> Self {
        Frame::List(Vec::new())
    }

    pub fn dict() -> Self {
        Frame::DictKey(Dict::new())
    }

    /// Whether the next token read belongs in key position.
    pub fn expects_key(&self) -> bool {
        matches!(self, Frame::DictKey(_))
    }

    /// Store a completed child value. `offset` is where the child began, for error reporting.
    pub fn accept(&mut self, value: Value, offset: usize) -> Result<(), Error> {
        match self {
            Frame::List(items) => {
                items.push(value);
            },
            Frame::DictKey(dict) => {
                let key = match value {
                    Value::Bytes(key) => key,
                    other => {
                        return Err(Error::malformed(
                            offset,
                            format!(
                                "dictionary keys must be byte strings, got {}",
                                other.type_name()
                            ),
                        ));
                    },
                };
                *self = Frame::DictValue(mem::take(dict), key);
            },
            Frame::DictValue(dict, key) => {
                let mut dict = mem::take(dict);
                // A repeated key overwrites the value but keeps its first position
                dict.insert(mem::take(key), value);
                *self = Frame::DictKey(dict);
            },
        }
        Ok(())
    }

    /// Close the container on an end marker found at `offset`.
    pub fn close(self, offset: usize) -> Result<Value, Error> {
        match self {
            Frame::List(items) => Ok(Value::List(items)),
            Frame::DictKey(dict) => Ok(Value::Dict(dict)),
            Frame::DictValue(_, key) => Err(Error::malformed(
                offset,
                format!(
                    "missing value for dictionary key {:?}",
                    String::from_utf8_lossy(&key)
                ),
            )),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dict_frame_alternates_key_and_value() {
        let mut frame = Frame::dict();
        assert!(frame.expects_key());

        frame.accept(Value::string("a"), 1).unwrap();
        assert!(!frame.expects_key());

        frame.accept(Value::Integer(1), 4).unwrap();
        assert!(frame.expects_key());

        let mut expected = Dict::new();
        expected.insert(b"a".to_vec(), Value::Integer(1));
        assert_eq!(frame.close(7).unwrap(), Value::Dict(expected));
    }

    #[test]
    fn dict_frame_rejects_integer_key() {
        let mut frame = Frame::dict();
        let err = frame.accept(Value::Integer(3), 1).unwrap_err();
        assert_eq!(err.offset(), 1);
        assert!(err.is_malformed());
    }

    #[test]
    fn dict_frame_without_value_cannot_close() {
        let mut frame = Frame::dict();
        frame.accept(Value::string("k"), 1).unwrap();
        assert!(frame.close(4).unwrap_err().is_malformed());
    }

    #[test]
    fn repeated_key_keeps_first_position() {
        let mut frame = Frame::dict();
        for (offset, value) in [
            Value::string("b"),
            Value::Integer(1),
            Value::string("a"),
            Value::Integer(2),
            Value::string("b"),
            Value::Integer(3),
        ]
        .into_iter()
        .enumerate()
        {
            frame.accept(value, offset).unwrap();
        }

        let dict = frame.close(6).unwrap().into_dict().unwrap();
        let pairs: Vec<_> = dict.into_iter().collect();
        assert_eq!(
            pairs,
            vec![
                (b"b".to_vec(), Value::Integer(3)),
                (b"a".to_vec(), Value::Integer(2)),
            ]
        );
    }
}

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{
    decoding::{Error, frame::Frame},
    value::Value,
};

const DEFAULT_MAX_DEPTH: usize = 2048;

/// A raw bencode token
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Token<'a> {
    /// The beginning of a list
    List,
    /// The beginning of a dictionary
    Dict,
    /// A byte string; may not be UTF-8
    Bytes(&'a [u8]),
    /// An integer
    Integer(i64),
    /// The end of a list or dictionary
    End,
}

impl Token<'_> {
    fn name(&self) -> &'static str {
        match *self {
            Token::Dict => "dictionary",
            Token::End => "end marker",
            Token::List => "list",
            Token::Integer(_) => "integer",
            Token::Bytes(_) => "byte string",
        }
    }
}

/// A bencode decoder
///
/// The decoder owns a cursor into an immutable buffer. Each call to
/// [`Decoder::decode()`] reads exactly one value starting at the cursor and leaves
/// the cursor just past it.
#[derive(Debug)]
pub struct Decoder<'a> {
    source: &'a [u8],
    offset: usize,
    max_depth: usize,
}

impl<'ser> Decoder<'ser> {
    /// Create a new decoder from the given byte array
    pub fn new(buffer: &'ser [u8]) -> Self {
        Decoder {
            source: buffer,
            offset: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the maximum nesting depth of the decoder. Containers are decoded with an
    /// explicit stack, so a large limit costs heap memory rather than native stack,
    /// but hostile inputs can still make that stack as deep as the limit allows.
    #[must_use]
    pub fn with_max_depth(mut self, new_max_depth: usize) -> Self {
        self.max_depth = new_max_depth;
        self
    }

    /// The current cursor position.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The number of bytes after the cursor.
    pub fn remaining(&self) -> usize {
        self.source.len() - self.offset
    }

    /// Whether the cursor has reached the end of the buffer.
    pub fn is_exhausted(&self) -> bool {
        self.offset >= self.source.len()
    }

    fn peek_byte(&self) -> Option<u8> {
        if self.offset < self.source.len() {
            Some(self.source[self.offset])
        } else {
            None
        }
    }

    fn take_chunk(&mut self, count: usize) -> Option<&'ser [u8]> {
        match self.offset.checked_add(count) {
            Some(end_pos) if end_pos <= self.source.len() => {
                let ret = &self.source[self.offset..end_pos];
                self.offset = end_pos;
                Some(ret)
            },
            _ => None,
        }
    }

    /// Read a decimal number up to `terminator` and step over the terminator.
    fn take_int(&mut self, terminator: u8, signed: bool) -> Result<i64, Error> {
        enum State {
            Start,
            Sign,
            Zero,
            Digits,
        }

        let start = self.offset;
        let mut curpos = start;
        let mut state = State::Start;
        let mut negative = false;
        let mut value: i64 = 0;

        while curpos < self.source.len() {
            let c = self.source[curpos];
            match state {
                State::Start => match c {
                    b'-' if signed => {
                        negative = true;
                        state = State::Sign;
                    },
                    b'0' => state = State::Zero,
                    b'1'..=b'9' => {
                        value = push_digit(value, c, negative, curpos)?;
                        state = State::Digits;
                    },
                    _ if signed => return Err(Error::unexpected("'-' or '0'..'9'", c, curpos)),
                    _ => return Err(Error::unexpected("'0'..'9'", c, curpos)),
                },
                State::Zero => {
                    if c == terminator {
                        break;
                    }
                    return Err(Error::unexpected(
                        format!("{:?}", terminator as char),
                        c,
                        curpos,
                    ));
                },
                State::Sign => match c {
                    b'1'..=b'9' => {
                        value = push_digit(value, c, negative, curpos)?;
                        state = State::Digits;
                    },
                    _ => return Err(Error::unexpected("'1'..'9'", c, curpos)),
                },
                State::Digits => match c {
                    b'0'..=b'9' => value = push_digit(value, c, negative, curpos)?,
                    _ if c == terminator => break,
                    _ => {
                        return Err(Error::unexpected(
                            format!("{:?} or '0'..'9'", terminator as char),
                            c,
                            curpos,
                        ));
                    },
                },
            }
            curpos += 1;
        }

        if curpos == self.source.len() {
            return Err(Error::truncated(
                start,
                format!("no {:?} before end of input", terminator as char),
            ));
        }

        self.offset = curpos + 1;
        Ok(value)
    }

    fn next_token(&mut self) -> Result<Token<'ser>, Error> {
        let start = self.offset;
        let tag = match self.peek_byte() {
            Some(tag) => tag,
            None => return Err(Error::truncated(start, "expected a token, got end of input")),
        };

        let token = match tag {
            b'e' | b'l' | b'd' | b'i' => {
                self.offset += 1;
                match tag {
                    b'e' => Token::End,
                    b'l' => Token::List,
                    b'd' => Token::Dict,
                    _ => Token::Integer(self.take_int(b'e', true)?),
                }
            },
            b'0'..=b'9' => {
                let len = self.take_int(b':', false)?;
                let len = usize::try_from(len)
                    .map_err(|_| Error::malformed(start, "byte string length out of range"))?;
                let payload_start = self.offset;
                let available = self.remaining();
                let payload = self.take_chunk(len).ok_or_else(|| {
                    Error::truncated(
                        payload_start,
                        format!(
                            "byte string declares {} bytes, only {} available",
                            len, available
                        ),
                    )
                })?;
                Token::Bytes(payload)
            },
            tok => {
                return Err(Error::malformed(
                    start,
                    format!("invalid token starting with {:?}", tok as char),
                ));
            },
        };

        Ok(token)
    }

    /// Read the next complete value from the buffer.
    ///
    /// Bytes after the value are left unread; use [`Decoder::is_exhausted()`] or
    /// [`Value::from_bencode`] when the whole buffer must be a single value. On
    /// failure the cursor is left where it was before the call.
    pub fn decode(&mut self) -> Result<Value, Error> {
        let start = self.offset;
        let result = self.decode_value();

        match &result {
            Ok(_) => trace!(offset = start, consumed = self.offset - start, "decoded value"),
            Err(err) => {
                debug!(offset = start, error = %err, "failed to decode value");
                self.offset = start;
            },
        }

        result
    }

    fn decode_value(&mut self) -> Result<Value, Error> {
        if self.is_exhausted() {
            return Err(Error::malformed(self.offset, "expected a value, got end of input"));
        }

        let mut stack: SmallVec<[Frame; 16]> = SmallVec::new();

        loop {
            let token_start = self.offset;
            if self.is_exhausted() {
                return Err(Error::truncated(
                    token_start,
                    format!("{} containers still open at end of input", stack.len()),
                ));
            }

            let token = self.next_token()?;

            let expects_key = stack.last().is_some_and(Frame::expects_key);
            if expects_key && !matches!(token, Token::Bytes(_) | Token::End) {
                return Err(Error::malformed(
                    token_start,
                    format!("dictionary keys must be byte strings, got {}", token.name()),
                ));
            }

            let value = match token {
                Token::List | Token::Dict => {
                    if stack.len() >= self.max_depth {
                        return Err(Error::malformed(
                            token_start,
                            format!("nesting depth exceeds the limit of {}", self.max_depth),
                        ));
                    }
                    stack.push(if token == Token::List {
                        Frame::list()
                    } else {
                        Frame::dict()
                    });
                    continue;
                },
                Token::End => match stack.pop() {
                    Some(frame) => frame.close(token_start)?,
                    None => return Err(Error::malformed(token_start, "unexpected end marker")),
                },
                Token::Bytes(bytes) => Value::Bytes(bytes.to_vec()),
                Token::Integer(number) => Value::Integer(number),
            };

            match stack.last_mut() {
                Some(parent) => parent.accept(value, token_start)?,
                None => return Ok(value),
            }
        }
    }
}

fn push_digit(value: i64, digit: u8, negative: bool, offset: usize) -> Result<i64, Error> {
    let digit = i64::from(digit - b'0');
    let shifted = value.checked_mul(10);
    let next = if negative {
        shifted.and_then(|v| v.checked_sub(digit))
    } else {
        shifted.and_then(|v| v.checked_add(digit))
    };
    next.ok_or_else(|| Error::malformed(offset, "integer does not fit in 64 bits"))
}

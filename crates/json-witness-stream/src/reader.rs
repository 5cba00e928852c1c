//! Pull cursor over UTF-8 JSON text.
//!
//! Lexes one token per [`TokenSource::advance`] call and validates the
//! grammar as it goes: separators, bracket balance, literal spelling, number
//! syntax and string escapes. Nothing is materialized beyond the current
//! token.

use std::borrow::Cow;

use json_witness_buffers::{BufferError, Reader};

use crate::number::{parse_f64, parse_i64, parse_u64, scan_number};
use crate::{DuplicateKeys, StreamError, Structure, TokenKind, TokenSource};

/// Default nesting limit for [`JsonReader::new`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    /// Any value.
    Value,
    /// A value, or `]` closing an empty array.
    ValueOrArrayEnd,
    /// A property name, or `}` closing an empty object.
    NameOrObjectEnd,
    /// `,` or the end of the enclosing structure.
    CommaOrEnd,
    /// The top-level value is complete.
    Done,
}

pub struct JsonReader<'a> {
    input: Reader<'a>,
    kind: TokenKind,
    start: usize,
    text: Cow<'a, str>,
    number: &'a str,
    boolean: bool,
    stack: Vec<Structure>,
    expect: Expect,
    max_depth: usize,
    duplicate_keys: DuplicateKeys,
    trailing: Option<usize>,
}

impl<'a> JsonReader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input: Reader::new(input),
            kind: TokenKind::None,
            start: 0,
            text: Cow::Borrowed(""),
            number: "",
            boolean: false,
            stack: Vec::new(),
            expect: Expect::Value,
            max_depth: DEFAULT_MAX_DEPTH,
            duplicate_keys: DuplicateKeys::Reject,
            trailing: None,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_duplicate_keys(mut self, policy: DuplicateKeys) -> Self {
        self.duplicate_keys = policy;
        self
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn syntax(&self) -> StreamError {
        if self.input.is_eof() {
            StreamError::UnexpectedEnd
        } else {
            StreamError::Syntax {
                offset: self.input.x,
            }
        }
    }

    fn mismatch(&self, expected: TokenKind) -> StreamError {
        StreamError::UnexpectedToken {
            expected,
            found: self.kind,
            offset: self.start,
        }
    }

    fn set(&mut self, kind: TokenKind, start: usize) -> TokenKind {
        self.kind = kind;
        self.start = start;
        kind
    }

    /// State that follows a completed value.
    fn after_value(&self) -> Expect {
        if self.stack.is_empty() {
            Expect::Done
        } else {
            Expect::CommaOrEnd
        }
    }

    fn read_value(&mut self) -> Result<TokenKind, StreamError> {
        let x = self.input.x;
        let ch = self.input.peek().ok_or(StreamError::UnexpectedEnd)?;
        let kind = match ch {
            b'[' => return self.open(Structure::Array),
            b'{' => return self.open(Structure::Object),
            b'"' => {
                self.text = self.read_str()?;
                TokenKind::String
            }
            b't' => self.read_literal(b"true", TokenKind::Bool, true)?,
            b'f' => self.read_literal(b"false", TokenKind::Bool, false)?,
            b'n' => self.read_literal(b"null", TokenKind::Null, false)?,
            b'-' | b'0'..=b'9' => {
                let end = scan_number(self.input.uint8, x)?;
                self.number = self.input.utf8(x, end).map_err(map_buffer)?;
                self.input.x = end;
                TokenKind::Number
            }
            _ => return Err(self.syntax()),
        };
        self.expect = self.after_value();
        Ok(self.set(kind, x))
    }

    fn read_literal(
        &mut self,
        literal: &[u8],
        kind: TokenKind,
        value: bool,
    ) -> Result<TokenKind, StreamError> {
        if !self.input.starts_with(literal) {
            return Err(self.syntax());
        }
        self.input.skip(literal.len());
        self.boolean = value;
        Ok(kind)
    }

    fn open(&mut self, structure: Structure) -> Result<TokenKind, StreamError> {
        if self.stack.len() >= self.max_depth {
            return Err(StreamError::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }
        let x = self.input.x;
        self.input.skip(1);
        self.stack.push(structure);
        self.expect = match structure {
            Structure::Array => Expect::ValueOrArrayEnd,
            Structure::Object => Expect::NameOrObjectEnd,
        };
        Ok(self.set(structure.start_kind(), x))
    }

    fn close(&mut self) -> Result<TokenKind, StreamError> {
        let x = self.input.x;
        let structure = match self.input.peek() {
            Some(b']') => Structure::Array,
            Some(b'}') => Structure::Object,
            _ => return Err(self.syntax()),
        };
        if self.stack.last() != Some(&structure) {
            return Err(StreamError::Syntax { offset: x });
        }
        self.input.skip(1);
        self.stack.pop();
        self.expect = self.after_value();
        Ok(self.set(structure.end_kind(), x))
    }

    fn read_name(&mut self) -> Result<TokenKind, StreamError> {
        let x = self.input.x;
        if self.input.peek() != Some(b'"') {
            return Err(self.syntax());
        }
        self.text = self.read_str()?;
        self.input.skip_whitespace();
        if self.input.peek() != Some(b':') {
            return Err(self.syntax());
        }
        self.input.skip(1);
        self.expect = Expect::Value;
        Ok(self.set(TokenKind::PropertyName, x))
    }

    /// Reads a quoted string at the cursor, returning its unescaped body.
    fn read_str(&mut self) -> Result<Cow<'a, str>, StreamError> {
        let open = self.input.x;
        let body = open + 1;
        let close = find_ending_quote(self.input.uint8, body)?;
        let raw = self
            .input
            .subarray(body, close)
            .map_err(map_buffer)?;
        self.input.x = close + 1;
        decode_json_string(raw, open)
    }
}

impl TokenSource for JsonReader<'_> {
    fn kind(&self) -> TokenKind {
        self.kind
    }

    fn advance(&mut self) -> Result<TokenKind, StreamError> {
        self.input.skip_whitespace();
        match self.expect {
            Expect::Value => self.read_value(),
            Expect::ValueOrArrayEnd => match self.input.peek() {
                Some(b']') => self.close(),
                _ => self.read_value(),
            },
            Expect::NameOrObjectEnd => match self.input.peek() {
                Some(b'}') => self.close(),
                _ => self.read_name(),
            },
            Expect::CommaOrEnd => match self.input.peek() {
                Some(b',') => {
                    self.input.skip(1);
                    self.input.skip_whitespace();
                    match self.stack.last() {
                        Some(Structure::Object) => self.read_name(),
                        _ => self.read_value(),
                    }
                }
                _ => self.close(),
            },
            Expect::Done => {
                let x = self.input.x;
                if !self.input.is_eof() {
                    self.trailing = Some(x);
                }
                Ok(self.set(TokenKind::End, x))
            }
        }
    }

    fn position(&self) -> usize {
        self.start
    }

    fn as_str(&self) -> Result<&str, StreamError> {
        match self.kind {
            TokenKind::String => Ok(&self.text),
            _ => Err(self.mismatch(TokenKind::String)),
        }
    }

    fn property_name(&self) -> Result<&str, StreamError> {
        match self.kind {
            TokenKind::PropertyName => Ok(&self.text),
            _ => Err(self.mismatch(TokenKind::PropertyName)),
        }
    }

    fn as_i64(&self) -> Result<i64, StreamError> {
        self.expect(TokenKind::Number)?;
        parse_i64(self.number, self.start)
    }

    fn as_u64(&self) -> Result<u64, StreamError> {
        self.expect(TokenKind::Number)?;
        parse_u64(self.number, self.start)
    }

    fn as_f64(&self) -> Result<f64, StreamError> {
        self.expect(TokenKind::Number)?;
        parse_f64(self.number, self.start)
    }

    fn as_bool(&self) -> Result<bool, StreamError> {
        self.expect(TokenKind::Bool)?;
        Ok(self.boolean)
    }

    fn trailing(&self) -> Option<usize> {
        self.trailing
    }

    fn duplicate_keys(&self) -> DuplicateKeys {
        self.duplicate_keys
    }
}

fn map_buffer(err: BufferError) -> StreamError {
    match err {
        BufferError::EndOfBuffer => StreamError::UnexpectedEnd,
        BufferError::InvalidUtf8(offset) => StreamError::InvalidUtf8 { offset },
    }
}

/// Finds the closing quote of a string body starting at `x`, skipping escapes.
fn find_ending_quote(data: &[u8], mut x: usize) -> Result<usize, StreamError> {
    while let Some(&b) = data.get(x) {
        match b {
            b'"' => return Ok(x),
            b'\\' => x += 2,
            0x00..=0x1f => return Err(StreamError::InvalidString { offset: x }),
            _ => x += 1,
        }
    }
    Err(StreamError::UnexpectedEnd)
}

/// Decodes a JSON string body (between the quotes), borrowing when no
/// escape sequences are present.
fn decode_json_string(bytes: &[u8], offset: usize) -> Result<Cow<'_, str>, StreamError> {
    if !bytes.contains(&b'\\') {
        return std::str::from_utf8(bytes)
            .map(Cow::Borrowed)
            .map_err(|e| StreamError::InvalidUtf8 {
                offset: offset + 1 + e.valid_up_to(),
            });
    }
    let mut quoted = Vec::with_capacity(bytes.len() + 2);
    quoted.push(b'"');
    quoted.extend_from_slice(bytes);
    quoted.push(b'"');
    serde_json::from_slice::<String>(&quoted)
        .map(Cow::Owned)
        .map_err(|_| StreamError::InvalidString { offset })
}

//! Read side of the token stream.

use crate::number::{parse_f64, parse_i64, parse_u64};
use crate::{DuplicateKeys, StreamError, Token, TokenKind};

/// A cursor over a sequence of JSON tokens.
///
/// A fresh source is positioned before the first token (kind
/// [`TokenKind::None`]); [`TokenSource::advance`] moves it onto the next one.
/// Typed accessors are only valid while the cursor sits on a token of the
/// matching kind and fail with [`StreamError::UnexpectedToken`] otherwise.
pub trait TokenSource {
    fn kind(&self) -> TokenKind;

    /// Moves to the next token and returns its kind.
    fn advance(&mut self) -> Result<TokenKind, StreamError>;

    /// Offset of the current token, used in error reports.
    fn position(&self) -> usize;

    fn as_str(&self) -> Result<&str, StreamError>;
    fn property_name(&self) -> Result<&str, StreamError>;
    fn as_i64(&self) -> Result<i64, StreamError>;
    fn as_u64(&self) -> Result<u64, StreamError>;
    fn as_f64(&self) -> Result<f64, StreamError>;
    fn as_bool(&self) -> Result<bool, StreamError>;

    /// Offset of the first token after a complete top-level value, if any.
    fn trailing(&self) -> Option<usize> {
        None
    }

    /// Policy for repeated keys inside one object.
    fn duplicate_keys(&self) -> DuplicateKeys {
        DuplicateKeys::Reject
    }

    /// Fails unless the current token is of kind `expected`.
    fn expect(&self, expected: TokenKind) -> Result<(), StreamError> {
        let found = self.kind();
        if found == expected {
            Ok(())
        } else {
            Err(StreamError::UnexpectedToken {
                expected,
                found,
                offset: self.position(),
            })
        }
    }
}

/// A source over recorded tokens, see [`crate::TokenLog::replay`].
///
/// Positions are token indices rather than byte offsets.
#[derive(Debug)]
pub struct TokenReplay<'a> {
    tokens: &'a [Token],
    index: Option<usize>,
    depth: usize,
    root_done: bool,
    trailing: Option<usize>,
    duplicate_keys: DuplicateKeys,
}

impl<'a> TokenReplay<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            index: None,
            depth: 0,
            root_done: false,
            trailing: None,
            duplicate_keys: DuplicateKeys::Reject,
        }
    }

    pub fn with_duplicate_keys(mut self, policy: DuplicateKeys) -> Self {
        self.duplicate_keys = policy;
        self
    }

    fn current(&self) -> Option<&'a Token> {
        if self.root_done && self.trailing.is_some() {
            return None;
        }
        self.index.and_then(|i| self.tokens.get(i))
    }

    fn mismatch(&self, expected: TokenKind) -> StreamError {
        StreamError::UnexpectedToken {
            expected,
            found: self.kind(),
            offset: self.position(),
        }
    }

    fn number(&self) -> Result<&'a str, StreamError> {
        match self.current() {
            Some(Token::Number(text)) => Ok(text),
            _ => Err(self.mismatch(TokenKind::Number)),
        }
    }
}

impl TokenSource for TokenReplay<'_> {
    fn kind(&self) -> TokenKind {
        match self.index {
            None => TokenKind::None,
            Some(_) => self.current().map_or(TokenKind::End, Token::kind),
        }
    }

    fn advance(&mut self) -> Result<TokenKind, StreamError> {
        if let Some(token) = self.current() {
            match token {
                Token::ArrayStart | Token::ObjectStart => self.depth += 1,
                Token::ArrayEnd | Token::ObjectEnd => {
                    self.depth = self.depth.checked_sub(1).ok_or(StreamError::Unbalanced)?
                }
                _ => {}
            }
            if self.depth == 0 && !matches!(token, Token::PropertyName(_)) {
                self.root_done = true;
            }
        }
        let next = self.index.map_or(0, |i| i + 1);
        self.index = Some(next);
        if self.root_done && next < self.tokens.len() {
            self.trailing = Some(next);
        }
        Ok(self.kind())
    }

    fn position(&self) -> usize {
        self.index.unwrap_or(0)
    }

    fn as_str(&self) -> Result<&str, StreamError> {
        match self.current() {
            Some(Token::String(s)) => Ok(s),
            _ => Err(self.mismatch(TokenKind::String)),
        }
    }

    fn property_name(&self) -> Result<&str, StreamError> {
        match self.current() {
            Some(Token::PropertyName(s)) => Ok(s),
            _ => Err(self.mismatch(TokenKind::PropertyName)),
        }
    }

    fn as_i64(&self) -> Result<i64, StreamError> {
        parse_i64(self.number()?, self.position())
    }

    fn as_u64(&self) -> Result<u64, StreamError> {
        parse_u64(self.number()?, self.position())
    }

    fn as_f64(&self) -> Result<f64, StreamError> {
        parse_f64(self.number()?, self.position())
    }

    fn as_bool(&self) -> Result<bool, StreamError> {
        match self.current() {
            Some(Token::Bool(b)) => Ok(*b),
            _ => Err(self.mismatch(TokenKind::Bool)),
        }
    }

    fn trailing(&self) -> Option<usize> {
        self.trailing
    }

    fn duplicate_keys(&self) -> DuplicateKeys {
        self.duplicate_keys
    }
}

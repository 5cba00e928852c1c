//! Token vocabulary shared by sinks and sources.

use std::fmt;

/// Kind of the token a source cursor is positioned at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// The cursor has not been advanced yet.
    None,
    Null,
    ArrayStart,
    ArrayEnd,
    ObjectStart,
    ObjectEnd,
    PropertyName,
    String,
    Number,
    Bool,
    /// Input exhausted after the top-level value.
    End,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::None => "no token",
            TokenKind::Null => "null",
            TokenKind::ArrayStart => "'['",
            TokenKind::ArrayEnd => "']'",
            TokenKind::ObjectStart => "'{'",
            TokenKind::ObjectEnd => "'}'",
            TokenKind::PropertyName => "property name",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Bool => "boolean",
            TokenKind::End => "end of input",
        };
        f.write_str(name)
    }
}

/// The two bracketed JSON structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Structure {
    Array,
    Object,
}

impl Structure {
    pub fn start_kind(self) -> TokenKind {
        match self {
            Structure::Array => TokenKind::ArrayStart,
            Structure::Object => TokenKind::ObjectStart,
        }
    }

    pub fn end_kind(self) -> TokenKind {
        match self {
            Structure::Array => TokenKind::ArrayEnd,
            Structure::Object => TokenKind::ObjectEnd,
        }
    }
}

/// An owned token, as recorded by [`crate::TokenLog`].
///
/// Numbers keep their JSON text so integer and float extraction behave the
/// same way they do on a text source.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Null,
    ArrayStart,
    ArrayEnd,
    ObjectStart,
    ObjectEnd,
    PropertyName(String),
    String(String),
    Number(String),
    Bool(bool),
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Null => TokenKind::Null,
            Token::ArrayStart => TokenKind::ArrayStart,
            Token::ArrayEnd => TokenKind::ArrayEnd,
            Token::ObjectStart => TokenKind::ObjectStart,
            Token::ObjectEnd => TokenKind::ObjectEnd,
            Token::PropertyName(_) => TokenKind::PropertyName,
            Token::String(_) => TokenKind::String,
            Token::Number(_) => TokenKind::Number,
            Token::Bool(_) => TokenKind::Bool,
        }
    }
}

/// What a mapping read does when a key repeats inside one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateKeys {
    /// Fail the read.
    #[default]
    Reject,
    /// Keep the value that appears last.
    LastWins,
}

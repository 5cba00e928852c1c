use thiserror::Error;

use crate::TokenKind;

/// Failures raised by token sinks and sources.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StreamError {
    #[error("invalid JSON at offset {offset}")]
    Syntax { offset: usize },
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("expected {expected} at offset {offset}, found {found}")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        offset: usize,
    },
    #[error("invalid UTF-8 at offset {offset}")]
    InvalidUtf8 { offset: usize },
    #[error("invalid string literal at offset {offset}")]
    InvalidString { offset: usize },
    #[error("number at offset {offset} does not fit the requested type")]
    NumberOutOfRange { offset: usize },
    #[error("nesting depth exceeds limit of {limit}")]
    DepthLimitExceeded { limit: usize },
    #[error("non-finite numbers have no JSON representation")]
    NonFiniteNumber,
    #[error("structure end does not match the open structure")]
    Unbalanced,
    #[error("property name written outside an object or before the previous value")]
    MisplacedPropertyName,
    #[error("object member value written without a property name")]
    MissingPropertyName,
    #[error("more than one top-level value written")]
    MultipleTopLevelValues,
    #[error("output finished with open structures or no value")]
    Incomplete,
}

use json_witness_stream::{StreamError, TokenKind};
use thiserror::Error;

/// Failures surfaced by witness reads and writes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The token under the cursor is not what the witness at this position requires.
    #[error("malformed input at offset {offset}: expected {expected}, found {found}")]
    MalformedInput {
        expected: TokenKind,
        found: TokenKind,
        offset: usize,
    },
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("field `{0}` appears more than once")]
    DuplicateField(String),
    #[error("missing field `{0}`")]
    MissingField(String),
    #[error("duplicate key `{0}`")]
    DuplicateKey(String),
    #[error("unexpected input after the top-level value at offset {offset}")]
    TrailingInput { offset: usize },
    #[error(transparent)]
    Stream(StreamError),
}

impl From<StreamError> for Error {
    fn from(err: StreamError) -> Self {
        match err {
            StreamError::UnexpectedToken {
                expected,
                found,
                offset,
            } => Error::MalformedInput {
                expected,
                found,
                offset,
            },
            other => Error::Stream(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_token_becomes_malformed_input() {
        let err: Error = StreamError::UnexpectedToken {
            expected: TokenKind::ArrayStart,
            found: TokenKind::String,
            offset: 0,
        }
        .into();
        assert_eq!(
            err,
            Error::MalformedInput {
                expected: TokenKind::ArrayStart,
                found: TokenKind::String,
                offset: 0,
            }
        );
        assert_eq!(
            err.to_string(),
            "malformed input at offset 0: expected '[', found string"
        );
    }

    #[test]
    fn test_other_stream_errors_pass_through() {
        let err: Error = StreamError::UnexpectedEnd.into();
        assert_eq!(err, Error::Stream(StreamError::UnexpectedEnd));
        assert_eq!(err.to_string(), "unexpected end of input");
    }
}

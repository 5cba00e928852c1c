//! Write side of the token stream.

use crate::number::format_f64;
use crate::source::TokenReplay;
use crate::{StreamError, Structure, Token};

/// An append-only consumer of JSON tokens.
///
/// Implementations enforce the structural rules of JSON: start and end
/// tokens balance, property names appear only directly inside an object and
/// are followed by exactly one value.
pub trait TokenSink {
    fn write_start(&mut self, structure: Structure) -> Result<(), StreamError>;
    fn write_end(&mut self, structure: Structure) -> Result<(), StreamError>;
    fn write_property_name(&mut self, name: &str) -> Result<(), StreamError>;
    fn write_str(&mut self, value: &str) -> Result<(), StreamError>;
    fn write_i64(&mut self, value: i64) -> Result<(), StreamError>;
    fn write_u64(&mut self, value: u64) -> Result<(), StreamError>;
    fn write_f64(&mut self, value: f64) -> Result<(), StreamError>;
    fn write_bool(&mut self, value: bool) -> Result<(), StreamError>;
    fn write_null(&mut self) -> Result<(), StreamError>;
}

/// What must precede the token about to be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Separator {
    None,
    Comma,
}

#[derive(Debug)]
struct Frame {
    structure: Structure,
    count: usize,
    awaiting_value: bool,
}

/// Structural bookkeeping shared by sinks.
#[derive(Debug, Default)]
pub(crate) struct Framing {
    frames: Vec<Frame>,
    root_written: bool,
}

impl Framing {
    /// Registers the start of a value (scalar or structure).
    pub fn value(&mut self) -> Result<Separator, StreamError> {
        match self.frames.last_mut() {
            None => {
                if self.root_written {
                    return Err(StreamError::MultipleTopLevelValues);
                }
                Ok(Separator::None)
            }
            Some(frame) => match frame.structure {
                Structure::Array => {
                    let sep = if frame.count > 0 {
                        Separator::Comma
                    } else {
                        Separator::None
                    };
                    frame.count += 1;
                    Ok(sep)
                }
                Structure::Object => {
                    if !frame.awaiting_value {
                        return Err(StreamError::MissingPropertyName);
                    }
                    frame.awaiting_value = false;
                    Ok(Separator::None)
                }
            },
        }
    }

    /// Marks a scalar value as complete.
    pub fn scalar(&mut self) -> Result<Separator, StreamError> {
        let sep = self.value()?;
        if self.frames.is_empty() {
            self.root_written = true;
        }
        Ok(sep)
    }

    pub fn property_name(&mut self) -> Result<Separator, StreamError> {
        match self.frames.last_mut() {
            Some(frame) if frame.structure == Structure::Object && !frame.awaiting_value => {
                let sep = if frame.count > 0 {
                    Separator::Comma
                } else {
                    Separator::None
                };
                frame.count += 1;
                frame.awaiting_value = true;
                Ok(sep)
            }
            _ => Err(StreamError::MisplacedPropertyName),
        }
    }

    pub fn start(&mut self, structure: Structure) -> Result<Separator, StreamError> {
        let sep = self.value()?;
        self.frames.push(Frame {
            structure,
            count: 0,
            awaiting_value: false,
        });
        Ok(sep)
    }

    pub fn end(&mut self, structure: Structure) -> Result<(), StreamError> {
        match self.frames.last() {
            Some(frame) if frame.structure == structure && !frame.awaiting_value => {
                self.frames.pop();
                if self.frames.is_empty() {
                    self.root_written = true;
                }
                Ok(())
            }
            _ => Err(StreamError::Unbalanced),
        }
    }

    /// Succeeds once exactly one complete top-level value has been written.
    pub fn finish(&self) -> Result<(), StreamError> {
        if self.frames.is_empty() && self.root_written {
            Ok(())
        } else {
            Err(StreamError::Incomplete)
        }
    }
}

/// A sink that records tokens instead of rendering text.
///
/// # Example
///
/// ```
/// use json_witness_stream::{Structure, Token, TokenLog, TokenSink};
///
/// let mut log = TokenLog::new();
/// log.write_start(Structure::Array).unwrap();
/// log.write_i64(1).unwrap();
/// log.write_end(Structure::Array).unwrap();
/// assert_eq!(
///     log.tokens(),
///     &[Token::ArrayStart, Token::Number("1".into()), Token::ArrayEnd]
/// );
/// ```
#[derive(Debug, Default)]
pub struct TokenLog {
    tokens: Vec<Token>,
    framing: Framing,
}

impl TokenLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns the recorded tokens, failing if the value is incomplete.
    pub fn finish(self) -> Result<Vec<Token>, StreamError> {
        self.framing.finish()?;
        Ok(self.tokens)
    }

    /// A source that reads the recorded tokens back.
    pub fn replay(&self) -> TokenReplay<'_> {
        TokenReplay::new(&self.tokens)
    }

    fn scalar(&mut self, token: Token) -> Result<(), StreamError> {
        self.framing.scalar()?;
        self.tokens.push(token);
        Ok(())
    }
}

impl TokenSink for TokenLog {
    fn write_start(&mut self, structure: Structure) -> Result<(), StreamError> {
        self.framing.start(structure)?;
        self.tokens.push(match structure {
            Structure::Array => Token::ArrayStart,
            Structure::Object => Token::ObjectStart,
        });
        Ok(())
    }

    fn write_end(&mut self, structure: Structure) -> Result<(), StreamError> {
        self.framing.end(structure)?;
        self.tokens.push(match structure {
            Structure::Array => Token::ArrayEnd,
            Structure::Object => Token::ObjectEnd,
        });
        Ok(())
    }

    fn write_property_name(&mut self, name: &str) -> Result<(), StreamError> {
        self.framing.property_name()?;
        self.tokens.push(Token::PropertyName(name.to_owned()));
        Ok(())
    }

    fn write_str(&mut self, value: &str) -> Result<(), StreamError> {
        self.scalar(Token::String(value.to_owned()))
    }

    fn write_i64(&mut self, value: i64) -> Result<(), StreamError> {
        self.scalar(Token::Number(value.to_string()))
    }

    fn write_u64(&mut self, value: u64) -> Result<(), StreamError> {
        self.scalar(Token::Number(value.to_string()))
    }

    fn write_f64(&mut self, value: f64) -> Result<(), StreamError> {
        let text = format_f64(value)?;
        self.scalar(Token::Number(text))
    }

    fn write_bool(&mut self, value: bool) -> Result<(), StreamError> {
        self.scalar(Token::Bool(value))
    }

    fn write_null(&mut self) -> Result<(), StreamError> {
        self.scalar(Token::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_name_outside_object() {
        let mut log = TokenLog::new();
        assert_eq!(
            log.write_property_name("a"),
            Err(StreamError::MisplacedPropertyName)
        );
        log.write_start(Structure::Array).unwrap();
        assert_eq!(
            log.write_property_name("a"),
            Err(StreamError::MisplacedPropertyName)
        );
    }

    #[test]
    fn test_property_name_needs_value_before_next_name() {
        let mut log = TokenLog::new();
        log.write_start(Structure::Object).unwrap();
        log.write_property_name("a").unwrap();
        assert_eq!(
            log.write_property_name("b"),
            Err(StreamError::MisplacedPropertyName)
        );
        assert_eq!(log.write_end(Structure::Object), Err(StreamError::Unbalanced));
    }

    #[test]
    fn test_object_value_needs_name() {
        let mut log = TokenLog::new();
        log.write_start(Structure::Object).unwrap();
        assert_eq!(log.write_i64(1), Err(StreamError::MissingPropertyName));
    }

    #[test]
    fn test_mismatched_end() {
        let mut log = TokenLog::new();
        log.write_start(Structure::Array).unwrap();
        assert_eq!(log.write_end(Structure::Object), Err(StreamError::Unbalanced));
        assert_eq!(
            TokenLog::new().write_end(Structure::Array),
            Err(StreamError::Unbalanced)
        );
    }

    #[test]
    fn test_single_top_level_value() {
        let mut log = TokenLog::new();
        log.write_null().unwrap();
        assert_eq!(log.write_null(), Err(StreamError::MultipleTopLevelValues));
    }

    #[test]
    fn test_finish_requires_closed_value() {
        assert_eq!(TokenLog::new().finish(), Err(StreamError::Incomplete));
        let mut log = TokenLog::new();
        log.write_start(Structure::Object).unwrap();
        assert_eq!(log.finish(), Err(StreamError::Incomplete));
    }

    #[test]
    fn test_finish_returns_tokens() {
        let mut log = TokenLog::new();
        log.write_start(Structure::Object).unwrap();
        log.write_property_name("ok").unwrap();
        log.write_bool(true).unwrap();
        log.write_end(Structure::Object).unwrap();
        assert_eq!(
            log.finish().unwrap(),
            vec![
                Token::ObjectStart,
                Token::PropertyName("ok".into()),
                Token::Bool(true),
                Token::ObjectEnd,
            ]
        );
    }
}

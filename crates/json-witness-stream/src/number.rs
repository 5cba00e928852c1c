//! Number text conversions shared by every sink and source.

use crate::StreamError;

/// Formats a float as a JSON number.
///
/// Integral values below 1e15 print without a fractional part, magnitudes
/// from 1e21 up use exponent form, and everything else uses the shortest
/// text that parses back to the same `f64`. Negative zero keeps its sign.
pub fn format_f64(value: f64) -> Result<String, StreamError> {
    if !value.is_finite() {
        return Err(StreamError::NonFiniteNumber);
    }
    if value == 0.0 && value.is_sign_negative() {
        return Ok("-0".to_owned());
    }
    let abs = value.abs();
    if value.fract() == 0.0 && abs < 1e15 {
        Ok(format!("{}", value as i64))
    } else if abs >= 1e21 {
        Ok(format!("{:e}", value))
    } else {
        Ok(format!("{}", value))
    }
}

pub fn parse_i64(text: &str, offset: usize) -> Result<i64, StreamError> {
    text.parse::<i64>()
        .map_err(|_| StreamError::NumberOutOfRange { offset })
}

pub fn parse_u64(text: &str, offset: usize) -> Result<u64, StreamError> {
    text.parse::<u64>()
        .map_err(|_| StreamError::NumberOutOfRange { offset })
}

pub fn parse_f64(text: &str, offset: usize) -> Result<f64, StreamError> {
    match text.parse::<f64>() {
        Ok(f) if f.is_finite() => Ok(f),
        _ => Err(StreamError::NumberOutOfRange { offset }),
    }
}

/// Scans a JSON number starting at `start`, returning the end offset.
///
/// Grammar: `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`
pub fn scan_number(data: &[u8], start: usize) -> Result<usize, StreamError> {
    let syntax = |offset| StreamError::Syntax { offset };
    let len = data.len();
    let mut x = start;
    if x < len && data[x] == b'-' {
        x += 1;
    }
    match data.get(x) {
        Some(b'0') => x += 1,
        Some(b'1'..=b'9') => {
            while x < len && data[x].is_ascii_digit() {
                x += 1;
            }
        }
        _ => return Err(syntax(x)),
    }
    if x < len && data[x] == b'.' {
        x += 1;
        let digits = x;
        while x < len && data[x].is_ascii_digit() {
            x += 1;
        }
        if x == digits {
            return Err(syntax(x));
        }
    }
    if x < len && (data[x] == b'e' || data[x] == b'E') {
        x += 1;
        if x < len && (data[x] == b'+' || data[x] == b'-') {
            x += 1;
        }
        let digits = x;
        while x < len && data[x].is_ascii_digit() {
            x += 1;
        }
        if x == digits {
            return Err(syntax(x));
        }
    }
    Ok(x)
}

//! Compact JSON text sink.
//!
//! Renders tokens into a [`json_witness_buffers::Writer`], inserting the `,`
//! and `:` separators itself so callers only emit structural and scalar
//! tokens.

use json_witness_buffers::Writer;

use crate::number::format_f64;
use crate::sink::{Framing, Separator};
use crate::{StreamError, Structure, TokenSink};

pub struct JsonWriter {
    writer: Writer,
    framing: Framing,
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonWriter {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
            framing: Framing::default(),
        }
    }

    /// Checks that one complete value was written and returns its bytes.
    pub fn finish(mut self) -> Result<Vec<u8>, StreamError> {
        self.framing.finish()?;
        Ok(self.writer.flush())
    }

    /// Like [`JsonWriter::finish`], returning text.
    pub fn into_string(self) -> Result<String, StreamError> {
        let bytes = self.finish()?;
        String::from_utf8(bytes).map_err(|e| StreamError::InvalidUtf8 {
            offset: e.utf8_error().valid_up_to(),
        })
    }

    fn separator(&mut self, sep: Separator) {
        if sep == Separator::Comma {
            self.writer.u8(b',');
        }
    }

    /// Write a JSON-encoded string (with escaping).
    fn write_quoted(&mut self, s: &str) -> Result<(), StreamError> {
        let bytes = s.as_bytes();
        // Fast path: printable ASCII, no quotes or backslash
        if bytes
            .iter()
            .all(|&b| (32..=126).contains(&b) && b != b'"' && b != b'\\')
        {
            self.writer.ensure_capacity(bytes.len() + 2);
            self.writer.u8(b'"');
            self.writer.buf(bytes);
            self.writer.u8(b'"');
            return Ok(());
        }
        let json_str =
            serde_json::to_string(s).map_err(|_| StreamError::InvalidString { offset: 0 })?;
        self.writer.buf(json_str.as_bytes());
        Ok(())
    }

    fn write_number_text(&mut self, text: &str) -> Result<(), StreamError> {
        let sep = self.framing.scalar()?;
        self.separator(sep);
        self.writer.ascii(text);
        Ok(())
    }
}

impl TokenSink for JsonWriter {
    fn write_start(&mut self, structure: Structure) -> Result<(), StreamError> {
        let sep = self.framing.start(structure)?;
        self.separator(sep);
        self.writer.u8(match structure {
            Structure::Array => b'[',
            Structure::Object => b'{',
        });
        Ok(())
    }

    fn write_end(&mut self, structure: Structure) -> Result<(), StreamError> {
        self.framing.end(structure)?;
        self.writer.u8(match structure {
            Structure::Array => b']',
            Structure::Object => b'}',
        });
        Ok(())
    }

    fn write_property_name(&mut self, name: &str) -> Result<(), StreamError> {
        let sep = self.framing.property_name()?;
        self.separator(sep);
        self.write_quoted(name)?;
        self.writer.u8(b':');
        Ok(())
    }

    fn write_str(&mut self, value: &str) -> Result<(), StreamError> {
        let sep = self.framing.scalar()?;
        self.separator(sep);
        self.write_quoted(value)
    }

    fn write_i64(&mut self, value: i64) -> Result<(), StreamError> {
        self.write_number_text(&value.to_string())
    }

    fn write_u64(&mut self, value: u64) -> Result<(), StreamError> {
        self.write_number_text(&value.to_string())
    }

    fn write_f64(&mut self, value: f64) -> Result<(), StreamError> {
        let text = format_f64(value)?;
        self.write_number_text(&text)
    }

    fn write_bool(&mut self, value: bool) -> Result<(), StreamError> {
        let sep = self.framing.scalar()?;
        self.separator(sep);
        self.writer.ascii(if value { "true" } else { "false" });
        Ok(())
    }

    fn write_null(&mut self) -> Result<(), StreamError> {
        let sep = self.framing.scalar()?;
        self.separator(sep);
        self.writer.ascii("null");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separators() {
        let mut w = JsonWriter::new();
        w.write_start(Structure::Object).unwrap();
        w.write_property_name("a").unwrap();
        w.write_start(Structure::Array).unwrap();
        w.write_i64(1).unwrap();
        w.write_u64(2).unwrap();
        w.write_f64(-1.1).unwrap();
        w.write_end(Structure::Array).unwrap();
        w.write_property_name("b").unwrap();
        w.write_null().unwrap();
        w.write_property_name("c").unwrap();
        w.write_start(Structure::Object).unwrap();
        w.write_end(Structure::Object).unwrap();
        w.write_end(Structure::Object).unwrap();
        assert_eq!(w.into_string().unwrap(), r#"{"a":[1,2,-1.1],"b":null,"c":{}}"#);
    }

    #[test]
    fn test_escaped_strings() {
        let mut w = JsonWriter::new();
        w.write_start(Structure::Array).unwrap();
        w.write_str("plain").unwrap();
        w.write_str("q\"uote\n").unwrap();
        w.write_str("café").unwrap();
        w.write_end(Structure::Array).unwrap();
        assert_eq!(
            w.into_string().unwrap(),
            "[\"plain\",\"q\\\"uote\\n\",\"café\"]"
        );
    }

    #[test]
    fn test_escaped_property_name() {
        let mut w = JsonWriter::new();
        w.write_start(Structure::Object).unwrap();
        w.write_property_name("a\"b").unwrap();
        w.write_bool(true).unwrap();
        w.write_end(Structure::Object).unwrap();
        assert_eq!(w.into_string().unwrap(), r#"{"a\"b":true}"#);
    }

    #[test]
    fn test_non_finite_float() {
        let mut w = JsonWriter::new();
        assert_eq!(w.write_f64(f64::NAN), Err(StreamError::NonFiniteNumber));
    }

    #[test]
    fn test_finish_rejects_open_structure() {
        let mut w = JsonWriter::new();
        w.write_start(Structure::Array).unwrap();
        assert_eq!(w.finish(), Err(StreamError::Incomplete));
    }

    #[test]
    fn test_output_parses_with_serde_json() {
        let mut w = JsonWriter::new();
        w.write_start(Structure::Array).unwrap();
        w.write_f64(3.14).unwrap();
        w.write_str("\u{1}").unwrap();
        w.write_bool(false).unwrap();
        w.write_end(Structure::Array).unwrap();
        let text = w.into_string().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, serde_json::json!([3.14, "\u{1}", false]));
    }

    #[test]
    fn test_float_edge_forms() {
        let mut w = JsonWriter::new();
        w.write_start(Structure::Array).unwrap();
        w.write_f64(-0.0).unwrap();
        w.write_f64(1e300).unwrap();
        w.write_end(Structure::Array).unwrap();
        let text = w.into_string().unwrap();
        assert_eq!(text, "[-0,1e300]");
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[1].as_f64(), Some(1e300));
    }
}

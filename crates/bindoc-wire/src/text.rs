//! Extended-text renderer.
//!
//! One-directional: values render to text; parsing text is a collaborator
//! concern. The formatting rules are exact contracts: representation
//! variants of several mapped types are defined in terms of this module's
//! output (notably [`format_double`]).

use base64::Engine;

use crate::document::Document;
use crate::value::DocValue;

/// Formats a double the way the text format spells numbers: shortest
/// round-trippable decimal, bare `NaN` / `INF` / `-INF` tokens for
/// non-finite values, exponent notation with an explicit sign for very
/// large or very small magnitudes.
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF" } else { "-INF" }.to_owned();
    }
    let magnitude = value.abs();
    if magnitude >= 1e15 || (magnitude != 0.0 && magnitude < 1e-4) {
        let exp = format!("{:E}", value);
        // Rust emits "1.5E300" / "1.5E-300"; the text form requires an
        // explicit exponent sign: "1.5E+300".
        match exp.find('E') {
            Some(pos) if exp.as_bytes().get(pos + 1) != Some(&b'-') => {
                format!("{}E+{}", &exp[..pos], &exp[pos + 1..])
            }
            _ => exp,
        }
    } else {
        // Shortest round-trip; integral values render without a fraction.
        format!("{}", value)
    }
}

/// Renders values to the extended text form.
pub struct TextRenderer;

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, value: &DocValue) -> String {
        let mut out = String::new();
        self.write_value(&mut out, value);
        out
    }

    pub fn render_document(&self, doc: &Document) -> String {
        let mut out = String::new();
        self.write_document(&mut out, doc);
        out
    }

    fn write_value(&self, out: &mut String, value: &DocValue) {
        match value {
            DocValue::Null => out.push_str("null"),
            DocValue::Boolean(true) => out.push_str("true"),
            DocValue::Boolean(false) => out.push_str("false"),
            DocValue::Int32(i) => out.push_str(&i.to_string()),
            DocValue::Int64(i) => out.push_str(&i.to_string()),
            DocValue::Double(f) => out.push_str(&format_double(*f)),
            DocValue::Str(s) => self.write_quoted(out, s),
            DocValue::Binary(bin) => {
                let b64 = base64::engine::general_purpose::STANDARD.encode(&bin.data);
                out.push_str("{ \"$binary\" : \"");
                out.push_str(&b64);
                out.push_str("\", \"$type\" : \"");
                out.push_str(&format!("{:02x}", bin.subtype));
                out.push_str("\" }");
            }
            DocValue::DateTime(ms) => {
                out.push_str("{ \"$date\" : ");
                out.push_str(&ms.to_string());
                out.push_str(" }");
            }
            DocValue::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_value(out, item);
                }
                out.push(']');
            }
            DocValue::Document(doc) => self.write_document(out, doc),
        }
    }

    fn write_document(&self, out: &mut String, doc: &Document) {
        if doc.is_empty() {
            out.push_str("{ }");
            return;
        }
        out.push_str("{ ");
        for (i, (key, value)) in doc.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_quoted(out, key);
            out.push_str(" : ");
            self.write_value(out, value);
        }
        out.push_str(" }");
    }

    fn write_quoted(&self, out: &mut String, s: &str) {
        out.push('"');
        for c in s.chars() {
            match c {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\u{0008}' => out.push_str("\\b"),
                '\u{000c}' => out.push_str("\\f"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if (c as u32) < 0x20 => {
                    out.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => out.push(c),
            }
        }
        out.push('"');
    }
}

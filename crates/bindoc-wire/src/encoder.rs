//! Binary document encoder.
//!
//! The wire format is little-endian. A document is a 4-byte total size
//! (including the size field itself), the encoded elements, and a trailing
//! null byte. Each element is a one-byte type tag, a null-terminated key,
//! and a type-specific body.

use crate::document::Document;
use crate::value::DocValue;

/// Encodes a [`Document`] to bytes.
///
/// The top level is always a document; there is no scalar top-level
/// encoding. The whole encoding is constructed in memory before being
/// returned, so callers never observe a partial document.
pub struct DocEncoder;

impl Default for DocEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocEncoder {
    pub fn new() -> Self {
        Self
    }

    pub fn encode(&self, doc: &Document) -> Vec<u8> {
        let mut buf = Vec::new();
        self.write_document(&mut buf, doc);
        buf
    }

    fn write_document(&self, buf: &mut Vec<u8>, doc: &Document) {
        let size_at = buf.len();
        buf.extend_from_slice(&[0u8; 4]); // placeholder for the size field
        for (key, value) in doc.iter() {
            self.write_element(buf, key, value);
        }
        buf.push(0); // terminating null byte
        let size = (buf.len() - size_at) as i32;
        buf[size_at..size_at + 4].copy_from_slice(&size.to_le_bytes());
    }

    /// Writes an array body: a document whose keys are the decimal indices
    /// in ascending order.
    fn write_array(&self, buf: &mut Vec<u8>, items: &[DocValue]) {
        let size_at = buf.len();
        buf.extend_from_slice(&[0u8; 4]);
        for (i, value) in items.iter().enumerate() {
            self.write_element(buf, &i.to_string(), value);
        }
        buf.push(0);
        let size = (buf.len() - size_at) as i32;
        buf[size_at..size_at + 4].copy_from_slice(&size.to_le_bytes());
    }

    fn write_element(&self, buf: &mut Vec<u8>, key: &str, value: &DocValue) {
        buf.push(value.type_tag());
        self.write_cstring(buf, key);
        match value {
            DocValue::Double(f) => buf.extend_from_slice(&f.to_le_bytes()),
            DocValue::Str(s) => self.write_string(buf, s),
            DocValue::Document(doc) => self.write_document(buf, doc),
            DocValue::Array(items) => self.write_array(buf, items),
            DocValue::Binary(bin) => {
                buf.extend_from_slice(&(bin.data.len() as i32).to_le_bytes());
                buf.push(bin.subtype);
                buf.extend_from_slice(&bin.data);
            }
            DocValue::Boolean(b) => buf.push(if *b { 1 } else { 0 }),
            DocValue::DateTime(ms) => buf.extend_from_slice(&ms.to_le_bytes()),
            DocValue::Null => {}
            DocValue::Int32(i) => buf.extend_from_slice(&i.to_le_bytes()),
            DocValue::Int64(i) => buf.extend_from_slice(&i.to_le_bytes()),
        }
    }

    /// Writes a null-terminated cstring. Stops at any null byte in the input.
    fn write_cstring(&self, buf: &mut Vec<u8>, s: &str) {
        for byte in s.bytes() {
            if byte == 0 {
                break;
            }
            buf.push(byte);
        }
        buf.push(0);
    }

    /// Writes a length-prefixed string: i32 (byteCount+1) + UTF-8 + null.
    fn write_string(&self, buf: &mut Vec<u8>, s: &str) {
        let bytes = s.as_bytes();
        let len = (bytes.len() as i32) + 1;
        buf.extend_from_slice(&len.to_le_bytes());
        buf.extend_from_slice(bytes);
        buf.push(0);
    }
}

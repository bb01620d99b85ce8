//! Binary document decoder.
//!
//! Strict: the stated document size must match the decoded structure
//! exactly, so re-encoding a decoded document reproduces a canonical
//! input byte for byte.

use crate::document::Document;
use crate::error::FormatError;
use crate::value::{BinaryData, DocValue};

/// Binary document decoder.
pub struct DocDecoder<'a> {
    data: &'a [u8],
    x: usize,
}

impl<'a> DocDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, x: 0 }
    }

    /// Decodes one top-level document, requiring the input to be fully
    /// consumed.
    pub fn decode(data: &[u8]) -> Result<Document, FormatError> {
        let mut decoder = DocDecoder::new(data);
        let doc = decoder.read_document()?;
        if decoder.x != data.len() {
            return Err(FormatError::TrailingBytes);
        }
        Ok(doc)
    }

    #[inline]
    fn check(&self, n: usize) -> Result<(), FormatError> {
        if self.x + n > self.data.len() {
            Err(FormatError::UnexpectedEof)
        } else {
            Ok(())
        }
    }

    fn u8(&mut self) -> Result<u8, FormatError> {
        self.check(1)?;
        let val = self.data[self.x];
        self.x += 1;
        Ok(val)
    }

    fn i32_le(&mut self) -> Result<i32, FormatError> {
        self.check(4)?;
        let val = i32::from_le_bytes(self.data[self.x..self.x + 4].try_into().unwrap());
        self.x += 4;
        Ok(val)
    }

    fn i64_le(&mut self) -> Result<i64, FormatError> {
        self.check(8)?;
        let val = i64::from_le_bytes(self.data[self.x..self.x + 8].try_into().unwrap());
        self.x += 8;
        Ok(val)
    }

    fn f64_le(&mut self) -> Result<f64, FormatError> {
        self.check(8)?;
        let val = f64::from_le_bytes(self.data[self.x..self.x + 8].try_into().unwrap());
        self.x += 8;
        Ok(val)
    }

    fn bytes(&mut self, n: usize) -> Result<Vec<u8>, FormatError> {
        self.check(n)?;
        let out = self.data[self.x..self.x + n].to_vec();
        self.x += n;
        Ok(out)
    }

    fn read_document(&mut self) -> Result<Document, FormatError> {
        let total = self.i32_le()?;
        if total < 5 {
            return Err(FormatError::LengthMismatch);
        }
        // One past the terminating null byte.
        let end = match (self.x - 4).checked_add(total as usize) {
            Some(end) if end <= self.data.len() => end,
            _ => return Err(FormatError::LengthMismatch),
        };
        let mut doc = Document::new();
        loop {
            if self.x >= end {
                return Err(FormatError::LengthMismatch);
            }
            let tag = self.u8()?;
            if tag == 0 {
                // The terminator must land exactly on the stated size.
                if self.x != end {
                    return Err(FormatError::LengthMismatch);
                }
                break;
            }
            let key = self.read_cstring()?;
            let value = self.read_element_value(tag)?;
            doc.push(key, value);
        }
        Ok(doc)
    }

    fn read_cstring(&mut self) -> Result<String, FormatError> {
        let start = self.x;
        while self.x < self.data.len() && self.data[self.x] != 0 {
            self.x += 1;
        }
        if self.x >= self.data.len() {
            return Err(FormatError::UnexpectedEof);
        }
        let s = std::str::from_utf8(&self.data[start..self.x])
            .map_err(|_| FormatError::InvalidUtf8)?
            .to_owned();
        self.x += 1; // null terminator
        Ok(s)
    }

    fn read_string(&mut self) -> Result<String, FormatError> {
        let len = self.i32_le()?;
        if len < 1 {
            return Err(FormatError::LengthMismatch);
        }
        let body = self.bytes(len as usize - 1)?;
        let s = String::from_utf8(body).map_err(|_| FormatError::InvalidUtf8)?;
        if self.u8()? != 0 {
            return Err(FormatError::LengthMismatch);
        }
        Ok(s)
    }

    fn read_element_value(&mut self, tag: u8) -> Result<DocValue, FormatError> {
        match tag {
            0x01 => Ok(DocValue::Double(self.f64_le()?)),
            0x02 => Ok(DocValue::Str(self.read_string()?)),
            0x03 => Ok(DocValue::Document(self.read_document()?)),
            0x04 => {
                // Canonical arrays are keyed "0", "1", ... in order, so the
                // values are taken in document order.
                let doc = self.read_document()?;
                Ok(DocValue::Array(
                    doc.into_iter().map(|(_, v)| v).collect(),
                ))
            }
            0x05 => {
                let len = self.i32_le()?;
                if len < 0 {
                    return Err(FormatError::LengthMismatch);
                }
                let subtype = self.u8()?;
                let data = self.bytes(len as usize)?;
                Ok(DocValue::Binary(BinaryData { subtype, data }))
            }
            0x08 => Ok(DocValue::Boolean(self.u8()? != 0)),
            0x09 => Ok(DocValue::DateTime(self.i64_le()?)),
            0x0a => Ok(DocValue::Null),
            0x10 => Ok(DocValue::Int32(self.i32_le()?)),
            0x12 => Ok(DocValue::Int64(self.i64_le()?)),
            t => Err(FormatError::UnknownTypeTag(t)),
        }
    }
}

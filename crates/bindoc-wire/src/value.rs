//! The tagged value model shared by the binary codec and the text renderer.

use crate::document::Document;

/// Binary payload plus its one-byte subtype tag.
///
/// Subtype `0x00` is generic binary data. The tag is carried opaquely and
/// must survive round trips exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryData {
    pub subtype: u8,
    pub data: Vec<u8>,
}

impl BinaryData {
    pub const GENERIC: u8 = 0x00;

    pub fn generic(data: Vec<u8>) -> Self {
        Self {
            subtype: Self::GENERIC,
            data,
        }
    }
}

/// A wire-representable value.
///
/// This union is exhaustive: every serializer in the mapping layer produces
/// one of these variants and nothing else.
#[derive(Debug, Clone, PartialEq)]
pub enum DocValue {
    /// 64-bit IEEE 754 double (0x01)
    Double(f64),
    /// UTF-8 string (0x02)
    Str(String),
    /// Embedded document (0x03)
    Document(Document),
    /// Array, encoded as a document keyed by decimal indices (0x04)
    Array(Vec<DocValue>),
    /// Binary data with subtype tag (0x05)
    Binary(BinaryData),
    /// Boolean (0x08)
    Boolean(bool),
    /// UTC datetime, milliseconds since the Unix epoch (0x09)
    DateTime(i64),
    /// Null (0x0a)
    Null,
    /// 32-bit signed integer (0x10)
    Int32(i32),
    /// 64-bit signed integer (0x12)
    Int64(i64),
}

impl DocValue {
    /// The one-byte wire tag for this variant.
    pub fn type_tag(&self) -> u8 {
        match self {
            DocValue::Double(_) => 0x01,
            DocValue::Str(_) => 0x02,
            DocValue::Document(_) => 0x03,
            DocValue::Array(_) => 0x04,
            DocValue::Binary(_) => 0x05,
            DocValue::Boolean(_) => 0x08,
            DocValue::DateTime(_) => 0x09,
            DocValue::Null => 0x0a,
            DocValue::Int32(_) => 0x10,
            DocValue::Int64(_) => 0x12,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DocValue::Null)
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            DocValue::Document(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[DocValue]> {
        match self {
            DocValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DocValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for DocValue {
    fn from(v: bool) -> Self {
        DocValue::Boolean(v)
    }
}

impl From<i32> for DocValue {
    fn from(v: i32) -> Self {
        DocValue::Int32(v)
    }
}

impl From<i64> for DocValue {
    fn from(v: i64) -> Self {
        DocValue::Int64(v)
    }
}

impl From<f64> for DocValue {
    fn from(v: f64) -> Self {
        DocValue::Double(v)
    }
}

impl From<&str> for DocValue {
    fn from(v: &str) -> Self {
        DocValue::Str(v.to_owned())
    }
}

impl From<String> for DocValue {
    fn from(v: String) -> Self {
        DocValue::Str(v)
    }
}

impl From<Document> for DocValue {
    fn from(v: Document) -> Self {
        DocValue::Document(v)
    }
}

impl From<Vec<DocValue>> for DocValue {
    fn from(v: Vec<DocValue>) -> Self {
        DocValue::Array(v)
    }
}

impl From<serde_json::Value> for DocValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => DocValue::Null,
            serde_json::Value::Bool(b) => DocValue::Boolean(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    if i >= i32::MIN as i64 && i <= i32::MAX as i64 {
                        DocValue::Int32(i as i32)
                    } else {
                        DocValue::Int64(i)
                    }
                } else {
                    DocValue::Double(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => DocValue::Str(s),
            serde_json::Value::Array(arr) => {
                DocValue::Array(arr.into_iter().map(DocValue::from).collect())
            }
            serde_json::Value::Object(obj) => {
                let mut doc = Document::new();
                for (k, v) in obj {
                    doc.push(k, DocValue::from(v));
                }
                DocValue::Document(doc)
            }
        }
    }
}

impl From<DocValue> for serde_json::Value {
    fn from(v: DocValue) -> Self {
        use base64::Engine;
        match v {
            DocValue::Null => serde_json::Value::Null,
            DocValue::Boolean(b) => serde_json::Value::Bool(b),
            DocValue::Int32(i) => serde_json::json!(i),
            DocValue::Int64(i) => serde_json::json!(i),
            DocValue::Double(f) => serde_json::json!(f),
            DocValue::Str(s) => serde_json::Value::String(s),
            DocValue::Binary(bin) => {
                let b64 = base64::engine::general_purpose::STANDARD.encode(&bin.data);
                serde_json::json!({
                    "$binary": b64,
                    "$type": format!("{:02x}", bin.subtype),
                })
            }
            DocValue::DateTime(ms) => serde_json::json!({ "$date": ms }),
            DocValue::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(serde_json::Value::from).collect())
            }
            DocValue::Document(doc) => {
                let mut obj = serde_json::Map::new();
                for (k, v) in doc.into_iter() {
                    obj.insert(k, serde_json::Value::from(v));
                }
                serde_json::Value::Object(obj)
            }
        }
    }
}

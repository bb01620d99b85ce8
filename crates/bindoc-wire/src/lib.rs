//! Binary document value model, codec, and extended-text renderer.
//!
//! This crate is the wire half of bindoc: a closed tagged value model
//! ([`DocValue`]), a length-prefixed little-endian binary codec
//! ([`DocEncoder`] / [`DocDecoder`]) that round-trips canonical encodings
//! byte for byte, and a one-directional extended-text renderer
//! ([`TextRenderer`]). The mapping layer lives in `bindoc-odm`.

pub mod decoder;
pub mod document;
pub mod encoder;
pub mod error;
pub mod text;
pub mod value;

pub use decoder::DocDecoder;
pub use document::Document;
pub use encoder::DocEncoder;
pub use error::FormatError;
pub use text::{format_double, TextRenderer};
pub use value::{BinaryData, DocValue};

//! Byte-sequence and bit-sequence serializers.

use bindoc_wire::{BinaryData, DocValue, Document};

use crate::error::DecodeError;
use crate::representation::Representation;
use crate::serializer::{mismatch, WireSerializer};
use crate::types::BitSeq;

fn parse_hex_pairs(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    let mut out = Vec::with_capacity(s.len() / 2);
    let bytes = s.as_bytes();
    for pair in bytes.chunks(2) {
        let hi = (pair[0] as char).to_digit(16)?;
        let lo = (pair[1] as char).to_digit(16)?;
        out.push((hi * 16 + lo) as u8);
    }
    Some(out)
}

pub struct ByteVecSerializer;

impl WireSerializer<Vec<u8>> for ByteVecSerializer {
    fn supported(&self) -> &'static [Representation] {
        &[Representation::Binary, Representation::String]
    }

    fn write(&self, value: &Vec<u8>, representation: Representation) -> DocValue {
        match representation {
            Representation::String => {
                let mut hex = String::with_capacity(value.len() * 2);
                for byte in value {
                    hex.push_str(&format!("{byte:02x}"));
                }
                DocValue::Str(hex)
            }
            _ => DocValue::Binary(BinaryData::generic(value.clone())),
        }
    }

    fn read(
        &self,
        value: &DocValue,
        _representation: Representation,
    ) -> Result<Vec<u8>, DecodeError> {
        match value {
            DocValue::Binary(bin) => Ok(bin.data.clone()),
            DocValue::Str(s) => parse_hex_pairs(s).ok_or_else(|| DecodeError::Parse {
                type_name: "Vec<u8>",
                value: s.clone(),
            }),
            other => Err(mismatch("Vec<u8>", other)),
        }
    }
}

/// Bit sequences pack into `ceil(n/8)` bytes. A count that is not a
/// multiple of 8 cannot be recovered from the byte length alone, so the
/// Binary form is then wrapped in a document carrying an explicit `Length`
/// field; a multiple of 8 (zero included) writes the bare Binary value.
pub struct BitSeqSerializer;

impl WireSerializer<BitSeq> for BitSeqSerializer {
    fn supported(&self) -> &'static [Representation] {
        &[Representation::Binary, Representation::String]
    }

    fn write(&self, value: &BitSeq, representation: Representation) -> DocValue {
        match representation {
            Representation::String => DocValue::Str(value.to_string()),
            _ => {
                let bytes = value.as_bytes().to_vec();
                if value.len() % 8 == 0 {
                    DocValue::Binary(BinaryData::generic(bytes))
                } else {
                    let mut doc = Document::new();
                    doc.push("Length", value.len() as i32);
                    doc.push("Bytes", DocValue::Binary(BinaryData::generic(bytes)));
                    DocValue::Document(doc)
                }
            }
        }
    }

    fn read(
        &self,
        value: &DocValue,
        _representation: Representation,
    ) -> Result<BitSeq, DecodeError> {
        match value {
            DocValue::Binary(bin) => Ok(BitSeq::from_bytes(bin.data.clone(), bin.data.len() * 8)),
            DocValue::Document(doc) => {
                let len = match doc.get("Length") {
                    Some(DocValue::Int32(n)) if *n >= 0 => *n as usize,
                    Some(other) => return Err(mismatch("Length", other)),
                    None => return Err(DecodeError::MissingMember("Length")),
                };
                match doc.get("Bytes") {
                    Some(DocValue::Binary(bin)) => Ok(BitSeq::from_bytes(bin.data.clone(), len)),
                    Some(other) => Err(mismatch("Bytes", other)),
                    None => Err(DecodeError::MissingMember("Bytes")),
                }
            }
            DocValue::Str(s) => {
                let mut bits = Vec::with_capacity(s.len());
                for c in s.chars() {
                    match c {
                        '0' => bits.push(false),
                        '1' => bits.push(true),
                        _ => {
                            return Err(DecodeError::Parse {
                                type_name: "BitSeq",
                                value: s.clone(),
                            })
                        }
                    }
                }
                Ok(BitSeq::from_bools(&bits))
            }
            other => Err(mismatch("BitSeq", other)),
        }
    }
}

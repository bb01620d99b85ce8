//! Integer serializers.
//!
//! Width conversions reinterpret the bit pattern (truncating or extending),
//! never value-checking: the maximum unsigned 32-bit value written with a
//! signed 32-bit representation is -1. Textual conversions are decimal for
//! the 16/32/64-bit widths and lowercase hex of the bit pattern for the
//! byte widths; an out-of-range textual parse is a `DecodeError`.

use std::num::IntErrorKind;

use bindoc_wire::{BinaryData, DocValue};

use crate::error::DecodeError;
use crate::representation::Representation;
use crate::serializer::{mismatch, WireSerializer};

fn parse_decimal<T: std::str::FromStr<Err = std::num::ParseIntError>>(
    s: &str,
    type_name: &'static str,
) -> Result<T, DecodeError> {
    s.parse::<T>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => DecodeError::OutOfRange {
            type_name,
            value: s.to_owned(),
        },
        _ => DecodeError::Parse {
            type_name,
            value: s.to_owned(),
        },
    })
}

fn parse_hex_byte(s: &str, type_name: &'static str) -> Result<u8, DecodeError> {
    u8::from_str_radix(s, 16).map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => DecodeError::OutOfRange {
            type_name,
            value: s.to_owned(),
        },
        _ => DecodeError::Parse {
            type_name,
            value: s.to_owned(),
        },
    })
}

/// Truncation toward zero, then bit-pattern narrowing.
fn double_to_i64(value: f64) -> i64 {
    value as i64
}

pub struct UInt8Serializer;

impl WireSerializer<u8> for UInt8Serializer {
    fn supported(&self) -> &'static [Representation] {
        &[
            Representation::Int32,
            Representation::Int64,
            Representation::Double,
            Representation::String,
            Representation::Binary,
        ]
    }

    fn write(&self, value: &u8, representation: Representation) -> DocValue {
        match representation {
            Representation::Int64 => DocValue::Int64(i64::from(*value)),
            Representation::Double => DocValue::Double(f64::from(*value)),
            Representation::String => DocValue::Str(format!("{value:02x}")),
            Representation::Binary => DocValue::Binary(BinaryData::generic(vec![*value])),
            _ => DocValue::Int32(i32::from(*value)),
        }
    }

    fn read(&self, value: &DocValue, _representation: Representation) -> Result<u8, DecodeError> {
        match value {
            DocValue::Int32(i) => Ok(*i as u8),
            DocValue::Int64(i) => Ok(*i as u8),
            DocValue::Double(d) => Ok(double_to_i64(*d) as u8),
            DocValue::Str(s) => parse_hex_byte(s, "u8"),
            DocValue::Binary(bin) if bin.data.len() == 1 => Ok(bin.data[0]),
            DocValue::Binary(bin) => Err(DecodeError::BinaryLength {
                type_name: "u8",
                len: bin.data.len(),
            }),
            other => Err(mismatch("u8", other)),
        }
    }
}

pub struct Int8Serializer;

impl WireSerializer<i8> for Int8Serializer {
    fn supported(&self) -> &'static [Representation] {
        &[
            Representation::Int32,
            Representation::Int64,
            Representation::Double,
            Representation::String,
            Representation::Binary,
        ]
    }

    fn write(&self, value: &i8, representation: Representation) -> DocValue {
        match representation {
            Representation::Int64 => DocValue::Int64(i64::from(*value)),
            Representation::Double => DocValue::Double(f64::from(*value)),
            Representation::String => DocValue::Str(format!("{:02x}", *value as u8)),
            Representation::Binary => DocValue::Binary(BinaryData::generic(vec![*value as u8])),
            _ => DocValue::Int32(i32::from(*value)),
        }
    }

    fn read(&self, value: &DocValue, _representation: Representation) -> Result<i8, DecodeError> {
        match value {
            DocValue::Int32(i) => Ok(*i as i8),
            DocValue::Int64(i) => Ok(*i as i8),
            DocValue::Double(d) => Ok(double_to_i64(*d) as i8),
            DocValue::Str(s) => Ok(parse_hex_byte(s, "i8")? as i8),
            DocValue::Binary(bin) if bin.data.len() == 1 => Ok(bin.data[0] as i8),
            DocValue::Binary(bin) => Err(DecodeError::BinaryLength {
                type_name: "i8",
                len: bin.data.len(),
            }),
            other => Err(mismatch("i8", other)),
        }
    }
}

pub struct Int16Serializer;

impl WireSerializer<i16> for Int16Serializer {
    fn supported(&self) -> &'static [Representation] {
        &[
            Representation::Int32,
            Representation::Int64,
            Representation::Double,
            Representation::String,
        ]
    }

    fn write(&self, value: &i16, representation: Representation) -> DocValue {
        match representation {
            Representation::Int64 => DocValue::Int64(i64::from(*value)),
            Representation::Double => DocValue::Double(f64::from(*value)),
            Representation::String => DocValue::Str(value.to_string()),
            _ => DocValue::Int32(i32::from(*value)),
        }
    }

    fn read(&self, value: &DocValue, _representation: Representation) -> Result<i16, DecodeError> {
        match value {
            DocValue::Int32(i) => Ok(*i as i16),
            DocValue::Int64(i) => Ok(*i as i16),
            DocValue::Double(d) => Ok(double_to_i64(*d) as i16),
            DocValue::Str(s) => parse_decimal(s, "i16"),
            other => Err(mismatch("i16", other)),
        }
    }
}

pub struct UInt16Serializer;

impl WireSerializer<u16> for UInt16Serializer {
    fn supported(&self) -> &'static [Representation] {
        &[
            Representation::Int32,
            Representation::Int64,
            Representation::Double,
            Representation::String,
        ]
    }

    fn write(&self, value: &u16, representation: Representation) -> DocValue {
        match representation {
            Representation::Int64 => DocValue::Int64(i64::from(*value)),
            Representation::Double => DocValue::Double(f64::from(*value)),
            Representation::String => DocValue::Str(value.to_string()),
            _ => DocValue::Int32(i32::from(*value)),
        }
    }

    fn read(&self, value: &DocValue, _representation: Representation) -> Result<u16, DecodeError> {
        match value {
            DocValue::Int32(i) => Ok(*i as u16),
            DocValue::Int64(i) => Ok(*i as u16),
            DocValue::Double(d) => Ok(double_to_i64(*d) as u16),
            DocValue::Str(s) => parse_decimal(s, "u16"),
            other => Err(mismatch("u16", other)),
        }
    }
}

pub struct Int32Serializer;

impl WireSerializer<i32> for Int32Serializer {
    fn supported(&self) -> &'static [Representation] {
        &[
            Representation::Int32,
            Representation::Int64,
            Representation::Double,
            Representation::String,
        ]
    }

    fn write(&self, value: &i32, representation: Representation) -> DocValue {
        match representation {
            Representation::Int64 => DocValue::Int64(i64::from(*value)),
            Representation::Double => DocValue::Double(f64::from(*value)),
            Representation::String => DocValue::Str(value.to_string()),
            _ => DocValue::Int32(*value),
        }
    }

    fn read(&self, value: &DocValue, _representation: Representation) -> Result<i32, DecodeError> {
        match value {
            DocValue::Int32(i) => Ok(*i),
            DocValue::Int64(i) => Ok(*i as i32),
            DocValue::Double(d) => Ok(double_to_i64(*d) as i32),
            DocValue::Str(s) => parse_decimal(s, "i32"),
            other => Err(mismatch("i32", other)),
        }
    }
}

pub struct UInt32Serializer;

impl WireSerializer<u32> for UInt32Serializer {
    fn supported(&self) -> &'static [Representation] {
        &[
            Representation::Int32,
            Representation::Int64,
            Representation::Double,
            Representation::String,
        ]
    }

    fn write(&self, value: &u32, representation: Representation) -> DocValue {
        match representation {
            Representation::Int64 => DocValue::Int64(i64::from(*value)),
            Representation::Double => DocValue::Double(f64::from(*value)),
            Representation::String => DocValue::Str(value.to_string()),
            // Bit reinterpretation: u32::MAX lands as -1.
            _ => DocValue::Int32(*value as i32),
        }
    }

    fn read(&self, value: &DocValue, _representation: Representation) -> Result<u32, DecodeError> {
        match value {
            DocValue::Int32(i) => Ok(*i as u32),
            DocValue::Int64(i) => Ok(*i as u32),
            DocValue::Double(d) => Ok(double_to_i64(*d) as u32),
            DocValue::Str(s) => parse_decimal(s, "u32"),
            other => Err(mismatch("u32", other)),
        }
    }
}

pub struct Int64Serializer;

impl WireSerializer<i64> for Int64Serializer {
    fn supported(&self) -> &'static [Representation] {
        &[
            Representation::Int64,
            Representation::Int32,
            Representation::Double,
            Representation::String,
        ]
    }

    fn write(&self, value: &i64, representation: Representation) -> DocValue {
        match representation {
            Representation::Int32 => DocValue::Int32(*value as i32),
            Representation::Double => DocValue::Double(*value as f64),
            Representation::String => DocValue::Str(value.to_string()),
            _ => DocValue::Int64(*value),
        }
    }

    fn read(&self, value: &DocValue, _representation: Representation) -> Result<i64, DecodeError> {
        match value {
            DocValue::Int32(i) => Ok(i64::from(*i)),
            DocValue::Int64(i) => Ok(*i),
            DocValue::Double(d) => Ok(double_to_i64(*d)),
            DocValue::Str(s) => parse_decimal(s, "i64"),
            other => Err(mismatch("i64", other)),
        }
    }
}

pub struct UInt64Serializer;

impl WireSerializer<u64> for UInt64Serializer {
    fn supported(&self) -> &'static [Representation] {
        &[
            Representation::Int64,
            Representation::Int32,
            Representation::Double,
            Representation::String,
        ]
    }

    fn write(&self, value: &u64, representation: Representation) -> DocValue {
        match representation {
            Representation::Int32 => DocValue::Int32(*value as i32),
            Representation::Double => DocValue::Double(*value as f64),
            Representation::String => DocValue::Str(value.to_string()),
            // Bit reinterpretation: u64::MAX lands as -1.
            _ => DocValue::Int64(*value as i64),
        }
    }

    fn read(&self, value: &DocValue, _representation: Representation) -> Result<u64, DecodeError> {
        match value {
            // Sign extension inverts the bit-pattern narrowing for the
            // values the writer can produce.
            DocValue::Int32(i) => Ok(i64::from(*i) as u64),
            DocValue::Int64(i) => Ok(*i as u64),
            DocValue::Double(d) => Ok(double_to_i64(*d) as u64),
            DocValue::Str(s) => parse_decimal(s, "u64"),
            other => Err(mismatch("u64", other)),
        }
    }
}

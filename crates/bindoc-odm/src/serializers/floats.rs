//! Floating-point serializers.
//!
//! Integer representations truncate toward zero (1.5 becomes 1, never 2).
//! The String representation is exactly what the text renderer's double
//! stringifier produces, including the `NaN` / `INF` / `-INF` tokens.

use bindoc_wire::{format_double, DocValue};

use crate::error::DecodeError;
use crate::representation::Representation;
use crate::serializer::{mismatch, WireSerializer};

fn parse_double(s: &str, type_name: &'static str) -> Result<f64, DecodeError> {
    match s {
        "NaN" => Ok(f64::NAN),
        "INF" => Ok(f64::INFINITY),
        "-INF" => Ok(f64::NEG_INFINITY),
        _ => s.parse::<f64>().map_err(|_| DecodeError::Parse {
            type_name,
            value: s.to_owned(),
        }),
    }
}

/// Widens single to double. The extremes map onto the double extremes so
/// that min/max survive a write/read cycle.
fn widen(value: f32) -> f64 {
    if value == f32::MIN {
        f64::MIN
    } else if value == f32::MAX {
        f64::MAX
    } else {
        f64::from(value)
    }
}

/// Narrows double to single; precision loss is accepted, not an error.
fn narrow(value: f64) -> f32 {
    if value == f64::MIN {
        f32::MIN
    } else if value == f64::MAX {
        f32::MAX
    } else {
        value as f32
    }
}

pub struct Float32Serializer;

impl WireSerializer<f32> for Float32Serializer {
    fn supported(&self) -> &'static [Representation] {
        &[
            Representation::Double,
            Representation::Int32,
            Representation::Int64,
            Representation::String,
        ]
    }

    fn write(&self, value: &f32, representation: Representation) -> DocValue {
        match representation {
            Representation::Int32 => DocValue::Int32(*value as i32),
            Representation::Int64 => DocValue::Int64(*value as i64),
            Representation::String => DocValue::Str(format_double(widen(*value))),
            _ => DocValue::Double(widen(*value)),
        }
    }

    fn read(&self, value: &DocValue, _representation: Representation) -> Result<f32, DecodeError> {
        match value {
            DocValue::Double(d) => Ok(narrow(*d)),
            DocValue::Int32(i) => Ok(*i as f32),
            DocValue::Int64(i) => Ok(*i as f32),
            DocValue::Str(s) => Ok(narrow(parse_double(s, "f32")?)),
            other => Err(mismatch("f32", other)),
        }
    }
}

pub struct Float64Serializer;

impl WireSerializer<f64> for Float64Serializer {
    fn supported(&self) -> &'static [Representation] {
        &[
            Representation::Double,
            Representation::Int32,
            Representation::Int64,
            Representation::String,
        ]
    }

    fn write(&self, value: &f64, representation: Representation) -> DocValue {
        match representation {
            Representation::Int32 => DocValue::Int32(*value as i32),
            Representation::Int64 => DocValue::Int64(*value as i64),
            Representation::String => DocValue::Str(format_double(*value)),
            _ => DocValue::Double(*value),
        }
    }

    fn read(&self, value: &DocValue, _representation: Representation) -> Result<f64, DecodeError> {
        match value {
            DocValue::Double(d) => Ok(*d),
            DocValue::Int32(i) => Ok(f64::from(*i)),
            DocValue::Int64(i) => Ok(*i as f64),
            DocValue::Str(s) => parse_double(s, "f64"),
            other => Err(mismatch("f64", other)),
        }
    }
}

//! Boolean, character, and string serializers.

use bindoc_wire::DocValue;

use crate::error::DecodeError;
use crate::representation::Representation;
use crate::serializer::{mismatch, WireSerializer};

pub struct BooleanSerializer;

impl WireSerializer<bool> for BooleanSerializer {
    fn supported(&self) -> &'static [Representation] {
        &[Representation::Boolean]
    }

    fn write(&self, value: &bool, _representation: Representation) -> DocValue {
        DocValue::Boolean(*value)
    }

    fn read(&self, value: &DocValue, _representation: Representation) -> Result<bool, DecodeError> {
        match value {
            DocValue::Boolean(b) => Ok(*b),
            other => Err(mismatch("bool", other)),
        }
    }
}

pub struct StringSerializer;

impl WireSerializer<String> for StringSerializer {
    fn supported(&self) -> &'static [Representation] {
        &[Representation::String]
    }

    fn write(&self, value: &String, _representation: Representation) -> DocValue {
        DocValue::Str(value.clone())
    }

    fn read(
        &self,
        value: &DocValue,
        _representation: Representation,
    ) -> Result<String, DecodeError> {
        match value {
            DocValue::Str(s) => Ok(s.clone()),
            other => Err(mismatch("String", other)),
        }
    }
}

pub struct CharSerializer;

impl WireSerializer<char> for CharSerializer {
    fn supported(&self) -> &'static [Representation] {
        &[Representation::Int32, Representation::String]
    }

    fn write(&self, value: &char, representation: Representation) -> DocValue {
        match representation {
            Representation::String => DocValue::Str(value.to_string()),
            _ => DocValue::Int32(*value as i32),
        }
    }

    fn read(&self, value: &DocValue, _representation: Representation) -> Result<char, DecodeError> {
        match value {
            DocValue::Int32(i) => u32::try_from(*i)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| DecodeError::OutOfRange {
                    type_name: "char",
                    value: i.to_string(),
                }),
            DocValue::Str(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(DecodeError::Parse {
                        type_name: "char",
                        value: s.clone(),
                    }),
                }
            }
            other => Err(mismatch("char", other)),
        }
    }
}

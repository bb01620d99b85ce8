//! Resource locator serializer.

use bindoc_wire::DocValue;

use crate::error::DecodeError;
use crate::representation::Representation;
use crate::serializer::{mismatch, WireSerializer};
use crate::types::Uri;

pub struct UriSerializer;

impl WireSerializer<Uri> for UriSerializer {
    fn supported(&self) -> &'static [Representation] {
        &[Representation::String]
    }

    fn write(&self, value: &Uri, _representation: Representation) -> DocValue {
        // An absent locator is Null, never the empty string.
        if value.is_empty() {
            DocValue::Null
        } else {
            DocValue::Str(value.as_str().to_owned())
        }
    }

    fn read(&self, value: &DocValue, _representation: Representation) -> Result<Uri, DecodeError> {
        match value {
            DocValue::Str(s) => Ok(Uri::new(s.clone())),
            DocValue::Null => Ok(Uri::default()),
            other => Err(mismatch("Uri", other)),
        }
    }
}

//! Locale identifier serializer.
//!
//! The representation is chosen by the value, not by a directive: a locale
//! using the system default override behavior writes as a bare name string,
//! while a non-default override flag forces the document form. This rule is
//! specific to this one type.

use bindoc_wire::{DocValue, Document};

use crate::error::DecodeError;
use crate::representation::Representation;
use crate::serializer::{mismatch, WireSerializer};
use crate::types::LocaleId;

pub struct LocaleIdSerializer;

impl WireSerializer<LocaleId> for LocaleIdSerializer {
    fn supported(&self) -> &'static [Representation] {
        &[Representation::String, Representation::Document]
    }

    fn write(&self, value: &LocaleId, _representation: Representation) -> DocValue {
        if value.use_user_override {
            DocValue::Str(value.name.clone())
        } else {
            let mut doc = Document::new();
            doc.push("Name", value.name.clone());
            doc.push("UseUserOverride", false);
            DocValue::Document(doc)
        }
    }

    fn read(
        &self,
        value: &DocValue,
        _representation: Representation,
    ) -> Result<LocaleId, DecodeError> {
        match value {
            DocValue::Str(name) => Ok(LocaleId::new(name.clone())),
            DocValue::Document(doc) => {
                let name = match doc.get("Name") {
                    Some(DocValue::Str(name)) => name.clone(),
                    Some(other) => return Err(mismatch("Name", other)),
                    None => return Err(DecodeError::MissingMember("Name")),
                };
                match doc.get("UseUserOverride") {
                    Some(DocValue::Boolean(true)) | None => Ok(LocaleId::new(name)),
                    Some(DocValue::Boolean(false)) => Ok(LocaleId::without_user_override(name)),
                    Some(other) => Err(mismatch("UseUserOverride", other)),
                }
            }
            other => Err(mismatch("LocaleId", other)),
        }
    }
}

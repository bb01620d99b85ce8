//! Dotted version number serializer.

use bindoc_wire::{DocValue, Document};

use crate::error::DecodeError;
use crate::representation::Representation;
use crate::serializer::{mismatch, WireSerializer};
use crate::types::Version;

fn parse_component(s: &str, source: &str) -> Result<u32, DecodeError> {
    s.parse::<u32>().map_err(|_| DecodeError::Parse {
        type_name: "Version",
        value: source.to_owned(),
    })
}

fn read_component(doc: &Document, name: &'static str) -> Result<Option<u32>, DecodeError> {
    match doc.get(name) {
        Some(DocValue::Int32(i)) if *i >= 0 => Ok(Some(*i as u32)),
        Some(DocValue::Int32(i)) => Err(DecodeError::OutOfRange {
            type_name: "Version",
            value: i.to_string(),
        }),
        Some(other) => Err(mismatch(name, other)),
        None => Ok(None),
    }
}

pub struct VersionSerializer;

impl WireSerializer<Version> for VersionSerializer {
    fn supported(&self) -> &'static [Representation] {
        &[Representation::String, Representation::Document]
    }

    fn write(&self, value: &Version, representation: Representation) -> DocValue {
        match representation {
            Representation::Document => {
                // Trailing absent components are omitted entirely, not null.
                let mut doc = Document::new();
                doc.push("Major", value.major as i32);
                doc.push("Minor", value.minor as i32);
                if let Some(build) = value.build {
                    doc.push("Build", build as i32);
                    if let Some(revision) = value.revision {
                        doc.push("Revision", revision as i32);
                    }
                }
                DocValue::Document(doc)
            }
            _ => DocValue::Str(value.to_string()),
        }
    }

    fn read(
        &self,
        value: &DocValue,
        _representation: Representation,
    ) -> Result<Version, DecodeError> {
        match value {
            DocValue::Document(doc) => {
                let major = read_component(doc, "Major")?
                    .ok_or(DecodeError::MissingMember("Major"))?;
                let minor = read_component(doc, "Minor")?
                    .ok_or(DecodeError::MissingMember("Minor"))?;
                Ok(Version {
                    major,
                    minor,
                    build: read_component(doc, "Build")?,
                    revision: read_component(doc, "Revision")?,
                })
            }
            DocValue::Str(s) => {
                let parts: Vec<&str> = s.split('.').collect();
                if parts.len() < 2 || parts.len() > 4 {
                    return Err(DecodeError::Parse {
                        type_name: "Version",
                        value: s.clone(),
                    });
                }
                Ok(Version {
                    major: parse_component(parts[0], s)?,
                    minor: parse_component(parts[1], s)?,
                    build: parts.get(2).map(|p| parse_component(p, s)).transpose()?,
                    revision: parts.get(3).map(|p| parse_component(p, s)).transpose()?,
                })
            }
            other => Err(mismatch("Version", other)),
        }
    }
}

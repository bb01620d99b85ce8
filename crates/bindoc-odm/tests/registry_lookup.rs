//! Serializer registry resolution: exact match, family fallback, failure,
//! and behavior under concurrent readers.

use std::sync::Arc;

use bindoc_odm::{
    from_bytes, register_serializer, to_bytes, to_text, ClassMapBuilder, DecodeError,
    DocumentMapped, Mapped, Representation, SerializerRegistry, WireSerializer,
};
use bindoc_wire::DocValue;

// ----------------------------------------------------------------
// Exact match beats the sequence family: Vec<u8> is bytes, not an array

#[derive(Debug, Default, PartialEq)]
struct Mixed {
    raw: Vec<u8>,
    counts: Vec<i32>,
    names: Vec<String>,
    nested: Vec<Vec<i32>>,
}

impl DocumentMapped for Mixed {
    fn map(m: &mut ClassMapBuilder<Self>) {
        m.member("Raw", |c: &Self| c.raw.clone(), |c, v| c.raw = v);
        m.member("Counts", |c: &Self| c.counts.clone(), |c, v| c.counts = v);
        m.member("Names", |c: &Self| c.names.clone(), |c, v| c.names = v);
        m.member("Nested", |c: &Self| c.nested.clone(), |c, v| c.nested = v);
    }
}

#[test]
fn byte_vectors_resolve_to_binary_not_sequence() {
    let value = Mixed {
        raw: vec![1, 2],
        counts: vec![3, 4],
        names: vec!["a".into()],
        nested: vec![vec![5], vec![]],
    };
    assert_eq!(
        to_text(&value).unwrap(),
        "{ \"Raw\" : { \"$binary\" : \"AQI=\", \"$type\" : \"00\" }, \
         \"Counts\" : [3, 4], \"Names\" : [\"a\"], \"Nested\" : [[5], []] }"
    );
    let bytes = to_bytes(&value).unwrap();
    assert_eq!(from_bytes::<Mixed>(&bytes).unwrap(), value);
}

// ----------------------------------------------------------------
// Unresolvable types fail with UnsupportedTypeError

#[derive(Debug, Clone, PartialEq, Default)]
struct Opaque;

impl Mapped for Opaque {}

#[test]
fn unregistered_type_is_unsupported() {
    assert!(SerializerRegistry::global().lookup::<Opaque>().is_err());
}

// ----------------------------------------------------------------
// Explicit registration extends the registry and stays stable

#[derive(Debug, Clone, PartialEq, Default)]
struct Celsius(f64);

impl Mapped for Celsius {}

struct CelsiusSerializer;

impl WireSerializer<Celsius> for CelsiusSerializer {
    fn supported(&self) -> &'static [Representation] {
        &[Representation::Double]
    }

    fn write(&self, value: &Celsius, _representation: Representation) -> DocValue {
        DocValue::Double(value.0)
    }

    fn read(
        &self,
        value: &DocValue,
        _representation: Representation,
    ) -> Result<Celsius, DecodeError> {
        match value {
            DocValue::Double(d) => Ok(Celsius(*d)),
            _ => Err(DecodeError::TypeMismatch { expected: "Celsius", actual: "other" }),
        }
    }
}

#[derive(Debug, Default, PartialEq)]
struct Weather {
    temp: Celsius,
}

impl DocumentMapped for Weather {
    fn map(m: &mut ClassMapBuilder<Self>) {
        m.member("Temp", |c: &Self| c.temp.clone(), |c, v| c.temp = v);
    }
}

#[test]
fn registered_serializer_resolves_and_roundtrips() {
    register_serializer::<Celsius>(Arc::new(CelsiusSerializer));
    let value = Weather { temp: Celsius(21.5) };
    assert_eq!(to_text(&value).unwrap(), "{ \"Temp\" : 21.5 }");
    let bytes = to_bytes(&value).unwrap();
    assert_eq!(from_bytes::<Weather>(&bytes).unwrap(), value);
}

// ----------------------------------------------------------------
// Concurrent readers while registrations land

#[derive(Debug, Default, PartialEq)]
struct Hot {
    n: i32,
    s: String,
}

impl DocumentMapped for Hot {
    fn map(m: &mut ClassMapBuilder<Self>) {
        m.member("N", |c: &Self| c.n, |c, v| c.n = v);
        m.member("S", |c: &Self| c.s.clone(), |c, v| c.s = v);
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Late(i32);

impl Mapped for Late {}

struct LateSerializer;

impl WireSerializer<Late> for LateSerializer {
    fn supported(&self) -> &'static [Representation] {
        &[Representation::Int32]
    }

    fn write(&self, value: &Late, _representation: Representation) -> DocValue {
        DocValue::Int32(value.0)
    }

    fn read(&self, value: &DocValue, _representation: Representation) -> Result<Late, DecodeError> {
        match value {
            DocValue::Int32(i) => Ok(Late(*i)),
            _ => Err(DecodeError::TypeMismatch { expected: "Late", actual: "other" }),
        }
    }
}

#[test]
fn reads_proceed_while_registration_lands() {
    let readers: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                for n in 0..200 {
                    let value = Hot { n: i * 1000 + n, s: "tick".into() };
                    let bytes = to_bytes(&value).unwrap();
                    assert_eq!(from_bytes::<Hot>(&bytes).unwrap(), value);
                }
            })
        })
        .collect();
    // Registration interleaves with read traffic; readers see the old or
    // the new binding, never a torn one.
    register_serializer::<Late>(Arc::new(LateSerializer));
    assert!(SerializerRegistry::global().lookup::<Late>().is_ok());
    for reader in readers {
        reader.join().unwrap();
    }
}

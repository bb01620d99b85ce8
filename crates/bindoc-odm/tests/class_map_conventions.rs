//! Class-map construction: identifier conventions, directive validation,
//! defaults, and concurrent build safety.

use std::sync::Arc;

use bindoc_odm::{
    class_map, from_bytes, register_id_convention, to_bytes, to_text, ClassMapBuilder,
    ConfigurationError, DecodeError, DocumentMapped, NamedIdConvention, Representation,
};
use bindoc_wire::{DocEncoder, Document};

// ----------------------------------------------------------------
// Identifier conventions

#[derive(Debug, Default, PartialEq)]
struct Order {
    id: i32,
    item: String,
}

impl DocumentMapped for Order {
    fn map(m: &mut ClassMapBuilder<Self>) {
        m.member("Id", |c: &Self| c.id, |c, v| c.id = v);
        m.member("Item", |c: &Self| c.item.clone(), |c, v| c.item = v);
    }
}

#[test]
fn named_convention_selects_id_and_serializes_it_first() {
    let map = class_map::<Order>().unwrap();
    assert_eq!(map.identifier(), Some("Id"));
    let value = Order { id: 7, item: "teapot".into() };
    assert_eq!(
        to_text(&value).unwrap(),
        "{ \"_id\" : 7, \"Item\" : \"teapot\" }"
    );
    let bytes = to_bytes(&value).unwrap();
    assert_eq!(from_bytes::<Order>(&bytes).unwrap(), value);
}

#[derive(Debug, Default, PartialEq)]
struct Anonymous {
    label: String,
}

impl DocumentMapped for Anonymous {
    fn map(m: &mut ClassMapBuilder<Self>) {
        m.member("Label", |c: &Self| c.label.clone(), |c, v| c.label = v);
    }
}

#[test]
fn missing_candidate_member_yields_no_identifier() {
    // No member named "Id": the convention declines, which is not an error.
    let map = class_map::<Anonymous>().unwrap();
    assert_eq!(map.identifier(), None);
    let value = Anonymous { label: "x".into() };
    assert_eq!(to_text(&value).unwrap(), "{ \"Label\" : \"x\" }");
}

#[derive(Debug, Default, PartialEq)]
struct Keyed {
    serial: i64,
    id: i32,
}

impl DocumentMapped for Keyed {
    fn map(m: &mut ClassMapBuilder<Self>) {
        m.member("Serial", |c: &Self| c.serial, |c, v| c.serial = v)
            .id();
        m.member("Id", |c: &Self| c.id, |c, v| c.id = v);
    }
}

#[test]
fn explicit_id_overrides_the_convention_chain() {
    let map = class_map::<Keyed>().unwrap();
    assert_eq!(map.identifier(), Some("Serial"));
    let value = Keyed { serial: 42, id: 1 };
    assert_eq!(to_text(&value).unwrap(), "{ \"_id\" : 42, \"Id\" : 1 }");
}

#[derive(Debug, Default, PartialEq)]
struct Tagged {
    tag_no: i32,
    body: String,
}

impl DocumentMapped for Tagged {
    fn map(m: &mut ClassMapBuilder<Self>) {
        m.member("TagNo", |c: &Self| c.tag_no, |c, v| c.tag_no = v);
        m.member("Body", |c: &Self| c.body.clone(), |c, v| c.body = v);
    }
}

#[test]
fn registered_convention_extends_the_chain() {
    // Register before the type's map is first built.
    register_id_convention(Arc::new(NamedIdConvention::new("TagNo")));
    let map = class_map::<Tagged>().unwrap();
    assert_eq!(map.identifier(), Some("TagNo"));
}

// ----------------------------------------------------------------
// Directive validation at build time

#[derive(Debug, Default)]
struct BadDirective {
    flag: bool,
}

impl DocumentMapped for BadDirective {
    fn map(m: &mut ClassMapBuilder<Self>) {
        // Boolean members have exactly one legal representation.
        m.member("Flag", |c: &Self| c.flag, |c, v| c.flag = v)
            .representation(Representation::Int64);
    }
}

#[test]
fn illegal_representation_fails_at_build_not_serialize() {
    match class_map::<BadDirective>() {
        Err(ConfigurationError::IllegalRepresentation { representation, .. }) => {
            assert_eq!(representation, Representation::Int64);
        }
        other => panic!("expected IllegalRepresentation, got {other:?}"),
    }
}

#[derive(Debug, Default)]
struct Duplicated {
    a: i32,
    b: i32,
}

impl DocumentMapped for Duplicated {
    fn map(m: &mut ClassMapBuilder<Self>) {
        m.member("N", |c: &Self| c.a, |c, v| c.a = v);
        m.member("N", |c: &Self| c.b, |c, v| c.b = v);
    }
}

#[test]
fn duplicate_wire_names_are_rejected() {
    assert!(matches!(
        class_map::<Duplicated>(),
        Err(ConfigurationError::DuplicateMember(name)) if name == "N"
    ));
}

// ----------------------------------------------------------------
// Defaults

#[derive(Debug, Default, PartialEq)]
struct WithDefaults {
    name: String,
    retries: i32,
}

impl DocumentMapped for WithDefaults {
    fn map(m: &mut ClassMapBuilder<Self>) {
        m.member("Name", |c: &Self| c.name.clone(), |c, v| c.name = v);
        m.member("Retries", |c: &Self| c.retries, |c, v| c.retries = v)
            .default_value(3)
            .omit_if_default();
    }
}

#[test]
fn default_valued_member_is_omitted_and_restored() {
    let value = WithDefaults { name: "job".into(), retries: 3 };
    assert_eq!(to_text(&value).unwrap(), "{ \"Name\" : \"job\" }");
    let bytes = to_bytes(&value).unwrap();
    let rehydrated: WithDefaults = from_bytes(&bytes).unwrap();
    assert_eq!(rehydrated.retries, 3, "configured default applies on read");

    let changed = WithDefaults { name: "job".into(), retries: 5 };
    assert_eq!(
        to_text(&changed).unwrap(),
        "{ \"Name\" : \"job\", \"Retries\" : 5 }"
    );
}

#[test]
fn unknown_element_is_a_decode_error() {
    let mut doc = Document::new();
    doc.push("Name", "x");
    doc.push("Bogus", 1);
    let bytes = DocEncoder::new().encode(&doc);
    assert!(matches!(
        from_bytes::<WithDefaults>(&bytes),
        Err(DecodeError::UnexpectedMember(name)) if name == "Bogus"
    ));
}

// ----------------------------------------------------------------
// Concurrent build

#[derive(Debug, Default, PartialEq)]
struct Contended {
    a: i32,
    b: String,
    c: Option<f64>,
}

impl DocumentMapped for Contended {
    fn map(m: &mut ClassMapBuilder<Self>) {
        m.member("A", |c: &Self| c.a, |c, v| c.a = v);
        m.member("B", |c: &Self| c.b.clone(), |c, v| c.b = v);
        m.member("C", |c: &Self| c.c, |c, v| c.c = v);
    }
}

#[test]
fn concurrent_first_builds_agree() {
    let value = Contended { a: 1, b: "x".into(), c: Some(2.5) };
    let expected = to_bytes(&value).unwrap();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            std::thread::spawn(move || {
                let value = Contended { a: 1, b: "x".into(), c: Some(2.5) };
                to_bytes(&value).unwrap()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

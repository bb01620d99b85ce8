//! Elapsed-time and date-time representation matrices.

use std::fmt::Debug;

use bindoc_odm::{
    from_bytes, to_bytes, to_text, ClassMapBuilder, DocumentMapped, OffsetDateTime,
    Representation, TimeSpan, UtcDateTime,
};

fn assert_text_and_roundtrip<T>(value: &T, expected_text: &str)
where
    T: DocumentMapped + PartialEq + Debug,
{
    assert_eq!(to_text(value).unwrap(), expected_text);
    let bytes = to_bytes(value).unwrap();
    let rehydrated: T = from_bytes(&bytes).unwrap();
    assert_eq!(&rehydrated, value);
    assert_eq!(to_bytes(&rehydrated).unwrap(), bytes);
}

// ----------------------------------------------------------------
// TimeSpan: Int64 raw ticks, or the fixed hh:mm:ss text

#[derive(Debug, Default, PartialEq)]
struct TimeSpanFields {
    l: TimeSpan,
    s: TimeSpan,
}

impl DocumentMapped for TimeSpanFields {
    fn map(m: &mut ClassMapBuilder<Self>) {
        m.member("L", |c: &Self| c.l, |c, v| c.l = v)
            .representation(Representation::Int64);
        m.member("S", |c: &Self| c.s, |c, v| c.s = v)
            .representation(Representation::String);
    }
}

fn timespan_fields(span: TimeSpan) -> TimeSpanFields {
    TimeSpanFields { l: span, s: span }
}

#[test]
fn timespan_min_value() {
    assert_text_and_roundtrip(
        &timespan_fields(TimeSpan::MIN),
        "{ \"L\" : -9223372036854775808, \"S\" : \"-10675199.02:48:05.4775808\" }",
    );
}

#[test]
fn timespan_minus_one_minute() {
    assert_text_and_roundtrip(
        &timespan_fields(TimeSpan::from_minutes(-1)),
        "{ \"L\" : -600000000, \"S\" : \"-00:01:00\" }",
    );
}

#[test]
fn timespan_minus_one_second() {
    assert_text_and_roundtrip(
        &timespan_fields(TimeSpan::from_seconds(-1)),
        "{ \"L\" : -10000000, \"S\" : \"-00:00:01\" }",
    );
}

#[test]
fn timespan_zero() {
    assert_text_and_roundtrip(
        &timespan_fields(TimeSpan::ZERO),
        "{ \"L\" : 0, \"S\" : \"00:00:00\" }",
    );
}

#[test]
fn timespan_one_second() {
    assert_text_and_roundtrip(
        &timespan_fields(TimeSpan::from_seconds(1)),
        "{ \"L\" : 10000000, \"S\" : \"00:00:01\" }",
    );
}

#[test]
fn timespan_one_minute() {
    assert_text_and_roundtrip(
        &timespan_fields(TimeSpan::from_minutes(1)),
        "{ \"L\" : 600000000, \"S\" : \"00:01:00\" }",
    );
}

#[test]
fn timespan_max_value() {
    assert_text_and_roundtrip(
        &timespan_fields(TimeSpan::MAX),
        "{ \"L\" : 9223372036854775807, \"S\" : \"10675199.02:48:05.4775807\" }",
    );
}

// ----------------------------------------------------------------
// OffsetDateTime: [ticks, offsetMinutes] array, explicit document, or
// ISO-8601 text with a numeric offset

#[derive(Debug, Default, PartialEq)]
struct OffsetFields {
    a: OffsetDateTime,
    d: OffsetDateTime,
    s: OffsetDateTime,
}

impl DocumentMapped for OffsetFields {
    fn map(m: &mut ClassMapBuilder<Self>) {
        m.member("A", |c: &Self| c.a, |c, v| c.a = v)
            .representation(Representation::Array);
        m.member("D", |c: &Self| c.d, |c, v| c.d = v)
            .representation(Representation::Document);
        m.member("S", |c: &Self| c.s, |c, v| c.s = v)
            .representation(Representation::String);
    }
}

#[test]
fn offset_datetime_all_representations() {
    let value = OffsetDateTime::from_civil(2010, 10, 8, 11, 29, 0, -240);
    let fields = OffsetFields { a: value, d: value, s: value };
    assert_text_and_roundtrip(
        &fields,
        "{ \"A\" : [634221341400000000, -240], \
         \"D\" : { \"DateTime\" : { \"$date\" : 1286551740000 }, \"Ticks\" : 634221341400000000, \"Offset\" : -240 }, \
         \"S\" : \"2010-10-08T11:29:00-04:00\" }",
    );
}

#[test]
fn offset_datetime_positive_offset() {
    let value = OffsetDateTime::from_civil(2023, 1, 2, 3, 4, 5, 330);
    let fields = OffsetFields { a: value, d: value, s: value };
    let text = to_text(&fields).unwrap();
    assert!(text.ends_with("\"2023-01-02T03:04:05+05:30\" }"), "{text}");
    let bytes = to_bytes(&fields).unwrap();
    let rehydrated: OffsetFields = from_bytes(&bytes).unwrap();
    assert_eq!(rehydrated, fields);
}

// ----------------------------------------------------------------
// UtcDateTime: wire-native datetime, raw ms, or Zulu text

#[derive(Debug, Default, PartialEq)]
struct UtcFields {
    n: UtcDateTime,
    l: UtcDateTime,
    s: UtcDateTime,
}

impl DocumentMapped for UtcFields {
    fn map(m: &mut ClassMapBuilder<Self>) {
        m.member("N", |c: &Self| c.n, |c, v| c.n = v)
            .representation(Representation::DateTime);
        m.member("L", |c: &Self| c.l, |c, v| c.l = v)
            .representation(Representation::Int64);
        m.member("S", |c: &Self| c.s, |c, v| c.s = v)
            .representation(Representation::String);
    }
}

#[test]
fn utc_datetime_all_representations() {
    let value = UtcDateTime::from_civil(2010, 10, 8, 15, 29, 0);
    assert_eq!(value.millis(), 1_286_551_740_000);
    let fields = UtcFields { n: value, l: value, s: value };
    assert_text_and_roundtrip(
        &fields,
        "{ \"N\" : { \"$date\" : 1286551740000 }, \"L\" : 1286551740000, \"S\" : \"2010-10-08T15:29:00Z\" }",
    );
}

#[test]
fn utc_datetime_epoch_and_millis() {
    let epoch = UtcDateTime::from_millis(0);
    let fields = UtcFields { n: epoch, l: epoch, s: UtcDateTime::from_millis(1500) };
    assert_text_and_roundtrip(
        &fields,
        "{ \"N\" : { \"$date\" : 0 }, \"L\" : 0, \"S\" : \"1970-01-01T00:00:01.500Z\" }",
    );
}

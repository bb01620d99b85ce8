//! Duration and date-time serializers.

use bindoc_wire::{DocValue, Document};

use crate::error::DecodeError;
use crate::representation::Representation;
use crate::serializer::{mismatch, WireSerializer};
use crate::types::{
    days_from_civil, OffsetDateTime, TimeSpan, UtcDateTime, DAYS_TO_EPOCH, TICKS_PER_DAY,
    TICKS_PER_HOUR, TICKS_PER_MINUTE, TICKS_PER_SECOND,
};

fn parse_error(type_name: &'static str, value: &str) -> DecodeError {
    DecodeError::Parse {
        type_name,
        value: value.to_owned(),
    }
}

fn parse_u64(s: &str) -> Option<u64> {
    if s.is_empty() {
        return None;
    }
    s.parse::<u64>().ok()
}

/// Parses `[-][d.]hh:mm:ss[.fffffff]`.
fn parse_timespan(s: &str) -> Result<TimeSpan, DecodeError> {
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let parts: Vec<&str> = rest.split(':').collect();
    let [hours_part, minutes_part, seconds_part] = parts.as_slice() else {
        return Err(parse_error("TimeSpan", s));
    };
    let (days, hours) = match hours_part.split_once('.') {
        Some((d, h)) => (
            parse_u64(d).ok_or_else(|| parse_error("TimeSpan", s))?,
            parse_u64(h).ok_or_else(|| parse_error("TimeSpan", s))?,
        ),
        None => (0, parse_u64(hours_part).ok_or_else(|| parse_error("TimeSpan", s))?),
    };
    let minutes = parse_u64(minutes_part).ok_or_else(|| parse_error("TimeSpan", s))?;
    let (seconds, fraction) = match seconds_part.split_once('.') {
        Some((sec, frac)) => {
            if frac.is_empty() || frac.len() > 7 || !frac.bytes().all(|b| b.is_ascii_digit()) {
                return Err(parse_error("TimeSpan", s));
            }
            let padded = format!("{frac:0<7}");
            (
                parse_u64(sec).ok_or_else(|| parse_error("TimeSpan", s))?,
                padded.parse::<u64>().map_err(|_| parse_error("TimeSpan", s))?,
            )
        }
        None => (
            parse_u64(seconds_part).ok_or_else(|| parse_error("TimeSpan", s))?,
            0,
        ),
    };
    if minutes > 59 || seconds > 59 {
        return Err(parse_error("TimeSpan", s));
    }
    let magnitude = days as i128 * TICKS_PER_DAY as i128
        + hours as i128 * TICKS_PER_HOUR as i128
        + minutes as i128 * TICKS_PER_MINUTE as i128
        + seconds as i128 * TICKS_PER_SECOND as i128
        + fraction as i128;
    let ticks = if negative { -magnitude } else { magnitude };
    i64::try_from(ticks)
        .map(TimeSpan::from_ticks)
        .map_err(|_| DecodeError::OutOfRange {
            type_name: "TimeSpan",
            value: s.to_owned(),
        })
}

/// Parses the shared `yyyy-MM-ddTHH:mm:ss[.f…]` prefix, returning the
/// civil fields, the fractional digits, and the unconsumed suffix.
fn parse_civil_prefix(s: &str) -> Option<(i64, u32, u32, u32, u32, u32, &str, &str)> {
    let b = s.as_bytes();
    if b.len() < 19 || b[4] != b'-' || b[7] != b'-' || b[10] != b'T' || b[13] != b':' || b[16] != b':'
    {
        return None;
    }
    let digit_spans = [0..4, 5..7, 8..10, 11..13, 14..16, 17..19];
    if digit_spans
        .iter()
        .any(|span| !b[span.clone()].iter().all(u8::is_ascii_digit))
    {
        return None;
    }
    let year = s[0..4].parse::<i64>().ok()?;
    let month = s[5..7].parse::<u32>().ok()?;
    let day = s[8..10].parse::<u32>().ok()?;
    let hour = s[11..13].parse::<u32>().ok()?;
    let minute = s[14..16].parse::<u32>().ok()?;
    let second = s[17..19].parse::<u32>().ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) || hour > 23 || minute > 59 || second > 59
    {
        return None;
    }
    let rest = &s[19..];
    let (fraction, rest) = match rest.strip_prefix('.') {
        Some(tail) => {
            let digits = tail.bytes().take_while(|b| b.is_ascii_digit()).count();
            if digits == 0 {
                return None;
            }
            (&tail[..digits], &tail[digits..])
        }
        None => ("", rest),
    };
    Some((year, month, day, hour, minute, second, fraction, rest))
}

pub struct TimeSpanSerializer;

impl WireSerializer<TimeSpan> for TimeSpanSerializer {
    fn supported(&self) -> &'static [Representation] {
        &[
            Representation::String,
            Representation::Int64,
            Representation::Double,
        ]
    }

    fn write(&self, value: &TimeSpan, representation: Representation) -> DocValue {
        match representation {
            Representation::Int64 => DocValue::Int64(value.ticks()),
            Representation::Double => DocValue::Double(value.ticks() as f64),
            _ => DocValue::Str(value.to_string()),
        }
    }

    fn read(
        &self,
        value: &DocValue,
        _representation: Representation,
    ) -> Result<TimeSpan, DecodeError> {
        match value {
            DocValue::Int64(ticks) => Ok(TimeSpan::from_ticks(*ticks)),
            DocValue::Int32(ticks) => Ok(TimeSpan::from_ticks(i64::from(*ticks))),
            DocValue::Double(ticks) => Ok(TimeSpan::from_ticks(*ticks as i64)),
            DocValue::Str(s) => parse_timespan(s),
            other => Err(mismatch("TimeSpan", other)),
        }
    }
}

pub struct UtcDateTimeSerializer;

impl WireSerializer<UtcDateTime> for UtcDateTimeSerializer {
    fn supported(&self) -> &'static [Representation] {
        &[
            Representation::DateTime,
            Representation::Int64,
            Representation::String,
        ]
    }

    fn write(&self, value: &UtcDateTime, representation: Representation) -> DocValue {
        match representation {
            Representation::Int64 => DocValue::Int64(value.millis()),
            Representation::String => DocValue::Str(value.to_string()),
            _ => DocValue::DateTime(value.millis()),
        }
    }

    fn read(
        &self,
        value: &DocValue,
        _representation: Representation,
    ) -> Result<UtcDateTime, DecodeError> {
        match value {
            DocValue::DateTime(ms) => Ok(UtcDateTime::from_millis(*ms)),
            DocValue::Int64(ms) => Ok(UtcDateTime::from_millis(*ms)),
            DocValue::Str(s) => {
                let (year, month, day, hour, minute, second, fraction, rest) =
                    parse_civil_prefix(s).ok_or_else(|| parse_error("UtcDateTime", s))?;
                if rest != "Z" || fraction.len() > 3 {
                    return Err(parse_error("UtcDateTime", s));
                }
                let millis = if fraction.is_empty() {
                    0
                } else {
                    format!("{fraction:0<3}")
                        .parse::<i64>()
                        .map_err(|_| parse_error("UtcDateTime", s))?
                };
                let base = UtcDateTime::from_civil(year, month, day, hour, minute, second);
                Ok(UtcDateTime::from_millis(base.millis() + millis))
            }
            other => Err(mismatch("UtcDateTime", other)),
        }
    }
}

pub struct OffsetDateTimeSerializer;

impl WireSerializer<OffsetDateTime> for OffsetDateTimeSerializer {
    fn supported(&self) -> &'static [Representation] {
        &[
            Representation::Array,
            Representation::Document,
            Representation::String,
        ]
    }

    fn write(&self, value: &OffsetDateTime, representation: Representation) -> DocValue {
        match representation {
            Representation::Document => {
                let mut doc = Document::new();
                doc.push("DateTime", DocValue::DateTime(value.utc_millis()));
                doc.push("Ticks", DocValue::Int64(value.ticks()));
                doc.push("Offset", DocValue::Int32(value.offset_minutes()));
                DocValue::Document(doc)
            }
            Representation::String => DocValue::Str(value.to_string()),
            _ => DocValue::Array(vec![
                DocValue::Int64(value.ticks()),
                DocValue::Int32(value.offset_minutes()),
            ]),
        }
    }

    fn read(
        &self,
        value: &DocValue,
        _representation: Representation,
    ) -> Result<OffsetDateTime, DecodeError> {
        match value {
            DocValue::Array(items) => match items.as_slice() {
                [DocValue::Int64(ticks), DocValue::Int32(offset)] => {
                    Ok(OffsetDateTime::new(*ticks, *offset))
                }
                [DocValue::Int64(ticks), DocValue::Int64(offset)] => {
                    Ok(OffsetDateTime::new(*ticks, *offset as i32))
                }
                _ => Err(parse_error("OffsetDateTime", "array")),
            },
            DocValue::Document(doc) => {
                let ticks = match doc.get("Ticks") {
                    Some(DocValue::Int64(t)) => *t,
                    Some(other) => return Err(mismatch("Ticks", other)),
                    None => return Err(DecodeError::MissingMember("Ticks")),
                };
                let offset = match doc.get("Offset") {
                    Some(DocValue::Int32(o)) => *o,
                    Some(other) => return Err(mismatch("Offset", other)),
                    None => return Err(DecodeError::MissingMember("Offset")),
                };
                Ok(OffsetDateTime::new(ticks, offset))
            }
            DocValue::Str(s) => {
                let (year, month, day, hour, minute, second, fraction, rest) =
                    parse_civil_prefix(s).ok_or_else(|| parse_error("OffsetDateTime", s))?;
                if fraction.len() > 7 {
                    return Err(parse_error("OffsetDateTime", s));
                }
                let frac_ticks = if fraction.is_empty() {
                    0
                } else {
                    format!("{fraction:0<7}")
                        .parse::<i64>()
                        .map_err(|_| parse_error("OffsetDateTime", s))?
                };
                let offset = parse_offset_suffix(rest).ok_or_else(|| parse_error("OffsetDateTime", s))?;
                let days = days_from_civil(year, month, day) + DAYS_TO_EPOCH;
                let ticks = days * TICKS_PER_DAY
                    + i64::from(hour) * TICKS_PER_HOUR
                    + i64::from(minute) * TICKS_PER_MINUTE
                    + i64::from(second) * TICKS_PER_SECOND
                    + frac_ticks;
                Ok(OffsetDateTime::new(ticks, offset))
            }
            other => Err(mismatch("OffsetDateTime", other)),
        }
    }
}

/// Parses the `±hh:mm` numeric offset suffix.
fn parse_offset_suffix(s: &str) -> Option<i32> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let (hours, minutes) = rest.split_once(':')?;
    if hours.len() != 2 || minutes.len() != 2 {
        return None;
    }
    let hours = hours.parse::<i32>().ok()?;
    let minutes = minutes.parse::<i32>().ok()?;
    if hours > 14 || minutes > 59 {
        return None;
    }
    Some(sign * (hours * 60 + minutes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timespan_string_roundtrip() {
        for ticks in [
            0,
            1,
            -1,
            TICKS_PER_SECOND,
            -TICKS_PER_MINUTE,
            TICKS_PER_DAY + TICKS_PER_HOUR * 2,
            i64::MAX,
            i64::MIN,
        ] {
            let span = TimeSpan::from_ticks(ticks);
            let parsed = parse_timespan(&span.to_string()).expect("rendered spans parse");
            assert_eq!(parsed, span, "ticks={ticks}");
        }
    }

    #[test]
    fn timespan_rejects_malformed() {
        for s in ["", "1:2", "aa:bb:cc", "00:60:00", "00:00:60", "00:00:00.12345678"] {
            assert!(parse_timespan(s).is_err(), "{s:?} must not parse");
        }
    }

    #[test]
    fn offset_suffix_parses_both_signs() {
        assert_eq!(parse_offset_suffix("-04:00"), Some(-240));
        assert_eq!(parse_offset_suffix("+05:30"), Some(330));
        assert_eq!(parse_offset_suffix("Z"), None);
        assert_eq!(parse_offset_suffix("+5:30"), None);
    }
}

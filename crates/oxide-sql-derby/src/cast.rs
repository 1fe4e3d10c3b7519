//! Casting driver values to host values.
//!
//! Derby hands most values back as text. [`try_cast`] converts one of them
//! according to the column's declared type; [`cast`] is the lenient form that
//! turns unparseable temporal values into NULL.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Timelike};
use oxide_sql_adapter::{ColumnType, SqlValue, TimezonePolicy};
use regex::Regex;
use thiserror::Error;

static NULL_LIKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(?:null)?\s*$").expect("valid null pattern"));

static HEX_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9A-Fa-f]{2}").expect("valid hex pattern"));

static LEADING_FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+(?:\.\d+)?|\.\d+)(?:[eE][+-]?\d+)?)").expect("valid float pattern")
});

static TEMPORAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^\s*
        (?:(?P<year>\d{4})-(?P<month>\d{1,2})(?:-(?P<day>\d{1,2}))?)?
        (?:[T\s]+)?
        (?:(?P<hour>\d{1,2}):(?P<minute>\d{2})(?::(?P<second>\d{2})(?:\.(?P<fraction>\d{1,9}))?)?)?
        \s*
        (?P<zone>Z|UTC|[+-]\d{2}:?\d{2})?
        \s*$",
    )
    .expect("valid temporal pattern")
});

const DEFAULT_YEAR: i32 = 2000;

/// Reasons a value could not be cast.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CastError {
    /// The text does not describe a valid date or time.
    #[error("invalid date/time value: {0}")]
    InvalidTemporal(String),

    /// The value has no numeric reading.
    #[error("value has no numeric form: {0}")]
    NotNumeric(String),
}

/// Returns true for values that cast to NULL whatever the declared type.
#[must_use]
pub fn is_null_like(value: &SqlValue) -> bool {
    value.is_null() || value.as_text().is_some_and(|text| NULL_LIKE.is_match(text))
}

/// Casts a driver value, reporting parse failures.
pub fn try_cast(
    value: &SqlValue,
    column_type: &ColumnType,
    timezone: TimezonePolicy,
) -> Result<SqlValue, CastError> {
    if is_null_like(value) {
        return Ok(SqlValue::Null);
    }
    match column_type {
        ColumnType::Integer | ColumnType::PrimaryKey => Ok(SqlValue::Int(to_integer(value))),
        ColumnType::Float => to_float(value).map(SqlValue::Float),
        ColumnType::Binary => Ok(SqlValue::Blob(to_bytes(value))),
        ColumnType::Datetime => to_date_or_time(value, timezone),
        ColumnType::Timestamp | ColumnType::Time => {
            to_time(value, timezone).map(SqlValue::Timestamp)
        }
        ColumnType::String
        | ColumnType::Text
        | ColumnType::Decimal
        | ColumnType::Date
        | ColumnType::Boolean
        | ColumnType::Other(_) => Ok(value.clone()),
    }
}

/// Casts a driver value; values that fail to parse become NULL.
#[must_use]
pub fn cast(value: &SqlValue, column_type: &ColumnType, timezone: TimezonePolicy) -> SqlValue {
    try_cast(value, column_type, timezone).unwrap_or(SqlValue::Null)
}

/// Integer reading of a value.
///
/// Text contributes its leading integer (`"12abc"` is 12, `"abc"` is 0).
/// Values without a numeric reading count as booleans: NULL and `false` are
/// 0, anything else is 1.
#[must_use]
pub fn to_integer(value: &SqlValue) -> i64 {
    match value {
        SqlValue::Text(text) => leading_integer(text),
        SqlValue::Int(n) => *n,
        #[allow(clippy::cast_possible_truncation)]
        SqlValue::Float(f) => *f as i64,
        SqlValue::Timestamp(t) => t.timestamp(),
        SqlValue::Null | SqlValue::Bool(false) => 0,
        SqlValue::Bool(true) | SqlValue::Blob(_) | SqlValue::Date(_) => 1,
    }
}

/// Parses the leading integer of `text`, or 0 when there is none.
///
/// Leading whitespace and a sign are accepted, as are single underscores
/// between digits. Values beyond `i64` saturate.
#[must_use]
pub fn leading_integer(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut result: i64 = 0;
    let mut after_digit = false;
    for ch in digits.chars() {
        match ch {
            '0'..='9' => {
                let digit = i64::from(ch as u8 - b'0');
                result = result.saturating_mul(10);
                result = if negative {
                    result.saturating_sub(digit)
                } else {
                    result.saturating_add(digit)
                };
                after_digit = true;
            }
            '_' if after_digit => after_digit = false,
            _ => break,
        }
    }
    result
}

fn to_float(value: &SqlValue) -> Result<f64, CastError> {
    match value {
        SqlValue::Text(text) => Ok(LEADING_FLOAT
            .captures(text)
            .and_then(|caps| caps[1].parse().ok())
            .unwrap_or(0.0)),
        #[allow(clippy::cast_precision_loss)]
        SqlValue::Int(n) => Ok(*n as f64),
        SqlValue::Float(f) => Ok(*f),
        SqlValue::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        SqlValue::Null => Ok(0.0),
        #[allow(clippy::cast_precision_loss)]
        SqlValue::Timestamp(t) => {
            Ok(t.timestamp() as f64 + f64::from(t.timestamp_subsec_nanos()) / 1e9)
        }
        SqlValue::Blob(_) | SqlValue::Date(_) => Err(CastError::NotNumeric(value.to_string())),
    }
}

fn to_bytes(value: &SqlValue) -> Vec<u8> {
    match value {
        SqlValue::Blob(bytes) => bytes.clone(),
        other => decode_hex_pairs(&other.to_string()),
    }
}

/// Decodes every two-hex-digit group in `text`, skipping anything else.
#[must_use]
pub fn decode_hex_pairs(text: &str) -> Vec<u8> {
    HEX_PAIR
        .find_iter(text)
        .filter_map(|pair| u8::from_str_radix(pair.as_str(), 16).ok())
        .collect()
}

fn to_date_or_time(value: &SqlValue, timezone: TimezonePolicy) -> Result<SqlValue, CastError> {
    if let SqlValue::Date(date) = value {
        return Ok(SqlValue::Date(*date));
    }
    to_time(value, timezone).map(date_or_time)
}

/// Reduces a midnight timestamp to its date.
fn date_or_time(time: DateTime<FixedOffset>) -> SqlValue {
    if time.hour() == 0 && time.minute() == 0 && time.second() == 0 {
        SqlValue::Date(time.date_naive())
    } else {
        SqlValue::Timestamp(time)
    }
}

fn to_time(value: &SqlValue, timezone: TimezonePolicy) -> Result<DateTime<FixedOffset>, CastError> {
    match value {
        SqlValue::Timestamp(time) => Ok(*time),
        SqlValue::Date(date) => timezone
            .localize(date.and_time(NaiveTime::MIN))
            .ok_or_else(|| CastError::InvalidTemporal(value.to_string())),
        SqlValue::Text(text) => parse_time(text, timezone),
        other => Err(CastError::InvalidTemporal(other.to_string())),
    }
}

/// Parses a date, a time of day, or both.
///
/// Missing date parts default to 2000-01-01. Text without an explicit offset
/// is interpreted in `timezone`.
pub fn parse_time(text: &str, timezone: TimezonePolicy) -> Result<DateTime<FixedOffset>, CastError> {
    let invalid = || CastError::InvalidTemporal(text.to_string());
    let caps = TEMPORAL.captures(text).ok_or_else(invalid)?;
    if caps.name("year").is_none() && caps.name("hour").is_none() {
        return Err(invalid());
    }

    let number = |name: &str, default: u32| -> Result<u32, CastError> {
        caps.name(name)
            .map_or(Ok(default), |m| m.as_str().parse().map_err(|_| invalid()))
    };
    let year = caps
        .name("year")
        .map_or(Ok(DEFAULT_YEAR), |m| m.as_str().parse().map_err(|_| invalid()))?;
    let month = number("month", 1)?;
    let day = number("day", 1)?;
    let hour = number("hour", 0)?;
    let minute = number("minute", 0)?;
    let second = number("second", 0)?;
    let nanos = caps.name("fraction").map_or(Ok(0), |m| {
        format!("{:0<9}", m.as_str()).parse().map_err(|_| invalid())
    })?;

    let naive = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_nano_opt(hour, minute, second, nanos))
        .ok_or_else(invalid)?;

    match caps.name("zone").map(|m| m.as_str()) {
        None => timezone.localize(naive).ok_or_else(invalid),
        Some("Z" | "UTC") => Ok(naive.and_utc().fixed_offset()),
        Some(zone) => {
            let offset = parse_offset(zone).ok_or_else(invalid)?;
            offset.from_local_datetime(&naive).single().ok_or_else(invalid)
        }
    }
}

fn parse_offset(zone: &str) -> Option<FixedOffset> {
    let sign = if zone.starts_with('-') { -1 } else { 1 };
    let digits: String = zone[1..].chars().filter(char::is_ascii_digit).collect();
    let hours: i32 = digits.get(..2)?.parse().ok()?;
    let minutes: i32 = digits.get(2..4)?.parse().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

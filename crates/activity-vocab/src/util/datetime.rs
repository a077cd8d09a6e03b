//! RFC 3339 timestamps for `xsd:dateTime` literals.
//!
//! A [`Timestamp`] keeps the instant as microseconds since the Unix epoch
//! together with the UTC offset it was written in. It also remembers how the
//! offset and fraction were spelled, so a parsed value renders back to the
//! same text.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use thiserror::Error;

const MICROSECONDS_PER_SECOND: i64 = 1_000_000;
const MICROSECONDS_PER_MINUTE: i64 = 60 * MICROSECONDS_PER_SECOND;
const MICROSECONDS_PER_HOUR: i64 = 60 * MICROSECONDS_PER_MINUTE;
const MICROSECONDS_PER_DAY: i64 = 24 * MICROSECONDS_PER_HOUR;

/// Error type for RFC 3339 parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DateTimeParseError {
    pub message: String,
}

impl DateTimeParseError {
    fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// How a timestamp's offset is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Zone {
    /// `Z`
    #[default]
    Utc,
    /// `+HH:MM` or `-HH:MM`, including `+00:00`.
    Numeric,
    /// No offset: a local time with no known zone, held as if UTC.
    Floating,
}

/// An `xsd:dateTime` instant with the offset it was expressed in.
///
/// Equality, ordering and hashing look at the instant and the offset only;
/// the spelling of the offset and fraction does not take part.
#[derive(Debug, Clone, Copy)]
pub struct Timestamp {
    /// Microseconds since 1970-01-01T00:00:00Z.
    pub epoch_us: i64,
    /// Signed UTC offset in minutes (e.g., +330 for +05:30).
    pub offset_min: i16,
    zone: Zone,
    /// Fraction digits as written; rendering never uses fewer.
    fraction_digits: u8,
}

impl Timestamp {
    /// Creates a UTC timestamp from microseconds since the Unix epoch.
    pub fn from_epoch_micros(epoch_us: i64) -> Self {
        Self::with_offset(epoch_us, 0)
    }

    /// Creates a timestamp that renders in the given offset.
    pub fn with_offset(epoch_us: i64, offset_min: i16) -> Self {
        Self {
            epoch_us,
            offset_min,
            zone: if offset_min == 0 { Zone::Utc } else { Zone::Numeric },
            fraction_digits: 0,
        }
    }

    /// Parses an RFC 3339 datetime string.
    ///
    /// The offset may be omitted, as `xsd:dateTime` allows; such a floating
    /// time is held as if UTC and renders back without an offset. Fractional
    /// seconds beyond microsecond precision are truncated.
    pub fn parse(s: &str) -> Result<Self, DateTimeParseError> {
        let parsed = parse_parts(s)?;
        Ok(Self {
            epoch_us: parsed.epoch_us,
            offset_min: parsed.offset_min,
            zone: parsed.zone,
            fraction_digits: parsed.fraction_digits,
        })
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Returns the same instant expressed in UTC.
    pub fn to_utc(self) -> Self {
        Self {
            offset_min: 0,
            zone: Zone::Utc,
            ..self
        }
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        (self.epoch_us, self.offset_min) == (other.epoch_us, other.offset_min)
    }
}

impl Eq for Timestamp {}

impl Hash for Timestamp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.epoch_us.hash(state);
        self.offset_min.hash(state);
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.epoch_us, self.offset_min).cmp(&(other.epoch_us, other.offset_min))
    }
}

impl FromStr for Timestamp {
    type Err = DateTimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timestamp::parse(s)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let offset = match self.zone {
            Zone::Utc if self.offset_min == 0 => "Z".to_string(),
            Zone::Floating => String::new(),
            _ => format_numeric_offset(self.offset_min),
        };
        f.write_str(&render(self.epoch_us, self.offset_min, self.fraction_digits, &offset))
    }
}

/// Parses a numeric offset (`+HH:MM`, `-HH:MM`) and returns it in minutes.
fn parse_timezone_offset(offset: &str) -> Result<i16, DateTimeParseError> {
    let invalid = || DateTimeParseError::new(format!("Invalid timezone offset: {}", offset));

    if offset.len() != 6 || !offset.is_ascii() {
        return Err(invalid());
    }

    let sign = match offset.as_bytes()[0] {
        b'+' => 1i16,
        b'-' => -1i16,
        _ => return Err(invalid()),
    };

    if offset.as_bytes()[3] != b':' {
        return Err(invalid());
    }

    let hours: i16 = offset[1..3].parse().map_err(|_| invalid())?;
    let minutes: i16 = offset[4..6].parse().map_err(|_| invalid())?;

    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    Ok(sign * (hours * 60 + minutes))
}

/// Formats an offset in minutes as `+HH:MM` or `-HH:MM`.
fn format_numeric_offset(offset_min: i16) -> String {
    let sign = if offset_min >= 0 { '+' } else { '-' };
    let abs_offset = offset_min.unsigned_abs();
    format!("{}{:02}:{:02}", sign, abs_offset / 60, abs_offset % 60)
}

/// Parses a fractional seconds digit string and returns microseconds.
fn parse_fractional_seconds(frac: &str) -> Result<i64, DateTimeParseError> {
    if frac.is_empty() {
        return Err(DateTimeParseError::new("Empty fractional seconds"));
    }
    let mut padded: String = frac.chars().take(6).collect();
    while padded.len() < 6 {
        padded.push('0');
    }
    padded
        .parse()
        .map_err(|_| DateTimeParseError::new(format!("Invalid fractional seconds: {}", frac)))
}

/// Formats microseconds as a fractional seconds string with at least
/// `min_digits` digits, omitting it if zero and no digits are required.
fn format_fractional_seconds(us: i64, min_digits: u8) -> String {
    let digits = format!("{:06}", us);
    let width = digits.trim_end_matches('0').len().max(usize::from(min_digits.min(6)));
    if width == 0 {
        return String::new();
    }
    format!(".{}", &digits[..width])
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Days since Unix epoch for a civil date (Howard Hinnant's algorithm).
fn date_to_days(year: i32, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year } as i64;
    let m = if month <= 2 { month as i64 + 9 } else { month as i64 - 3 };

    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let doy = (153 * m + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;

    era * 146097 + doe - 719468
}

/// Converts days since Unix epoch to (year, month, day).
fn days_to_date(days: i64) -> (i64, u32, u32) {
    let z = days + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = z - era * 146097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = if mp < 10 { mp + 3 } else { mp - 9 } as u32;

    (if m <= 2 { y + 1 } else { y }, m, d)
}

fn parse_component<T: FromStr>(s: &str, what: &str, input: &str) -> Result<T, DateTimeParseError> {
    s.parse()
        .map_err(|_| DateTimeParseError::new(format!("Invalid {} in datetime: {}", what, input)))
}

struct ParsedDateTime {
    epoch_us: i64,
    offset_min: i16,
    zone: Zone,
    fraction_digits: u8,
}

/// Parses an RFC 3339 datetime string and returns microseconds since Unix epoch
/// and offset in minutes.
pub fn parse_datetime_rfc3339(datetime_str: &str) -> Result<(i64, i16), DateTimeParseError> {
    parse_parts(datetime_str).map(|parsed| (parsed.epoch_us, parsed.offset_min))
}

fn parse_parts(datetime_str: &str) -> Result<ParsedDateTime, DateTimeParseError> {
    let invalid = || DateTimeParseError::new(format!("Invalid RFC 3339 datetime: {}", datetime_str));

    // Shortest accepted form is YYYY-MM-DDTHH:MM:SS
    if datetime_str.len() < 19 || !datetime_str.is_ascii() {
        return Err(invalid());
    }
    let bytes = datetime_str.as_bytes();

    if !matches!(bytes[10], b'T' | b't' | b' ')
        || bytes[4] != b'-'
        || bytes[7] != b'-'
        || bytes[13] != b':'
        || bytes[16] != b':'
    {
        return Err(invalid());
    }

    let year: i32 = parse_component(&datetime_str[..4], "year", datetime_str)?;
    let month: u32 = parse_component(&datetime_str[5..7], "month", datetime_str)?;
    let day: u32 = parse_component(&datetime_str[8..10], "day", datetime_str)?;

    if !(1..=12).contains(&month) {
        return Err(DateTimeParseError::new(format!("Invalid month in datetime: {}", datetime_str)));
    }
    if day < 1 || day > days_in_month(year, month) {
        return Err(DateTimeParseError::new(format!("Invalid day in datetime: {}", datetime_str)));
    }

    let hours: i64 = parse_component(&datetime_str[11..13], "hours", datetime_str)?;
    let minutes: i64 = parse_component(&datetime_str[14..16], "minutes", datetime_str)?;
    let seconds: i64 = parse_component(&datetime_str[17..19], "seconds", datetime_str)?;
    let rest = &datetime_str[19..];

    if hours > 23 {
        return Err(DateTimeParseError::new(format!("Invalid hours in datetime: {}", datetime_str)));
    }
    if minutes > 59 {
        return Err(DateTimeParseError::new(format!("Invalid minutes in datetime: {}", datetime_str)));
    }
    if seconds > 59 {
        return Err(DateTimeParseError::new(format!("Invalid seconds in datetime: {}", datetime_str)));
    }

    let (microseconds, fraction_digits, offset_str) = match rest.strip_prefix('.') {
        Some(frac_and_tz) => {
            let frac_end = frac_and_tz
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(frac_and_tz.len());
            (
                parse_fractional_seconds(&frac_and_tz[..frac_end])?,
                frac_end.min(6) as u8,
                &frac_and_tz[frac_end..],
            )
        }
        None => (0, 0, rest),
    };

    // RFC 3339 requires an offset; xsd:dateTime allows it to be absent.
    let (offset_min, zone) = match offset_str {
        "" => (0, Zone::Floating),
        "Z" | "z" => (0, Zone::Utc),
        numeric => (parse_timezone_offset(numeric)?, Zone::Numeric),
    };

    let local_us = date_to_days(year, month, day) * MICROSECONDS_PER_DAY
        + hours * MICROSECONDS_PER_HOUR
        + minutes * MICROSECONDS_PER_MINUTE
        + seconds * MICROSECONDS_PER_SECOND
        + microseconds;

    // local time = UTC + offset
    let epoch_us = local_us - offset_min as i64 * MICROSECONDS_PER_MINUTE;

    Ok(ParsedDateTime {
        epoch_us,
        offset_min,
        zone,
        fraction_digits,
    })
}

/// Formats microseconds since Unix epoch as RFC 3339 datetime string.
pub fn format_datetime_rfc3339(epoch_us: i64, offset_min: i16) -> String {
    let offset = if offset_min == 0 {
        "Z".to_string()
    } else {
        format_numeric_offset(offset_min)
    };
    render(epoch_us, offset_min, 0, &offset)
}

fn render(epoch_us: i64, offset_min: i16, fraction_digits: u8, offset: &str) -> String {
    let local_us = epoch_us + offset_min as i64 * MICROSECONDS_PER_MINUTE;

    let days = local_us.div_euclid(MICROSECONDS_PER_DAY);
    let time_us = local_us.rem_euclid(MICROSECONDS_PER_DAY);

    let (year, month, day) = days_to_date(days);

    let hours = time_us / MICROSECONDS_PER_HOUR;
    let minutes = (time_us % MICROSECONDS_PER_HOUR) / MICROSECONDS_PER_MINUTE;
    let seconds = (time_us % MICROSECONDS_PER_MINUTE) / MICROSECONDS_PER_SECOND;
    let microseconds = time_us % MICROSECONDS_PER_SECOND;

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}{}{}",
        year,
        month,
        day,
        hours,
        minutes,
        seconds,
        format_fractional_seconds(microseconds, fraction_digits),
        offset
    )
}

//! ISO 8601 durations for `xsd:duration` literals.
//!
//! Components are kept as written (`PT90M` stays ninety minutes) so a parsed
//! duration renders back unchanged. [`Duration::to_std`] gives an
//! approximate fixed-length conversion for callers that need one.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;
const DAYS_PER_MONTH: u64 = 30;
const DAYS_PER_YEAR: u64 = 365;

/// Error type for `xsd:duration` parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid xsd:duration {input:?}: {reason}")]
pub struct DurationParseError {
    pub input: String,
    pub reason: &'static str,
}

/// An `xsd:duration` value, e.g. `P1DT2H30M` or `-PT0.5S`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Duration {
    pub negative: bool,
    pub years: u64,
    pub months: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    /// Fractional part of `seconds`, in microseconds.
    pub micros: u32,
}

impl Duration {
    /// Builds a duration from a whole number of seconds, expressed in seconds.
    pub fn from_secs(seconds: u64) -> Self {
        Self { seconds, ..Self::default() }
    }

    /// Parses the lexical form `-?PnYnMnDTnHnMnS`.
    pub fn parse(input: &str) -> Result<Self, DurationParseError> {
        let fail = |reason| DurationParseError { input: input.to_string(), reason };

        let (negative, rest) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };
        let rest = rest.strip_prefix('P').ok_or_else(|| fail("missing 'P' designator"))?;
        if rest.is_empty() {
            return Err(fail("no components"));
        }

        let (date_part, time_part) = match rest.split_once('T') {
            Some((_, "")) => return Err(fail("'T' without time components")),
            Some((date, time)) => (date, Some(time)),
            None => (rest, None),
        };

        let mut duration = Duration { negative, ..Duration::default() };

        // Designators must appear in this order, each at most once.
        let mut date_slots: [(char, &mut u64); 3] = [
            ('Y', &mut duration.years),
            ('M', &mut duration.months),
            ('D', &mut duration.days),
        ];
        let mut next = 0;
        for (digits, designator) in components(date_part).map_err(fail)? {
            let position = date_slots[next..]
                .iter()
                .position(|(d, _)| *d == designator)
                .ok_or_else(|| fail("unexpected or out-of-order date designator"))?;
            if digits.contains('.') {
                return Err(fail("fractions are only allowed on seconds"));
            }
            let slot = &mut date_slots[next + position];
            *slot.1 = digits.parse().map_err(|_| fail("component out of range"))?;
            next += position + 1;
        }

        if let Some(time_part) = time_part {
            let mut hours = None;
            let mut minutes = None;
            let mut seconds = None;
            let mut next = 0;
            for (digits, designator) in components(time_part).map_err(fail)? {
                let order = match designator {
                    'H' => 0,
                    'M' => 1,
                    'S' => 2,
                    _ => return Err(fail("unexpected time designator")),
                };
                if order < next {
                    return Err(fail("out-of-order time designator"));
                }
                next = order + 1;
                match designator {
                    'H' => hours = Some(digits),
                    'M' => minutes = Some(digits),
                    _ => seconds = Some(digits),
                }
            }

            for (digits, slot) in [(hours, &mut duration.hours), (minutes, &mut duration.minutes)] {
                if let Some(digits) = digits {
                    if digits.contains('.') {
                        return Err(fail("fractions are only allowed on seconds"));
                    }
                    *slot = digits.parse().map_err(|_| fail("component out of range"))?;
                }
            }

            if let Some(digits) = seconds {
                let (whole, frac) = match digits.split_once('.') {
                    Some((whole, frac)) => (whole, Some(frac)),
                    None => (digits, None),
                };
                duration.seconds = whole.parse().map_err(|_| fail("component out of range"))?;
                if let Some(frac) = frac {
                    if frac.is_empty() {
                        return Err(fail("empty fraction"));
                    }
                    let mut padded: String = frac.chars().take(6).collect();
                    while padded.len() < 6 {
                        padded.push('0');
                    }
                    duration.micros = padded.parse().map_err(|_| fail("invalid fraction"))?;
                }
            }
        }

        Ok(duration)
    }

    /// Returns true if every component is zero.
    pub fn is_zero(&self) -> bool {
        self.years == 0
            && self.months == 0
            && self.days == 0
            && self.hours == 0
            && self.minutes == 0
            && self.seconds == 0
            && self.micros == 0
    }

    /// Converts to a fixed-length duration, counting a year as 365 days and a
    /// month as 30 days. The sign is dropped; check [`Duration::negative`].
    ///
    /// Returns `None` on overflow.
    pub fn to_std(&self) -> Option<std::time::Duration> {
        let days = self
            .years
            .checked_mul(DAYS_PER_YEAR)?
            .checked_add(self.months.checked_mul(DAYS_PER_MONTH)?)?
            .checked_add(self.days)?;
        let secs = days
            .checked_mul(SECONDS_PER_DAY)?
            .checked_add(self.hours.checked_mul(SECONDS_PER_HOUR)?)?
            .checked_add(self.minutes.checked_mul(SECONDS_PER_MINUTE)?)?
            .checked_add(self.seconds)?;
        Some(std::time::Duration::new(secs, self.micros * 1_000))
    }
}

/// Splits `12H30M5.5S` into `[("12", 'H'), ("30", 'M'), ("5.5", 'S')]`.
fn components(part: &str) -> Result<Vec<(&str, char)>, &'static str> {
    let mut out = Vec::new();
    let mut start = 0;
    for (i, c) in part.char_indices() {
        if c.is_ascii_digit() || c == '.' {
            continue;
        }
        let digits = &part[start..i];
        if digits.is_empty() || digits.starts_with('.') || digits.ends_with('.') {
            return Err("designator without a number");
        }
        out.push((digits, c));
        start = i + c.len_utf8();
    }
    if start != part.len() {
        return Err("number without a designator");
    }
    Ok(out)
}

impl FromStr for Duration {
    type Err = DurationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Duration::parse(s)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str("P")?;
        if self.is_zero() {
            return f.write_str("T0S");
        }
        for (value, designator) in [(self.years, 'Y'), (self.months, 'M'), (self.days, 'D')] {
            if value != 0 {
                write!(f, "{}{}", value, designator)?;
            }
        }
        if self.hours == 0 && self.minutes == 0 && self.seconds == 0 && self.micros == 0 {
            return Ok(());
        }
        f.write_str("T")?;
        if self.hours != 0 {
            write!(f, "{}H", self.hours)?;
        }
        if self.minutes != 0 {
            write!(f, "{}M", self.minutes)?;
        }
        if self.seconds != 0 || self.micros != 0 {
            write!(f, "{}", self.seconds)?;
            if self.micros != 0 {
                let digits = format!("{:06}", self.micros);
                write!(f, ".{}", digits.trim_end_matches('0'))?;
            }
            f.write_str("S")?;
        }
        Ok(())
    }
}

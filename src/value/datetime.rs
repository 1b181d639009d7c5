//! Datetime values with independently optional date, time and offset.
//!
//! Accepts the ISO-8601 subset microformats authors actually write:
//!
//! - `YYYY-MM-DD`
//! - `HH:MM[:SS][.fraction]`, or `H[:MM[:SS]]am|pm` (dots allowed: `p.m.`)
//! - offsets `Z`, `±HH:MM`, `±HHMM`, `±HH`
//! - combined `date[T| ]time[offset]`
//!
//! Display is normalized: `2012-08-05T14:50:00`, `17:00:00-08:00`, `Z` for
//! a zero offset.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Datelike, FixedOffset, NaiveDate, NaiveTime, Timelike};
use regex_lite::Regex;

use crate::error::{Error, Result};

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})").unwrap());

/// Hour, then optional minutes, seconds, fraction and meridiem.
static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})(?::(\d{2})(?::(\d{2})(?:\.(\d+))?)?)?(?:\s*([AaPp])\.?[Mm]\.?)?").unwrap()
});

static OFFSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:([Zz])|([+-])(\d{2})(?::?(\d{2}))?)$").unwrap());

/// A `dt-*` property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateTimeValue {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub offset: Option<FixedOffset>,
}

impl DateTimeValue {
    /// Parse a complete value. Needs at least a date or a time.
    pub fn parse(input: &str) -> Option<Self> {
        Self::parse_part(input).filter(|v| v.date.is_some() || v.time.is_some())
    }

    /// Parse one value-class fragment. A bare offset is accepted here.
    pub fn parse_part(input: &str) -> Option<Self> {
        let mut rest = input.trim();
        if rest.is_empty() {
            return None;
        }
        let mut value = DateTimeValue::default();

        if let Some(caps) = DATE_RE.captures(rest) {
            let year = caps[1].parse().ok()?;
            let month = caps[2].parse().ok()?;
            let day = caps[3].parse().ok()?;
            value.date = Some(NaiveDate::from_ymd_opt(year, month, day)?);
            rest = &rest[caps[0].len()..];

            if let Some(after) = rest.strip_prefix(['T', 't']) {
                rest = after;
            } else {
                rest = rest.trim_start();
            }
        }

        if let Some(caps) = TIME_RE.captures(rest) {
            let meridiem = caps.get(5).map(|m| m.as_str().to_ascii_lowercase());
            // A bare number is neither a time nor an offset.
            if caps.get(2).is_some() || meridiem.is_some() {
                let mut hour: u32 = caps[1].parse().ok()?;
                let minute = caps.get(2).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
                let second = caps.get(3).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
                let nanos = caps.get(4).map_or(0, |m| fraction_to_nanos(m.as_str()));

                match meridiem.as_deref() {
                    Some(m) if !(1..=12).contains(&hour) => {
                        tracing::trace!(hour, meridiem = m, "hour out of range for meridiem");
                        return None;
                    }
                    Some("p") if hour < 12 => hour += 12,
                    Some("a") if hour == 12 => hour = 0,
                    _ => {}
                }

                value.time = Some(NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)?);
                rest = rest[caps[0].len()..].trim_start();
            }
        }

        if !rest.is_empty() {
            value.offset = Some(parse_offset(rest)?);
        }

        if value.date.is_none() && value.time.is_none() && value.offset.is_none() {
            return None;
        }
        Some(value)
    }

    /// Fill missing components from `other`, keeping what is already set.
    pub fn or(self, other: DateTimeValue) -> Self {
        Self {
            date: self.date.or(other.date),
            time: self.time.or(other.time),
            offset: self.offset.or(other.offset),
        }
    }

    pub fn is_date_only(&self) -> bool {
        self.date.is_some() && self.time.is_none()
    }
}

fn fraction_to_nanos(digits: &str) -> u32 {
    let mut padded: String = digits.chars().take(9).collect();
    while padded.len() < 9 {
        padded.push('0');
    }
    padded.parse().unwrap_or(0)
}

fn parse_offset(input: &str) -> Option<FixedOffset> {
    let caps = OFFSET_RE.captures(input)?;
    if caps.get(1).is_some() {
        return FixedOffset::east_opt(0);
    }
    let hours: i32 = caps[3].parse().ok()?;
    let minutes: i32 = caps.get(4).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    let seconds = hours * 3600 + minutes * 60;
    match &caps[2] {
        "-" => FixedOffset::west_opt(seconds),
        _ => FixedOffset::east_opt(seconds),
    }
}

fn write_time(f: &mut fmt::Formatter<'_>, time: NaiveTime) -> fmt::Result {
    write!(
        f,
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )?;
    let nanos = time.nanosecond();
    if nanos > 0 {
        let digits = format!("{nanos:09}");
        write!(f, ".{}", digits.trim_end_matches('0'))?;
    }
    Ok(())
}

fn write_offset(f: &mut fmt::Formatter<'_>, offset: FixedOffset) -> fmt::Result {
    let seconds = offset.local_minus_utc();
    if seconds == 0 {
        return f.write_str("Z");
    }
    let sign = if seconds < 0 { '-' } else { '+' };
    let seconds = seconds.abs();
    write!(f, "{sign}{:02}:{:02}", seconds / 3600, (seconds % 3600) / 60)
}

impl fmt::Display for DateTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(date) = self.date {
            write!(
                f,
                "{:04}-{:02}-{:02}",
                date.year(),
                date.month(),
                date.day()
            )?;
            if self.time.is_some() {
                f.write_str("T")?;
            }
        }
        if let Some(time) = self.time {
            write_time(f, time)?;
            if let Some(offset) = self.offset {
                write_offset(f, offset)?;
            }
        } else if self.date.is_none()
            && let Some(offset) = self.offset
        {
            write_offset(f, offset)?;
        }
        Ok(())
    }
}

impl FromStr for DateTimeValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| Error::InvalidDateTime(s.to_string()))
    }
}

//! UTC date handling without timezone dependencies.
//!
//! Articles carry a publication date that is used as a sort key, rendered
//! in RSS feeds (RFC 2822) and displayed on pages ("January 5, 2023").
//! Parsing is strict: an out-of-range day or month is rejected at load
//! time, never silently accepted.

use anyhow::{Result, bail};

/// A UTC calendar date with optional time-of-day.
///
/// Ordering is derived from field order (year, month, day, hour, minute,
/// second), so comparing two dates compares the full calendar timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl Date {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Parse from `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SSZ`.
    ///
    /// Returns `None` for any other shape, and for dates that do not exist
    /// on the calendar (e.g. `2023-02-29`).
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();

        // Minimum: "YYYY-MM-DD" (10 chars)
        if bytes.len() < 10 {
            return None;
        }

        let year = parse_u16(&bytes[0..4])?;
        if bytes[4] != b'-' {
            return None;
        }
        let month = parse_u8(&bytes[5..7])?;
        if bytes[7] != b'-' {
            return None;
        }
        let day = parse_u8(&bytes[8..10])?;

        // Optional RFC 3339 time part
        let (hour, minute, second) = if bytes.len() == 20 && bytes[10] == b'T' && bytes[19] == b'Z'
        {
            if bytes[13] != b':' || bytes[16] != b':' {
                return None;
            }
            (
                parse_u8(&bytes[11..13])?,
                parse_u8(&bytes[14..16])?,
                parse_u8(&bytes[17..19])?,
            )
        } else if bytes.len() == 10 {
            (0, 0, 0)
        } else {
            return None;
        };

        let date = Self::new(year, month, day, hour, minute, second);
        date.validate().ok()?;
        Some(date)
    }

    fn validate(self) -> Result<()> {
        let Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        } = self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }
        let max_days = days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }
        if hour > 23 {
            bail!("hour is invalid: {hour}");
        }
        if minute > 59 {
            bail!("minute is invalid: {minute}");
        }
        if second > 59 {
            bail!("second is invalid: {second}");
        }
        Ok(())
    }

    /// Current UTC date from the system clock (used for the footer year).
    pub fn today() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::from_unix(secs)
    }

    /// Convert seconds since the Unix epoch to a calendar date.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from_unix(secs: u64) -> Self {
        let day_secs = (secs % 86_400) as u32;

        // Civil-from-days (Howard Hinnant's algorithm)
        let z = (secs / 86_400) as i64 + 719_468;
        let era = z / 146_097;
        let doe = z - era * 146_097;
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = doy - (153 * mp + 2) / 5 + 1;
        let month = if mp < 10 { mp + 3 } else { mp - 9 };
        let year = yoe + era * 400 + i64::from(month <= 2);

        Self::new(
            year as u16,
            month as u8,
            day as u8,
            (day_secs / 3600) as u8,
            (day_secs / 60 % 60) as u8,
            (day_secs % 60) as u8,
        )
    }

    /// Format as ISO 8601: `YYYY-MM-DD` (date-only) or `YYYY-MM-DDTHH:MM:SSZ`.
    pub fn to_iso8601(self) -> String {
        if self.hour == 0 && self.minute == 0 && self.second == 0 {
            format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
        } else {
            format!(
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
                self.year, self.month, self.day, self.hour, self.minute, self.second
            )
        }
    }

    /// Format for RSS `pubDate`, e.g. `Sat, 15 Jun 2024 00:00:00 GMT`.
    pub fn to_rfc2822(self) -> String {
        const WEEKDAYS: [&str; 7] = ["Sat", "Sun", "Mon", "Tue", "Wed", "Thu", "Fri"];

        format!(
            "{}, {:02} {} {:04} {:02}:{:02}:{:02} GMT",
            WEEKDAYS[self.weekday_index()],
            self.day,
            &MONTHS[(self.month - 1) as usize][..3],
            self.year,
            self.hour,
            self.minute,
            self.second
        )
    }

    /// Format for page display, e.g. `June 15, 2024`.
    pub fn to_display(self) -> String {
        format!(
            "{} {}, {}",
            MONTHS[(self.month - 1) as usize],
            self.day,
            self.year
        )
    }

    /// Parse the display format back into a (date-only) `Date`.
    ///
    /// `to_display` followed by `parse_display` recovers the original
    /// calendar date; time-of-day is not part of the display format.
    pub fn parse_display(s: &str) -> Option<Self> {
        let (month_name, rest) = s.split_once(' ')?;
        let (day, year) = rest.split_once(", ")?;

        let month = MONTHS.iter().position(|m| *m == month_name)? as u8 + 1;
        let day: u8 = day.parse().ok()?;
        let year: u16 = year.parse().ok()?;

        let date = Self::from_ymd(year, month, day);
        date.validate().ok()?;
        Some(date)
    }

    #[inline]
    #[allow(clippy::cast_sign_loss)] // Result of % 7 is always 0-6
    fn weekday_index(self) -> usize {
        // Zeller's congruence
        let (y, m) = if self.month < 3 {
            (i32::from(self.year) - 1, i32::from(self.month) + 12)
        } else {
            (i32::from(self.year), i32::from(self.month))
        };
        let d = i32::from(self.day);
        ((d + (13 * (m + 1)) / 5 + y + y / 4 - y / 100 + y / 400) % 7) as usize
    }
}

#[inline]
#[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
const fn is_leap_year(year: u16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

#[inline]
const fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + u16::from(d);
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        let date = Date::parse("2024-06-15").unwrap();
        assert_eq!(date, Date::from_ymd(2024, 6, 15));
    }

    #[test]
    fn test_parse_with_time() {
        let date = Date::parse("2024-06-15T14:30:45Z").unwrap();
        assert_eq!(date, Date::new(2024, 6, 15, 14, 30, 45));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Date::parse("").is_none());
        assert!(Date::parse("2024-06").is_none());
        assert!(Date::parse("2024/06/15").is_none());
        assert!(Date::parse("2024-06-15T14:30Z").is_none());
        assert!(Date::parse("June 15, 2024").is_none());
    }

    #[test]
    fn test_parse_rejects_invalid_calendar_dates() {
        assert!(Date::parse("2024-00-15").is_none());
        assert!(Date::parse("2024-13-15").is_none());
        assert!(Date::parse("2024-06-31").is_none());
        assert!(Date::parse("2023-02-29").is_none());
        assert!(Date::parse("2024-06-15T24:00:00Z").is_none());
    }

    #[test]
    fn test_parse_leap_year() {
        assert!(Date::parse("2024-02-29").is_some());
        assert!(Date::parse("2000-02-29").is_some()); // divisible by 400
        assert!(Date::parse("1900-02-29").is_none()); // divisible by 100, not 400
    }

    #[test]
    fn test_ordering_compares_full_calendar_date() {
        // Articles on different days must order by day, not by any
        // sub-second shortcut.
        let older = Date::parse("2022-12-31").unwrap();
        let newer = Date::parse("2023-01-01").unwrap();
        assert!(newer > older);

        let with_time = Date::parse("2023-01-01T08:00:00Z").unwrap();
        assert!(with_time > newer);
    }

    #[test]
    fn test_to_rfc2822() {
        let date = Date::new(2024, 6, 15, 14, 30, 45);
        assert_eq!(date.to_rfc2822(), "Sat, 15 Jun 2024 14:30:45 GMT");

        let date = Date::from_ymd(2024, 1, 1);
        assert_eq!(date.to_rfc2822(), "Mon, 01 Jan 2024 00:00:00 GMT");
    }

    #[test]
    fn test_to_iso8601_roundtrip() {
        for s in ["2024-06-15", "2024-06-15T14:30:45Z"] {
            let date = Date::parse(s).unwrap();
            assert_eq!(date.to_iso8601(), s);
        }
    }

    #[test]
    fn test_display_roundtrip() {
        let date = Date::parse("2023-01-05").unwrap();
        let display = date.to_display();
        assert_eq!(display, "January 5, 2023");
        assert_eq!(Date::parse_display(&display), Some(date));
    }

    #[test]
    fn test_display_roundtrip_all_months() {
        for month in 1..=12u8 {
            let date = Date::from_ymd(2024, month, 28);
            assert_eq!(Date::parse_display(&date.to_display()), Some(date));
        }
    }

    #[test]
    fn test_from_unix() {
        assert_eq!(Date::from_unix(0), Date::from_ymd(1970, 1, 1));
        // 2024-01-01T00:00:00Z
        assert_eq!(Date::from_unix(1_704_067_200), Date::from_ymd(2024, 1, 1));
        // 2024-02-29T12:30:45Z (leap day)
        assert_eq!(
            Date::from_unix(1_709_209_845),
            Date::new(2024, 2, 29, 12, 30, 45)
        );
    }

    #[test]
    fn test_parse_display_rejects_malformed() {
        assert!(Date::parse_display("2024-06-15").is_none());
        assert!(Date::parse_display("Juneish 15, 2024").is_none());
        assert!(Date::parse_display("February 30, 2024").is_none());
    }
}

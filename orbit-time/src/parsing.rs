use crate::julian::JulianDate;
use crate::{TimeError, TimeResult};

/// Calendar components extracted from an ISO-8601 style string, before any
/// time-scale interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDateTime {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: f64,
}

impl ParsedDateTime {
    pub fn to_julian_date(&self) -> JulianDate {
        JulianDate::from_calendar(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
        )
    }
}

fn parse_digits(field: &str, max_len: usize, what: &str) -> TimeResult<u32> {
    if field.is_empty() || field.len() > max_len {
        return Err(TimeError::ParseError(format!(
            "invalid {} format: '{}'",
            what, field
        )));
    }
    let bytes = field.as_bytes();
    if !bytes.iter().all(|b| b.is_ascii_digit()) {
        return Err(TimeError::ParseError(format!(
            "invalid {}: '{}'",
            what, field
        )));
    }
    Ok(bytes.iter().fold(0u32, |acc, b| acc * 10 + (b - b'0') as u32))
}

/// Parses a `YYYY-MM-DDTHH:MM:SS[.sss][Z]` datetime string.
///
/// A space is accepted in place of the `T` separator, month/day/hour/minute
/// may be one or two digits, and a trailing `Z` is ignored. Range checks
/// reject month 0/13, day 0/32, hour 24, minute 60, and second >= 60
/// (a leap second cannot be expressed in this notation; construct it from
/// calendar components instead).
pub fn parse_iso8601(s: &str) -> TimeResult<ParsedDateTime> {
    let s = s.trim();

    const MAX_LENGTH: usize = 32;
    if s.len() > MAX_LENGTH {
        return Err(TimeError::ParseError("input too long".to_string()));
    }

    let s = s.strip_suffix('Z').unwrap_or(s);

    let separator = s.find('T').or_else(|| s.find(' ')).ok_or_else(|| {
        TimeError::ParseError(format!(
            "invalid datetime '{}': expected YYYY-MM-DDTHH:MM:SS",
            s
        ))
    })?;
    let (date_part, rest) = s.split_at(separator);
    let time_part = &rest[1..];

    let date_fields: Vec<&str> = date_part.split('-').collect();
    if date_fields.len() != 3 {
        return Err(TimeError::ParseError(format!(
            "invalid date '{}': expected YYYY-MM-DD",
            date_part
        )));
    }
    if date_fields[0].len() != 4 {
        return Err(TimeError::ParseError(format!(
            "invalid year format: '{}'",
            date_fields[0]
        )));
    }
    let year = parse_digits(date_fields[0], 4, "year")? as i32;
    let month = parse_digits(date_fields[1], 2, "month")? as u8;
    let day = parse_digits(date_fields[2], 2, "day")? as u8;

    let time_fields: Vec<&str> = time_part.split(':').collect();
    if time_fields.len() != 3 {
        return Err(TimeError::ParseError(format!(
            "invalid time '{}': expected HH:MM:SS",
            time_part
        )));
    }
    let hour = parse_digits(time_fields[0], 2, "hour")? as u8;
    let minute = parse_digits(time_fields[1], 2, "minute")? as u8;
    let second = time_fields[2]
        .parse::<f64>()
        .map_err(|_| TimeError::ParseError(format!("invalid second: '{}'", time_fields[2])))?;

    if !(1..=12).contains(&month) {
        return Err(TimeError::ParseError(format!("month out of range: {}", month)));
    }
    if !(1..=31).contains(&day) {
        return Err(TimeError::ParseError(format!("day out of range: {}", day)));
    }
    if hour > 23 {
        return Err(TimeError::ParseError(format!("hour out of range: {}", hour)));
    }
    if minute > 59 {
        return Err(TimeError::ParseError(format!(
            "minute out of range: {}",
            minute
        )));
    }
    if !(0.0..60.0).contains(&second) {
        return Err(TimeError::ParseError(format!(
            "second out of range: {}",
            second
        )));
    }

    Ok(ParsedDateTime {
        year,
        month,
        day,
        hour,
        minute,
        second,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbit_core::constants::J2000_JD;

    #[test]
    fn test_basic_parse() {
        let dt = parse_iso8601("2000-01-01T12:00:00").unwrap();
        assert_eq!(
            (dt.year, dt.month, dt.day, dt.hour, dt.minute),
            (2000, 1, 1, 12, 0)
        );
        assert_eq!(dt.second, 0.0);
        assert_eq!(dt.to_julian_date().to_f64(), J2000_JD);
    }

    #[test]
    fn test_fractional_seconds_and_z() {
        let dt = parse_iso8601("2018-06-15T09:30:12.345Z").unwrap();
        assert_eq!((dt.hour, dt.minute), (9, 30));
        assert!((dt.second - 12.345).abs() < 1e-12);
    }

    #[test]
    fn test_space_separator_and_single_digits() {
        let dt = parse_iso8601("2018-1-2 3:4:5").unwrap();
        assert_eq!(
            (dt.year, dt.month, dt.day, dt.hour, dt.minute, dt.second),
            (2018, 1, 2, 3, 4, 5.0)
        );
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert!(parse_iso8601("  2000-01-01T12:00:00  ").is_ok());
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in [
            "not-a-date",
            "2000-01-01",
            "12:00:00",
            "2000T12:00:00",
            "2000-01T12:00:00",
            "2000-01-01-01T12:00:00",
            "200-01-01T12:00:00",
            "20000-01-01T12:00:00",
            "20a0-01-01T12:00:00",
            "2000-abc-01T12:00:00",
            "2000-01-01T12:00",
            "2000-01-01T12:00:00:00",
            "2000-01-01T12:00:ab",
        ] {
            assert!(parse_iso8601(bad).is_err(), "accepted '{}'", bad);
        }
    }

    #[test]
    fn test_rejects_out_of_range() {
        for bad in [
            "2000-00-01T12:00:00",
            "2000-13-01T12:00:00",
            "2000-01-00T12:00:00",
            "2000-01-32T12:00:00",
            "2000-01-01T24:00:00",
            "2000-01-01T12:60:00",
            "2000-01-01T12:00:60",
            "2000-01-01T12:00:-1",
        ] {
            assert!(parse_iso8601(bad).is_err(), "accepted '{}'", bad);
        }
    }

    #[test]
    fn test_rejects_too_long() {
        let long = "2000-01-01T12:00:00.".repeat(4);
        assert!(parse_iso8601(&long).is_err());
    }
}

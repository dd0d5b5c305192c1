//! Leap-second table for UTC conversions.
//!
//! UTC differs from TAI by an integer number of seconds that grows each time
//! the IERS inserts a leap second. The table below records every TAI-UTC
//! offset of the modern leap-second era (1972 onward); each entry takes
//! effect at 00:00:00 UTC on the first day of its month and stays in force
//! until the next entry.
//!
//! The table is an explicit immutable object rather than ambient global
//! state: conversions accept a `&LeapSecondTable`, so tests can inject a
//! shortened or hypothetical table, while [`LeapSecondTable::bundled`]
//! provides the process-wide default, initialized once and read lock-free
//! afterwards.
//!
//! Dates before the first entry are outside the supported range; the
//! pre-1972 era used fractional step-and-drift adjustments this kernel does
//! not model.

use crate::{TimeError, TimeResult};
use std::sync::OnceLock;

/// One leap-second table row: the TAI-UTC offset in effect from
/// 00:00:00 UTC on `year`-`month`-01.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LeapSecondEntry {
    pub year: i32,
    pub month: u8,
    pub tai_minus_utc: f64,
}

impl LeapSecondEntry {
    const fn new(year: i32, month: u8, tai_minus_utc: f64) -> Self {
        Self {
            year,
            month,
            tai_minus_utc,
        }
    }

    fn key(&self) -> i32 {
        12 * self.year + self.month as i32
    }
}

/// TAI-UTC offsets from IERS Bulletin C, 1972-01-01 through 2017-01-01.
const BUNDLED_ENTRIES: [LeapSecondEntry; 28] = [
    LeapSecondEntry::new(1972, 1, 10.0),
    LeapSecondEntry::new(1972, 7, 11.0),
    LeapSecondEntry::new(1973, 1, 12.0),
    LeapSecondEntry::new(1974, 1, 13.0),
    LeapSecondEntry::new(1975, 1, 14.0),
    LeapSecondEntry::new(1976, 1, 15.0),
    LeapSecondEntry::new(1977, 1, 16.0),
    LeapSecondEntry::new(1978, 1, 17.0),
    LeapSecondEntry::new(1979, 1, 18.0),
    LeapSecondEntry::new(1980, 1, 19.0),
    LeapSecondEntry::new(1981, 7, 20.0),
    LeapSecondEntry::new(1982, 7, 21.0),
    LeapSecondEntry::new(1983, 7, 22.0),
    LeapSecondEntry::new(1985, 7, 23.0),
    LeapSecondEntry::new(1988, 1, 24.0),
    LeapSecondEntry::new(1990, 1, 25.0),
    LeapSecondEntry::new(1991, 1, 26.0),
    LeapSecondEntry::new(1992, 7, 27.0),
    LeapSecondEntry::new(1993, 7, 28.0),
    LeapSecondEntry::new(1994, 7, 29.0),
    LeapSecondEntry::new(1996, 1, 30.0),
    LeapSecondEntry::new(1997, 7, 31.0),
    LeapSecondEntry::new(1999, 1, 32.0),
    LeapSecondEntry::new(2006, 1, 33.0),
    LeapSecondEntry::new(2009, 1, 34.0),
    LeapSecondEntry::new(2012, 7, 35.0),
    LeapSecondEntry::new(2015, 7, 36.0),
    LeapSecondEntry::new(2017, 1, 37.0),
];

/// An immutable, sorted table of TAI-UTC offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct LeapSecondTable {
    entries: Vec<LeapSecondEntry>,
}

impl LeapSecondTable {
    /// Builds a table from entries, which must be non-empty and strictly
    /// ascending by (year, month).
    pub fn new(entries: Vec<LeapSecondEntry>) -> TimeResult<Self> {
        if entries.is_empty() {
            return Err(TimeError::ConversionError(
                "leap-second table must contain at least one entry".to_string(),
            ));
        }
        for pair in entries.windows(2) {
            if pair[1].key() <= pair[0].key() {
                return Err(TimeError::ConversionError(format!(
                    "leap-second table entries out of order at {}-{:02}",
                    pair[1].year, pair[1].month
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Returns the built-in IERS table, initialized on first use.
    pub fn bundled() -> &'static LeapSecondTable {
        static BUNDLED: OnceLock<LeapSecondTable> = OnceLock::new();
        BUNDLED.get_or_init(|| LeapSecondTable {
            entries: BUNDLED_ENTRIES.to_vec(),
        })
    }

    /// First (year, month) covered by this table.
    pub fn min_date(&self) -> (i32, u8) {
        (self.entries[0].year, self.entries[0].month)
    }

    /// Returns true if the given calendar date is on or after the first entry.
    pub fn covers(&self, year: i32, month: u8) -> bool {
        12 * year + month as i32 >= self.entries[0].key()
    }

    /// TAI-UTC in seconds in effect on the given date, or `None` before the
    /// table starts. An offset applies on-or-after its effective date, found
    /// by binary search for the latest entry not later than the query.
    pub fn offset_at(&self, year: i32, month: u8) -> Option<f64> {
        let key = 12 * year + month as i32;
        let idx = match self.entries.binary_search_by(|e| e.key().cmp(&key)) {
            Ok(i) => i,
            Err(0) => return None,
            Err(i) => i - 1,
        };
        Some(self.entries[idx].tai_minus_utc)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Detects whether the UTC day starting at the given date contains a
    /// leap second: the day length in seconds is 86400 plus the returned
    /// value (0.0 or 1.0 for the modern era).
    pub fn leap_at_end_of_day(&self, year: i32, month: u8, day: u8) -> f64 {
        let today = match self.offset_at(year, month) {
            Some(v) => v,
            None => return 0.0,
        };
        let (ny, nm, _) = next_calendar_day(year, month, day);
        match self.offset_at(ny, nm) {
            // A new offset only bites on the 1st; mid-month days never leap.
            Some(next) if (nm != month || ny != year) => next - today,
            _ => 0.0,
        }
    }
}

pub(crate) fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0) && (year % 100 != 0 || year % 400 == 0)
}

pub(crate) fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

pub(crate) fn next_calendar_day(year: i32, month: u8, day: u8) -> (i32, u8, u8) {
    if day < days_in_month(year, month) {
        (year, month, day + 1)
    } else if month < 12 {
        (year, month + 1, 1)
    } else {
        (year + 1, 1, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_known_offsets() {
        let table = LeapSecondTable::bundled();
        assert_eq!(table.offset_at(1972, 1), Some(10.0));
        assert_eq!(table.offset_at(1972, 6), Some(10.0));
        assert_eq!(table.offset_at(1972, 7), Some(11.0));
        assert_eq!(table.offset_at(1980, 1), Some(19.0));
        assert_eq!(table.offset_at(1999, 1), Some(32.0));
        assert_eq!(table.offset_at(2005, 12), Some(32.0));
        assert_eq!(table.offset_at(2017, 1), Some(37.0));
        assert_eq!(table.offset_at(2024, 6), Some(37.0));
    }

    #[test]
    fn test_before_table_start() {
        let table = LeapSecondTable::bundled();
        assert_eq!(table.offset_at(1971, 12), None);
        assert!(!table.covers(1971, 12));
        assert!(table.covers(1972, 1));
        assert_eq!(table.min_date(), (1972, 1));
    }

    #[test]
    fn test_leap_at_end_of_day() {
        let table = LeapSecondTable::bundled();
        // 2016-12-31 ended with the leap second that took TAI-UTC to 37
        assert_eq!(table.leap_at_end_of_day(2016, 12, 31), 1.0);
        // 2015-06-30 likewise (36 entry at 2015-07)
        assert_eq!(table.leap_at_end_of_day(2015, 6, 30), 1.0);
        // Ordinary days
        assert_eq!(table.leap_at_end_of_day(2016, 12, 30), 0.0);
        assert_eq!(table.leap_at_end_of_day(2018, 3, 14), 0.0);
    }

    #[test]
    fn test_custom_table_validation() {
        assert!(LeapSecondTable::new(vec![]).is_err());

        let unsorted = vec![
            LeapSecondEntry::new(1999, 1, 32.0),
            LeapSecondEntry::new(1997, 7, 31.0),
        ];
        assert!(LeapSecondTable::new(unsorted).is_err());

        let good = LeapSecondTable::new(vec![
            LeapSecondEntry::new(1997, 7, 31.0),
            LeapSecondEntry::new(1999, 1, 32.0),
        ])
        .unwrap();
        assert_eq!(good.len(), 2);
        assert!(!good.is_empty());
        assert_eq!(good.offset_at(1998, 5), Some(31.0));
    }

    #[test]
    fn test_calendar_helpers() {
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2016));
        assert!(!is_leap_year(2017));

        assert_eq!(days_in_month(2016, 2), 29);
        assert_eq!(days_in_month(2017, 2), 28);
        assert_eq!(days_in_month(2017, 4), 30);
        assert_eq!(days_in_month(2017, 12), 31);

        assert_eq!(next_calendar_day(2016, 2, 28), (2016, 2, 29));
        assert_eq!(next_calendar_day(2017, 2, 28), (2017, 3, 1));
        assert_eq!(next_calendar_day(2017, 12, 31), (2018, 1, 1));
        assert_eq!(next_calendar_day(2017, 6, 15), (2017, 6, 16));
    }
}

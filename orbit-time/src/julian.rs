use crate::{TimeError, TimeResult};
use orbit_core::constants::{J2000_JD, MJD_ZERO_POINT, SECONDS_PER_DAY_F64};
use std::fmt;

/// A two-part Julian Date.
///
/// Splitting the date into `jd1 + jd2` keeps the large epoch constant and the
/// small time-of-day value in separate doubles, preserving sub-nanosecond
/// precision that a single f64 Julian Date cannot hold.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JulianDate {
    jd1: f64,
    jd2: f64,
}

impl JulianDate {
    pub const fn new(jd1: f64, jd2: f64) -> Self {
        Self { jd1, jd2 }
    }

    pub const fn from_f64(jd: f64) -> Self {
        Self::new(jd, 0.0)
    }

    pub const fn j2000() -> Self {
        Self::new(J2000_JD, 0.0)
    }

    pub fn jd1(&self) -> f64 {
        self.jd1
    }

    pub fn jd2(&self) -> f64 {
        self.jd2
    }

    pub fn to_f64(&self) -> f64 {
        self.jd1 + self.jd2
    }

    pub fn to_mjd(&self) -> f64 {
        (self.jd1 - MJD_ZERO_POINT) + self.jd2
    }

    /// Adds days, applying the offset to the smaller-magnitude component so
    /// the fractional part keeps its full precision.
    pub fn add_days(&self, days: f64) -> Self {
        if self.jd1.abs() >= self.jd2.abs() {
            Self::new(self.jd1, self.jd2 + days)
        } else {
            Self::new(self.jd1 + days, self.jd2)
        }
    }

    pub fn add_seconds(&self, seconds: f64) -> Self {
        self.add_days(seconds / SECONDS_PER_DAY_F64)
    }

    /// Signed difference `self - other` in days, combining the components
    /// pairwise before summing to avoid cancellation of the large halves.
    pub fn diff_days(&self, other: &Self) -> f64 {
        (self.jd1 - other.jd1) + (self.jd2 - other.jd2)
    }

    pub fn diff_seconds(&self, other: &Self) -> f64 {
        self.diff_days(other) * SECONDS_PER_DAY_F64
    }

    /// Builds a split Julian Date from Gregorian calendar components.
    ///
    /// `jd1` carries the full Julian Date at midnight of the given day and
    /// `jd2` the day fraction from the time fields. Calendar validity is the
    /// caller's responsibility; the integer arithmetic itself accepts any
    /// month/day combination.
    pub fn from_calendar(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: f64) -> Self {
        let jd1 = MJD_ZERO_POINT + calendar_to_mjd(year, month as i32, day as i32);
        let jd2 = (60.0 * (60 * hour as i32 + minute as i32) as f64 + second) / SECONDS_PER_DAY_F64;
        Self::new(jd1, jd2)
    }
}

impl fmt::Display for JulianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JD {:.9}", self.to_f64())
    }
}

/// Gregorian calendar date to Modified Julian Date at 0h, as a whole number
/// of days. Standard integer algorithm (Fliegel & Van Flandern form).
pub(crate) fn calendar_to_mjd(year: i32, month: i32, day: i32) -> f64 {
    let my = (month - 14) / 12;
    let adjusted_year = year + my;

    ((1461 * (adjusted_year + 4800)) / 4 + (367 * (month - 2 - 12 * my)) / 12
        - (3 * ((adjusted_year + 4900) / 100)) / 4
        + day
        - 2432076) as f64
}

/// Converts a two-part Julian Date to `(year, month, day, day_fraction)`.
///
/// The fraction measures time from midnight in [0, 1). The calendar fields
/// come from exact integer arithmetic on the combined day number, so dates
/// far from the epoch do not accumulate floating-point error.
///
/// # Errors
///
/// Fails with `ConversionError` if the date is outside the representable
/// range (roughly 4713 BCE to JD 1e9).
pub fn julian_to_calendar(jd: &JulianDate) -> TimeResult<(i32, u8, u8, f64)> {
    const DJ_MIN: f64 = -68569.5;
    const DJ_MAX: f64 = 1e9;

    let total = jd.to_f64();
    if !(DJ_MIN..=DJ_MAX).contains(&total) {
        return Err(TimeError::ConversionError(format!(
            "Julian Date {} outside valid range [{}, {}]",
            total, DJ_MIN, DJ_MAX
        )));
    }

    // Round each component separately and carry the residuals into the day
    // fraction; the +0.5 shifts from noon-based JD to midnight-based days.
    let d1 = jd.jd1().round();
    let d2 = jd.jd2().round();
    let mut day_number = d1 as i64 + d2 as i64;
    let mut fraction = (jd.jd1() - d1) + (jd.jd2() - d2) + 0.5;

    while fraction >= 1.0 {
        fraction -= 1.0;
        day_number += 1;
    }
    while fraction < 0.0 {
        fraction += 1.0;
        day_number -= 1;
    }

    let mut l = day_number + 68569;
    let n = (4 * l) / 146097;
    l -= (146097 * n + 3) / 4;
    let i = (4000 * (l + 1)) / 1461001;
    l -= (1461 * i) / 4 - 31;
    let k = (80 * l) / 2447;
    let day = (l - (2447 * k) / 80) as u8;
    let l_final = k / 11;
    let month = (k + 2 - 12 * l_final) as u8;
    let year = (100 * (n - 49) + i + l_final) as i32;

    Ok((year, month, day, fraction))
}

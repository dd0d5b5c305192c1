//! Scale-tagged instants with canonical TAI storage.
//!
//! An [`Epoch`] is an immutable point in time. Internally every epoch is a
//! split Julian Date in TAI, the one scale in the set that is both continuous
//! and independent of Earth rotation, so arithmetic, differencing, and
//! ordering never see a leap-second discontinuity. The [`TimeScale`] tag
//! records which scale the epoch was expressed in when it was created and is
//! purely presentational; two epochs created from the same instant in
//! different scales compare equal.
//!
//! # Scale relationships
//!
//! | Scale | Relation to TAI |
//! |-------|-----------------|
//! | TAI   | identity |
//! | GPS   | TAI = GPS + 19 s (fixed) |
//! | TT    | TT = TAI + 32.184 s (fixed) |
//! | UTC   | TAI = UTC + leap-second offset (table lookup) |
//! | UT1   | UT1 = UTC + ΔUT1 (caller-supplied, \|ΔUT1\| < 0.9 s) |
//!
//! UTC to TAI is a direct table lookup keyed on the UTC calendar date; the
//! reverse direction is solved by a short fixed-point iteration because the
//! leap table is keyed on UTC, which is the unknown. ΔUT1 cannot be computed
//! from first principles and must be measured by the IERS, so every UT1
//! operation takes it as an explicit argument.
//!
//! # Leap second behavior
//!
//! A leap second is constructible from calendar components
//! (`23:59:60.x` on a leap day, UTC only) and lands on the correct TAI
//! instant, so differences across the boundary count the inserted second:
//!
//! ```
//! use orbit_time::{Epoch, TimeScale};
//!
//! let before = Epoch::from_calendar(2016, 12, 31, 23, 59, 59.0, TimeScale::UTC).unwrap();
//! let after = Epoch::from_calendar(2017, 1, 1, 0, 0, 0.0, TimeScale::UTC).unwrap();
//! // One ordinary second plus the inserted leap second
//! assert!((after - before - 2.0).abs() < 1e-9);
//! ```
//!
//! When converting TAI back to a UTC calendar representation, the
//! leap second itself aliases onto `23:59:59` of the same day: a continuous
//! Julian Date cannot express second 60.

use crate::julian::{julian_to_calendar, JulianDate};
use crate::leap::{days_in_month, LeapSecondTable};
use crate::parsing::parse_iso8601;
use crate::{TimeError, TimeResult};
use orbit_core::constants::SECONDS_PER_DAY_F64;
use std::fmt;
use std::str::FromStr;

/// TAI - GPS in seconds (fixed since the GPS epoch, 1980-01-06).
pub const GPS_TAI_OFFSET: f64 = 19.0;

/// TT - TAI in seconds (defining constant).
pub const TT_TAI_OFFSET: f64 = 32.184;

const TAI_TO_UTC_ITERATIONS: usize = 3;

/// The time scales an [`Epoch`] can be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeScale {
    UTC,
    TAI,
    GPS,
    TT,
    UT1,
}

impl fmt::Display for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeScale::UTC => "UTC",
            TimeScale::TAI => "TAI",
            TimeScale::GPS => "GPS",
            TimeScale::TT => "TT",
            TimeScale::UT1 => "UT1",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for TimeScale {
    type Err = TimeError;

    fn from_str(s: &str) -> TimeResult<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UTC" => Ok(TimeScale::UTC),
            "TAI" => Ok(TimeScale::TAI),
            "GPS" => Ok(TimeScale::GPS),
            "TT" => Ok(TimeScale::TT),
            "UT1" => Ok(TimeScale::UT1),
            other => Err(TimeError::ParseError(format!(
                "unknown time scale: '{}'",
                other
            ))),
        }
    }
}

/// An immutable instant, stored as a split Julian Date in TAI.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Epoch {
    tai: JulianDate,
    scale: TimeScale,
}

impl Epoch {
    /// Creates an epoch from calendar components in the given scale, using
    /// the bundled leap-second table.
    ///
    /// Seconds may be fractional. `second >= 60` is accepted only for UTC at
    /// `23:59` of a day that actually ends in a leap second.
    ///
    /// # Errors
    ///
    /// - `InvalidDate` for out-of-range calendar fields.
    /// - `UnsupportedDate` for dates before the leap table begins (1972-01-01
    ///   for the bundled table); every epoch must stay convertible to UTC.
    /// - `ConversionError` for [`TimeScale::UT1`]; use
    ///   [`from_calendar_ut1`](Self::from_calendar_ut1), which takes ΔUT1.
    pub fn from_calendar(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: f64,
        scale: TimeScale,
    ) -> TimeResult<Self> {
        Self::from_calendar_with_table(
            year,
            month,
            day,
            hour,
            minute,
            second,
            scale,
            LeapSecondTable::bundled(),
        )
    }

    /// [`from_calendar`](Self::from_calendar) with an explicit leap table.
    #[allow(clippy::too_many_arguments)]
    pub fn from_calendar_with_table(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: f64,
        scale: TimeScale,
        table: &LeapSecondTable,
    ) -> TimeResult<Self> {
        validate_calendar(year, month, day, hour, minute, second, scale, table)?;

        let jd = JulianDate::from_calendar(year, month, day, hour, minute, second);
        let tai = match scale {
            TimeScale::TAI => jd,
            TimeScale::GPS => jd.add_seconds(GPS_TAI_OFFSET),
            TimeScale::TT => jd.add_seconds(-TT_TAI_OFFSET),
            TimeScale::UTC => {
                let offset = table.offset_at(year, month).ok_or_else(|| {
                    unsupported_date(year, month, day, table)
                })?;
                jd.add_seconds(offset)
            }
            TimeScale::UT1 => {
                return Err(TimeError::ConversionError(
                    "UT1 requires an explicit ΔUT1 offset; use Epoch::from_calendar_ut1"
                        .to_string(),
                ))
            }
        };

        Ok(Self { tai, scale })
    }

    /// Creates an epoch from calendar components expressed in UT1, given the
    /// measured ΔUT1 = UT1 - UTC in seconds.
    pub fn from_calendar_ut1(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: f64,
        dut1: f64,
    ) -> TimeResult<Self> {
        let table = LeapSecondTable::bundled();
        validate_calendar(year, month, day, hour, minute, second, TimeScale::UT1, table)?;
        validate_dut1(dut1)?;

        // UTC = UT1 - ΔUT1; |ΔUT1| < 0.9 s never moves the leap lookup date
        // far enough to matter.
        let utc_jd =
            JulianDate::from_calendar(year, month, day, hour, minute, second).add_seconds(-dut1);
        let offset = table
            .offset_at(year, month)
            .ok_or_else(|| unsupported_date(year, month, day, table))?;
        Ok(Self {
            tai: utc_jd.add_seconds(offset),
            scale: TimeScale::UT1,
        })
    }

    /// Creates an epoch from a scalar Julian Date in the given scale.
    pub fn from_jd(jd: f64, scale: TimeScale) -> TimeResult<Self> {
        Self::from_julian_date(JulianDate::from_f64(jd), scale)
    }

    /// Creates an epoch from a scalar Modified Julian Date in the given scale.
    pub fn from_mjd(mjd: f64, scale: TimeScale) -> TimeResult<Self> {
        Self::from_julian_date(
            JulianDate::new(orbit_core::constants::MJD_ZERO_POINT, mjd),
            scale,
        )
    }

    /// Creates an epoch from a split Julian Date in the given scale.
    pub fn from_julian_date(jd: JulianDate, scale: TimeScale) -> TimeResult<Self> {
        let table = LeapSecondTable::bundled();
        let tai = match scale {
            TimeScale::TAI => jd,
            TimeScale::GPS => jd.add_seconds(GPS_TAI_OFFSET),
            TimeScale::TT => jd.add_seconds(-TT_TAI_OFFSET),
            TimeScale::UTC => utc_to_tai(jd, table)?,
            TimeScale::UT1 => {
                return Err(TimeError::ConversionError(
                    "UT1 requires an explicit ΔUT1 offset; use Epoch::from_jd_ut1".to_string(),
                ))
            }
        };
        Ok(Self { tai, scale })
    }

    /// Creates an epoch from a scalar UT1 Julian Date and ΔUT1 = UT1 - UTC.
    pub fn from_jd_ut1(jd: f64, dut1: f64) -> TimeResult<Self> {
        validate_dut1(dut1)?;
        let utc = JulianDate::from_f64(jd).add_seconds(-dut1);
        let tai = utc_to_tai(utc, LeapSecondTable::bundled())?;
        Ok(Self {
            tai,
            scale: TimeScale::UT1,
        })
    }

    /// The scale this epoch was expressed in at construction.
    pub fn scale(&self) -> TimeScale {
        self.scale
    }

    /// Returns the same instant tagged with a different presentation scale.
    pub fn in_scale(&self, scale: TimeScale) -> Self {
        Self {
            tai: self.tai,
            scale,
        }
    }

    /// The canonical TAI split Julian Date.
    pub fn tai_julian_date(&self) -> JulianDate {
        self.tai
    }

    pub(crate) fn julian_date_as(&self, scale: TimeScale) -> TimeResult<JulianDate> {
        match scale {
            TimeScale::TAI => Ok(self.tai),
            TimeScale::GPS => Ok(self.tai.add_seconds(-GPS_TAI_OFFSET)),
            TimeScale::TT => Ok(self.tai.add_seconds(TT_TAI_OFFSET)),
            TimeScale::UTC => tai_to_utc(self.tai, LeapSecondTable::bundled()),
            TimeScale::UT1 => Err(TimeError::ConversionError(
                "UT1 requires an explicit ΔUT1 offset; use Epoch::jd_ut1".to_string(),
            )),
        }
    }

    pub(crate) fn ut1_julian_date(&self, dut1: f64) -> TimeResult<JulianDate> {
        validate_dut1(dut1)?;
        let utc = tai_to_utc(self.tai, LeapSecondTable::bundled())?;
        Ok(utc.add_seconds(dut1))
    }

    /// Julian Date of this instant expressed in `scale`.
    ///
    /// Fails for [`TimeScale::UT1`]; use [`jd_ut1`](Self::jd_ut1).
    pub fn jd_as(&self, scale: TimeScale) -> TimeResult<f64> {
        Ok(self.julian_date_as(scale)?.to_f64())
    }

    /// Modified Julian Date of this instant expressed in `scale`.
    pub fn mjd_as(&self, scale: TimeScale) -> TimeResult<f64> {
        Ok(self.julian_date_as(scale)?.to_mjd())
    }

    /// Julian Date in UT1, given ΔUT1 = UT1 - UTC in seconds.
    pub fn jd_ut1(&self, dut1: f64) -> TimeResult<f64> {
        Ok(self.ut1_julian_date(dut1)?.to_f64())
    }

    /// Calendar components `(year, month, day, hour, minute, second)` of
    /// this instant expressed in `scale`.
    pub fn calendar_as(&self, scale: TimeScale) -> TimeResult<(i32, u8, u8, u8, u8, f64)> {
        let jd = self.julian_date_as(scale)?;
        let (year, month, day, fraction) = julian_to_calendar(&jd)?;
        let total_seconds = fraction * SECONDS_PER_DAY_F64;
        let hour = (total_seconds / 3600.0) as u8;
        let minute = ((total_seconds - 3600.0 * hour as f64) / 60.0) as u8;
        let second = total_seconds - 3600.0 * hour as f64 - 60.0 * minute as f64;
        Ok((year, month, day, hour, minute, second))
    }

    /// ISO-8601 UTC string with milliseconds truncated: `YYYY-MM-DDTHH:MM:SS.sssZ`.
    pub fn to_iso8601(&self) -> TimeResult<String> {
        let (year, month, day, hour, minute, second) = self.calendar_as(TimeScale::UTC)?;
        let millis = (second * 1000.0).floor() / 1000.0;
        Ok(format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:06.3}Z",
            year, month, day, hour, minute, millis
        ))
    }

    /// Returns a new epoch offset by the given signed seconds, in the same
    /// presentation scale. The offset is applied to the canonical TAI
    /// representation, so it is uniform seconds regardless of leap-second
    /// boundaries.
    pub fn add_seconds(&self, seconds: f64) -> Self {
        Self {
            tai: self.tai.add_seconds(seconds),
            scale: self.scale,
        }
    }

    /// Signed difference `self - other` in seconds, computed on the
    /// canonical TAI representation.
    pub fn diff_seconds(&self, other: &Epoch) -> f64 {
        self.tai.diff_seconds(&other.tai)
    }
}

impl PartialEq for Epoch {
    fn eq(&self, other: &Self) -> bool {
        self.tai.diff_days(&other.tai) == 0.0
    }
}

impl PartialOrd for Epoch {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.tai.diff_days(&other.tai).partial_cmp(&0.0)
    }
}

impl std::ops::Add<f64> for Epoch {
    type Output = Epoch;

    /// Adds seconds.
    fn add(self, seconds: f64) -> Epoch {
        self.add_seconds(seconds)
    }
}

impl std::ops::Sub<f64> for Epoch {
    type Output = Epoch;

    /// Subtracts seconds.
    fn sub(self, seconds: f64) -> Epoch {
        self.add_seconds(-seconds)
    }
}

impl std::ops::Sub<Epoch> for Epoch {
    type Output = f64;

    /// Difference in seconds.
    fn sub(self, other: Epoch) -> f64 {
        self.diff_seconds(&other)
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_iso8601() {
            Ok(iso) => write!(f, "{}", iso),
            Err(_) => write!(f, "TAI {}", self.tai),
        }
    }
}

impl FromStr for Epoch {
    type Err = TimeError;

    /// Parses `YYYY-MM-DDTHH:MM:SS[.sss][Z][ <scale>]`. With no scale token
    /// the string is interpreted as UTC.
    fn from_str(s: &str) -> TimeResult<Self> {
        let trimmed = s.trim();
        let (datetime_part, scale) = match trimmed.rsplit_once(' ') {
            Some((head, tail)) => match TimeScale::from_str(tail) {
                Ok(scale) => (head, scale),
                Err(_) => (trimmed, TimeScale::UTC),
            },
            None => (trimmed, TimeScale::UTC),
        };
        let dt = parse_iso8601(datetime_part)?;
        Self::from_calendar(dt.year, dt.month, dt.day, dt.hour, dt.minute, dt.second, scale)
    }
}

fn unsupported_date(year: i32, month: u8, day: u8, table: &LeapSecondTable) -> TimeError {
    let (min_year, min_month) = table.min_date();
    TimeError::UnsupportedDate(format!(
        "{:04}-{:02}-{:02} precedes the leap-second table start {:04}-{:02}-01",
        year, month, day, min_year, min_month
    ))
}

fn validate_dut1(dut1: f64) -> TimeResult<()> {
    if !dut1.is_finite() || dut1.abs() >= 0.9 {
        return Err(TimeError::ConversionError(format!(
            "ΔUT1 must be finite and within ±0.9 s, got {}",
            dut1
        )));
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn validate_calendar(
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: f64,
    scale: TimeScale,
    table: &LeapSecondTable,
) -> TimeResult<()> {
    let invalid = |message: String| TimeError::InvalidDate {
        year,
        month,
        day,
        message,
    };

    if !(1..=12).contains(&month) {
        return Err(invalid(format!("month {} out of range", month)));
    }
    if day < 1 || day > days_in_month(year, month) {
        return Err(invalid(format!("day {} out of range", day)));
    }
    if hour > 23 {
        return Err(invalid(format!("hour {} out of range", hour)));
    }
    if minute > 59 {
        return Err(invalid(format!("minute {} out of range", minute)));
    }
    if !second.is_finite() || second < 0.0 {
        return Err(invalid(format!("second {} invalid", second)));
    }

    if second >= 60.0 {
        let is_leap_slot = scale == TimeScale::UTC
            && hour == 23
            && minute == 59
            && second < 61.0
            && table.leap_at_end_of_day(year, month, day) >= 1.0;
        if !is_leap_slot {
            return Err(invalid(format!("second {} out of range", second)));
        }
    }

    if !table.covers(year, month) {
        return Err(unsupported_date(year, month, day, table));
    }

    Ok(())
}

/// UTC split Julian Date to TAI: look up the leap offset for the UTC
/// calendar date and add it.
fn utc_to_tai(utc: JulianDate, table: &LeapSecondTable) -> TimeResult<JulianDate> {
    let (year, month, day, _) = julian_to_calendar(&utc)?;
    let offset = table
        .offset_at(year, month)
        .ok_or_else(|| unsupported_date(year, month, day, table))?;
    Ok(utc.add_seconds(offset))
}

/// TAI split Julian Date to UTC by fixed-point iteration.
///
/// The leap table is keyed on the UTC date, which is what we are solving
/// for, so start from `utc = tai` and refine: each pass converts the guess
/// forward and feeds the residual back. The offset lookup stabilizes within
/// one pass; the remaining iterations polish the floating-point residual.
fn tai_to_utc(tai: JulianDate, table: &LeapSecondTable) -> TimeResult<JulianDate> {
    let mut utc = tai;
    for _ in 0..TAI_TO_UTC_ITERATIONS {
        let guess_tai = utc_to_tai(utc, table)?;
        let residual_days = tai.diff_days(&guess_tai);
        utc = utc.add_days(residual_days);
    }
    Ok(utc)
}

//! Time scales and epochs for the orbit geometry kernel.
//!
//! The [`Epoch`] type represents an instant tagged with the [`TimeScale`] it
//! was expressed in (UTC, TAI, GPS, TT, or UT1) while storing a canonical
//! TAI split Julian Date internally, so arithmetic and comparisons are
//! immune to leap-second discontinuities. The [`leap`] module owns the
//! leap-second table, and [`sidereal`] provides the Earth rotation angle
//! that ties the time system to the Earth-fixed frame.
//!
//! ```
//! use orbit_time::{Epoch, TimeScale};
//!
//! let epc = Epoch::from_calendar(2018, 1, 1, 12, 0, 0.0, TimeScale::UTC)?;
//! let one_orbit_later = epc.add_seconds(5676.98);
//! assert!(one_orbit_later > epc);
//! # Ok::<(), orbit_time::TimeError>(())
//! ```

pub mod epoch;
pub mod julian;
pub mod leap;
pub mod parsing;
pub mod sidereal;

pub use epoch::{Epoch, TimeScale, GPS_TAI_OFFSET, TT_TAI_OFFSET};
pub use julian::{julian_to_calendar, JulianDate};
pub use leap::{LeapSecondEntry, LeapSecondTable};
pub use sidereal::{earth_rotation_angle, gmst};

use thiserror::Error;

/// Convenience alias for `Result<T, TimeError>`.
pub type TimeResult<T> = Result<T, TimeError>;

/// Error type for time-system operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimeError {
    /// Syntactically invalid calendar fields.
    #[error("invalid date {year:04}-{month:02}-{day:02}: {message}")]
    InvalidDate {
        year: i32,
        month: u8,
        day: u8,
        message: String,
    },

    /// Malformed datetime or scale string.
    #[error("parse error: {0}")]
    ParseError(String),

    /// Date outside the range covered by the leap-second table.
    #[error("unsupported date: {0}")]
    UnsupportedDate(String),

    /// Scale conversion could not be performed.
    #[error("conversion error: {0}")]
    ConversionError(String),

    /// Numerical guard tripped during a derived-quantity calculation.
    #[error("calculation error: {0}")]
    CalculationError(String),
}

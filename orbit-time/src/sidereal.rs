//! Earth rotation angle and Greenwich mean sidereal time.
//!
//! The Earth rotation angle (ERA) is the modern, conceptually simple measure
//! of how far the Earth has turned: a linear function of UT1 defined by the
//! IAU 2000 resolutions. GMST adds a slow polynomial in TT centuries that
//! accounts for the precession of the equinox. Either can parameterize the
//! rotation between the Earth-fixed and inertial frames; the frames crate
//! uses ERA.

use crate::epoch::{Epoch, TimeScale};
use crate::julian::JulianDate;
use crate::{TimeError, TimeResult};
use orbit_core::constants::{
    ARCSEC_TO_RAD, DAYS_PER_JULIAN_CENTURY, J2000_JD, TWOPI,
};
use orbit_core::math::fmod;
use orbit_core::{wrap_0_2pi, Angle};

/// Earth rotation angle at the given epoch (IAU 2000), wrapped to [0, 2π).
///
/// `dut1` is the measured UT1-UTC offset in seconds. Pass `0.0` when
/// millisecond-level rotation accuracy is sufficient.
pub fn earth_rotation_angle(epoch: &Epoch, dut1: f64) -> TimeResult<Angle> {
    let ut1 = epoch.ut1_julian_date(dut1)?;
    let theta = era_from_ut1_jd(&ut1)?;
    Ok(Angle::from_radians(theta))
}

/// Greenwich mean sidereal time at the given epoch (IAU 2006), wrapped to
/// [0, 2π).
pub fn gmst(epoch: &Epoch, dut1: f64) -> TimeResult<Angle> {
    let ut1 = epoch.ut1_julian_date(dut1)?;
    let era = era_from_ut1_jd(&ut1)?;

    let tt = epoch.julian_date_as(TimeScale::TT)?;
    let t = ((tt.jd1() - J2000_JD) + tt.jd2()) / DAYS_PER_JULIAN_CENTURY;

    // IAU 2006 equinox-based correction, evaluated by Horner's method.
    let polynomial_arcsec = 0.014506
        + t * (4612.156534
            + t * (1.3915817 + t * (-0.00000044 + t * (-0.000029956 + t * (-0.0000000368)))));

    Ok(Angle::from_radians(wrap_0_2pi(
        era + polynomial_arcsec * ARCSEC_TO_RAD,
    )))
}

/// ERA from a split UT1 Julian Date.
///
/// The day fractions are extracted separately from the two components so the
/// angle keeps full precision even though the combined Julian Date exceeds
/// 2.4 million days.
fn era_from_ut1_jd(ut1: &JulianDate) -> TimeResult<f64> {
    let (d1, d2) = if ut1.jd1() < ut1.jd2() {
        (ut1.jd1(), ut1.jd2())
    } else {
        (ut1.jd2(), ut1.jd1())
    };

    let t = d1 + (d2 - J2000_JD);
    if !t.is_finite() || t.abs() > 1e12 {
        return Err(TimeError::CalculationError(format!(
            "UT1 value out of valid range: {} days from J2000",
            t
        )));
    }

    let f = fmod(d1, 1.0) + fmod(d2, 1.0);
    let theta = TWOPI * (f + 0.779_057_273_264_0 + 0.002_737_811_911_354_48 * t);
    Ok(wrap_0_2pi(theta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbit_core::constants::RAD_TO_DEG;

    fn j2000_epoch() -> Epoch {
        // J2000.0 expressed directly in UT1 with ΔUT1 = 0
        Epoch::from_calendar_ut1(2000, 1, 1, 12, 0, 0.0, 0.0).unwrap()
    }

    #[test]
    fn test_era_at_j2000() {
        let epc = j2000_epoch();
        let era = earth_rotation_angle(&epc, 0.0).unwrap();
        // ERA(J2000.0 UT1) = 2π * 0.7790572732640 ≈ 280.46°
        let expected = TWOPI * 0.779_057_273_264_0;
        assert!(
            (era.radians() - expected).abs() < 1e-9,
            "ERA at J2000 was {} rad, expected {}",
            era.radians(),
            expected
        );
    }

    #[test]
    fn test_era_advances_one_turn_per_sidereal_day() {
        let epc = j2000_epoch();
        let era0 = earth_rotation_angle(&epc, 0.0).unwrap().radians();
        // One mean solar day advances ERA by slightly more than one turn
        let era1 = earth_rotation_angle(&epc.add_seconds(86400.0), 0.0)
            .unwrap()
            .radians();
        let advance = wrap_0_2pi(era1 - era0);
        let expected = TWOPI * 0.002_737_811_911_354_48;
        assert!(
            (advance - expected).abs() < 1e-9,
            "daily ERA advance was {} rad",
            advance
        );
    }

    #[test]
    fn test_era_range() {
        let samples = [
            (1999, 6, 21, 3, 30, 0.0),
            (2010, 12, 1, 18, 0, 12.0),
            (2020, 2, 29, 23, 59, 59.0),
        ];
        for (y, mo, d, h, mi, s) in samples {
            let epc = Epoch::from_calendar(y, mo, d, h, mi, s, TimeScale::UTC).unwrap();
            let era = earth_rotation_angle(&epc, 0.0).unwrap().radians();
            assert!((0.0..TWOPI).contains(&era));
        }
    }

    #[test]
    fn test_gmst_close_to_era() {
        // Near J2000 the equinox correction is tiny (sub-arcminute)
        let epc = j2000_epoch();
        let era = earth_rotation_angle(&epc, 0.0).unwrap().radians();
        let gm = gmst(&epc, 0.0).unwrap().radians();
        let delta_deg = (gm - era).abs() * RAD_TO_DEG;
        assert!(delta_deg < 0.01, "GMST-ERA = {} deg at J2000", delta_deg);
    }

    #[test]
    fn test_gmst_j2000_known_value() {
        // GMST at 2000-01-01 12:00 UT1 is about 18.697 sidereal hours
        let epc = j2000_epoch();
        let gm = gmst(&epc, 0.0).unwrap();
        let hours = gm.radians() / TWOPI * 24.0;
        assert!(
            (hours - 18.697).abs() < 0.01,
            "GMST at J2000 was {} h",
            hours
        );
    }

    #[test]
    fn test_dut1_shifts_angle() {
        let epc = Epoch::from_calendar(2018, 1, 1, 12, 0, 0.0, TimeScale::UTC).unwrap();
        let a = earth_rotation_angle(&epc, 0.0).unwrap().radians();
        let b = earth_rotation_angle(&epc, 0.5).unwrap().radians();
        let expected_shift = TWOPI * (0.5 / 86400.0) * 1.002_737_811_911_354_48;
        assert!(
            ((b - a) - expected_shift).abs() < 1e-10,
            "ΔUT1 shift was {}",
            b - a
        );
    }

    #[test]
    fn test_invalid_dut1_rejected() {
        let epc = Epoch::from_calendar(2018, 1, 1, 12, 0, 0.0, TimeScale::UTC).unwrap();
        assert!(earth_rotation_angle(&epc, 2.0).is_err());
        assert!(gmst(&epc, f64::INFINITY).is_err());
    }
}

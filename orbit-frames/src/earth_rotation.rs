//! Earth-fixed and inertial frame transforms.
//!
//! The two frames share the polar axis and differ by the Earth rotation
//! angle θ(t), a function of UT1. The position transform is the single
//! elementary rotation `Rz(θ)`; the velocity transform additionally carries
//! the frame-rotation term `ω⊕ × r` because the Earth-fixed frame is
//! non-inertial:
//!
//! ```text
//! r_ecef = Rz(θ) r_eci               r_eci = Rz(θ)ᵀ r_ecef
//! v_ecef = Rz(θ) v_eci - ω⊕ × r_ecef  v_eci = Rz(θ)ᵀ (v_ecef + ω⊕ × r_ecef)
//! ```
//!
//! This is the sidereal-angle model: precession, nutation, and polar motion
//! are not applied, which keeps the transform adequate for access-window
//! and look-angle geometry at the tens-of-arcseconds level.

use crate::earth_model::EarthModel;
use crate::errors::FrameResult;
use crate::states::{EcefState, EciState};
use orbit_core::{RotationMatrix3, Vector3};
use orbit_time::{earth_rotation_angle, Epoch};

/// Rotation taking inertial coordinates to Earth-fixed coordinates at the
/// given epoch: `Rz(θ(t))`.
///
/// `dut1` is the measured UT1-UTC offset in seconds (pass `0.0` for
/// millisecond-level work).
pub fn eci_to_ecef_rotation(epoch: &Epoch, dut1: f64) -> FrameResult<RotationMatrix3> {
    let theta = earth_rotation_angle(epoch, dut1)?;
    Ok(RotationMatrix3::about_z(theta))
}

/// Rotation taking Earth-fixed coordinates to inertial coordinates at the
/// given epoch; the transpose of [`eci_to_ecef_rotation`].
pub fn ecef_to_eci_rotation(epoch: &Epoch, dut1: f64) -> FrameResult<RotationMatrix3> {
    Ok(eci_to_ecef_rotation(epoch, dut1)?.transpose())
}

/// Transforms a full inertial state to the Earth-fixed frame, correcting
/// the velocity for the frame's rotation.
pub fn eci_to_ecef(
    state: &EciState,
    epoch: &Epoch,
    dut1: f64,
    model: &EarthModel,
) -> FrameResult<EcefState> {
    let rotation = eci_to_ecef_rotation(epoch, dut1)?;
    let omega = rotation_rate_vector(model);

    let position = &rotation * state.position;
    let velocity = &rotation * state.velocity - omega.cross(&position);
    Ok(EcefState::new(position, velocity))
}

/// Transforms a full Earth-fixed state to the inertial frame, restoring
/// the frame-rotation velocity term.
pub fn ecef_to_eci(
    state: &EcefState,
    epoch: &Epoch,
    dut1: f64,
    model: &EarthModel,
) -> FrameResult<EciState> {
    let rotation = ecef_to_eci_rotation(epoch, dut1)?;
    let omega = rotation_rate_vector(model);

    let position = &rotation * state.position;
    let velocity = &rotation * (state.velocity + omega.cross(&state.position));
    Ok(EciState::new(position, velocity))
}

/// Earth's rotation vector ω⊕ ẑ in the Earth-fixed frame.
fn rotation_rate_vector(model: &EarthModel) -> Vector3 {
    Vector3::new(0.0, 0.0, model.rotation_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbit_core::constants::WGS84_SEMI_MAJOR_AXIS;
    use orbit_time::TimeScale;

    const WGS84: EarthModel = EarthModel::WGS84;

    fn test_epoch() -> Epoch {
        Epoch::from_calendar(2018, 3, 20, 16, 15, 27.0, TimeScale::UTC).unwrap()
    }

    #[test]
    fn test_rotations_are_mutual_transposes() {
        let epc = test_epoch();
        let forward = eci_to_ecef_rotation(&epc, 0.0).unwrap();
        let inverse = ecef_to_eci_rotation(&epc, 0.0).unwrap();
        assert_eq!(forward.transpose().elements(), inverse.elements());
        assert!(forward.is_rotation_matrix(1e-12));
    }

    #[test]
    fn test_position_round_trip() {
        let epc = test_epoch();
        let eci = EciState::new(
            Vector3::new(6.9e6, -1.2e6, 0.4e6),
            Vector3::new(1.1e3, 7.2e3, -0.3e3),
        );
        let ecef = eci_to_ecef(&eci, &epc, 0.0, &WGS84).unwrap();
        let back = ecef_to_eci(&ecef, &epc, 0.0, &WGS84).unwrap();

        assert!((back.position - eci.position).norm() < 1e-6);
        assert!((back.velocity - eci.velocity).norm() < 1e-9);
    }

    #[test]
    fn test_rotation_preserves_radius_and_z() {
        let epc = test_epoch();
        let eci = EciState::new(
            Vector3::new(5e6, 3e6, 2e6),
            Vector3::new(0.0, 0.0, 0.0),
        );
        let ecef = eci_to_ecef(&eci, &epc, 0.0, &WGS84).unwrap();
        // Rotation about the polar axis leaves |r| and z untouched
        assert!((ecef.position.norm() - eci.position.norm()).abs() < 1e-6);
        assert!((ecef.position.z - eci.position.z).abs() < 1e-9);
    }

    #[test]
    fn test_ground_point_is_stationary_in_ecef() {
        // A point corotating with the Earth has ECI velocity ω⊕ × r and
        // should come out with zero ECEF velocity.
        let epc = test_epoch();
        let rotation = ecef_to_eci_rotation(&epc, 0.0).unwrap();
        let r_ecef = Vector3::new(WGS84_SEMI_MAJOR_AXIS, 0.0, 0.0);
        let r_eci = &rotation * r_ecef;
        let omega = Vector3::new(0.0, 0.0, WGS84.rotation_rate);
        let v_eci = omega.cross(&r_eci);

        let ecef = eci_to_ecef(&EciState::new(r_eci, v_eci), &epc, 0.0, &WGS84).unwrap();
        assert!(
            ecef.velocity.norm() < 1e-9,
            "corotating point has ECEF speed {}",
            ecef.velocity.norm()
        );
        assert!((ecef.position - r_ecef).norm() < 1e-6);
    }

    #[test]
    fn test_equatorial_velocity_correction_magnitude() {
        // An ECI-stationary point on the equator moves westward in ECEF at
        // ω⊕ · r ≈ 465 m/s.
        let epc = test_epoch();
        let eci = EciState::new(
            Vector3::new(WGS84_SEMI_MAJOR_AXIS, 0.0, 0.0),
            Vector3::ZERO,
        );
        let ecef = eci_to_ecef(&eci, &epc, 0.0, &WGS84).unwrap();
        let expected = WGS84.rotation_rate * WGS84_SEMI_MAJOR_AXIS;
        assert!(
            (ecef.velocity.norm() - expected).abs() < 1e-6,
            "ECEF speed {} expected {}",
            ecef.velocity.norm(),
            expected
        );
    }

    #[test]
    fn test_rotation_advances_with_time() {
        let epc = test_epoch();
        let r1 = eci_to_ecef_rotation(&epc, 0.0).unwrap();
        // A quarter sidereal day later the frame has turned by ~90°
        let quarter_sidereal = 86164.1 / 4.0;
        let r2 = eci_to_ecef_rotation(&epc.add_seconds(quarter_sidereal), 0.0).unwrap();

        let x1 = r1.transpose() * Vector3::x_axis();
        let x2 = r2.transpose() * Vector3::x_axis();
        let angle = x1.dot(&x2).clamp(-1.0, 1.0).acos();
        assert!(
            (angle - std::f64::consts::FRAC_PI_2).abs() < 1e-3,
            "frame advanced by {} rad",
            angle
        );
    }

    #[test]
    fn test_dut1_propagates() {
        let epc = test_epoch();
        assert!(eci_to_ecef_rotation(&epc, 5.0).is_err());
    }
}

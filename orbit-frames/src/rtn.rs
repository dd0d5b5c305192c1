//! Relative motion in a chief satellite's RTN frame.
//!
//! The radial/transverse/normal frame rides on a reference ("chief")
//! satellite: R̂ points from the Earth's center through the chief, N̂ along
//! the orbit normal, and T̂ = N̂ × R̂ completes the right-handed triad
//! (along-track for a circular orbit). Proximity operations, formation
//! geometry, and look-angle work are all naturally expressed here.
//!
//! The frame rotates with the chief's orbital motion, so mapping a full
//! position *and velocity* between ECI and RTN is more than a rotation: the
//! transport term `ω × Δr` with the chief's orbital angular velocity
//!
//! ```text
//! ω = (r × v) / |r|²
//! ```
//!
//! must be removed going in and restored coming out. The forward and inverse
//! state transforms below are exact mutual inverses up to floating-point
//! rounding.

use crate::errors::{FrameError, FrameResult};
use crate::states::{EciState, RtnState};
use orbit_core::{RotationMatrix3, Vector3};

/// Rotation taking inertial coordinates to the chief's RTN frame.
///
/// Rows of the result are R̂, T̂, N̂.
///
/// # Errors
///
/// `Domain` if the chief position or its angular momentum is zero; a
/// radial trajectory has no defined transverse or normal direction.
pub fn eci_to_rtn_rotation(chief: &EciState) -> FrameResult<RotationMatrix3> {
    let (r_hat, t_hat, n_hat) = rtn_triad(chief)?;
    Ok(RotationMatrix3::from_rows(r_hat, t_hat, n_hat))
}

/// Rotation taking RTN coordinates back to the inertial frame.
///
/// Columns of the result are R̂, T̂, N̂; this is exactly the transpose of
/// [`eci_to_rtn_rotation`] for the same chief.
pub fn rtn_to_eci_rotation(chief: &EciState) -> FrameResult<RotationMatrix3> {
    let (r_hat, t_hat, n_hat) = rtn_triad(chief)?;
    Ok(RotationMatrix3::from_columns(r_hat, t_hat, n_hat))
}

/// Maps a target's absolute inertial state to its state relative to the
/// chief, expressed in the chief's RTN frame, including the non-inertial
/// velocity correction.
pub fn eci_to_rtn_state(chief: &EciState, target: &EciState) -> FrameResult<RtnState> {
    let rotation = eci_to_rtn_rotation(chief)?;
    let omega_rtn = rotation * orbital_angular_velocity(chief)?;

    let delta_r_rtn = rotation * (target.position - chief.position);
    let delta_v_rtn =
        rotation * (target.velocity - chief.velocity) - omega_rtn.cross(&delta_r_rtn);

    Ok(RtnState::new(delta_r_rtn, delta_v_rtn))
}

/// Maps a relative RTN state back to the target's absolute inertial state.
pub fn rtn_to_eci_state(chief: &EciState, relative: &RtnState) -> FrameResult<EciState> {
    let rotation = eci_to_rtn_rotation(chief)?;
    let omega_rtn = rotation * orbital_angular_velocity(chief)?;
    let inverse = rotation.transpose();

    let delta_r_eci = &inverse * relative.position;
    let delta_v_eci = &inverse * (relative.velocity + omega_rtn.cross(&relative.position));

    Ok(EciState::new(
        chief.position + delta_r_eci,
        chief.velocity + delta_v_eci,
    ))
}

/// The chief's orbital angular velocity ω = (r × v) / |r|² in ECI.
fn orbital_angular_velocity(chief: &EciState) -> FrameResult<Vector3> {
    let r_squared = chief.position.norm_squared();
    if r_squared == 0.0 {
        return Err(FrameError::domain(
            "orbital_angular_velocity",
            "chief position is zero",
        ));
    }
    Ok(chief.position.cross(&chief.velocity) / r_squared)
}

fn rtn_triad(chief: &EciState) -> FrameResult<(Vector3, Vector3, Vector3)> {
    if chief.position.norm() == 0.0 {
        return Err(FrameError::domain(
            "rtn_triad",
            "chief position is zero; radial direction undefined",
        ));
    }
    let h = chief.position.cross(&chief.velocity);
    if h.norm() == 0.0 {
        return Err(FrameError::domain(
            "rtn_triad",
            "chief angular momentum is zero; orbit normal undefined",
        ));
    }

    let r_hat = chief.position.normalize()?;
    let n_hat = h.normalize()?;
    let t_hat = n_hat.cross(&r_hat);
    Ok((r_hat, t_hat, n_hat))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::earth_model::EarthModel;
    use crate::elements::{elements_to_cartesian, mean_motion, OrbitalElements};
    use orbit_core::constants::WGS84_SEMI_MAJOR_AXIS;

    const WGS84: EarthModel = EarthModel::WGS84;

    fn circular_chief(altitude: f64) -> EciState {
        let a = WGS84_SEMI_MAJOR_AXIS + altitude;
        let elements = OrbitalElements::from_degrees(a, 0.0, 0.0, 0.0, 0.0, 0.0).unwrap();
        elements_to_cartesian(&elements, &WGS84).unwrap()
    }

    fn inclined_chief() -> EciState {
        let a = WGS84_SEMI_MAJOR_AXIS + 800e3;
        let elements =
            OrbitalElements::from_degrees(a, 0.05, 51.6, 40.0, 70.0, 135.0).unwrap();
        elements_to_cartesian(&elements, &WGS84).unwrap()
    }

    #[test]
    fn test_rotations_are_mutual_transposes() {
        for chief in [circular_chief(500e3), inclined_chief()] {
            let forward = eci_to_rtn_rotation(&chief).unwrap();
            let inverse = rtn_to_eci_rotation(&chief).unwrap();
            assert_eq!(
                forward.transpose().elements(),
                inverse.elements(),
                "rotation pair must be exact transposes"
            );
            assert!(forward.is_rotation_matrix(1e-12));
            assert!(inverse.is_rotation_matrix(1e-12));
        }
    }

    #[test]
    fn test_triad_for_equatorial_circular_orbit() {
        // Chief at perigee on +x moving along +y: R̂=x̂, T̂=ŷ, N̂=ẑ
        let chief = circular_chief(500e3);
        let rotation = eci_to_rtn_rotation(&chief).unwrap();
        assert!(rotation.max_difference(&RotationMatrix3::identity()) < 1e-12);
    }

    #[test]
    fn test_radial_offset_scenario() {
        // Chief on a 500 km circular orbit; target displaced +100 m along
        // inertial x (the radial direction at this geometry) with identical
        // velocity.
        let chief = circular_chief(500e3);
        let target = EciState::new(
            chief.position + Vector3::new(100.0, 0.0, 0.0),
            chief.velocity,
        );

        let relative = eci_to_rtn_state(&chief, &target).unwrap();

        let tol = 1e-8;
        assert!((relative.position.x - 100.0).abs() < tol);
        assert!(relative.position.y.abs() < tol);
        assert!(relative.position.z.abs() < tol);
        assert!(relative.velocity.x.abs() < tol);
        // The transverse rate picks up the differential orbital-rate
        // coupling -ω·Δr, about 0.11 m/s here.
        assert!(relative.velocity.y.abs() < 0.5);
        assert!(relative.velocity.z.abs() < tol);

        let a = WGS84_SEMI_MAJOR_AXIS + 500e3;
        let n = mean_motion(a, &WGS84).unwrap();
        assert!(
            (relative.velocity.y + 100.0 * n).abs() < 1e-8,
            "transverse rate should be -nΔr, got {}",
            relative.velocity.y
        );
    }

    #[test]
    fn test_state_round_trip() {
        let chief = inclined_chief();
        let offsets = [
            [100.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            [0.0, -250.0, 40.0, 0.1, 0.0, -0.2],
            [-5e3, 12e3, -0.5e3, 1.5, -2.0, 0.75],
            [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        ];
        for offset in offsets {
            let target = EciState::new(
                chief.position + Vector3::new(offset[0], offset[1], offset[2]),
                chief.velocity + Vector3::new(offset[3], offset[4], offset[5]),
            );

            let relative = eci_to_rtn_state(&chief, &target).unwrap();
            let restored = rtn_to_eci_state(&chief, &relative).unwrap();

            let dr = (restored.position - target.position).norm();
            let dv = (restored.velocity - target.velocity).norm();
            assert!(dr < 1e-8, "position round-trip error {} m", dr);
            assert!(dv < 1e-8, "velocity round-trip error {} m/s", dv);
        }
    }

    #[test]
    fn test_coincident_target_maps_to_zero() {
        let chief = inclined_chief();
        let relative = eci_to_rtn_state(&chief, &chief).unwrap();
        assert!(relative.position.norm() < 1e-12);
        assert!(relative.velocity.norm() < 1e-12);
    }

    #[test]
    fn test_relative_position_magnitude_preserved() {
        // The rotation part is length-preserving
        let chief = inclined_chief();
        let target = EciState::new(
            chief.position + Vector3::new(300.0, -400.0, 0.0),
            chief.velocity,
        );
        let relative = eci_to_rtn_state(&chief, &target).unwrap();
        assert!((relative.position.norm() - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_chief_rejected() {
        let zero_position = EciState::new(Vector3::ZERO, Vector3::new(0.0, 7.5e3, 0.0));
        assert!(matches!(
            eci_to_rtn_rotation(&zero_position),
            Err(FrameError::Domain { .. })
        ));

        // Radial trajectory: r ∥ v, so r × v = 0
        let radial = EciState::new(
            Vector3::new(7e6, 0.0, 0.0),
            Vector3::new(2.0e3, 0.0, 0.0),
        );
        assert!(matches!(
            eci_to_rtn_rotation(&radial),
            Err(FrameError::Domain { .. })
        ));
        assert!(eci_to_rtn_state(&radial, &radial).is_err());
        assert!(rtn_to_eci_state(&radial, &RtnState::new(Vector3::ZERO, Vector3::ZERO)).is_err());
    }
}

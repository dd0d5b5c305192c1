//! Osculating orbital elements and their Cartesian equivalents.
//!
//! The element set is the classical Keplerian six: semi-major axis `a`,
//! eccentricity `e`, inclination `i`, right ascension of the ascending node
//! Ω, argument of perigee ω, and mean anomaly `M`. Only closed orbits are
//! representable (`a > 0`, `0 <= e < 1`); parabolic and hyperbolic
//! trajectories are out of scope for this kernel.
//!
//! Conversion to an inertial state solves Kepler's equation
//! `M = E - e sin E` for the eccentric anomaly by Newton-Raphson, builds the
//! state in the perifocal plane, and rotates into the inertial frame with
//! `Rz(-Ω) · Rx(-i) · Rz(-ω)` (argument of perigee first, then inclination,
//! then node). The inverse derives the elements from the angular-momentum
//! and eccentricity vectors.
//!
//! Near-circular and near-equatorial orbits leave ω and Ω geometrically
//! undefined; [`cartesian_to_elements`] reports
//! [`NearSingular`](crate::FrameError::NearSingular) for those instead of
//! returning an arbitrary angle.

use crate::earth_model::EarthModel;
use crate::errors::{FrameError, FrameResult};
use crate::states::EciState;
use orbit_core::{wrap_0_2pi, Angle, RotationMatrix3, Vector3};
use orbit_core::constants::TWOPI;
use std::fmt;

/// Convergence tolerance for the Kepler solver, in radians of eccentric
/// anomaly per step.
pub const KEPLER_TOLERANCE: f64 = 1e-12;

/// Iteration budget for the Kepler solver. Newton-Raphson needs fewer than
/// ten steps everywhere in `e ∈ [0, 0.99]`; the budget only trips on
/// non-finite input or eccentricities outside the supported range.
pub const KEPLER_MAX_ITERATIONS: usize = 25;

/// Eccentricity below which the argument of perigee is treated as undefined.
pub const NEAR_CIRCULAR_THRESHOLD: f64 = 1e-8;

/// Normalized equatorial-component threshold below which the ascending node
/// is treated as undefined.
pub const NEAR_EQUATORIAL_THRESHOLD: f64 = 1e-8;

/// Classical osculating Keplerian elements. Distances in meters, angles as
/// [`Angle`] values; the anomaly is the *mean* anomaly.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrbitalElements {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: Angle,
    pub raan: Angle,
    pub arg_perigee: Angle,
    pub mean_anomaly: Angle,
}

impl OrbitalElements {
    /// Creates an element set, validating `a > 0` and `0 <= e < 1`.
    pub fn new(
        semi_major_axis: f64,
        eccentricity: f64,
        inclination: Angle,
        raan: Angle,
        arg_perigee: Angle,
        mean_anomaly: Angle,
    ) -> FrameResult<Self> {
        if !semi_major_axis.is_finite() || semi_major_axis <= 0.0 {
            return Err(FrameError::domain(
                "OrbitalElements::new",
                &format!("semi-major axis must be positive, got {}", semi_major_axis),
            ));
        }
        if !eccentricity.is_finite() || !(0.0..1.0).contains(&eccentricity) {
            return Err(FrameError::domain(
                "OrbitalElements::new",
                &format!("eccentricity must be in [0, 1), got {}", eccentricity),
            ));
        }
        for (angle, what) in [
            (inclination, "inclination"),
            (raan, "raan"),
            (arg_perigee, "argument of perigee"),
            (mean_anomaly, "mean anomaly"),
        ] {
            if !angle.is_finite() {
                return Err(FrameError::domain(
                    "OrbitalElements::new",
                    &format!("{} must be finite", what),
                ));
            }
        }
        Ok(Self {
            semi_major_axis,
            eccentricity,
            inclination,
            raan,
            arg_perigee,
            mean_anomaly,
        })
    }

    /// Creates an element set with the four angles given in degrees.
    pub fn from_degrees(
        semi_major_axis: f64,
        eccentricity: f64,
        inclination_deg: f64,
        raan_deg: f64,
        arg_perigee_deg: f64,
        mean_anomaly_deg: f64,
    ) -> FrameResult<Self> {
        Self::new(
            semi_major_axis,
            eccentricity,
            Angle::from_degrees(inclination_deg),
            Angle::from_degrees(raan_deg),
            Angle::from_degrees(arg_perigee_deg),
            Angle::from_degrees(mean_anomaly_deg),
        )
    }

    /// Creates an element set with the four angles given in radians.
    pub fn from_radians(
        semi_major_axis: f64,
        eccentricity: f64,
        inclination_rad: f64,
        raan_rad: f64,
        arg_perigee_rad: f64,
        mean_anomaly_rad: f64,
    ) -> FrameResult<Self> {
        Self::new(
            semi_major_axis,
            eccentricity,
            Angle::from_radians(inclination_rad),
            Angle::from_radians(raan_rad),
            Angle::from_radians(arg_perigee_rad),
            Angle::from_radians(mean_anomaly_rad),
        )
    }
}

impl fmt::Display for OrbitalElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Elements(a={:.3}m, e={:.6}, i={:.4}°, Ω={:.4}°, ω={:.4}°, M={:.4}°)",
            self.semi_major_axis,
            self.eccentricity,
            self.inclination.degrees(),
            self.raan.degrees(),
            self.arg_perigee.degrees(),
            self.mean_anomaly.degrees()
        )
    }
}

/// Mean motion `n = sqrt(GM / a³)` in rad/s.
pub fn mean_motion(semi_major_axis: f64, model: &EarthModel) -> FrameResult<f64> {
    if !semi_major_axis.is_finite() || semi_major_axis <= 0.0 {
        return Err(FrameError::domain(
            "mean_motion",
            &format!("semi-major axis must be positive, got {}", semi_major_axis),
        ));
    }
    Ok(libm::sqrt(model.gm / semi_major_axis.powi(3)))
}

/// Orbital period `2π / n` in seconds.
pub fn orbital_period(semi_major_axis: f64, model: &EarthModel) -> FrameResult<f64> {
    Ok(TWOPI / mean_motion(semi_major_axis, model)?)
}

/// Solves Kepler's equation `M = E - e sin E` for the eccentric anomaly.
///
/// Newton-Raphson with a fixed tolerance and iteration budget; the initial
/// guess is `M` for low eccentricities and π for high ones, which keeps the
/// iteration monotone.
///
/// # Errors
///
/// `Convergence` if the budget is exhausted; `Domain` for `e` outside
/// `[0, 1)` or a non-finite anomaly.
pub fn anomaly_mean_to_eccentric(mean_anomaly: Angle, eccentricity: f64) -> FrameResult<Angle> {
    if !eccentricity.is_finite() || !(0.0..1.0).contains(&eccentricity) {
        return Err(FrameError::domain(
            "anomaly_mean_to_eccentric",
            &format!("eccentricity must be in [0, 1), got {}", eccentricity),
        ));
    }
    if !mean_anomaly.is_finite() {
        return Err(FrameError::domain(
            "anomaly_mean_to_eccentric",
            "mean anomaly must be finite",
        ));
    }

    let m = wrap_0_2pi(mean_anomaly.radians());
    let mut e_anom = if eccentricity < 0.8 { m } else { orbit_core::constants::PI };

    for _ in 0..KEPLER_MAX_ITERATIONS {
        let f = e_anom - eccentricity * e_anom.sin() - m;
        let f_prime = 1.0 - eccentricity * e_anom.cos();
        let delta = f / f_prime;
        e_anom -= delta;
        if delta.abs() < KEPLER_TOLERANCE {
            return Ok(Angle::from_radians(wrap_0_2pi(e_anom)));
        }
    }

    Err(FrameError::Convergence {
        operation: "anomaly_mean_to_eccentric".to_string(),
        iterations: KEPLER_MAX_ITERATIONS,
        tolerance: KEPLER_TOLERANCE,
    })
}

/// Mean anomaly from eccentric anomaly (Kepler's equation, forward).
pub fn anomaly_eccentric_to_mean(eccentric_anomaly: Angle, eccentricity: f64) -> Angle {
    let e_anom = eccentric_anomaly.radians();
    Angle::from_radians(wrap_0_2pi(e_anom - eccentricity * e_anom.sin()))
}

/// True anomaly from eccentric anomaly.
pub fn anomaly_eccentric_to_true(eccentric_anomaly: Angle, eccentricity: f64) -> Angle {
    let (sin_e, cos_e) = eccentric_anomaly.sin_cos();
    let sqrt_one_minus_e2 = libm::sqrt(1.0 - eccentricity * eccentricity);
    Angle::from_radians(wrap_0_2pi(libm::atan2(
        sqrt_one_minus_e2 * sin_e,
        cos_e - eccentricity,
    )))
}

/// Eccentric anomaly from true anomaly.
pub fn anomaly_true_to_eccentric(true_anomaly: Angle, eccentricity: f64) -> Angle {
    let (sin_nu, cos_nu) = true_anomaly.sin_cos();
    let sqrt_one_minus_e2 = libm::sqrt(1.0 - eccentricity * eccentricity);
    Angle::from_radians(wrap_0_2pi(libm::atan2(
        sqrt_one_minus_e2 * sin_nu,
        cos_nu + eccentricity,
    )))
}

/// Converts osculating elements to an inertial Cartesian state.
pub fn elements_to_cartesian(
    elements: &OrbitalElements,
    model: &EarthModel,
) -> FrameResult<EciState> {
    let a = elements.semi_major_axis;
    let e = elements.eccentricity;

    let e_anom = anomaly_mean_to_eccentric(elements.mean_anomaly, e)?;
    let (sin_e, cos_e) = e_anom.sin_cos();
    let sqrt_one_minus_e2 = libm::sqrt(1.0 - e * e);
    let r_mag = a * (1.0 - e * cos_e);

    let position_pqw = Vector3::new(a * (cos_e - e), a * sqrt_one_minus_e2 * sin_e, 0.0);
    let v_scale = libm::sqrt(model.gm * a) / r_mag;
    let velocity_pqw = Vector3::new(-v_scale * sin_e, v_scale * sqrt_one_minus_e2 * cos_e, 0.0);

    // Perifocal to inertial: undo argument of perigee, inclination, node.
    let rotation = RotationMatrix3::about_z(-elements.raan)
        * RotationMatrix3::about_x(-elements.inclination)
        * RotationMatrix3::about_z(-elements.arg_perigee);

    Ok(EciState::new(
        rotation * position_pqw,
        rotation * velocity_pqw,
    ))
}

/// Derives osculating elements from an inertial Cartesian state.
///
/// Elements come from the specific angular momentum `h = r × v`, the
/// orbit-normal direction, and the vis-viva energy. All angles are wrapped
/// to [0, 2π).
///
/// # Errors
///
/// - `Domain` for a zero angular-momentum (radial) trajectory or a
///   non-elliptic energy (`2/|r| - v²/μ <= 0`).
/// - `NearSingular` for near-circular or near-equatorial orbits, where
///   ω or Ω is geometrically undefined.
pub fn cartesian_to_elements(
    state: &EciState,
    model: &EarthModel,
) -> FrameResult<OrbitalElements> {
    let r = state.position;
    let v = state.velocity;
    let r_mag = r.norm();

    if r_mag == 0.0 {
        return Err(FrameError::domain(
            "cartesian_to_elements",
            "position vector is zero",
        ));
    }

    let h = r.cross(&v);
    let h_mag = h.norm();
    if h_mag == 0.0 {
        return Err(FrameError::domain(
            "cartesian_to_elements",
            "zero angular momentum (radial trajectory)",
        ));
    }
    let w = h / h_mag;

    let equatorial_component = libm::sqrt(w.x * w.x + w.y * w.y);
    let inclination = libm::atan2(equatorial_component, w.z);

    let energy_term = 2.0 / r_mag - v.norm_squared() / model.gm;
    if energy_term <= 0.0 {
        return Err(FrameError::domain(
            "cartesian_to_elements",
            "state is not on a closed (elliptic) orbit",
        ));
    }
    let a = 1.0 / energy_term;

    let p = h_mag * h_mag / model.gm;
    let e = libm::sqrt((1.0 - p / a).max(0.0));

    if e < NEAR_CIRCULAR_THRESHOLD {
        return Err(FrameError::near_singular(
            "cartesian_to_elements",
            "near-circular orbit: argument of perigee undefined",
        ));
    }
    if equatorial_component < NEAR_EQUATORIAL_THRESHOLD {
        return Err(FrameError::near_singular(
            "cartesian_to_elements",
            "near-equatorial orbit: ascending node undefined",
        ));
    }

    let raan = libm::atan2(w.x, -w.y);

    let n = libm::sqrt(model.gm / a.powi(3));
    let e_anom = libm::atan2(r.dot(&v) / (n * a * a), 1.0 - r_mag / a);
    let mean_anomaly = e_anom - e * e_anom.sin();

    // Argument of latitude u = ω + ν, measured from the ascending node.
    let arg_latitude = libm::atan2(r.z, -r.x * w.y + r.y * w.x);
    let true_anomaly =
        anomaly_eccentric_to_true(Angle::from_radians(e_anom), e).radians();
    let arg_perigee = arg_latitude - true_anomaly;

    OrbitalElements::new(
        a,
        e,
        Angle::from_radians(wrap_0_2pi(inclination)),
        Angle::from_radians(wrap_0_2pi(raan)),
        Angle::from_radians(wrap_0_2pi(arg_perigee)),
        Angle::from_radians(wrap_0_2pi(mean_anomaly)),
    )
}

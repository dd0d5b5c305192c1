//! Reference-frame and orbital-element transforms for the orbit geometry
//! kernel.
//!
//! This crate maps satellite states between the reference frames that
//! tasking and access computation care about:
//!
//! - **geodetic ↔ Earth-fixed** ([`geodetic`]): ellipsoid model with the
//!   prime-vertical radius of curvature, plus the iterative inverse.
//! - **Earth-fixed ↔ inertial** ([`earth_rotation`]): `Rz(θ)` with the
//!   Earth rotation angle from `orbit-time`, velocity corrected by ω⊕ × r.
//! - **osculating elements ↔ Cartesian** ([`elements`]): Kepler's equation
//!   and the perifocal rotation chain, both directions.
//! - **RTN relative motion** ([`rtn`]): the chief-centered
//!   radial/transverse/normal frame and the full 6-state transform pair.
//!
//! Physical constants flow through an explicit [`EarthModel`] value rather
//! than globals; [`EarthModel::WGS84`] is the stock choice.
//!
//! ```
//! use orbit_core::Angle;
//! use orbit_frames::{geodetic_to_ecef, EarthModel, GeodeticPoint};
//!
//! let station = GeodeticPoint::new(
//!     Angle::from_degrees(37.7749),
//!     Angle::from_degrees(-122.4194),
//!     10.0,
//! )?;
//! let ecef = geodetic_to_ecef(&station, &EarthModel::WGS84)?;
//! assert!(ecef.norm() > 6.3e6 && ecef.norm() < 6.4e6);
//! # Ok::<(), orbit_frames::FrameError>(())
//! ```

pub mod earth_model;
pub mod earth_rotation;
pub mod elements;
pub mod errors;
pub mod geodetic;
pub mod rtn;
pub mod states;

pub use earth_model::EarthModel;
pub use earth_rotation::{ecef_to_eci, ecef_to_eci_rotation, eci_to_ecef, eci_to_ecef_rotation};
pub use elements::{
    anomaly_eccentric_to_mean, anomaly_eccentric_to_true, anomaly_mean_to_eccentric,
    anomaly_true_to_eccentric, cartesian_to_elements, elements_to_cartesian, mean_motion,
    orbital_period, OrbitalElements,
};
pub use errors::{FrameError, FrameResult};
pub use geodetic::{ecef_to_geodetic, geodetic_to_ecef, GeodeticPoint};
pub use rtn::{eci_to_rtn_rotation, eci_to_rtn_state, rtn_to_eci_rotation, rtn_to_eci_state};
pub use states::{EcefState, EciState, RtnState};

//! Geodetic and Earth-fixed Cartesian coordinates.
//!
//! Geodetic coordinates (latitude, longitude, altitude) are referenced to an
//! ellipsoid: latitude is the angle between the equatorial plane and the
//! surface normal, which at mid-latitudes differs from the geocentric angle
//! by up to ~11 arcminutes because of the equatorial bulge. The forward
//! conversion to Earth-fixed Cartesian uses the prime-vertical radius of
//! curvature
//!
//! ```text
//! N(lat) = a / sqrt(1 - e² sin² lat)
//!
//! x = (N + alt) cos lat cos lon
//! y = (N + alt) cos lat sin lon
//! z = (N (1 - e²) + alt) sin lat
//! ```
//!
//! The inverse has no closed form in `h`; [`ecef_to_geodetic`] uses a
//! Bowring-style initial guess refined by a short fixed iteration, chosen so
//! that forward-then-inverse reproduces the input to well below a
//! millimeter.

use crate::earth_model::EarthModel;
use crate::errors::{FrameError, FrameResult};
use orbit_core::{Angle, Vector3};
use std::fmt;

/// A point referenced to the ellipsoid: latitude, longitude, altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeodeticPoint {
    latitude: Angle,
    longitude: Angle,
    /// Height above the ellipsoid in meters.
    altitude: f64,
}

impl GeodeticPoint {
    /// Creates a geodetic point, validating |latitude| <= 90° and finiteness.
    pub fn new(latitude: Angle, longitude: Angle, altitude: f64) -> FrameResult<Self> {
        if !latitude.is_finite() || !longitude.is_finite() || !altitude.is_finite() {
            return Err(FrameError::domain(
                "GeodeticPoint::new",
                "coordinates must be finite",
            ));
        }
        if latitude.degrees().abs() > 90.0 {
            return Err(FrameError::domain(
                "GeodeticPoint::new",
                &format!("latitude {} outside [-90°, 90°]", latitude),
            ));
        }
        Ok(Self {
            latitude,
            longitude,
            altitude,
        })
    }

    /// Creates a point on the ellipsoid surface (altitude 0).
    pub fn new_surface(latitude: Angle, longitude: Angle) -> FrameResult<Self> {
        Self::new(latitude, longitude, 0.0)
    }

    pub fn latitude(&self) -> Angle {
        self.latitude
    }

    pub fn longitude(&self) -> Angle {
        self.longitude
    }

    pub fn altitude(&self) -> f64 {
        self.altitude
    }
}

impl fmt::Display for GeodeticPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Geodetic(lat={:.6}°, lon={:.6}°, alt={:.3}m)",
            self.latitude.degrees(),
            self.longitude.degrees(),
            self.altitude
        )
    }
}

/// Converts a geodetic point to Earth-fixed Cartesian coordinates in meters.
pub fn geodetic_to_ecef(point: &GeodeticPoint, model: &EarthModel) -> FrameResult<Vector3> {
    let e2 = model.eccentricity_squared();
    let (sin_lat, cos_lat) = point.latitude().sin_cos();
    let (sin_lon, cos_lon) = point.longitude().sin_cos();

    let denominator = 1.0 - e2 * sin_lat * sin_lat;
    if denominator <= f64::EPSILON {
        return Err(FrameError::domain(
            "geodetic_to_ecef",
            "prime-vertical denominator degenerate",
        ));
    }
    let n = model.semi_major_axis / libm::sqrt(denominator);

    let r = (n + point.altitude()) * cos_lat;
    Ok(Vector3::new(
        r * cos_lon,
        r * sin_lon,
        (n * (1.0 - e2) + point.altitude()) * sin_lat,
    ))
}

/// Converts Earth-fixed Cartesian coordinates to a geodetic point.
///
/// Bowring's parametric-latitude guess followed by five passes of the
/// standard N/h refinement; longitude comes directly from `atan2(y, x)`.
/// On the polar axis the latitude is ±90° and the altitude is measured
/// against the semi-minor axis.
pub fn ecef_to_geodetic(ecef: &Vector3, model: &EarthModel) -> FrameResult<GeodeticPoint> {
    if !ecef.is_finite() {
        return Err(FrameError::domain(
            "ecef_to_geodetic",
            "position must be finite",
        ));
    }

    let a = model.semi_major_axis;
    let b = model.semi_minor_axis();
    let e2 = model.eccentricity_squared();

    let p = libm::sqrt(ecef.x * ecef.x + ecef.y * ecef.y);
    let longitude = libm::atan2(ecef.y, ecef.x);

    // On (or numerically at) the polar axis the iteration divides by
    // cos(lat); answer directly instead.
    if p < 1e-9 {
        let latitude = if ecef.z >= 0.0 {
            Angle::from_degrees(90.0)
        } else {
            Angle::from_degrees(-90.0)
        };
        return GeodeticPoint::new(latitude, Angle::from_radians(longitude), ecef.z.abs() - b);
    }

    let theta = libm::atan2(ecef.z * a, p * b);
    let (sin_theta, cos_theta) = libm::sincos(theta);
    let ep2 = e2 / (1.0 - e2);
    let mut latitude = libm::atan2(
        ecef.z + ep2 * b * sin_theta.powi(3),
        p - e2 * a * cos_theta.powi(3),
    );
    let mut altitude = 0.0;

    for _ in 0..5 {
        let (sin_lat, cos_lat) = libm::sincos(latitude);
        let n = a / libm::sqrt(1.0 - e2 * sin_lat * sin_lat);
        altitude = p / cos_lat - n;
        latitude = libm::atan2(ecef.z, p * (1.0 - e2 * n / (n + altitude)));
    }

    GeodeticPoint::new(
        Angle::from_radians(latitude),
        Angle::from_radians(longitude),
        altitude,
    )
}

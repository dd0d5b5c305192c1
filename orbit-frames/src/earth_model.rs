use orbit_core::constants::{
    GM_EARTH, OMEGA_EARTH, WGS84_FLATTENING, WGS84_SEMI_MAJOR_AXIS,
};

/// Reference Earth constants used by the frame and element transforms.
///
/// Modeled as an explicit immutable value passed into every conversion that
/// needs it, rather than ambient global state, so alternate ellipsoids or
/// gravitational parameters can be injected (most usefully in tests).
/// [`EarthModel::WGS84`] is the default everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EarthModel {
    /// Ellipsoid semi-major axis (equatorial radius) in meters.
    pub semi_major_axis: f64,
    /// Ellipsoid flattening.
    pub flattening: f64,
    /// Gravitational parameter GM in m³/s².
    pub gm: f64,
    /// Rotation rate in rad/s.
    pub rotation_rate: f64,
}

impl EarthModel {
    /// WGS84 ellipsoid with EGM2008 GM and the IERS rotation rate.
    pub const WGS84: Self = Self {
        semi_major_axis: WGS84_SEMI_MAJOR_AXIS,
        flattening: WGS84_FLATTENING,
        gm: GM_EARTH,
        rotation_rate: OMEGA_EARTH,
    };

    /// First eccentricity squared, e² = f(2 - f).
    pub fn eccentricity_squared(&self) -> f64 {
        self.flattening * (2.0 - self.flattening)
    }

    /// Semi-minor (polar) axis in meters.
    pub fn semi_minor_axis(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.flattening)
    }
}

impl Default for EarthModel {
    fn default() -> Self {
        Self::WGS84
    }
}

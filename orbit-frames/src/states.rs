//! Frame-named state vectors.
//!
//! A state vector is a position/velocity pair in SI units (meters,
//! meters/second). The frame is part of the type: an [`EciState`] cannot be
//! passed where an [`EcefState`] is expected, so frame mixups are caught at
//! compile time instead of producing silently wrong geometry. [`RtnState`]
//! is a *relative* state, expressed in a chief satellite's
//! radial/transverse/normal frame.

use orbit_core::Vector3;
use std::fmt;

/// Position and velocity in the Earth-centered inertial frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EciState {
    pub position: Vector3,
    pub velocity: Vector3,
}

impl EciState {
    pub const fn new(position: Vector3, velocity: Vector3) -> Self {
        Self { position, velocity }
    }

    /// Builds a state from a `[x, y, z, vx, vy, vz]` array.
    pub const fn from_array(a: [f64; 6]) -> Self {
        Self {
            position: Vector3::new(a[0], a[1], a[2]),
            velocity: Vector3::new(a[3], a[4], a[5]),
        }
    }

    /// Returns the state as a `[x, y, z, vx, vy, vz]` array.
    pub const fn to_array(&self) -> [f64; 6] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.velocity.x,
            self.velocity.y,
            self.velocity.z,
        ]
    }
}

impl fmt::Display for EciState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ECI(r={}, v={})", self.position, self.velocity)
    }
}

/// Position and velocity in the Earth-centered Earth-fixed frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EcefState {
    pub position: Vector3,
    pub velocity: Vector3,
}

impl EcefState {
    pub const fn new(position: Vector3, velocity: Vector3) -> Self {
        Self { position, velocity }
    }

    pub const fn from_array(a: [f64; 6]) -> Self {
        Self {
            position: Vector3::new(a[0], a[1], a[2]),
            velocity: Vector3::new(a[3], a[4], a[5]),
        }
    }

    pub const fn to_array(&self) -> [f64; 6] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.velocity.x,
            self.velocity.y,
            self.velocity.z,
        ]
    }
}

impl fmt::Display for EcefState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ECEF(r={}, v={})", self.position, self.velocity)
    }
}

/// Relative position and velocity in a chief's RTN frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RtnState {
    pub position: Vector3,
    pub velocity: Vector3,
}

impl RtnState {
    pub const fn new(position: Vector3, velocity: Vector3) -> Self {
        Self { position, velocity }
    }

    pub const fn from_array(a: [f64; 6]) -> Self {
        Self {
            position: Vector3::new(a[0], a[1], a[2]),
            velocity: Vector3::new(a[3], a[4], a[5]),
        }
    }

    pub const fn to_array(&self) -> [f64; 6] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.velocity.x,
            self.velocity.y,
            self.velocity.z,
        ]
    }
}

impl fmt::Display for RtnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RTN(r={}, v={})", self.position, self.velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_round_trip() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let state = EciState::from_array(a);
        assert_eq!(state.position, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(state.velocity, Vector3::new(4.0, 5.0, 6.0));
        assert_eq!(state.to_array(), a);

        assert_eq!(EcefState::from_array(a).to_array(), a);
        assert_eq!(RtnState::from_array(a).to_array(), a);
    }

    #[test]
    fn test_display_carries_frame_name() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert!(format!("{}", EciState::from_array(a)).starts_with("ECI"));
        assert!(format!("{}", EcefState::from_array(a)).starts_with("ECEF"));
        assert!(format!("{}", RtnState::from_array(a)).starts_with("RTN"));
    }
}

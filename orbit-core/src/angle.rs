//! Angular measurements with explicit units.
//!
//! Every public operation in this workspace that takes an angle takes an
//! [`Angle`], not a bare `f64` plus a unit flag. The unit is resolved once at
//! construction ([`Angle::from_degrees`] or [`Angle::from_radians`]) and the
//! value is stored as radians, so trigonometric calls need no conversion and
//! a degrees-vs-radians mixup cannot survive past the call site.
//!
//! ```
//! use orbit_core::Angle;
//!
//! let a = Angle::from_degrees(45.0);
//! let b = Angle::from_radians(std::f64::consts::FRAC_PI_4);
//! assert!((a.radians() - b.radians()).abs() < 1e-15);
//!
//! let (sin, cos) = a.sin_cos();
//! assert!((sin - cos).abs() < 1e-15);
//! ```

use crate::constants::{DEG_TO_RAD, RAD_TO_DEG, TWOPI};

/// An angular measurement stored internally as radians.
///
/// Small `Copy` value; supports addition, subtraction, negation, and scalar
/// multiplication. `Eq`/`Ord` are not implemented because `f64` can be NaN.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Angle {
    rad: f64,
}

impl Angle {
    /// Zero angle.
    pub const ZERO: Self = Self { rad: 0.0 };

    /// Creates an angle from radians.
    #[inline]
    pub const fn from_radians(rad: f64) -> Self {
        Self { rad }
    }

    /// Creates an angle from degrees.
    #[inline]
    pub fn from_degrees(deg: f64) -> Self {
        Self {
            rad: deg * DEG_TO_RAD,
        }
    }

    /// Returns the angle in radians.
    #[inline]
    pub fn radians(&self) -> f64 {
        self.rad
    }

    /// Returns the angle in degrees.
    #[inline]
    pub fn degrees(&self) -> f64 {
        self.rad * RAD_TO_DEG
    }

    /// Simultaneous sine and cosine.
    #[inline]
    pub fn sin_cos(&self) -> (f64, f64) {
        self.rad.sin_cos()
    }

    #[inline]
    pub fn sin(&self) -> f64 {
        self.rad.sin()
    }

    #[inline]
    pub fn cos(&self) -> f64 {
        self.rad.cos()
    }

    #[inline]
    pub fn tan(&self) -> f64 {
        self.rad.tan()
    }

    /// Returns the equivalent angle normalized to [0, 2π).
    pub fn wrapped(&self) -> Self {
        Self {
            rad: wrap_0_2pi(self.rad),
        }
    }

    /// Returns true if the underlying value is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.rad.is_finite()
    }
}

/// Normalizes a radian value to the range [0, 2π).
pub fn wrap_0_2pi(rad: f64) -> f64 {
    let wrapped = rad % TWOPI;
    if wrapped < 0.0 {
        wrapped + TWOPI
    } else {
        wrapped
    }
}

impl std::ops::Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle::from_radians(self.rad + rhs.rad)
    }
}

impl std::ops::Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle::from_radians(self.rad - rhs.rad)
    }
}

impl std::ops::Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle::from_radians(-self.rad)
    }
}

impl std::ops::Mul<f64> for Angle {
    type Output = Angle;

    fn mul(self, rhs: f64) -> Angle {
        Angle::from_radians(self.rad * rhs)
    }
}

impl std::fmt::Display for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.9}°", self.degrees())
    }
}

//! Core math primitives for the orbit geometry kernel.
//!
//! This crate holds the foundation the time and frame crates build on:
//! physical and conversion constants, the unit-tagged [`Angle`] type, 3D
//! [`Vector3`] algebra, and passive-convention [`RotationMatrix3`]
//! elementary rotations. Everything is a pure value type; there is no shared
//! mutable state anywhere in the workspace.

pub mod angle;
pub mod constants;
pub mod errors;
pub mod math;
pub mod matrix;
pub mod test_helpers;

pub use angle::{wrap_0_2pi, Angle};
pub use errors::{CoreError, CoreResult, MathErrorKind};
pub use matrix::{RotationMatrix3, Vector3};

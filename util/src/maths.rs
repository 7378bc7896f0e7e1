//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::{Rotation3, Vector3};
use num_traits::Float;

/// Clamp a value into the range `[min, max]`.
///
/// A `NaN` value is returned unchanged.
pub fn clamp<T>(value: &T, min: &T, max: &T) -> T
where
    T: Float,
{
    let mut ret = *value;

    if ret > *max {
        ret = *max
    }
    if ret < *min {
        ret = *min
    }

    ret
}

/// Arc cosine with the input clamped to `[-1, 1]` first.
///
/// Dot products of unit vectors can overshoot the domain of `acos` by a few
/// ULP, which would otherwise produce `NaN`.
pub fn safe_acos<T>(value: T) -> T
where
    T: Float,
{
    clamp(&value, &-T::one(), &T::one()).acos()
}

/// Build the rotation `Rx(roll) * Ry(pitch) * Rz(yaw)`.
///
/// Note this is not the same order as `Rotation3::from_euler_angles`, which
/// builds `Rz(yaw) * Ry(pitch) * Rx(roll)`.
///
/// Units: radians
pub fn rot_xyz(roll_rad: f64, pitch_rad: f64, yaw_rad: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::x_axis(), roll_rad)
        * Rotation3::from_axis_angle(&Vector3::y_axis(), pitch_rad)
        * Rotation3::from_axis_angle(&Vector3::z_axis(), yaw_rad)
}

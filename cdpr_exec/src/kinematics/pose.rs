//! End-effector pose

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::{Rotation3, Vector3};
use serde::{Deserialize, Serialize};

use crate::limits::NUM_TRANS_AXES;
use crate::model::NUM_POSE_DOF;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The pose (position and attitude in the fixed frame) of the end-effector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// The position of the end-effector origin.
    ///
    /// Units: meters,
    /// Frame: Fixed frame
    pub position_m: Vector3<f64>,

    /// Rotation about the X axis.
    ///
    /// Units: radians
    pub roll_rad: f64,

    /// Rotation about the Y axis.
    ///
    /// Units: radians
    pub pitch_rad: f64,

    /// Rotation about the Z axis.
    ///
    /// Units: radians
    pub yaw_rad: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pose {
    /// Build a pose from `[x, y, z, roll, pitch, yaw]`.
    pub fn from_array(pose: &[f64; NUM_POSE_DOF]) -> Self {
        Self {
            position_m: Vector3::new(pose[0], pose[1], pose[2]),
            roll_rad: pose[3],
            pitch_rad: pose[4],
            yaw_rad: pose[5],
        }
    }

    /// Return the pose as `[x, y, z, roll, pitch, yaw]`.
    pub fn to_array(&self) -> [f64; NUM_POSE_DOF] {
        [
            self.position_m.x,
            self.position_m.y,
            self.position_m.z,
            self.roll_rad,
            self.pitch_rad,
            self.yaw_rad,
        ]
    }

    /// The translational coordinates, used for limit checking.
    pub fn coords(&self) -> [f64; NUM_TRANS_AXES] {
        [self.position_m.x, self.position_m.y, self.position_m.z]
    }

    /// Rotation from the end-effector frame into the fixed frame,
    /// `Rx(roll) * Ry(pitch) * Rz(yaw)`.
    pub fn rotation(&self) -> Rotation3<f64> {
        util::maths::rot_xyz(self.roll_rad, self.pitch_rad, self.yaw_rad)
    }
}

//! Parameters structure for the robot model

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::NUM_POSE_DOF;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters describing the robot, as read from the parameter file.
///
/// These are unchecked, use `RobotModel::from_params` to validate them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// Human readable name of the model
    pub model_name: String,

    /// Number of cables
    pub node_count: usize,

    // ---- PHYSICAL CONSTANTS ----
    /// Absolute torque limit of the winch motors.
    ///
    /// Units: newton meters
    pub abs_torque_limit_nm: f64,

    /// Offset of the end-effector tool point.
    ///
    /// Units: meters
    pub end_effector_offset_m: f64,

    /// Target holding torque of the winch motors.
    ///
    /// Units: newton meters
    pub target_torque_nm: f64,

    /// Scale from cable length to motor command units.
    ///
    /// Units: counts/meter
    pub cmd_scale: i32,

    /// Radius of the idler pulleys.
    ///
    /// Units: meters
    pub pulley_radius_m: f64,

    // ---- POSES ----
    /// Home pose, `[x, y, z, roll, pitch, yaw]`.
    ///
    /// Units: meters, radians
    pub home: [f64; NUM_POSE_DOF],

    /// Translational workspace limits, `[x_min, x_max, y_min, y_max, z_min, z_max]`.
    ///
    /// Units: meters
    pub limit: [f64; NUM_POSE_DOF],

    // ---- PER CABLE ----
    /// Z component of each pulley's swivel axis, the axis is `(0, 0, z)`.
    /// Ignored if `pulley_axes` is given.
    pub pulley_z_dirs: Option<Vec<f64>>,

    /// Full swivel axis of each pulley. Normalised on load.
    pub pulley_axes: Option<Vec<[f64; 3]>>,

    /// Point at which each cable exits the frame onto its pulley.
    ///
    /// Units: meters,
    /// Frame: Fixed frame
    pub frame_attachments_m: Vec<[f64; 3]>,

    /// Point at which each cable attaches to the end-effector.
    ///
    /// Units: meters,
    /// Frame: End-effector
    pub end_effector_attachments_m: Vec<[f64; 3]>,

    /// True for cables whose winch is mounted on a movable rail.
    pub rail_mounted: Vec<bool>,

    /// Allowed `[min, max]` length of each cable. Unbounded if not given.
    ///
    /// Units: meters
    pub stroke_ranges_m: Option<Vec<[f64; 2]>>,

    /// Calibrated zero-length offset of each motor. Zero if not given.
    ///
    /// Units: meters
    pub motor_offsets_m: Option<Vec<f64>>,
}

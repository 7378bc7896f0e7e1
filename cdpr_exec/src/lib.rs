//! # CDPR library.
//!
//! Inverse kinematics for a cable-driven parallel robot whose cables wrap a
//! swivelling idler pulley before reaching the end-effector. This library
//! allows other crates in the workspace to access items defined inside the
//! CDPR crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Robot model - the static geometric and physical description of the robot
pub mod model;

/// Kinematics - converts an end-effector pose into wrap-corrected cable lengths
pub mod kinematics;

/// Workspace limit checking of translational pose coordinates
pub mod limits;

/// Command scaler - converts cable lengths into integer actuator commands
pub mod cmd_scaler;

/// Robot state - owns the current pose and lengths and composes the other modules
pub mod robot_state;

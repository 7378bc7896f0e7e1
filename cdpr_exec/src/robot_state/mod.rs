//! Robot state module
//!
//! Owns the current input pose and output cable lengths, and composes the
//! model, kinematics, limit checking and command scaling into a single
//! cyclic module.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use state::*;

use crate::kinematics::KinematicsError;
use crate::model::ModelError;
use util::archive::ArchiveError;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during RobotState operation.
#[derive(Debug, thiserror::Error)]
pub enum RobotStateError {
    #[error("No valid robot model has been loaded")]
    NoValidModel,

    #[error("No cycle has been processed yet")]
    NotProcessed,

    #[error("Robot model error: {0}")]
    Model(#[from] ModelError),

    #[error("Kinematics error: {0}")]
    Kinematics(#[from] KinematicsError),

    #[error("Could not set up the archives: {0}")]
    Archive(#[from] ArchiveError),
}

//! Kinematics module
//!
//! Converts an end-effector pose into the length of every cable, accounting
//! for the arc of cable wrapped around each cable's idler pulley.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod calc_lengths;
mod lengths;
mod pose;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use calc_lengths::*;
pub use lengths::*;
pub use pose::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A per-cable geometric degeneracy, for which no length can be computed.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeometricDegeneracy {
    #[error("Cable {cable}: the end-effector outlet lies inside the pulley circle (ratio {ratio})")]
    OutletInsidePulley { cable: usize, ratio: f64 },

    #[error("Cable {cable}: the end-effector outlet lies on the pulley axis, the pulley plane is undefined")]
    PlaneUndefined { cable: usize },

    #[error("Cable {cable}: the computed length is not finite")]
    NonFinite { cable: usize },
}

/// Possible errors when reading lengths out of a `CableLengthSet`.
#[derive(Debug, thiserror::Error)]
pub enum KinematicsError {
    #[error("Geometrically degenerate cables: {0:?}")]
    Degenerate(Vec<GeometricDegeneracy>),
}

impl GeometricDegeneracy {
    /// Index of the degenerate cable.
    pub fn cable(&self) -> usize {
        match *self {
            GeometricDegeneracy::OutletInsidePulley { cable, .. } => cable,
            GeometricDegeneracy::PlaneUndefined { cable } => cable,
            GeometricDegeneracy::NonFinite { cable } => cable,
        }
    }
}

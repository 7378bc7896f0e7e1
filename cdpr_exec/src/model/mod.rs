//! Robot model module

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod robot_model;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::*;
pub use robot_model::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The maximum number of cables supported by the model.
pub const MAX_NODES: usize = 16;

/// The number of degrees of freedom in a pose (3 translation + 3 rotation).
pub const NUM_POSE_DOF: usize = 6;

/// Minimum norm a vector must have to be given a direction.
pub const MIN_VECTOR_NORM: f64 = 1e-12;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors found while building a robot model from its parameters.
///
/// A model which fails to build is invalid and must not be used for any
/// computation until it has been reloaded.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Could not load the model parameters: {0}")]
    Load(#[from] util::params::LoadError),

    #[error("The model must have at least one cable")]
    NoNodes,

    #[error("The model has {found} cables, the maximum supported is {max}")]
    TooManyNodes { found: usize, max: usize },

    #[error("Expected {expected} entries in `{field}`, found {found}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Missing required field `{0}`")]
    MissingField(&'static str),

    #[error("The pulley radius must be positive and finite, found {0}")]
    InvalidPulleyRadius(f64),

    #[error("The command scale must be non-zero")]
    ZeroCmdScale,

    #[error("The pulley axis of cable {0} has zero length")]
    ZeroPulleyAxis(usize),

    #[error("Non-finite value in `{field}` at index {index}")]
    NonFinite { field: &'static str, index: usize },

    #[error("The limit on axis {axis} has min ({min}) greater than max ({max})")]
    InvertedLimit { axis: usize, min: f64, max: f64 },

    #[error("The stroke range of cable {cable} has min ({min}) greater than max ({max})")]
    InvertedStroke { cable: usize, min: f64, max: f64 },
}

// ---------------------------------------------------------------------------
// TEST HELPERS
// ---------------------------------------------------------------------------

/// The reference model shipped in `params/cdpr_model.toml`.
#[cfg(test)]
pub(crate) fn reference_model() -> RobotModel {
    let params: Params =
        util::params::from_toml_str(include_str!("../../../params/cdpr_model.toml")).unwrap();

    RobotModel::from_params(params).unwrap()
}

//! The validated robot model

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use nalgebra::{Unit, Vector3};
use std::path::Path;

// Internal
use super::{ModelError, Params, MAX_NODES, MIN_VECTOR_NORM};
use crate::kinematics::Pose;
use crate::limits::{WorkspaceLimits, NUM_TRANS_AXES};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Geometry and calibration of a single cable.
#[derive(Debug, Clone)]
pub struct Cable {
    /// Point at which the cable leaves the frame onto its pulley.
    ///
    /// Units: meters,
    /// Frame: Fixed frame
    pub frame_attachment_m: Vector3<f64>,

    /// Point at which the cable attaches to the end-effector.
    ///
    /// Units: meters,
    /// Frame: End-effector
    pub end_effector_attachment_m: Vector3<f64>,

    /// The fixed axis about which the idler pulley swivels. Points along the
    /// direction the cable travels as it arrives at the frame attachment.
    pub pulley_axis: Unit<Vector3<f64>>,

    /// If true the rail offset is subtracted from this cable's length.
    pub rail_mounted: bool,

    /// Allowed `(min, max)` cable length.
    ///
    /// Units: meters
    pub stroke_range_m: (f64, f64),

    /// Calibrated zero-length offset of this cable's motor.
    ///
    /// Units: meters
    pub motor_offset_m: f64,
}

/// The geometric and physical description of the robot.
///
/// A `RobotModel` can only be built from parameters which pass validation,
/// and is read-only afterwards.
#[derive(Debug, Clone)]
pub struct RobotModel {
    name: String,
    abs_torque_limit_nm: f64,
    end_effector_offset_m: f64,
    target_torque_nm: f64,
    cmd_scale: i32,
    pulley_radius_m: f64,
    home: Pose,
    limits: WorkspaceLimits,
    cables: Vec<Cable>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Cable {
    /// Returns true if `length_m` lies within this cable's stroke range.
    pub fn in_stroke(&self, length_m: f64) -> bool {
        self.stroke_range_m.0 <= length_m && length_m <= self.stroke_range_m.1
    }
}

impl RobotModel {
    /// Load and validate a model from a parameter file relative to the
    /// software root's params directory.
    pub fn load<P: AsRef<Path>>(param_file_path: P) -> Result<Self, ModelError> {
        Self::from_params(util::params::load(param_file_path)?)
    }

    /// Load and validate a model from an explicit file path.
    pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        Self::from_params(util::params::load_path(path)?)
    }

    /// Validate the parameters and build the model from them.
    pub fn from_params(params: Params) -> Result<Self, ModelError> {
        let n = params.node_count;

        if n == 0 {
            return Err(ModelError::NoNodes);
        }
        if n > MAX_NODES {
            return Err(ModelError::TooManyNodes {
                found: n,
                max: MAX_NODES,
            });
        }

        if !(params.pulley_radius_m.is_finite() && params.pulley_radius_m > 0.0) {
            return Err(ModelError::InvalidPulleyRadius(params.pulley_radius_m));
        }
        if params.cmd_scale == 0 {
            return Err(ModelError::ZeroCmdScale);
        }

        check_finite("abs_torque_limit_nm", &[params.abs_torque_limit_nm])?;
        check_finite("target_torque_nm", &[params.target_torque_nm])?;
        check_finite("end_effector_offset_m", &[params.end_effector_offset_m])?;
        check_finite("home", &params.home)?;
        check_finite("limit", &params.limit)?;
        for axis in 0..NUM_TRANS_AXES {
            let (min, max) = (params.limit[2 * axis], params.limit[2 * axis + 1]);
            if min > max {
                return Err(ModelError::InvertedLimit { axis, min, max });
            }
        }

        check_len("frame_attachments_m", n, params.frame_attachments_m.len())?;
        check_len(
            "end_effector_attachments_m",
            n,
            params.end_effector_attachments_m.len(),
        )?;
        check_len("rail_mounted", n, params.rail_mounted.len())?;

        // Full axes take precedence over z components
        let axes: Vec<[f64; 3]> = match (params.pulley_axes, params.pulley_z_dirs) {
            (Some(axes), _) => {
                check_len("pulley_axes", n, axes.len())?;
                axes
            }
            (None, Some(z_dirs)) => {
                check_len("pulley_z_dirs", n, z_dirs.len())?;
                z_dirs.iter().map(|&z| [0.0, 0.0, z]).collect()
            }
            (None, None) => return Err(ModelError::MissingField("pulley_z_dirs")),
        };

        let strokes: Vec<(f64, f64)> = match params.stroke_ranges_m {
            Some(s) => {
                check_len("stroke_ranges_m", n, s.len())?;
                s.iter().map(|r| (r[0], r[1])).collect()
            }
            None => vec![(std::f64::NEG_INFINITY, std::f64::INFINITY); n],
        };

        let offsets = match params.motor_offsets_m {
            Some(o) => {
                check_len("motor_offsets_m", n, o.len())?;
                check_finite("motor_offsets_m", &o)?;
                o
            }
            None => vec![0.0; n],
        };

        let mut cables = Vec::with_capacity(n);

        for i in 0..n {
            let axis = vector3("pulley_axes", i, &axes[i])?;
            let pulley_axis =
                Unit::try_new(axis, MIN_VECTOR_NORM).ok_or(ModelError::ZeroPulleyAxis(i))?;

            let (min, max) = strokes[i];
            if min.is_nan() || max.is_nan() {
                return Err(ModelError::NonFinite {
                    field: "stroke_ranges_m",
                    index: i,
                });
            }
            if min > max {
                return Err(ModelError::InvertedStroke { cable: i, min, max });
            }

            cables.push(Cable {
                frame_attachment_m: vector3("frame_attachments_m", i, &params.frame_attachments_m[i])?,
                end_effector_attachment_m: vector3(
                    "end_effector_attachments_m",
                    i,
                    &params.end_effector_attachments_m[i],
                )?,
                pulley_axis,
                rail_mounted: params.rail_mounted[i],
                stroke_range_m: (min, max),
                motor_offset_m: offsets[i],
            });
        }

        debug!(
            "Built model \"{}\" with {} cables, pulley radius {} m",
            params.model_name, n, params.pulley_radius_m
        );

        Ok(Self {
            name: params.model_name,
            abs_torque_limit_nm: params.abs_torque_limit_nm,
            end_effector_offset_m: params.end_effector_offset_m,
            target_torque_nm: params.target_torque_nm,
            cmd_scale: params.cmd_scale,
            pulley_radius_m: params.pulley_radius_m,
            home: Pose::from_array(&params.home),
            limits: WorkspaceLimits::from_flat(&params.limit),
            cables,
        })
    }

    /// Return a copy of this model with new calibrated motor offsets.
    pub fn with_motor_offsets(mut self, offsets_m: &[f64]) -> Result<Self, ModelError> {
        check_len("motor_offsets_m", self.cables.len(), offsets_m.len())?;
        check_finite("motor_offsets_m", offsets_m)?;

        for (cable, &offset_m) in self.cables.iter_mut().zip(offsets_m) {
            cable.motor_offset_m = offset_m;
        }

        Ok(self)
    }

    /// Returns true if the model is geometrically sane.
    ///
    /// Always true for a model built with `from_params`.
    pub fn is_valid(&self) -> bool {
        let n = self.cables.len();

        n > 0
            && n <= MAX_NODES
            && self.pulley_radius_m.is_finite()
            && self.pulley_radius_m > 0.0
            && self.cmd_scale != 0
            && self.abs_torque_limit_nm.is_finite()
            && self.target_torque_nm.is_finite()
            && self.end_effector_offset_m.is_finite()
            && self.cables.iter().all(|c| {
                c.frame_attachment_m.iter().all(|v| v.is_finite())
                    && c.end_effector_attachment_m.iter().all(|v| v.is_finite())
                    && (c.pulley_axis.norm() - 1.0).abs() < 1e-9
            })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of cables.
    pub fn node_count(&self) -> usize {
        self.cables.len()
    }

    /// Units: newton meters
    pub fn abs_torque_limit_nm(&self) -> f64 {
        self.abs_torque_limit_nm
    }

    /// Units: meters
    pub fn end_effector_offset_m(&self) -> f64 {
        self.end_effector_offset_m
    }

    /// Units: newton meters
    pub fn target_torque_nm(&self) -> f64 {
        self.target_torque_nm
    }

    /// Units: counts/meter
    pub fn cmd_scale(&self) -> i32 {
        self.cmd_scale
    }

    /// Units: meters
    pub fn pulley_radius_m(&self) -> f64 {
        self.pulley_radius_m
    }

    pub fn home(&self) -> &Pose {
        &self.home
    }

    pub fn limits(&self) -> &WorkspaceLimits {
        &self.limits
    }

    pub fn cables(&self) -> &[Cable] {
        &self.cables
    }

    pub fn cable(&self, index: usize) -> Option<&Cable> {
        self.cables.get(index)
    }

    /// Calibrated zero-length offsets of all motors.
    ///
    /// Units: meters
    pub fn motor_offsets_m(&self) -> Vec<f64> {
        self.cables.iter().map(|c| c.motor_offset_m).collect()
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn check_len(field: &'static str, expected: usize, found: usize) -> Result<(), ModelError> {
    if expected != found {
        return Err(ModelError::LengthMismatch {
            field,
            expected,
            found,
        });
    }
    Ok(())
}

fn check_finite(field: &'static str, values: &[f64]) -> Result<(), ModelError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(ModelError::NonFinite { field, index }),
        None => Ok(()),
    }
}

fn vector3(field: &'static str, index: usize, v: &[f64; 3]) -> Result<Vector3<f64>, ModelError> {
    if v.iter().all(|x| x.is_finite()) {
        Ok(Vector3::new(v[0], v[1], v[2]))
    } else {
        Err(ModelError::NonFinite { field, index })
    }
}

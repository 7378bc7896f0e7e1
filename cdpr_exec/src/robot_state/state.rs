//! Implementations for the RobotState structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// Internal
use super::RobotStateError;
use crate::{
    cmd_scaler::{self, CommandError},
    kinematics::{compute_lengths, CableLengthSet, Pose},
    limits::{self, NUM_TRANS_AXES},
    model::RobotModel,
};
use util::{
    archive::{ArchiveError, Archived, Archiver},
    module::State,
    session::Session,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Robot state module state
#[derive(Default)]
pub struct RobotState {
    model: Option<RobotModel>,

    pub(crate) report: StatusReport,
    arch_report: Archiver,

    pose: Option<Pose>,
    rail_offset_m: f64,
    arch_input: Archiver,

    lengths: Option<CableLengthSet>,
    arch_lengths: Archiver,
}

/// Input data to RobotState.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InputData {
    /// The target end-effector pose.
    pub pose: Pose,

    /// Offset subtracted from the length of every rail mounted cable.
    ///
    /// Units: meters
    pub rail_offset_m: f64,
}

/// Status report for RobotState processing.
///
/// All flags are advisory, the lengths are computed regardless.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusReport {
    /// True if the pose's translation is inside the workspace limits.
    pub within_limits: bool,

    /// True for each translational axis whose limits are exceeded.
    pub axis_limit_violated: [bool; NUM_TRANS_AXES],

    /// True for each cable which is geometrically degenerate.
    pub degenerate: Vec<bool>,

    /// True for each cable whose length is outside its stroke range.
    pub stroke_violated: Vec<bool>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for RobotState {
    type InitData = PathBuf;
    type InitError = RobotStateError;

    type InputData = InputData;
    type OutputData = CableLengthSet;
    type StatusReport = StatusReport;
    type ProcError = RobotStateError;

    /// Initialise the RobotState module.
    ///
    /// Expected init data is the path to the model parameter file. If the
    /// model fails to load the state is left invalid.
    fn init(&mut self, init_data: Self::InitData, session: &Session) -> Result<(), Self::InitError> {
        // Drop any previous model so a failed load leaves the state invalid
        self.model = None;
        self.pose = None;
        self.lengths = None;

        let model = RobotModel::load(&init_data)?;

        info!(
            "Loaded robot model \"{}\" ({} cables) from {:?}",
            model.name(),
            model.node_count(),
            init_data
        );

        // Initialise the archivers, the model is only kept once they exist
        self.arch_input = Archiver::from_path(session, "robot_state/input.csv")?;
        self.arch_lengths = Archiver::from_path(session, "robot_state/lengths.csv")?;
        self.arch_report = Archiver::from_path(session, "robot_state/status_report.csv")?;

        self.model = Some(model);

        Ok(())
    }

    /// Perform cyclic processing of RobotState.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        let model = match self.model {
            Some(ref m) => m,
            None => return Err(RobotStateError::NoValidModel),
        };

        // Clear the status report
        self.report = StatusReport::default();

        // Check the workspace limits
        let coords = input_data.pose.coords();
        self.report.within_limits = limits::check(&coords, model.limits());
        self.report.axis_limit_violated = model.limits().violated_axes(&coords);

        if !self.report.within_limits {
            warn!(
                "Pose translation {:?} is outside the workspace limits (violated axes: {:?})",
                coords, self.report.axis_limit_violated
            );
        }

        // Calculate the lengths
        let lengths = compute_lengths(&input_data.pose, model, input_data.rail_offset_m);

        for d in lengths.degeneracies() {
            warn!("{}", d);
        }

        self.report.degenerate = lengths.cables.iter().map(|c| c.is_err()).collect();
        self.report.stroke_violated = lengths
            .cables
            .iter()
            .zip(model.cables())
            .map(|(l, c)| match l {
                Ok(l) => !c.in_stroke(l.length_m),
                Err(_) => false,
            })
            .collect();

        for (i, violated) in self.report.stroke_violated.iter().enumerate() {
            if *violated {
                warn!(
                    "Cable {} length {:?} m is outside its stroke range",
                    i,
                    lengths.length_m(i)
                );
            }
        }

        trace!("RobotState output:\n    lengths: {:?}", lengths.lengths_m());

        // Update the state
        self.pose = Some(input_data.pose);
        self.rail_offset_m = input_data.rail_offset_m;
        self.lengths = Some(lengths.clone());

        Ok((lengths, self.report.clone()))
    }

    /// Valid once a model has been loaded.
    fn is_valid(&self) -> bool {
        self.model.as_ref().map_or(false, |m| m.is_valid())
    }
}

impl Archived for RobotState {
    fn write(&mut self) -> Result<(), ArchiveError> {
        if let Some(pose) = self.pose {
            let mut input = pose.to_array().to_vec();
            input.push(self.rail_offset_m);
            self.arch_input.serialise(input)?;
        }

        // Degenerate cables are written as empty fields
        if let Some(ref lengths) = self.lengths {
            self.arch_lengths.serialise(lengths.lengths_m())?;
        }

        self.arch_report.serialise(self.report.to_record())?;

        Ok(())
    }
}

impl RobotState {
    /// Create a new state around an already validated model.
    pub fn new(model: RobotModel) -> Self {
        Self {
            model: Some(model),
            ..Default::default()
        }
    }

    pub fn model(&self) -> Option<&RobotModel> {
        self.model.as_ref()
    }

    /// The most recently processed pose.
    pub fn pose(&self) -> Option<&Pose> {
        self.pose.as_ref()
    }

    /// The most recently computed lengths.
    pub fn lengths(&self) -> Option<&CableLengthSet> {
        self.lengths.as_ref()
    }

    pub fn report(&self) -> &StatusReport {
        &self.report
    }

    /// Check the most recently processed pose against the workspace limits.
    pub fn check_limits(&self) -> Result<bool, RobotStateError> {
        let model = self.model.as_ref().ok_or(RobotStateError::NoValidModel)?;
        let pose = self.pose.as_ref().ok_or(RobotStateError::NotProcessed)?;

        Ok(limits::check(&pose.coords(), model.limits()))
    }

    /// Convert the most recently computed lengths into motor commands.
    ///
    /// Each motor's calibrated offset is applied. Degenerate cables have no
    /// command.
    pub fn motor_commands(&self) -> Result<Vec<Result<i32, CommandError>>, RobotStateError> {
        let model = self.model.as_ref().ok_or(RobotStateError::NoValidModel)?;
        let lengths = self.lengths.as_ref().ok_or(RobotStateError::NotProcessed)?;

        Ok(lengths
            .cables
            .iter()
            .enumerate()
            .map(|(i, l)| match l {
                Ok(l) => cmd_scaler::to_command(Some(i), l.length_m, model),
                Err(d) => Err(CommandError::Degenerate(*d)),
            })
            .collect())
    }

    /// Calibrate the motor offsets so that the home pose commands zero on
    /// every motor.
    pub fn calibrate_at_home(&mut self, rail_offset_m: f64) -> Result<(), RobotStateError> {
        let model = self.model.as_ref().ok_or(RobotStateError::NoValidModel)?;

        let home_lengths_m = compute_lengths(model.home(), model, rail_offset_m).all_lengths_m()?;
        let calibrated = model.clone().with_motor_offsets(&home_lengths_m)?;

        debug!("Home lengths: {:?}", home_lengths_m);
        info!("Motor offsets calibrated at the home pose");

        self.model = Some(calibrated);

        Ok(())
    }
}

impl StatusReport {
    /// Flatten the report into a single archive record.
    fn to_record(&self) -> Vec<bool> {
        let mut record = vec![self.within_limits];
        record.extend_from_slice(&self.axis_limit_violated);
        record.extend_from_slice(&self.degenerate);
        record.extend_from_slice(&self.stroke_violated);
        record
    }
}

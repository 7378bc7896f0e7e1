//! Main CDPR executable entry point.
//!
//! # Architecture
//!
//! The executable runs a fixed sequence of poses through the robot state:
//!
//!     - Initialise the session, logger and robot state
//!     - Optionally calibrate the motor offsets at the home pose
//!     - For each pose in the script (or the home pose if no script given):
//!         - Compute the cable lengths and status report
//!         - Scale the lengths into motor commands
//!         - Archive the cycle

// ---------------------------------------------------------------------------
// USE MODULES FROM LIBRARY
// ---------------------------------------------------------------------------

use cdpr_lib::robot_state::{InputData, RobotState};

mod pose_script;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{debug, info, warn};
use std::path::PathBuf;
use structopt::StructOpt;

// Internal
use util::{
    archive::Archived,
    logger::{logger_init, LevelFilter},
    module::State,
    session::Session,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

#[derive(Debug, StructOpt)]
#[structopt(name = "cdpr_exec", about = "Cable driven parallel robot length calculator")]
struct Opts {
    /// Model parameter file, relative to the params directory unless absolute
    #[structopt(short, long, parse(from_os_str), default_value = "cdpr_model.toml")]
    model: PathBuf,

    /// CSV pose script to execute, if not given the home pose is used
    #[structopt(short, long, parse(from_os_str))]
    script: Option<PathBuf>,

    /// Calibrate the motor offsets so that the home pose commands zero
    #[structopt(long)]
    zero_at_home: bool,

    /// Rail offset used for calibration and for the home pose
    #[structopt(long, default_value = "0.0")]
    rail_offset_m: f64,

    /// Log at trace level
    #[structopt(short, long)]
    verbose: bool,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opts = Opts::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("cdpr_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    let level = if opts.verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Debug
    };
    logger_init(level, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("CDPR Executable\n");
    info!("Session directory: {:?}\n", session.session_root);
    debug!("CLI options: {:?}", opts);

    // ---- INITIALISE MODULES ----

    let mut robot_state = RobotState::default();
    robot_state
        .init(opts.model.clone(), &session)
        .wrap_err("Failed to initialise the robot state")?;

    if opts.zero_at_home {
        robot_state
            .calibrate_at_home(opts.rail_offset_m)
            .wrap_err("Failed to calibrate the motors at the home pose")?;
    }

    info!("Init complete\n");

    // ---- LOAD INPUTS ----

    let inputs = match opts.script {
        Some(ref path) => {
            info!("Loading pose script from {:?}", path);
            pose_script::load(path).wrap_err("Failed to load the pose script")?
        }
        None => {
            let home = match robot_state.model() {
                Some(m) => *m.home(),
                None => return Err(color_eyre::eyre::eyre!("No valid robot model")),
            };

            vec![InputData {
                pose: home,
                rail_offset_m: opts.rail_offset_m,
            }]
        }
    };

    info!("Executing {} pose(s)", inputs.len());

    // ---- MAIN LOOP ----

    for (cycle, input) in inputs.iter().enumerate() {
        let (lengths, report) = robot_state
            .proc(input)
            .wrap_err("Failed to process the robot state")?;

        let commands = robot_state
            .motor_commands()
            .wrap_err("Failed to compute the motor commands")?;

        info!(
            "Cycle {}: pose {:?}, rail offset {} m",
            cycle,
            input.pose.to_array(),
            input.rail_offset_m
        );
        info!("    lengths: {:?}", lengths.lengths_m());
        info!("    commands: {:?}", commands);

        if !report.within_limits {
            warn!("    outside workspace limits: {:?}", report.axis_limit_violated);
        }
        debug!("    report: {:?}", report);

        // Archive
        if let Err(e) = robot_state.write() {
            warn!("Could not archive the robot state: {}", e);
        }
    }

    info!("End of execution");

    Ok(())
}

//! Pose scripts
//!
//! A pose script is a CSV file with one pose per row, executed in order by
//! the executable. The header row must name the columns:
//!
//! ```text
//! x_m,y_m,z_m,roll_rad,pitch_rad,yaw_rad,rail_offset_m
//! ```

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use cdpr_lib::{kinematics::Pose, robot_state::InputData};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single row of a pose script.
#[derive(Debug, Clone, Copy, Deserialize)]
struct PoseRecord {
    x_m: f64,
    y_m: f64,
    z_m: f64,
    roll_rad: f64,
    pitch_rad: f64,
    yaw_rad: f64,
    rail_offset_m: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PoseScriptError {
    #[error("Could not read the pose script: {0}")]
    CsvError(#[from] csv::Error),

    #[error("The pose script contains no poses")]
    Empty,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Load all poses from the script at the given path.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<InputData>, PoseScriptError> {
    parse(csv::Reader::from_path(path)?)
}

fn parse<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<InputData>, PoseScriptError> {
    let mut inputs = Vec::new();

    for record in reader.deserialize() {
        let r: PoseRecord = record?;

        inputs.push(InputData {
            pose: Pose::from_array(&[r.x_m, r.y_m, r.z_m, r.roll_rad, r.pitch_rad, r.yaw_rad]),
            rail_offset_m: r.rail_offset_m,
        });
    }

    if inputs.is_empty() {
        return Err(PoseScriptError::Empty);
    }

    Ok(inputs)
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse_str(s: &str) -> Result<Vec<InputData>, PoseScriptError> {
        parse(csv::Reader::from_reader(s.as_bytes()))
    }

    #[test]
    fn test_parse_script() {
        let inputs = parse_str(
            "x_m,y_m,z_m,roll_rad,pitch_rad,yaw_rad,rail_offset_m\n\
             0.0,0.0,0.0,0.0,0.0,0.0,0.0\n\
             0.1,-0.05,0.2,0.05,-0.1,0.2,0.02\n",
        )
        .unwrap();

        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].pose, Pose::default());
        assert_eq!(
            inputs[1].pose.to_array(),
            [0.1, -0.05, 0.2, 0.05, -0.1, 0.2]
        );
        assert_eq!(inputs[1].rail_offset_m, 0.02);
    }

    #[test]
    fn test_bad_scripts() {
        assert!(matches!(
            parse_str("x_m,y_m,z_m,roll_rad,pitch_rad,yaw_rad,rail_offset_m\n"),
            Err(PoseScriptError::Empty)
        ));
        assert!(matches!(
            parse_str("x_m,y_m\n0.0,0.0\n"),
            Err(PoseScriptError::CsvError(_))
        ));
    }
}

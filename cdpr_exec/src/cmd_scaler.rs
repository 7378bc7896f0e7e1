//! Cable length to actuator command scaling

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use crate::kinematics::GeometricDegeneracy;
use crate::model::RobotModel;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors when converting a length into a motor command.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandError {
    #[error("Motor {index} does not exist, the model has {node_count} motors")]
    UnknownMotor { index: usize, node_count: usize },

    #[error("Scaled command {0} does not fit in the motor command range")]
    OutOfRange(f64),

    #[error("No command for a degenerate cable: {0}")]
    Degenerate(GeometricDegeneracy),
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Convert a cable length into an integer motor command.
///
/// If `motor` is `None` the length is scaled without any offset, otherwise
/// the calibrated zero-length offset of that motor is subtracted first.
/// The result is rounded half away from zero.
///
/// Units: `length_m` in meters, output in motor counts
pub fn to_command(
    motor: Option<usize>,
    length_m: f64,
    model: &RobotModel,
) -> Result<i32, CommandError> {
    let offset_m = match motor {
        None => 0.0,
        Some(index) => match model.cable(index) {
            Some(c) => c.motor_offset_m,
            None => {
                return Err(CommandError::UnknownMotor {
                    index,
                    node_count: model.node_count(),
                })
            }
        },
    };

    // f64::round rounds half away from zero
    let cmd = ((length_m - offset_m) * f64::from(model.cmd_scale())).round();

    if !(cmd >= f64::from(std::i32::MIN) && cmd <= f64::from(std::i32::MAX)) {
        return Err(CommandError::OutOfRange(cmd));
    }

    Ok(cmd as i32)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::reference_model;

    #[test]
    fn test_no_motor_ignores_offsets() {
        let model = reference_model()
            .with_motor_offsets(&[0.25; 8])
            .unwrap();

        assert_eq!(to_command(None, 1.0, &model), Ok(509295));
        assert_eq!(
            to_command(None, 1.188688978587, &model),
            Ok((1.188688978587f64 * 509295.0).round() as i32)
        );
    }

    #[test]
    fn test_motor_offset_subtracted() {
        let model = reference_model()
            .with_motor_offsets(&[0.0, 0.25, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0])
            .unwrap();

        // 0.75 * 509295 = 381971.25
        assert_eq!(to_command(Some(1), 1.0, &model), Ok(381971));
        assert_eq!(to_command(Some(0), 1.0, &model), Ok(509295));
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        let model = reference_model();

        // 0.5 * 509295 = 254647.5 exactly
        assert_eq!(to_command(None, 0.5, &model), Ok(254648));
        assert_eq!(to_command(None, -0.5, &model), Ok(-254648));
    }

    #[test]
    fn test_errors() {
        let model = reference_model();

        assert_eq!(
            to_command(Some(8), 1.0, &model),
            Err(CommandError::UnknownMotor {
                index: 8,
                node_count: 8
            })
        );
        assert!(matches!(
            to_command(None, 1e6, &model),
            Err(CommandError::OutOfRange(_))
        ));
        assert!(matches!(
            to_command(None, std::f64::NAN, &model),
            Err(CommandError::OutOfRange(_))
        ));
    }
}

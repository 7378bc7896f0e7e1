//! Wrap-corrected cable length calculations
//!
//! Each cable leaves the frame at its frame attachment point F, runs around
//! an idler pulley of radius r which is free to swivel about the fixed
//! pulley axis, and leaves the pulley tangentially at the tangent point A to
//! reach the end-effector outlet B. The pulley swivels so that its plane
//! always contains B, and F is the point at which the cable first touches
//! the pulley.
//!
//! The cable length is the arc F -> A around the pulley plus the straight
//! segment A -> B.
//!
//! # Tangent point selection
//!
//! From B there are two tangents to the pulley circle. The pulley axis points
//! along the direction the cable travels as it arrives at F, so the cable
//! wraps the pulley in the sense given by the pulley plane normal
//! `n = axis x (B - F)`. The tangent point used is the one reached by
//! continuing around the pulley in that sense, given by
//!
//! ```text
//! A = C + k^2 (B - C) - k sqrt(1 - k^2) (n_hat x (B - C)),    k = r / |B - C|
//! ```
//!
//! Flipping the sign of the pulley axis therefore selects the other tangent.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use nalgebra::{Rotation3, Vector3};

// Internal
use super::{CableLength, CableLengthSet, GeometricDegeneracy, Pose};
use crate::model::{Cable, RobotModel, MIN_VECTOR_NORM};
use util::maths::safe_acos;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Compute the length of every cable for the given end-effector pose.
///
/// `rail_offset_m` is subtracted from the length of every rail mounted cable.
///
/// This is a pure function of its arguments. A degenerate cable is reported
/// in its slot of the returned set and does not stop the other cables being
/// computed.
pub fn compute_lengths(pose: &Pose, model: &RobotModel, rail_offset_m: f64) -> CableLengthSet {
    let rotation = pose.rotation();

    let cables = model
        .cables()
        .iter()
        .enumerate()
        .map(|(i, cable)| {
            calc_cable_length(
                i,
                cable,
                model.pulley_radius_m(),
                &rotation,
                &pose.position_m,
                rail_offset_m,
            )
        })
        .collect();

    CableLengthSet { cables }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Calculate the length of a single cable.
fn calc_cable_length(
    index: usize,
    cable: &Cable,
    pulley_radius_m: f64,
    rotation: &Rotation3<f64>,
    translation_m: &Vector3<f64>,
    rail_offset_m: f64,
) -> Result<CableLength, GeometricDegeneracy> {
    let axis = cable.pulley_axis.into_inner();

    // End-effector cable outlet in the fixed frame
    let outlet_m = rotation * cable.end_effector_attachment_m + translation_m;
    if !outlet_m.iter().all(|v| v.is_finite()) {
        return Err(GeometricDegeneracy::NonFinite { cable: index });
    }

    // Normal of the plane the pulley lies in, and the direction from the
    // frame attachment to the pulley centre within that plane
    let normal = axis.cross(&(outlet_m - cable.frame_attachment_m));
    let centre_dir = normal.cross(&axis);

    let (normal_unit, centre_unit) = match (
        normal.try_normalize(MIN_VECTOR_NORM),
        centre_dir.try_normalize(MIN_VECTOR_NORM),
    ) {
        (Some(n), Some(c)) => (n, c),
        _ => return Err(GeometricDegeneracy::PlaneUndefined { cable: index }),
    };

    let centre_m = cable.frame_attachment_m + centre_unit * pulley_radius_m;
    let centre_to_outlet_m = outlet_m - centre_m;

    // Tangency ratio, written so that NaN is also rejected
    let ratio = pulley_radius_m / centre_to_outlet_m.norm();
    if !(ratio <= 1.0) {
        return Err(GeometricDegeneracy::OutletInsidePulley {
            cable: index,
            ratio,
        });
    }

    // Tangent point on the pulley where the straight segment starts
    let tangent_m = centre_m + centre_to_outlet_m * ratio.powi(2)
        - normal_unit.cross(&centre_to_outlet_m) * (ratio * (1.0 - ratio.powi(2)).sqrt());

    // Wrap angle between the centre -> frame attachment direction and the
    // centre -> tangent point direction
    let feed_unit = -centre_unit;
    let tangent_unit = (tangent_m - centre_m) / pulley_radius_m;
    let wrap_angle_rad = safe_acos(feed_unit.dot(&tangent_unit));

    let arc_length_m = pulley_radius_m * wrap_angle_rad;
    let straight_length_m = (tangent_m - outlet_m).norm();

    let mut length_m = arc_length_m + straight_length_m;
    if cable.rail_mounted {
        length_m -= rail_offset_m;
    }

    if !(wrap_angle_rad.is_finite() && length_m.is_finite()) {
        return Err(GeometricDegeneracy::NonFinite { cable: index });
    }

    trace!(
        "Cable {}: wrap {:.6} rad, arc {:.6} m, straight {:.6} m, total {:.6} m",
        index,
        wrap_angle_rad,
        arc_length_m,
        straight_length_m,
        length_m
    );

    Ok(CableLength {
        wrap_angle_rad,
        arc_length_m,
        straight_length_m,
        length_m,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{reference_model, Params};

    const TOL: f64 = 1e-9;

    /// Home length of every cable in the reference model.
    const REF_HOME_LENGTH_M: f64 = 1.188688978587;

    /// A model with one cable leaving the frame at the origin.
    fn single_cable_model(z_dir: f64) -> RobotModel {
        let params: Params = util::params::from_toml_str(&format!(
            r#"
            model_name = "single"
            node_count = 1
            abs_torque_limit_nm = 60.0
            end_effector_offset_m = 0.0
            target_torque_nm = -2.5
            cmd_scale = 1000
            pulley_radius_m = 0.045
            home = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
            limit = [-1.0, 1.0, -1.0, 1.0, -1.0, 1.0]
            pulley_z_dirs = [{:?}]
            frame_attachments_m = [[0.0, 0.0, 0.0]]
            end_effector_attachments_m = [[0.0, 0.0, 0.0]]
            rail_mounted = [true]
            "#,
            z_dir
        ))
        .unwrap();

        RobotModel::from_params(params).unwrap()
    }

    fn at(x: f64, y: f64, z: f64) -> Pose {
        Pose::from_array(&[x, y, z, 0.0, 0.0, 0.0])
    }

    #[test]
    fn test_home_lengths() {
        let model = reference_model();
        let set = compute_lengths(model.home(), &model, 0.0);

        assert_eq!(set.len(), 8);

        for (i, cable) in set.cables.iter().enumerate() {
            let cable = cable.unwrap();
            assert!(
                (cable.length_m - REF_HOME_LENGTH_M).abs() < TOL,
                "cable {} home length {}",
                i,
                cable.length_m
            );
            assert!((cable.arc_length_m - 0.096258410739).abs() < TOL);
            assert!(cable.length_m > 0.0);
            assert!(model.cables()[i].in_stroke(cable.length_m));
        }
    }

    #[test]
    fn test_general_pose() {
        let model = reference_model();
        let pose = Pose::from_array(&[0.1, -0.05, 0.2, 0.05, -0.1, 0.2]);
        let expected = [
            1.068424287334,
            1.197788180405,
            1.139532228071,
            1.001243075443,
            1.291983460755,
            1.389738581191,
            1.340490459127,
            1.238037556437,
        ];

        let lengths = compute_lengths(&pose, &model, 0.0).all_lengths_m().unwrap();

        for (l, e) in lengths.iter().zip(expected.iter()) {
            assert!((l - e).abs() < TOL, "{} != {}", l, e);
        }
    }

    #[test]
    fn test_idempotent() {
        let model = reference_model();
        let pose = Pose::from_array(&[0.2, 0.1, -0.1, -0.2, 0.3, 0.1]);

        assert_eq!(
            compute_lengths(&pose, &model, 0.02),
            compute_lengths(&pose, &model, 0.02)
        );
    }

    #[test]
    fn test_arc_never_negative() {
        let model = reference_model();

        for i in 0..50 {
            let t = i as f64 / 50.0;
            let pose = Pose::from_array(&[
                0.4 * (t * 7.0).sin(),
                0.4 * (t * 5.0).cos(),
                0.3 * (t * 3.0).sin(),
                0.3 * (t * 11.0).sin(),
                0.3 * (t * 13.0).cos(),
                0.5 * (t * 2.0).sin(),
            ]);

            for cable in compute_lengths(&pose, &model, 0.0).cables {
                let cable = cable.unwrap();
                assert!(cable.arc_length_m >= 0.0);
                assert!(cable.wrap_angle_rad <= std::f64::consts::PI);
            }
        }
    }

    #[test]
    fn test_mirror_symmetry() {
        // The reference model is mirrored across the x = 0 plane, which swaps
        // the +x and -x cables on each level.
        let model = reference_model();
        let mirror_of = [1, 0, 3, 2, 5, 4, 7, 6];

        let pose = Pose::from_array(&[0.1, -0.05, 0.2, 0.05, -0.1, 0.2]);
        let mirrored = Pose::from_array(&[-0.1, -0.05, 0.2, 0.05, 0.1, -0.2]);

        let lengths = compute_lengths(&pose, &model, 0.0).all_lengths_m().unwrap();
        let mirrored_lengths = compute_lengths(&mirrored, &model, 0.0)
            .all_lengths_m()
            .unwrap();

        for i in 0..8 {
            assert!((lengths[i] - mirrored_lengths[mirror_of[i]]).abs() < 1e-10);
        }
    }

    #[test]
    fn test_rail_offset() {
        let model = reference_model();
        let pose = Pose::from_array(&[0.05, 0.05, 0.05, 0.0, 0.0, 0.1]);

        let base = compute_lengths(&pose, &model, 0.0).all_lengths_m().unwrap();
        let offset = compute_lengths(&pose, &model, 0.1).all_lengths_m().unwrap();

        for i in 0..8 {
            let expected = if model.cables()[i].rail_mounted {
                base[i] - 0.1
            } else {
                base[i]
            };
            assert!((offset[i] - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_tangent_follows_pulley_axis() {
        let up = single_cable_model(1.0);
        let down = single_cable_model(-1.0);
        let pose = at(1.0, 0.0, -1.0);

        let up_cable = compute_lengths(&pose, &up, 0.0).cables[0].unwrap();
        let down_cable = compute_lengths(&pose, &down, 0.0).cables[0].unwrap();

        // Cable arriving upwards wraps over the top of the pulley
        assert!((up_cable.arc_length_m - 0.108529095897).abs() < TOL);
        assert!((up_cable.straight_length_m - 1.382027496109).abs() < TOL);

        // Cable arriving downwards leaves from the other tangent
        assert!((down_cable.arc_length_m - 0.035772015685).abs() < TOL);
        assert!((down_cable.straight_length_m - 1.382027496109).abs() < TOL);
    }

    #[test]
    fn test_outlet_inside_pulley() {
        let model = single_cable_model(1.0);
        let set = compute_lengths(&at(0.045, 0.0, 0.01), &model, 0.0);

        match set.cables[0] {
            Err(GeometricDegeneracy::OutletInsidePulley { cable, ratio }) => {
                assert_eq!(cable, 0);
                assert!(ratio > 1.0);
            }
            other => panic!("Expected OutletInsidePulley, got {:?}", other),
        }
        assert!(set.all_lengths_m().is_err());
    }

    #[test]
    fn test_outlet_on_pulley_axis() {
        let model = single_cable_model(1.0);
        let set = compute_lengths(&at(0.0, 0.0, 1.0), &model, 0.0);

        assert_eq!(
            set.cables[0],
            Err(GeometricDegeneracy::PlaneUndefined { cable: 0 })
        );
    }

    #[test]
    fn test_non_finite_rail_offset() {
        let model = single_cable_model(1.0);
        let set = compute_lengths(&at(1.0, 0.0, -1.0), &model, std::f64::NAN);

        assert_eq!(set.cables[0], Err(GeometricDegeneracy::NonFinite { cable: 0 }));
    }

    #[test]
    fn test_non_finite_pose() {
        let model = reference_model();

        let set = compute_lengths(&at(std::f64::NAN, 0.0, 0.0), &model, 0.0);
        for (i, cable) in set.cables.iter().enumerate() {
            assert_eq!(*cable, Err(GeometricDegeneracy::NonFinite { cable: i }));
        }

        let pose = Pose::from_array(&[0.0, 0.0, 0.0, std::f64::INFINITY, 0.0, 0.0]);
        let set = compute_lengths(&pose, &model, 0.0);
        assert_eq!(set.degeneracies().len(), 8);
        assert!(set
            .degeneracies()
            .iter()
            .all(|d| matches!(d, GeometricDegeneracy::NonFinite { .. })));
    }

    #[test]
    fn test_degenerate_cable_does_not_stop_others() {
        let model = reference_model();

        // Put the +x+y top outlet right on its pulley centre
        let pose = Pose::from_array(&[0.745, 0.745, 0.55, 0.0, 0.0, 0.0]);
        let set = compute_lengths(&pose, &model, 0.0);

        assert!(matches!(
            set.cables[0],
            Err(GeometricDegeneracy::OutletInsidePulley { cable: 0, .. })
        ));
        assert!(set.cables[1..].iter().all(|c| c.is_ok()));
        assert_eq!(set.degeneracies().len(), 1);
    }
}

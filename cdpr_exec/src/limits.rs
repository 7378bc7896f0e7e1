//! Workspace limit checking
//!
//! Only the translational coordinates of a pose are checked. The rotational
//! components are never inspected.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The number of translational axes (x, y, z).
pub const NUM_TRANS_AXES: usize = 3;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Inclusive bounds on a single translational axis.
///
/// Units: meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisLimit {
    pub min: f64,
    pub max: f64,
}

/// Translational workspace bounds for the x, y and z axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorkspaceLimits {
    pub axes: [AxisLimit; NUM_TRANS_AXES],
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl AxisLimit {
    /// Returns true if `min <= value <= max`.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

impl WorkspaceLimits {
    /// Build the limits from the flat configuration ordering
    /// `[min0, max0, min1, max1, min2, max2]`.
    pub fn from_flat(limit: &[f64; 2 * NUM_TRANS_AXES]) -> Self {
        let mut axes = [AxisLimit { min: 0.0, max: 0.0 }; NUM_TRANS_AXES];

        for (i, axis) in axes.iter_mut().enumerate() {
            axis.min = limit[2 * i];
            axis.max = limit[2 * i + 1];
        }

        Self { axes }
    }

    /// Returns a flag per axis which is true if the coordinate lies outside
    /// that axis's bounds.
    pub fn violated_axes(&self, coords: &[f64; NUM_TRANS_AXES]) -> [bool; NUM_TRANS_AXES] {
        let mut violated = [false; NUM_TRANS_AXES];

        for i in 0..NUM_TRANS_AXES {
            violated[i] = !self.axes[i].contains(coords[i]);
        }

        violated
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Check a translational coordinate triple against the workspace limits.
///
/// Returns true if every coordinate lies within its axis's inclusive bounds.
/// A limit violation is advisory, what to do about it (reject, clamp, alarm)
/// is up to the caller.
pub fn check(coords: &[f64; NUM_TRANS_AXES], limits: &WorkspaceLimits) -> bool {
    limits
        .axes
        .iter()
        .zip(coords.iter())
        .all(|(axis, &c)| axis.contains(c))
}

#[cfg(test)]
mod test {
    use super::*;

    const EPS: f64 = 1e-9;

    fn limits() -> WorkspaceLimits {
        WorkspaceLimits::from_flat(&[-0.5, 0.5, -0.25, 0.75, -0.4, 0.4])
    }

    #[test]
    fn test_from_flat_ordering() {
        let l = limits();

        assert_eq!(l.axes[0], AxisLimit { min: -0.5, max: 0.5 });
        assert_eq!(l.axes[1], AxisLimit { min: -0.25, max: 0.75 });
        assert_eq!(l.axes[2], AxisLimit { min: -0.4, max: 0.4 });
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let l = limits();

        assert!(check(&[-0.5, -0.25, -0.4], &l));
        assert!(check(&[0.5, 0.75, 0.4], &l));
        assert!(check(&[0.0, 0.25, 0.0], &l));
    }

    #[test]
    fn test_outside_bounds() {
        let l = limits();

        for axis in 0..NUM_TRANS_AXES {
            let mut below = [0.0, 0.25, 0.0];
            below[axis] = l.axes[axis].min - EPS;
            assert!(!check(&below, &l));

            let mut above = [0.0, 0.25, 0.0];
            above[axis] = l.axes[axis].max + EPS;
            assert!(!check(&above, &l));

            let mut expected = [false; NUM_TRANS_AXES];
            expected[axis] = true;
            assert_eq!(l.violated_axes(&above), expected);
        }
    }

    #[test]
    fn test_nan_is_outside() {
        assert!(!check(&[std::f64::NAN, 0.0, 0.0], &limits()));
    }
}

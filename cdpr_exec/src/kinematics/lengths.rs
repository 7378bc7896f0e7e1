//! Cable length output of the kinematics

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

use super::{GeometricDegeneracy, KinematicsError};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The length of a single cable, split into the part wrapped around the
/// pulley and the straight part running to the end-effector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CableLength {
    /// Angle of the cable's wrap around the pulley.
    ///
    /// Units: radians
    pub wrap_angle_rad: f64,

    /// Length of cable in contact with the pulley. Never negative.
    ///
    /// Units: meters
    pub arc_length_m: f64,

    /// Length from the pulley tangent point to the end-effector outlet.
    ///
    /// Units: meters
    pub straight_length_m: f64,

    /// Total length, with the rail offset removed for rail mounted cables.
    ///
    /// Units: meters
    pub length_m: f64,
}

/// The computed length of every cable, in model cable order.
///
/// Each entry is either a length or the degeneracy which prevented it being
/// computed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CableLengthSet {
    pub cables: Vec<Result<CableLength, GeometricDegeneracy>>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl CableLengthSet {
    /// Number of cables in the set.
    pub fn len(&self) -> usize {
        self.cables.len()
    }

    /// Returns true if the set holds no cables.
    pub fn is_empty(&self) -> bool {
        self.cables.is_empty()
    }

    /// The total length of one cable, or `None` if the index is out of range
    /// or the cable is degenerate.
    pub fn length_m(&self, index: usize) -> Option<f64> {
        match self.cables.get(index) {
            Some(Ok(c)) => Some(c.length_m),
            _ => None,
        }
    }

    /// Total length of every cable, or `None` for degenerate cables.
    pub fn lengths_m(&self) -> Vec<Option<f64>> {
        self.cables
            .iter()
            .map(|c| c.as_ref().ok().map(|c| c.length_m))
            .collect()
    }

    /// Total length of every cable, failing if any cable is degenerate.
    pub fn all_lengths_m(&self) -> Result<Vec<f64>, KinematicsError> {
        let degeneracies = self.degeneracies();

        if !degeneracies.is_empty() {
            return Err(KinematicsError::Degenerate(degeneracies));
        }

        Ok(self.lengths_m().into_iter().flatten().collect())
    }

    /// All degeneracies in the set.
    pub fn degeneracies(&self) -> Vec<GeometricDegeneracy> {
        self.cables
            .iter()
            .filter_map(|c| c.as_ref().err().copied())
            .collect()
    }

    /// True if no cable is degenerate.
    pub fn is_complete(&self) -> bool {
        self.cables.iter().all(|c| c.is_ok())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn length(length_m: f64) -> CableLength {
        CableLength {
            wrap_angle_rad: 1.0,
            arc_length_m: 0.045,
            straight_length_m: length_m - 0.045,
            length_m,
        }
    }

    #[test]
    fn test_partial_set() {
        let set = CableLengthSet {
            cables: vec![
                Ok(length(1.0)),
                Err(GeometricDegeneracy::PlaneUndefined { cable: 1 }),
                Ok(length(2.0)),
            ],
        };

        assert_eq!(set.len(), 3);
        assert!(!set.is_complete());
        assert_eq!(set.lengths_m(), vec![Some(1.0), None, Some(2.0)]);
        assert_eq!(set.length_m(2), Some(2.0));
        assert_eq!(set.length_m(1), None);
        assert_eq!(set.length_m(3), None);

        match set.all_lengths_m() {
            Err(KinematicsError::Degenerate(d)) => {
                assert_eq!(d.len(), 1);
                assert_eq!(d[0].cable(), 1);
            }
            Ok(_) => panic!("Expected a degenerate set"),
        }
    }

    #[test]
    fn test_complete_set() {
        let set = CableLengthSet {
            cables: vec![Ok(length(1.5)), Ok(length(0.5))],
        };

        assert!(set.is_complete());
        assert_eq!(set.all_lengths_m().unwrap(), vec![1.5, 0.5]);
    }
}

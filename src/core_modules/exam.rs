// THEORY:
// The exam is the recognition primitive: it asks "how deep inside class c's
// container does this region sit?". For every binary row of the candidate
// region the score is `1 - distance/radius`: exactly 1 when the row sits on
// the prototype, 0 on the container surface, and negative outside it. The
// region's score is the mean over its rows. Negative totals are
// meaningful: they measure how far outside the container the region lies,
// which is why the classification threshold is 0 and not some epsilon.
//
// The radius is a divisor, so a non-positive radius is rejected up front.
// A class whose radius optimizer came back empty never reaches this function;
// the pipeline skips it instead of letting a sentinel corrupt the division.

use crate::core_modules::binarizer::BinaryMatrix;
use crate::core_modules::error::{ClassifierError, ClassifierResult};
use crate::core_modules::hamming;
use crate::core_modules::reference::ReferenceVector;

/// Scores a binarized region against one class container. Higher is closer;
/// 1.0 means every row sits exactly on the prototype.
pub fn exam(
    reference: &ReferenceVector,
    radius: u32,
    binary: &BinaryMatrix,
) -> ClassifierResult<f64> {
    if radius == 0 {
        return Err(ClassifierError::InvalidRadius { radius });
    }
    if binary.rows.is_empty() {
        return Err(ClassifierError::EmptyRegion);
    }
    if binary.columns() != reference.len() {
        return Err(ClassifierError::DimensionMismatch {
            expected: reference.len(),
            actual: binary.columns(),
        });
    }

    let radius = radius as f64;
    let sum: f64 = binary
        .rows
        .iter()
        .map(|row| 1.0 - hamming::distance(row, reference) as f64 / radius)
        .sum();

    Ok(sum / binary.rows.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_on_the_prototype_score_one() {
        let reference = vec![1, 0, 1, 0];
        let binary = BinaryMatrix {
            rows: vec![vec![1, 0, 1, 0]; 3],
        };
        assert_eq!(exam(&reference, 2, &binary).unwrap(), 1.0);
    }

    #[test]
    fn rows_outside_the_container_score_negative() {
        let reference = vec![1, 1, 1, 1];
        let binary = BinaryMatrix {
            rows: vec![vec![0, 0, 0, 0]],
        };
        // Distance 4 against radius 2: 1 - 4/2 = -1.
        assert_eq!(exam(&reference, 2, &binary).unwrap(), -1.0);
    }

    #[test]
    fn score_averages_over_rows() {
        let reference = vec![1, 1, 1, 1];
        let binary = BinaryMatrix {
            rows: vec![vec![1, 1, 1, 1], vec![1, 1, 0, 0]],
        };
        // Rows score 1.0 and 1 - 2/4 = 0.5.
        assert_eq!(exam(&reference, 4, &binary).unwrap(), 0.75);
    }

    #[test]
    fn zero_radius_is_rejected() {
        let binary = BinaryMatrix {
            rows: vec![vec![1, 0]],
        };
        assert!(matches!(
            exam(&vec![1, 0], 0, &binary),
            Err(ClassifierError::InvalidRadius { radius: 0 })
        ));
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let binary = BinaryMatrix {
            rows: vec![vec![1, 0, 1]],
        };
        assert!(matches!(
            exam(&vec![1, 0], 1, &binary),
            Err(ClassifierError::DimensionMismatch { expected: 2, actual: 3 })
        ));
    }
}

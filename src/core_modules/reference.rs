// THEORY:
// A class prototype (reference vector) is the per-column majority vote over
// the class's binary matrix: the centroid of the class in Hamming space.
// Rounding is half-up, so a column that is exactly 50% ones votes 1. The
// container radius learned later is measured from this vector, which makes
// the vote direction part of the model's semantics, not a cosmetic detail.

use crate::core_modules::binarizer::BinaryMatrix;
use crate::core_modules::error::{ClassifierError, ClassifierResult};

/// Majority-vote binary prototype of a class, length `3 * width`.
pub type ReferenceVector = Vec<u8>;

/// Reduces a binary matrix to its per-column majority vote, rounding half-up.
pub fn build_reference(binary: &BinaryMatrix) -> ClassifierResult<ReferenceVector> {
    if binary.rows.is_empty() {
        return Err(ClassifierError::EmptyRegion);
    }

    let columns = binary.columns();
    let mut sums = vec![0usize; columns];
    for row in &binary.rows {
        for (sum, &bit) in sums.iter_mut().zip(row.iter()) {
            *sum += bit as usize;
        }
    }

    let count = binary.rows.len() as f64;
    let reference = sums
        .into_iter()
        .map(|sum| u8::from(sum as f64 / count >= 0.5))
        .collect();

    Ok(reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn majority_wins_per_column() {
        let binary = BinaryMatrix {
            rows: vec![vec![1, 0, 1], vec![1, 0, 0], vec![1, 1, 0]],
        };
        assert_eq!(build_reference(&binary).unwrap(), vec![1, 0, 0]);
    }

    #[test]
    fn exact_half_rounds_up() {
        let binary = BinaryMatrix {
            rows: vec![vec![1, 0], vec![0, 1]],
        };
        // Both columns are exactly 50% ones; half-up rounding votes 1.
        assert_eq!(build_reference(&binary).unwrap(), vec![1, 1]);
    }

    #[test]
    fn empty_matrix_is_rejected() {
        let binary = BinaryMatrix { rows: vec![] };
        assert!(matches!(
            build_reference(&binary),
            Err(ClassifierError::EmptyRegion)
        ));
    }
}

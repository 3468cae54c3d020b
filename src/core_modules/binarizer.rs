// THEORY:
// The binarizer collapses raw color values into Hamming space. Every column
// has a band `[limit - delta, limit + delta]` centered on the base class's
// mean value for that column; a feature inside the band (bounds inclusive)
// becomes 1, anything outside becomes 0.
//
// Key architectural principles:
// 1.  **One band, every class**: the band center comes from the base class
//     only. Other classes are binarized against a *foreign* band, which is
//     exactly what makes their binary rows distinguishable from the base
//     class's mostly-ones rows.
// 2.  **Delta is the only knob**: widening delta can only turn 0s into 1s,
//     never the reverse, so the ones count is monotone in delta. The outer
//     optimizer exploits this single scalar as its search dimension.
// 3.  **Fail fast on shape**: a limit vector of the wrong length means the
//     caller mixed artifacts from different trainings. That is a fatal
//     configuration error, not something to truncate around.

use crate::core_modules::error::{ClassifierError, ClassifierResult};
use crate::core_modules::feature_matrix::FeatureMatrix;

/// Binarized counterpart of a `FeatureMatrix`: same shape, entries in {0,1}.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMatrix {
    /// One entry per pixel row, each of length `3 * width`.
    pub rows: Vec<Vec<u8>>,
}

impl BinaryMatrix {
    /// Number of feature columns.
    pub fn columns(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Total count of 1-entries across the matrix.
    pub fn ones(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|&&bit| bit == 1).count())
            .sum()
    }
}

/// Binarizes `matrix` against the band `limit ± delta`, bounds inclusive.
pub fn binarize(
    matrix: &FeatureMatrix,
    limits: &[f64],
    delta: u32,
) -> ClassifierResult<BinaryMatrix> {
    if limits.len() != matrix.columns() {
        return Err(ClassifierError::DimensionMismatch {
            expected: limits.len(),
            actual: matrix.columns(),
        });
    }

    let delta = delta as f64;
    let rows = matrix
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .zip(limits.iter())
                .map(|(&value, &limit)| {
                    let value = value as f64;
                    u8::from(value >= limit - delta && value <= limit + delta)
                })
                .collect()
        })
        .collect();

    Ok(BinaryMatrix { rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn matrix(rows: Vec<Vec<u8>>, width: usize) -> FeatureMatrix {
        FeatureMatrix { width, rows }
    }

    #[test]
    fn band_bounds_are_inclusive() {
        let m = matrix(vec![vec![98, 100, 102, 97, 103, 100]], 2);
        let limits = vec![100.0; 6];
        let binary = binarize(&m, &limits, 2).unwrap();
        // 98 and 102 sit exactly on the band edge and must be accepted.
        assert_eq!(binary.rows[0], vec![1, 1, 1, 0, 0, 1]);
    }

    #[test]
    fn mismatched_limit_vector_is_fatal() {
        let m = matrix(vec![vec![0, 0, 0]], 1);
        let err = binarize(&m, &[0.0; 4], 1).unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::DimensionMismatch { expected: 4, actual: 3 }
        ));
    }

    #[test]
    fn ones_count_is_monotone_in_delta() {
        let mut rng = StdRng::seed_from_u64(7);
        let width = 4;
        let rows: Vec<Vec<u8>> = (0..6)
            .map(|_| (0..3 * width).map(|_| rng.r#gen::<u8>()).collect())
            .collect();
        let m = matrix(rows, width);
        let limits: Vec<f64> = (0..3 * width).map(|_| rng.gen_range(0.0..255.0)).collect();

        let mut previous = 0usize;
        for delta in 1..=120 {
            let ones = binarize(&m, &limits, delta).unwrap().ones();
            assert!(
                ones >= previous,
                "delta {delta} produced {ones} ones, fewer than {previous}"
            );
            previous = ones;
        }
    }
}

// THEORY:
// Hamming distance is the only metric this classifier knows. Containers,
// neighbors, error rates and exam scores are all phrased as "how many
// positions differ from the prototype". The two helpers here are the hot
// path of the whole system: the criterion evaluator calls `row_distances`
// for every (class, delta) combination of the sweep.

use crate::core_modules::binarizer::BinaryMatrix;

/// Number of positions at which two equal-length binary vectors differ.
pub fn distance(a: &[u8], b: &[u8]) -> usize {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).filter(|(x, y)| x != y).count()
}

/// Hamming distance from `vector` to every row of `matrix`.
pub fn row_distances(matrix: &BinaryMatrix, vector: &[u8]) -> Vec<usize> {
    matrix
        .rows
        .iter()
        .map(|row| distance(row, vector))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_bits(rng: &mut StdRng, len: usize) -> Vec<u8> {
        (0..len).map(|_| rng.gen_range(0..=1u8)).collect()
    }

    #[test]
    fn distance_of_equal_vectors_is_zero() {
        assert_eq!(distance(&[1, 0, 1, 1], &[1, 0, 1, 1]), 0);
    }

    #[test]
    fn distance_counts_differing_positions() {
        assert_eq!(distance(&[1, 0, 1, 0], &[0, 0, 1, 1]), 2);
    }

    #[test]
    fn metric_properties_hold_for_random_vectors() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let len = rng.gen_range(1..64);
            let a = random_bits(&mut rng, len);
            let b = random_bits(&mut rng, len);
            let c = random_bits(&mut rng, len);

            let ab = distance(&a, &b);
            let ba = distance(&b, &a);
            let ac = distance(&a, &c);
            let cb = distance(&c, &b);

            assert_eq!(ab, ba, "symmetry");
            assert!(ab <= len, "bounded by dimension");
            assert_eq!(distance(&a, &a), 0, "identity");
            if ab == 0 {
                assert_eq!(a, b, "zero distance implies equality");
            }
            assert!(ab <= ac + cb, "triangle inequality");
        }
    }

    #[test]
    fn row_distances_follow_matrix_order() {
        let matrix = BinaryMatrix {
            rows: vec![vec![1, 1, 1], vec![0, 0, 0], vec![1, 0, 1]],
        };
        assert_eq!(row_distances(&matrix, &[1, 1, 1]), vec![0, 3, 1]);
    }
}

// THEORY:
// During error-rate estimation every class needs an adversary: the class most
// likely to be confused with it. The nearest neighbor by prototype Hamming
// distance stands in for that adversary, so the type-2 error rate (beta) is
// always measured against the hardest competitor rather than an average one.
//
// Tie-break contract: the scan uses a strict `<` comparator, so the
// first-seen class at the minimal distance wins. This is intentionally the
// opposite direction from the radius optimizer's `>=` scan; the two must not
// be unified casually, since ties select different candidates in each.

use crate::core_modules::error::{ClassifierError, ClassifierResult};
use crate::core_modules::hamming;
use crate::core_modules::reference::ReferenceVector;

/// For each class index, the index of its nearest other class.
pub type NeighborMap = Vec<usize>;

/// Pairs every class with the closest other class by prototype distance.
pub fn nearest_neighbor(references: &[ReferenceVector]) -> ClassifierResult<NeighborMap> {
    if references.len() < 2 {
        return Err(ClassifierError::NotEnoughClasses(references.len()));
    }

    let dimension = references[0].len();
    let mut neighbors = Vec::with_capacity(references.len());
    for (i, reference) in references.iter().enumerate() {
        // Sentinel exceeds any possible distance, so the first comparison
        // always replaces it.
        let mut best_distance = dimension + 1;
        let mut best_index = 0;
        for (j, other) in references.iter().enumerate() {
            if i == j {
                continue;
            }
            let d = hamming::distance(reference, other);
            if d < best_distance {
                best_distance = d;
                best_index = j;
            }
        }
        neighbors.push(best_index);
    }

    Ok(neighbors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complementary_classes_pair_with_each_other() {
        let references = vec![vec![1, 1, 1, 1], vec![0, 0, 0, 0]];
        assert_eq!(nearest_neighbor(&references).unwrap(), vec![1, 0]);
        assert_eq!(hamming::distance(&references[0], &references[1]), 4);
    }

    #[test]
    fn closest_class_wins_over_farther_ones() {
        let references = vec![
            vec![1, 1, 1, 1],
            vec![1, 1, 1, 0], // distance 1 from class 0
            vec![0, 0, 0, 0], // distance 4 from class 0
        ];
        assert_eq!(nearest_neighbor(&references).unwrap(), vec![1, 0, 1]);
    }

    #[test]
    fn ties_keep_the_first_seen_class() {
        // Classes 1 and 2 are both at distance 1 from class 0; the ascending
        // scan with strict `<` must keep class 1.
        let references = vec![
            vec![1, 1, 1, 1],
            vec![0, 1, 1, 1],
            vec![1, 0, 1, 1],
        ];
        let neighbors = nearest_neighbor(&references).unwrap();
        assert_eq!(neighbors[0], 1);
    }

    #[test]
    fn single_class_is_rejected() {
        assert!(matches!(
            nearest_neighbor(&[vec![1, 0]]),
            Err(ClassifierError::NotEnoughClasses(1))
        ));
    }
}

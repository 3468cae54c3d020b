// THEORY:
// The criterion evaluator turns a (class, radius) candidate into a single
// separability score. For a container of radius r around a class prototype:
//
// - `d1` is the self-acceptance rate: the fraction of the class's own binary
//   rows within r of the prototype. `alpha = 1 - d1` is the type-1 error.
// - `beta` is the type-2 error: the fraction of the *neighbor* class's rows
//   the container wrongly accepts.
//
// The two error rates feed a smoothed Kullback divergence, normalized by its
// value at (0, 0) so a perfectly separable operating point scores exactly
// 1.0. The 0.1 smoothing constant keeps the logarithm finite at the domain
// corners alpha + beta ∈ {0, 2}; with it, the score is finite for every
// (alpha, beta) in the unit square.
//
// A radius is only *admissible* (in the "working area") when the container
// accepts at least half of its own samples (d1 >= 0.5) while rejecting more
// than half of the neighbor's (beta < 0.5). The optimizers search exclusively
// within this area; scores outside it are recorded but never selected.

use crate::core_modules::binarizer::BinaryMatrix;
use crate::core_modules::hamming;
use crate::core_modules::neighbor::NeighborMap;
use crate::core_modules::reference::ReferenceVector;

/// Largest container radius considered, inclusive. Fixed regardless of delta.
pub const RADIUS_LIMIT: usize = 60;

/// Number of entries in a criterion table (`radius = 0..=RADIUS_LIMIT`).
pub const RADIUS_STEPS: usize = RADIUS_LIMIT + 1;

/// Smoothing constant keeping the Kullback logarithm finite at the corners.
pub const KULLBACK_SMOOTHING: f64 = 0.1;

/// Criterion score of one (class, radius) candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriterionPoint {
    /// Normalized Kullback separability score; 1.0 means perfect separation.
    pub value: f64,
    /// Whether this radius satisfies the admissibility thresholds.
    pub in_working_area: bool,
}

/// Criterion scores of one class over the whole radius domain, indexed by
/// radius.
#[derive(Debug, Clone)]
pub struct CriterionTable {
    pub points: Vec<CriterionPoint>,
}

impl CriterionTable {
    /// Greatest working-area score, if any radius is admissible.
    pub fn best_admissible_value(&self) -> Option<f64> {
        self.points
            .iter()
            .filter(|point| point.in_working_area)
            .map(|point| point.value)
            .fold(None, |best, value| match best {
                Some(b) if b >= value => Some(b),
                _ => Some(value),
            })
    }
}

/// Smoothed Kullback divergence of the combined error mass `alpha + beta`.
pub fn kullback(alpha: f64, beta: f64) -> f64 {
    let s = alpha + beta;
    ((2.0 - s + KULLBACK_SMOOTHING) / (s + KULLBACK_SMOOTHING)).log2() * (1.0 - s)
}

/// Normalized criterion: `kullback(alpha, beta) / kullback(0, 0)`.
pub fn normalized_criterion(alpha: f64, beta: f64) -> f64 {
    kullback(alpha, beta) / kullback(0.0, 0.0)
}

/// Evaluates the criterion table of every class over `radius = 0..=60`.
///
/// `references`, `matrices` and `neighbors` must come from the same delta;
/// mixing artifacts across deltas corrupts the error rates.
pub fn evaluate(
    references: &[ReferenceVector],
    matrices: &[BinaryMatrix],
    neighbors: &NeighborMap,
) -> Vec<CriterionTable> {
    references
        .iter()
        .enumerate()
        .map(|(class, reference)| {
            // Distances are radius-independent; compute them once per class.
            let own = hamming::row_distances(&matrices[class], reference);
            let foreign = hamming::row_distances(&matrices[neighbors[class]], reference);

            let points = (0..RADIUS_STEPS)
                .map(|radius| {
                    let d1 = acceptance_rate(&own, radius);
                    let alpha = 1.0 - d1;
                    let beta = acceptance_rate(&foreign, radius);
                    CriterionPoint {
                        value: normalized_criterion(alpha, beta),
                        in_working_area: d1 >= 0.5 && beta < 0.5,
                    }
                })
                .collect();

            CriterionTable { points }
        })
        .collect()
}

/// Fraction of distances that fall inside a container of the given radius.
fn acceptance_rate(distances: &[usize], radius: usize) -> f64 {
    let accepted = distances.iter().filter(|&&d| d <= radius).count();
    accepted as f64 / distances.len() as f64
}

// THEORY:
// Training is a nested exhaustive search over two scalars:
//
// - The **delta sweep** walks the binarization tolerance over [1, 120]. Each
//   candidate rebuilds the whole inner pipeline (binarize every class
//   against the fixed limit vector, rebuild prototypes, re-pair neighbors,
//   re-evaluate criterion tables) and scores the candidate by the mean of
//   each class's best admissible criterion (or a fixed -10 penalty for a
//   class with no admissible radius). The delta with the strictly greatest
//   mean wins; on exact ties the first-seen (smallest) delta is kept.
// - The **radius pick** then runs once at the winning delta: per class, the
//   admissible radius with the greatest criterion, scanned with a non-strict
//   `>=` comparator so the last-seen tied maximum wins.
//
// The two tie-break directions are opposite on purpose; see the neighbor
// module for the other half of that contract.
//
// Delta candidates share nothing but read-only inputs: every candidate owns
// its binarization/prototype/neighbor state. That makes the sweep trivially
// data-parallel, and it runs on rayon's pool. The reduction back to a single
// winner is sequential over ascending delta, which preserves the first-seen
// tie-break exactly as a serial sweep would.

use log::debug;
use rayon::prelude::*;

use crate::core_modules::binarizer;
use crate::core_modules::criterion::{self, CriterionTable};
use crate::core_modules::error::{ClassifierError, ClassifierResult};
use crate::core_modules::feature_matrix::FeatureMatrix;
use crate::core_modules::neighbor;
use crate::core_modules::reference::{self, ReferenceVector};

/// Smallest binarization tolerance considered.
pub const DELTA_MIN: u32 = 1;

/// Largest binarization tolerance considered.
pub const DELTA_MAX: u32 = 120;

/// Objective contribution of a class with no admissible radius at a delta.
pub const NO_RADIUS_PENALTY: f64 = -10.0;

/// What one delta candidate's inner pipeline run hands downstream: the
/// prototypes and criterion tables the radius pick and the trained model
/// consume. Binary matrices and the neighbor map stay candidate-local.
pub struct DeltaEvaluation {
    pub delta: u32,
    pub references: Vec<ReferenceVector>,
    pub tables: Vec<CriterionTable>,
}

impl DeltaEvaluation {
    /// Mean over classes of the best admissible criterion, with the fixed
    /// penalty standing in for classes that have no admissible radius.
    pub fn objective(&self) -> f64 {
        let sum: f64 = self
            .tables
            .iter()
            .map(|table| table.best_admissible_value().unwrap_or(NO_RADIUS_PENALTY))
            .sum();
        sum / self.tables.len() as f64
    }
}

/// Runs the inner pipeline (binarize, prototype, neighbor, criterion) for a
/// single delta. All produced state belongs to this candidate alone.
pub fn evaluate_delta(
    class_features: &[FeatureMatrix],
    limits: &[f64],
    delta: u32,
) -> ClassifierResult<DeltaEvaluation> {
    let mut matrices = Vec::with_capacity(class_features.len());
    let mut references = Vec::with_capacity(class_features.len());
    for features in class_features {
        let matrix = binarizer::binarize(features, limits, delta)?;
        references.push(reference::build_reference(&matrix)?);
        matrices.push(matrix);
    }

    let neighbors = neighbor::nearest_neighbor(&references)?;
    let tables = criterion::evaluate(&references, &matrices, &neighbors);

    Ok(DeltaEvaluation {
        delta,
        references,
        tables,
    })
}

/// Sweeps the delta domain and returns the candidate with the strictly
/// greatest objective (first-seen wins on exact ties).
///
/// Fails with [`ClassifierError::InseparableClasses`] when no delta produces
/// a positive mean criterion, which would otherwise leave the model with an
/// out-of-domain tolerance.
pub fn optimal_delta(
    class_features: &[FeatureMatrix],
    limits: &[f64],
) -> ClassifierResult<DeltaEvaluation> {
    let candidates: Vec<DeltaEvaluation> = (DELTA_MIN..=DELTA_MAX)
        .into_par_iter()
        .map(|delta| evaluate_delta(class_features, limits, delta))
        .collect::<ClassifierResult<_>>()?;

    let mut best: Option<DeltaEvaluation> = None;
    let mut best_objective = 0.0;
    for candidate in candidates {
        let objective = candidate.objective();
        debug!(
            "delta {:>3}: mean admissible criterion {:.6}",
            candidate.delta, objective
        );
        if objective > best_objective {
            best_objective = objective;
            best = Some(candidate);
        }
    }

    match &best {
        Some(winner) => debug!(
            "optimal delta {} (objective {:.6})",
            winner.delta, best_objective
        ),
        None => debug!("no delta produced a positive objective"),
    }

    best.ok_or(ClassifierError::InseparableClasses)
}

/// Picks the admissible radius with the greatest criterion for one class.
/// Non-strict `>=` comparator: the last-seen tied maximum wins. `None` means
/// the class has no admissible radius at all.
pub fn optimal_radius(table: &CriterionTable) -> Option<u32> {
    let mut best: Option<(u32, f64)> = None;
    for (radius, point) in table.points.iter().enumerate() {
        if !point.in_working_area {
            continue;
        }
        match best {
            Some((_, value)) if point.value < value => {}
            _ => best = Some((radius as u32, point.value)),
        }
    }
    best.map(|(radius, _)| radius)
}

/// Radius pick for every class; `None` entries mark classes that must be
/// surfaced to the caller rather than examined.
pub fn optimal_radii(tables: &[CriterionTable]) -> Vec<Option<u32>> {
    tables.iter().map(optimal_radius).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::criterion::CriterionPoint;

    fn feature(width: usize, rows: Vec<Vec<u8>>) -> FeatureMatrix {
        FeatureMatrix { width, rows }
    }

    fn red_blue_features() -> Vec<FeatureMatrix> {
        // 2x2 pure-red and pure-blue regions in channel-block layout.
        let red = feature(2, vec![vec![255, 255, 0, 0, 0, 0]; 2]);
        let blue = feature(2, vec![vec![0, 0, 0, 0, 255, 255]; 2]);
        vec![red, blue]
    }

    #[test]
    fn separable_classes_pick_the_first_tied_delta() {
        let features = red_blue_features();
        let limits = features[0].limit_vector().unwrap();
        let winner = optimal_delta(&features, &limits).unwrap();
        // Every delta in the domain separates these classes perfectly, so
        // the objective ties at 1.0 everywhere and the strict `>` reduction
        // keeps the first candidate.
        assert_eq!(winner.delta, DELTA_MIN);
        assert!((winner.objective() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn identical_classes_are_inseparable() {
        let rows = vec![vec![10, 20, 30, 40, 50, 60]; 2];
        let features = vec![feature(2, rows.clone()), feature(2, rows)];
        let limits = features[0].limit_vector().unwrap();
        assert!(matches!(
            optimal_delta(&features, &limits),
            Err(ClassifierError::InseparableClasses)
        ));
    }

    #[test]
    fn radius_ties_keep_the_last_seen_maximum() {
        let points = (0..criterion::RADIUS_STEPS)
            .map(|radius| CriterionPoint {
                value: 0.8,
                in_working_area: radius <= 5,
            })
            .collect();
        let table = CriterionTable { points };
        // Radii 0..=5 tie at 0.8; the `>=` scan must keep radius 5.
        assert_eq!(optimal_radius(&table), Some(5));
    }

    #[test]
    fn inadmissible_table_yields_no_radius() {
        let points = vec![
            CriterionPoint {
                value: 1.0,
                in_working_area: false
            };
            criterion::RADIUS_STEPS
        ];
        assert_eq!(optimal_radius(&CriterionTable { points }), None);
    }

    #[test]
    fn radius_pick_prefers_the_greatest_admissible_value() {
        let mut points = vec![
            CriterionPoint {
                value: 0.1,
                in_working_area: true
            };
            criterion::RADIUS_STEPS
        ];
        points[7].value = 0.9;
        // A later, inadmissible entry with a greater value must be ignored.
        points[20] = CriterionPoint {
            value: 2.0,
            in_working_area: false,
        };
        assert_eq!(optimal_radius(&CriterionTable { points }), Some(7));
    }
}

// THEORY:
// The `pipeline` module is the top-level API for the whole classifier. It
// wires the core modules into the two phases a consumer cares about:
//
// 1.  **Training**: the limit vector is computed once from the base class
//     (the first class supplied), the delta sweep selects the binarization
//     tolerance, the inner pipeline is re-run once at that tolerance, and the
//     radius optimizer fixes each class's container. The result is a
//     `TrainedModel` — prototypes, radii and the shared limit vector.
// 2.  **Recognition**: a target image is tiled row-major with the tile side
//     equal to the training sample side, and every tile is examined against
//     every class container. Each tile yields an explicit `TileOutcome`;
//     boundary overruns are an outcome, not an exception, so a caller can
//     distinguish "unclassified" from "never examined".
//
// Classes whose radius optimizer came back empty are carried in the model
// with `radius: None`. They are reported at training time and skipped during
// the exam — a container with no admissible radius can never accept a tile,
// and letting a sentinel radius reach the exam's division would silently
// invert scores.

use image::RgbImage;
use log::warn;

use crate::core_modules::binarizer;
use crate::core_modules::error::{ClassifierError, ClassifierResult};
use crate::core_modules::exam;
use crate::core_modules::feature_matrix::{FeatureMatrix, LimitVector};
use crate::core_modules::optimizer;
use crate::core_modules::reference::ReferenceVector;

/// One trained class: its Hamming-space prototype and container radius.
/// `radius: None` marks a class with no admissible radius; it is excluded
/// from the exam.
#[derive(Debug, Clone)]
pub struct ClassContainer {
    pub reference: ReferenceVector,
    pub radius: Option<u32>,
}

/// The complete result of training: everything recognition needs.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    /// Column means of the base class; shared by every binarization.
    pub limit_vector: LimitVector,
    /// The binarization tolerance selected by the delta sweep.
    pub delta: u32,
    /// Per-class prototype and radius, in training input order.
    pub classes: Vec<ClassContainer>,
}

impl TrainedModel {
    /// Feature dimension (`3 * sample width`) this model was trained on.
    pub fn dimension(&self) -> usize {
        self.limit_vector.len()
    }

    /// Indices of classes that cannot take part in the exam.
    pub fn unexaminable_classes(&self) -> Vec<usize> {
        self.classes
            .iter()
            .enumerate()
            .filter(|(_, class)| class.radius.is_none())
            .map(|(index, _)| index)
            .collect()
    }
}

/// The winning class for one examined region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassDecision {
    pub class: usize,
    pub score: f64,
}

/// Per-tile result of scanning a target image.
#[derive(Debug, Clone, PartialEq)]
pub enum TileOutcome {
    /// The tile scored above the threshold for exactly one best class.
    Classified {
        class: usize,
        origin: (u32, u32),
        score: f64,
    },
    /// Every class scored at or below the threshold.
    Unclassified { origin: (u32, u32) },
    /// The tile would exceed the image bounds and was never examined.
    OutOfBounds { origin: (u32, u32) },
}

impl TileOutcome {
    /// Top-left pixel of the tile this outcome describes.
    pub fn origin(&self) -> (u32, u32) {
        match *self {
            TileOutcome::Classified { origin, .. }
            | TileOutcome::Unclassified { origin }
            | TileOutcome::OutOfBounds { origin } => origin,
        }
    }
}

/// The main, top-level struct for the classifier.
pub struct RecognitionPipeline {
    model: TrainedModel,
}

impl RecognitionPipeline {
    /// Trains a model from one feature matrix per class. The first class is
    /// the base class defining the limit vector.
    pub fn train(class_features: &[FeatureMatrix]) -> ClassifierResult<Self> {
        if class_features.len() < 2 {
            return Err(ClassifierError::NotEnoughClasses(class_features.len()));
        }
        let dimension = class_features[0].columns();
        for features in class_features {
            if features.rows.is_empty() {
                return Err(ClassifierError::EmptyRegion);
            }
            if features.columns() != dimension {
                return Err(ClassifierError::DimensionMismatch {
                    expected: dimension,
                    actual: features.columns(),
                });
            }
        }

        let limits = class_features[0].limit_vector()?;
        let winner = optimizer::optimal_delta(class_features, &limits)?;
        let radii = optimizer::optimal_radii(&winner.tables);

        let classes = winner
            .references
            .into_iter()
            .zip(radii)
            .enumerate()
            .map(|(index, (reference, radius))| {
                // A zero radius passes the working-area test only for exact
                // prototype matches but cannot be used as an exam divisor;
                // it is as unusable as no radius at all.
                let radius = radius.filter(|&r| r > 0);
                if radius.is_none() {
                    warn!("class {index} has no admissible container radius and is excluded from the exam");
                }
                ClassContainer { reference, radius }
            })
            .collect();

        Ok(Self {
            model: TrainedModel {
                limit_vector: limits,
                delta: winner.delta,
                classes,
            },
        })
    }

    /// The trained model backing this pipeline.
    pub fn model(&self) -> &TrainedModel {
        &self.model
    }

    /// Examines one region against every class container. Returns the class
    /// with the strictly greatest score above 0, or `None` when no class
    /// accepts the region. Ties keep the first-encountered class.
    pub fn classify_region(&self, features: &FeatureMatrix) -> ClassifierResult<Option<ClassDecision>> {
        let binary = binarizer::binarize(features, &self.model.limit_vector, self.model.delta)?;

        let mut best: Option<ClassDecision> = None;
        for (index, class) in self.model.classes.iter().enumerate() {
            let Some(radius) = class.radius else {
                continue;
            };
            let score = exam::exam(&class.reference, radius, &binary)?;
            let current_best = best.map_or(0.0, |decision| decision.score);
            if score > current_best {
                best = Some(ClassDecision { class: index, score });
            }
        }

        Ok(best)
    }

    /// Scans `image` row-major with square tiles of side `tile_size` and
    /// classifies each tile. Tiles that would exceed the image bounds are
    /// reported as `OutOfBounds` and skipped.
    pub fn classify_image(
        &self,
        image: &RgbImage,
        tile_size: u32,
    ) -> ClassifierResult<Vec<TileOutcome>> {
        let expected = self.model.dimension();
        if 3 * tile_size as usize != expected {
            return Err(ClassifierError::DimensionMismatch {
                expected,
                actual: 3 * tile_size as usize,
            });
        }

        let mut outcomes = Vec::new();
        let mut y = 0;
        while y < image.height() {
            let mut x = 0;
            while x < image.width() {
                let origin = (x, y);
                if x + tile_size > image.width() || y + tile_size > image.height() {
                    outcomes.push(TileOutcome::OutOfBounds { origin });
                } else {
                    let features = tile_features(image, x, y, tile_size);
                    let outcome = match self.classify_region(&features)? {
                        Some(decision) => TileOutcome::Classified {
                            class: decision.class,
                            origin,
                            score: decision.score,
                        },
                        None => TileOutcome::Unclassified { origin },
                    };
                    outcomes.push(outcome);
                }
                x += tile_size;
            }
            y += tile_size;
        }

        Ok(outcomes)
    }
}

/// Extracts a whole decoded image as one feature matrix (used for the class
/// sample images, which are exactly one region each).
pub fn features_from_image(image: &RgbImage) -> ClassifierResult<FeatureMatrix> {
    FeatureMatrix::from_rgb_region(
        image.as_raw(),
        image.width() as usize,
        image.height() as usize,
    )
}

/// Re-arranges one square tile of `image` into channel-block feature rows.
fn tile_features(image: &RgbImage, x0: u32, y0: u32, size: u32) -> FeatureMatrix {
    let size_u = size as usize;
    let rows = (0..size)
        .map(|dy| {
            let mut row = vec![0u8; 3 * size_u];
            for dx in 0..size {
                let pixel = image.get_pixel(x0 + dx, y0 + dy);
                row[dx as usize] = pixel[0];
                row[size_u + dx as usize] = pixel[1];
                row[2 * size_u + dx as usize] = pixel[2];
            }
            row
        })
        .collect();

    FeatureMatrix {
        width: size_u,
        rows,
    }
}

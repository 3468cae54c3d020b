// THEORY:
// Every failure the classifier can produce is enumerated here. The split is
// deliberate and mirrors the two ways this system can go wrong:
//
// 1.  **Configuration errors** (`DimensionMismatch`, `EmptyRegion`,
//     `NotEnoughClasses`): the inputs can never produce a meaningful model.
//     These are fatal and must be reported to the caller immediately; the
//     worst outcome would be silently truncating a feature vector and
//     training on garbage.
// 2.  **Algorithmic degeneracy** (`InseparableClasses`, `NoAdmissibleRadius`,
//     `InvalidRadius`): the inputs are well-formed but the optimization found
//     no usable operating point. These conditions are first-class values, not
//     sentinels; a negative radius must never reach the exam division.
//
// Per-tile boundary overruns during classification are NOT errors. They are
// an expected outcome of tiling an image whose side is not a multiple of the
// tile size, and are modeled as `TileOutcome::OutOfBounds` in the pipeline.

use thiserror::Error;

/// Errors produced while training or applying the classifier.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// Feature/column counts disagree between a limit vector, a feature
    /// matrix, or a tile and the trained class dimension.
    #[error("dimension mismatch: expected {expected} feature columns, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A region with zero rows or zero columns was supplied.
    #[error("empty region: a sample must contain at least one pixel row")]
    EmptyRegion,

    /// Neighbor pairing needs at least two classes to be defined.
    #[error("at least two classes are required, got {0}")]
    NotEnoughClasses(usize),

    /// The exam score divides by the container radius; zero is rejected
    /// rather than producing an infinite score.
    #[error("invalid exam radius: {radius} (must be positive)")]
    InvalidRadius { radius: u32 },

    /// A class whose criterion table has no working-area entry cannot take
    /// part in the exam. Surfaced when the caller asks to treat this as
    /// fatal; the pipeline's default policy records the class instead.
    #[error("class {class} has no admissible container radius")]
    NoAdmissibleRadius { class: usize },

    /// No delta in the search domain produced a positive mean criterion
    /// across classes; the training set cannot be separated.
    #[error("no delta in the search domain yields a positive mean criterion; classes are inseparable")]
    InseparableClasses,

    /// Raster decode/encode failure from the image codec.
    #[error(transparent)]
    Image(#[from] image::error::ImageError),
}

/// Result alias used throughout the crate.
pub type ClassifierResult<T> = Result<T, ClassifierError>;

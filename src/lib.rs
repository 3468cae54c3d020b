// THEORY:
// This file is the main entry point for the `ieit_vision` library crate.
// It follows the standard Rust convention of using `lib.rs` to define the
// public API that will be exposed to external consumers.
//
// The primary goal is to export the `RecognitionPipeline` and its associated
// data structures (`TrainedModel`, `TileOutcome`, `ClassifierError`) as the
// clean, high-level interface for the whole classifier. The algorithmic
// internals (`core_modules`) remain reachable for callers that want to drive
// the binarization, criterion or exam primitives directly, but the pipeline
// is the intended surface.

pub mod core_modules;
pub mod pipeline;
pub mod renderer;

// Re-export key data structures for the public API.
pub use crate::core_modules::error::{ClassifierError, ClassifierResult};
pub use crate::core_modules::feature_matrix::{FeatureMatrix, LimitVector};
pub use crate::pipeline::{
    features_from_image, ClassContainer, ClassDecision, RecognitionPipeline, TileOutcome,
    TrainedModel,
};

// THEORY:
// The core modules implement the information-extreme learning machinery,
// leaf-first: raw features, binarization, prototypes, the Hamming metric,
// neighbor pairing, criterion evaluation, the two parameter optimizers and
// the exam primitive. Everything here is pure computation over owned data —
// no I/O, no clocks, no global state. Raster decoding and result rendering
// live above this layer.

pub mod binarizer;
pub mod criterion;
pub mod error;
pub mod exam;
pub mod feature_matrix;
pub mod hamming;
pub mod neighbor;
pub mod optimizer;
pub mod reference;

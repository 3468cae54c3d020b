// THEORY:
// The `FeatureMatrix` is the most fundamental data unit of the classifier. It
// is a "dumb" data container: the raw color values of one square region,
// arranged so that every later stage can treat a pixel row as a single
// observation vector.
//
// Key architectural principles:
// 1.  **Channel-block layout**: a region of width W produces rows of 3W
//     values — the red values of the whole row first, then green, then blue.
//     The layout is part of the trained model's contract: a prototype learned
//     in this layout can only ever be compared against tiles extracted in the
//     same layout.
// 2.  **Rows as observations**: each pixel row of the region is one
//     realization of the class. Error rates later on are fractions of rows,
//     so the row count is the classifier's effective sample size.
// 3.  **The limit vector lives here**: the column-wise mean of the *base*
//     class (the first class in input order) defines the binarization band
//     for every class and every delta. It is computed once per run and never
//     depends on delta.

use crate::core_modules::error::{ClassifierError, ClassifierResult};

/// Column-wise mean of the base class; defines the binarization band center.
pub type LimitVector = Vec<f64>;

/// Raw color values of one square region, one pixel row per matrix row,
/// columns laid out as `[R(0..W-1), G(0..W-1), B(0..W-1)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureMatrix {
    /// Region width in pixels (the column count is `3 * width`).
    pub width: usize,
    /// One entry per pixel row, each of length `3 * width`.
    pub rows: Vec<Vec<u8>>,
}

impl FeatureMatrix {
    /// Builds a feature matrix from a packed RGB8 buffer (row-major,
    /// 3 bytes per pixel), re-arranging interleaved channels into the
    /// channel-block column layout.
    pub fn from_rgb_region(pixels: &[u8], width: usize, height: usize) -> ClassifierResult<Self> {
        if width == 0 || height == 0 {
            return Err(ClassifierError::EmptyRegion);
        }
        if pixels.len() != width * height * 3 {
            return Err(ClassifierError::DimensionMismatch {
                expected: width * height * 3,
                actual: pixels.len(),
            });
        }

        let mut rows = Vec::with_capacity(height);
        for y in 0..height {
            let mut row = vec![0u8; 3 * width];
            for x in 0..width {
                let i = (y * width + x) * 3;
                row[x] = pixels[i];
                row[width + x] = pixels[i + 1];
                row[2 * width + x] = pixels[i + 2];
            }
            rows.push(row);
        }

        Ok(Self { width, rows })
    }

    /// Number of feature columns (`3 * width`).
    pub fn columns(&self) -> usize {
        3 * self.width
    }

    /// Number of pixel rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Exact column-wise arithmetic mean of this matrix. Called once, on the
    /// base class, to obtain the limit vector shared by every binarization.
    pub fn limit_vector(&self) -> ClassifierResult<LimitVector> {
        if self.rows.is_empty() {
            return Err(ClassifierError::EmptyRegion);
        }
        let columns = self.columns();
        let mut limits = vec![0.0f64; columns];
        for row in &self.rows {
            for (limit, &value) in limits.iter_mut().zip(row.iter()) {
                *limit += value as f64;
            }
        }
        let count = self.rows.len() as f64;
        for limit in &mut limits {
            *limit /= count;
        }

        Ok(limits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_blocks_are_rearranged() {
        // 2x1 region: pixel (10,20,30) then (40,50,60).
        let pixels = [10, 20, 30, 40, 50, 60];
        let matrix = FeatureMatrix::from_rgb_region(&pixels, 2, 1).unwrap();
        assert_eq!(matrix.columns(), 6);
        assert_eq!(matrix.rows, vec![vec![10, 40, 20, 50, 30, 60]]);
    }

    #[test]
    fn limit_vector_is_exact_column_mean() {
        let pixels = [
            0, 0, 0, 255, 255, 255, // row 0: black, white
            100, 50, 10, 100, 50, 10, // row 1: two equal pixels
        ];
        let matrix = FeatureMatrix::from_rgb_region(&pixels, 2, 2).unwrap();
        let limits = matrix.limit_vector().unwrap();
        assert_eq!(limits.len(), matrix.columns());
        // Column 0: reds of pixel 0 -> (0 + 100) / 2
        assert_eq!(limits[0], 50.0);
        // Column 1: reds of pixel 1 -> (255 + 100) / 2
        assert_eq!(limits[1], 177.5);
        // Column 5: blues of pixel 1 -> (255 + 10) / 2
        assert_eq!(limits[5], 132.5);
    }

    #[test]
    fn buffer_length_is_validated() {
        let err = FeatureMatrix::from_rgb_region(&[0u8; 5], 2, 1).unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::DimensionMismatch { expected: 6, actual: 5 }
        ));
    }

    #[test]
    fn empty_region_is_rejected() {
        assert!(matches!(
            FeatureMatrix::from_rgb_region(&[], 0, 3),
            Err(ClassifierError::EmptyRegion)
        ));
    }
}

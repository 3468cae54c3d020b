// THEORY:
// The renderer is the presentation collaborator: it takes the pipeline's tile
// outcomes and turns them into something a human can look at. For every
// classified tile it draws a one-pixel rectangle outline in the class's
// display color, inset by one pixel so adjacent tiles stay distinguishable,
// plus the class index at the tile center using a small built-in 3x5 digit
// font. The annotated image is written next to the original under
// `result_<ddMMyy_HHmm>_<originalName>`.
//
// All wall-clock and file-naming concerns live here. The core never sees a
// timestamp; `result_file_name` takes the moment explicitly so the format is
// testable, and only `save_annotated` reads the actual clock.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use image::{Rgb, RgbImage};

use crate::core_modules::error::{ClassifierError, ClassifierResult};
use crate::pipeline::TileOutcome;

/// 3x5 digit glyphs, one bitmask row per scanline, lowest 3 bits used.
const DIGIT_GLYPHS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111], // 0
    [0b010, 0b110, 0b010, 0b010, 0b111], // 1
    [0b111, 0b001, 0b111, 0b100, 0b111], // 2
    [0b111, 0b001, 0b111, 0b001, 0b111], // 3
    [0b101, 0b101, 0b111, 0b001, 0b001], // 4
    [0b111, 0b100, 0b111, 0b001, 0b111], // 5
    [0b111, 0b100, 0b111, 0b101, 0b111], // 6
    [0b111, 0b001, 0b001, 0b001, 0b001], // 7
    [0b111, 0b101, 0b111, 0b101, 0b111], // 8
    [0b111, 0b101, 0b111, 0b001, 0b111], // 9
];

/// Pixel scale applied to the digit glyphs.
const GLYPH_SCALE: u32 = 2;

/// Draws every classified tile onto `image`: a rectangle outline plus the
/// class index at the tile center, both in the class's display color.
/// `colors` must cover every class index the outcomes reference.
pub fn annotate(
    image: &mut RgbImage,
    outcomes: &[TileOutcome],
    tile_size: u32,
    colors: &[Rgb<u8>],
) -> ClassifierResult<()> {
    let classes_referenced = outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            TileOutcome::Classified { class, .. } => Some(class + 1),
            _ => None,
        })
        .max()
        .unwrap_or(0);
    if colors.len() < classes_referenced {
        return Err(ClassifierError::DimensionMismatch {
            expected: classes_referenced,
            actual: colors.len(),
        });
    }

    for outcome in outcomes {
        let TileOutcome::Classified { class, origin, .. } = outcome else {
            continue;
        };
        let (x, y) = *origin;
        let color = colors[*class];
        draw_tile_outline(image, x, y, tile_size, color);
        draw_class_index(image, *class, x, y, tile_size, color);
    }

    Ok(())
}

/// Builds the output name `result_<ddMMyy_HHmm>_<originalName>`.
pub fn result_file_name(original_name: &str, at: NaiveDateTime) -> String {
    format!("result_{}_{}", at.format("%d%m%y_%H%M"), original_name)
}

/// Writes the annotated image next to the original, named after the current
/// local time, and returns the written path.
pub fn save_annotated(image: &RgbImage, original_path: &Path) -> ClassifierResult<PathBuf> {
    let original_name = original_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = result_file_name(&original_name, chrono::Local::now().naive_local());
    let output = match original_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(file_name),
        _ => PathBuf::from(file_name),
    };
    image.save(&output)?;

    Ok(output)
}

/// One-pixel rectangle outline inset by one pixel from the tile edge.
fn draw_tile_outline(image: &mut RgbImage, x0: u32, y0: u32, size: u32, color: Rgb<u8>) {
    let left = x0 + 1;
    let top = y0 + 1;
    let right = x0 + size - 1;
    let bottom = y0 + size - 1;
    for x in left..=right {
        put_pixel_checked(image, x, top, color);
        put_pixel_checked(image, x, bottom, color);
    }
    for y in top..=bottom {
        put_pixel_checked(image, left, y, color);
        put_pixel_checked(image, right, y, color);
    }
}

/// Renders the decimal digits of `class` starting at the tile center,
/// clipped to the tile so wide indices never bleed into a neighboring tile.
fn draw_class_index(image: &mut RgbImage, class: usize, x0: u32, y0: u32, size: u32, color: Rgb<u8>) {
    let digits: Vec<usize> = class
        .to_string()
        .bytes()
        .map(|byte| (byte - b'0') as usize)
        .collect();

    let x_end = x0 + size;
    let y_end = y0 + size;
    let advance = 4 * GLYPH_SCALE; // 3 glyph columns plus 1 of spacing
    for (position, &digit) in digits.iter().enumerate() {
        let glyph_x = x0 + size / 2 + position as u32 * advance;
        draw_glyph(image, digit, glyph_x, y0 + size / 2, x_end, y_end, color);
    }
}

fn draw_glyph(
    image: &mut RgbImage,
    digit: usize,
    x0: u32,
    y0: u32,
    x_end: u32,
    y_end: u32,
    color: Rgb<u8>,
) {
    for (row, mask) in DIGIT_GLYPHS[digit].iter().enumerate() {
        for col in 0..3u32 {
            if mask & (0b100 >> col) == 0 {
                continue;
            }
            for dy in 0..GLYPH_SCALE {
                for dx in 0..GLYPH_SCALE {
                    let px = x0 + col * GLYPH_SCALE + dx;
                    let py = y0 + row as u32 * GLYPH_SCALE + dy;
                    if px < x_end && py < y_end {
                        put_pixel_checked(image, px, py, color);
                    }
                }
            }
        }
    }
}

fn put_pixel_checked(image: &mut RgbImage, x: u32, y: u32, color: Rgb<u8>) {
    if x < image.width() && y < image.height() {
        image.put_pixel(x, y, color);
    }
}

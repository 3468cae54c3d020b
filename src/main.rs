// Command-line runner for the `ieit_vision` library: trains on one sample
// image per class, scans a target image tile by tile and writes an annotated
// copy next to the original.

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context};
use image::Rgb;

use ieit_vision::{features_from_image, renderer, RecognitionPipeline, TileOutcome};

/// Display colors assigned to classes in input order.
const DISPLAY_COLORS: [Rgb<u8>; 8] = [
    Rgb([0, 0, 255]),   // blue
    Rgb([255, 165, 0]), // orange
    Rgb([255, 0, 0]),   // red
    Rgb([0, 0, 0]),     // black
    Rgb([0, 128, 0]),   // green
    Rgb([255, 0, 255]), // magenta
    Rgb([0, 255, 255]), // cyan
    Rgb([255, 255, 0]), // yellow
];

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 4 {
        bail!(
            "usage: ieit_vision <target-image> <tile-size> <class-image> <class-image> [more...]"
        );
    }

    let target_path = PathBuf::from(&args[0]);
    let tile_size: u32 = args[1]
        .parse()
        .with_context(|| format!("tile size must be a positive integer, got {:?}", args[1]))?;
    if tile_size == 0 {
        bail!("tile size must be positive");
    }
    let class_paths: Vec<PathBuf> = args[2..].iter().map(PathBuf::from).collect();
    if class_paths.len() > DISPLAY_COLORS.len() {
        bail!(
            "at most {} classes are supported by the display color table",
            DISPLAY_COLORS.len()
        );
    }

    let mut class_features = Vec::with_capacity(class_paths.len());
    for path in &class_paths {
        let sample = image::open(path)
            .with_context(|| format!("failed to open class sample {}", path.display()))?
            .into_rgb8();
        if sample.width() != sample.height() || sample.width() != tile_size {
            bail!(
                "class sample {} is {}x{}, expected a {tile_size}x{tile_size} square",
                path.display(),
                sample.width(),
                sample.height()
            );
        }
        class_features.push(features_from_image(&sample)?);
    }

    let pipeline = RecognitionPipeline::train(&class_features).context("training failed")?;
    let model = pipeline.model();
    println!("Optimal delta: {}", model.delta);
    for (index, (class, path)) in model.classes.iter().zip(&class_paths).enumerate() {
        match class.radius {
            Some(radius) => println!("Class {index} ({}): radius {radius}", path.display()),
            None => println!(
                "Class {index} ({}): no admissible radius, excluded from exam",
                path.display()
            ),
        }
    }

    let mut target = image::open(&target_path)
        .with_context(|| format!("failed to open target image {}", target_path.display()))?
        .into_rgb8();
    let outcomes = pipeline
        .classify_image(&target, tile_size)
        .context("classification failed")?;

    let classified = outcomes
        .iter()
        .filter(|o| matches!(o, TileOutcome::Classified { .. }))
        .count();
    let unclassified = outcomes
        .iter()
        .filter(|o| matches!(o, TileOutcome::Unclassified { .. }))
        .count();
    let skipped = outcomes.len() - classified - unclassified;
    println!("Tiles: {classified} classified, {unclassified} unclassified, {skipped} out of bounds");

    renderer::annotate(
        &mut target,
        &outcomes,
        tile_size,
        &DISPLAY_COLORS[..class_paths.len()],
    )?;
    let output = renderer::save_annotated(&target, &target_path)?;
    println!("Annotated image written to {}", output.display());

    Ok(())
}

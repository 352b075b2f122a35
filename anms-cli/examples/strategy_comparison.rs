use anms_cli::{CornerPipeline, draw_corners, load_grayscale};
use anms_harris::{BoundaryMode, DetectorBuilder, RankingStrategy};
use image::{GrayImage, Luma};
use std::time::Instant;

/// Checkerboard with a brightness ramp, used when no image path is given
fn synthetic_image(size: u32) -> GrayImage {
    GrayImage::from_fn(size, size, |x, y| {
        let square = ((x / 24) + (y / 24)) % 2 == 0;
        let base = if square { 60 } else { 170 };
        Luma([(base + (x + y) * 60 / (2 * size)) as u8])
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🎯 ANMS Strategy Comparison");
    println!("===========================\n");

    let img = match std::env::args().nth(1) {
        Some(path) => load_grayscale(&path)?,
        None => synthetic_image(256),
    };
    let (w, h) = img.dimensions();
    let (rows, cols) = (h as usize, w as usize);
    println!("📷 Processing image: {}x{}", cols, rows);

    let runs = [
        ("brute_force", DetectorBuilder::new(rows, cols).preset_exact().n_corners(150)),
        (
            "spatial_index",
            DetectorBuilder::new(rows, cols)
                .strategy(RankingStrategy::SpatialIndex)
                .n_corners(150)
                .edge(10),
        ),
        ("dense_mirror", DetectorBuilder::new(rows, cols).preset_dense()),
        (
            "wrap_no_threshold",
            DetectorBuilder::new(rows, cols)
                .conv_mode(BoundaryMode::Wrap)
                .use_threshold(false)
                .edge(4),
        ),
    ];

    for (name, builder) in runs {
        println!("\n⚙️  {}", builder.summary());
        let pipeline = CornerPipeline::from_builder(builder)?;

        let start = Instant::now();
        let detection = pipeline.detect_luma(&img)?;
        let elapsed = start.elapsed();

        let radii: Vec<f64> = detection.corners.iter().map(|c| c.radius).collect();
        println!("   {} corners in {:.2?}", detection.corners.len(), elapsed);
        if let (Some(first), Some(last)) = (radii.first(), radii.last()) {
            println!("   suppression radius {:.1} .. {:.1}", first, last);
        }

        let out = format!("corners_{}.png", name);
        draw_corners(&img, &detection.corners, 3).save(&out)?;
        println!("   saved {}", out);
    }

    Ok(())
}

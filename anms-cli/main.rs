//! anms CLI: Harris corners with adaptive non-maximal suppression.

use anms_cli::{
    BoundaryMode, CornerDump, CornerPipeline, RankingStrategy, draw_corners, init_threads,
    load_grayscale, response_to_luma, write_json,
};
use anms_harris::DetectorConfig;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "anms")]
#[command(about = "Detect well-distributed Harris corners in a grayscale image")]
#[command(version)]
struct Cli {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Detector configuration (JSON, or TOML by .toml extension).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of corners to select.
    #[arg(long)]
    corners: Option<usize>,

    /// Suppression ratio: a neighbor suppresses when score < ratio * neighbor.
    #[arg(long)]
    ratio: Option<f64>,

    /// Border margin trimmed before spatial-index ranking.
    #[arg(long)]
    edge: Option<usize>,

    /// Use every local maximum as candidate instead of mean + std thresholding.
    #[arg(long)]
    no_threshold: bool,

    /// Suppression radius computation.
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Convolution boundary mode.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Padding value for `--mode fill`.
    #[arg(long, default_value = "0.0")]
    fill: f64,

    /// Worker threads (defaults to the number of CPUs).
    #[arg(long)]
    threads: Option<usize>,

    /// Path to write the selected corners (JSON).
    #[arg(long)]
    output_json: Option<PathBuf>,

    /// Path to write the image with corners drawn (PNG).
    #[arg(long)]
    output_png: Option<PathBuf>,

    /// Path to write the normalized Harris response (PNG).
    #[arg(long)]
    response_png: Option<PathBuf>,

    /// Circle radius used for `--output-png`.
    #[arg(long, default_value = "3")]
    circle_radius: i32,

    /// Log filter when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    BruteForce,
    SpatialIndex,
}

impl StrategyArg {
    fn to_core(self) -> RankingStrategy {
        match self {
            Self::BruteForce => RankingStrategy::BruteForce,
            Self::SpatialIndex => RankingStrategy::SpatialIndex,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Valid,
    Fill,
    Extend,
    Mirror,
    Wrap,
}

impl ModeArg {
    fn to_core(self, fill: f64) -> BoundaryMode {
        match self {
            Self::Valid => BoundaryMode::Valid,
            Self::Fill => BoundaryMode::Fill(fill),
            Self::Extend => BoundaryMode::Extend,
            Self::Mirror => BoundaryMode::Mirror,
            Self::Wrap => BoundaryMode::Wrap,
        }
    }
}

fn load_config(path: &Path) -> Result<DetectorConfig> {
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let loaded = if is_toml {
        DetectorConfig::load_toml(path)
    } else {
        DetectorConfig::load_json(path)
    };
    loaded.map_err(|e| anyhow::anyhow!("failed to load config {}: {e}", path.display()))
}

fn apply_overrides(config: &mut DetectorConfig, cli: &Cli) {
    if let Some(n) = cli.corners {
        config.anms.n_corners = n;
    }
    if let Some(c) = cli.ratio {
        config.anms.suppression_ratio = c;
    }
    if let Some(e) = cli.edge {
        config.anms.edge = e;
    }
    if cli.no_threshold {
        config.anms.use_threshold = false;
    }
    if let Some(s) = cli.strategy {
        config.anms.strategy = s.to_core();
    }
    if let Some(m) = cli.mode {
        config.conv_mode = m.to_core(cli.fill);
    }
    if let Some(t) = cli.threads {
        config.anms.n_threads = t.max(1);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    let gray = load_grayscale(&cli.image)
        .with_context(|| format!("failed to read image {}", cli.image.display()))?;
    let (w, h) = gray.dimensions();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => DetectorConfig::new(h as usize, w as usize),
    };
    // The image decides the shape, whatever the file said.
    config.rows = h as usize;
    config.cols = w as usize;
    apply_overrides(&mut config, &cli);

    init_threads(config.anms.n_threads)?;
    let pipeline = CornerPipeline::new(config.clone())?;
    info!("{}", pipeline.config_summary());

    let t0 = Instant::now();
    let detection = pipeline.detect_luma(&gray)?;
    info!(
        "selected {} corners in {:.2?}",
        detection.corners.len(),
        t0.elapsed()
    );

    if let Some(path) = &cli.output_json {
        let dump = CornerDump::new(&cli.image, &config, &detection.corners);
        write_json(path, &dump)?;
        info!("wrote {}", path.display());
    }

    if let Some(path) = &cli.output_png {
        draw_corners(&gray, &detection.corners, cli.circle_radius)
            .save(path)
            .with_context(|| format!("failed to save {}", path.display()))?;
        info!("wrote {}", path.display());
    }

    if let Some(path) = &cli.response_png {
        response_to_luma(&detection.response)
            .save(path)
            .with_context(|| format!("failed to save {}", path.display()))?;
        info!("wrote {}", path.display());
    }

    if cli.output_json.is_none() {
        for corner in &detection.corners {
            println!(
                "{} {} {:.6e} {:.3}",
                corner.point.u, corner.point.v, corner.point.score, corner.radius
            );
        }
    }

    Ok(())
}

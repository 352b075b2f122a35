use anms_harris::{
    ConfiguredDetector, Corners, Detection, DetectorBuilder, DetectorConfig, HarrisError, Image,
};
use image::{GrayImage, ImageReader, Luma, Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_circle_mut;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub use anms_harris::{self, AnmsConfig as Config, BoundaryMode, RankingStrategy};

#[derive(Debug)]
pub enum AnmsError {
    Harris(HarrisError),
    ThreadPool(rayon::ThreadPoolBuildError),
    Image(image::ImageError),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for AnmsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnmsError::Harris(e) => write!(f, "Harris/ANMS error: {}", e),
            AnmsError::ThreadPool(e) => write!(f, "Thread pool error: {}", e),
            AnmsError::Image(e) => write!(f, "Image error: {}", e),
            AnmsError::Io(e) => write!(f, "I/O error: {}", e),
            AnmsError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for AnmsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnmsError::Harris(e) => Some(e),
            AnmsError::ThreadPool(e) => Some(e),
            AnmsError::Image(e) => Some(e),
            AnmsError::Io(e) => Some(e),
            AnmsError::Json(e) => Some(e),
        }
    }
}

impl From<HarrisError> for AnmsError {
    fn from(err: HarrisError) -> Self {
        AnmsError::Harris(err)
    }
}

impl From<rayon::ThreadPoolBuildError> for AnmsError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        AnmsError::ThreadPool(err)
    }
}

impl From<image::ImageError> for AnmsError {
    fn from(err: image::ImageError) -> Self {
        AnmsError::Image(err)
    }
}

impl From<std::io::Error> for AnmsError {
    fn from(err: std::io::Error) -> Self {
        AnmsError::Io(err)
    }
}

impl From<serde_json::Error> for AnmsError {
    fn from(err: serde_json::Error) -> Self {
        AnmsError::Json(err)
    }
}

pub type AnmsResult<T> = Result<T, AnmsError>;

/// Size the global Rayon pool once per process.
pub fn init_threads(n_threads: usize) -> AnmsResult<()> {
    anms_core::init_thread_pool(n_threads)?;
    Ok(())
}

/// High-level corner detector working on 8-bit grayscale images.
pub struct CornerPipeline {
    detector: ConfiguredDetector,
}

impl CornerPipeline {
    /// Validate `config` and build the detector for its image shape
    pub fn new(config: DetectorConfig) -> AnmsResult<Self> {
        Self::from_builder(DetectorBuilder::from_config(config))
    }

    pub fn from_builder(builder: DetectorBuilder) -> AnmsResult<Self> {
        Ok(Self {
            detector: builder.build()?,
        })
    }

    /// Run Harris + ANMS on a float image
    pub fn detect(&self, img: &Image) -> AnmsResult<Detection> {
        Ok(self.detector.detect_with_response(img)?)
    }

    /// Run Harris + ANMS on an 8-bit grayscale image
    pub fn detect_luma(&self, img: &GrayImage) -> AnmsResult<Detection> {
        self.detect(&luma_to_image(img))
    }

    pub fn config_summary(&self) -> String {
        self.detector.config_summary()
    }

    /// Image dimensions as (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        self.detector.dimensions()
    }
}

/// Decode any supported image file to 8-bit grayscale
pub fn load_grayscale<P: AsRef<Path>>(path: P) -> AnmsResult<GrayImage> {
    Ok(ImageReader::open(path)?.decode()?.to_luma8())
}

/// Row-major float copy of `img`: rows are the image height.
pub fn luma_to_image(img: &GrayImage) -> Image {
    let (w, h) = img.dimensions();
    Image::from_fn(h as usize, w as usize, |row, col| {
        img.get_pixel(col as u32, row as u32)[0] as f64
    })
}

/// Min/max normalized 8-bit rendering of a response map. A constant map
/// renders black.
pub fn response_to_luma(map: &Image) -> GrayImage {
    let (lo, hi) = (map.min(), map.max());
    let span = hi - lo;
    GrayImage::from_fn(map.cols() as u32, map.rows() as u32, |x, y| {
        let v = map.get(y as usize, x as usize);
        let level = if span > 0.0 { (v - lo) / span * 255.0 } else { 0.0 };
        Luma([level.round().clamp(0.0, 255.0) as u8])
    })
}

/// Red hollow circles at every selected corner, drawn over `img`
pub fn draw_corners(img: &GrayImage, corners: &Corners, radius: i32) -> RgbaImage {
    let mut output: RgbaImage = image::DynamicImage::ImageLuma8(img.clone()).into_rgba8();
    for corner in corners {
        draw_hollow_circle_mut(
            &mut output,
            (corner.point.u as i32, corner.point.v as i32),
            radius,
            Rgba([255, 0, 0, 255]),
        );
    }
    output
}

#[derive(Debug, Clone, Serialize)]
pub struct CornerOut {
    pub x: usize,
    pub y: usize,
    pub score: f64,
    pub radius: f64,
}

/// JSON dump of one detection run.
#[derive(Debug, Clone, Serialize)]
pub struct CornerDump {
    pub image: String,
    pub width: usize,
    pub height: usize,
    pub conv_mode: String,
    pub strategy: String,
    pub n_corners: usize,
    pub corners: Vec<CornerOut>,
}

impl CornerDump {
    pub fn new(image: &Path, config: &DetectorConfig, corners: &Corners) -> Self {
        Self {
            image: image.to_string_lossy().into_owned(),
            width: config.cols,
            height: config.rows,
            conv_mode: config.conv_mode.to_string(),
            strategy: config.anms.strategy.to_string(),
            n_corners: config.anms.n_corners,
            corners: corners
                .iter()
                .map(|c| CornerOut {
                    x: c.point.u,
                    y: c.point.v,
                    score: c.point.score,
                    radius: c.radius,
                })
                .collect(),
        }
    }
}

pub fn write_json(path: &Path, value: &impl Serialize) -> AnmsResult<()> {
    let mut json_file = File::create(path)?;
    serde_json::to_writer_pretty(&mut json_file, value)?;
    json_file.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anms_harris::{CandidatePoint, RankedPoint};

    fn two_blob_luma() -> GrayImage {
        GrayImage::from_fn(50, 50, |x, y| {
            let in_blob = |cx: u32, cy: u32| x.abs_diff(cx) <= 2 && y.abs_diff(cy) <= 2;
            if in_blob(12, 14) || in_blob(36, 33) { Luma([255]) } else { Luma([0]) }
        })
    }

    #[test]
    fn test_luma_to_image_layout() {
        let img = GrayImage::from_fn(3, 2, |x, y| Luma([(10 * y + x) as u8]));
        let converted = luma_to_image(&img);
        assert_eq!(converted.shape(), (2, 3));
        assert_eq!(converted.get(1, 2), 12.0);
        assert_eq!(converted.get(0, 1), 1.0);
    }

    #[test]
    fn test_response_normalization() {
        let map = Image::from_vec(1, 3, vec![-2.0, 0.0, 2.0]).unwrap();
        let luma = response_to_luma(&map);
        assert_eq!(luma.dimensions(), (3, 1));
        assert_eq!(luma.get_pixel(0, 0)[0], 0);
        assert_eq!(luma.get_pixel(1, 0)[0], 128);
        assert_eq!(luma.get_pixel(2, 0)[0], 255);

        let flat = response_to_luma(&Image::filled(2, 2, 5.0));
        assert!(flat.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn test_draw_corners_marks_circle() {
        let img = GrayImage::new(20, 20);
        let corners = Corners::new(vec![RankedPoint {
            point: CandidatePoint::new(10, 8, 1.0),
            radius: 3.0,
        }]);
        let out = draw_corners(&img, &corners, 3);
        assert_eq!(out.get_pixel(10, 11), &Rgba([255, 0, 0, 255]));
        assert_eq!(out.get_pixel(10, 8), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_pipeline_on_grayscale() {
        let builder = DetectorConfig::exact_preset(50, 50).to_builder().n_corners(2);
        let pipeline = CornerPipeline::from_builder(builder).unwrap();
        assert_eq!(pipeline.dimensions(), (50, 50));

        let detection = pipeline.detect_luma(&two_blob_luma()).unwrap();
        let mut pairs = detection.corners.to_pairs();
        pairs.sort();
        assert_eq!(pairs, vec![(12, 14), (36, 33)]);
    }

    #[test]
    fn test_pipeline_rejects_bad_config() {
        let mut config = DetectorConfig::new(10, 10);
        config.anms.edge = 5;
        let err = CornerPipeline::new(config).err();
        assert!(matches!(err, Some(AnmsError::Harris(HarrisError::EdgeTooLarge { .. }))));
    }

    #[test]
    fn test_corner_dump_json() {
        let config = DetectorConfig::exact_preset(50, 50);
        let corners = Corners::new(vec![RankedPoint {
            point: CandidatePoint::new(12, 14, 3.5),
            radius: 2500.0,
        }]);
        let dump = CornerDump::new(Path::new("blobs.png"), &config, &corners);
        let json = serde_json::to_value(&dump).unwrap();
        assert_eq!(json["strategy"], "brute_force");
        assert_eq!(json["conv_mode"], "valid");
        assert_eq!(json["corners"][0]["x"], 12);
        assert_eq!(json["corners"][0]["y"], 14);
        assert_eq!(json["width"], 50);
    }
}

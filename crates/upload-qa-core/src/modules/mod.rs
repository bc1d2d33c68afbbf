//! Analysis stages.
//!
//! The tiler cuts an image into regions, the darkness and blur scorers judge
//! each region, and the analyzer turns region votes into a verdict.

mod analyzer;
mod blur;
mod darkness;
mod tiler;

pub use analyzer::{analyze, AnalyzerConfig, ImageQualityAnalyzer};
pub use blur::{
    laplacian, laplacian_variance, to_gray, BlurConfig, BlurScorer, LAPLACIAN_VARIANCE_THRESHOLD,
    MINIMUM_BLURRINESS_FACTOR,
};
pub use darkness::{
    luminance, DarknessConfig, DarknessScorer, DARK_PIXEL_LUMINANCE_THRESHOLD,
    MINIMUM_DARKNESS_FACTOR,
};
pub use tiler::{AxisSpans, TileGrid, TILE_DIVISOR};

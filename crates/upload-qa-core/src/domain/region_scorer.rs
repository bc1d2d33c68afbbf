//! Per-region scoring trait shared by the darkness and blur checks.

use image::RgbImage;

/// A yes/no judgement over a single cropped region.
///
/// Scorers are stateless and may be shared across worker threads.
pub trait RegionScorer: Send + Sync {
    /// Returns the name of this scorer.
    fn name(&self) -> &'static str;

    /// Judges one region.
    ///
    /// `None` means the region could not be decoded. Each scorer decides
    /// its own default for that case.
    fn score(&self, region: Option<&RgbImage>) -> bool;
}

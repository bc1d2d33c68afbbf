//! Analysis report types.

use serde::{Deserialize, Serialize};

use super::Verdict;

/// Verdict plus the region tallies it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityReport {
    /// Whole-image verdict.
    pub verdict: Verdict,
    /// Number of regions scored.
    pub total_regions: usize,
    /// Regions judged dark.
    pub dark_regions: usize,
    /// Regions judged blurry.
    pub blurry_regions: usize,
}

impl QualityReport {
    /// Report for input that could not be evaluated.
    #[must_use]
    pub const fn unevaluated() -> Self {
        Self {
            verdict: Verdict::Ok,
            total_regions: 0,
            dark_regions: 0,
            blurry_regions: 0,
        }
    }
}

/// Image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageDimensions {
    /// Creates a new dimensions value.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A decoded image together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// Path or URI the image was loaded from.
    pub path: String,
    /// Decoded pixels.
    pub image: image::DynamicImage,
}

impl LoadedImage {
    /// Wraps a decoded image.
    pub fn new(path: impl Into<String>, image: image::DynamicImage) -> Self {
        Self {
            path: path.into(),
            image,
        }
    }

    /// Width and height of the decoded image.
    #[must_use]
    pub fn dimensions(&self) -> ImageDimensions {
        ImageDimensions::new(self.image.width(), self.image.height())
    }
}

/// One line of checker output: a single file and its report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRecord {
    /// Path to the checked image.
    pub path: String,
    /// Timestamp of the check (RFC 3339).
    pub timestamp: String,
    /// Image dimensions, absent when the file could not be decoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<ImageDimensions>,
    /// Verdict and region tallies.
    #[serde(flatten)]
    pub report: QualityReport,
}

//! Darkness scoring.
//!
//! A region is dark when most of its pixels fall below a perceptual
//! luminance floor.

use image::{Rgb, RgbImage};
use tracing::debug;

use crate::domain::RegionScorer;

/// Pixels with luminance strictly below this are dark.
pub const DARK_PIXEL_LUMINANCE_THRESHOLD: u8 = 50;

/// Share of dark pixels (or dark regions) that must be exceeded.
pub const MINIMUM_DARKNESS_FACTOR: f64 = 0.50;

/// Configuration for darkness scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct DarknessConfig {
    /// Luminance floor (0-255). Pixels below it count as dark.
    pub luminance_threshold: u8,
    /// Fraction of dark pixels a region must exceed to be dark (0.0-1.0).
    pub dark_pixel_factor: f64,
}

impl Default for DarknessConfig {
    fn default() -> Self {
        Self {
            luminance_threshold: DARK_PIXEL_LUMINANCE_THRESHOLD,
            dark_pixel_factor: MINIMUM_DARKNESS_FACTOR,
        }
    }
}

/// BT.709 relative luminance, truncated to an integer.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn luminance(pixel: &Rgb<u8>) -> u8 {
    let [r, g, b] = pixel.0;
    (0.2126 * f64::from(r) + 0.7152 * f64::from(g) + 0.0722 * f64::from(b)) as u8
}

/// Region scorer that flags dark regions.
#[derive(Debug, Clone, Default)]
pub struct DarknessScorer {
    config: DarknessConfig,
}

impl DarknessScorer {
    /// Creates a new darkness scorer with the given configuration.
    #[must_use]
    pub const fn new(config: DarknessConfig) -> Self {
        Self { config }
    }

    /// Returns the scorer configuration.
    #[must_use]
    pub const fn config(&self) -> &DarknessConfig {
        &self.config
    }

    /// Returns `true` if more than the configured share of pixels are dark.
    ///
    /// A region that could not be decoded counts as dark, so unreadable
    /// tiles push the image toward review instead of vanishing from the vote.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn is_dark(&self, region: Option<&RgbImage>) -> bool {
        let Some(region) = region else {
            debug!("missing region pixels, counting region as dark");
            return true;
        };

        let total = u64::from(region.width()) * u64::from(region.height());
        let limit = total as f64 * self.config.dark_pixel_factor;
        let mut dark_pixels = 0usize;

        for pixel in region.pixels() {
            if luminance(pixel) < self.config.luminance_threshold {
                dark_pixels += 1;
                if dark_pixels as f64 > limit {
                    return true;
                }
            }
        }

        false
    }
}

impl RegionScorer for DarknessScorer {
    fn name(&self) -> &'static str {
        "darkness"
    }

    fn score(&self, region: Option<&RgbImage>) -> bool {
        self.is_dark(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(width: u32, height: u32, value: u8) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([value, value, value]))
    }

    #[test]
    fn test_default_config() {
        let config = DarknessConfig::default();
        assert_eq!(config.luminance_threshold, 50);
        assert!((config.dark_pixel_factor - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scorer_name() {
        assert_eq!(DarknessScorer::default().name(), "darkness");
    }

    #[test]
    fn test_luminance_weights() {
        assert_eq!(luminance(&Rgb([0, 0, 0])), 0);
        assert_eq!(luminance(&Rgb([255, 0, 0])), 54);
        assert_eq!(luminance(&Rgb([0, 255, 0])), 182);
        assert_eq!(luminance(&Rgb([0, 0, 255])), 18);
        // the weights sum just short of 1.0, so white truncates to 254
        assert_eq!(luminance(&Rgb([255, 255, 255])), 254);
    }

    #[test]
    fn test_luminance_truncates() {
        assert_eq!(luminance(&Rgb([50, 50, 50])), 50);
        assert_eq!(luminance(&Rgb([51, 51, 51])), 50);
        assert_eq!(luminance(&Rgb([49, 49, 49])), 48);
    }

    #[test]
    fn test_black_region_is_dark() {
        assert!(DarknessScorer::default().is_dark(Some(&gray(16, 16, 0))));
    }

    #[test]
    fn test_white_region_is_not_dark() {
        assert!(!DarknessScorer::default().is_dark(Some(&gray(16, 16, 255))));
    }

    #[test]
    fn test_luminance_at_threshold_is_not_dark() {
        let scorer = DarknessScorer::default();
        assert!(!scorer.is_dark(Some(&gray(10, 10, 50))));
        assert!(scorer.is_dark(Some(&gray(10, 10, 49))));
    }

    #[test]
    fn test_exactly_half_dark_is_not_dark() {
        let half = RgbImage::from_fn(10, 10, |x, _| {
            if x < 5 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        assert!(!DarknessScorer::default().is_dark(Some(&half)));
    }

    #[test]
    fn test_one_past_half_dark_is_dark() {
        let mostly = RgbImage::from_fn(10, 10, |x, y| {
            if x < 5 || (x == 5 && y == 0) {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        assert!(DarknessScorer::default().is_dark(Some(&mostly)));
    }

    #[test]
    fn test_missing_region_is_dark() {
        assert!(DarknessScorer::default().is_dark(None));
    }

    #[test]
    fn test_empty_region_is_not_dark() {
        assert!(!DarknessScorer::default().is_dark(Some(&RgbImage::new(0, 0))));
    }

    #[test]
    fn test_green_weighs_most() {
        // pure red at full intensity is above the floor, pure blue is not
        let scorer = DarknessScorer::default();
        assert!(!scorer.is_dark(Some(&RgbImage::from_pixel(4, 4, Rgb([255, 0, 0])))));
        assert!(scorer.is_dark(Some(&RgbImage::from_pixel(4, 4, Rgb([0, 0, 255])))));
    }

    #[test]
    fn test_custom_threshold() {
        let scorer = DarknessScorer::new(DarknessConfig {
            luminance_threshold: 100,
            ..Default::default()
        });
        assert!(scorer.is_dark(Some(&gray(8, 8, 80))));
        assert!(!DarknessScorer::default().is_dark(Some(&gray(8, 8, 80))));
    }
}

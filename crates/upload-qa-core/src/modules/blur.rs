//! Blur scoring.
//!
//! Uses the variance of the Laplacian: sharp regions have many strong
//! intensity transitions and a wide spread of second-derivative responses,
//! defocused regions have a narrow one.

use image::{GrayImage, Luma, RgbImage};
use tracing::{debug, trace};

use crate::domain::RegionScorer;

/// Regions whose Laplacian variance is below this are blurry.
pub const LAPLACIAN_VARIANCE_THRESHOLD: f64 = 70.0;

/// Share of blurry regions that must be exceeded.
pub const MINIMUM_BLURRINESS_FACTOR: f64 = 0.50;

/// Configuration for blur scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct BlurConfig {
    /// Laplacian variance below which a region is blurry.
    pub variance_threshold: f64,
}

impl Default for BlurConfig {
    fn default() -> Self {
        Self {
            variance_threshold: LAPLACIAN_VARIANCE_THRESHOLD,
        }
    }
}

/// Converts RGB to 8-bit gray with BT.601 weights in 14-bit fixed point.
#[must_use]
pub fn to_gray(region: &RgbImage) -> GrayImage {
    const R: u32 = 4899;
    const G: u32 = 9617;
    const B: u32 = 1868;
    const SHIFT: u32 = 14;

    GrayImage::from_fn(region.width(), region.height(), |x, y| {
        let [r, g, b] = region.get_pixel(x, y).0;
        let weighted = u32::from(r) * R + u32::from(g) * G + u32::from(b) * B;
        #[allow(clippy::cast_possible_truncation)]
        Luma([((weighted + (1 << (SHIFT - 1))) >> SHIFT) as u8])
    })
}

/// Mirror index across the border without repeating the edge pixel (`dcb|abcd|cba`).
#[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
const fn reflect_101(index: i64, len: u32) -> u32 {
    let len = len as i64;
    if len == 1 {
        return 0;
    }
    let mirrored = if index < 0 {
        -index
    } else if index >= len {
        2 * len - 2 - index
    } else {
        index
    };
    mirrored as u32
}

/// Applies the 4-neighbour 3x3 Laplacian `[0 1 0; 1 -4 1; 0 1 0]`.
///
/// Produces one response per pixel; borders are reflected.
#[must_use]
pub fn laplacian(gray: &GrayImage) -> Vec<i32> {
    let (width, height) = gray.dimensions();
    let at = |x: i64, y: i64| -> i32 {
        i32::from(
            gray.get_pixel(reflect_101(x, width), reflect_101(y, height))
                .0[0],
        )
    };

    let mut response = Vec::with_capacity(width as usize * height as usize);
    for y in 0..i64::from(height) {
        for x in 0..i64::from(width) {
            response.push(at(x - 1, y) + at(x + 1, y) + at(x, y - 1) + at(x, y + 1) - 4 * at(x, y));
        }
    }
    response
}

/// Population variance of the Laplacian response over a grayscale region.
///
/// Returns 0.0 for an empty region.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn laplacian_variance(gray: &GrayImage) -> f64 {
    let response = laplacian(gray);
    if response.is_empty() {
        return 0.0;
    }

    let n = response.len() as f64;
    let mean = response.iter().map(|&v| f64::from(v)).sum::<f64>() / n;
    response
        .iter()
        .map(|&v| {
            let diff = f64::from(v) - mean;
            diff * diff
        })
        .sum::<f64>()
        / n
}

/// Region scorer that flags blurry regions.
#[derive(Debug, Clone, Default)]
pub struct BlurScorer {
    config: BlurConfig,
}

impl BlurScorer {
    /// Creates a new blur scorer with the given configuration.
    #[must_use]
    pub const fn new(config: BlurConfig) -> Self {
        Self { config }
    }

    /// Returns the scorer configuration.
    #[must_use]
    pub const fn config(&self) -> &BlurConfig {
        &self.config
    }

    /// Returns `true` if the region's Laplacian variance is below the threshold.
    ///
    /// A region that could not be decoded is not blurry: blur is the
    /// lower-priority verdict, so missing data must not push toward it.
    /// A perfectly flat region has zero variance and is blurry.
    #[must_use]
    pub fn is_blurred(&self, region: Option<&RgbImage>) -> bool {
        let Some(region) = region else {
            debug!("missing region pixels, counting region as sharp");
            return false;
        };

        let variance = laplacian_variance(&to_gray(region));
        trace!(variance, "laplacian variance");
        variance < self.config.variance_threshold
    }
}

impl RegionScorer for BlurScorer {
    fn name(&self) -> &'static str {
        "blur"
    }

    fn score(&self, region: Option<&RgbImage>) -> bool {
        self.is_blurred(region)
    }
}

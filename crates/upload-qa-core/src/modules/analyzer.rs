//! Whole-image quality analysis.
//!
//! Tiles the image, scores every region for darkness and blur, and turns the
//! tallies into a single verdict. The analyzer is total: decode failures
//! resolve to fixed default votes and never reach the caller.

use rayon::prelude::*;
use tracing::{debug, warn};

use super::blur::{BlurConfig, BlurScorer, MINIMUM_BLURRINESS_FACTOR};
use super::darkness::{DarknessConfig, DarknessScorer, MINIMUM_DARKNESS_FACTOR};
use super::tiler::TileGrid;
use crate::domain::{QualityReport, Region, RegionScorer, Verdict};
use crate::ports::RegionSource;

/// Configuration for whole-image analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// Share of dark regions the image must exceed to be `Dark` (0.0-1.0).
    pub dark_region_factor: f64,
    /// Share of blurry regions the image must exceed to be `Blurry` (0.0-1.0).
    pub blurry_region_factor: f64,
    /// Score regions on the rayon thread pool.
    pub parallel: bool,
    /// Per-region darkness settings.
    pub darkness: DarknessConfig,
    /// Per-region blur settings.
    pub blur: BlurConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            dark_region_factor: MINIMUM_DARKNESS_FACTOR,
            blurry_region_factor: MINIMUM_BLURRINESS_FACTOR,
            parallel: false,
            darkness: DarknessConfig::default(),
            blur: BlurConfig::default(),
        }
    }
}

/// Region votes, mergeable across workers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    total: usize,
    dark: usize,
    blurry: usize,
}

impl Tally {
    const fn merge(self, other: Self) -> Self {
        Self {
            total: self.total + other.total,
            dark: self.dark + other.dark,
            blurry: self.blurry + other.blurry,
        }
    }
}

/// Dark/blurry image analyzer.
#[derive(Debug, Clone)]
pub struct ImageQualityAnalyzer {
    config: AnalyzerConfig,
    darkness: DarknessScorer,
    blur: BlurScorer,
}

impl ImageQualityAnalyzer {
    /// Creates a new analyzer with the given configuration.
    #[must_use]
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            darkness: DarknessScorer::new(config.darkness.clone()),
            blur: BlurScorer::new(config.blur.clone()),
            config,
        }
    }

    /// Returns the analyzer configuration.
    #[must_use]
    pub const fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Classifies an image as dark, blurry, or ok.
    ///
    /// `None` means the image could not be loaded; it is passed as `Ok` so a
    /// failed check never blocks an upload.
    #[must_use]
    pub fn analyze(&self, source: Option<&dyn RegionSource>) -> Verdict {
        self.inspect(source).verdict
    }

    /// Like [`analyze`](Self::analyze), also returning the region tallies.
    #[must_use]
    pub fn inspect(&self, source: Option<&dyn RegionSource>) -> QualityReport {
        let Some(source) = source else {
            warn!("no image to analyze, passing it through");
            return QualityReport::unevaluated();
        };

        let grid = TileGrid::new(source.width(), source.height());
        if grid.is_empty() {
            debug!(
                width = source.width(),
                height = source.height(),
                "empty image, nothing to analyze"
            );
            return QualityReport::unevaluated();
        }

        let tally = if self.config.parallel {
            grid.regions()
                .collect::<Vec<_>>()
                .into_par_iter()
                .map(|region| self.score_region(source, region))
                .reduce(Tally::default, Tally::merge)
        } else {
            grid.regions()
                .map(|region| self.score_region(source, region))
                .fold(Tally::default(), Tally::merge)
        };

        debug!(
            dark = tally.dark,
            blurry = tally.blurry,
            total = tally.total,
            "region tallies"
        );

        QualityReport {
            verdict: self.decide(tally),
            total_regions: tally.total,
            dark_regions: tally.dark,
            blurry_regions: tally.blurry,
        }
    }

    fn score_region(&self, source: &dyn RegionSource, region: Region) -> Tally {
        debug!(
            left = region.left,
            top = region.top,
            right = region.right,
            bottom = region.bottom,
            "scoring region"
        );

        let pixels = match source.crop(region) {
            Ok(pixels) => Some(pixels),
            Err(e) => {
                warn!("missing input for region {region:?}: {e:#}");
                None
            }
        };

        Tally {
            total: 1,
            dark: usize::from(self.darkness.score(pixels.as_ref())),
            blurry: usize::from(self.blur.score(pixels.as_ref())),
        }
    }

    /// Dark wins over blurry; both need a strict majority share.
    #[allow(clippy::cast_precision_loss)]
    fn decide(&self, tally: Tally) -> Verdict {
        let total = tally.total as f64;
        if tally.dark as f64 > total * self.config.dark_region_factor {
            Verdict::Dark
        } else if tally.blurry as f64 > total * self.config.blurry_region_factor {
            Verdict::Blurry
        } else {
            Verdict::Ok
        }
    }
}

impl Default for ImageQualityAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

/// Classifies an image with the default thresholds.
#[must_use]
pub fn analyze(source: Option<&dyn RegionSource>) -> Verdict {
    ImageQualityAnalyzer::default().analyze(source)
}

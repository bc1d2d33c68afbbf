//! Upload QA Core - dark and blurry photo detection
//!
//! This crate contains the domain types, port traits, and the tiled
//! darkness/blur analysis that decides whether a photo is worth uploading.

pub mod domain;
pub mod modules;
pub mod ports;

pub use domain::{
    CheckRecord, ImageDimensions, LoadedImage, QualityReport, Region, RegionScorer, Verdict,
};
pub use modules::{analyze, AnalyzerConfig, BlurConfig, DarknessConfig, ImageQualityAnalyzer};
pub use ports::{ImageSource, ProgressEvent, ProgressSink, RegionSource, ResultOutput};

//! Core domain types for upload quality checks.

mod region;
mod region_scorer;
mod report;
mod verdict;

pub use region::Region;
pub use region_scorer::RegionScorer;
pub use report::{CheckRecord, ImageDimensions, LoadedImage, QualityReport};
pub use verdict::Verdict;

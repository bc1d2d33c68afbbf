//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the analysis core and the
//! adapters that load images and report results.

mod image_source;
mod progress;
mod region_source;
mod result_output;

pub use image_source::ImageSource;
pub use progress::{ProgressEvent, ProgressSink};
pub use region_source::RegionSource;
pub use result_output::ResultOutput;

//! Test support utilities for upload-qa.
//!
//! Provides mocks and synthetic image builders for exercising the
//! dark/blurry checks without fixture files.
//!
//! # Example
//!
//! ```
//! use upload_qa_test_support::{MockImageSource, SyntheticImageBuilder};
//!
//! let sharp = SyntheticImageBuilder::checkerboard(128, 128);
//! let dark = SyntheticImageBuilder::black(128, 128);
//!
//! let source = MockImageSource::new(vec![sharp, dark]);
//! ```

mod builders;
mod mocks;

pub use builders::SyntheticImageBuilder;
pub use mocks::{MockImageSource, MockProgressSink, MockResultOutput};

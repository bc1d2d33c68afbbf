//! Upload QA Adapters - external adapters for upload-qa.
//!
//! Currently provides the filesystem image source.

pub mod fs;

pub use fs::FsImageSource;

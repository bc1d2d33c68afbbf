//! Progress reporting port.

use crate::domain::CheckRecord;

/// Events emitted while a batch of images is checked.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Checking started for an image.
    Started {
        /// Path to the image.
        path: String,
        /// Index in the batch (0-based).
        index: usize,
        /// Total images in batch, if known.
        total: Option<usize>,
    },
    /// An image was checked.
    Completed {
        /// The emitted record.
        record: CheckRecord,
    },
    /// An image could not be decoded and was passed through unevaluated.
    Skipped {
        /// Path to the image.
        path: String,
        /// Why decoding failed.
        reason: String,
    },
    /// All images have been processed.
    Finished {
        /// Images that were decoded and scored.
        checked: usize,
        /// Images that could not be decoded.
        skipped: usize,
        /// Images with a dark or blurry verdict.
        rejected: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}

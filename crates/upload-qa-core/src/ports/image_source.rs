//! Image source port for feeding candidate uploads to the checker.

use crate::domain::LoadedImage;

/// Port for loading images from a source.
pub trait ImageSource: Send + Sync {
    /// Returns an iterator over images from this source.
    ///
    /// Each item carries the path it was loaded from, so callers can still
    /// report on images that failed to decode.
    fn images(&self) -> Box<dyn Iterator<Item = (String, anyhow::Result<LoadedImage>)> + Send + '_>;

    /// Returns the total number of images, if known.
    fn count_hint(&self) -> Option<usize>;
}

//! Rectangular image regions produced by the tiler.

use serde::{Deserialize, Serialize};

/// Half-open rectangle `[left, right) x [top, bottom)` in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    /// Left edge (inclusive).
    pub left: u32,
    /// Top edge (inclusive).
    pub top: u32,
    /// Right edge (exclusive).
    pub right: u32,
    /// Bottom edge (exclusive).
    pub bottom: u32,
}

impl Region {
    /// Creates a region from its four edges.
    #[must_use]
    pub const fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Number of pixels covered.
    #[must_use]
    pub const fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Returns `true` if the region covers no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Returns `true` if the region lies inside a `width` x `height` image.
    #[must_use]
    pub const fn fits_within(&self, width: u32, height: u32) -> bool {
        self.left < self.right
            && self.top < self.bottom
            && self.right <= width
            && self.bottom <= height
    }

    /// Returns `true` if the pixel `(x, y)` lies inside the region.
    #[must_use]
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let region = Region::new(10, 20, 30, 60);
        assert_eq!(region.width(), 20);
        assert_eq!(region.height(), 40);
        assert_eq!(region.area(), 800);
        assert!(!region.is_empty());
    }

    #[test]
    fn test_degenerate_region_is_empty() {
        assert!(Region::new(5, 5, 5, 10).is_empty());
        assert!(Region::new(5, 10, 8, 10).is_empty());
        assert!(Region::new(8, 0, 5, 10).is_empty());
    }

    #[test]
    fn test_fits_within() {
        let region = Region::new(0, 0, 10, 10);
        assert!(region.fits_within(10, 10));
        assert!(!region.fits_within(9, 10));
        assert!(!Region::new(3, 3, 3, 4).fits_within(10, 10));
    }

    #[test]
    fn test_contains_is_half_open() {
        let region = Region::new(2, 2, 4, 4);
        assert!(region.contains(2, 2));
        assert!(region.contains(3, 3));
        assert!(!region.contains(4, 3));
        assert!(!region.contains(3, 4));
    }
}

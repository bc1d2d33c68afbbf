//! Geometric tiling of an image into scoring regions.
//!
//! Each axis is cut independently: the first span is a tenth of the axis,
//! every following span ends at twice the previous end, and the last span
//! absorbs whatever is left. The grid is the cross product of the column
//! spans and the row spans, walked column by column.

use std::iter::FusedIterator;

use crate::domain::Region;

/// The first span on each axis is `extent / TILE_DIVISOR` pixels long.
pub const TILE_DIVISOR: u32 = 10;

/// Lazy partition of one axis `[0, extent)` into contiguous `(start, end)` spans.
///
/// Axes shorter than [`TILE_DIVISOR`] pixels form a single span; a
/// zero-length axis yields nothing.
#[derive(Debug, Clone)]
pub struct AxisSpans {
    extent: u32,
    start: u32,
    end: u32,
}

impl AxisSpans {
    /// Creates the partition of an axis `extent` pixels long.
    #[must_use]
    pub const fn new(extent: u32) -> Self {
        let first = extent / TILE_DIVISOR;
        Self {
            extent,
            start: 0,
            end: if first == 0 { extent } else { first },
        }
    }
}

impl Iterator for AxisSpans {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.start >= self.end {
            return None;
        }
        let span = (self.start, self.end);
        let remaining = self.extent - self.end;
        self.start = self.end;
        self.end += self.end.min(remaining);
        Some(span)
    }
}

impl FusedIterator for AxisSpans {}

/// Region grid for a `width` x `height` image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    width: u32,
    height: u32,
}

impl TileGrid {
    /// Creates the grid for an image of the given size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Column spans, left to right.
    #[must_use]
    pub const fn columns(&self) -> AxisSpans {
        AxisSpans::new(self.width)
    }

    /// Row spans, top to bottom.
    #[must_use]
    pub const fn rows(&self) -> AxisSpans {
        AxisSpans::new(self.height)
    }

    /// Every region of the grid, column-major.
    ///
    /// The iterator is restartable: clone it to walk the grid again.
    pub fn regions(&self) -> impl Iterator<Item = Region> + Clone + Send {
        let rows = self.rows();
        self.columns().flat_map(move |(left, right)| {
            rows.clone()
                .map(move |(top, bottom)| Region::new(left, top, right, bottom))
        })
    }

    /// Number of regions in the grid.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns().count() * self.rows().count()
    }

    /// Returns `true` if the image has no pixels to tile.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

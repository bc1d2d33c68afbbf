//! Region source port: random-access cropping of a decoded image.

use anyhow::ensure;
use image::{DynamicImage, GenericImageView, RgbImage};

use crate::domain::{LoadedImage, Region};

/// Port for reading rectangular pixel regions out of an image.
///
/// The analyzer only needs the image size and a way to crop it, so any
/// bitmap library can back this trait.
pub trait RegionSource: Send + Sync {
    /// Image width in pixels.
    fn width(&self) -> u32;

    /// Image height in pixels.
    fn height(&self) -> u32;

    /// Decodes the pixels inside `region` as 8-bit RGB.
    ///
    /// # Errors
    ///
    /// Returns an error if the region lies outside the image or cannot be
    /// decoded.
    fn crop(&self, region: Region) -> anyhow::Result<RgbImage>;
}

fn check_bounds(region: Region, width: u32, height: u32) -> anyhow::Result<()> {
    ensure!(
        region.fits_within(width, height),
        "region {region:?} is outside the {width}x{height} image"
    );
    Ok(())
}

impl RegionSource for RgbImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn crop(&self, region: Region) -> anyhow::Result<RgbImage> {
        check_bounds(region, RegionSource::width(self), RegionSource::height(self))?;
        Ok(self
            .view(region.left, region.top, region.width(), region.height())
            .to_image())
    }
}

impl RegionSource for DynamicImage {
    fn width(&self) -> u32 {
        GenericImageView::width(self)
    }

    fn height(&self) -> u32 {
        GenericImageView::height(self)
    }

    fn crop(&self, region: Region) -> anyhow::Result<RgbImage> {
        check_bounds(region, RegionSource::width(self), RegionSource::height(self))?;
        Ok(self
            .crop_imm(region.left, region.top, region.width(), region.height())
            .to_rgb8())
    }
}

impl RegionSource for LoadedImage {
    fn width(&self) -> u32 {
        RegionSource::width(&self.image)
    }

    fn height(&self) -> u32 {
        RegionSource::height(&self.image)
    }

    fn crop(&self, region: Region) -> anyhow::Result<RgbImage> {
        RegionSource::crop(&self.image, region)
    }
}

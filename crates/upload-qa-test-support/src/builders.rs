//! Synthetic image builders for testing.

use image::{DynamicImage, Rgb, RgbImage};
use upload_qa_core::LoadedImage;

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Builder for creating synthetic test images.
///
/// Every image comes back as a [`LoadedImage`] with a `synthetic://` path.
pub struct SyntheticImageBuilder;

impl SyntheticImageBuilder {
    fn wrap(name: &str, img: RgbImage) -> LoadedImage {
        LoadedImage::new(format!("synthetic://{name}"), DynamicImage::ImageRgb8(img))
    }

    // === Sharp Images ===

    /// Creates a one-pixel black/white checkerboard.
    ///
    /// Every tile of an even-sized board is exactly half dark (not dark) and
    /// has maximal Laplacian variance (sharp).
    #[must_use]
    pub fn checkerboard(width: u32, height: u32) -> LoadedImage {
        Self::checkerboard_with_cell_size(width, height, 1)
    }

    /// Creates a checkerboard with custom cell size.
    #[must_use]
    pub fn checkerboard_with_cell_size(width: u32, height: u32, cell_size: u32) -> LoadedImage {
        let cell = cell_size.max(1);
        let img = RgbImage::from_fn(width, height, |x, y| {
            if (x / cell + y / cell) % 2 == 0 {
                WHITE
            } else {
                BLACK
            }
        });
        Self::wrap("checkerboard", img)
    }

    // === Flat Images ===

    /// Creates a uniform gray image (no edges, every tile blurry).
    #[must_use]
    pub fn uniform_gray(width: u32, height: u32, value: u8) -> LoadedImage {
        Self::wrap(
            "uniform_gray",
            RgbImage::from_pixel(width, height, Rgb([value, value, value])),
        )
    }

    /// Creates an RGB color image.
    #[must_use]
    pub fn rgb_uniform(width: u32, height: u32, r: u8, g: u8, b: u8) -> LoadedImage {
        Self::wrap("rgb_uniform", RgbImage::from_pixel(width, height, Rgb([r, g, b])))
    }

    /// Creates a completely black image (dark and flat).
    #[must_use]
    pub fn black(width: u32, height: u32) -> LoadedImage {
        Self::uniform_gray(width, height, 0)
    }

    /// Creates a completely white image (bright but flat).
    #[must_use]
    pub fn white(width: u32, height: u32) -> LoadedImage {
        Self::uniform_gray(width, height, 255)
    }

    /// Creates a smooth horizontal gradient (low Laplacian variance).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn horizontal_gradient(width: u32, height: u32) -> LoadedImage {
        let img = RgbImage::from_fn(width, height, |x, _| {
            let v = ((u32::from(u8::MAX) * x) / width.max(1)) as u8;
            Rgb([v, v, v])
        });
        Self::wrap("horizontal_gradient", img)
    }

    // === Mixed Images ===

    /// Sharp checkerboard above `split_row`, solid black below it.
    #[must_use]
    pub fn sharp_over_dark(width: u32, height: u32, split_row: u32) -> LoadedImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            if y >= split_row || (x + y) % 2 == 1 {
                BLACK
            } else {
                WHITE
            }
        });
        Self::wrap("sharp_over_dark", img)
    }

    /// Solid black above `split_row`, sharp checkerboard below it.
    #[must_use]
    pub fn dark_over_sharp(width: u32, height: u32, split_row: u32) -> LoadedImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            if y < split_row || (x + y) % 2 == 1 {
                BLACK
            } else {
                WHITE
            }
        });
        Self::wrap("dark_over_sharp", img)
    }

    /// Dim noise: every pixel below the darkness floor but full of edges.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn dim_texture(width: u32, height: u32) -> LoadedImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            let v = ((x * 31 + y * 17) % 2 * 45) as u8;
            Rgb([v, v, v])
        });
        Self::wrap("dim_texture", img)
    }

    // === Special Test Images ===

    /// Creates a 1x1 pixel image (edge case).
    #[must_use]
    pub fn single_pixel(value: u8) -> LoadedImage {
        Self::uniform_gray(1, 1, value)
    }
}

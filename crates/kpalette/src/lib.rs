#[cfg(feature = "_debug")]
pub mod kmeans;
#[cfg(not(feature = "_debug"))]
mod kmeans;
#[cfg(feature = "_debug")]
pub mod rng;
#[cfg(not(feature = "_debug"))]
mod rng;
#[cfg(feature = "_debug")]
pub mod sample;
#[cfg(not(feature = "_debug"))]
mod sample;

pub mod color;
mod config;
mod export;
mod types;

pub use config::{DEFAULT_K, DEFAULT_STRIDE, ExtractOptions, MAX_STRIDE};
pub use export::{ExportError, PALETTE_FILE_NAME};
pub use kmeans::{ClusterError, Clustering, DEFAULT_MAX_ITERATIONS, MAX_K, find_palette};
pub use rgb::RGB8;
pub use rng::IndexSource;
pub use types::{Palette, PaletteEntry};

use snafu::prelude::*;
#[cfg(feature = "image")]
use std::ops::Deref;

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum InputImageError {
    #[snafu(display("image size must be positive"))]
    ZeroImageSize,

    #[snafu(display("buffer length {len} is not a multiple of 4"))]
    InvalidBufferLength { len: usize },

    #[snafu(display("buffer is empty"))]
    EmptyBuffer,

    #[snafu(display("image size ({width}x{height}) doesn't match the buffer size ({buf_size})"))]
    ImageSizeMismatch {
        width: u32,
        height: u32,
        buf_size: usize,
    },

    #[snafu(display("image dimensions are too large, got {width}x{height}"))]
    ImageDimensionsTooLarge { width: u32, height: u32 },
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ExtractError {
    #[snafu(display(
        "no pixels sampled with stride {stride}; every sampled pixel is transparent"
    ))]
    NoSamples { stride: usize },

    #[snafu(display("clustering failed"))]
    Cluster { source: ClusterError },
}

/// A structure used as a façade for RGBA image bytes.
#[derive(Debug, Copy, Clone)]
pub struct PixelBuffer<'a> {
    width: u32,
    height: u32,
    buf: &'a [u8],
}

impl PixelBuffer<'_> {
    pub fn from_bytes(
        width: u32,
        height: u32,
        buf: &[u8],
    ) -> Result<PixelBuffer<'_>, InputImageError> {
        ensure!(!buf.is_empty(), EmptyBufferSnafu);
        ensure!(width > 0 && height > 0, ZeroImageSizeSnafu);
        ensure!(
            buf.len().is_multiple_of(4),
            InvalidBufferLengthSnafu { len: buf.len() }
        );
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .context(ImageDimensionsTooLargeSnafu { width, height })?;
        ensure!(
            buf.len() == expected,
            ImageSizeMismatchSnafu {
                width,
                height,
                buf_size: buf.len()
            }
        );

        Ok(PixelBuffer { width, height, buf })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA value at `(x, y)`, if it is inside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.buf[idx..idx + 4]);
        Some(px)
    }
}

#[cfg(feature = "image")]
impl<'a, Container> TryFrom<&'a image::ImageBuffer<image::Rgba<u8>, Container>> for PixelBuffer<'a>
where
    Container: Deref<Target = [<image::Rgba<u8> as image::Pixel>::Subpixel]> + 'a,
{
    type Error = InputImageError;

    fn try_from(
        img: &'a image::ImageBuffer<image::Rgba<u8>, Container>,
    ) -> Result<Self, Self::Error> {
        Self::from_bytes(img.width(), img.height(), img.as_raw().deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugInfo {
    pub samples: usize,
    pub kmeans_iterations: usize,
    pub kmeans_converged: bool,
}

/// Extract a dominant-color palette from RGBA bytes.
///
/// ```
/// let input = kpalette::PixelBuffer::from_bytes(4, 1, &[
///     255, 0, 0, 255,
///     255, 0, 0, 255,
///     0, 255, 0, 255,
///     0, 0, 0, 0,
/// ]).unwrap();
///
/// let palette = kpalette::palette(input, &kpalette::ExtractOptions::new(2, 1)).unwrap();
///
/// let red = rgb::Rgb { r: 255, g: 0, b: 0 };
/// let green = rgb::Rgb { r: 0, g: 255, b: 0 };
/// assert_eq!(vec![red, green], palette.colors());
/// assert_eq!(palette.entries()[0].count, 2);
/// ```
///
/// Every `stride`-th pixel on both axes is sampled, fully transparent pixels
/// are skipped, and the samples are grouped into `k` clusters with k-means.
/// Entries are sorted by the number of samples they hold, most populated first.
///
/// The random source is seeded with a constant, so equal inputs give equal
/// palettes. Use [`palette_with_rng`] to supply another source.
pub fn palette(input: PixelBuffer, options: &ExtractOptions) -> Result<Palette, ExtractError> {
    palette_with_rng(&mut rng::new(), input, options)
}

/// An index source seeded with `seed`, for reproducible runs that differ from
/// the default seed.
pub fn seeded_rng(seed: u64) -> impl IndexSource {
    rng::with_seed(seed)
}

pub fn palette_with_rng(
    rng: &mut impl IndexSource,
    input: PixelBuffer,
    options: &ExtractOptions,
) -> Result<Palette, ExtractError> {
    palette_debug(rng, input, options).map(|(palette, _)| palette)
}

pub fn palette_debug(
    rng: &mut impl IndexSource,
    input: PixelBuffer,
    options: &ExtractOptions,
) -> Result<(Palette, DebugInfo), ExtractError> {
    let options = options.clamped();

    let samples = sample::sample(input.width, input.height, input.buf, options.stride);
    tracing::debug!(
        width = input.width,
        height = input.height,
        stride = options.stride,
        samples = samples.len(),
        "sampled pixels"
    );
    ensure!(
        !samples.is_empty(),
        NoSamplesSnafu {
            stride: options.stride
        }
    );

    let Clustering {
        palette,
        iterations,
        converged,
    } = kmeans::find_palette(rng, &samples, options.k, options.max_iterations)
        .context(ClusterSnafu)?;

    Ok((
        palette,
        DebugInfo {
            samples: samples.len(),
            kmeans_iterations: iterations,
            kmeans_converged: converged,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RED: RGB8 = RGB8 { r: 255, g: 0, b: 0 };
    const GREEN: RGB8 = RGB8 { r: 0, g: 255, b: 0 };

    #[test]
    fn single_pixel() {
        let buf = [128, 64, 32, 255];
        let input = PixelBuffer::from_bytes(1, 1, &buf).unwrap();
        let palette = palette(input, &ExtractOptions::new(3, 1)).unwrap();
        // One sample, three centroids padded from it
        assert_eq!(palette.len(), 3);
        assert_eq!(palette.entries()[0].color, RGB8 { r: 128, g: 64, b: 32 });
        assert_eq!(palette.entries()[0].count, 1);
        assert_eq!(palette.total_count(), 1);
    }

    #[test]
    fn end_to_end_red_and_green() {
        let buf = [
            255, 0, 0, 255, //
            255, 0, 0, 255, //
            0, 255, 0, 255, //
            0, 0, 0, 0,
        ];
        let input = PixelBuffer::from_bytes(4, 1, &buf).unwrap();
        let (palette, info) =
            palette_debug(&mut rng::new(), input, &ExtractOptions::new(2, 1)).unwrap();

        assert_eq!(info.samples, 3);
        assert!(info.kmeans_converged);
        assert_eq!(
            palette.entries(),
            &[
                PaletteEntry {
                    color: RED,
                    count: 2
                },
                PaletteEntry {
                    color: GREEN,
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn uniform_image() {
        // 10x10 image of a single color, sampled every other pixel
        let buf = [200, 100, 50, 255].repeat(100);
        let input = PixelBuffer::from_bytes(10, 10, &buf).unwrap();
        let (palette, info) =
            palette_debug(&mut rng::new(), input, &ExtractOptions::new(4, 2)).unwrap();

        assert_eq!(info.samples, 25);
        assert_eq!(palette.total_count(), 25);
        assert_eq!(
            palette.entries()[0].color,
            RGB8 {
                r: 200,
                g: 100,
                b: 50
            }
        );
    }

    #[test]
    fn dominant_color_is_first() {
        let (w, h) = (20u32, 20u32);
        let mut buf = Vec::with_capacity((w * h * 4) as usize);
        for y in 0..h {
            for x in 0..w {
                if (2..18).contains(&x) && (2..18).contains(&y) {
                    buf.extend_from_slice(&[255, 0, 0, 255]);
                } else {
                    buf.extend_from_slice(&[40, 40, 40, 255]);
                }
            }
        }
        let input = PixelBuffer::from_bytes(w, h, &buf).unwrap();
        let palette = palette(input, &ExtractOptions::new(2, 1)).unwrap();

        assert_eq!(palette.len(), 2);
        assert_eq!(palette.entries()[0].color, RED);
        assert_eq!(palette.entries()[0].count, 16 * 16);
        assert_eq!(palette.total_count(), 400);
    }

    #[test]
    fn deterministic() {
        let buf: Vec<u8> = (0..64u32)
            .flat_map(|i| [(i * 4) as u8, (i * 9 % 256) as u8, (255 - i * 3) as u8, 255])
            .collect();
        let input = PixelBuffer::from_bytes(8, 8, &buf).unwrap();
        let options = ExtractOptions::new(5, 1);
        assert_eq!(
            palette(input, &options).unwrap(),
            palette(input, &options).unwrap()
        );
    }

    #[test]
    fn transparent_image_has_no_samples() {
        let buf = [10, 10, 10, 0].repeat(9);
        let input = PixelBuffer::from_bytes(3, 3, &buf).unwrap();
        let err = palette(input, &ExtractOptions::new(2, 1)).unwrap_err();
        assert!(matches!(err, ExtractError::NoSamples { stride: 1 }));
    }

    #[test]
    fn stride_can_skip_every_opaque_pixel() {
        // Only (1, 0) is opaque; stride 2 visits (0, 0) only
        let buf = [0, 0, 0, 0, 9, 9, 9, 255];
        let input = PixelBuffer::from_bytes(2, 1, &buf).unwrap();
        assert!(palette(input, &ExtractOptions::new(2, 2)).is_err());
        assert!(palette(input, &ExtractOptions::new(2, 1)).is_ok());
    }

    #[test]
    fn out_of_range_options_are_clamped() {
        let buf = [1, 2, 3, 255].repeat(4);
        let input = PixelBuffer::from_bytes(2, 2, &buf).unwrap();
        let options = ExtractOptions {
            k: 0,
            stride: 0,
            max_iterations: 12,
        };
        let (palette, info) = palette_debug(&mut rng::new(), input, &options).unwrap();
        assert_eq!(palette.len(), 1);
        assert_eq!(info.samples, 4);
    }

    #[test]
    fn pixel_lookup() {
        let buf = [1, 2, 3, 4, 5, 6, 7, 8];
        let input = PixelBuffer::from_bytes(2, 1, &buf).unwrap();
        assert_eq!(input.pixel(1, 0), Some([5, 6, 7, 8]));
        assert_eq!(input.pixel(2, 0), None);
        assert_eq!(input.pixel(0, 1), None);
    }

    #[test]
    fn empty_buffer() {
        let result = PixelBuffer::from_bytes(0, 0, &[]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("empty"));
    }

    #[test]
    fn zero_dimension() {
        let result = PixelBuffer::from_bytes(0, 1, &[1, 2, 3, 4]);
        assert!(matches!(result, Err(InputImageError::ZeroImageSize)));
    }

    #[test]
    fn invalid_length() {
        let result = PixelBuffer::from_bytes(1, 2, &[1, 2, 3]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("of 4"));
    }

    #[test]
    fn size_mismatch() {
        let result = PixelBuffer::from_bytes(2, 2, &[0; 8]);
        assert!(matches!(
            result,
            Err(InputImageError::ImageSizeMismatch { buf_size: 8, .. })
        ));
    }

    #[cfg(feature = "image")]
    #[test]
    fn image_buffer() {
        let img: image::RgbaImage =
            image::ImageBuffer::from_raw(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 255]).unwrap();
        let input = PixelBuffer::try_from(&img).unwrap();
        let palette = palette(input, &ExtractOptions::new(2, 1)).unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.total_count(), 2);
    }
}

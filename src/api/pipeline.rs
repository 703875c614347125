//! Contains the [`TextureImportPipeline`] builder struct.

use super::{AssetClass, TextureFormat};
use crate::FloydSteinberg;
use palette::Srgba;
#[cfg(feature = "image")]
use {
    image::RgbaImage,
    palette::cast::{ComponentsAs, IntoComponents},
};

/// Applies the import processing for one classified texture asset:
/// the dither pass for the dithering class, a plain pass-through otherwise,
/// and in both cases the class's target storage format.
///
/// # Examples
/// ```
/// # use dither4444::{AssetClass, TextureImportPipeline, TextureFormat};
/// # use palette::Srgba;
/// let pixels = vec![Srgba::new(0.5f32, 0.5, 0.5, 1.0); 2 * 2];
/// let pipeline = TextureImportPipeline::new(pixels, 2, 2, AssetClass::Dither16).unwrap();
/// let (quantized, format) = pipeline.run();
/// assert_eq!(format, TextureFormat::Automatic16);
/// ```
#[must_use]
#[derive(Debug, Clone)]
pub struct TextureImportPipeline {
    /// The decoded image as a flat row-major buffer of full precision pixels.
    pixels: Vec<Srgba<f32>>,
    /// The dimensions of the image.
    dimensions: (u32, u32),
    /// The asset class driving the dither pass and the target format.
    class: AssetClass,
}

impl TextureImportPipeline {
    /// Creates a new [`TextureImportPipeline`]
    /// without validating the size of the pixel buffer.
    fn new_unchecked(pixels: Vec<Srgba<f32>>, width: u32, height: u32, class: AssetClass) -> Self {
        Self { pixels, dimensions: (width, height), class }
    }

    /// Creates a new [`TextureImportPipeline`].
    /// Returns `None` if the length of `pixels` is not equal to `width * height`.
    #[must_use]
    pub fn new(
        pixels: Vec<Srgba<f32>>,
        width: u32,
        height: u32,
        class: AssetClass,
    ) -> Option<Self> {
        if pixels.len() == width as usize * height as usize {
            Some(Self::new_unchecked(pixels, width, height, class))
        } else {
            None
        }
    }

    /// The asset class this pipeline was created with.
    #[must_use]
    pub fn class(&self) -> AssetClass {
        self.class
    }

    /// The dimensions of the image.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    /// Runs the pipeline, applying the dither pass when the class calls for it,
    /// and returns the processed pixels with their target storage format.
    #[must_use]
    pub fn run(self) -> (Vec<Srgba<f32>>, TextureFormat) {
        let Self { pixels, dimensions: (width, height), class } = self;

        let pixels = match class {
            AssetClass::Dither16 => {
                #[allow(clippy::expect_used)]
                {
                    // the buffer length is validated at construction
                    FloydSteinberg::new()
                        .dither_rgba(pixels, width, height)
                        .expect("pixel count matches dimensions")
                }
            }
            AssetClass::Plain16 | AssetClass::Compressed => pixels,
        };

        (pixels, class.target_format())
    }
}

#[cfg(feature = "image")]
impl TextureImportPipeline {
    /// Creates a pipeline from a decoded image, expanding every 8-bit channel
    /// to full floating point precision before any processing.
    pub fn from_rgba_image(image: &RgbaImage, class: AssetClass) -> Self {
        let len = image.pixels().len();
        let buf = &image.as_raw()[..(len * 4)];
        let raw: &[Srgba<u8>] = buf.components_as();
        let pixels = raw.iter().map(|&c| c.into_format::<f32, f32>()).collect();
        Self::new_unchecked(pixels, image.width(), image.height(), class)
    }

    /// Runs the pipeline and re-encodes the result as an 8-bit image.
    ///
    /// For the dithering class every output byte is a multiple of 17,
    /// since quantization level `k` maps back to the byte `k * 17`.
    #[must_use]
    pub fn quantized_rgba_image(self) -> RgbaImage {
        let (width, height) = self.dimensions;
        let (pixels, _) = self.run();

        let buf = pixels
            .into_iter()
            .map(|c| c.into_format::<u8, u8>())
            .collect::<Vec<_>>()
            .into_components();

        #[allow(clippy::expect_used)]
        {
            // pixels.len() is equal to width * height,
            // so buf is large enough by nature of its construction
            RgbaImage::from_vec(width, height, buf).expect("large enough buffer")
        }
    }
}

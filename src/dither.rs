//! Contains the Floyd–Steinberg dither engine.

use crate::{ColorComponents, InvalidInput, CHANNEL_LEVELS, MAX_LEVEL};
use palette::cast::AsArraysMut;
use palette::Srgba;
use std::array;

/// The value of quantization level 1; level `k` has the value `k * LEVEL_STEP`.
///
/// Note the asymmetry with the bucketing multiplier in [`quantize_channel`]:
/// a channel is bucketed by multiplying by 16 and flooring, but normalized by
/// dividing by 15, so that an input of `1.0` lands on level 15 with value `1.0`.
const LEVEL_STEP: f32 = 1.0 / MAX_LEVEL as f32;

/// Floyd–Steinberg dithering to the 16-level (4-bit) per-channel lattice.
///
/// Pixels are visited in raster scan order, left to right, top to bottom.
/// Each channel is quantized independently and the residual is diffused
/// additively into the unprocessed neighbors with the classic weights
/// (east 7/16, south 5/16, south-west 3/16, south-east 1/16).
/// Error that would diffuse off-canvas is discarded, not redistributed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloydSteinberg;

impl FloydSteinberg {
    /// Creates a new [`FloydSteinberg`] ditherer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Dithers the pixel buffer in place, quantizing every channel to the
    /// 16-level lattice `{0/15, 1/15, ..., 15/15}`.
    ///
    /// Input channels are expected to lie in `[0.0, 1.0]`, but out-of-range
    /// values are clamped rather than rejected, so the transform is total
    /// over any buffer of the right length.
    ///
    /// # Errors
    /// Returns [`InvalidInput`] if `pixels.len() != width * height`,
    /// in which case the buffer is left untouched.
    pub fn dither<Color, const N: usize>(
        &self,
        pixels: &mut [Color],
        width: u32,
        height: u32,
    ) -> Result<(), InvalidInput>
    where
        Color: ColorComponents<f32, N>,
    {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(InvalidInput { expected, found: pixels.len() });
        }

        dither_in_place(pixels.as_arrays_mut(), width as usize, height as usize);
        Ok(())
    }

    /// Dithers an RGBA buffer, consuming it and returning the quantized pixels.
    ///
    /// The alpha channel is treated the same as the color channels.
    ///
    /// # Errors
    /// Returns [`InvalidInput`] if `pixels.len() != width * height`.
    pub fn dither_rgba(
        &self,
        mut pixels: Vec<Srgba<f32>>,
        width: u32,
        height: u32,
    ) -> Result<Vec<Srgba<f32>>, InvalidInput> {
        self.dither(&mut pixels, width, height)?;
        Ok(pixels)
    }
}

/// Quantizes one channel value to the nearest-below lattice level.
///
/// The input may already include diffused error and lie outside `[0.0, 1.0]`;
/// the floor and clamp make the result well defined for any finite value.
#[inline]
#[allow(clippy::cast_precision_loss)]
fn quantize_channel(v: f32) -> f32 {
    ((v * CHANNEL_LEVELS as f32).floor() * LEVEL_STEP).clamp(0.0, 1.0)
}

/// Multiplies `other` by a scalar, `alpha`, and adds the result to `arr`.
#[inline]
fn arr_mul_add_assign<const N: usize>(arr: &mut [f32; N], alpha: f32, other: [f32; N]) {
    for i in 0..N {
        arr[i] += alpha * other[i];
    }
}

/// Runs the error diffusion pass over a buffer of pixels in row-major order.
///
/// The scan must stay strictly sequential: diffusion targets are always at a
/// greater raster index, so every pixel has received all of its contributions
/// by the time it is quantized.
fn dither_in_place<const N: usize>(pixels: &mut [[f32; N]], width: usize, height: usize) {
    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;

            let original = pixels[i];
            let quantized = original.map(quantize_channel);
            let error: [f32; N] = array::from_fn(|c| original[c] - quantized[c]);
            pixels[i] = quantized;

            if x + 1 < width {
                arr_mul_add_assign(&mut pixels[i + 1], 7.0 / 16.0, error);
            }
            if y + 1 < height {
                arr_mul_add_assign(&mut pixels[i + width], 5.0 / 16.0, error);
                if x > 0 {
                    arr_mul_add_assign(&mut pixels[i + width - 1], 3.0 / 16.0, error);
                }
                if x + 1 < width {
                    arr_mul_add_assign(&mut pixels[i + width + 1], 1.0 / 16.0, error);
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::tests::*;
    use palette::cast::AsArrays;

    fn channels(pixels: &[Srgba<f32>]) -> impl Iterator<Item = f32> + '_ {
        pixels.as_arrays().iter().flatten().copied()
    }

    #[test]
    fn output_channels_are_on_the_lattice() {
        let levels = (0..=15)
            .map(|k| (k as f32 * LEVEL_STEP).clamp(0.0, 1.0))
            .collect::<Vec<_>>();

        let pixels = test_pixels(31 * 17);
        let pixels = FloydSteinberg::new().dither_rgba(pixels, 31, 17).unwrap();

        for v in channels(&pixels) {
            assert!(levels.contains(&v), "{v} is not one of the 16 levels");
        }
    }

    #[test]
    fn dimensions_are_preserved() {
        let pixels = test_pixels(12 * 5);
        let pixels = FloydSteinberg::new().dither_rgba(pixels, 12, 5).unwrap();
        assert_eq!(pixels.len(), 12 * 5);
    }

    #[test]
    fn deterministic() {
        let pixels = test_pixels(24 * 24);
        let a = FloydSteinberg::new()
            .dither_rgba(pixels.clone(), 24, 24)
            .unwrap();
        let b = FloydSteinberg::new().dither_rgba(pixels, 24, 24).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn mismatched_length_is_invalid_input() {
        let mut pixels = flat_pixels(0.5, 5);
        let before = pixels.clone();

        let result = FloydSteinberg::new().dither(&mut pixels, 2, 3);
        assert_eq!(result, Err(InvalidInput { expected: 6, found: 5 }));
        // no partial transform is applied
        assert_eq!(pixels, before);
    }

    #[test]
    fn zero_area_image_is_a_noop() {
        let pixels = FloydSteinberg::new().dither_rgba(Vec::new(), 0, 0).unwrap();
        assert!(pixels.is_empty());
    }

    #[test]
    fn single_pixel_discards_its_error() {
        // floor(0.6 * 16) / 15 = 9 / 15 = 0.6 exactly
        let pixels = flat_pixels(0.6, 1);
        let pixels = FloydSteinberg::new().dither_rgba(pixels, 1, 1).unwrap();
        assert_eq!(pixels[0], Srgba::new(0.6, 0.6, 0.6, 0.6));
    }

    #[test]
    fn flat_black_is_unchanged() {
        let pixels = flat_pixels(0.0, 4 * 4);
        let pixels = FloydSteinberg::new().dither_rgba(pixels, 4, 4).unwrap();
        assert!(channels(&pixels).all(|v| v == 0.0));
    }

    #[test]
    fn flat_white_clamps_to_one() {
        // bucket = floor(16.0) = 16, so the clamp engages: clamp01(16 / 15) = 1.0
        let pixels = flat_pixels(1.0, 2 * 2);
        let pixels = FloydSteinberg::new().dither_rgba(pixels, 2, 2).unwrap();
        assert!(channels(&pixels).all(|v| v == 1.0));
    }

    #[test]
    fn lattice_values_are_fixed_points() {
        let pixels = (0..16)
            .map(|k| {
                let v = (k as f32 * LEVEL_STEP).clamp(0.0, 1.0);
                Srgba::new(v, v, v, v)
            })
            .collect::<Vec<_>>();

        let dithered = FloydSteinberg::new()
            .dither_rgba(pixels.clone(), 4, 4)
            .unwrap();
        assert_eq!(pixels, dithered);
    }

    #[test]
    fn saturated_pixel_diffuses_nothing() {
        // a channel of exactly 1.0 quantizes to 1.0 with zero residual,
        // so a black field around it stays black
        let mut pixels = flat_pixels(0.0, 3 * 3);
        pixels[0].red = 1.0;
        let expected = pixels.clone();

        let pixels = FloydSteinberg::new().dither_rgba(pixels, 3, 3).unwrap();
        assert_eq!(pixels, expected);
    }

    #[test]
    fn east_neighbor_receives_seven_sixteenths() {
        let pixels = flat_pixels(0.5, 2);
        let pixels = FloydSteinberg::new().dither_rgba(pixels, 2, 1).unwrap();

        let q0 = quantize_channel(0.5);
        let q1 = quantize_channel(0.5 + (0.5 - q0) * (7.0 / 16.0));
        assert_eq!(pixels[0], Srgba::new(q0, q0, q0, q0));
        assert_eq!(pixels[1], Srgba::new(q1, q1, q1, q1));
    }

    #[test]
    fn south_row_receives_weighted_residuals() {
        // a sub-threshold source at (1, 0) quantizes to level 0 and diffuses
        // its entire value; the bottom row sits just below the 9/16 bucket
        // boundary, so each weighted contribution decides a bucket and a
        // wrong weight lands on a different level
        let pixels = [0.0f32, 0.06, 0.0, 0.55, 0.55, 0.56]
            .map(|v| Srgba::new(v, v, v, v))
            .to_vec();
        let pixels = FloydSteinberg::new().dither_rgba(pixels, 3, 2).unwrap();

        // replay the scan: (1, 0) spreads e1 east/south/south-west/south-east,
        // (2, 0) spreads e2 south and south-west, and the bottom row chains
        // its own residuals eastward as it quantizes
        let q1 = quantize_channel(0.06);
        let e1 = 0.06 - q1;
        let v2 = e1 * (7.0 / 16.0);
        let q2 = quantize_channel(v2);
        let e2 = v2 - q2;

        let v3 = 0.55 + e1 * (3.0 / 16.0);
        let q3 = quantize_channel(v3);
        let e3 = v3 - q3;

        let v4 = 0.55 + e1 * (5.0 / 16.0) + e2 * (3.0 / 16.0) + e3 * (7.0 / 16.0);
        let q4 = quantize_channel(v4);
        let e4 = v4 - q4;

        let v5 = 0.56 + e1 * (1.0 / 16.0) + e2 * (5.0 / 16.0) + e4 * (7.0 / 16.0);
        let q5 = quantize_channel(v5);

        // the source and its east neighbor both floor to level 0
        assert_eq!(q1, 0.0);
        assert_eq!(q2, 0.0);
        // 3/16 of e1 is not enough to tip (0, 1) over the boundary,
        // while 5/16 (plus the chained terms) tips (1, 1) and (2, 1)
        assert_eq!(q3, 8.0 * LEVEL_STEP);
        assert_eq!(q4, 9.0 * LEVEL_STEP);
        assert_eq!(q5, 9.0 * LEVEL_STEP);

        let expected = [0.0, q1, q2, q3, q4, q5];
        for (i, (pixel, q)) in pixels.iter().zip(expected).enumerate() {
            assert_eq!(*pixel, Srgba::new(q, q, q, q), "pixel {i}");
        }
    }

    #[test]
    fn bright_corner_pixel_bleeds_into_neighbors() {
        // (0, 0) sits at the left edge, so only the east, south,
        // and south-east neighbors receive error (no south-west target)
        let mut pixels = flat_pixels(0.0, 3 * 3);
        pixels[0].red = 0.9;

        let pixels = FloydSteinberg::new().dither_rgba(pixels, 3, 3).unwrap();

        // bucket = floor(0.9 * 16) = 14
        assert_eq!(pixels[0].red, 14.0 * LEVEL_STEP);
        // the residual is negative, so every diffusion target floors below
        // zero and clamps back to level 0
        for (i, pixel) in pixels.iter().enumerate().skip(1) {
            assert_eq!(*pixel, Srgba::new(0.0, 0.0, 0.0, 0.0), "pixel {i}");
        }
        assert_eq!(pixels[0].green, 0.0);
        assert_eq!(pixels[0].alpha, 0.0);
    }

    #[test]
    fn uniform_gray_conserves_error_up_to_boundary_discard() {
        let (width, height) = (16usize, 16usize);
        let pixels = flat_pixels(0.5, width * height);

        let sum_in: f64 = pixels.iter().map(|p| f64::from(p.red)).sum();
        let pixels = FloydSteinberg::new()
            .dither_rgba(pixels, width as u32, height as u32)
            .unwrap();
        let sum_out: f64 = pixels.iter().map(|p| f64::from(p.red)).sum();

        // replay the scan on one channel, collecting the error that falls
        // off-canvas at the right and bottom edges instead of dropping it
        let mut values = vec![0.5f32; width * height];
        let mut discarded = 0.0f64;
        for y in 0..height {
            for x in 0..width {
                let i = y * width + x;
                let q = quantize_channel(values[i]);
                let e = values[i] - q;
                values[i] = q;

                let east = e * (7.0 / 16.0);
                let south = e * (5.0 / 16.0);
                let south_west = e * (3.0 / 16.0);
                let south_east = e * (1.0 / 16.0);

                if x + 1 < width {
                    values[i + 1] += east;
                } else {
                    discarded += f64::from(east);
                }
                if y + 1 < height {
                    values[i + width] += south;
                    if x > 0 {
                        values[i + width - 1] += south_west;
                    } else {
                        discarded += f64::from(south_west);
                    }
                    if x + 1 < width {
                        values[i + width + 1] += south_east;
                    } else {
                        discarded += f64::from(south_east);
                    }
                } else {
                    discarded += f64::from(south) + f64::from(south_west) + f64::from(south_east);
                }
            }
        }

        // the replay runs the same float operations in the same order,
        // so the engine's channel values must match it exactly
        for (pixel, &v) in pixels.iter().zip(&values) {
            assert_eq!(pixel.red, v);
        }

        // boundary discard accounts for the entire deficit, up to the
        // rounding of the f32 additions inside the pass
        let deficit = sum_in - sum_out;
        assert!(discarded > 0.0);
        assert!(
            (deficit - discarded).abs() < 1e-3,
            "deficit {deficit} vs discarded {discarded}"
        );
    }
}

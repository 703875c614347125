//! Contains various types needed across the crate.

use palette::cast::ArrayCast;
use std::{error::Error, fmt::Display};

/// An error type for when the length of a pixel buffer does not match
/// the declared image dimensions.
///
/// This is the only error the dither engine reports. All other conditions
/// (channel values pushed outside `[0.0, 1.0]` by accumulated error,
/// zero-sized dimensions) are handled by clamping rather than failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidInput {
    /// The buffer length implied by the declared width and height.
    pub expected: usize,
    /// The length of the pixel buffer that was supplied.
    pub found: usize,
}

impl Display for InvalidInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "pixel buffer has length {} but the declared dimensions imply {}",
            self.found, self.expected
        )
    }
}

impl Error for InvalidInput {}

/// A marker trait for color types that can be cast to and from
/// an array of `N` components.
///
/// [`palette::Srgba<f32>`] implements `ColorComponents<f32, 4>`,
/// which is what the texture import adapter works with,
/// but the dither engine accepts any channel count.
pub trait ColorComponents<Component, const N: usize>:
    ArrayCast<Array = [Component; N]> + Copy + 'static
{
}

impl<Color, Component, const N: usize> ColorComponents<Component, N> for Color where
    Color: ArrayCast<Array = [Component; N]> + Copy + 'static
{
}

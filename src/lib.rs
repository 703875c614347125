//! A library for reducing RGBA images to 4 bits per channel with Floyd–Steinberg dithering.
//!
//! `dither4444` pre-quantizes every channel of a full precision RGBA raster to one of
//! 16 discrete levels, diffusing the quantization error to neighboring pixels so that
//! the result survives conversion to an RGBA4444 texture format without visible banding.
//!
//! # Features
//! To reduce dependencies and compile times, `dither4444` has `cargo` features
//! that can be turned off or on:
//! - `pipelines`: exposes the texture import adapter (path classification,
//!   per-class import settings, and the [`TextureImportPipeline`] builder struct).
//! - `image`: enables integration with the [`image`] crate.
//!
//! # Dither Engine
//! The core of the crate is [`FloydSteinberg`], a pure transform over a pixel buffer:
//! ```
//! # use dither4444::{FloydSteinberg, InvalidInput};
//! # use palette::Srgba;
//! # fn main() -> Result<(), InvalidInput> {
//! let pixels = vec![Srgba::new(0.2f32, 0.4, 0.6, 1.0); 8 * 8];
//! let quantized = FloydSteinberg::new().dither_rgba(pixels, 8, 8)?;
//! assert_eq!(quantized.len(), 8 * 8);
//! # Ok(())
//! # }
//! ```
//!
//! Every channel of the output lies on the 16-level lattice `{0/15, 1/15, ..., 15/15}`.
//!
//! # Import Adapter
//! The `pipelines` feature adds the boundary glue that decides, from an asset's
//! storage path, whether the dither pass applies and which import settings the
//! asset gets. See [`TextureImportPipeline`] and [`classify_path`].

#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::pedantic,
    clippy::cargo,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    clippy::unwrap_in_result,
    clippy::expect_used,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice,
    missing_docs,
    clippy::missing_docs_in_private_items,
    rustdoc::all,
    clippy::float_cmp_const,
    clippy::lossy_float_literal
)]
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::many_single_char_names,
    clippy::missing_panics_doc,
    clippy::unreadable_literal,
    clippy::wildcard_imports
)]

mod dither;
mod types;

#[cfg(feature = "pipelines")]
mod api;

pub use dither::FloydSteinberg;
pub use types::*;

#[cfg(feature = "pipelines")]
pub use api::*;

/// The number of quantization levels per channel (4-bit depth).
pub const CHANNEL_LEVELS: u32 = 16;

/// The greatest quantization level, `CHANNEL_LEVELS - 1`.
///
/// A channel at level `k` has the value `k / 15.0`,
/// so the maximum input value `1.0` maps to level `15` exactly.
pub const MAX_LEVEL: u32 = CHANNEL_LEVELS - 1;

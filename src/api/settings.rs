//! Per-class import settings, expressed as declarative configuration records.

use super::AssetClass;

/// The storage format a texture is imported into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// Uncompressed 32 bits per pixel. Used as the pre-dither expansion
    /// format so the dither engine sees full precision channel data.
    Rgba32,
    /// The platform's automatic 16-bit format (4 bits per channel for RGBA).
    Automatic16,
    /// The platform's automatic compressed format.
    AutomaticCompressed,
}

/// Texture sampling filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterMode {
    /// Nearest-neighbor sampling.
    Point,
    /// Bilinear interpolation.
    Bilinear,
    /// Trilinear interpolation across mip levels.
    Trilinear,
}

/// Texture coordinate wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Tile the texture.
    Repeat,
    /// Clamp coordinates to the edge.
    Clamp,
}

/// The cap on a texture's largest dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum MaxTextureSize {
    /// 16 pixels.
    Size16 = 16,
    /// 32 pixels.
    Size32 = 32,
    /// 64 pixels.
    Size64 = 64,
    /// 128 pixels.
    Size128 = 128,
    /// 256 pixels.
    Size256 = 256,
    /// 512 pixels.
    Size512 = 512,
    /// 1024 pixels.
    Size1024 = 1024,
    /// 2048 pixels.
    Size2048 = 2048,
}

/// The full set of import settings applied to a classified texture asset.
///
/// Every class shares the same base sprite settings; only the storage
/// format varies by class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSettings {
    /// The sprite atlas packing tag (see [`super::packing_tag`]).
    pub packing_tag: String,
    /// The storage format the asset is imported into.
    pub format: TextureFormat,
    /// The sampling filter.
    pub filter: FilterMode,
    /// The coordinate wrap mode.
    pub wrap: WrapMode,
    /// Whether mipmaps are generated.
    pub mipmaps: bool,
    /// Whether the texture stays CPU-readable after import.
    pub readable: bool,
    /// The anisotropic filtering level.
    pub aniso_level: u8,
    /// The cap on the largest texture dimension.
    pub max_size: MaxTextureSize,
}

impl ImportSettings {
    /// The import settings record for the given class.
    ///
    /// For [`AssetClass::Dither16`] the returned format is the full precision
    /// [`TextureFormat::Rgba32`]: the asset must be expanded to 32 bits per
    /// pixel before the dither pass runs, and is switched to the format from
    /// [`AssetClass::target_format`] afterwards.
    #[must_use]
    pub fn for_class(class: AssetClass, packing_tag: impl Into<String>) -> Self {
        let format = match class {
            AssetClass::Dither16 => TextureFormat::Rgba32,
            AssetClass::Plain16 => TextureFormat::Automatic16,
            AssetClass::Compressed => TextureFormat::AutomaticCompressed,
        };

        Self {
            packing_tag: packing_tag.into(),
            format,
            filter: FilterMode::Bilinear,
            wrap: WrapMode::Clamp,
            mipmaps: false,
            readable: false,
            aniso_level: 0,
            max_size: MaxTextureSize::Size2048,
        }
    }
}

impl AssetClass {
    /// The storage format an asset of this class ends up in once import
    /// (including the dither pass, where applicable) has finished.
    #[must_use]
    pub fn target_format(self) -> TextureFormat {
        match self {
            AssetClass::Dither16 | AssetClass::Plain16 => TextureFormat::Automatic16,
            AssetClass::Compressed => TextureFormat::AutomaticCompressed,
        }
    }
}

//! Contains the types and functions for the texture import adapter.

mod classify;
mod pipeline;
mod settings;

pub use classify::{classify_path, packing_tag, AssetClass, Classification, UI_ROOT_DIRECTORY};
pub use pipeline::TextureImportPipeline;
pub use settings::{FilterMode, ImportSettings, MaxTextureSize, TextureFormat, WrapMode};

//! Directory-based classification of texture assets.
//!
//! An asset's storage path decides how it is imported: the name of the
//! directory directly containing the asset selects an [`AssetClass`],
//! and the directory above that one supplies the sprite packing tag.
//! The exact directory names are policy data, kept in one table here.

use std::path::Path;

/// The root directory that classified texture assets live under.
///
/// Paths outside this root are not touched by the import adapter.
pub const UI_ROOT_DIRECTORY: &str = "Assets/Images";

/// How a texture asset should be imported, selected by its parent directory name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetClass {
    /// Reduce to 16-bit color with Floyd–Steinberg dithering.
    Dither16,
    /// Reduce to 16-bit color without dithering.
    Plain16,
    /// Store in the platform's compressed texture format.
    Compressed,
}

/// The table mapping trailing directory names to asset classes.
const CLASS_DIRECTORIES: [(&str, AssetClass); 3] = [
    ("Dither", AssetClass::Dither16),
    ("Default", AssetClass::Plain16),
    ("Compressed", AssetClass::Compressed),
];

impl AssetClass {
    /// The directory name that selects this class.
    #[must_use]
    pub fn directory(self) -> &'static str {
        #[allow(clippy::expect_used)]
        {
            // every class has exactly one row in the table
            CLASS_DIRECTORIES
                .iter()
                .find(|&&(_, class)| class == self)
                .map(|&(name, _)| name)
                .expect("class present in table")
        }
    }
}

/// The outcome of classifying an asset path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The asset sits in a recognized class directory under the UI root.
    Class(AssetClass),
    /// The asset is under the UI root but its directory is not in the table.
    ///
    /// This is a configuration warning, not an error: the asset should be
    /// moved into one of the recognized directories.
    UnrecognizedDirectory,
    /// The asset is outside the UI root and is left alone.
    OutsideRoot,
}

/// Classifies an asset path by the name of the directory containing it.
///
/// ```
/// # use dither4444::{classify_path, AssetClass, Classification};
/// # use std::path::Path;
/// let class = classify_path(Path::new("Assets/Images/Battle/Dither/icon.png"));
/// assert_eq!(class, Classification::Class(AssetClass::Dither16));
/// ```
#[must_use]
pub fn classify_path(path: &Path) -> Classification {
    if !path.starts_with(UI_ROOT_DIRECTORY) {
        return Classification::OutsideRoot;
    }

    let directory = path
        .parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str());

    match directory {
        Some(directory) => CLASS_DIRECTORIES
            .iter()
            .find(|&&(name, _)| name == directory)
            .map_or(Classification::UnrecognizedDirectory, |&(_, class)| {
                Classification::Class(class)
            }),
        None => Classification::UnrecognizedDirectory,
    }
}

/// Returns the sprite packing tag for an asset path: the name of the
/// directory that contains the class directory.
///
/// Returns `None` if the path is too shallow to have one.
#[must_use]
pub fn packing_tag(path: &Path) -> Option<&str> {
    path.parent()?.parent()?.file_name()?.to_str()
}

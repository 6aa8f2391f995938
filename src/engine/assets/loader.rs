// Asset loading functionality

use super::{AssetError, SpriteSheet};
use std::path::{Path, PathBuf};

/// Asset loader responsible for finding sprite sheets on disk
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }

    /// Check if an asset exists
    pub fn exists(&self, name: &str) -> bool {
        self.resolve_path(name).exists()
    }

    /// Read a sprite sheet's dimensions and describe it as a tile grid.
    ///
    /// Only the image header is decoded; pixel upload is up to the renderer.
    pub fn load_sprite_sheet(&self, name: &str, tile_size: u32) -> Result<SpriteSheet, AssetError> {
        let path = self.resolve_path(name);

        if !path.exists() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
        }

        let (width, height) = image::image_dimensions(&path)
            .map_err(|e| AssetError::Decode(format!("{}: {}", path.display(), e)))?;

        log::info!(
            "Loaded sprite sheet {} ({}x{}, {}px tiles)",
            name,
            width,
            height,
            tile_size
        );

        SpriteSheet::new(width, height, tile_size)
    }
}

// Asset loading
//
// Sprite sheets are read once while a character is built and sliced into
// tile rects. The simulation only ever sees those rects.

mod atlas;
mod loader;

pub use atlas::{FrameRect, SpriteSheet};
pub use loader::AssetLoader;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to decode asset: {0}")]
    Decode(String),

    #[error("Invalid sprite sheet: {width}x{height} with {tile_size}px tiles")]
    InvalidSheet {
        width: u32,
        height: u32,
        tile_size: u32,
    },

    #[error("Tile ({column}, {row}) is outside a {columns}x{rows} sheet")]
    TileOutOfBounds {
        column: u32,
        row: u32,
        columns: u32,
        rows: u32,
    },
}

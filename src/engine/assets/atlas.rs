// Sprite sheet slicing into fixed-size tiles

use glam::Vec2;

use super::AssetError;

/// A tile within a sprite sheet; used as the frame identifier for animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRect {
    /// Position in the sheet (pixels)
    pub x: u32,
    pub y: u32,

    /// Size of the tile (pixels)
    pub width: u32,
    pub height: u32,
}

impl FrameRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// UV coordinates (0.0 to 1.0) of this tile within a sheet of the given
    /// size, returned as (min, max)
    pub fn uvs(&self, sheet_width: u32, sheet_height: u32) -> (Vec2, Vec2) {
        let uv_min = Vec2::new(
            self.x as f32 / sheet_width as f32,
            self.y as f32 / sheet_height as f32,
        );
        let uv_max = Vec2::new(
            (self.x + self.width) as f32 / sheet_width as f32,
            (self.y + self.height) as f32 / sheet_height as f32,
        );
        (uv_min, uv_max)
    }

    /// UVs with u swapped, for drawing the tile mirrored horizontally
    pub fn mirrored_uvs(&self, sheet_width: u32, sheet_height: u32) -> (Vec2, Vec2) {
        let (min, max) = self.uvs(sheet_width, sheet_height);
        (Vec2::new(max.x, min.y), Vec2::new(min.x, max.y))
    }
}

/// A sprite sheet laid out as a grid of equally sized square tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSheet {
    /// Width of the sheet in pixels
    pub width: u32,

    /// Height of the sheet in pixels
    pub height: u32,

    /// Edge length of one tile in pixels
    pub tile_size: u32,
}

impl SpriteSheet {
    /// Describe a sheet of the given pixel size
    pub fn new(width: u32, height: u32, tile_size: u32) -> Result<Self, AssetError> {
        if tile_size == 0 || width < tile_size || height < tile_size {
            return Err(AssetError::InvalidSheet {
                width,
                height,
                tile_size,
            });
        }
        Ok(Self {
            width,
            height,
            tile_size,
        })
    }

    /// Describe a sheet by its grid size instead of its pixel size
    pub fn from_grid(columns: u32, rows: u32, tile_size: u32) -> Result<Self, AssetError> {
        Self::new(columns * tile_size, rows * tile_size, tile_size)
    }

    /// Number of whole tile columns
    pub fn columns(&self) -> u32 {
        self.width / self.tile_size
    }

    /// Number of whole tile rows
    pub fn rows(&self) -> u32 {
        self.height / self.tile_size
    }

    /// The tile at `column`, `row`, if it lies inside the sheet
    pub fn tile(&self, column: u32, row: u32) -> Option<FrameRect> {
        if column >= self.columns() || row >= self.rows() {
            return None;
        }
        Some(FrameRect::new(
            column * self.tile_size,
            row * self.tile_size,
            self.tile_size,
            self.tile_size,
        ))
    }

    /// Consecutive tiles of one row, `columns` given as a range
    pub fn row_tiles(
        &self,
        row: u32,
        columns: std::ops::Range<u32>,
    ) -> Result<Vec<FrameRect>, AssetError> {
        columns
            .map(|column| {
                self.tile(column, row).ok_or(AssetError::TileOutOfBounds {
                    column,
                    row,
                    columns: self.columns(),
                    rows: self.rows(),
                })
            })
            .collect()
    }
}

// The cat fighter's clip set
//
// Sheet layout (64px tiles): row 0 idle, row 1 walk, row 2 jump (tiles 0-3)
// followed by landing (tiles 4-7).

use crate::engine::assets::{AssetError, FrameRect, SpriteSheet};

use super::animation::{AnimationClip, AnimationError, ClipSet};
use super::stats::MoveSet;

/// Columns and rows the cat's sheet must provide
pub const SHEET_COLUMNS: u32 = 8;
pub const SHEET_ROWS: u32 = 3;

const IDLE_FRAME_TIME: f32 = 0.1;
const WALK_FRAME_TIME: f32 = 0.05;

/// Hangs on the last frame while airborne
const JUMP_TIMINGS: [f32; 4] = [0.05, 0.05, 0.5, 100.0];

/// Holds the crouch frame; one full pass ends the recovery
const LANDING_TIMINGS: [f32; 4] = [0.0, 0.0, 0.7, 0.05];

/// Errors raised while building a character's clip set from a sheet
#[derive(Debug, thiserror::Error)]
pub enum ClipSetError {
    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Animation(#[from] AnimationError),
}

/// Build the clips a cat with `move_set` needs from its sprite sheet
pub fn cat_clips(
    sheet: &SpriteSheet,
    move_set: MoveSet,
) -> Result<ClipSet<FrameRect>, ClipSetError> {
    let mut clips = ClipSet::new()
        .with_clip(
            "idle",
            AnimationClip::uniform(sheet.row_tiles(0, 0..4)?, IDLE_FRAME_TIME)?,
        )
        .with_clip(
            "walk",
            AnimationClip::uniform(sheet.row_tiles(1, 0..8)?, WALK_FRAME_TIME)?,
        );

    if move_set.can_jump() {
        clips.insert(
            "jump",
            AnimationClip::new(sheet.row_tiles(2, 0..4)?, JUMP_TIMINGS.to_vec())?,
        );
        clips.insert(
            "landing",
            AnimationClip::new(sheet.row_tiles(2, 4..8)?, LANDING_TIMINGS.to_vec())?,
        );
    }

    Ok(clips)
}

/// The sheet geometry the cat's clips are laid out on
pub fn default_sheet(tile_size: u32) -> Result<SpriteSheet, AssetError> {
    SpriteSheet::from_grid(SHEET_COLUMNS, SHEET_ROWS, tile_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> SpriteSheet {
        default_sheet(64).unwrap()
    }

    #[test]
    fn test_full_clip_set() {
        let clips = cat_clips(&sheet(), MoveSet::Full).unwrap();
        assert_eq!(clips.len(), 4);
        assert!(clips.require(MoveSet::Full.required_clips()).is_ok());

        let walk = clips.get("walk").unwrap();
        assert_eq!(walk.frame_count(), 8);
        assert_eq!(walk.frames()[0], FrameRect::new(0, 64, 64, 64));
    }

    #[test]
    fn test_basic_clip_set() {
        let clips = cat_clips(&sheet(), MoveSet::Basic).unwrap();
        assert_eq!(clips.len(), 2);
        assert!(!clips.contains("jump"));
    }

    #[test]
    fn test_jump_hangs_on_last_frame() {
        let mut clips = cat_clips(&sheet(), MoveSet::Full).unwrap();
        let jump = clips.get_mut("jump").unwrap();
        jump.advance(2.0);
        assert_eq!(*jump.current_frame(), FrameRect::new(192, 128, 64, 64));
        assert_eq!(jump.repetitions(), 0);
    }

    #[test]
    fn test_landing_starts_on_crouch() {
        let mut clips = cat_clips(&sheet(), MoveSet::Full).unwrap();
        let landing = clips.get_mut("landing").unwrap();
        assert_eq!(*landing.current_frame(), FrameRect::new(256, 128, 64, 64));
        landing.advance(0.1);
        assert_eq!(*landing.current_frame(), FrameRect::new(384, 128, 64, 64));
    }

    #[test]
    fn test_sheet_too_small() {
        let small = SpriteSheet::from_grid(4, 3, 64).unwrap();
        let err = cat_clips(&small, MoveSet::Basic).unwrap_err();
        assert!(matches!(err, ClipSetError::Asset(_)));
    }
}

use std::time::Instant;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use cat_fighter::engine::assets::{AssetError, AssetLoader, FrameRect, SpriteSheet};
use cat_fighter::engine::game_loop::GameLoop;
use cat_fighter::engine::input::{Action, InputManager};
use cat_fighter::game::characters::{cat, CharacterManager, CharacterStats, MoveSet};

const ASSET_DIR: &str = "assets";
const CAT_SHEET: &str = "cat/cat_fighter_base.png";

/// Environment variable selecting the cat's move set ("basic" or "full")
const MOVE_SET_VAR: &str = "CAT_MOVE_SET";

/// Move set requested through the environment, `Full` when unset or unknown
fn move_set_from_env() -> MoveSet {
    match std::env::var(MOVE_SET_VAR) {
        Ok(name) => MoveSet::from_name(&name).unwrap_or_else(|| {
            warn!("Unknown move set {:?} in {}, using full", name, MOVE_SET_VAR);
            MoveSet::default()
        }),
        Err(_) => MoveSet::default(),
    }
}

/// Load the cat's sprite sheet, falling back to its bare geometry when the
/// image is not on disk
fn load_cat_sheet(stats: &CharacterStats) -> Result<SpriteSheet> {
    let loader = AssetLoader::new(ASSET_DIR);
    match loader.load_sprite_sheet(CAT_SHEET, stats.tile_size) {
        Ok(sheet) => Ok(sheet),
        Err(AssetError::NotFound(path)) => {
            warn!("Sprite sheet {} not found, using default layout", path);
            Ok(cat::default_sheet(stats.tile_size)?)
        }
        Err(e) => Err(e).context("loading cat sprite sheet"),
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting Fighting Game...");

    let stats = CharacterStats::standard();
    let move_set = move_set_from_env();
    let sheet = load_cat_sheet(&stats)?;
    let clips = cat::cat_clips(&sheet, move_set).context("building cat animations")?;

    let mut characters: CharacterManager<FrameRect> = CharacterManager::new();
    let player = characters.spawn_character("cat", Some(0), stats, move_set, clips)?;

    let mut input = InputManager::new(1);
    let mut game_loop = GameLoop::new();

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Fighting Game")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(false)
        .build(&event_loop)?;

    info!("Window created successfully");

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => {
                // Key releases are lost while unfocused
                input.reset_all();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => match input.process_keyboard_event(&event) {
                Some(Action::Pause) => game_loop.toggle_pause(),
                Some(Action::Quit) => {
                    info!("Quit requested, shutting down...");
                    elwt.exit();
                }
                _ => {}
            },
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                if let Some(frametime) = game_loop.begin_frame() {
                    characters.update(frametime, |player_id| input.snapshot(player_id));
                }

                // Drawing is left to the renderer; report what it would draw
                if let Some(fighter) = characters.get(player) {
                    let sprite = fighter.render_frame();
                    debug!(
                        "{:?} at ({:.1}, {:.1}) frame ({}, {}) flip={} fps={:.0}",
                        fighter.state(),
                        fighter.position().x,
                        fighter.position().y,
                        sprite.frame.x,
                        sprite.frame.y,
                        sprite.flip_horizontal,
                        game_loop.fps()
                    );
                }
            }
            Event::AboutToWait => {
                // Pace ticks to the target frame rate
                let deadline = game_loop.next_frame_deadline();
                if Instant::now() >= deadline {
                    window.request_redraw();
                } else {
                    elwt.set_control_flow(ControlFlow::WaitUntil(deadline));
                }
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}

// Engine modules: assets, input, frame clock

pub mod assets;
pub mod game_loop;
pub mod input;

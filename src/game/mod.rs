// Game modules: characters

pub mod characters;

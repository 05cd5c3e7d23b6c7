pub mod config;
pub mod engine;
pub mod game;
pub mod renderer;
pub mod sim;
pub mod world;

pub use config::{Config, ConfigError};
pub use game::Game;

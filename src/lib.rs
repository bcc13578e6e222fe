use wasm_bindgen::prelude::*;

pub mod board;
pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod game;
pub mod scoreboard;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use config::EngineConfig;
pub use error::{ConfigError, GameOver, OutOfBounds};
pub use events::{Event, EventLog, Observer};
pub use game::{Engine, Play, Rejection, Tick};
pub use types::{CellState, CursorOverlay, Input, Position, Tile, Turn};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

use wasm_bindgen::prelude::*;

pub mod board;
pub mod error;
pub mod game;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use error::{EngineError, MoveError};
pub use game::BoardEngine;
pub use types::{Cell, GameResult, GameState, MoveReport, Outcome, Player, Position, Score};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

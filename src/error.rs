//! Error types for the engine and its drivers.

use derive_more::{Display, Error};

use crate::types::{Player, Position};

/// Caller errors when naming a square.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    #[display("position ({row}, {col}) is off the board")]
    OutOfRange { row: u8, col: u8 },
    #[display("cannot read {text:?} as a square (expected e.g. d3)")]
    BadNotation { text: String },
}

/// Why a move was not applied. The engine is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    #[display("game is already over")]
    GameOver,
    #[display("it is not {player}'s turn")]
    NotYourTurn { player: Player },
    #[display("{position} is already occupied")]
    Occupied { position: Position },
    #[display("illegal move: {position} flips nothing")]
    NoFlips { position: Position },
}

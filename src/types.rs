use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use strum::{Display, EnumIter};

use crate::error::EngineError;

pub const BOARD_WIDTH: usize = 8;
pub const BOARD_LEN: usize = BOARD_WIDTH * BOARD_WIDTH;

/// Cell code used in serialized boards for an empty square.
pub const CELL_EMPTY: u8 = 0;
pub const PLAYER_BLACK: u8 = 1;
pub const PLAYER_WHITE: u8 = 2;

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Wire code shared with the view: 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Player::Black => PLAYER_BLACK,
            Player::White => PLAYER_WHITE,
        }
    }
}

/// Contents of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Cell {
    Empty,
    Black,
    White,
}

impl Cell {
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => CELL_EMPTY,
            Cell::Black => PLAYER_BLACK,
            Cell::White => PLAYER_WHITE,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }
}

/// A board coordinate. Always on the board once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub(crate) row: u8,
    pub(crate) col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Result<Self, EngineError> {
        if row as usize >= BOARD_WIDTH || col as usize >= BOARD_WIDTH {
            return Err(EngineError::OutOfRange { row, col });
        }
        Ok(Self { row, col })
    }

    /// Converts a row-major square index (0..=63).
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= BOARD_LEN {
            return None;
        }
        Some(Self {
            row: (index / BOARD_WIDTH) as u8,
            col: (index % BOARD_WIDTH) as u8,
        })
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// Row-major square index (0..=63).
    pub fn index(self) -> usize {
        self.row as usize * BOARD_WIDTH + self.col as usize
    }

    /// Every square in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_LEN).filter_map(Position::from_index)
    }
}

/// Algebraic notation: column letter then row number, so (2, 3) is `d3`.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, self.row + 1)
    }
}

impl FromStr for Position {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || EngineError::BadNotation {
            text: s.to_string(),
        };
        let bytes = s.trim().as_bytes();
        if bytes.len() != 2 {
            return Err(bad());
        }

        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(bad());
        }

        Position::new(rank - b'1', file - b'a')
    }
}

/// Piece counts; empty squares are not counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    pub black: u8,
    pub white: u8,
}

impl Score {
    /// Squares holding neither colour. Saturates for counts over 64.
    pub fn empty(self) -> u8 {
        (BOARD_LEN as u8)
            .saturating_sub(self.black)
            .saturating_sub(self.white)
    }

    /// Decides the game purely from the counts.
    pub fn outcome(self) -> Outcome {
        if self.black > self.white {
            Outcome::BlackWins
        } else if self.white > self.black {
            Outcome::WhiteWins
        } else {
            Outcome::Draw
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[strum(to_string = "black wins")]
    BlackWins,
    #[strum(to_string = "white wins")]
    WhiteWins,
    #[strum(to_string = "draw")]
    Draw,
}

impl Outcome {
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::BlackWins => Some(Player::Black),
            Outcome::WhiteWins => Some(Player::White),
            Outcome::Draw => None,
        }
    }
}

/// What a successful move did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    pub position: Position,
    pub player: Player,
    /// Flipped squares in row-major order. Never empty.
    pub flipped: Vec<Position>,
    /// The opponent had no legal reply, so `player` moves again.
    pub opponent_passed: bool,
    pub game_over: bool,
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// 64 cells, row-major: 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    pub current_player: u8,
    pub black_count: u8,
    pub white_count: u8,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the last move forced the opponent to pass.
    /// - `false` otherwise, including right after a reset.
    pub is_pass: bool,
    /// Contract:
    /// - After a move: list of flipped positions (0..=63).
    /// - After a reset: empty.
    pub flipped: Vec<u8>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// 0=draw, 1=black, 2=white.
    pub winner: u8,
    pub outcome: Outcome,
    pub black_count: u8,
    pub white_count: u8,
}

impl From<Score> for GameResult {
    fn from(score: Score) -> Self {
        let outcome = score.outcome();
        Self {
            winner: outcome.winner().map_or(CELL_EMPTY, Player::code),
            outcome,
            black_count: score.black,
            white_count: score.white,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_rejects_off_board_coordinates() {
        assert_eq!(
            Position::new(8, 0),
            Err(EngineError::OutOfRange { row: 8, col: 0 })
        );
        assert!(Position::new(0, 8).is_err());
        assert!(Position::new(7, 7).is_ok());
    }

    #[test]
    fn notation_matches_row_and_col() {
        let d3 = Position::new(2, 3).unwrap();
        assert_eq!(d3.to_string(), "d3");
        assert_eq!("d3".parse::<Position>().unwrap(), d3);
        let h8 = Position::new(7, 7).unwrap();
        assert_eq!("H8".parse::<Position>().unwrap(), h8);
        assert!("i1".parse::<Position>().is_err());
        assert!("a9".parse::<Position>().is_err());
        assert!("a10".parse::<Position>().is_err());
    }

    fn score(black: u8, white: u8) -> Score {
        Score { black, white }
    }

    #[test]
    fn outcome_compares_counts() {
        assert_eq!(score(40, 24).outcome(), Outcome::BlackWins);
        assert_eq!(score(10, 11).outcome(), Outcome::WhiteWins);
        assert_eq!(score(32, 32).outcome(), Outcome::Draw);
        assert_eq!(Outcome::BlackWins.to_string(), "black wins");
    }

    #[test]
    fn empty_count_never_underflows() {
        assert_eq!(score(2, 2).empty(), 60);
        assert_eq!(score(64, 0).empty(), 0);
        assert_eq!(score(40, 40).empty(), 0);
        assert_eq!(score(u8::MAX, u8::MAX).empty(), 0);
    }

    #[test]
    fn result_winner_codes() {
        let result = GameResult::from(Score { black: 3, white: 9 });
        assert_eq!(result.winner, PLAYER_WHITE);
        let draw = GameResult::from(Score { black: 5, white: 5 });
        assert_eq!(draw.winner, CELL_EMPTY);
        assert_eq!(draw.outcome, Outcome::Draw);
    }
}

use std::fmt;

use crate::types::{BOARD_LEN, BOARD_WIDTH, Cell, Player, Position, Score};

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Othello board state represented by two bitboards.
///
/// Bit `row * 8 + col` of each mask marks a piece of that colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    black: u64,
    white: u64,
}

impl Board {
    /// Creates the initial board:
    /// d4=white, e4=black, d5=black, e5=white.
    pub fn new() -> Self {
        Self {
            black: bit(28) | bit(35),
            white: bit(27) | bit(36),
        }
    }

    /// Builds a board from raw masks. A square set in both masks is treated as black.
    pub fn from_bitboards(black: u64, white: u64) -> Self {
        Self {
            black,
            white: white & !black,
        }
    }

    /// Contents of one square.
    pub fn cell_at(&self, pos: Position) -> Cell {
        let square = bit(pos.index());
        if (self.black & square) != 0 {
            Cell::Black
        } else if (self.white & square) != 0 {
            Cell::White
        } else {
            Cell::Empty
        }
    }

    /// Returns legal move mask for the given side.
    pub fn legal_moves(&self, player: Player) -> u64 {
        let (me, opp) = self.sides(player);
        let mut legal = 0u64;

        for pos in 0..BOARD_LEN {
            if Self::collect_flips(pos, me, opp) != 0 {
                legal |= bit(pos);
            }
        }

        legal
    }

    /// Stops at the first legal square instead of building the full mask.
    pub fn has_any_legal_move(&self, player: Player) -> bool {
        let (me, opp) = self.sides(player);
        let empty = !(me | opp);

        (0..BOARD_LEN).any(|pos| (empty & bit(pos)) != 0 && Self::brackets_any(pos, me, opp))
    }

    /// True when `pos` is empty and brackets an opposing run in some direction.
    pub fn is_valid_move(&self, pos: Position, player: Player) -> bool {
        let (me, opp) = self.sides(player);
        let index = pos.index();
        ((me | opp) & bit(index)) == 0 && Self::brackets_any(index, me, opp)
    }

    /// Places one stone and flips captured stones.
    /// Returns flipped bit mask. Returns 0 when move is illegal.
    pub fn place(&mut self, pos: Position, player: Player) -> u64 {
        let (me, opp) = self.sides(player);
        let index = pos.index();

        let flips = Self::collect_flips(index, me, opp);
        if flips == 0 {
            return 0;
        }

        let next_me = me | bit(index) | flips;
        let next_opp = opp & !flips;

        match player {
            Player::Black => {
                self.black = next_me;
                self.white = next_opp;
            }
            Player::White => {
                self.white = next_me;
                self.black = next_opp;
            }
        }

        flips
    }

    /// Black and white piece counts.
    pub fn count(&self) -> Score {
        Score {
            black: self.black.count_ones() as u8,
            white: self.white.count_ones() as u8,
        }
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        self.count().empty()
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; BOARD_LEN] {
        let mut board = [0u8; BOARD_LEN];
        for (cell, pos) in board.iter_mut().zip(Position::all()) {
            *cell = self.cell_at(pos).code();
        }
        board
    }

    /// Text diagram with `*` on every square set in `marks` that is empty.
    pub fn render(&self, marks: u64) -> String {
        let mut out = String::from("  a b c d e f g h\n");
        for row in 0..BOARD_WIDTH {
            out.push_str(&(row + 1).to_string());
            for col in 0..BOARD_WIDTH {
                let index = row * BOARD_WIDTH + col;
                let symbol = if (self.black & bit(index)) != 0 {
                    'X'
                } else if (self.white & bit(index)) != 0 {
                    'O'
                } else if (marks & bit(index)) != 0 {
                    '*'
                } else {
                    '.'
                };
                out.push(' ');
                out.push(symbol);
            }
            out.push('\n');
        }
        out
    }

    fn sides(&self, player: Player) -> (u64, u64) {
        match player {
            Player::Black => (self.black, self.white),
            Player::White => (self.white, self.black),
        }
    }

    /// Every square `pos` would flip; 0 when occupied or illegal.
    fn collect_flips(pos: usize, me: u64, opp: u64) -> u64 {
        if ((me | opp) & bit(pos)) != 0 {
            return 0;
        }

        let mut flips = 0u64;
        for (dr, dc) in DIRECTIONS {
            flips |= Self::run(pos, dr, dc, me, opp);
        }
        flips
    }

    fn brackets_any(pos: usize, me: u64, opp: u64) -> bool {
        DIRECTIONS
            .iter()
            .any(|&(dr, dc)| Self::run(pos, dr, dc, me, opp) != 0)
    }

    /// Opponent squares strictly between `pos` and the first own piece along
    /// one direction, or 0 if that direction does not bracket.
    fn run(pos: usize, dr: i32, dc: i32, me: u64, opp: u64) -> u64 {
        let (row, col) = pos_to_row_col(pos);
        let mut r = row + dr;
        let mut c = col + dc;
        let mut line = 0u64;

        while in_bounds(r, c) {
            let square = bit((r as usize) * BOARD_WIDTH + c as usize);
            if (opp & square) != 0 {
                line |= square;
            } else if (me & square) != 0 {
                return line;
            } else {
                return 0;
            }

            r += dr;
            c += dc;
        }

        0
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(0))
    }
}

fn bit(pos: usize) -> u64 {
    1u64 << pos
}

/// Squares of a mask in row-major order.
pub fn mask_positions(mask: u64) -> Vec<Position> {
    let mut bits = mask;
    let mut out = Vec::with_capacity(bits.count_ones() as usize);

    while bits != 0 {
        let idx = bits.trailing_zeros() as usize;
        out.extend(Position::from_index(idx));
        bits &= bits - 1;
    }

    out
}

fn pos_to_row_col(pos: usize) -> (i32, i32) {
    ((pos / BOARD_WIDTH) as i32, (pos % BOARD_WIDTH) as i32)
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_WIDTH as i32).contains(&row) && (0..BOARD_WIDTH as i32).contains(&col)
}

//! Turn management on top of [`Board`]: move application, passes and game end.

use tracing::{debug, info, instrument};

use crate::board::{Board, mask_positions};
use crate::error::MoveError;
use crate::types::{Cell, GameResult, GameState, MoveReport, Player, Position, Score};

/// One game of Othello: the board, whose turn it is and whether play has ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardEngine {
    board: Board,
    side_to_move: Player,
    game_over: bool,
    last_move: Option<MoveReport>,
}

impl BoardEngine {
    /// Starts from the canonical position with black to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            side_to_move: Player::Black,
            game_over: false,
            last_move: None,
        }
    }

    /// Starts from an arbitrary position.
    ///
    /// The turn is normalized the same way a move would leave it: if
    /// `side_to_move` is stuck but the opponent is not, the opponent moves;
    /// if both are stuck the game is already over.
    pub fn from_board(board: Board, side_to_move: Player) -> Self {
        let mut engine = Self {
            board,
            side_to_move,
            game_over: false,
            last_move: None,
        };
        if !engine.has_any_legal_move(side_to_move)
            && engine.has_any_legal_move(side_to_move.opponent())
        {
            engine.side_to_move = side_to_move.opponent();
        }
        engine.check_game_end();
        engine
    }

    /// Back to the canonical starting position.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::new();
        debug!("engine reset");
    }

    /// Raw board, for rendering.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Contents of one square.
    pub fn cell_at(&self, pos: Position) -> Cell {
        self.board.cell_at(pos)
    }

    /// Black and white piece counts.
    pub fn score(&self) -> Score {
        self.board.count()
    }

    /// The player who acts next.
    pub fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    /// True once neither side can move; cleared only by [`Self::reset`].
    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// Report of the most recent successful move; `None` after a reset.
    pub fn last_move(&self) -> Option<&MoveReport> {
        self.last_move.as_ref()
    }

    /// Empty squares where `player` would flip something, in row-major order.
    pub fn legal_moves(&self, player: Player) -> Vec<Position> {
        mask_positions(self.board.legal_moves(player))
    }

    /// Whether `player` has at least one legal move.
    pub fn has_any_legal_move(&self, player: Player) -> bool {
        self.board.has_any_legal_move(player)
    }

    /// Whether `player` may place at `pos`.
    pub fn is_valid_move(&self, pos: Position, player: Player) -> bool {
        self.board.is_valid_move(pos, player)
    }

    /// Plays `pos` for the side to move.
    pub fn apply_move(&mut self, pos: Position) -> Result<MoveReport, MoveError> {
        self.apply_move_as(pos, self.side_to_move)
    }

    /// Plays `pos` for `player`, then hands the turn over (or back, when the
    /// opponent has no reply). On error nothing changes.
    #[instrument(skip_all, fields(player = %player, position = %pos))]
    pub fn apply_move_as(
        &mut self,
        pos: Position,
        player: Player,
    ) -> Result<MoveReport, MoveError> {
        let result = self.try_apply(pos, player);
        if let Err(err) = &result {
            debug!(%err, "move rejected");
        }
        result
    }

    /// Sets the terminal flag when neither side can move. Returns the flag.
    pub fn check_game_end(&mut self) -> bool {
        if !self.game_over
            && !self.has_any_legal_move(Player::Black)
            && !self.has_any_legal_move(Player::White)
        {
            self.game_over = true;
            let score = self.score();
            info!(
                black = score.black,
                white = score.white,
                outcome = %score.outcome(),
                "game over"
            );
        }
        self.game_over
    }

    /// Snapshot for the view.
    pub fn to_game_state(&self) -> GameState {
        let score = self.score();
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.side_to_move.code(),
            black_count: score.black,
            white_count: score.white,
            is_game_over: self.game_over,
            is_pass: self.last_move.as_ref().is_some_and(|mv| mv.opponent_passed),
            flipped: self
                .last_move
                .as_ref()
                .map(|mv| mv.flipped.iter().map(|pos| pos.index() as u8).collect())
                .unwrap_or_default(),
        }
    }

    /// Result derived from the current counts; final once [`Self::is_over`] is true.
    pub fn to_game_result(&self) -> GameResult {
        GameResult::from(self.score())
    }

    fn try_apply(&mut self, pos: Position, player: Player) -> Result<MoveReport, MoveError> {
        if self.game_over {
            return Err(MoveError::GameOver);
        }
        if player != self.side_to_move {
            return Err(MoveError::NotYourTurn { player });
        }
        if self.board.cell_at(pos) != Cell::Empty {
            return Err(MoveError::Occupied { position: pos });
        }

        let flips = self.board.place(pos, player);
        if flips == 0 {
            return Err(MoveError::NoFlips { position: pos });
        }

        let opponent = player.opponent();
        self.side_to_move = opponent;

        let opponent_passed = !self.has_any_legal_move(opponent);
        if opponent_passed {
            self.side_to_move = player;
            if self.has_any_legal_move(player) {
                debug!(passed = %opponent, "no legal reply, turn returns");
            } else {
                self.check_game_end();
            }
        }

        let report = MoveReport {
            position: pos,
            player,
            flipped: mask_positions(flips),
            opponent_passed,
            game_over: self.game_over,
        };
        self.last_move = Some(report.clone());
        Ok(report)
    }
}

impl Default for BoardEngine {
    fn default() -> Self {
        Self::new()
    }
}

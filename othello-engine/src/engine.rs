//! Implements game-level Othello logic.
//!
//! [`GameEngine`] owns a [`Board`] and the turn state. Every mutation goes
//! through [`GameEngine::apply_move`], which validates the whole move before
//! touching the board, so a rejected attempt never changes anything.

use crate::board::Board;
use crate::location::{Location, LocationList};
use crate::player::{Cell, Player};
use crate::EDGE_LENGTH;
use derive_more::{Display, Error};
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, info, instrument};

/// Disc counts for both colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scores {
    pub black: u8,
    pub white: u8,
}

impl Scores {
    /// Count the discs on `board`.
    pub fn of_board(board: &Board) -> Self {
        Self {
            black: board.count(Player::Black),
            white: board.count(Player::White),
        }
    }

    /// The score of one player.
    #[inline]
    pub fn get(self, player: Player) -> u8 {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    /// Total number of discs on the board.
    #[inline]
    pub fn total(self) -> u8 {
        self.black + self.white
    }
}

/// How a finished game went for one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

/// The final position's disc counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameResult {
    pub scores: Scores,
}

impl GameResult {
    /// The player with strictly more discs, or None for a draw.
    pub fn winner(self) -> Option<Player> {
        match self.scores.black.cmp(&self.scores.white) {
            Ordering::Greater => Some(Player::Black),
            Ordering::Less => Some(Player::White),
            Ordering::Equal => None,
        }
    }

    /// Classify the result from `player`'s point of view.
    pub fn outcome_for(self, player: Player) -> Outcome {
        match self.winner() {
            None => Outcome::Draw,
            Some(winner) if winner == player => Outcome::Win,
            Some(_) => Outcome::Loss,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner() {
            Some(winner) => write!(
                f,
                "{} wins. Score: {} to {}",
                winner, self.scores.black, self.scores.white
            ),
            None => f.write_str("Draw!"),
        }
    }
}

/// Whose turn it is, or how the game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    InProgress(Player),
    GameOver(GameResult),
}

impl Status {
    /// Decide who moves next when `to_move` would normally be on turn.
    ///
    /// `to_move` keeps the turn if it has a legal move. Otherwise it is
    /// skipped and the other player moves again. If neither can move the
    /// game is over.
    pub fn resolve(board: &Board, to_move: Player) -> Self {
        if board.has_any_legal_move(to_move) {
            Status::InProgress(to_move)
        } else if board.has_any_legal_move(!to_move) {
            Status::InProgress(!to_move)
        } else {
            Status::GameOver(GameResult {
                scores: Scores::of_board(board),
            })
        }
    }

    /// The player on turn, if the game is still going.
    #[inline]
    pub fn current_player(self) -> Option<Player> {
        match self {
            Status::InProgress(player) => Some(player),
            Status::GameOver(_) => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::InProgress(player) => write!(f, "{} to play.", player),
            Status::GameOver(result) => write!(f, "Game over. {}", result),
        }
    }
}

/// Everything a front end needs to know after an accepted move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The player who moved.
    pub player: Player,
    /// Where the disc was placed.
    pub location: Location,
    /// The discs recolored by this move.
    pub flipped: LocationList,
    /// Who moves next, or None if the game just ended.
    pub next_player: Option<Player>,
    /// The opponent, if it had no legal reply and lost its turn.
    pub skipped: Option<Player>,
    /// The final result, if the game just ended.
    pub result: Option<GameResult>,
}

/// Reasons a move attempt is rejected. A rejected attempt changes nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The coordinates are not on the board.
    #[display("({row}, {col}) is off the board")]
    InvalidCoordinate { row: usize, col: usize },

    /// No moves are accepted once the game has ended.
    #[display("the game is already over")]
    GameAlreadyOver,

    /// The move came from the player who is not on turn.
    #[display("it is {expected}'s turn, not {attempted}'s")]
    NotYourTurn { expected: Player, attempted: Player },

    /// The square is occupied or would flip nothing.
    #[display("{player} cannot play at {location}")]
    IllegalMove { location: Location, player: Player },
}

/// The authoritative state of one Othello game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameEngine {
    board: Board,
    status: Status,
    fresh: bool,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    /// Start a new game from the opening position with Black to move.
    pub fn new() -> Self {
        Self {
            board: Board::starting(),
            status: Status::InProgress(Player::default()),
            fresh: true,
        }
    }

    /// Continue a game from an arbitrary position with `to_move` nominally on turn.
    /// The status is resolved as after a move: a stalemated `to_move` is skipped
    /// and a position where nobody can move is already over.
    pub fn from_position(board: Board, to_move: Player) -> Self {
        Self {
            board,
            status: Status::resolve(&board, to_move),
            fresh: false,
        }
    }

    /// Throw away the current game and restore the opening position.
    #[instrument(level = "debug", skip(self))]
    pub fn reset(&mut self) {
        *self = Self::new();
        debug!("board reset");
    }

    /// Whether `player` could legally place a disc at `loc` on the current board.
    /// This does not consider whose turn it is.
    #[inline]
    pub fn is_legal_move(&self, loc: Location, player: Player) -> bool {
        self.board.is_legal_move(loc, player)
    }

    /// The discs `player` would flip by playing at `loc`.
    #[inline]
    pub fn flips_for(&self, loc: Location, player: Player) -> LocationList {
        self.board.flips_for(loc, player)
    }

    #[inline]
    pub fn has_any_legal_move(&self, player: Player) -> bool {
        self.board.has_any_legal_move(player)
    }

    #[inline]
    pub fn legal_moves(&self, player: Player) -> LocationList {
        self.board.legal_moves(player)
    }

    /// Play `player`'s disc at `loc`, flip the captured discs and pass the turn.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameAlreadyOver`] once the game has ended.
    /// - [`MoveError::NotYourTurn`] if `player` is not on turn.
    /// - [`MoveError::IllegalMove`] if the square is occupied or flips nothing.
    #[instrument(level = "debug", skip(self))]
    pub fn apply_move(&mut self, loc: Location, player: Player) -> Result<MoveOutcome, MoveError> {
        if let Err(error) = self.validate(loc, player) {
            debug!(%error, "move rejected");
            return Err(error);
        }

        let flipped = self.board.place(loc, player);
        self.status = Status::resolve(&self.board, !player);
        self.fresh = false;

        let next_player = self.status.current_player();
        let skipped = (next_player == Some(player)).then_some(!player);
        let result = match self.status {
            Status::GameOver(result) => Some(result),
            Status::InProgress(_) => None,
        };

        debug!(flipped = flipped.len(), ?next_player, "move applied");
        if let Some(skipped) = skipped {
            debug!(%skipped, "no legal reply, turn skipped");
        }
        if let Some(result) = result {
            info!(
                black = result.scores.black,
                white = result.scores.white,
                winner = ?result.winner(),
                "game over"
            );
        }

        Ok(MoveOutcome {
            player,
            location: loc,
            flipped,
            next_player,
            skipped,
            result,
        })
    }

    fn validate(&self, loc: Location, player: Player) -> Result<(), MoveError> {
        match self.status {
            Status::GameOver(_) => Err(MoveError::GameAlreadyOver),
            Status::InProgress(expected) if expected != player => Err(MoveError::NotYourTurn {
                expected,
                attempted: player,
            }),
            Status::InProgress(_) if !self.board.is_legal_move(loc, player) => {
                Err(MoveError::IllegalMove {
                    location: loc,
                    player,
                })
            }
            Status::InProgress(_) => Ok(()),
        }
    }

    /// Number of discs `player` has on the board.
    #[inline]
    pub fn score(&self, player: Player) -> u8 {
        self.board.count(player)
    }

    /// Whether the player on turn may play at `(row, col)`.
    /// False once the game is over or for coordinates off the board.
    pub fn can_play_at(&self, row: usize, col: usize) -> bool {
        match (self.current_player(), Location::from_coords(row, col)) {
            (Some(player), Some(loc)) => self.board.is_legal_move(loc, player),
            _ => false,
        }
    }

    /// Play at `(row, col)` for whoever is on turn.
    ///
    /// # Errors
    ///
    /// [`MoveError::InvalidCoordinate`] for coordinates off the board, otherwise
    /// as [`GameEngine::apply_move`].
    pub fn play(&mut self, row: usize, col: usize) -> Result<MoveOutcome, MoveError> {
        let loc = Location::from_coords(row, col).ok_or(MoveError::InvalidCoordinate { row, col })?;
        let player = self.current_player().ok_or(MoveError::GameAlreadyOver)?;
        self.apply_move(loc, player)
    }

    /// The player on turn, or None once the game is over.
    #[inline]
    pub fn current_player(&self) -> Option<Player> {
        self.status.current_player()
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// The final result, once the game is over.
    pub fn result(&self) -> Option<GameResult> {
        match self.status {
            Status::GameOver(result) => Some(result),
            Status::InProgress(_) => None,
        }
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        matches!(self.status, Status::GameOver(_))
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// A copy of the board for rendering, indexed `[row][col]`.
    pub fn board_snapshot(&self) -> [[Cell; EDGE_LENGTH]; EDGE_LENGTH] {
        self.board.snapshot()
    }

    pub fn scores(&self) -> Scores {
        Scores::of_board(&self.board)
    }

    pub fn count_empty(&self) -> u8 {
        self.board.count_empty()
    }

    /// One-line status for a front end's message label.
    pub fn status_message(&self) -> String {
        if self.fresh {
            format!("Welcome to Othello. {}", self.status)
        } else {
            self.status.to_string()
        }
    }
}

impl fmt::Display for GameEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        f.write_str(&self.status_message())
    }
}

//! Board state and the directional scan behind every legality and flip query.
//!
//! A [`Board`] is a pair of disjoint [`Bitboard`]s, one per color. It knows
//! nothing about turn order; [`GameEngine`](crate::GameEngine) layers that on top.

use crate::bitboard::{Bitboard, BLACK_START, WHITE_START};
use crate::location::{Location, LocationList};
use crate::player::{Cell, Player};
use crate::{utils, EDGE_LENGTH, NUM_SPACES};
use derive_more::{Display, Error};
use std::fmt;

/// The eight compass directions as `(row, column)` steps.
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The discs of both players.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Board {
    black: Bitboard,
    white: Bitboard,
}

impl Default for Board {
    /// Gets the starting position.
    fn default() -> Self {
        Self::starting()
    }
}

impl Board {
    /// The standard opening position: D4 and E5 White, E4 and D5 Black.
    pub const fn starting() -> Self {
        Self {
            black: BLACK_START,
            white: WHITE_START,
        }
    }

    /// A board with no discs on it.
    pub const fn empty() -> Self {
        Self {
            black: Bitboard::EMPTY,
            white: Bitboard::EMPTY,
        }
    }

    /// Build a board from one bitboard per color.
    /// Returns None if both colors claim the same square.
    pub fn from_bitboards(black: Bitboard, white: Bitboard) -> Option<Self> {
        (black & white)
            .is_empty()
            .then_some(Self { black, white })
    }

    /// The squares holding `player`'s discs.
    #[inline]
    pub fn discs(self, player: Player) -> Bitboard {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    /// Get a mask indicating where the occupied spaces are.
    #[inline]
    pub fn occupied_mask(self) -> Bitboard {
        self.black | self.white
    }

    /// Get a mask indicating where the empty spaces are.
    #[inline]
    pub fn empty_mask(self) -> Bitboard {
        !self.occupied_mask()
    }

    /// The contents of the square at `loc`.
    #[inline]
    pub fn cell(self, loc: Location) -> Cell {
        let square = Bitboard::from(loc);
        if self.black.contains_all(square) {
            Cell::Black
        } else if self.white.contains_all(square) {
            Cell::White
        } else {
            Cell::Empty
        }
    }

    /// The contents of the square at `(row, col)`, or None off the board.
    pub fn cell_at(self, row: usize, col: usize) -> Option<Cell> {
        Location::from_coords(row, col).map(|loc| self.cell(loc))
    }

    /// Number of discs `player` has on the board.
    #[inline]
    pub fn count(self, player: Player) -> u8 {
        self.discs(player).count_occupied()
    }

    /// Number of squares with no disc.
    #[inline]
    pub fn count_empty(self) -> u8 {
        self.occupied_mask().count_empty()
    }

    /// The opponent discs that `player` would capture by playing at `loc`.
    ///
    /// Walks outward along each of the [`DIRECTIONS`]. A run of opponent discs
    /// counts only if it is closed by one of `player`'s own discs before an
    /// empty square or the board edge. Whether `loc` itself is empty is not
    /// checked here; see [`Board::is_legal_move`].
    pub fn flips_for(self, loc: Location, player: Player) -> LocationList {
        let own = self.discs(player);
        let opponent = self.discs(player.opponent());
        let mut flips = Bitboard::EMPTY;

        for (d_row, d_col) in DIRECTIONS {
            let mut run = Bitboard::EMPTY;
            let mut cursor = loc.offset(d_row, d_col);

            while let Some(step) = cursor {
                let square = Bitboard::from(step);
                if own.contains_all(square) {
                    flips |= run;
                    break;
                } else if opponent.contains_all(square) {
                    run |= square;
                    cursor = step.offset(d_row, d_col);
                } else {
                    break;
                }
            }
        }

        LocationList::from(flips)
    }

    /// Whether `player` may place a disc at `loc`: the square is empty and
    /// at least one opponent disc would be flipped.
    #[inline]
    pub fn is_legal_move(self, loc: Location, player: Player) -> bool {
        self.cell(loc).is_empty() && !self.flips_for(loc, player).is_empty()
    }

    /// Every square where `player` may legally play.
    pub fn legal_moves(self, player: Player) -> LocationList {
        LocationList::from(self.empty_mask())
            .filter(|&loc| !self.flips_for(loc, player).is_empty())
            .collect()
    }

    /// Whether `player` has at least one legal move.
    pub fn has_any_legal_move(self, player: Player) -> bool {
        LocationList::from(self.empty_mask()).any(|loc| !self.flips_for(loc, player).is_empty())
    }

    /// Place `player`'s disc at `loc` and recolor every captured disc.
    /// Returns the flipped locations.
    ///
    /// No legality check is made; callers must have confirmed
    /// [`Board::is_legal_move`] first or the position may stop being a
    /// reachable Othello position.
    pub fn place(&mut self, loc: Location, player: Player) -> LocationList {
        let flips = self.flips_for(loc, player);
        let changed = Bitboard::from(flips) | Bitboard::from(loc);

        match player {
            Player::Black => {
                self.black |= changed;
                self.white &= !changed;
            }
            Player::White => {
                self.white |= changed;
                self.black &= !changed;
            }
        }

        flips
    }

    /// The board after `player` plays at `loc`, without checking legality.
    #[inline]
    pub fn with_move(mut self, loc: Location, player: Player) -> Self {
        self.place(loc, player);
        self
    }

    /// Copy the board into a grid indexed `[row][col]`.
    pub fn snapshot(self) -> [[Cell; EDGE_LENGTH]; EDGE_LENGTH] {
        let mut grid = [[Cell::Empty; EDGE_LENGTH]; EDGE_LENGTH];
        for loc in Location::all() {
            let (row, col) = loc.to_coords();
            grid[row][col] = self.cell(loc);
        }
        grid
    }

    /// A printable view of the board that marks `markers` with `*`.
    pub fn highlighted(self, markers: LocationList) -> HighlightedBoard {
        HighlightedBoard {
            board: self,
            markers,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.highlighted(LocationList::default()), f)
    }
}

/// A [`Board`] printed with some empty squares marked, such as the legal moves.
#[derive(Clone, Copy, Debug)]
pub struct HighlightedBoard {
    board: Board,
    markers: LocationList,
}

impl fmt::Display for HighlightedBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        utils::format_grid(
            Location::all().map(|loc| match self.board.cell(loc) {
                Cell::Empty if self.markers.contains(loc) => '*',
                cell => cell.symbol(),
            }),
            f,
        )
    }
}

#[derive(Debug, PartialEq, Eq, Display, Error)]
pub enum ParseBoardError {
    #[display("a board needs 64 squares, found {found}")]
    WrongLength {
        #[error(not(source))]
        found: usize,
    },
    #[display("unexpected square character {character:?}")]
    InvalidCharacter {
        #[error(not(source))]
        character: char,
    },
}

/// Parse a board from 64 square characters in row-major order.
/// `X` or `B` is Black, `O` or `W` is White, `-` or `.` is empty;
/// whitespace is ignored.
impl std::str::FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let squares: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if squares.len() != NUM_SPACES {
            return Err(ParseBoardError::WrongLength {
                found: squares.len(),
            });
        }

        let mut board = Board::empty();
        for (index, character) in squares.into_iter().enumerate() {
            let square = Bitboard::from_square(index);
            match character.to_ascii_uppercase() {
                'X' | 'B' => board.black |= square,
                'O' | 'W' => board.white |= square,
                '-' | '.' => {}
                _ => return Err(ParseBoardError::InvalidCharacter { character }),
            }
        }

        Ok(board)
    }
}

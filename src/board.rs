//! Board representation: occupancy, move history, and fingerprint.
//!
//! The board is a square grid stored row-major in a flat `Vec`. Every cell
//! change goes through one private transition so the Zobrist fingerprint and
//! the per-player stone counters can never drift from the cells.

use std::fmt;

use thiserror::Error;

use crate::constants::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::rules::Forbidden;
use crate::zobrist::Zobrist;

/// A cell coordinate `(x, y)`, column first.
pub type Point = (usize, usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    /// Moves first; the side restricted by Renju rules.
    One,
    Two,
}

impl Player {
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Dense index, 0 or 1.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// Wire code of a stone: 1 or 2.
    pub fn code(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Decode a cell code: 0 is empty, 1 and 2 are stones.
    pub fn from_code(code: i64) -> Result<Option<Player>, MoveError> {
        match code {
            0 => Ok(None),
            1 => Ok(Some(Player::One)),
            2 => Ok(Some(Player::Two)),
            other => Err(MoveError::InvalidPlayer(other)),
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("unacceptable board size {0}, expected {min}..={max}", min = MIN_BOARD_SIZE, max = MAX_BOARD_SIZE)]
    InvalidSize(usize),
}

/// Why a placement was rejected. The board is unchanged in every case.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("illegal move: outside the board")]
    OutOfBounds,
    #[error("illegal move: point not empty")]
    Occupied,
    #[error("illegal move: forbidden {0}")]
    Forbidden(Forbidden),
    #[error("invalid player code {0}")]
    InvalidPlayer(i64),
}

#[derive(Clone, Debug)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Player>>,
    history: Vec<Point>,
    /// Stones on the board per player, indexed by `Player::index`.
    stones: [usize; 2],
    zobrist: Zobrist,
    hash: u64,
    /// Side that made (or is due to make) the first recorded move.
    opener: Option<Player>,
}

impl Board {
    /// Create an empty board of side `size`.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Self {
            size,
            cells: vec![None; size * size],
            history: Vec::with_capacity(size * size),
            stones: [0; 2],
            zobrist: Zobrist::new(size),
            hash: 0,
            opener: None,
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.size + x
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size
    }

    /// Occupant of `(x, y)`; `None` for empty or out-of-bounds cells.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Player> {
        if !self.in_bounds(x, y) {
            return None;
        }
        self.cells[self.idx(x, y)]
    }

    /// True only for in-bounds empty cells.
    #[inline]
    pub fn is_empty(&self, x: usize, y: usize) -> bool {
        self.in_bounds(x, y) && self.cells[self.idx(x, y)].is_none()
    }

    /// The point `k` steps from `p` along `(dx, dy)`, if it is on the board.
    #[inline]
    pub fn step(&self, (x, y): Point, dx: isize, dy: isize, k: isize) -> Option<Point> {
        let nx = x.checked_add_signed(dx * k)?;
        let ny = y.checked_add_signed(dy * k)?;
        self.in_bounds(nx, ny).then_some((nx, ny))
    }

    pub fn history(&self) -> &[Point] {
        &self.history
    }

    pub fn last_move(&self) -> Option<Point> {
        self.history.last().copied()
    }

    /// Total stones on the board, whether played or force-set.
    pub fn stone_count(&self) -> usize {
        self.stones[0] + self.stones[1]
    }

    pub fn stones_of(&self, player: Player) -> usize {
        self.stones[player.index()]
    }

    /// The side to move.
    ///
    /// Turns alternate from the opener, the side that made the first
    /// recorded move. Before any move the opener is the side set with
    /// [`Board::set_side_to_move`], or else the side with fewer stones,
    /// PlayerOne on a tie.
    pub fn current_player(&self) -> Player {
        let opener = self.opener.unwrap_or_else(|| {
            if self.stones_of(Player::Two) < self.stones_of(Player::One) {
                Player::Two
            } else {
                Player::One
            }
        });
        if self.history.len() % 2 == 0 {
            opener
        } else {
            opener.opponent()
        }
    }

    /// Fix the side to move for a position without history.
    pub fn set_side_to_move(&mut self, player: Player) {
        if self.history.is_empty() {
            self.opener = Some(player);
        }
    }

    /// Current Zobrist fingerprint of the occupied cells.
    #[inline]
    pub fn fingerprint(&self) -> u64 {
        self.hash
    }

    pub fn zobrist(&self) -> &Zobrist {
        &self.zobrist
    }

    /// Single entry point for cell changes: keeps the fingerprint and the
    /// stone counters in step with `cells`.
    fn set_cell(&mut self, index: usize, new: Option<Player>) {
        let old = self.cells[index];
        if old == new {
            return;
        }
        if let Some(p) = old {
            self.hash ^= self.zobrist.key(index, p);
            self.stones[p.index()] -= 1;
        }
        if let Some(p) = new {
            self.hash ^= self.zobrist.key(index, p);
            self.stones[p.index()] += 1;
        }
        self.cells[index] = new;
    }

    /// Place a stone on an empty in-bounds cell and record it in the history.
    pub fn play(&mut self, (x, y): Point, player: Player) -> Result<(), MoveError> {
        if !self.in_bounds(x, y) {
            return Err(MoveError::OutOfBounds);
        }
        let index = self.idx(x, y);
        if self.cells[index].is_some() {
            return Err(MoveError::Occupied);
        }
        self.set_cell(index, Some(player));
        if self.history.is_empty() {
            self.opener = Some(player);
        }
        self.history.push((x, y));
        Ok(())
    }

    /// Take back the last played move. Returns the point that was cleared.
    pub fn undo(&mut self) -> Option<Point> {
        let (x, y) = self.history.pop()?;
        let index = self.idx(x, y);
        self.set_cell(index, None);
        Some((x, y))
    }

    /// Overwrite a cell from an externally supplied position.
    ///
    /// Occupancy is not checked and the history is left alone; `code` is
    /// 0 (empty), 1 or 2.
    pub fn force_set(&mut self, (x, y): Point, code: i64) -> Result<(), MoveError> {
        if !self.in_bounds(x, y) {
            return Err(MoveError::OutOfBounds);
        }
        let stone = Player::from_code(code)?;
        let index = self.idx(x, y);
        self.set_cell(index, stone);
        Ok(())
    }

    /// Empty every cell and forget the history.
    pub fn clear(&mut self) {
        self.cells.fill(None);
        self.history.clear();
        self.stones = [0; 2];
        self.hash = 0;
        self.opener = None;
    }

    /// Every point of the board in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.size).flat_map(move |y| (0..self.size).map(move |x| (x, y)))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            for x in 0..self.size {
                let ch = match self.get(x, y) {
                    Some(Player::One) => 'X',
                    Some(Player::Two) => 'O',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

//! Move legality under free-style and Renju rules.
//!
//! Free-style only requires an empty in-bounds cell. Renju additionally
//! forbids the first player from making an overline, a double four or a
//! double three. Exactly five always wins, even if the same stone would
//! otherwise be forbidden, so line length is checked before threats.

use std::fmt;

use crate::board::{Board, MoveError, Player, Point};
use crate::constants::{AXES, OPEN_THREES, SEGMENT_LEN, SEGMENT_RADIUS, WIN_LENGTH};
use crate::win::longest_line;

/// Rule set of a session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RuleMode {
    #[default]
    FreeStyle,
    /// Forbidden moves for [`Player::One`].
    Renju,
}

/// Renju forbidden shapes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Forbidden {
    /// Six or more in a row.
    Overline,
    DoubleFour,
    DoubleThree,
}

impl fmt::Display for Forbidden {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Forbidden::Overline => write!(f, "overline"),
            Forbidden::DoubleFour => write!(f, "double-four"),
            Forbidden::DoubleThree => write!(f, "double-three"),
        }
    }
}

/// A cell as seen by the pattern scanner, relative to one player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Cell {
    Own,
    Empty,
    Foe,
    /// Off the board.
    Edge,
}

fn classify(board: &Board, p: Option<Point>, player: Player) -> Cell {
    match p {
        None => Cell::Edge,
        Some((x, y)) => match board.get(x, y) {
            None => Cell::Empty,
            Some(owner) if owner == player => Cell::Own,
            Some(_) => Cell::Foe,
        },
    }
}

/// Cell at offset `k` from `p` along `axis`, with `p` itself counted as own.
fn cell_at(board: &Board, p: Point, player: Player, (dx, dy): (isize, isize), k: isize) -> Cell {
    if k == 0 {
        return Cell::Own;
    }
    classify(board, board.step(p, dx, dy, k), player)
}

/// Is there a five-cell window through `p` on this axis holding four own
/// stones and one empty cell? Windows with a foe or running off the board
/// never qualify.
fn makes_four(board: &Board, p: Point, player: Player, axis: (isize, isize)) -> bool {
    let len = WIN_LENGTH as isize;
    (0..len).any(|end| {
        let mut own = 0;
        let mut empty = 0;
        for k in (end - len + 1)..=end {
            match cell_at(board, p, player, axis, k) {
                Cell::Own => own += 1,
                Cell::Empty => empty += 1,
                Cell::Foe | Cell::Edge => return false,
            }
        }
        own == WIN_LENGTH - 1 && empty == 1
    })
}

/// The line segment of radius `SEGMENT_RADIUS` around `p`, `p` in the middle.
fn segment(board: &Board, p: Point, player: Player, axis: (isize, isize)) -> [Cell; SEGMENT_LEN] {
    std::array::from_fn(|i| cell_at(board, p, player, axis, i as isize - SEGMENT_RADIUS as isize))
}

fn matches_at(segment: &[Cell], pattern: &[u8], start: usize) -> bool {
    pattern.iter().zip(&segment[start..]).all(|(&ch, &cell)| match ch {
        b'X' => cell == Cell::Own,
        _ => cell == Cell::Empty,
    })
}

/// Does the segment through `p` contain an open three that uses `p`?
fn makes_open_three(board: &Board, p: Point, player: Player, axis: (isize, isize)) -> bool {
    let seg = segment(board, p, player, axis);
    OPEN_THREES.iter().any(|pattern| {
        let pattern = pattern.as_bytes();
        (0..=SEGMENT_LEN - pattern.len())
            .filter(|&start| start <= SEGMENT_RADIUS && SEGMENT_RADIUS < start + pattern.len())
            .any(|start| matches_at(&seg, pattern, start))
    })
}

/// The forbidden shape `player` would make by playing on `p`, ignoring the
/// rule mode and whose turn it is. `p` is assumed empty.
pub fn forbidden(board: &Board, p: Point, player: Player) -> Option<Forbidden> {
    let longest = longest_line(board, p, player);
    if longest > WIN_LENGTH {
        return Some(Forbidden::Overline);
    }
    if longest == WIN_LENGTH {
        return None;
    }

    let mut fours = 0;
    let mut threes = 0;
    for axis in AXES {
        if makes_four(board, p, player, axis) {
            fours += 1;
        }
        if makes_open_three(board, p, player, axis) {
            threes += 1;
        }
    }

    if fours >= 2 {
        Some(Forbidden::DoubleFour)
    } else if threes >= 2 {
        Some(Forbidden::DoubleThree)
    } else {
        None
    }
}

/// Check whether `player` may play on `p` under `rule`.
pub fn check(board: &Board, p: Point, player: Player, rule: RuleMode) -> Result<(), MoveError> {
    let (x, y) = p;
    if !board.in_bounds(x, y) {
        return Err(MoveError::OutOfBounds);
    }
    if !board.is_empty(x, y) {
        return Err(MoveError::Occupied);
    }
    if rule == RuleMode::Renju && player == Player::One {
        if let Some(shape) = forbidden(board, p, player) {
            return Err(MoveError::Forbidden(shape));
        }
    }
    Ok(())
}

#[inline]
pub fn is_legal(board: &Board, p: Point, player: Player, rule: RuleMode) -> bool {
    check(board, p, player, rule).is_ok()
}

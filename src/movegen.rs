//! Candidate move generation.
//!
//! Only cells near existing stones are worth considering. The order is
//! row-major, which is also the selector's tie-break order.

use crate::board::{Board, Point};
use crate::constants::CANDIDATE_RADIUS;

/// Does `p` have a stone within Chebyshev distance `CANDIDATE_RADIUS`?
fn has_neighbor(board: &Board, (x, y): Point) -> bool {
    let r = CANDIDATE_RADIUS;
    let (x0, y0) = (x.saturating_sub(r), y.saturating_sub(r));
    let x1 = (x + r).min(board.size() - 1);
    let y1 = (y + r).min(board.size() - 1);
    (y0..=y1).any(|ny| (x0..=x1).any(|nx| (nx, ny) != (x, y) && board.get(nx, ny).is_some()))
}

/// Cells worth considering for the next move.
///
/// The center on an empty board; otherwise empty cells near a stone, or
/// every empty cell if no such cell exists.
pub fn candidates(board: &Board) -> Vec<Point> {
    if board.stone_count() == 0 {
        let c = board.size() / 2;
        return vec![(c, c)];
    }

    let near: Vec<Point> = board
        .points()
        .filter(|&(x, y)| board.is_empty(x, y) && has_neighbor(board, (x, y)))
        .collect();
    if !near.is_empty() {
        return near;
    }

    board.points().filter(|&(x, y)| board.is_empty(x, y)).collect()
}

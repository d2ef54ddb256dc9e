//! Five-in-a-row detection.
//!
//! All checks count consecutive stones outward from one cell along the four
//! axes. Six or more in a row also counts as a win here; overlines only
//! matter to the Renju legality check in [`crate::rules`].

use crate::board::{Board, Player, Point};
use crate::constants::{AXES, WIN_LENGTH};

/// Consecutive `player` stones starting one step from `p` along `(dx, dy)`.
/// `p` itself is not inspected.
pub fn count_direction(board: &Board, p: Point, dx: isize, dy: isize, player: Player) -> usize {
    let mut count = 0;
    while let Some((x, y)) = board.step(p, dx, dy, count as isize + 1) {
        if board.get(x, y) != Some(player) {
            break;
        }
        count += 1;
    }
    count
}

/// Length of the `player` line through `p` on one axis, counting `p` as
/// if it held a `player` stone.
pub fn line_length(board: &Board, p: Point, player: Player, (dx, dy): (isize, isize)) -> usize {
    1 + count_direction(board, p, dx, dy, player) + count_direction(board, p, -dx, -dy, player)
}

/// Longest `player` line through `p` over all four axes.
pub fn longest_line(board: &Board, p: Point, player: Player) -> usize {
    AXES.iter()
        .map(|&axis| line_length(board, p, player, axis))
        .max()
        .unwrap_or(1)
}

/// Does the stone on `p` belong to a line of five or more?
pub fn has_five_from(board: &Board, p: Point) -> bool {
    match board.get(p.0, p.1) {
        Some(player) => longest_line(board, p, player) >= WIN_LENGTH,
        None => false,
    }
}

/// Would `player` make five by playing on `p`? False unless `p` is an
/// in-bounds empty cell.
pub fn would_win_at(board: &Board, p: Point, player: Player) -> bool {
    board.is_empty(p.0, p.1) && longest_line(board, p, player) >= WIN_LENGTH
}

fn has_winning_line(board: &Board, player: Player) -> bool {
    board
        .points()
        .any(|p| board.get(p.0, p.1) == Some(player) && has_five_from(board, p))
}

/// The player holding a winning line, PlayerOne checked first.
pub fn winner_on_board(board: &Board) -> Option<Player> {
    [Player::One, Player::Two]
        .into_iter()
        .find(|&player| has_winning_line(board, player))
}

//! Move selection policies.
//!
//! A policy gets the board, the rule set and a deadline, and returns the
//! move for the side to move. [`GreedyPolicy`] looks one ply ahead only:
//! win now if possible, otherwise block the opponent's immediate win,
//! otherwise take the first legal candidate. Deeper searches plug in by
//! implementing [`MovePolicy`] on top of the same primitives.

use std::time::Duration;

use log::debug;

use crate::board::{Board, Point};
use crate::deadline::Deadline;
use crate::movegen::candidates;
use crate::rules::{RuleMode, is_legal};
use crate::win::would_win_at;

pub trait MovePolicy {
    /// Pick a move for `board.current_player()`, or `None` if no legal
    /// candidate was found before the deadline.
    fn choose(&mut self, board: &Board, rule: RuleMode, deadline: &Deadline) -> Option<Point>;
}

/// Single-ply win / block / first-candidate heuristic.
#[derive(Copy, Clone, Debug, Default)]
pub struct GreedyPolicy;

impl MovePolicy for GreedyPolicy {
    fn choose(&mut self, board: &Board, rule: RuleMode, deadline: &Deadline) -> Option<Point> {
        Self::scan(board, rule, || deadline.expired())
    }
}

impl GreedyPolicy {
    /// Walk the candidates until `expired` says stop, keeping the best
    /// move found so far.
    fn scan(board: &Board, rule: RuleMode, mut expired: impl FnMut() -> bool) -> Option<Point> {
        let us = board.current_player();
        let them = us.opponent();

        let mut fallback = None;
        let mut block = None;
        let mut scanned = 0usize;

        for p in candidates(board) {
            if expired() {
                debug!("deadline expired after {scanned} candidates");
                break;
            }
            scanned += 1;
            if !is_legal(board, p, us, rule) {
                continue;
            }
            if would_win_at(board, p, us) {
                debug!("winning move {:?} for {:?}", p, us);
                return Some(p);
            }
            fallback.get_or_insert(p);
            if block.is_none() && would_win_at(board, p, them) {
                block = Some(p);
            }
        }

        if let Some(p) = block {
            debug!("blocking {:?} at {:?}", them, p);
        }
        block.or(fallback)
    }
}

/// Time the policy may spend: the turn budget minus the reply margin.
pub fn turn_budget(timeout_turn: Duration, margin: Duration) -> Duration {
    timeout_turn.saturating_sub(margin)
}

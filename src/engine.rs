//! Session state behind the protocol: one board, its rule set and time
//! budget, and the policy that picks our moves.
//!
//! Stones are attributed by turn order, not by who sent them: the side to
//! move is always [`Board::current_player`], so whoever moves first is
//! PlayerOne and carries the Renju restrictions.

use std::time::Duration;

use log::{debug, info};
use thiserror::Error;

use crate::board::{Board, BoardError, MoveError, Player, Point};
use crate::constants::{DEFAULT_TIMEOUT_TURN, MAX_TIMEOUT_TURN_MS, RULE_FLAG_RENJU, SAFETY_MARGIN};
use crate::deadline::Deadline;
use crate::policy::{GreedyPolicy, MovePolicy, turn_budget};
use crate::rules::{RuleMode, check};
use crate::win::winner_on_board;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    #[error("no board, send START first")]
    NotStarted,
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error("takeback does not match the last move")]
    TakebackMismatch,
}

/// Per-session settings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub rule: RuleMode,
    pub timeout_turn: Duration,
    /// Kept back from `timeout_turn` to send the reply.
    pub safety_margin: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rule: RuleMode::default(),
            timeout_turn: DEFAULT_TIMEOUT_TURN,
            safety_margin: SAFETY_MARGIN,
        }
    }
}

/// Clamp a manager-supplied turn budget. Non-positive means "no limit",
/// which is the maximum we allow.
pub fn clamp_timeout_ms(ms: i64) -> Duration {
    let ms = if ms <= 0 { MAX_TIMEOUT_TURN_MS } else { ms.min(MAX_TIMEOUT_TURN_MS) };
    Duration::from_millis(ms as u64)
}

/// Engine state for one game session.
pub struct Brain {
    board: Option<Board>,
    config: Config,
    policy: Box<dyn MovePolicy>,
}

impl Default for Brain {
    fn default() -> Self {
        Self::new()
    }
}

impl Brain {
    /// A brain with the default config and the greedy policy.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self::with_policy(config, Box::new(GreedyPolicy))
    }

    pub fn with_policy(config: Config, policy: Box<dyn MovePolicy>) -> Self {
        Self {
            board: None,
            config,
            policy,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    fn board_mut(&mut self) -> Result<&mut Board, EngineError> {
        self.board.as_mut().ok_or(EngineError::NotStarted)
    }

    /// Start a new game on a `size` board. On failure the session has no
    /// board until a later successful start.
    pub fn start(&mut self, size: usize) -> Result<(), EngineError> {
        match Board::new(size) {
            Ok(board) => {
                info!("new game on a {size}x{size} board");
                self.board = Some(board);
                Ok(())
            }
            Err(e) => {
                self.board = None;
                Err(e.into())
            }
        }
    }

    pub fn restart(&mut self) -> Result<(), EngineError> {
        self.board_mut()?.clear();
        Ok(())
    }

    pub fn size(&self) -> Option<usize> {
        self.board.as_ref().map(Board::size)
    }

    pub fn set_rule(&mut self, rule: RuleMode) {
        debug!("rule set to {rule:?}");
        self.config.rule = rule;
    }

    /// Apply a Piskvork `rule` bit mask.
    pub fn set_rule_flags(&mut self, flags: i64) {
        let rule = if flags & RULE_FLAG_RENJU != 0 {
            RuleMode::Renju
        } else {
            RuleMode::FreeStyle
        };
        self.set_rule(rule);
    }

    pub fn set_timeout_turn_ms(&mut self, ms: i64) {
        self.config.timeout_turn = clamp_timeout_ms(ms);
        debug!("turn budget {:?}", self.config.timeout_turn);
    }

    /// Play `p` for the side to move, after the rule check.
    fn play_checked(&mut self, p: Point) -> Result<Player, EngineError> {
        let rule = self.config.rule;
        let board = self.board_mut()?;
        let player = board.current_player();
        check(board, p, player, rule)?;
        board.play(p, player)?;
        Ok(player)
    }

    pub fn apply_opponent_move(&mut self, p: Point) -> Result<(), EngineError> {
        let player = self.play_checked(p)?;
        debug!("opponent ({player:?}) played {p:?}");
        Ok(())
    }

    pub fn apply_own_move(&mut self, p: Point) -> Result<(), EngineError> {
        let player = self.play_checked(p)?;
        debug!("we ({player:?}) played {p:?}");
        Ok(())
    }

    /// Forced placement while replaying an external position.
    pub fn apply_board_move(&mut self, p: Point, code: i64) -> Result<(), EngineError> {
        self.board_mut()?.force_set(p, code)?;
        Ok(())
    }

    /// Replace the position with one sent by the manager: code 1 marks our
    /// stones, 2 the opponent's. The side with more stones opened the game
    /// and is PlayerOne; on a tie that is us. We are to move afterwards.
    /// On error the board is left empty.
    pub fn load_position(&mut self, stones: &[(Point, i64)]) -> Result<(), EngineError> {
        let board = self.board_mut()?;
        board.clear();

        let count = |code| stones.iter().filter(|&&(_, c)| c == code).count();
        let us = if count(1) < count(2) { Player::Two } else { Player::One };

        let placed = stones.iter().try_for_each(|&(p, code)| {
            let stone = match code {
                0 => 0,
                1 => us.code(),
                2 => us.opponent().code(),
                other => return Err(MoveError::InvalidPlayer(other)),
            };
            board.force_set(p, i64::from(stone))
        });
        if let Err(e) = placed {
            board.clear();
            return Err(e.into());
        }

        board.set_side_to_move(us);
        debug!("position loaded, we play {us:?}");
        Ok(())
    }

    /// Undo the last move, but only if it was played on `p`.
    pub fn takeback(&mut self, p: Point) -> Result<(), EngineError> {
        let board = self.board_mut()?;
        if board.last_move() != Some(p) {
            return Err(EngineError::TakebackMismatch);
        }
        board.undo();
        Ok(())
    }

    /// Pick a move for the side to move without playing it.
    pub fn choose_move(&mut self) -> Option<Point> {
        let board = self.board.as_ref()?;
        let budget = turn_budget(self.config.timeout_turn, self.config.safety_margin);
        let deadline = Deadline::arm(budget);
        let mv = self.policy.choose(board, self.config.rule, &deadline);
        debug!("chose {mv:?} with {:?} left", deadline.remaining());
        mv
    }

    pub fn fingerprint(&self) -> Option<u64> {
        self.board.as_ref().map(Board::fingerprint)
    }

    pub fn winner(&self) -> Option<Player> {
        self.board.as_ref().and_then(winner_on_board)
    }
}

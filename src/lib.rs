//! pbrain-gomoku: a Gomoku/Renju brain for Piskvork-style game managers.
//!
//! The engine keeps one board per session, checks moves against free-style
//! or Renju rules, and picks a reply with a single-ply heuristic under a
//! per-turn time budget.
//!
//! ## Modules
//!
//! - [`constants`] - Board bounds, time control, and rule patterns
//! - [`board`] - Cells, move history, and the Zobrist fingerprint
//! - [`zobrist`] - Key table for position fingerprints
//! - [`win`] - Five-in-a-row detection
//! - [`rules`] - Free-style and Renju move legality
//! - [`movegen`] - Candidate moves near existing stones
//! - [`deadline`] - Per-turn wall-clock budget
//! - [`policy`] - Move selection policies
//! - [`engine`] - Session state driven by the protocol
//! - [`response`] - Wire text of replies
//! - [`transcript`] - Protocol transcript sink
//! - [`protocol`] - Piskvork command loop
//!
//! ## Example
//!
//! ```
//! use pbrain_gomoku::engine::Brain;
//!
//! let mut brain = Brain::new();
//! brain.start(20).unwrap();
//!
//! // The opponent opens in the center; we answer next to it.
//! brain.apply_opponent_move((10, 10)).unwrap();
//! let reply = brain.choose_move().unwrap();
//! brain.apply_own_move(reply).unwrap();
//! println!("Our move: {},{}", reply.0, reply.1);
//! ```

pub mod board;
pub mod constants;
pub mod deadline;
pub mod engine;
pub mod movegen;
pub mod policy;
pub mod protocol;
pub mod response;
pub mod rules;
pub mod transcript;
pub mod win;
pub mod zobrist;

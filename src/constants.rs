//! Constants for board geometry, time control, and rule patterns.
//!
//! Board size is chosen at runtime by the `START` command, so only its
//! bounds live here. Everything else the engine tunes is collected in this
//! module so the rest of the crate reads without magic numbers.

use std::time::Duration;

// =============================================================================
// Board Geometry
// =============================================================================

/// Smallest accepted board side.
pub const MIN_BOARD_SIZE: usize = 5;

/// Largest accepted board side.
pub const MAX_BOARD_SIZE: usize = 100;

/// Board side used by the demo and by most tests (the Gomocup standard).
pub const DEFAULT_BOARD_SIZE: usize = 20;

/// Number of stones in a row needed to win.
pub const WIN_LENGTH: usize = 5;

/// The four undirected axes, as the positive step of each.
/// Order: horizontal, vertical, diagonal, anti-diagonal.
pub const AXES: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Chebyshev radius around existing stones in which candidates are generated.
pub const CANDIDATE_RADIUS: usize = 2;

// =============================================================================
// Hashing
// =============================================================================

/// Seed for the Zobrist key generator. Fixed so fingerprints are reproducible.
pub const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

// =============================================================================
// Time Control
// =============================================================================

/// Upper bound for the per-turn budget; also used when the manager sends 0.
pub const MAX_TIMEOUT_TURN_MS: i64 = 5_000;

/// Per-turn budget before any `INFO timeout_turn` arrives.
pub const DEFAULT_TIMEOUT_TURN: Duration = Duration::from_millis(MAX_TIMEOUT_TURN_MS as u64);

/// Reserved for replying after the scan stops.
pub const SAFETY_MARGIN: Duration = Duration::from_millis(50);

// =============================================================================
// Renju Patterns
// =============================================================================

/// Cells on each side of the candidate in the segment scanned for threes.
pub const SEGMENT_RADIUS: usize = 5;

/// Length of the segment scanned for threes (candidate in the middle).
pub const SEGMENT_LEN: usize = 2 * SEGMENT_RADIUS + 1;

/// Open-three shapes: `X` is an own stone, `.` an empty cell.
pub const OPEN_THREES: [&str; 5] = [".XXX.", ".X.XX.", ".XX.X.", "..XXX.", ".XXX.."];

/// Piskvork `INFO rule` bit that selects Renju.
pub const RULE_FLAG_RENJU: i64 = 4;

// =============================================================================
// Engine Metadata (ABOUT reply)
// =============================================================================

pub const ENGINE_NAME: &str = "pbrain-gomoku";
pub const ENGINE_AUTHOR: &str = "pbrain-gomoku developers";
pub const ENGINE_COUNTRY: &str = "FR";

//! Zobrist keys for position fingerprints.
//!
//! Every (cell, player) pair gets an independent 64-bit key. A position's
//! fingerprint is the xor of the keys of its occupied cells, so placing or
//! removing a stone is a single xor and undoing it restores the old value.
//! The board owns one table and applies the toggles itself; see
//! [`Board::fingerprint`](crate::board::Board::fingerprint).

use crate::board::{Board, Player};
use crate::constants::ZOBRIST_SEED;

/// Key table for one board size.
#[derive(Clone, Debug)]
pub struct Zobrist {
    /// Two keys per cell, indexed by `cell * 2 + player.index()`.
    keys: Vec<u64>,
}

impl Zobrist {
    /// Build the table for a `size * size` board from the fixed seed.
    pub fn new(size: usize) -> Self {
        let mut rng = fastrand::Rng::with_seed(ZOBRIST_SEED);
        let keys = (0..size * size * 2).map(|_| rng.u64(..)).collect();
        Self { keys }
    }

    /// Key of `player` standing on cell `index`.
    #[inline]
    pub fn key(&self, index: usize, player: Player) -> u64 {
        self.keys[index * 2 + player.index()]
    }

    /// Recompute a fingerprint from scratch.
    pub fn fingerprint_of(&self, board: &Board) -> u64 {
        let size = board.size();
        let mut hash = 0;
        for y in 0..size {
            for x in 0..size {
                if let Some(player) = board.get(x, y) {
                    hash ^= self.key(y * size + x, player);
                }
            }
        }
        hash
    }
}

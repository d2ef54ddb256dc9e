//! Wall-clock budget for one turn.
//!
//! The deadline is polled by the selector between candidates; it never
//! interrupts anything.

use std::time::{Duration, Instant};

/// About thirty years.
const FAR_FUTURE: Duration = Duration::from_secs(30 * 365 * 24 * 60 * 60);

#[derive(Copy, Clone, Debug)]
pub struct Deadline {
    expiry: Instant,
}

impl Deadline {
    /// Start a budget of `budget` from now. Budgets too large to represent
    /// end in the far future instead.
    pub fn arm(budget: Duration) -> Self {
        let now = Instant::now();
        let expiry = now
            .checked_add(budget)
            .or_else(|| now.checked_add(FAR_FUTURE))
            .unwrap_or(now);
        Self { expiry }
    }

    /// Like [`Deadline::arm`] but in milliseconds; negative budgets become zero.
    pub fn from_millis(ms: i64) -> Self {
        Self::arm(Duration::from_millis(ms.max(0) as u64))
    }

    #[inline]
    pub fn expired(&self) -> bool {
        Instant::now() >= self.expiry
    }

    pub fn remaining(&self) -> Duration {
        self.expiry.saturating_duration_since(Instant::now())
    }
}

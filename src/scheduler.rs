//! Heartbeat clock.
//!
//! The main loop polls [`HeartbeatClock::poll`] with the current monotonic
//! time.  When a full interval has elapsed since the last fire it returns
//! `true` and restarts the interval from *now*:
//!
//! ```text
//!  t=0        t=60s       t=120s            t=200s   t=260s
//!  │ WAIT ... │ FIRE      │ FIRE   (stall)   │ FIRE   │ FIRE
//!  └──────────┴───────────┴──────────────────┴────────┘
//!                          one catch-up fire, no backlog
//! ```
//!
//! Missed intervals are never backfilled: a loop that stalls for three
//! intervals gets exactly one fire when it resumes.

use log::debug;

/// Fixed-interval, non-accumulating tick source.
#[derive(Debug, Clone)]
pub struct HeartbeatClock {
    interval_ms: u64,
    last_fire_ms: u64,
    fires: u64,
}

impl HeartbeatClock {
    /// Start a clock whose first interval begins at `now_ms`.
    pub fn new(interval_ms: u32, now_ms: u64) -> Self {
        Self {
            interval_ms: u64::from(interval_ms),
            last_fire_ms: now_ms,
            fires: 0,
        }
    }

    /// Returns `true` at most once per elapsed interval.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let elapsed = now_ms.saturating_sub(self.last_fire_ms);
        if elapsed < self.interval_ms {
            return false;
        }
        if elapsed >= self.interval_ms.saturating_mul(2) {
            debug!(
                "heartbeat: late by {} ms, skipping backlog",
                elapsed - self.interval_ms
            );
        }
        self.last_fire_ms = now_ms;
        self.fires += 1;
        true
    }

    /// Milliseconds until the next fire is due (0 if overdue).
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        let elapsed = now_ms.saturating_sub(self.last_fire_ms);
        self.interval_ms.saturating_sub(elapsed)
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn last_fire_ms(&self) -> u64 {
        self.last_fire_ms
    }

    /// Number of fires since construction.
    pub fn fires(&self) -> u64 {
        self.fires
    }
}

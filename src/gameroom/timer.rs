use std::time::Duration;
use tokio::time::Instant;

/// Configuration for game timeouts and room lifetimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub bid: Duration,
    pub play: Duration,
    pub reaper: Duration,
    pub horizon: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            bid: Duration::from_secs(crate::BID_TIMEOUT),
            play: Duration::from_secs(crate::PLAY_TIMEOUT),
            reaper: Duration::from_secs(crate::REAPER_INTERVAL),
            horizon: Duration::from_secs(crate::ROOM_HORIZON),
        }
    }
}

/// Countdown for one decision.
///
/// Started once per turn; every re-prompt asks only for what is left, so
/// invalid input never resets the clock.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    deadline: Instant,
}

impl Timer {
    pub fn start(budget: Duration) -> Self {
        Self {
            deadline: Instant::now() + budget,
        }
    }
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }
}

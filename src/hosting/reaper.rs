use super::hall::Hall;
use std::sync::Arc;
use std::time::Duration;

/// Periodically removes rooms nobody can reach or nobody has touched in a
/// long time.
pub struct Reaper {
    hall: Arc<Hall>,
    every: Duration,
    horizon: Duration,
}

impl Reaper {
    pub fn new(hall: Arc<Hall>) -> Self {
        let timeouts = hall.timeouts();
        Self {
            hall,
            every: timeouts.reaper,
            horizon: timeouts.horizon,
        }
    }

    pub async fn run(self) {
        let mut interval = tokio::time::interval(self.every);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let reaped = self.hall.sweep(self.horizon).await;
            if reaped > 0 {
                log::info!("[reaper] removed {} rooms", reaped);
            }
        }
    }
}

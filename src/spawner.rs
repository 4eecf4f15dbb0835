//! Fixed-period enemy spawn clock, independent of frame rate.
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SpawnTimer {
    period: Duration,
    accumulated: Duration,
}

impl SpawnTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            accumulated: Duration::ZERO,
        }
    }

    /// Feeds elapsed wall-clock time and returns how many spawn ticks fell due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed;
        let mut due = 0;
        while self.accumulated >= self.period {
            self.accumulated -= self.period;
            due += 1;
        }
        due
    }
}

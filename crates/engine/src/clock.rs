//! Per-turn time accounting.

use std::time::{Duration, Instant};

/// Deadline captured at the start of a turn.
///
/// Nothing is cached: each query reads the clock again, so a strategy that
/// polls [`TimeBudget::time_left_ms`] in a loop sees it fall, past zero if it
/// overruns. The budget is advisory; nobody forfeits a turn for going negative.
#[derive(Debug, Clone, Copy)]
pub struct TimeBudget {
    started: Instant,
    limit: Duration,
}

impl TimeBudget {
    pub fn start(limit: Duration) -> Self {
        Self {
            started: Instant::now(),
            limit,
        }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Milliseconds remaining; negative once the deadline has passed.
    pub fn time_left_ms(&self) -> i64 {
        self.limit.as_millis() as i64 - self.started.elapsed().as_millis() as i64
    }

    pub fn expired(&self) -> bool {
        self.time_left_ms() < 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn time_left_is_recomputed_on_every_call() {
        let budget = TimeBudget::start(Duration::from_millis(50));
        let first = budget.time_left_ms();
        thread::sleep(Duration::from_millis(15));
        let second = budget.time_left_ms();
        assert!(second < first, "{second} should be below {first}");
    }

    #[test]
    fn time_left_goes_negative_after_deadline() {
        let budget = TimeBudget::start(Duration::from_millis(5));
        thread::sleep(Duration::from_millis(20));
        assert!(budget.time_left_ms() < 0);
        assert!(budget.expired());
    }
}

//! Frame timing utilities

use std::time::{Duration, Instant};

/// Soft real-time frame pacing.
///
/// [`FrameLimiter::wait`] sleeps out whatever remains of the target
/// frame interval since the previous call, then records the wake time.
/// If the frame ran over budget it returns immediately; there is no
/// catch-up accounting, overruns are simply absorbed.
pub struct FrameLimiter {
    interval: Duration,
    last: Option<Instant>,
}

impl FrameLimiter {
    /// Create a limiter with the given target interval between frames.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Target interval between frames.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Sleep until the next frame slot. The first call returns
    /// immediately and starts the clock.
    pub fn wait(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                std::thread::sleep(self.interval - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_wait_does_not_sleep() {
        let mut limiter = FrameLimiter::new(Duration::from_secs(10));
        let start = Instant::now();
        limiter.wait();
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn second_wait_paces_to_interval() {
        let interval = Duration::from_millis(20);
        let mut limiter = FrameLimiter::new(interval);
        limiter.wait();
        let start = Instant::now();
        limiter.wait();
        // Sleep granularity is platform dependent; only assert a lower bound.
        assert!(start.elapsed() >= interval - Duration::from_millis(2));
    }
}

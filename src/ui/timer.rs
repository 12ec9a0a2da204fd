use std::time::{Duration, Instant};

/// A cancellable deadline that fires at most once per arming.
///
/// Nothing runs in the background: the owner polls [`OneShotTimer::fire`] on
/// every tick. Dropping the owner drops the timer, so a torn-down component
/// can never observe a late expiry.
#[derive(Debug, Clone)]
pub struct OneShotTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl OneShotTimer {
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Arm the timer, replacing any pending deadline.
    pub fn start(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub const fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns true exactly once when `now` has reached the deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(5000);

    #[test]
    fn test_fires_at_deadline_and_only_once() {
        let start = Instant::now();
        let mut timer = OneShotTimer::new(DELAY);
        timer.start(start);

        assert!(!timer.fire(start + Duration::from_millis(4999)));
        assert!(timer.fire(start + DELAY));
        assert!(!timer.fire(start + DELAY * 2));
    }

    #[test]
    fn test_unarmed_timer_never_fires() {
        let mut timer = OneShotTimer::new(DELAY);
        assert!(!timer.fire(Instant::now() + DELAY * 2));
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let start = Instant::now();
        let mut timer = OneShotTimer::new(DELAY);
        timer.start(start);
        timer.cancel();
        assert!(!timer.fire(start + DELAY));
    }

    #[test]
    fn test_restart_moves_deadline() {
        let start = Instant::now();
        let mut timer = OneShotTimer::new(DELAY);
        timer.start(start);
        timer.start(start + Duration::from_millis(3000));

        assert!(!timer.fire(start + DELAY));
        assert!(timer.fire(start + Duration::from_millis(8000)));
    }
}

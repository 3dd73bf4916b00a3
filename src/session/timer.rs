use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running {
        started_at: Instant,
    },
    Finished {
        started_at: Instant,
        finished_at: Instant,
        timed_out: bool,
    },
}

/// Session clock with an optional hard time limit.
///
/// Every method takes `now` so callers decide what time it is; the app passes
/// `Instant::now()` on each event or tick.
#[derive(Clone, Debug)]
pub struct SessionTimer {
    limit: Option<Duration>,
    state: TimerState,
}

impl SessionTimer {
    /// `limit_secs == 0` means no limit.
    pub fn new(limit_secs: u64) -> Self {
        Self {
            limit: (limit_secs > 0).then(|| Duration::from_secs(limit_secs)),
            state: TimerState::Idle,
        }
    }

    pub fn limit(&self) -> Option<Duration> {
        self.limit
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_started(&self) -> bool {
        !matches!(self.state, TimerState::Idle)
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, TimerState::Finished { .. })
    }

    pub fn timed_out(&self) -> bool {
        matches!(self.state, TimerState::Finished { timed_out: true, .. })
    }

    pub fn started_at(&self) -> Option<Instant> {
        match self.state {
            TimerState::Idle => None,
            TimerState::Running { started_at } | TimerState::Finished { started_at, .. } => {
                Some(started_at)
            }
        }
    }

    pub fn finished_at(&self) -> Option<Instant> {
        match self.state {
            TimerState::Finished { finished_at, .. } => Some(finished_at),
            _ => None,
        }
    }

    /// Idle → running. No effect once started.
    pub fn start(&mut self, now: Instant) {
        if self.state == TimerState::Idle {
            self.state = TimerState::Running { started_at: now };
        }
    }

    /// Running → finished because the text was completed.
    pub fn finish(&mut self, now: Instant) {
        if let TimerState::Running { started_at } = self.state {
            self.state = TimerState::Finished {
                started_at,
                finished_at: now,
                timed_out: false,
            };
        }
    }

    /// Running → finished once the limit has elapsed. The recorded end is
    /// exactly `start + limit`, however late the check runs.
    pub fn check_timeout(&mut self, now: Instant) -> bool {
        let (TimerState::Running { started_at }, Some(limit)) = (self.state, self.limit) else {
            return false;
        };
        if now.saturating_duration_since(started_at) < limit {
            return false;
        }
        self.state = TimerState::Finished {
            started_at,
            finished_at: started_at + limit,
            timed_out: true,
        };
        true
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.state {
            TimerState::Idle => Duration::ZERO,
            TimerState::Running { started_at } => {
                let elapsed = now.saturating_duration_since(started_at);
                match self.limit {
                    Some(limit) => elapsed.min(limit),
                    None => elapsed,
                }
            }
            TimerState::Finished {
                started_at,
                finished_at,
                ..
            } => finished_at.saturating_duration_since(started_at),
        }
    }

    /// Time left before the limit, or `None` when unlimited.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.limit
            .map(|limit| limit.saturating_sub(self.elapsed(now)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_timer() {
        let timer = SessionTimer::new(30);
        let now = Instant::now();
        assert!(!timer.is_started());
        assert_eq!(timer.elapsed(now), Duration::ZERO);
        assert_eq!(timer.remaining(now), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_zero_limit_is_unlimited() {
        let mut timer = SessionTimer::new(0);
        let t0 = Instant::now();
        timer.start(t0);
        assert_eq!(timer.limit(), None);
        assert_eq!(timer.remaining(t0), None);
        assert!(!timer.check_timeout(t0 + Duration::from_secs(3600)));
        assert_eq!(timer.elapsed(t0 + Duration::from_secs(3600)), Duration::from_secs(3600));
    }

    #[test]
    fn test_timeout_records_exact_limit() {
        let mut timer = SessionTimer::new(30);
        let t0 = Instant::now();
        timer.start(t0);
        assert!(!timer.check_timeout(t0 + Duration::from_secs(29)));
        assert!(timer.check_timeout(t0 + Duration::from_millis(30_400)));
        assert!(timer.timed_out());
        let start = timer.started_at().unwrap();
        let end = timer.finished_at().unwrap();
        assert_eq!(end - start, Duration::from_secs(30));
        assert_eq!(timer.remaining(t0 + Duration::from_secs(40)), Some(Duration::ZERO));
    }

    #[test]
    fn test_elapsed_is_clamped_while_running() {
        let mut timer = SessionTimer::new(10);
        let t0 = Instant::now();
        timer.start(t0);
        assert_eq!(timer.elapsed(t0 + Duration::from_secs(15)), Duration::from_secs(10));
    }

    #[test]
    fn test_finish_on_completion() {
        let mut timer = SessionTimer::new(30);
        let t0 = Instant::now();
        timer.start(t0);
        timer.finish(t0 + Duration::from_secs(12));
        assert!(timer.is_finished());
        assert!(!timer.timed_out());
        assert_eq!(timer.elapsed(t0 + Duration::from_secs(100)), Duration::from_secs(12));
        // no second transition
        assert!(!timer.check_timeout(t0 + Duration::from_secs(100)));
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut timer = SessionTimer::new(0);
        let t0 = Instant::now();
        timer.start(t0);
        timer.start(t0 + Duration::from_secs(5));
        assert_eq!(timer.started_at(), Some(t0));
    }

    #[test]
    fn test_finish_before_start_is_noop() {
        let mut timer = SessionTimer::new(0);
        timer.finish(Instant::now());
        assert!(!timer.is_started());
    }
}

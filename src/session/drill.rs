use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::engine::{alignment, completion, scoring};
use crate::session::input::{InputTracker, Keystroke, KeystrokeOutcome};
use crate::session::result::DrillSnapshot;
use crate::session::timer::SessionTimer;

/// One typing session over a single excerpt.
pub struct DrillState {
    pub target: Vec<char>,
    tracker: InputTracker,
    timer: SessionTimer,
}

impl DrillState {
    pub fn new(text: &str, time_limit_secs: u64) -> Self {
        Self {
            target: text.chars().collect(),
            tracker: InputTracker::new(),
            timer: SessionTimer::new(time_limit_secs),
        }
    }

    /// Start over on the same excerpt: buffer, counters, error set and timer
    /// are all cleared.
    pub fn reset(&mut self) {
        let limit = self.timer.limit().map_or(0, |d| d.as_secs());
        self.tracker = InputTracker::new();
        self.timer = SessionTimer::new(limit);
    }

    pub fn input(&self) -> &[char] {
        self.tracker.buffer()
    }

    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    pub fn correct_count(&self) -> usize {
        self.tracker.correct_count()
    }

    pub fn incorrect_count(&self) -> usize {
        self.tracker.incorrect_count()
    }

    pub fn error_positions(&self) -> &HashSet<usize> {
        self.tracker.error_positions()
    }

    pub fn cursor(&self) -> usize {
        alignment::cursor_position(&self.target, self.input())
    }

    pub fn is_complete(&self) -> bool {
        completion::is_complete(self.input(), &self.target)
    }

    /// Finished by completion or timeout; typing keystrokes are rejected.
    pub fn is_finished(&self) -> bool {
        self.timer.is_finished() || self.is_complete()
    }

    pub fn type_key(&mut self, key: Keystroke) -> KeystrokeOutcome {
        self.type_key_at(key, Instant::now())
    }

    pub fn type_key_at(&mut self, key: Keystroke, now: Instant) -> KeystrokeOutcome {
        if self.is_finished() {
            return KeystrokeOutcome::Ignored;
        }
        // A tick may not have run yet since the limit passed.
        if self.on_tick(now) {
            return KeystrokeOutcome::Ignored;
        }

        let outcome = self.tracker.apply(&self.target, key);

        if !self.timer.is_started() && !self.input().is_empty() {
            self.timer.start(now);
            tracing::debug!(chars = self.target.len(), "session started");
        }
        if self.is_complete() {
            self.timer.finish(now);
            tracing::info!(
                correct = self.correct_count(),
                incorrect = self.incorrect_count(),
                elapsed_secs = self.elapsed(now).as_secs_f64(),
                "session completed"
            );
        }
        outcome
    }

    /// Periodic tick. Returns true when this tick ended the session on time.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        let timed_out = self.timer.check_timeout(now);
        if timed_out {
            tracing::info!(
                correct = self.correct_count(),
                incorrect = self.incorrect_count(),
                "session timed out"
            );
        }
        timed_out
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        self.timer.elapsed(now)
    }

    pub fn wpm(&self, now: Instant) -> f64 {
        scoring::wpm(self.input(), self.elapsed(now))
    }

    pub fn accuracy(&self) -> f64 {
        scoring::accuracy(self.correct_count(), self.incorrect_count())
    }

    pub fn progress(&self) -> (usize, usize) {
        scoring::progress(self.input(), &self.target)
    }

    pub fn snapshot(&self, now: Instant) -> DrillSnapshot {
        let (typed, total) = self.progress();
        DrillSnapshot {
            cursor: self.cursor(),
            correct: self.correct_count(),
            incorrect: self.incorrect_count(),
            error_positions: self.error_positions().len(),
            started: self.timer.is_started(),
            finished: self.is_finished(),
            timed_out: self.timer.timed_out(),
            complete: self.is_complete(),
            elapsed: self.elapsed(now),
            remaining: self.timer.remaining(now),
            wpm: self.wpm(now),
            accuracy: self.accuracy(),
            typed,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;

    fn type_str(drill: &mut DrillState, s: &str, now: Instant) {
        for ch in s.chars() {
            drill.type_key_at(Keystroke::from(ch), now);
        }
    }

    #[test]
    fn test_new_drill() {
        let drill = DrillState::new("hello", 30);
        assert_eq!(drill.target.len(), 5);
        assert_eq!(drill.cursor(), 0);
        assert!(!drill.is_finished());
        assert!(!drill.timer().is_started());
        assert_eq!(drill.accuracy(), 100.0);
    }

    #[test]
    fn test_initial_cursor_skips_indent() {
        let drill = DrillState::new("\t\tx", 0);
        assert_eq!(drill.cursor(), 2);
    }

    #[test]
    fn test_first_keystroke_starts_timer() {
        let mut drill = DrillState::new("abc", 30);
        let t0 = Instant::now();
        drill.type_key_at(Keystroke::Backspace, t0);
        assert!(!drill.timer().is_started());
        drill.type_key_at(Keystroke::Char('a'), t0);
        assert_eq!(drill.timer().started_at(), Some(t0));
    }

    #[test]
    fn test_rejected_newline_does_not_start_timer() {
        let mut drill = DrillState::new("abc", 30);
        drill.type_key_at(Keystroke::Newline, Instant::now());
        assert!(!drill.timer().is_started());
    }

    #[test]
    fn test_tab_indented_excerpt_completes_without_errors() {
        let mut drill = DrillState::new("\tx = 1\n\ty = 2", 0);
        let t0 = Instant::now();
        type_str(&mut drill, "x = 1", t0);
        drill.type_key_at(Keystroke::Newline, t0);
        type_str(&mut drill, "y = 2", t0 + Duration::from_secs(6));
        assert!(drill.is_complete());
        assert!(drill.is_finished());
        assert_eq!(drill.incorrect_count(), 0);
        assert_eq!(drill.correct_count(), 11);
        assert_eq!(drill.elapsed(t0 + Duration::from_secs(60)), Duration::from_secs(6));
    }

    #[test]
    fn test_typing_rejected_after_completion() {
        let mut drill = DrillState::new("ab", 0);
        let t0 = Instant::now();
        type_str(&mut drill, "ab", t0);
        assert!(drill.is_finished());
        assert_eq!(drill.type_key_at(Keystroke::Char('c'), t0), KeystrokeOutcome::Ignored);
        assert_eq!(drill.type_key_at(Keystroke::Backspace, t0), KeystrokeOutcome::Ignored);
        assert_eq!(drill.input(), &['a', 'b']);
    }

    #[test]
    fn test_timeout_finishes_incomplete_session() {
        let mut drill = DrillState::new("a longer line", 30);
        let t0 = Instant::now();
        type_str(&mut drill, "a lo", t0);
        assert!(!drill.on_tick(t0 + Duration::from_secs(10)));
        assert!(drill.on_tick(t0 + Duration::from_secs(31)));
        assert!(drill.is_finished());
        assert!(!drill.is_complete());
        assert_eq!(drill.elapsed(t0 + Duration::from_secs(99)), Duration::from_secs(30));
        assert_eq!(
            drill.type_key_at(Keystroke::Char('n'), t0 + Duration::from_secs(32)),
            KeystrokeOutcome::Ignored
        );
    }

    #[test]
    fn test_keystroke_after_missed_tick_times_out() {
        let mut drill = DrillState::new("abc", 5);
        let t0 = Instant::now();
        drill.type_key_at(Keystroke::Char('a'), t0);
        let outcome = drill.type_key_at(Keystroke::Char('b'), t0 + Duration::from_secs(6));
        assert_eq!(outcome, KeystrokeOutcome::Ignored);
        assert!(drill.timer().timed_out());
        assert_eq!(drill.input(), &['a']);
    }

    #[derive(Clone, Default)]
    struct LogCapture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogCapture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_timeout_on_keystroke_is_logged() {
        let capture = LogCapture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut drill = DrillState::new("abc", 5);
            let t0 = Instant::now();
            drill.type_key_at(Keystroke::Char('a'), t0);
            drill.type_key_at(Keystroke::Char('b'), t0 + Duration::from_secs(6));
        });

        let logged = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert_eq!(logged.matches("session timed out").count(), 1);
    }

    #[test]
    fn test_empty_target_is_finished_immediately() {
        let mut drill = DrillState::new("", 30);
        assert!(drill.is_finished());
        assert_eq!(drill.type_key_at(Keystroke::Char('x'), Instant::now()), KeystrokeOutcome::Ignored);
        assert!(!drill.timer().is_started());
    }

    #[test]
    fn test_backspace_does_not_restore_accuracy() {
        let mut drill = DrillState::new("abc", 0);
        let t0 = Instant::now();
        drill.type_key_at(Keystroke::Char('x'), t0);
        drill.type_key_at(Keystroke::Backspace, t0);
        type_str(&mut drill, "abc", t0);
        assert!(drill.is_complete());
        assert_eq!(drill.accuracy(), 75.0);
    }

    #[test]
    fn test_trailing_space_required_for_completion() {
        let mut drill = DrillState::new("ab ", 0);
        let t0 = Instant::now();
        type_str(&mut drill, "ab", t0);
        assert!(!drill.is_complete());
        type_str(&mut drill, " ", t0);
        assert!(drill.is_complete());
    }

    #[test]
    fn test_snapshot() {
        let mut drill = DrillState::new("fn a()\n    b", 30);
        let t0 = Instant::now();
        type_str(&mut drill, "fn a()\n", t0);
        let snap = drill.snapshot(t0 + Duration::from_secs(6));
        assert_eq!(snap.cursor, 11);
        assert_eq!(snap.correct, 7);
        assert!(snap.started);
        assert!(!snap.finished);
        assert_eq!(snap.elapsed, Duration::from_secs(6));
        assert_eq!(snap.remaining, Some(Duration::from_secs(24)));
        assert_eq!((snap.typed, snap.total), (7, 8));
        // "fn" and "a()" in a tenth of a minute
        assert!((snap.wpm - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_reset_clears_session_keeps_target() {
        let mut drill = DrillState::new("abc", 5);
        let t0 = Instant::now();
        type_str(&mut drill, "ax", t0);
        drill.on_tick(t0 + Duration::from_secs(6));
        assert!(drill.is_finished());

        drill.reset();
        assert!(drill.input().is_empty());
        assert_eq!((drill.correct_count(), drill.incorrect_count()), (0, 0));
        assert!(drill.error_positions().is_empty());
        assert!(!drill.timer().is_started());
        assert_eq!(drill.timer().limit(), Some(Duration::from_secs(5)));
        assert_eq!(drill.target, vec!['a', 'b', 'c']);
    }
}

use std::collections::HashSet;

use crate::engine::alignment::{self, AlignError};

/// One user action on the typing buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keystroke {
    Backspace,
    /// A space or printable character.
    Char(char),
    /// Enter. Only accepted where the target expects a line break.
    Newline,
}

impl From<char> for Keystroke {
    fn from(ch: char) -> Self {
        if ch == '\n' {
            Keystroke::Newline
        } else {
            Keystroke::Char(ch)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeystrokeOutcome {
    /// A character was judged and appended. `expected` is `None` when the
    /// input had already run past the end of the target.
    Judged {
        position: usize,
        expected: Option<char>,
        actual: char,
        correct: bool,
    },
    NewlineAccepted {
        position: usize,
    },
    Erased,
    /// Nothing changed: newline at the wrong place, backspace on an empty
    /// buffer, or the session no longer accepts typing.
    Ignored,
}

impl KeystrokeOutcome {
    pub fn changed_buffer(&self) -> bool {
        !matches!(self, KeystrokeOutcome::Ignored)
    }
}

/// The typed buffer and its correctness counters.
///
/// Counters and the error set only grow. Backspace removes characters from
/// the buffer but a mistake, once counted, stays counted.
#[derive(Clone, Debug, Default)]
pub struct InputTracker {
    buffer: Vec<char>,
    correct: usize,
    incorrect: usize,
    error_positions: HashSet<usize>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &[char] {
        &self.buffer
    }

    pub fn correct_count(&self) -> usize {
        self.correct
    }

    pub fn incorrect_count(&self) -> usize {
        self.incorrect
    }

    pub fn error_positions(&self) -> &HashSet<usize> {
        &self.error_positions
    }

    pub fn apply(&mut self, target: &[char], key: Keystroke) -> KeystrokeOutcome {
        match key {
            Keystroke::Backspace => self.backspace(),
            Keystroke::Char('\n') | Keystroke::Newline => self.newline(target),
            Keystroke::Char(ch) => self.type_char(target, ch),
        }
    }

    fn backspace(&mut self) -> KeystrokeOutcome {
        match self.buffer.pop() {
            Some(_) => KeystrokeOutcome::Erased,
            None => KeystrokeOutcome::Ignored,
        }
    }

    fn type_char(&mut self, target: &[char], ch: char) -> KeystrokeOutcome {
        let position = alignment::cursor_position(target, &self.buffer);
        let expected = match alignment::expected_char(target, &self.buffer) {
            Ok(expected) => Some(expected),
            Err(AlignError::InputExhausted { .. } | AlignError::EmptyTarget) => None,
        };
        let correct = expected == Some(ch);

        if correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
            self.error_positions.insert(position);
        }
        self.buffer.push(ch);

        KeystrokeOutcome::Judged {
            position,
            expected,
            actual: ch,
            correct,
        }
    }

    fn newline(&mut self, target: &[char]) -> KeystrokeOutcome {
        let position = alignment::cursor_position(target, &self.buffer);
        if target.get(position) != Some(&'\n') {
            return KeystrokeOutcome::Ignored;
        }
        self.buffer.push('\n');
        self.correct += 1;
        KeystrokeOutcome::NewlineAccepted { position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn type_str(tracker: &mut InputTracker, target: &[char], s: &str) {
        for ch in s.chars() {
            tracker.apply(target, Keystroke::from(ch));
        }
    }

    #[test]
    fn test_correct_typing_no_errors() {
        let target = chars("abc");
        let mut tracker = InputTracker::new();
        type_str(&mut tracker, &target, "abc");
        assert_eq!(tracker.correct_count(), 3);
        assert_eq!(tracker.incorrect_count(), 0);
        assert!(tracker.error_positions().is_empty());
    }

    #[test]
    fn test_wrong_char_is_still_appended() {
        let target = chars("abc");
        let mut tracker = InputTracker::new();
        let outcome = tracker.apply(&target, Keystroke::Char('x'));
        assert_eq!(
            outcome,
            KeystrokeOutcome::Judged {
                position: 0,
                expected: Some('a'),
                actual: 'x',
                correct: false
            }
        );
        assert_eq!(tracker.buffer(), &['x']);
        assert!(tracker.error_positions().contains(&0));
    }

    #[test]
    fn test_wrong_then_backspace_then_correct_keeps_error() {
        let target = chars("abc");
        let mut tracker = InputTracker::new();
        tracker.apply(&target, Keystroke::Char('x'));
        assert_eq!(tracker.apply(&target, Keystroke::Backspace), KeystrokeOutcome::Erased);
        tracker.apply(&target, Keystroke::Char('a'));
        assert_eq!(tracker.correct_count(), 1);
        assert_eq!(tracker.incorrect_count(), 1);
        assert!(tracker.error_positions().contains(&0));
        assert_eq!(tracker.buffer(), &['a']);
    }

    #[test]
    fn test_backspace_on_empty_buffer_is_ignored() {
        let target = chars("abc");
        let mut tracker = InputTracker::new();
        assert_eq!(tracker.apply(&target, Keystroke::Backspace), KeystrokeOutcome::Ignored);
    }

    #[test]
    fn test_judges_against_indent_skipped_position() {
        let target = chars("{\n    x");
        let mut tracker = InputTracker::new();
        type_str(&mut tracker, &target, "{\nx");
        assert_eq!(tracker.incorrect_count(), 0);
        assert_eq!(tracker.correct_count(), 3);
    }

    #[test]
    fn test_typing_indent_is_judged_wrong() {
        let target = chars("{\n    x");
        let mut tracker = InputTracker::new();
        type_str(&mut tracker, &target, "{\n");
        tracker.apply(&target, Keystroke::Char(' '));
        assert_eq!(tracker.incorrect_count(), 1);
        // the error lands on 'x', the first non-indent position
        assert!(tracker.error_positions().contains(&6));
    }

    #[test]
    fn test_newline_only_where_expected() {
        let target = chars("ab\ncd");
        let mut tracker = InputTracker::new();
        tracker.apply(&target, Keystroke::Char('a'));
        assert_eq!(tracker.apply(&target, Keystroke::Newline), KeystrokeOutcome::Ignored);
        assert_eq!(tracker.buffer(), &['a']);
        tracker.apply(&target, Keystroke::Char('b'));
        assert_eq!(
            tracker.apply(&target, Keystroke::Newline),
            KeystrokeOutcome::NewlineAccepted { position: 2 }
        );
        assert_eq!(tracker.correct_count(), 3);
    }

    #[test]
    fn test_newline_after_mistake_counts_correct() {
        let target = chars("ab\ncd");
        let mut tracker = InputTracker::new();
        type_str(&mut tracker, &target, "xy");
        tracker.apply(&target, Keystroke::Newline);
        assert_eq!(tracker.buffer(), &['x', 'y', '\n']);
        assert_eq!(tracker.correct_count(), 1);
        assert_eq!(tracker.incorrect_count(), 2);
    }

    #[test]
    fn test_typing_past_end_is_incorrect() {
        let target = chars("a");
        let mut tracker = InputTracker::new();
        type_str(&mut tracker, &target, "aa");
        assert_eq!(tracker.incorrect_count(), 1);
        assert!(tracker.error_positions().contains(&1));
    }

    #[test]
    fn test_judged_count_never_decreases() {
        let target = chars("fn x() {\n\ty\n}");
        let mut tracker = InputTracker::new();
        let keys = [
            Keystroke::Char('f'),
            Keystroke::Char('m'),
            Keystroke::Backspace,
            Keystroke::Backspace,
            Keystroke::Backspace,
            Keystroke::Char('f'),
            Keystroke::Newline,
            Keystroke::Char('n'),
            Keystroke::Backspace,
        ];
        let mut last = 0;
        for key in keys {
            tracker.apply(&target, key);
            let judged = tracker.correct_count() + tracker.incorrect_count();
            assert!(judged >= last);
            last = judged;
        }
        assert_eq!(last, 4);
    }
}

use std::time::Duration;

use crate::engine::completion::normalize_chars;

/// Words per minute, counting whitespace-delimited tokens of the raw input.
pub fn wpm(input: &[char], elapsed: Duration) -> f64 {
    if input.is_empty() {
        return 0.0;
    }
    let minutes = elapsed.as_secs_f64() / 60.0;
    if minutes == 0.0 {
        return 0.0;
    }
    let words = input
        .split(|c| c.is_whitespace())
        .filter(|word| !word.is_empty())
        .count();
    words as f64 / minutes
}

/// Live accuracy from the monotonic keystroke counters.
pub fn accuracy(correct: usize, incorrect: usize) -> f64 {
    let total = correct + incorrect;
    if total == 0 {
        return 100.0;
    }
    correct as f64 / total as f64 * 100.0
}

/// Legacy accuracy: raw buffer compared position by position against the
/// target over the shorter length, scaled by target length.
///
/// Ignores indentation skipping entirely, so it under-reports on indented
/// excerpts. Not shown anywhere; [`accuracy`] is the canonical figure.
pub fn positional_accuracy(input: &[char], target: &[char]) -> f64 {
    if target.is_empty() {
        return 100.0;
    }
    let matches = input
        .iter()
        .zip(target.iter())
        .filter(|(a, b)| a == b)
        .count();
    matches as f64 / target.len() as f64 * 100.0
}

/// `(typed, total)` lengths of the normalized input and target.
pub fn progress(input: &[char], target: &[char]) -> (usize, usize) {
    (
        normalize_chars(input).chars().count(),
        normalize_chars(target).chars().count(),
    )
}

/// Zero-width space used to break up programming ligatures on screen.
pub const LIGATURE_BREAKER: char = '\u{200B}';

/// Strip every line's leading spaces and tabs, plus any ligature breakers.
///
/// Only used for completion and progress; never for judging keystrokes.
pub fn normalize(text: &str) -> String {
    let cleaned: String = text.chars().filter(|&c| c != LIGATURE_BREAKER).collect();
    cleaned
        .split('\n')
        .map(|line| line.trim_start_matches([' ', '\t']))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn normalize_chars(text: &[char]) -> String {
    normalize(&text.iter().collect::<String>())
}

/// A session is complete when input and target agree once indentation is
/// ignored. Any other difference, trailing whitespace included, blocks it.
pub fn is_complete(input: &[char], target: &[char]) -> bool {
    normalize_chars(input) == normalize_chars(target)
}

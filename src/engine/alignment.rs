use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AlignError {
    #[error("target position {pos} is past the end of the target text ({len} chars)")]
    InputExhausted { pos: usize, len: usize },
    #[error("target text has nothing to type")]
    EmptyTarget,
}

/// Where a typed buffer lands in the target text.
///
/// Always computed fresh from `(target, input)`; nothing here is cached
/// between keystrokes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Alignment {
    /// Index of the next character the user must type. Either past the end of
    /// the target or on a character that is not leading whitespace.
    pub target_pos: usize,
    /// How many input characters were matched against target positions.
    /// Less than `input.len()` only when the target ran out first.
    pub input_consumed: usize,
    pub at_line_start: bool,
}

impl Alignment {
    /// True when every target position has been passed.
    pub fn is_exhausted(&self, target: &[char]) -> bool {
        self.target_pos >= target.len()
    }
}

fn is_indent(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

/// The one scan every alignment query is built on.
///
/// Walks `target` while input remains, calling `visit(pos, Some(i))` when
/// target position `pos` consumes input character `i` and `visit(pos, None)`
/// when `pos` is skipped leading whitespace. Once the input is used up it
/// keeps skipping leading whitespace, so `target_pos` never rests on an
/// indent.
fn walk(
    target: &[char],
    input_len: usize,
    mut visit: impl FnMut(usize, Option<usize>),
) -> Alignment {
    let mut target_pos = 0;
    let mut input_pos = 0;
    let mut at_line_start = true;

    while target_pos < target.len() && input_pos < input_len {
        let ch = target[target_pos];
        if at_line_start && is_indent(ch) {
            visit(target_pos, None);
        } else {
            visit(target_pos, Some(input_pos));
            input_pos += 1;
            at_line_start = false;
        }
        if ch == '\n' {
            at_line_start = true;
        }
        target_pos += 1;
    }

    while at_line_start && target_pos < target.len() && is_indent(target[target_pos]) {
        visit(target_pos, None);
        target_pos += 1;
    }

    Alignment {
        target_pos,
        input_consumed: input_pos,
        at_line_start,
    }
}

/// Map `input` onto `target`, skipping each line's leading spaces and tabs.
///
/// Leading whitespace never consumes input. Every other target character,
/// `\n` included, consumes exactly one input character.
pub fn align(target: &[char], input: &[char]) -> Alignment {
    walk(target, input.len(), |_, _| {})
}

/// For each target position, the input character that landed on it. Skipped
/// indentation and positions not reached yet are `None`.
pub fn typed_at(target: &[char], input: &[char]) -> Vec<Option<char>> {
    let mut out = vec![None; target.len()];
    walk(target, input.len(), |pos, consumed| {
        out[pos] = consumed.map(|i| input[i]);
    });
    out
}

/// Position used to draw the cursor in the target text.
pub fn cursor_position(target: &[char], input: &[char]) -> usize {
    align(target, input).target_pos
}

/// The character the user must type next.
pub fn expected_char(target: &[char], input: &[char]) -> Result<char, AlignError> {
    if !has_content(target) {
        return Err(AlignError::EmptyTarget);
    }
    let pos = cursor_position(target, input);
    target
        .get(pos)
        .copied()
        .ok_or(AlignError::InputExhausted {
            pos,
            len: target.len(),
        })
}

/// False when the target is empty or made only of indentation.
pub fn has_content(target: &[char]) -> bool {
    !align(target, &[]).is_exhausted(target)
}

/// Per-position flag: `true` where the target character is leading whitespace.
///
/// Same scan as [`align`] run with unbounded input, so the renderer dims
/// exactly the positions the judge skips.
pub fn skippable_mask(target: &[char]) -> Vec<bool> {
    let mut mask = vec![false; target.len()];
    walk(target, usize::MAX, |pos, consumed| {
        mask[pos] = consumed.is_none();
    });
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_empty_input_skips_initial_indent() {
        let target = chars("    let x = 1;");
        let a = align(&target, &[]);
        assert_eq!(a.target_pos, 4);
        assert_eq!(a.input_consumed, 0);
        assert!(a.at_line_start);
    }

    #[test]
    fn test_no_indent_maps_one_to_one() {
        let target = chars("abc");
        let a = align(&target, &chars("ab"));
        assert_eq!(a.target_pos, 2);
        assert_eq!(a.input_consumed, 2);
        assert!(!a.at_line_start);
    }

    #[test]
    fn test_newline_then_indent_is_skipped() {
        let target = chars("if x {\n\t\treturn\n}");
        let a = align(&target, &chars("if x {\n"));
        // lands on 'r' past the two tabs
        assert_eq!(target[a.target_pos], 'r');
        assert_eq!(a.target_pos, 9);
    }

    #[test]
    fn test_mixed_spaces_and_tabs_skipped_together() {
        let target = chars("a\n \t  b");
        let a = align(&target, &chars("a\n"));
        assert_eq!(target[a.target_pos], 'b');
    }

    #[test]
    fn test_inner_whitespace_is_not_skipped() {
        let target = chars("x  = 1");
        let a = align(&target, &chars("x"));
        assert_eq!(a.target_pos, 1);
        assert_eq!(target[a.target_pos], ' ');
    }

    #[test]
    fn test_excess_input_stops_at_end() {
        let target = chars("ab");
        let a = align(&target, &chars("abcd"));
        assert_eq!(a.target_pos, 2);
        assert_eq!(a.input_consumed, 2);
        assert!(a.is_exhausted(&target));
    }

    #[test]
    fn test_align_is_idempotent() {
        let target = chars("func f() {\n    return 1\n}");
        let input = chars("func f() {\nret");
        assert_eq!(align(&target, &input), align(&target, &input));
    }

    #[test]
    fn test_prefixes_never_land_on_indent() {
        let target = chars("\tfunc a() {\n\t\tx := 1\n\n    \ty()\n\t}");
        let mask = skippable_mask(&target);
        // A correct rendition types everything except leading indentation.
        let rendition: Vec<char> = target
            .iter()
            .zip(mask.iter().copied())
            .filter(|(_, skip)| !skip)
            .map(|(&c, _)| c)
            .collect();
        for n in 0..=rendition.len() {
            let pos = cursor_position(&target, &rendition[..n]);
            assert!(
                !mask.get(pos).copied().unwrap_or(false),
                "prefix {n} landed on indent at {pos}"
            );
        }
        assert_eq!(cursor_position(&target, &rendition), target.len());
    }

    #[test]
    fn test_expected_char() {
        let target = chars("  ab");
        assert_eq!(expected_char(&target, &[]), Ok('a'));
        assert_eq!(expected_char(&target, &chars("a")), Ok('b'));
        assert_eq!(
            expected_char(&target, &chars("ab")),
            Err(AlignError::InputExhausted { pos: 4, len: 4 })
        );
    }

    #[test]
    fn test_expected_char_empty_target() {
        assert_eq!(expected_char(&[], &[]), Err(AlignError::EmptyTarget));
        assert_eq!(expected_char(&chars(" \t "), &[]), Err(AlignError::EmptyTarget));
    }

    #[test]
    fn test_blank_line_newline_is_content() {
        assert!(has_content(&chars("\n")));
        assert!(!has_content(&chars("   ")));
    }

    #[test]
    fn test_skippable_mask() {
        let target = chars(" a b\n\tc");
        assert_eq!(
            skippable_mask(&target),
            vec![true, false, false, false, false, true, false]
        );
    }

    #[test]
    fn test_typed_at_skips_indent() {
        let target = chars("a\n  bc");
        let got = typed_at(&target, &chars("a\nx"));
        assert_eq!(got, vec![Some('a'), Some('\n'), None, None, Some('x'), None]);
        assert_eq!(typed_at(&target, &[]), vec![None; 6]);
    }
}

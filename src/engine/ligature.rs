/// Character pairs that common coding fonts render as a single glyph.
const LIGATURE_PAIRS: &[(char, char)] = &[
    (':', '='),
    ('!', '='),
    ('=', '='),
    ('<', '='),
    ('>', '='),
    ('-', '>'),
    ('<', '-'),
    ('|', '|'),
    ('&', '&'),
    ('+', '+'),
    ('-', '-'),
    (':', ':'),
    ('.', '.'),
    ('/', '*'),
    ('*', '/'),
    ('/', '/'),
    ('=', '>'),
];

/// True when a zero-width space should be drawn between `a` and `b` so the
/// terminal gives each its own cell.
pub fn breaks_between(a: char, b: char) -> bool {
    LIGATURE_PAIRS.iter().any(|&(x, y)| x == a && y == b)
}

use std::path::Path;

/// How a language delimits a function body.
pub enum BlockStyle {
    /// Header line starting with one of the prefixes, body closed by the
    /// matching `}`.
    Braces(&'static [&'static str]),
    /// Header line starting with one of the prefixes, body is every following
    /// line indented deeper than the header.
    Indentation(&'static [&'static str]),
}

pub struct CodeLanguage {
    pub key: &'static str,
    pub extensions: &'static [&'static str],
    pub block_style: BlockStyle,
}

pub const CODE_LANGUAGES: &[CodeLanguage] = &[
    CodeLanguage {
        key: "go",
        extensions: &["go"],
        block_style: BlockStyle::Braces(&["func "]),
    },
    CodeLanguage {
        key: "rust",
        extensions: &["rs"],
        block_style: BlockStyle::Braces(&[
            "fn ",
            "pub fn ",
            "pub(crate) fn ",
            "async fn ",
            "pub async fn ",
            "const fn ",
            "pub const fn ",
            "unsafe fn ",
            "pub unsafe fn ",
        ]),
    },
    CodeLanguage {
        key: "javascript",
        extensions: &["js", "mjs", "jsx"],
        block_style: BlockStyle::Braces(&[
            "function ",
            "async function ",
            "export function ",
            "export async function ",
            "export default function ",
        ]),
    },
    CodeLanguage {
        key: "typescript",
        extensions: &["ts", "tsx"],
        block_style: BlockStyle::Braces(&[
            "function ",
            "async function ",
            "export function ",
            "export async function ",
            "export default function ",
        ]),
    },
    CodeLanguage {
        key: "python",
        extensions: &["py"],
        block_style: BlockStyle::Indentation(&["def ", "async def "]),
    },
];

/// Give up on a block whose closing brace never shows up.
const MAX_BLOCK_SCAN: usize = 1000;

pub fn language_for_path(path: &Path) -> Option<&'static CodeLanguage> {
    let ext = path.extension()?.to_str()?;
    CODE_LANGUAGES
        .iter()
        .find(|lang| lang.extensions.contains(&ext))
}

/// Lines of a block once surrounding blank space is trimmed.
pub fn count_lines(text: &str) -> usize {
    text.trim().split('\n').count()
}

/// Pull whole function definitions out of a source file, original
/// indentation intact.
pub fn extract_functions(source: &str, block_style: &BlockStyle) -> Vec<String> {
    let lines: Vec<&str> = source.lines().collect();
    match block_style {
        BlockStyle::Braces(patterns) => extract_braces(&lines, patterns),
        BlockStyle::Indentation(patterns) => extract_indented(&lines, patterns),
    }
}

fn starts_block(line: &str, patterns: &[&str]) -> bool {
    let trimmed = line.trim_start();
    patterns.iter().any(|p| trimmed.starts_with(p))
}

fn extract_braces(lines: &[&str], patterns: &[&str]) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if !starts_block(lines[i], patterns) {
            i += 1;
            continue;
        }

        let mut depth = 0i32;
        let mut opened = false;
        let mut end = None;
        let mut j = i;
        while j < lines.len() && j - i < MAX_BLOCK_SCAN {
            let l = lines[j];
            let opens = l.chars().filter(|&c| c == '{').count() as i32;
            let closes = l.chars().filter(|&c| c == '}').count() as i32;
            depth += opens - closes;
            opened |= opens > 0;
            if opened && depth <= 0 {
                end = Some(j);
                break;
            }
            // A declaration that ends before any body opens, e.g. a trait
            // method signature or a Go assembly stub.
            if !opened && l.trim_end().ends_with(';') {
                break;
            }
            j += 1;
        }

        match end {
            Some(end) => {
                blocks.push(lines[i..=end].join("\n"));
                i = end + 1;
            }
            None => i += 1,
        }
    }

    blocks
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

fn extract_indented(lines: &[&str], patterns: &[&str]) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if !starts_block(lines[i], patterns) {
            i += 1;
            continue;
        }

        let base_indent = indent_of(lines[i]);
        let mut block = vec![lines[i]];
        let mut j = i + 1;
        while j < lines.len() {
            let l = lines[j];
            if l.trim().is_empty() || indent_of(l) > base_indent {
                block.push(l);
                j += 1;
            } else {
                break;
            }
        }
        while block.last().is_some_and(|l| l.trim().is_empty()) {
            block.pop();
        }

        if block.len() > 1 {
            blocks.push(block.join("\n"));
        }
        // Nested defs are part of this block, not separate excerpts.
        i = j;
    }

    blocks
}

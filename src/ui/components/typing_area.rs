use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::engine::alignment;
use crate::engine::completion::LIGATURE_BREAKER;
use crate::engine::ligature;
use crate::session::drill::DrillState;
use crate::ui::theme::Theme;

const TAB_WIDTH: usize = 4;

pub struct TypingArea<'a> {
    drill: &'a DrillState,
    theme: &'a Theme,
    break_ligatures: bool,
}

impl<'a> TypingArea<'a> {
    pub fn new(drill: &'a DrillState, theme: &'a Theme) -> Self {
        Self {
            drill,
            theme,
            break_ligatures: false,
        }
    }

    pub fn break_ligatures(mut self, on: bool) -> Self {
        self.break_ligatures = on;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CellKind {
    Indent,
    Correct,
    Incorrect,
    Pending,
    Blank,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Cell {
    symbol: String,
    kind: CellKind,
    cursor: bool,
}

impl Cell {
    fn new(symbol: impl Into<String>, kind: CellKind) -> Self {
        Self {
            symbol: symbol.into(),
            kind,
            cursor: false,
        }
    }

    fn blank(width: usize) -> Self {
        Self::new(" ".repeat(width), CellKind::Blank)
    }
}

/// One target line: the top row holds mistyped characters, the bottom row
/// holds the target itself.
#[derive(Debug, Default)]
struct RowPair {
    top: Vec<Cell>,
    bottom: Vec<Cell>,
}

fn build_rows(drill: &DrillState, break_ligatures: bool) -> Vec<RowPair> {
    let target = &drill.target;
    let input = drill.input();
    let typed = alignment::typed_at(target, input);
    let mask = alignment::skippable_mask(target);
    let cursor = (!drill.is_finished()).then(|| drill.cursor());

    let mut rows = vec![RowPair::default()];
    let mut col = 0usize;

    for (pos, &ch) in target.iter().enumerate() {
        let is_cursor = cursor == Some(pos);
        let Some(row) = rows.last_mut() else {
            break;
        };

        if ch == '\n' {
            match typed[pos] {
                Some('\n') => {}
                Some(wrong) => {
                    row.top.push(Cell::new(wrong, CellKind::Incorrect));
                    row.bottom.push(Cell::new('\u{21b5}', CellKind::Incorrect));
                }
                None if is_cursor => {
                    row.top.push(Cell::blank(1));
                    let mut end = Cell::new(' ', CellKind::Pending);
                    end.cursor = true;
                    row.bottom.push(end);
                }
                None => {}
            }
            rows.push(RowPair::default());
            col = 0;
            continue;
        }

        let width = if ch == '\t' { TAB_WIDTH - col % TAB_WIDTH } else { 1 };
        col += width;
        let mut symbol = if ch == '\t' {
            " ".repeat(width)
        } else {
            ch.to_string()
        };

        if mask[pos] {
            row.top.push(Cell::new(symbol.clone(), CellKind::Indent));
            row.bottom.push(Cell::new(symbol, CellKind::Indent));
            continue;
        }

        if break_ligatures
            && target
                .get(pos + 1)
                .is_some_and(|&next| ligature::breaks_between(ch, next))
        {
            symbol.push(LIGATURE_BREAKER);
        }

        let kind = match typed[pos] {
            Some(actual) if actual == ch => {
                row.top.push(Cell::blank(width));
                CellKind::Correct
            }
            Some(actual) => {
                let mut shown = actual.to_string();
                shown.push_str(&" ".repeat(width - 1));
                row.top.push(Cell::new(shown, CellKind::Incorrect));
                CellKind::Incorrect
            }
            None => {
                row.top.push(Cell::blank(width));
                CellKind::Pending
            }
        };
        let mut cell = Cell::new(symbol, kind);
        cell.cursor = is_cursor;
        row.bottom.push(cell);
    }

    // Keystrokes past the end of the target.
    let consumed = alignment::align(target, input).input_consumed;
    if let Some(row) = rows.last_mut() {
        for &extra in &input[consumed.min(input.len())..] {
            row.top.push(Cell::new(extra, CellKind::Incorrect));
        }
    }

    rows
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let style_for = |cell: &Cell| {
            let style = match cell.kind {
                CellKind::Indent => Style::default().fg(colors.text_indent()),
                CellKind::Correct => Style::default().fg(colors.text_correct()),
                CellKind::Incorrect => Style::default()
                    .fg(colors.text_incorrect())
                    .bg(colors.text_incorrect_bg()),
                CellKind::Pending => Style::default().fg(colors.text_pending()),
                CellKind::Blank => Style::default(),
            };
            if cell.cursor {
                style.add_modifier(Modifier::UNDERLINED)
            } else {
                style
            }
        };

        let to_line = |cells: Vec<Cell>| {
            Line::from(
                cells
                    .into_iter()
                    .map(|c| {
                        let style = style_for(&c);
                        Span::styled(c.symbol, style)
                    })
                    .collect::<Vec<_>>(),
            )
        };

        let lines: Vec<Line> = build_rows(self.drill, self.break_ligatures)
            .into_iter()
            .flat_map(|pair| [to_line(pair.top), to_line(pair.bottom)])
            .collect();

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(colors.border_focused()))
            .padding(Padding::new(2, 2, 1, 1))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

use std::path::Path;
use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::session::result::DrillSnapshot;
use crate::ui::theme::{Theme, ThemeColors};

const MAX_PATH_CHARS: usize = 30;

pub struct InfoPane<'a> {
    folder: &'a str,
    source: Option<&'a Path>,
    snapshot: &'a DrillSnapshot,
    theme: &'a Theme,
}

impl<'a> InfoPane<'a> {
    pub fn new(
        folder: &'a str,
        source: Option<&'a Path>,
        snapshot: &'a DrillSnapshot,
        theme: &'a Theme,
    ) -> Self {
        Self {
            folder,
            source,
            snapshot,
            theme,
        }
    }
}

/// Keep the tail of a long path, which is the part that tells files apart.
pub fn truncate_path(path: &str, max_chars: usize) -> String {
    let len = path.chars().count();
    if len <= max_chars {
        return path.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let tail: String = path.chars().skip(len - keep).collect();
    format!("...{tail}")
}

/// Color for the countdown: calm, then warning under 20s, then error under 10s.
fn urgency_color(remaining: Duration, colors: &ThemeColors) -> Color {
    if remaining < Duration::from_secs(10) {
        colors.error()
    } else if remaining < Duration::from_secs(20) {
        colors.warning()
    } else {
        colors.stats()
    }
}

impl Widget for InfoPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let snap = self.snapshot;
        let label = Style::default().fg(colors.label());
        let value = Style::default()
            .fg(colors.value())
            .add_modifier(Modifier::BOLD);
        let stat = Style::default().fg(colors.stats());

        let file_name = self
            .source
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let full_path = self
            .source
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        let mut lines = vec![
            Line::from(Span::styled("Directory:", label)),
            Line::from(Span::styled(self.folder.to_string(), value)),
            Line::from(""),
            Line::from(Span::styled("File:", label)),
            Line::from(Span::styled(file_name, value)),
            Line::from(""),
            Line::from(Span::styled("Path:", label)),
            Line::from(Span::styled(truncate_path(&full_path, MAX_PATH_CHARS), value)),
            Line::from(""),
            Line::from(Span::styled(
                "\u{2500}".repeat(area.width.saturating_sub(6) as usize),
                Style::default().fg(colors.border()),
            )),
            Line::from(""),
        ];

        if let Some(remaining) = snap.remaining {
            lines.push(Line::from(Span::styled("Time Remaining:", label)));
            lines.push(Line::from(Span::styled(
                format!("{:.1}s", remaining.as_secs_f64()),
                Style::default()
                    .fg(urgency_color(remaining, colors))
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled("Elapsed:", label)));
        lines.push(Line::from(Span::styled(
            format!("{:.2}s", snap.elapsed.as_secs_f64()),
            stat,
        )));
        lines.push(Line::from(""));

        if snap.started {
            lines.push(Line::from(Span::styled("WPM:", label)));
            lines.push(Line::from(Span::styled(format!("{:.1}", snap.wpm), stat)));
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled("Progress:", label)));
        lines.push(Line::from(Span::styled(
            format!(
                "{}/{} ({:.1}%)",
                snap.typed,
                snap.total,
                snap.progress_percent()
            ),
            stat,
        )));

        if snap.finished {
            lines.push(Line::from(""));
            let heading = if snap.timed_out { "Time's up! Accuracy:" } else { "Accuracy:" };
            lines.push(Line::from(Span::styled(heading, label)));
            lines.push(Line::from(Span::styled(
                format!("{:.1}%", snap.accuracy),
                stat,
            )));
        }

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(colors.border()))
            .padding(Padding::new(2, 2, 1, 1))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

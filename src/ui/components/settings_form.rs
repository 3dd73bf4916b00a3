use crossterm::event::KeyEvent;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget, Wrap};

use crate::config::{Config, ConfigError, parse_count, parse_secs};
use crate::ui::line_input::{InputResult, LineInput};
use crate::ui::theme::Theme;

const LABELS: [&str; 4] = [
    "Folder Path:",
    "Minimum Lines:",
    "Maximum Lines:",
    "Max Time Limit (seconds, 0 = no limit):",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormAction {
    Continue,
    Submit,
    Cancel,
}

/// Editable copy of the four user settings. Nothing touches the live config
/// until [`SettingsForm::apply`] succeeds.
#[derive(Clone, Debug)]
pub struct SettingsForm {
    fields: [LineInput; 4],
    focus: usize,
    pub error: Option<String>,
}

impl SettingsForm {
    pub fn from_config(config: &Config) -> Self {
        Self {
            fields: [
                LineInput::new(&config.folder_path),
                LineInput::numeric(config.min_lines),
                LineInput::numeric(config.max_lines),
                LineInput::numeric(config.max_time_limit),
            ],
            focus: 0,
            error: None,
        }
    }

    pub fn handle(&mut self, key: KeyEvent) -> FormAction {
        match self.fields[self.focus].handle(key) {
            InputResult::Continue => {}
            InputResult::Next => self.focus = (self.focus + 1) % self.fields.len(),
            InputResult::Prev => {
                self.focus = (self.focus + self.fields.len() - 1) % self.fields.len()
            }
            InputResult::Submit => return FormAction::Submit,
            InputResult::Cancel => return FormAction::Cancel,
        }
        FormAction::Continue
    }

    /// Parse and validate every field against a copy of `base`.
    pub fn apply(&self, base: &Config) -> Result<Config, ConfigError> {
        let mut config = base.clone();
        config.set_folder_path(self.fields[0].value())?;
        let min = parse_count("minimum lines", self.fields[1].value())?;
        let max = parse_count("maximum lines", self.fields[2].value())?;
        config.set_line_bounds(min, max)?;
        config.set_max_time_limit(parse_secs("max time limit", self.fields[3].value())?);
        Ok(config)
    }
}

pub struct SettingsView<'a> {
    form: &'a SettingsForm,
    theme: &'a Theme,
}

impl<'a> SettingsView<'a> {
    pub fn new(form: &'a SettingsForm, theme: &'a Theme) -> Self {
        Self { form, theme }
    }
}

impl Widget for SettingsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let form_label = Style::default()
            .fg(colors.stats())
            .add_modifier(Modifier::BOLD);

        let mut lines = Vec::new();
        for (i, (label, field)) in LABELS.iter().zip(&self.form.fields).enumerate() {
            let focused = i == self.form.focus;
            lines.push(Line::from(Span::styled(*label, form_label)));

            let marker = if focused { "> " } else { "  " };
            let text_style = Style::default().fg(if focused {
                colors.value()
            } else {
                colors.label()
            });
            let mut spans = vec![Span::styled(marker, Style::default().fg(colors.title()))];
            if focused {
                let (before, at, after) = field.render_parts();
                let cursor_style = text_style.add_modifier(Modifier::REVERSED);
                spans.push(Span::styled(before.to_string(), text_style));
                spans.push(Span::styled(
                    at.map_or_else(|| " ".to_string(), String::from),
                    cursor_style,
                ));
                spans.push(Span::styled(after.to_string(), text_style));
            } else {
                spans.push(Span::styled(field.value().to_string(), text_style));
            }
            lines.push(Line::from(spans));
            lines.push(Line::from(""));
        }

        if let Some(err) = &self.form.error {
            lines.push(Line::from(Span::styled(
                err.clone(),
                Style::default().fg(colors.error()),
            )));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

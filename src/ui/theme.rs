use std::fs;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::config::Config;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Colors are `#rrggbb`, a 256-color palette index such as `"170"`, or
/// `"reset"` for the terminal default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub title: String,
    pub text_correct: String,
    pub text_incorrect: String,
    pub text_incorrect_bg: String,
    pub text_indent: String,
    pub text_pending: String,
    pub label: String,
    pub value: String,
    pub stats: String,
    pub border: String,
    pub border_focused: String,
    pub warning: String,
    pub error: String,
}

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        let user_theme_path = Config::config_dir()
            .join("themes")
            .join(format!("{name}.toml"));
        if let Ok(content) = fs::read_to_string(&user_theme_path) {
            match toml::from_str::<Theme>(&content) {
                Ok(theme) => return Some(theme),
                Err(e) => tracing::warn!(
                    path = %user_theme_path.display(),
                    error = %e,
                    "ignoring unreadable theme"
                ),
            }
        }
        Self::builtin(name)
    }

    pub fn builtin(name: &str) -> Option<Self> {
        let colors = match name {
            "vibes" => ThemeColors::default(),
            "catppuccin-mocha" => ThemeColors::catppuccin_mocha(),
            _ => return None,
        };
        Some(Self {
            name: name.to_string(),
            colors,
        })
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "vibes".to_string(),
            colors: ThemeColors::default(),
        }
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "reset".to_string(),
            fg: "reset".to_string(),
            title: "170".to_string(),
            text_correct: "42".to_string(),
            text_incorrect: "196".to_string(),
            text_incorrect_bg: "52".to_string(),
            text_indent: "240".to_string(),
            text_pending: "reset".to_string(),
            label: "241".to_string(),
            value: "255".to_string(),
            stats: "86".to_string(),
            border: "238".to_string(),
            border_focused: "170".to_string(),
            warning: "214".to_string(),
            error: "196".to_string(),
        }
    }
}

impl ThemeColors {
    fn catppuccin_mocha() -> Self {
        Self {
            bg: "#1e1e2e".to_string(),
            fg: "#cdd6f4".to_string(),
            title: "#cba6f7".to_string(),
            text_correct: "#a6e3a1".to_string(),
            text_incorrect: "#f38ba8".to_string(),
            text_incorrect_bg: "#45273a".to_string(),
            text_indent: "#45475a".to_string(),
            text_pending: "#cdd6f4".to_string(),
            label: "#7f849c".to_string(),
            value: "#cdd6f4".to_string(),
            stats: "#94e2d5".to_string(),
            border: "#45475a".to_string(),
            border_focused: "#cba6f7".to_string(),
            warning: "#fab387".to_string(),
            error: "#f38ba8".to_string(),
        }
    }

    pub fn parse_color(spec: &str) -> Color {
        let spec = spec.trim();
        if spec.eq_ignore_ascii_case("reset") {
            return Color::Reset;
        }
        if let Some(hex) = spec.strip_prefix('#') {
            if hex.len() == 6 {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&hex[0..2], 16),
                    u8::from_str_radix(&hex[2..4], 16),
                    u8::from_str_radix(&hex[4..6], 16),
                ) {
                    return Color::Rgb(r, g, b);
                }
            }
            return Color::White;
        }
        spec.parse::<u8>().map(Color::Indexed).unwrap_or(Color::White)
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn title(&self) -> Color { Self::parse_color(&self.title) }
    pub fn text_correct(&self) -> Color { Self::parse_color(&self.text_correct) }
    pub fn text_incorrect(&self) -> Color { Self::parse_color(&self.text_incorrect) }
    pub fn text_incorrect_bg(&self) -> Color { Self::parse_color(&self.text_incorrect_bg) }
    pub fn text_indent(&self) -> Color { Self::parse_color(&self.text_indent) }
    pub fn text_pending(&self) -> Color { Self::parse_color(&self.text_pending) }
    pub fn label(&self) -> Color { Self::parse_color(&self.label) }
    pub fn value(&self) -> Color { Self::parse_color(&self.value) }
    pub fn stats(&self) -> Color { Self::parse_color(&self.stats) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn border_focused(&self) -> Color { Self::parse_color(&self.border_focused) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
}

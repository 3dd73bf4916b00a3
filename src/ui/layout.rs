use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the info pane when it sits beside the typing pane.
pub const INFO_PANE_WIDTH: u16 = 34;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Wide,   // info pane left of the typing pane
    Narrow, // info pane stacked above the typing pane
}

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.width >= INFO_PANE_WIDTH + 40 {
            LayoutTier::Wide
        } else {
            LayoutTier::Narrow
        }
    }
}

pub struct AppLayout {
    pub title: Rect,
    pub info: Rect,
    pub typing: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect, footer_lines: u16) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(6),
                Constraint::Length(footer_lines),
            ])
            .split(area);

        let (info, typing) = match LayoutTier::from_area(area) {
            LayoutTier::Wide => {
                let horizontal = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Length(INFO_PANE_WIDTH), Constraint::Min(0)])
                    .split(vertical[1]);
                (horizontal[0], horizontal[1])
            }
            LayoutTier::Narrow => {
                let stacked = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(7), Constraint::Min(0)])
                    .split(vertical[1]);
                (stacked[0], stacked[1])
            }
        };

        Self {
            title: vertical[0],
            info,
            typing,
            footer: vertical[2],
        }
    }
}

/// Greedily pack hints into lines no wider than `width`.
pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = " ";
    let separator = " \u{2022} ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints.iter().filter(|h| !h.is_empty()) {
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width || !has_hint {
            current = candidate;
        } else {
            out.push(current);
            current = format!("{prefix}{hint}");
        }
        has_hint = true;
    }

    if has_hint {
        out.push(current);
    }
    out
}

/// A rect of the given percentages of `area`, centered, never smaller than
/// the settings form needs unless `area` itself is.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 60;
    const MIN_POPUP_HEIGHT: u16 = 18;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_layout_puts_info_left() {
        let area = Rect::new(0, 0, 120, 40);
        assert_eq!(LayoutTier::from_area(area), LayoutTier::Wide);
        let layout = AppLayout::new(area, 1);
        assert_eq!(layout.info.width, INFO_PANE_WIDTH);
        assert_eq!(layout.info.y, layout.typing.y);
        assert_eq!(layout.typing.x, INFO_PANE_WIDTH);
        assert_eq!(layout.footer.height, 1);
    }

    #[test]
    fn test_narrow_layout_stacks() {
        let area = Rect::new(0, 0, 50, 40);
        assert_eq!(LayoutTier::from_area(area), LayoutTier::Narrow);
        let layout = AppLayout::new(area, 2);
        assert_eq!(layout.info.width, 50);
        assert!(layout.typing.y > layout.info.y);
    }

    #[test]
    fn test_pack_hint_lines_wraps() {
        let hints = ["Ctrl+R new function", "Ctrl+S settings", "Esc quit"];
        assert_eq!(
            pack_hint_lines(&hints, 80),
            vec![" Ctrl+R new function \u{2022} Ctrl+S settings \u{2022} Esc quit".to_string()]
        );
        let wrapped = pack_hint_lines(&hints, 24);
        assert_eq!(wrapped.len(), 3);
        assert_eq!(wrapped[0], " Ctrl+R new function");
        assert!(pack_hint_lines(&hints, 0).is_empty());
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_rect(50, 50, area), area);
        let big = centered_rect(50, 50, Rect::new(0, 0, 200, 100));
        assert_eq!(big, Rect::new(50, 25, 100, 50));
    }

    #[test]
    fn test_centered_rect_keeps_settings_readable() {
        // Four fields of three lines each plus the error line.
        let body = Rect::new(0, 2, 80, 20);
        let form = centered_rect(60, 70, body);
        assert_eq!(form, Rect::new(10, 3, 60, 18));
        assert!(form.height >= 13);
    }
}

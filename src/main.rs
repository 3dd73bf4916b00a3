mod app;
mod config;
mod engine;
mod event;
mod generator;
mod logging;
mod session;
mod ui;

use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use app::{App, AppScreen};
use config::Config;
use event::{AppEvent, EventHandler, TICK_RATE};
use session::input::Keystroke;
use ui::components::info_pane::InfoPane;
use ui::components::settings_form::{FormAction, SettingsView};
use ui::components::typing_area::TypingArea;
use ui::layout::{AppLayout, centered_rect, pack_hint_lines};

const TITLE: &str = "\u{26a1} Typing Vibes";
const SETTINGS_WIDTH_PERCENT: u16 = 60;
const SETTINGS_HEIGHT_PERCENT: u16 = 70;

#[derive(Parser)]
#[command(
    name = "typing-vibes",
    version,
    about = "Typing practice on functions pulled from your own code"
)]
struct Cli {
    #[arg(short, long, help = "Folder to pull functions from")]
    folder: Option<String>,

    #[arg(long, help = "Shortest function to offer, in lines")]
    min_lines: Option<usize>,

    #[arg(long, help = "Longest function to offer, in lines")]
    max_lines: Option<usize>,

    #[arg(long, help = "Session time limit in seconds (0 = no limit)")]
    time_limit: Option<u64>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, default_value = "info", help = "Log filter, overridden by RUST_LOG")]
    log_level: String,

    #[arg(long, help = "Log file path")]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Overrides for this run only. They reach the config file only if the
    /// settings screen is saved.
    fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(folder) = &self.folder {
            config.set_folder_path(folder)?;
        }
        if self.min_lines.is_some() || self.max_lines.is_some() {
            config.set_line_bounds(
                self.min_lines.unwrap_or(config.min_lines),
                self.max_lines.unwrap_or(config.max_lines),
            )?;
        }
        if let Some(secs) = self.time_limit {
            config.set_max_time_limit(secs);
        }
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
        Ok(())
    }
}

fn load_config(path: &Path) -> Config {
    let config = match Config::load_from(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unreadable config, using defaults");
            return Config::default();
        }
    };
    match config.validate() {
        Ok(()) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
            Config::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(logging::default_log_path);
    let _log_guard = logging::init(&log_path, &cli.log_level)?;

    let config_path = Config::path();
    let mut config = load_config(&config_path);
    cli.apply(&mut config).context("invalid command line option")?;
    tracing::info!(
        folder = %config.folder_path,
        min_lines = config.min_lines,
        max_lines = config.max_lines,
        max_time_limit = config.max_time_limit,
        "starting"
    );

    let mut app = App::new(config, config_path);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(TICK_RATE);

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(error = ?err, "exited with error");
    }
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.on_tick(Instant::now()),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Welcome => handle_welcome_key(app, key, ctrl),
        AppScreen::Typing => handle_typing_key(app, key, ctrl),
        AppScreen::Settings => handle_settings_key(app, key, ctrl),
    }
}

fn handle_welcome_key(app: &mut App, key: KeyEvent, ctrl: bool) {
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Enter => app.load_excerpt(),
        KeyCode::Char('s') if ctrl => app.open_settings(),
        _ => {}
    }
}

fn handle_typing_key(app: &mut App, key: KeyEvent, ctrl: bool) {
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('s') if ctrl => app.open_settings(),
        KeyCode::Char('r') if ctrl => app.load_excerpt(),
        KeyCode::Enter if app.is_finished() => app.load_excerpt(),
        KeyCode::Enter => {
            app.type_key(Keystroke::Newline);
        }
        KeyCode::Backspace => {
            app.type_key(Keystroke::Backspace);
        }
        KeyCode::Char(ch) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            app.type_key(Keystroke::Char(ch));
        }
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent, ctrl: bool) {
    if ctrl && key.code == KeyCode::Char('s') {
        app.cancel_settings();
        return;
    }
    let Some(form) = app.settings.as_mut() else {
        app.cancel_settings();
        return;
    };
    match form.handle(key) {
        FormAction::Continue => {}
        FormAction::Submit => app.save_settings(),
        FormAction::Cancel => app.cancel_settings(),
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()).fg(colors.fg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Welcome => render_welcome(frame, app),
        AppScreen::Typing => render_typing(frame, app),
        AppScreen::Settings => render_settings(frame, app),
    }
}

fn title_line(app: &App, text: &str) -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(app.theme.colors.title())
            .add_modifier(Modifier::BOLD),
    )))
}

fn footer(app: &App, hints: &[&str], width: u16) -> Paragraph<'static> {
    let style = Style::default().fg(app.theme.colors.label());
    let lines: Vec<Line> = pack_hint_lines(hints, width as usize)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, style)))
        .collect();
    Paragraph::new(lines)
}

/// Title on top, body in the middle, hint lines pinned to the bottom.
fn frame_areas(area: Rect, footer_lines: usize) -> (Rect, Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(footer_lines as u16),
        ])
        .split(area);
    (rows[0], rows[1], rows[2])
}

fn render_welcome(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let (hints, body): (&[&str], Vec<Line>) = match &app.error {
        Some(err) => (
            &["Enter retry", "Ctrl+S settings", "Esc quit"],
            vec![Line::from(Span::styled(
                format!("Error: {err}"),
                Style::default().fg(colors.error()),
            ))],
        ),
        None => (
            &["Ctrl+S settings", "Esc quit"],
            vec![Line::from(Span::styled(
                "Press Enter to load a function from your configured folder.",
                Style::default().fg(colors.value()),
            ))],
        ),
    };

    let hint_lines = pack_hint_lines(hints, area.width as usize).len();
    let (title, main, foot) = frame_areas(area, hint_lines);
    frame.render_widget(title_line(app, TITLE), title);
    frame.render_widget(Paragraph::new(body).wrap(Wrap { trim: false }), main);
    frame.render_widget(footer(app, hints, area.width), foot);
}

fn render_typing(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let Some(drill) = app.drill.as_ref() else {
        return;
    };

    let hints: &[&str] = if drill.is_finished() {
        &[
            "Enter new test",
            "Ctrl+R new function",
            "Ctrl+S settings",
            "Esc quit",
        ]
    } else {
        &["Ctrl+R new function", "Ctrl+S settings", "Esc quit"]
    };
    let hint_lines = pack_hint_lines(hints, area.width as usize).len() as u16;
    let layout = AppLayout::new(area, hint_lines);

    let snapshot = drill.snapshot(Instant::now());

    frame.render_widget(title_line(app, TITLE), layout.title);
    frame.render_widget(
        InfoPane::new(
            &app.config.folder_path,
            app.source.as_deref(),
            &snapshot,
            &app.theme,
        ),
        layout.info,
    );
    frame.render_widget(
        TypingArea::new(drill, &app.theme).break_ligatures(app.config.break_ligatures),
        layout.typing,
    );
    frame.render_widget(footer(app, hints, area.width), layout.footer);
}

fn render_settings(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let Some(form) = app.settings.as_ref() else {
        return;
    };

    let hints = [
        "Tab/Shift+Tab to navigate",
        "Enter to save",
        "Ctrl+S or Esc to cancel",
    ];
    let hint_lines = pack_hint_lines(&hints, area.width as usize).len();
    let (title, main, foot) = frame_areas(area, hint_lines);

    frame.render_widget(title_line(app, "\u{2699} Settings"), title);
    frame.render_widget(
        SettingsView::new(form, &app.theme),
        centered_rect(SETTINGS_WIDTH_PERCENT, SETTINGS_HEIGHT_PERCENT, main),
    );
    frame.render_widget(footer(app, &hints, area.width), foot);
}

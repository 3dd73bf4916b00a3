use std::path::PathBuf;
use std::time::Instant;

use crate::config::Config;
use crate::generator::ExcerptProvider;
use crate::generator::folder::FolderExcerptProvider;
use crate::session::drill::DrillState;
use crate::session::input::{Keystroke, KeystrokeOutcome};
use crate::ui::components::settings_form::SettingsForm;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    /// No excerpt loaded yet, or the last load failed.
    Welcome,
    Typing,
    Settings,
}

/// Builds the excerpt source for a given configuration. Swapped out in tests.
pub type ProviderFactory = Box<dyn Fn(&Config) -> Box<dyn ExcerptProvider>>;

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub theme: Theme,
    pub drill: Option<DrillState>,
    pub source: Option<PathBuf>,
    pub error: Option<String>,
    pub settings: Option<SettingsForm>,
    pub should_quit: bool,
    config_path: PathBuf,
    provider: Box<dyn ExcerptProvider>,
    make_provider: ProviderFactory,
}

impl App {
    pub fn new(config: Config, config_path: PathBuf) -> Self {
        Self::with_provider_factory(
            config,
            config_path,
            Box::new(|config: &Config| {
                Box::new(FolderExcerptProvider::new(config.folder())) as Box<dyn ExcerptProvider>
            }),
        )
    }

    pub fn with_provider_factory(
        config: Config,
        config_path: PathBuf,
        make_provider: ProviderFactory,
    ) -> Self {
        let theme = Theme::load(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "unknown theme, using default");
            Theme::default()
        });
        let provider = make_provider(&config);
        Self {
            screen: AppScreen::Welcome,
            config,
            theme,
            drill: None,
            source: None,
            error: None,
            settings: None,
            should_quit: false,
            config_path,
            provider,
            make_provider,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.drill.as_ref().is_some_and(DrillState::is_finished)
    }

    /// Replace the current session with a fresh excerpt. On failure the error
    /// is kept for display and the session is dropped.
    pub fn load_excerpt(&mut self) {
        match self.provider.next_excerpt(self.config.thresholds()) {
            Ok(excerpt) => {
                tracing::info!(
                    file = %excerpt.source.display(),
                    chars = excerpt.text.chars().count(),
                    "loaded excerpt"
                );
                self.drill = Some(DrillState::new(&excerpt.text, self.config.max_time_limit));
                self.source = Some(excerpt.source);
                self.error = None;
                self.screen = AppScreen::Typing;
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not load excerpt");
                self.drill = None;
                self.source = None;
                self.error = Some(e.to_string());
                self.screen = AppScreen::Welcome;
            }
        }
    }

    pub fn type_key(&mut self, key: Keystroke) -> KeystrokeOutcome {
        self.type_key_at(key, Instant::now())
    }

    pub fn type_key_at(&mut self, key: Keystroke, now: Instant) -> KeystrokeOutcome {
        match self.drill.as_mut() {
            Some(drill) => drill.type_key_at(key, now),
            None => KeystrokeOutcome::Ignored,
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        if let Some(drill) = self.drill.as_mut() {
            drill.on_tick(now);
        }
    }

    pub fn open_settings(&mut self) {
        self.settings = Some(SettingsForm::from_config(&self.config));
        self.screen = AppScreen::Settings;
    }

    pub fn cancel_settings(&mut self) {
        self.settings = None;
        self.screen = self.idle_screen();
    }

    /// Validate the form, persist it, and start a new excerpt under the new
    /// settings if one was loaded. Invalid input leaves the form open with
    /// the reason shown.
    pub fn save_settings(&mut self) {
        let Some(form) = self.settings.as_mut() else {
            return;
        };
        let updated = match form.apply(&self.config) {
            Ok(updated) => updated,
            Err(e) => {
                tracing::debug!(error = %e, "settings rejected");
                form.error = Some(e.to_string());
                return;
            }
        };
        if let Err(e) = updated.save_to(&self.config_path) {
            tracing::error!(path = %self.config_path.display(), error = %e, "saving settings failed");
            form.error = Some(format!("could not save settings: {e}"));
            return;
        }

        tracing::info!(
            folder = %updated.folder_path,
            min_lines = updated.min_lines,
            max_lines = updated.max_lines,
            max_time_limit = updated.max_time_limit,
            "settings saved"
        );
        self.provider = (self.make_provider)(&updated);
        self.config = updated;
        self.settings = None;
        self.screen = self.idle_screen();
        if self.drill.is_some() {
            self.load_excerpt();
        }
    }

    fn idle_screen(&self) -> AppScreen {
        if self.drill.is_some() {
            AppScreen::Typing
        } else {
            AppScreen::Welcome
        }
    }
}

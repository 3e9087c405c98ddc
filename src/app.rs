//! Command dispatch for the chat session.
//!
//! [`App`] owns the session context: settings, the pending image and the
//! transcript. Every [`Command`] goes through [`App::dispatch`], which
//! returns the events the front end should render.

use crate::ai::{ExchangeResult, ExchangeService, GeminiChatClient};
use crate::assembler::{assemble, PendingInput};
use crate::commands::Command;
use crate::feedback::{Cue, CueSink, TerminalBell};
use crate::image::{load_image, ImageAttachment};
use crate::models::{Config, Credential, DisplayMessage};
use crate::settings::{Settings, SettingsStore};
use crate::{prompts, Error, Result};
use tracing::{info, warn};

/// Something the front end should show.
#[derive(Debug, Clone)]
pub enum AppEvent {
    Message(DisplayMessage),
    Notice(String),
    ThemeChanged { dark_mode: bool },
    Quit,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub exchange: Box<dyn ExchangeService>,
    pub cues: Box<dyn CueSink>,
    /// `None` keeps settings in memory only.
    pub store: Option<SettingsStore>,
}

pub struct App {
    exchange: Box<dyn ExchangeService>,
    cues: Box<dyn CueSink>,
    store: Option<SettingsStore>,
    settings: Settings,
    session_key: Option<Credential>,
    pending: PendingInput,
    transcript: Vec<DisplayMessage>,
}

impl App {
    /// Build an app from concrete service dependencies.
    ///
    /// This is primarily useful for integration tests and local harnesses that
    /// need to inject mocks.
    pub fn with_services(services: AppServices, settings: Settings) -> Self {
        Self {
            exchange: services.exchange,
            cues: services.cues,
            store: services.store,
            settings,
            session_key: None,
            pending: PendingInput::default(),
            transcript: vec![DisplayMessage::bot(prompts::WELCOME)],
        }
    }

    /// Construct the real app: Gemini client, terminal bell, settings on disk.
    pub fn new(config: &Config, store: SettingsStore) -> Result<Self> {
        let settings = store.load()?;
        info!("Loaded settings from {}", store.path().display());

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        let exchange = GeminiChatClient::new_with_client(config.model.clone(), http_client)
            .with_base_url(config.base_url.clone());
        info!("Chat provider: Gemini (model: {})", exchange.model());

        let mut app = Self::with_services(
            AppServices {
                exchange: Box::new(exchange),
                cues: Box::new(TerminalBell),
                store: Some(store),
            },
            settings,
        );
        app.session_key = config.api_key.clone();
        Ok(app)
    }

    /// Key used for the next exchange: the environment override if present,
    /// otherwise the persisted one.
    pub fn credential(&self) -> &Credential {
        self.session_key.as_ref().unwrap_or(&self.settings.api_key)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn transcript(&self) -> &[DisplayMessage] {
        &self.transcript
    }

    pub fn pending_image(&self) -> Option<&ImageAttachment> {
        self.pending.image()
    }

    /// Text shown for an exchange outcome. Failures become chat text; they
    /// never end the session.
    pub fn reply_text(result: &ExchangeResult) -> String {
        match result {
            Ok(reply) => reply.text.clone(),
            Err(failure) => failure.user_message(),
        }
    }

    pub async fn dispatch(&mut self, command: Command) -> Result<Vec<AppEvent>> {
        let events = match command {
            Command::Send(text) => self.send(&text).await,
            Command::UploadImage(path) => match load_image(&path).await {
                Ok(image) => {
                    let notice = format!("Attached {} ({})", path.display(), image.mime_type());
                    self.pending.attach(image);
                    self.cue(Cue::ImageAttached);
                    vec![AppEvent::Notice(notice)]
                }
                Err(Error::ImageRejected(reason)) => vec![AppEvent::Notice(reason)],
                Err(e) => {
                    warn!("Could not load image {}: {}", path.display(), e);
                    vec![AppEvent::Notice(format!("Could not read image: {}", e))]
                }
            },
            Command::RemoveImage => {
                let notice = if self.pending.clear() {
                    "Image removed"
                } else {
                    "No image attached"
                };
                vec![AppEvent::Notice(notice.to_string())]
            }
            Command::ToggleTheme => {
                self.update_settings(|s| s.dark_mode = !s.dark_mode)?;
                let dark_mode = self.settings.dark_mode;
                vec![
                    AppEvent::ThemeChanged { dark_mode },
                    AppEvent::Notice(
                        if dark_mode { "Dark mode on" } else { "Light mode on" }.to_string(),
                    ),
                ]
            }
            Command::ToggleSound => {
                self.update_settings(|s| s.sound_enabled = !s.sound_enabled)?;
                let notice = if self.settings.sound_enabled {
                    "Sound on"
                } else {
                    "Sound off"
                };
                vec![AppEvent::Notice(notice.to_string())]
            }
            Command::SetApiKey(key) => {
                self.update_settings(|s| s.api_key = Credential::new(key.trim()))?;
                // An explicit key replaces any environment override.
                self.session_key = None;
                vec![AppEvent::Notice(prompts::API_KEY_SAVED.to_string())]
            }
            Command::ShowSettings => vec![AppEvent::Notice(self.describe_settings())],
            Command::Clear => {
                self.transcript.truncate(1);
                self.cue(Cue::ChatCleared);
                vec![AppEvent::Notice("Chat cleared".to_string())]
            }
            Command::Help => vec![AppEvent::Notice(Command::help_text().to_string())],
            Command::Quit => vec![AppEvent::Quit],
            Command::Unknown(name) => vec![AppEvent::Notice(format!(
                "Unknown command: /{}. Type /help for a list.",
                name
            ))],
        };
        Ok(events)
    }

    /// Assemble, exchange once, record both sides of the turn.
    async fn send(&mut self, text: &str) -> Vec<AppEvent> {
        let turn = match assemble(text, self.pending.image()) {
            Ok(turn) => turn,
            Err(rejected) => return vec![AppEvent::Notice(rejected.to_string())],
        };

        let user_message = DisplayMessage::user(turn.text.clone(), turn.has_image());
        self.transcript.push(user_message.clone());
        self.pending.clear();
        self.cue(Cue::MessageSent);

        let result = self.exchange.exchange(&turn, self.credential()).await;
        if let Err(failure) = &result {
            warn!("Exchange failed: {}", failure);
        }

        let bot_message = DisplayMessage::bot(Self::reply_text(&result));
        self.transcript.push(bot_message.clone());
        self.cue(Cue::MessageReceived);

        vec![
            AppEvent::Message(user_message),
            AppEvent::Message(bot_message),
        ]
    }

    fn cue(&self, cue: Cue) {
        if self.settings.sound_enabled {
            self.cues.play(cue);
        }
    }

    /// Apply a change and save it. If saving fails the change is undone, so
    /// memory never disagrees with what the front end was last told.
    fn update_settings<F>(&mut self, change: F) -> Result<()>
    where
        F: FnOnce(&mut Settings),
    {
        let previous = self.settings.clone();
        change(&mut self.settings);

        if let Some(store) = &self.store {
            if let Err(e) = store.save(&self.settings) {
                warn!("Could not save settings to {}: {}", store.path().display(), e);
                self.settings = previous;
                return Err(e);
            }
        }
        Ok(())
    }

    fn describe_settings(&self) -> String {
        let mut lines = vec![
            format!("API key: {}", self.credential().masked()),
            format!(
                "Theme:   {}",
                if self.settings.dark_mode { "dark" } else { "light" }
            ),
            format!(
                "Sound:   {}",
                if self.settings.sound_enabled { "on" } else { "off" }
            ),
        ];
        if self.session_key.is_some() {
            lines.push("(API key taken from GEMINI_API_KEY)".to_string());
        }
        if let Some(store) = &self.store {
            lines.push(format!("File:    {}", store.path().display()));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{ExchangeFailure, MockExchangeClient, Reply};
    use crate::feedback::RecordingCues;

    fn app_with(settings: Settings) -> App {
        App::with_services(
            AppServices {
                exchange: Box::new(MockExchangeClient::new()),
                cues: Box::new(RecordingCues::new()),
                store: None,
            },
            settings,
        )
    }

    #[test]
    fn test_reply_text_maps_both_channels() {
        assert_eq!(App::reply_text(&Ok(Reply::generated("hi"))), "hi");
        assert_eq!(
            App::reply_text(&Err(ExchangeFailure::Status(404))),
            "API request failed: 404"
        );
    }

    #[test]
    fn test_session_key_overrides_persisted_key() {
        let mut app = app_with(Settings {
            api_key: Credential::new("saved"),
            ..Settings::default()
        });
        assert_eq!(app.credential().expose(), "saved");

        app.session_key = Some(Credential::new("from-env"));
        assert_eq!(app.credential().expose(), "from-env");
    }

    #[tokio::test]
    async fn test_set_api_key_replaces_session_override() {
        let mut app = app_with(Settings::default());
        app.session_key = Some(Credential::new("from-env"));

        app.dispatch(Command::SetApiKey("  typed  ".to_string()))
            .await
            .unwrap();
        assert_eq!(app.credential().expose(), "typed");
    }

    #[tokio::test]
    async fn test_show_settings_masks_key() {
        let mut app = app_with(Settings {
            api_key: Credential::new("AIzaSECRET1234"),
            ..Settings::default()
        });

        let events = app.dispatch(Command::ShowSettings).await.unwrap();
        match &events[0] {
            AppEvent::Notice(text) => {
                assert!(text.contains("****1234"));
                assert!(!text.contains("SECRET"));
            }
            other => panic!("expected notice, got {:?}", other),
        }
    }
}

//! Data models and structures
//!
//! Defines the turn submitted to the provider, the transcript entries shown
//! to the user, and the environment-driven configuration.

use crate::image::ImageAttachment;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Opaque API key. An empty credential is valid and means "not configured".
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Short form safe to print: the last four characters only.
    pub fn masked(&self) -> String {
        if self.0.is_empty() {
            return "(not set)".to_string();
        }
        let tail: String = self
            .0
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("****{}", tail)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.masked()).finish()
    }
}

/// One user submission. Built by [`crate::assembler::assemble`], which
/// guarantees that `text` or `image` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub text: String,
    pub image: Option<ImageAttachment>,
}

impl Turn {
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "you",
            Role::Bot => "gemini",
        }
    }
}

/// Transcript entry handed to the display collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayMessage {
    pub role: Role,
    pub content: String,
    pub has_image: bool,
    pub timestamp: DateTime<Local>,
}

impl DisplayMessage {
    pub fn new(role: Role, content: impl Into<String>, has_image: bool) -> Self {
        Self {
            role,
            content: content.into(),
            has_image,
            timestamp: Local::now(),
        }
    }

    pub fn user(content: impl Into<String>, has_image: bool) -> Self {
        Self::new(Role::User, content, has_image)
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(Role::Bot, content, false)
    }

    /// Wall-clock time in the `HH:MM` form shown next to each message.
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Session override for the persisted key; never written back.
    pub api_key: Option<Credential>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub settings_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = match var("GEMINI_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                crate::Error::Config(format!(
                    "GEMINI_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    raw
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key: var("GEMINI_API_KEY")
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .map(Credential::new),
            model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: var("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
            settings_path: var("GEMINI_CHAT_SETTINGS").map(PathBuf::from),
        })
    }
}

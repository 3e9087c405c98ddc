//! Remote exchange with the generative-language provider
//!
//! One [`Turn`] in, one [`ExchangeResult`] out. Successful replies and
//! failures stay distinct here; turning a failure into chat text is the
//! caller's decision.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiChatClient;
pub use mock::MockExchangeClient;

use crate::models::{Credential, Turn};
use crate::prompts;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// Text produced by the model.
    Generated,
    /// No credential configured; no request was made.
    MissingCredential,
    /// The response carried no usable text.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub kind: ReplyKind,
}

impl Reply {
    pub fn generated(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ReplyKind::Generated,
        }
    }

    pub fn missing_credential() -> Self {
        Self {
            text: prompts::MISSING_CREDENTIAL.to_string(),
            kind: ReplyKind::MissingCredential,
        }
    }

    pub fn fallback(had_image: bool) -> Self {
        let text = if had_image {
            prompts::FALLBACK_IMAGE
        } else {
            prompts::FALLBACK_TEXT
        };
        Self {
            text: text.to_string(),
            kind: ReplyKind::Fallback,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeFailure {
    /// Provider answered with a non-2xx status.
    #[error("API request failed: {0}")]
    Status(u16),

    /// Provider answered 2xx with an `error` object.
    #[error("{0}")]
    Provider(String),

    /// The request never completed or the body could not be read as JSON.
    #[error("{0}")]
    Transport(String),
}

impl ExchangeFailure {
    /// Text shown in the transcript in place of a reply.
    pub fn user_message(&self) -> String {
        match self {
            ExchangeFailure::Status(_) | ExchangeFailure::Provider(_) => self.to_string(),
            ExchangeFailure::Transport(message) => {
                prompts::render(prompts::TRANSPORT_ERROR, &[("message", message)])
            }
        }
    }
}

pub type ExchangeResult = std::result::Result<Reply, ExchangeFailure>;

#[async_trait]
pub trait ExchangeService: Send + Sync {
    async fn exchange(&self, turn: &Turn, credential: &Credential) -> ExchangeResult;
}

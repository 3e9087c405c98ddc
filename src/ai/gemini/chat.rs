use super::client::GeminiHttpClient;
use super::types::{first_candidate_text, GenerateContentRequest};
use crate::ai::{ExchangeFailure, ExchangeResult, ExchangeService, Reply};
use crate::models::{Credential, Turn};
use async_trait::async_trait;
use serde_json::Value;

pub struct GeminiChatClient {
    http: GeminiHttpClient,
}

impl GeminiChatClient {
    pub fn new(model: String) -> Self {
        Self::new_with_client(model, reqwest::Client::new())
    }

    pub fn new_with_client(model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(model, client),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    pub fn model(&self) -> &str {
        self.http.model()
    }

    /// Map a 2xx body onto a reply or a provider failure.
    fn interpret(body: Value, had_image: bool) -> ExchangeResult {
        if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or("API Error");
            tracing::error!("Gemini returned an error object: {}", error);
            return Err(ExchangeFailure::Provider(message.to_string()));
        }

        match first_candidate_text(&body) {
            Some(text) => Ok(Reply::generated(text)),
            None => {
                tracing::warn!("Gemini response had no text in the first candidate: {}", body);
                Ok(Reply::fallback(had_image))
            }
        }
    }
}

#[async_trait]
impl ExchangeService for GeminiChatClient {
    async fn exchange(&self, turn: &Turn, credential: &Credential) -> ExchangeResult {
        if credential.is_empty() {
            tracing::info!("No API key configured; skipping request");
            return Ok(Reply::missing_credential());
        }

        let request = GenerateContentRequest::from_turn(turn);
        let body = self.http.generate_content(credential, &request).await?;

        Self::interpret(body, turn.has_image())
    }
}

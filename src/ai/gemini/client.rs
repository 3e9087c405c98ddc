use crate::ai::ExchangeFailure;
use crate::models::{Credential, DEFAULT_BASE_URL};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

/// Lightweight Gemini REST client.
///
/// The credential travels as the `key` query parameter. Timeouts are the
/// transport's business: whatever the supplied [`Client`] was built with.
pub struct GeminiHttpClient {
    client: Client,
    model: String,
    base_url: String,
}

impl GeminiHttpClient {
    /// Construct a Gemini client.
    ///
    /// `model` should be the bare model ID (for example `gemini-2.0-flash`);
    /// a `models/` prefix is stripped.
    pub fn new_with_client(model: String, client: Client) -> Self {
        let model = model.strip_prefix("models/").unwrap_or(&model).to_string();

        Self {
            client,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Returns the configured model ID without the `models/` prefix.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// POST to `generateContent` and return the decoded JSON body.
    ///
    /// Only transport-level problems are failures here; interpreting the body
    /// is left to the caller.
    pub async fn generate_content<Req: Serialize>(
        &self,
        credential: &Credential,
        request: &Req,
    ) -> Result<Value, ExchangeFailure> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        tracing::debug!("Sending generateContent request (model: {})", self.model);

        let response = self
            .client
            .post(&url)
            .query(&[("key", credential.expose())])
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                // The URL carries the key; keep it out of logs and messages.
                let e = e.without_url();
                tracing::error!("Failed to send request to Gemini: {}", e);
                ExchangeFailure::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error (status {}): {}", status, error_text);
            return Err(ExchangeFailure::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!("Failed to read Gemini response body: {}", e);
            ExchangeFailure::Transport(e.to_string())
        })?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}\nBody: {}", e, body);
            ExchangeFailure::Transport(format!("Failed to parse Gemini response: {}", e))
        })
    }
}

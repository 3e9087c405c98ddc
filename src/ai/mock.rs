use super::{ExchangeResult, ExchangeService, Reply};
use crate::models::{Credential, Turn};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Scripted [`ExchangeService`] that records every turn it receives.
///
/// Responses cycle in order. With none configured it echoes the turn text.
/// Like the real client, an empty credential short-circuits without counting
/// as a call.
#[derive(Clone, Default)]
pub struct MockExchangeClient {
    responses: Arc<Mutex<Vec<ExchangeResult>>>,
    received: Arc<Mutex<Vec<Turn>>>,
}

impl MockExchangeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, response: ExchangeResult) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.with_response(Ok(Reply::generated(text)))
    }

    pub fn get_call_count(&self) -> usize {
        self.received.lock().unwrap().len()
    }

    pub fn received_turns(&self) -> Vec<Turn> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExchangeService for MockExchangeClient {
    async fn exchange(&self, turn: &Turn, credential: &Credential) -> ExchangeResult {
        if credential.is_empty() {
            return Ok(Reply::missing_credential());
        }

        let count = {
            let mut received = self.received.lock().unwrap();
            received.push(turn.clone());
            received.len()
        };

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(Reply::generated(format!("echo: {}", turn.text)))
        } else {
            let index = (count - 1) % responses.len();
            responses[index].clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{ExchangeFailure, ReplyKind};

    fn turn(text: &str) -> Turn {
        Turn {
            text: text.to_string(),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_mock_default_echoes() {
        let client = MockExchangeClient::new();
        let reply = client
            .exchange(&turn("ping"), &Credential::new("k"))
            .await
            .unwrap();
        assert_eq!(reply.text, "echo: ping");
    }

    #[tokio::test]
    async fn test_mock_custom_responses_cycle() {
        let client = MockExchangeClient::new()
            .with_reply("first")
            .with_response(Err(ExchangeFailure::Status(503)));
        let key = Credential::new("k");

        assert_eq!(client.exchange(&turn("a"), &key).await.unwrap().text, "first");
        assert_eq!(
            client.exchange(&turn("b"), &key).await.unwrap_err(),
            ExchangeFailure::Status(503)
        );
        // Should cycle back
        assert_eq!(client.exchange(&turn("c"), &key).await.unwrap().text, "first");
    }

    #[tokio::test]
    async fn test_mock_call_count_ignores_missing_credential() {
        let client = MockExchangeClient::new();
        assert_eq!(client.get_call_count(), 0);

        let reply = client
            .exchange(&turn("a"), &Credential::default())
            .await
            .unwrap();
        assert_eq!(reply.kind, ReplyKind::MissingCredential);
        assert_eq!(client.get_call_count(), 0);

        client
            .exchange(&turn("a"), &Credential::new("k"))
            .await
            .unwrap();
        assert_eq!(client.get_call_count(), 1);
        assert_eq!(client.received_turns()[0].text, "a");
    }
}

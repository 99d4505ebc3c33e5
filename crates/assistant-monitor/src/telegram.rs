//! Telegram Bot API client.

use std::time::Duration;

use assistant_core::error::NotifyError;
use assistant_core::traits::Notifier;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Bot API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Long-poll wait passed to `getUpdates`
    pub poll_timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.telegram.org".to_string(),
            timeout_secs: 10,
            poll_timeout_secs: 5,
        }
    }
}

/// An update received by the bot. Only plain messages carry `text`;
/// stickers, edits and joins come through with `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatUpdate {
    pub update_id: i64,
    pub chat_id: Option<i64>,
    pub text: Option<String>,
}

/// The `getUpdates` offset that acknowledges every update in `updates`,
/// or `current` when the batch is empty.
pub fn next_offset(current: Option<i64>, updates: &[ChatUpdate]) -> Option<i64> {
    updates
        .iter()
        .map(|u| u.update_id + 1)
        .chain(current)
        .max()
}

#[derive(Debug, Deserialize)]
struct UpdatesResponse {
    ok: bool,
    #[serde(default)]
    result: Vec<RawUpdate>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawUpdate {
    update_id: i64,
    message: Option<RawMessage>,
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    text: Option<String>,
    chat: Option<RawChat>,
}

#[derive(Debug, Deserialize)]
struct RawChat {
    id: i64,
}

/// Sends messages to, and receives commands from, one Telegram chat.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    config: TelegramConfig,
    bot_token: Option<String>,
    chat_id: Option<String>,
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(
        config: TelegramConfig,
        bot_token: Option<String>,
        chat_id: Option<String>,
    ) -> Result<Self, NotifyError> {
        // Long polls hold the connection for poll_timeout_secs.
        let timeout = config.timeout_secs + config.poll_timeout_secs;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .map_err(|e| NotifyError::Connection(e.to_string()))?;

        Ok(Self {
            config,
            bot_token: bot_token.filter(|t| !t.trim().is_empty()),
            chat_id: chat_id.filter(|c| !c.trim().is_empty()),
            client,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.bot_token.is_some() && self.chat_id.is_some()
    }

    fn method_url(&self, token: &str, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.config.base_url.trim_end_matches('/'),
            token,
            method
        )
    }

    /// Fetch updates received after `offset` (the next unseen update id).
    pub async fn poll_updates(&self, offset: Option<i64>) -> Result<Vec<ChatUpdate>, NotifyError> {
        let token = self
            .bot_token
            .as_deref()
            .ok_or(NotifyError::MissingCredentials)?;

        let mut query = vec![("timeout", self.config.poll_timeout_secs.to_string())];
        if let Some(offset) = offset {
            query.push(("offset", offset.to_string()));
        }

        let response = self
            .client
            .get(self.method_url(token, "getUpdates"))
            .query(&query)
            .send()
            .await
            .map_err(|e| NotifyError::Connection(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| NotifyError::Connection(e.to_string()))?;
        if !status.is_success() {
            return Err(NotifyError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let updates = parse_updates(&body)?;
        debug!(count = updates.len(), "Polled chat updates");
        Ok(updates)
    }

    /// Whether an update came from the configured chat.
    pub fn is_from_configured_chat(&self, update: &ChatUpdate) -> bool {
        match (&self.chat_id, update.chat_id) {
            (Some(expected), Some(actual)) => expected.trim() == actual.to_string(),
            _ => false,
        }
    }
}

/// Every update in a `getUpdates` response, text or not.
pub(crate) fn parse_updates(body: &str) -> Result<Vec<ChatUpdate>, NotifyError> {
    let response: UpdatesResponse =
        serde_json::from_str(body).map_err(|e| NotifyError::Parse(e.to_string()))?;

    if !response.ok {
        return Err(NotifyError::Parse(
            response.description.unwrap_or_else(|| "ok=false".into()),
        ));
    }

    Ok(response
        .result
        .into_iter()
        .map(|update| {
            let (chat_id, text) = match update.message {
                Some(message) => (message.chat.map(|c| c.id), message.text),
                None => (None, None),
            };
            ChatUpdate {
                update_id: update.update_id,
                chat_id,
                text,
            }
        })
        .collect())
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_notification(&self, text: &str) -> Result<(), NotifyError> {
        let (Some(token), Some(chat_id)) = (self.bot_token.as_deref(), self.chat_id.as_deref())
        else {
            return Err(NotifyError::MissingCredentials);
        };

        let response = self
            .client
            .post(self.method_url(token, "sendMessage"))
            .json(&serde_json::json!({ "chat_id": chat_id, "text": text }))
            .send()
            .await
            .map_err(|e| NotifyError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Api {
                status: status.as_u16(),
                body,
            });
        }

        info!(chars = text.len(), "Telegram message sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_updates() {
        let body = r#"{
            "ok": true,
            "result": [
                {"update_id": 10, "message": {"chat": {"id": 42}, "text": "/positions"}},
                {"update_id": 11, "message": {"chat": {"id": 42}, "sticker": {}}},
                {"update_id": 12, "edited_message": {"text": "ignored"}},
                {"update_id": 13, "message": {"chat": {"id": 7}, "text": "/bought INFY 5"}}
            ]
        }"#;

        let updates = parse_updates(body).unwrap();
        assert_eq!(updates.len(), 4);
        assert_eq!(updates[0].update_id, 10);
        assert_eq!(updates[0].text.as_deref(), Some("/positions"));
        assert_eq!(updates[1].chat_id, Some(42));
        assert_eq!(updates[1].text, None);
        assert_eq!(updates[2].chat_id, None);
        assert_eq!(updates[2].text, None);
        assert_eq!(updates[3].chat_id, Some(7));
        assert_eq!(next_offset(None, &updates), Some(14));
    }

    #[test]
    fn test_trailing_non_text_update_is_acknowledged() {
        let body = r#"{
            "ok": true,
            "result": [
                {"update_id": 10, "message": {"chat": {"id": 42}, "text": "/positions"}},
                {"update_id": 11, "message": {"chat": {"id": 42}, "sticker": {}}}
            ]
        }"#;

        let updates = parse_updates(body).unwrap();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[1].text, None);
        assert_eq!(next_offset(Some(10), &updates), Some(12));
    }

    #[test]
    fn test_next_offset_keeps_current_on_empty_batch() {
        let updates = parse_updates(r#"{"ok": true, "result": []}"#).unwrap();

        assert!(updates.is_empty());
        assert_eq!(next_offset(Some(12), &updates), Some(12));
        assert_eq!(next_offset(None, &updates), None);
    }

    #[test]
    fn test_parse_error_response() {
        let body = r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#;
        assert!(matches!(parse_updates(body), Err(NotifyError::Parse(d)) if d == "Unauthorized"));
    }

    #[test]
    fn test_configured_chat_filter() {
        let notifier =
            TelegramNotifier::new(TelegramConfig::default(), Some("t".into()), Some("42".into()))
                .unwrap();
        let update = |chat_id| ChatUpdate {
            update_id: 1,
            chat_id,
            text: Some("/positions".into()),
        };

        assert!(notifier.is_configured());
        assert!(notifier.is_from_configured_chat(&update(Some(42))));
        assert!(!notifier.is_from_configured_chat(&update(Some(7))));
        assert!(!notifier.is_from_configured_chat(&update(None)));
    }

    #[tokio::test]
    async fn test_missing_credentials() {
        let notifier = TelegramNotifier::new(TelegramConfig::default(), None, Some("42".into())).unwrap();

        assert!(!notifier.is_configured());
        assert!(matches!(
            notifier.send_notification("hello").await,
            Err(NotifyError::MissingCredentials)
        ));
        assert!(matches!(
            notifier.poll_updates(None).await,
            Err(NotifyError::MissingCredentials)
        ));
    }
}

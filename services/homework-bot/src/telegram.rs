//! Telegram Bot API notifier

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::TelegramConfig;
use crate::error::NotifierError;
use crate::io::HttpClient;
use crate::notifier::Notifier;

/// Sends messages through a Telegram bot to a single chat
pub struct TelegramNotifier {
    send_url: String,
    chat_id: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig, http: Arc<dyn HttpClient>) -> Self {
        let send_url = format!(
            "{}/bot{}/sendMessage",
            config.api_base.trim_end_matches('/'),
            config.bot_token
        );

        tracing::debug!("Created TelegramNotifier for chat {}", config.chat_id);

        Self {
            send_url,
            chat_id: config.chat_id.clone(),
            http,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn type_name(&self) -> &str {
        "telegram"
    }

    fn destination(&self) -> &str {
        &self.chat_id
    }

    async fn send(&self, text: &str) -> Result<(), NotifierError> {
        let params = [("chat_id", self.chat_id.as_str()), ("text", text)];

        let response = match self.http.post_form(&self.send_url, &params).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Failed to send message to chat {}: {}", self.chat_id, e);
                return Err(NotifierError::Transport(e.to_string()));
            }
        };

        if response.status != 200 {
            tracing::error!(
                "Telegram rejected message to chat {}: status {}",
                self.chat_id,
                response.status
            );
            return Err(NotifierError::Rejected {
                status: response.status,
                body: response.body,
            });
        }

        tracing::info!("Bot sent message: {}", text);
        Ok(())
    }
}

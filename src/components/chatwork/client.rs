use crate::components::MessageSink;
use crate::error::{delivery_error, BotResult};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Base URL of the ChatWork v2 API
pub const CHATWORK_API: &str = "https://api.chatwork.com/v2/";

/// ChatWork REST client authenticated with a caller-supplied API token
#[derive(Clone)]
pub struct ChatworkClient {
    client: Client,
    api_token: String,
    base_url: Url,
}

impl ChatworkClient {
    /// Create a new client
    pub fn new(api_token: &str, timeout: std::time::Duration) -> BotResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| delivery_error(&format!("Failed to build HTTP client: {}", e)))?;
        let base_url = Url::parse(CHATWORK_API)
            .map_err(|e| delivery_error(&format!("Failed to parse URL: {}", e)))?;

        Ok(Self {
            client,
            api_token: api_token.to_string(),
            base_url,
        })
    }

    /// Point the client at a different API root
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// `{base}/rooms/{room_id}/messages`
    fn messages_url(&self, room_id: &str) -> BotResult<Url> {
        if room_id.is_empty() || !room_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(delivery_error(&format!("Invalid room ID: {}", room_id)));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| delivery_error("API base URL cannot have a path"))?
            .pop_if_empty()
            .push("rooms")
            .push(room_id)
            .push("messages");
        Ok(url)
    }
}

#[async_trait]
impl MessageSink for ChatworkClient {
    async fn send(&self, room_id: &str, body: &str) -> BotResult<()> {
        let url = self.messages_url(room_id)?;
        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .header("X-ChatWorkToken", &self.api_token)
            .form(&[("body", body)])
            .send()
            .await
            .map_err(|e| delivery_error(&format!("Failed to send message: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(delivery_error(&format!(
                "Failed to send message: HTTP {} - {}",
                status, error_body
            )));
        }

        Ok(())
    }
}

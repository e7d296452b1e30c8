use agentchat_core_types::{AgentRequest, StreamEvent};
use anyhow::{anyhow, Result};
use log::debug;
use tokio::sync::mpsc;

use crate::sse::handle_agent_stream;

/// HTTP client for the agent backend.
///
/// Holds a shared connection pool; one client serves any number of
/// sequential turns.
pub struct AgentClient {
    base_url: String,
    http: reqwest::Client,
}

impl AgentClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST a chat or resume request and stream back decoded events.
    ///
    /// Returns once response headers are in, i.e. a successful return
    /// means the first byte boundary was crossed. The receiver yields
    /// one decoded event per SSE frame and closes on end of stream;
    /// failures that abort the stream arrive as a final `Err` item.
    pub async fn agent_chat(
        &self,
        request: &AgentRequest,
    ) -> Result<mpsc::UnboundedReceiver<Result<StreamEvent>>> {
        let url = format!("{}/agent_chat", self.base_url);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error! status: {}", response.status()));
        }

        let (tx_event, rx_event) = mpsc::unbounded_channel();
        tokio::spawn(handle_agent_stream(response, tx_event));
        Ok(rx_event)
    }
}

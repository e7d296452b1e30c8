use agentchat_core_types::StreamEvent;
use anyhow::{anyhow, Result};
use eventsource_stream::Eventsource;
use futures::StreamExt;
use log::{error, trace};
use reqwest::Response;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

const IDLE_TIMEOUT: Duration = Duration::from_secs(600);

/// Convert a byte stream into a decoded event stream
///
/// One `StreamEvent` is sent per SSE `data:` frame, in arrival order. A
/// malformed frame is logged and skipped; it never aborts the stream.
/// The channel closing signals normal end of stream, while transport
/// failures and idle timeouts arrive as a final `Err` item.
pub async fn handle_agent_stream(
    response: Response,
    tx_event: mpsc::UnboundedSender<Result<StreamEvent>>,
) {
    let mut stream = response.bytes_stream().eventsource();

    loop {
        let sse_event = timeout(IDLE_TIMEOUT, stream.next()).await;
        let sse = match sse_event {
            Ok(Some(Ok(sse))) => sse,
            Ok(None) => {
                // Normal end of stream: the turn is complete.
                return;
            }
            Ok(Some(Err(e))) => {
                let error_msg = format!("SSE Error: {}", e);
                error!("{}", error_msg);
                let _ = tx_event.send(Err(anyhow!(error_msg)));
                return;
            }
            Err(_) => {
                let error_msg = "SSE Timeout: idle timeout waiting for SSE";
                error!("{}", error_msg);
                let _ = tx_event.send(Err(anyhow!(error_msg)));
                return;
            }
        };

        trace!("Agent SSE: {:?}", sse);
        match serde_json::from_str::<StreamEvent>(&sse.data) {
            Ok(event) => {
                let _ = tx_event.send(Ok(event));
            }
            Err(e) => {
                error!("SSE Parsing Error: {e}, data: {}", sse.data);
            }
        }
    }
}

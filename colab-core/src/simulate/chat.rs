//! Canned chat replies.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::{EventSender, SimEvent};

/// Number of prompt characters echoed back in a reply.
const ECHO_CHARS: usize = 30;

/// The text of the simulated reply to `prompt`.
pub fn reply_text(prompt: &str) -> String {
    let echoed: String = prompt.chars().take(ECHO_CHARS).collect();
    format!("Simulated AI response for: \"{echoed}...\"")
}

/// Schedule a reply to `prompt` after `delay`.
///
/// Sends [`SimEvent::ChatProcessing`] right away. Blank prompts are rejected
/// and return `None` without sending anything. Must be called from within a
/// tokio runtime.
pub fn simulate_reply(
    request_id: u64,
    prompt: &str,
    delay: Duration,
    tx: EventSender,
) -> Option<JoinHandle<()>> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return None;
    }

    info!(request_id, "Sending prompt: {}...", prompt.chars().take(50).collect::<String>());
    if tx.send(SimEvent::ChatProcessing { request_id }).is_err() {
        debug!(request_id, "Event receiver gone, processing notice dropped");
    }

    let text = reply_text(prompt);
    Some(tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        debug!(request_id, "Simulated reply ready");
        if tx.send(SimEvent::ChatReply { request_id, text }).is_err() {
            debug!(request_id, "Event receiver gone, reply dropped");
        }
    }))
}

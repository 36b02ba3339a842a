//! Mock backend simulators.
//!
//! Nothing here talks to a network. Chat replies and uploads are produced
//! by tokio tasks after fixed delays and delivered to the GUI over an
//! unbounded channel, which it drains every frame.

mod chat;
mod upload;
mod wallet;

use std::time::Duration;

use tokio::sync::mpsc;

pub use chat::{reply_text, simulate_reply};
pub use upload::{
    parse_tags, simulate_upload, UploadError, UploadFile, UploadReceipt, UploadRequest,
};
pub use wallet::{RewardEntry, Wallet};

/// Delay before a simulated chat reply arrives.
pub const CHAT_REPLY_DELAY: Duration = Duration::from_millis(1500);

/// Delay before a simulated upload completes.
pub const UPLOAD_DELAY: Duration = Duration::from_millis(2000);

// =============================================================================
// Events
// =============================================================================

/// Events sent from simulators to the GUI.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    /// A prompt was accepted and a reply is on its way.
    ChatProcessing { request_id: u64 },

    /// The canned reply for a prompt.
    ChatReply { request_id: u64, text: String },

    /// A simulated upload finished.
    UploadComplete(UploadReceipt),
}

// =============================================================================
// Channel Types
// =============================================================================

/// Sender for simulator events.
pub type EventSender = mpsc::UnboundedSender<SimEvent>;

/// Receiver for simulator events.
pub type EventReceiver = mpsc::UnboundedReceiver<SimEvent>;

/// Create an event channel for simulator events.
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

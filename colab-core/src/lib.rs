//! Co-Lab Core Library
//!
//! This crate provides everything behind the Co-Lab workspace shell
//! except drawing. It includes:
//!
//! - The two-panel layout engine (split, collapse, resize, history, theme)
//! - Preference storage over SQLite, plus an in-memory store
//! - Conversation history storage
//! - The dismissible overlay registry
//! - Right-panel section switching with unsaved-settings gating
//! - The API settings form
//! - Mock chat and upload simulators and the reward wallet

pub mod config;
pub mod db;
pub mod forms;
pub mod layout;
pub mod navigation;
pub mod overlay;
pub mod simulate;
pub mod store;

// Re-exports for convenience
pub use config::{LayoutConstants, Theme};
pub use db::{ConversationSummary, Database, MessageRole, StoredMessage};
pub use forms::{ApiField, ApiSettingsForm};
pub use layout::{LayoutEngine, PanelWidth};
pub use navigation::{Section, SectionSwitcher, SwitchOutcome};
pub use overlay::{OverlayId, OverlayRegistry, Point, Rect};
pub use store::{MemoryStore, PreferenceStore, StoreError};

// Re-export simulators
pub use simulate::{
    event_channel, simulate_reply, simulate_upload, EventReceiver, EventSender, SimEvent,
    UploadError, UploadFile, UploadReceipt, UploadRequest, Wallet,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn exports_are_accessible() {
        fn _check_types(
            _db: &Database,
            _engine: &LayoutEngine,
            _constants: &LayoutConstants,
            _theme: Theme,
            _overlays: &OverlayRegistry,
            _sections: &SectionSwitcher,
            _form: &ApiSettingsForm,
            _wallet: &Wallet,
            _store: &dyn PreferenceStore,
        ) {
        }
    }

    #[test]
    fn database_backs_the_layout_engine() {
        let db = Database::open_in_memory().unwrap();
        db.migrate().unwrap();

        let mut engine = LayoutEngine::initialize(&db, LayoutConstants::load(&db));
        engine.toggle_theme(&db);
        engine.toggle_collapse(&db, Some(true), 512.0);

        let reloaded = LayoutEngine::initialize(&db, LayoutConstants::load(&db));
        assert_eq!(reloaded.theme(), Theme::Light);
        assert!(reloaded.is_collapsed());
        assert!(reloaded.history_hidden());
        assert_eq!(reloaded.expanded_width(), PanelWidth::Pixels(512.0));
    }
}

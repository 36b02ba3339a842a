//! Right-panel section switching.
//!
//! Leaving the settings section with unsaved edits needs the user's
//! confirmation first; everything else switches immediately.

/// Sections of the right panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Tasks,
    MyFiles,
    Upload,
    Wallet,
    Settings,
}

impl Section {
    /// Get all sections in tab order.
    pub fn all() -> &'static [Section] {
        &[
            Self::Tasks,
            Self::MyFiles,
            Self::Upload,
            Self::Wallet,
            Self::Settings,
        ]
    }

    /// Stable identifier of the section's content pane.
    pub fn id(self) -> &'static str {
        match self {
            Self::Tasks => "tasks-content",
            Self::MyFiles => "my-files-content",
            Self::Upload => "upload-content",
            Self::Wallet => "wallet-content",
            Self::Settings => "settings-content",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Tasks => "Tasks",
            Self::MyFiles => "My Files",
            Self::Upload => "Upload",
            Self::Wallet => "Wallet",
            Self::Settings => "Settings",
        }
    }
}

/// Result of asking to switch sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The target section is now active.
    Switched,
    /// Unsaved settings would be lost; call
    /// [`SectionSwitcher::confirm_discard`] or [`SectionSwitcher::cancel_pending`].
    NeedsConfirmation,
}

/// Prompt shown when a switch needs confirmation.
pub const DISCARD_PROMPT: &str =
    "You have unsaved changes in Settings. Do you want to discard them and switch tabs?";

/// Active section plus any switch waiting for confirmation.
#[derive(Debug, Clone, Default)]
pub struct SectionSwitcher {
    active: Section,
    pending: Option<Section>,
    scroll_reset: bool,
}

impl SectionSwitcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Section {
        self.active
    }

    /// The section waiting on a discard confirmation, if any.
    pub fn pending(&self) -> Option<Section> {
        self.pending
    }

    /// Ask to show `target`.
    pub fn request(&mut self, target: Section, settings_dirty: bool) -> SwitchOutcome {
        if settings_dirty && self.active == Section::Settings && target != Section::Settings {
            self.pending = Some(target);
            return SwitchOutcome::NeedsConfirmation;
        }
        self.show(target);
        SwitchOutcome::Switched
    }

    /// Complete the pending switch. Returns the section switched to; the
    /// caller is responsible for discarding the unsaved edits.
    pub fn confirm_discard(&mut self) -> Option<Section> {
        let target = self.pending.take()?;
        self.show(target);
        Some(target)
    }

    /// Drop the pending switch and stay where we are.
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    /// Whether the content area should scroll back to the top. Cleared on read.
    pub fn take_scroll_reset(&mut self) -> bool {
        std::mem::take(&mut self.scroll_reset)
    }

    fn show(&mut self, target: Section) {
        tracing::debug!(section = target.id(), "Showing section");
        self.active = target;
        self.pending = None;
        self.scroll_reset = true;
    }
}

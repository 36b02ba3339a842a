//! Main application state and update loop.

use std::collections::HashMap;

use eframe::egui;
use tokio::runtime::Runtime;
use tracing::{debug, error, info, warn};

use colab_core::db::MessageRole;
use colab_core::simulate::{CHAT_REPLY_DELAY, UPLOAD_DELAY};
use colab_core::{
    event_channel, simulate_reply, simulate_upload, ApiSettingsForm, ConversationSummary,
    Database, EventReceiver, EventSender, LayoutConstants, LayoutEngine,
    OverlayRegistry, Section, SectionSwitcher, SimEvent, SwitchOutcome, Theme, UploadFile,
    UploadRequest, Wallet,
};

use crate::ui;

// =============================================================================
// Chat Lines
// =============================================================================

/// Who a chat line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    User,
    Assistant,
    /// Transient "processing" placeholder for a pending request.
    Status(u64),
}

/// One line of the visible conversation.
#[derive(Debug, Clone)]
pub struct ChatLine {
    pub kind: LineKind,
    pub text: String,
}

impl ChatLine {
    fn from_role(role: MessageRole, text: String) -> Self {
        let kind = match role {
            MessageRole::User => LineKind::User,
            MessageRole::Assistant => LineKind::Assistant,
        };
        Self { kind, text }
    }
}

// =============================================================================
// Upload Form
// =============================================================================

/// State of the upload section.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<UploadFile>,
    pub description: String,
    pub tags: String,
    pub status: Option<String>,
    pub in_flight: bool,
}

// =============================================================================
// Application State
// =============================================================================

/// Main application state.
pub struct CoLabApp {
    /// Tokio runtime for simulator tasks.
    pub runtime: Runtime,

    /// Database connection; also the preference store.
    pub db: Database,

    // -------------------------------------------------------------------------
    // Workspace
    // -------------------------------------------------------------------------
    /// Panel split, collapse, history sidebar and theme.
    pub layout: LayoutEngine,

    /// Width of the panel container on the last frame; zero before the
    /// first layout pass.
    pub last_container_width: f32,

    /// Open dropdown menus.
    pub overlays: OverlayRegistry,

    /// Active right-panel section.
    pub sections: SectionSwitcher,

    /// API settings form.
    pub settings_form: ApiSettingsForm,

    // -------------------------------------------------------------------------
    // Chat State
    // -------------------------------------------------------------------------
    /// Conversations for the history sidebar, newest first.
    pub conversations: Vec<ConversationSummary>,

    /// Conversation shown in the left panel.
    pub active_conversation: Option<String>,

    /// Lines of the active conversation.
    pub lines: Vec<ChatLine>,

    /// Current input text.
    pub input: String,

    /// Whether to scroll to bottom on next frame.
    pub scroll_to_bottom: bool,

    next_request_id: u64,

    /// Conversation each pending reply belongs to.
    pending_replies: HashMap<u64, String>,

    // -------------------------------------------------------------------------
    // Upload & Wallet
    // -------------------------------------------------------------------------
    pub upload: UploadForm,

    pub wallet: Wallet,

    /// Pending file dialog result.
    file_result_rx: Option<tokio::sync::oneshot::Receiver<Option<UploadFile>>>,

    // -------------------------------------------------------------------------
    // Simulator Channel
    // -------------------------------------------------------------------------
    event_tx: EventSender,
    event_rx: EventReceiver,

    /// Status message.
    pub status_message: Option<(String, chrono::DateTime<chrono::Utc>)>,
}

impl CoLabApp {
    /// Create a new application instance.
    pub fn new(cc: &eframe::CreationContext<'_>, runtime: Runtime) -> Self {
        info!("Initializing CoLabApp");

        let db = open_database();
        let constants = LayoutConstants::load(&db);
        let layout = LayoutEngine::initialize(&db, constants);
        apply_theme(&cc.egui_ctx, layout.theme());

        let settings_form = ApiSettingsForm::load(&db);
        let conversations = db.list_conversations().unwrap_or_else(|e| {
            error!("Failed to load conversations: {}", e);
            Vec::new()
        });

        let (event_tx, event_rx) = event_channel();

        Self {
            runtime,
            db,
            layout,
            last_container_width: 0.0,
            overlays: OverlayRegistry::new(),
            sections: SectionSwitcher::new(),
            settings_form,
            conversations,
            active_conversation: None,
            lines: Vec::new(),
            input: String::new(),
            scroll_to_bottom: false,
            next_request_id: 0,
            pending_replies: HashMap::new(),
            upload: UploadForm::default(),
            wallet: Wallet::new(),
            file_result_rx: None,
            event_tx,
            event_rx,
            status_message: None,
        }
    }

    // =========================================================================
    // Layout Actions
    // =========================================================================

    /// Collapse or expand the left panel.
    pub fn toggle_left_panel(&mut self) {
        let measured = if self.last_container_width > 0.0 {
            self.layout.left_width_px(self.last_container_width)
        } else {
            0.0
        };
        self.layout.toggle_collapse(&self.db, None, measured);
    }

    pub fn toggle_history(&mut self) {
        self.layout.toggle_history(&self.db, None);
    }

    pub fn toggle_theme(&mut self, ctx: &egui::Context) {
        let theme = self.layout.toggle_theme(&self.db);
        apply_theme(ctx, theme);
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Switch the right panel, asking first if settings are unsaved.
    pub fn show_section(&mut self, target: Section) {
        let outcome = self
            .sections
            .request(target, self.settings_form.is_dirty());
        if outcome == SwitchOutcome::NeedsConfirmation {
            debug!(target = target.id(), "Switch waiting on discard confirmation");
        }
    }

    /// Discard unsaved settings and finish the pending switch.
    pub fn discard_settings_and_switch(&mut self) {
        self.settings_form.discard(&self.db);
        self.sections.confirm_discard();
        self.set_status("Unsaved changes discarded");
    }

    pub fn save_settings(&mut self) {
        match self.settings_form.save(&self.db) {
            Ok(message) => self.set_status(message),
            Err(e) => {
                error!("Failed to save settings: {}", e);
                self.set_status("Failed to save settings");
            }
        }
    }

    pub fn sign_out(&mut self) {
        info!("Sign Out clicked");
        self.overlays.close_all();
        self.set_status("Signed out (mock)");
    }

    // =========================================================================
    // Chat
    // =========================================================================

    /// Send the current input as a prompt.
    pub fn send_message(&mut self) {
        let prompt = self.input.trim().to_string();
        if prompt.is_empty() {
            return;
        }

        let conversation_id = match self.ensure_conversation(&prompt) {
            Some(id) => id,
            None => return,
        };

        let request_id = self.next_request_id;
        self.next_request_id += 1;

        let spawned = {
            let _enter = self.runtime.enter();
            simulate_reply(request_id, &prompt, CHAT_REPLY_DELAY, self.event_tx.clone())
        };
        if spawned.is_none() {
            return;
        }

        if let Err(e) = self.db.add_message(&conversation_id, MessageRole::User, &prompt) {
            warn!("Failed to store message: {}", e);
        }
        self.lines.push(ChatLine {
            kind: LineKind::User,
            text: prompt,
        });
        self.pending_replies.insert(request_id, conversation_id);
        self.input.clear();
        self.scroll_to_bottom = true;
        self.refresh_conversations();
    }

    /// Start an empty conversation.
    pub fn new_conversation(&mut self) {
        self.active_conversation = None;
        self.lines.clear();
    }

    /// Show a conversation from the history sidebar.
    pub fn open_conversation(&mut self, id: &str) {
        match self.db.conversation_messages(id) {
            Ok(messages) => {
                self.lines = messages
                    .into_iter()
                    .map(|m| ChatLine::from_role(m.role, m.content))
                    .collect();
                self.active_conversation = Some(id.to_string());
                self.scroll_to_bottom = true;
            }
            Err(e) => {
                error!("Failed to load conversation: {}", e);
                self.set_status("Failed to load conversation");
            }
        }
    }

    pub fn delete_conversation(&mut self, id: &str) {
        if let Err(e) = self.db.delete_conversation(id) {
            error!("Failed to delete conversation: {}", e);
            return;
        }
        if self.active_conversation.as_deref() == Some(id) {
            self.new_conversation();
        }
        self.refresh_conversations();
    }

    fn ensure_conversation(&mut self, prompt: &str) -> Option<String> {
        if let Some(id) = &self.active_conversation {
            return Some(id.clone());
        }
        match self.db.create_conversation(&conversation_title(prompt)) {
            Ok(id) => {
                self.active_conversation = Some(id.clone());
                Some(id)
            }
            Err(e) => {
                error!("Failed to create conversation: {}", e);
                self.set_status("Failed to start conversation");
                None
            }
        }
    }

    fn refresh_conversations(&mut self) {
        match self.db.list_conversations() {
            Ok(list) => self.conversations = list,
            Err(e) => warn!("Failed to refresh conversations: {}", e),
        }
    }

    // =========================================================================
    // Upload
    // =========================================================================

    /// Open a native file picker asynchronously.
    pub fn open_file_dialog(&mut self) {
        if self.file_result_rx.is_some() {
            return;
        }

        let (tx, rx) = tokio::sync::oneshot::channel();
        self.file_result_rx = Some(rx);

        self.runtime.spawn(async move {
            let picked = rfd::AsyncFileDialog::new().pick_file().await.map(|f| {
                let path = f.path().to_path_buf();
                let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
                UploadFile {
                    name: f.file_name(),
                    size,
                }
            });
            if tx.send(picked).is_err() {
                debug!("File selection arrived after the app stopped listening");
            }
        });
    }

    fn check_file_selection(&mut self) {
        if let Some(mut rx) = self.file_result_rx.take() {
            match rx.try_recv() {
                Ok(Some(file)) => {
                    info!(file = %file.name, size = file.size, "Picked file");
                    self.upload.file = Some(file);
                }
                Ok(None) => debug!("File selection cancelled"),
                Err(tokio::sync::oneshot::error::TryRecvError::Empty) => {
                    self.file_result_rx = Some(rx);
                }
                Err(tokio::sync::oneshot::error::TryRecvError::Closed) => {
                    warn!("File selection channel closed unexpectedly");
                }
            }
        }
    }

    /// Validate the upload form and start the simulated upload.
    pub fn submit_upload(&mut self) {
        if self.upload.in_flight {
            return;
        }
        match UploadRequest::validate(
            self.upload.file.clone(),
            &self.upload.description,
            &self.upload.tags,
        ) {
            Ok(request) => {
                self.upload.status = Some("Uploading...".to_string());
                self.upload.in_flight = true;
                let _enter = self.runtime.enter();
                simulate_upload(request, UPLOAD_DELAY, self.event_tx.clone());
            }
            Err(e) => {
                self.upload.status = Some(format!("Error: {e}"));
            }
        }
    }

    // =========================================================================
    // Simulator Events
    // =========================================================================

    /// Drain simulator events.
    pub fn process_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                SimEvent::ChatProcessing { request_id } => {
                    self.lines.push(ChatLine {
                        kind: LineKind::Status(request_id),
                        text: "Processing prompt...".to_string(),
                    });
                }
                SimEvent::ChatReply { request_id, text } => {
                    self.lines
                        .retain(|line| line.kind != LineKind::Status(request_id));
                    if let Some(conversation_id) = self.pending_replies.remove(&request_id) {
                        if let Err(e) =
                            self.db
                                .add_message(&conversation_id, MessageRole::Assistant, &text)
                        {
                            warn!("Failed to store reply: {}", e);
                        }
                        if self.active_conversation.as_deref() == Some(conversation_id.as_str()) {
                            self.lines.push(ChatLine {
                                kind: LineKind::Assistant,
                                text,
                            });
                            self.scroll_to_bottom = true;
                        }
                        self.refresh_conversations();
                    }
                }
                SimEvent::UploadComplete(receipt) => {
                    self.upload.status = Some(receipt.status_line());
                    self.upload.in_flight = false;
                    self.wallet.credit(&receipt);
                }
            }
            ctx.request_repaint();
        }
    }

    // =========================================================================
    // Misc
    // =========================================================================

    /// Set a status message.
    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some((msg.to_string(), chrono::Utc::now()));
    }

    /// Clear old status messages.
    pub fn clear_old_status(&mut self) {
        if let Some((_, time)) = &self.status_message {
            if chrono::Utc::now() - *time > chrono::Duration::seconds(5) {
                self.status_message = None;
            }
        }
    }

    /// Close menus on Escape or a press outside them, and drop a drag when
    /// the window loses focus.
    fn handle_global_input(&mut self, ctx: &egui::Context) {
        let (pressed_at, escape, focused) = ctx.input(|i| {
            let pressed = i
                .pointer
                .primary_pressed()
                .then(|| i.pointer.interact_pos())
                .flatten();
            (pressed, i.key_pressed(egui::Key::Escape), i.focused)
        });

        if escape {
            self.overlays.close_all();
        } else if let Some(pos) = pressed_at {
            self.overlays.dismiss_outside(ui::to_point(pos));
        }

        if !focused && self.layout.is_resizing() {
            self.layout.cancel_resize();
        }
    }
}

/// Open the default database, falling back to memory.
fn open_database() -> Database {
    let opened = Database::open().and_then(|db| {
        db.migrate()?;
        Ok(db)
    });
    match opened {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to open database: {}", e);
            let db = Database::open_in_memory().expect("Failed to create in-memory database");
            if let Err(e) = db.migrate() {
                error!("Failed to migrate in-memory database: {}", e);
            }
            db
        }
    }
}

fn apply_theme(ctx: &egui::Context, theme: Theme) {
    let visuals = match theme {
        Theme::Dark => egui::Visuals::dark(),
        Theme::Light => egui::Visuals::light(),
    };
    ctx.set_visuals(visuals);
}

/// Title for a conversation started by `prompt`.
pub fn conversation_title(prompt: &str) -> String {
    let first_line = prompt.lines().next().unwrap_or("").trim();
    if first_line.chars().count() > 40 {
        let head: String = first_line.chars().take(37).collect();
        format!("{head}...")
    } else {
        first_line.to_string()
    }
}

impl eframe::App for CoLabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_file_selection();
        self.process_events(ctx);
        self.clear_old_status();
        self.handle_global_input(ctx);

        egui::TopBottomPanel::top("header_panel").show(ctx, |ui| {
            ui::menu::render(self, ui, ctx);
        });

        egui::TopBottomPanel::bottom("status_panel")
            .max_height(24.0)
            .show(ctx, |ui| {
                ui::status::render(self, ui);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                ui::workspace::render(self, ui);
            });

        ui::menu::render_dropdowns(self, ctx);

        if self.sections.pending().is_some() {
            ui::settings::render_discard_prompt(self, ctx);
        }

        if !self.pending_replies.is_empty()
            || self.upload.in_flight
            || self.file_result_rx.is_some()
        {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

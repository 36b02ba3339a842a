//! SQLite database layer for Co-Lab.
//!
//! Provides persistent storage for:
//! - Settings (UI preferences as key/value strings)
//! - Conversations and messages (history sidebar)

mod migrations;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

use crate::store::{PreferenceStore, StoreError};

/// Who wrote a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }

    fn from_column(value: &str) -> Self {
        if value == "assistant" {
            Self::Assistant
        } else {
            Self::User
        }
    }
}

/// A conversation as listed in the history sidebar.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationSummary {
    pub id: String,
    pub title: String,
    pub updated_at: DateTime<Utc>,
}

/// A stored conversation message.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredMessage {
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Preference and history storage backed by one SQLite file.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open `colab/colab.db` under the platform data directory.
    pub fn open() -> anyhow::Result<Self> {
        let path = Self::default_path()
            .ok_or_else(|| anyhow::anyhow!("No data directory available for colab.db"))?;
        Self::open_at(path)
    }

    /// Open (or create) the database file at `path`, creating missing parent directories.
    pub fn open_at(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let db = Self::with_connection(Connection::open(path)?)?;
        restrict_to_owner(path);
        Ok(db)
    }

    pub fn open_in_memory() -> anyhow::Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> anyhow::Result<Self> {
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(Self { conn })
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("share")))
            .map(|data| data.join("colab").join("colab.db"))
    }

    /// Bring the schema up to date. Already-applied steps are skipped.
    pub fn migrate(&self) -> anyhow::Result<()> {
        migrations::upgrade(&self.conn)
    }

    // =========================================================================
    // Settings Storage
    // =========================================================================

    /// Save a setting to the database (upsert).
    pub fn set_setting(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO settings (key, value, updated_at) VALUES (?, ?, unixepoch())
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            [key, value],
        )?;
        Ok(())
    }

    /// Get a setting from the database.
    ///
    /// Returns `None` if the setting doesn't exist.
    pub fn get_setting(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM settings WHERE key = ?")?;
        let result = stmt.query_row([key], |row| row.get(0));
        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Delete a setting from the database.
    pub fn delete_setting(&self, key: &str) -> Result<(), rusqlite::Error> {
        self.conn
            .execute("DELETE FROM settings WHERE key = ?", [key])?;
        Ok(())
    }

    // =========================================================================
    // Conversation History
    // =========================================================================

    /// Create a conversation and return its id.
    pub fn create_conversation(&self, title: &str) -> Result<String, rusqlite::Error> {
        let id = uuid::Uuid::new_v4().to_string();
        self.conn.execute(
            "INSERT INTO conversations (id, title) VALUES (?, ?)",
            [id.as_str(), title],
        )?;
        Ok(id)
    }

    /// Append a message and bump the conversation's `updated_at`.
    pub fn add_message(
        &self,
        conversation_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO messages (conversation_id, role, content) VALUES (?, ?, ?)",
            params![conversation_id, role.as_str(), content],
        )?;
        self.conn.execute(
            "UPDATE conversations SET updated_at = unixepoch() WHERE id = ?",
            [conversation_id],
        )?;
        Ok(())
    }

    /// List conversations, most recently updated first.
    pub fn list_conversations(&self) -> Result<Vec<ConversationSummary>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, updated_at FROM conversations
             ORDER BY updated_at DESC, rowid DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ConversationSummary {
                id: row.get(0)?,
                title: row.get(1)?,
                updated_at: from_unix(row.get(2)?),
            })
        })?;
        rows.collect()
    }

    /// Load the messages of one conversation in insertion order.
    pub fn conversation_messages(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<StoredMessage>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT role, content, created_at FROM messages
             WHERE conversation_id = ? ORDER BY id",
        )?;
        let rows = stmt.query_map([conversation_id], |row| {
            let role: String = row.get(0)?;
            Ok(StoredMessage {
                role: MessageRole::from_column(&role),
                content: row.get(1)?,
                created_at: from_unix(row.get(2)?),
            })
        })?;
        rows.collect()
    }

    /// Delete a conversation and its messages.
    pub fn delete_conversation(&self, conversation_id: &str) -> Result<(), rusqlite::Error> {
        self.conn
            .execute("DELETE FROM conversations WHERE id = ?", [conversation_id])?;
        Ok(())
    }
}

fn from_unix(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

/// The settings table holds the API key, so the file stays owner-only.
#[cfg(unix)]
fn restrict_to_owner(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    let owner_only = std::fs::Permissions::from_mode(0o600);
    if let Err(e) = std::fs::set_permissions(path, owner_only) {
        tracing::warn!(path = %path.display(), error = %e, "Could not restrict database permissions");
    }
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) {}

impl PreferenceStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.get_setting(key)?)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Ok(self.set_setting(key, value)?)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        Ok(self.delete_setting(key)?)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // -------------------------------------------------------------------------
    // Test Helpers
    // -------------------------------------------------------------------------

    fn setup_test_db() -> (TempDir, Database) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db = Database::open_at(db_path).unwrap();
        db.migrate().unwrap();
        (temp_dir, db)
    }

    // -------------------------------------------------------------------------
    // Database Opening/Creation Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_open_at_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let nested_path = tmp.path().join("deep").join("nested").join("test.db");

        assert!(!nested_path.parent().unwrap().exists());
        let _db = Database::open_at(nested_path.clone()).unwrap();
        assert!(nested_path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_open_at_restricts_file_to_owner() {
        use std::os::unix::fs::PermissionsExt;
        let (temp, _db) = setup_test_db();
        let mode = std::fs::metadata(temp.path().join("test.db"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_open_at_reuses_existing_database() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("test.db");

        {
            let db = Database::open_at(path.clone()).unwrap();
            db.migrate().unwrap();
            db.set_setting("coLabThemePreference", "light").unwrap();
        }

        {
            let db = Database::open_at(path).unwrap();
            let value = db.get_setting("coLabThemePreference").unwrap();
            assert_eq!(value, Some("light".to_string()));
        }
    }

    #[test]
    fn test_default_path_returns_valid_path() {
        if let Some(path) = Database::default_path() {
            assert!(path.ends_with("colab/colab.db"));
        }
    }

    #[test]
    fn test_open_in_memory_migrates() {
        let db = Database::open_in_memory().unwrap();
        db.migrate().unwrap();
        db.set_setting("k", "v").unwrap();
        assert_eq!(db.get_setting("k").unwrap().as_deref(), Some("v"));
    }

    // -------------------------------------------------------------------------
    // Settings Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_set_setting_upserts_existing() {
        let (_temp, db) = setup_test_db();

        db.set_setting("coLabThemePreference", "light").unwrap();
        db.set_setting("coLabThemePreference", "dark").unwrap();

        let value = db.get_setting("coLabThemePreference").unwrap();
        assert_eq!(value, Some("dark".to_string()));
    }

    #[test]
    fn test_get_setting_missing_is_none() {
        let (_temp, db) = setup_test_db();
        assert!(db.get_setting("nonexistent").unwrap().is_none());
    }

    #[test]
    fn test_delete_setting_removes_setting() {
        let (_temp, db) = setup_test_db();

        db.set_setting("coLabLeftPanelWidth", "412px").unwrap();
        db.delete_setting("coLabLeftPanelWidth").unwrap();
        assert!(db.get_setting("coLabLeftPanelWidth").unwrap().is_none());
    }

    #[test]
    fn test_database_as_preference_store() {
        let (_temp, db) = setup_test_db();
        let store: &dyn PreferenceStore = &db;

        store.set("coLabLeftPanelCollapsed", "true").unwrap();
        assert_eq!(
            store.get("coLabLeftPanelCollapsed").unwrap(),
            Some("true".to_string())
        );
        store.remove("coLabLeftPanelCollapsed").unwrap();
        assert!(store.get("coLabLeftPanelCollapsed").unwrap().is_none());
    }

    #[test]
    fn test_unmigrated_database_reports_store_error() {
        let db = Database::open_in_memory().unwrap();
        let err = PreferenceStore::get(&db, "anything").unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
    }

    // -------------------------------------------------------------------------
    // Conversation Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_conversation_messages_in_order() {
        let (_temp, db) = setup_test_db();

        let id = db.create_conversation("Summarize the paper").unwrap();
        db.add_message(&id, MessageRole::User, "Summarize the paper")
            .unwrap();
        db.add_message(&id, MessageRole::Assistant, "Simulated reply")
            .unwrap();

        let messages = db.conversation_messages(&id).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert_eq!(messages[1].content, "Simulated reply");
    }

    #[test]
    fn test_list_conversations_newest_first() {
        let (_temp, db) = setup_test_db();

        let first = db.create_conversation("first").unwrap();
        let second = db.create_conversation("second").unwrap();

        let listed = db.list_conversations().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second);
        assert_eq!(listed[1].id, first);
    }

    #[test]
    fn test_delete_conversation_cascades_messages() {
        let (_temp, db) = setup_test_db();

        let id = db.create_conversation("doomed").unwrap();
        db.add_message(&id, MessageRole::User, "hello").unwrap();
        db.delete_conversation(&id).unwrap();

        assert!(db.list_conversations().unwrap().is_empty());
        assert!(db.conversation_messages(&id).unwrap().is_empty());
    }
}

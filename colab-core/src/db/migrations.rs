//! Schema upgrades, keyed on SQLite's `user_version` pragma.
//!
//! `SCHEMA[n]` moves a database from version `n` to `n + 1`.

use rusqlite::Connection;

const SCHEMA: &[&str] = &[
    // v1: UI preference key/value pairs
    r#"
CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT (unixepoch())
);
"#,
    // v2: history sidebar
    r#"
CREATE TABLE IF NOT EXISTS conversations (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    created_at INTEGER NOT NULL DEFAULT (unixepoch()),
    updated_at INTEGER NOT NULL DEFAULT (unixepoch())
);

CREATE TABLE IF NOT EXISTS messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    conversation_id TEXT NOT NULL REFERENCES conversations(id) ON DELETE CASCADE,
    role TEXT NOT NULL CHECK (role IN ('user', 'assistant')),
    content TEXT NOT NULL,
    created_at INTEGER NOT NULL DEFAULT (unixepoch())
);

CREATE INDEX IF NOT EXISTS idx_messages_conversation ON messages(conversation_id);
"#,
];

/// Version a fully migrated database reports.
pub const SCHEMA_VERSION: u32 = SCHEMA.len() as u32;

fn user_version(conn: &Connection) -> rusqlite::Result<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
}

/// Bring the schema up to [`SCHEMA_VERSION`]. Each step commits on its own.
pub fn upgrade(conn: &Connection) -> anyhow::Result<()> {
    let current = user_version(conn)?;
    if current > SCHEMA_VERSION {
        anyhow::bail!(
            "database schema v{current} is newer than this build supports (v{SCHEMA_VERSION})"
        );
    }

    for (version, sql) in SCHEMA.iter().enumerate().skip(current as usize) {
        let next = version as u32 + 1;
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", next)?;
        tx.commit()?;
        tracing::info!(from = version, to = next, "Upgraded database schema");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table'")
            .unwrap();
        let names = stmt.query_map([], |row| row.get(0)).unwrap();
        names.map(|n| n.unwrap()).collect()
    }

    #[test]
    fn test_fresh_database_reaches_current_version() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(user_version(&conn).unwrap(), 0);

        upgrade(&conn).unwrap();
        upgrade(&conn).unwrap();

        assert_eq!(user_version(&conn).unwrap(), SCHEMA_VERSION);
        let tables = table_names(&conn);
        for expected in ["settings", "conversations", "messages"] {
            assert!(tables.iter().any(|t| t == expected), "missing {expected}");
        }
    }

    #[test]
    fn test_upgrade_from_settings_only_keeps_preferences() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA[0]).unwrap();
        conn.pragma_update(None, "user_version", 1u32).unwrap();
        conn.execute(
            "INSERT INTO settings (key, value) VALUES ('coLabLeftPanelWidth', '412px')",
            [],
        )
        .unwrap();

        upgrade(&conn).unwrap();

        let width: String = conn
            .query_row(
                "SELECT value FROM settings WHERE key = 'coLabLeftPanelWidth'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(width, "412px");
        assert!(table_names(&conn).iter().any(|t| t == "messages"));
    }

    #[test]
    fn test_newer_schema_is_refused() {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", SCHEMA_VERSION + 1)
            .unwrap();
        assert!(upgrade(&conn).is_err());
        assert!(table_names(&conn).is_empty());
    }
}

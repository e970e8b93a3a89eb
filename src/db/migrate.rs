//! Schema migrations for the local state database.
//!
//! Each migration runs once and is recorded in `schema_migrations`.

use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::info;

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250110_0001_create_log",
        description: "internal audit log",
        sql: r#"
            CREATE TABLE IF NOT EXISTS log (
                id        INTEGER PRIMARY KEY AUTOINCREMENT,
                date      TEXT NOT NULL,
                operation TEXT NOT NULL,
                target    TEXT DEFAULT '',
                message   TEXT NOT NULL
            );
        "#,
    },
    Migration {
        version: "20250110_0002_create_session",
        description: "local staff session",
        sql: r#"
            CREATE TABLE IF NOT EXISTS session (
                id          INTEGER PRIMARY KEY CHECK (id = 1),
                username    TEXT NOT NULL,
                logged_in   TEXT NOT NULL
            );
        "#,
    },
    Migration {
        version: "20250302_0003_session_default_room",
        description: "remember the last room used in the session",
        sql: "ALTER TABLE session ADD COLUMN last_room TEXT;",
    },
];

fn ensure_migrations_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version     TEXT PRIMARY KEY,
            applied_at  TEXT NOT NULL
        );
        "#,
    )
}

fn is_applied(conn: &Connection, version: &str) -> rusqlite::Result<bool> {
    let found: Option<String> = conn
        .query_row(
            "SELECT version FROM schema_migrations WHERE version = ?1",
            [version],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Apply every migration not yet recorded. Returns how many ran.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    ensure_migrations_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        conn.execute_batch(m.sql)
            .map_err(|e| AppError::Migration(format!("{}: {e}", m.version)))?;
        conn.execute(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
            params![m.version, chrono::Local::now().to_rfc3339()],
        )?;
        info!(version = m.version, description = m.description, "migration applied");
        // la tabella log esiste dalla prima migrazione
        crate::db::log::ttlog(conn, "migration_applied", m.version, m.description)?;
        applied += 1;
    }
    Ok(applied)
}

pub fn applied_versions(conn: &Connection) -> AppResult<Vec<String>> {
    ensure_migrations_table(conn)?;
    let mut stmt = conn.prepare("SELECT version FROM schema_migrations ORDER BY version")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(run_pending_migrations(&conn).unwrap(), MIGRATIONS.len());
        assert_eq!(run_pending_migrations(&conn).unwrap(), 0);
        assert_eq!(applied_versions(&conn).unwrap().len(), MIGRATIONS.len());

        let logged = crate::db::log::load_all(&conn).unwrap();
        assert_eq!(logged.len(), MIGRATIONS.len());
        assert!(logged.iter().all(|e| e.operation == "migration_applied"));
    }
}

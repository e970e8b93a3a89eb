//! Staff session.
//!
//! There is no credential check: a session only records who is working the
//! front desk. Commands receive a `SessionService` instead of reading a
//! global.

use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local};
use rusqlite::{OptionalExtension, params};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub logged_in: DateTime<Local>,
    pub last_room: Option<String>,
}

pub trait SessionService {
    /// Prepare the backing store. Called once at startup.
    fn init(&mut self) -> AppResult<()>;
    fn login(&mut self, username: &str) -> AppResult<Session>;
    /// Clear the session. Returns the user that was logged in, if any.
    fn logout(&mut self) -> AppResult<Option<String>>;
    fn current_user(&self) -> AppResult<Option<Session>>;
    fn remember_room(&mut self, room: &str) -> AppResult<()>;

    fn require_user(&self) -> AppResult<Session> {
        self.current_user()?.ok_or(AppError::NotLoggedIn)
    }
}

/// Session persisted in the local state database (single row, id = 1).
pub struct SqliteSessionStore<'a> {
    pool: &'a mut DbPool,
}

impl<'a> SqliteSessionStore<'a> {
    pub fn new(pool: &'a mut DbPool) -> Self {
        Self { pool }
    }
}

impl SessionService for SqliteSessionStore<'_> {
    fn init(&mut self) -> AppResult<()> {
        crate::db::initialize::init_db(&self.pool.conn)
    }

    fn login(&mut self, username: &str) -> AppResult<Session> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::Other("username is required".into()));
        }
        let now = Local::now();
        self.pool.conn.execute(
            "INSERT INTO session (id, username, logged_in, last_room) VALUES (1, ?1, ?2, NULL)
             ON CONFLICT(id) DO UPDATE SET username = excluded.username,
                                           logged_in = excluded.logged_in,
                                           last_room = NULL",
            params![username, now.to_rfc3339()],
        )?;
        Ok(Session {
            username: username.to_string(),
            logged_in: now,
            last_room: None,
        })
    }

    fn logout(&mut self) -> AppResult<Option<String>> {
        let previous = self.current_user()?.map(|s| s.username);
        self.pool.conn.execute("DELETE FROM session", [])?;
        Ok(previous)
    }

    fn current_user(&self) -> AppResult<Option<Session>> {
        let row = self
            .pool
            .conn
            .query_row(
                "SELECT username, logged_in, last_room FROM session WHERE id = 1",
                [],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, Option<String>>(2)?,
                    ))
                },
            )
            .optional()?;

        let Some((username, raw, last_room)) = row else {
            return Ok(None);
        };
        let logged_in = DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Local))
            .map_err(|e| AppError::Other(format!("corrupt session timestamp '{raw}': {e}")))?;
        Ok(Some(Session {
            username,
            logged_in,
            last_room,
        }))
    }

    fn remember_room(&mut self, room: &str) -> AppResult<()> {
        self.pool.conn.execute(
            "UPDATE session SET last_room = ?1 WHERE id = 1",
            params![room],
        )?;
        Ok(())
    }
}

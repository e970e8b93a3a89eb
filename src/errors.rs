//! Unified application error type.
//! All modules (api, services, core, cli, db) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Local state database
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Remote booking API
    // ---------------------------
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid shift: {0} (use PRANZO or CENA)")]
    InvalidShift(String),

    #[error("Invalid zone type: {0} (use LIVABLE or NON_LIVABLE)")]
    InvalidZoneType(String),

    #[error("Invalid day type: {0} (use WEEKDAY, SATURDAY, SUNDAY or SPECIAL)")]
    InvalidDayType(String),

    // ---------------------------
    // Domain rules
    // ---------------------------
    #[error("Cannot place table: {0}")]
    Placement(String),

    #[error("Cannot assign reservation: {0}")]
    Assignment(String),

    #[error("Zone rejected: {0}")]
    Zone(String),

    #[error("Room '{room}' is not configured for {date} {shift}")]
    NotConfigured {
        room: String,
        date: String,
        shift: String,
    },

    #[error("Invalid reservation: {0}")]
    Reservation(String),

    #[error("Not logged in (run `rsala login <user>`)")]
    NotLoggedIn,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// HTTP status carried by the error, if it came from the server.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            AppError::NotFound(_) => Some(404),
            AppError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Failures worth a second attempt on reads: transport errors and 5xx.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Transport(_) => true,
            AppError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

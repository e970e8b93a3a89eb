//! Shared state for one command invocation.
//!
//! The API client and the local state database are opened on first use, so
//! commands that need neither (`config`, `init`) never touch the network or
//! the disk.

use crate::api::{ApiClient, HttpTransport};
use crate::cli::parser::SlotArgs;
use crate::config::Config;
use crate::db::{initialize, log, pool::DbPool};
use crate::errors::{AppError, AppResult};
use crate::models::Shift;
use crate::services::Services;
use crate::session::{SessionService, SqliteSessionStore};
use crate::utils::date;
use chrono::NaiveDate;
use tracing::{debug, warn};

pub struct AppContext {
    pub cfg: Config,
    services: Option<Services>,
    pool: Option<DbPool>,
}

impl AppContext {
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            services: None,
            pool: None,
        }
    }

    /// Context with pre-built services and state database (tests, embedding).
    pub fn with_parts(cfg: Config, services: Services, pool: DbPool) -> AppResult<Self> {
        initialize::init_db(&pool.conn)?;
        Ok(Self {
            cfg,
            services: Some(services),
            pool: Some(pool),
        })
    }

    pub fn services(&mut self) -> AppResult<&mut Services> {
        if self.services.is_none() {
            let transport = HttpTransport::new(&self.cfg.api_base_url, self.cfg.timeout_secs)?;
            debug!(base_url = %self.cfg.api_base_url, "api client ready");
            let api = ApiClient::new(Box::new(transport), self.cfg.read_retries);
            self.services = Some(Services::new(api, self.cfg.shift_flag_polarity));
        }
        self.services
            .as_mut()
            .ok_or_else(|| AppError::Other("services not initialized".into()))
    }

    pub fn pool(&mut self) -> AppResult<&mut DbPool> {
        if self.pool.is_none() {
            self.pool = Some(initialize::open(&self.cfg.database)?);
        }
        self.pool
            .as_mut()
            .ok_or_else(|| AppError::Other("database not initialized".into()))
    }

    pub fn session(&mut self) -> AppResult<SqliteSessionStore<'_>> {
        Ok(SqliteSessionStore::new(self.pool()?))
    }

    /// User name of the active session; mutations refuse to run without one.
    pub fn require_user(&mut self) -> AppResult<String> {
        Ok(self.session()?.require_user()?.username)
    }

    /// Record a mutation in the internal log. Failures are only reported.
    pub fn audit(&mut self, operation: &str, target: &str, message: &str) {
        let res = self
            .pool()
            .and_then(|p| log::ttlog(&p.conn, operation, target, message));
        if let Err(e) = res {
            warn!(operation, error = %e, "failed to write internal log");
            eprintln!("⚠️ Failed to write internal log: {}", e);
        }
    }

    /// Explicit room, else `default_room`, else the last room of the session.
    pub fn resolve_room(&mut self, explicit: Option<&str>) -> AppResult<String> {
        if let Some(r) = explicit.map(str::trim).filter(|r| !r.is_empty()) {
            return Ok(r.to_string());
        }
        if let Some(r) = self.cfg.default_room.clone() {
            return Ok(r);
        }
        if let Some(r) = self.session()?.current_user()?.and_then(|s| s.last_room) {
            return Ok(r);
        }
        Err(AppError::Other(
            "no room given (use --room or set default_room in the configuration)".into(),
        ))
    }

    pub fn remember_room(&mut self, room: &str) {
        let res = self.session().and_then(|mut s| {
            if s.current_user()?.is_some() {
                s.remember_room(room)?;
            }
            Ok(())
        });
        if let Err(e) = res {
            warn!(room, error = %e, "failed to remember room");
        }
    }

    pub fn resolve_slot(&mut self, slot: &SlotArgs) -> AppResult<(String, NaiveDate, Shift)> {
        let room = self.resolve_room(slot.room.as_deref())?;
        let date = parse_date_arg(&slot.date)?;
        let shift = Shift::parse(&slot.shift)?;
        Ok((room, date, shift))
    }
}

pub fn parse_date_arg(s: &str) -> AppResult<NaiveDate> {
    date::resolve_date(Some(s)).map_err(AppError::InvalidDate)
}

pub fn parse_optional_date(s: Option<&str>) -> AppResult<Option<NaiveDate>> {
    s.map(parse_date_arg).transpose()
}

use crate::api::{ApiClient, endpoints};
use crate::cache::{QueryCache, QueryKey};
use crate::errors::{AppError, AppResult};
use crate::models::{RoomConfiguration, Shift};
use chrono::NaiveDate;
use tracing::{debug, info};

/// Substrings the backend uses when a configuration already exists.
const DUPLICATE_MARKERS: [&str; 2] = ["già esistente", "already exists"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Created,
    AlreadyActive,
}

pub fn is_duplicate(err: &AppError) -> bool {
    match err {
        AppError::Api { message, .. } => {
            let m = message.to_lowercase();
            DUPLICATE_MARKERS.iter().any(|s| m.contains(s))
        }
        _ => false,
    }
}

pub struct ConfigurationService<'a> {
    api: &'a ApiClient,
    cache: &'a mut QueryCache,
}

impl<'a> ConfigurationService<'a> {
    pub fn new(api: &'a ApiClient, cache: &'a mut QueryCache) -> Self {
        Self { api, cache }
    }

    /// Configuration for a room/date/shift, `None` when the server answers 404.
    pub fn get(
        &mut self,
        room: &str,
        date: NaiveDate,
        shift: Shift,
    ) -> AppResult<Option<RoomConfiguration>> {
        let api = self.api;
        let key = QueryKey::Configuration(room.to_string(), date, shift);
        self.cache.get_or_fetch(key, || {
            api.get_optional(&endpoints::configuration(room, date, shift))
        })
    }

    pub fn exists(&mut self, room: &str, date: NaiveDate, shift: Shift) -> AppResult<bool> {
        let found = self.get(room, date, shift)?.is_some();
        debug!(room, %date, %shift, found, "configuration probe");
        Ok(found)
    }

    pub fn require(&mut self, room: &str, date: NaiveDate, shift: Shift) -> AppResult<()> {
        if self.exists(room, date, shift)? {
            Ok(())
        } else {
            Err(AppError::NotConfigured {
                room: room.to_string(),
                date: date.to_string(),
                shift: shift.to_string(),
            })
        }
    }

    /// Create the configuration. A duplicate-creation error counts as success.
    pub fn activate(&mut self, room: &str, date: NaiveDate, shift: Shift) -> AppResult<Activation> {
        let body = RoomConfiguration {
            room: room.to_string(),
            date,
            shift,
        };
        let outcome = match self
            .api
            .post::<_, serde_json::Value>(&endpoints::configurations(), &body)
        {
            Ok(_) => Activation::Created,
            Err(e) if is_duplicate(&e) => Activation::AlreadyActive,
            Err(e) => return Err(e),
        };
        info!(room, %date, %shift, ?outcome, "room activated");

        let key = QueryKey::Configuration(room.to_string(), date, shift);
        self.cache.set(key.clone(), &Some(body))?;
        self.cache.invalidate(&key);
        Ok(outcome)
    }
}

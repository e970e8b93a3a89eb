use crate::api::{ApiClient, endpoints};
use crate::cache::{QueryCache, QueryKey};
use crate::errors::AppResult;
use crate::models::{RoomTemplate, Shift};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

#[derive(Serialize)]
struct CreateTemplate<'a> {
    #[serde(rename = "nomeSala")]
    room: &'a str,
    #[serde(rename = "nomeTemplate")]
    name: &'a str,
    #[serde(rename = "data")]
    date: NaiveDate,
    #[serde(rename = "turno")]
    shift: Shift,
}

#[derive(Serialize)]
struct ApplyTemplate {
    #[serde(rename = "data")]
    date: NaiveDate,
    #[serde(rename = "turno")]
    shift: Shift,
}

pub struct TemplateService<'a> {
    api: &'a ApiClient,
    cache: &'a mut QueryCache,
}

impl<'a> TemplateService<'a> {
    pub fn new(api: &'a ApiClient, cache: &'a mut QueryCache) -> Self {
        Self { api, cache }
    }

    pub fn list(&mut self, room: &str) -> AppResult<Vec<RoomTemplate>> {
        let api = self.api;
        self.cache.get_or_fetch(QueryKey::Templates(room.to_string()), || {
            api.get(&endpoints::room_templates(room))
        })
    }

    /// Snapshot the tables of an active room/date/shift under `name`.
    pub fn create(&mut self, room: &str, name: &str, date: NaiveDate, shift: Shift) -> AppResult<()> {
        let body = CreateTemplate {
            room,
            name,
            date,
            shift,
        };
        self.api
            .post::<_, serde_json::Value>(&endpoints::templates(), &body)?;
        info!(room, template = name, %date, %shift, "template created");
        self.cache
            .invalidate(&QueryKey::Templates(room.to_string()));
        Ok(())
    }

    /// Lay out the template's tables on another date/shift.
    pub fn apply(&mut self, room: &str, name: &str, date: NaiveDate, shift: Shift) -> AppResult<()> {
        self.api.post::<_, serde_json::Value>(
            &endpoints::apply_template(room, name),
            &ApplyTemplate { date, shift },
        )?;
        info!(room, template = name, %date, %shift, "template applied");
        self.cache
            .invalidate_where(|k| k.is_layout_of(room, date, shift));
        Ok(())
    }

    pub fn delete(&mut self, room: &str, name: &str) -> AppResult<()> {
        self.api.delete(&endpoints::room_template(room, name))?;
        info!(room, template = name, "template deleted");
        let key = QueryKey::Templates(room.to_string());
        self.cache
            .update::<Vec<RoomTemplate>, _>(&key, |list| list.retain(|t| t.name != name))?;
        self.cache.invalidate(&key);
        Ok(())
    }
}

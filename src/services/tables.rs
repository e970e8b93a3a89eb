use crate::api::{ApiClient, endpoints};
use crate::cache::{QueryCache, QueryKey};
use crate::core::layout::Cell;
use crate::errors::AppResult;
use crate::models::{Reservation, Shift, Table, TableStatus};
use chrono::NaiveDate;
use tracing::{info, warn};

/// Everything the layout editor needs for one room/date/shift.
#[derive(Debug, Clone, Default)]
pub struct LayoutData {
    pub tables: Vec<Table>,
    pub groups: Vec<(Cell, Vec<String>)>,
}

pub struct TableService<'a> {
    api: &'a ApiClient,
    cache: &'a mut QueryCache,
}

impl<'a> TableService<'a> {
    pub fn new(api: &'a ApiClient, cache: &'a mut QueryCache) -> Self {
        Self { api, cache }
    }

    pub fn list(&mut self, room: &str, date: NaiveDate, shift: Shift) -> AppResult<Vec<Table>> {
        let api = self.api;
        self.cache
            .get_or_fetch(QueryKey::Tables(room.to_string(), date, shift), || {
                api.get(&endpoints::tables(room, date, shift))
            })
    }

    pub fn group(
        &mut self,
        room: &str,
        date: NaiveDate,
        shift: Shift,
        x: u32,
        y: u32,
    ) -> AppResult<Vec<Reservation>> {
        let api = self.api;
        let key = QueryKey::TableGroup(room.to_string(), date, shift, x, y);
        self.cache.get_or_fetch(key, || {
            api.get(&endpoints::table_group(room, date, shift, x, y))
        })
    }

    /// Tables plus the group listing of every table.
    ///
    /// A group that fails to load is logged and skipped: the embedded
    /// assignee of the table still marks its anchor reservation.
    pub fn load_layout(&mut self, room: &str, date: NaiveDate, shift: Shift) -> AppResult<LayoutData> {
        let tables = self.list(room, date, shift)?;
        let mut groups = Vec::with_capacity(tables.len());
        for t in &tables {
            match self.group(room, date, shift, t.x, t.y) {
                Ok(members) if !members.is_empty() => {
                    groups.push(((t.x, t.y), members.into_iter().map(|r| r.name).collect()));
                }
                Ok(_) => {}
                Err(e) => warn!(room, x = t.x, y = t.y, error = %e, "group fetch failed"),
            }
        }
        Ok(LayoutData { tables, groups })
    }

    pub fn create(
        &mut self,
        room: &str,
        date: NaiveDate,
        shift: Shift,
        x: u32,
        y: u32,
    ) -> AppResult<Table> {
        let body = Table::free(x, y);
        let created: Option<Table> = self.api.post(&endpoints::tables(room, date, shift), &body)?;
        let table = created.unwrap_or(body);
        info!(room, %date, %shift, x, y, "table placed");

        let key = QueryKey::Tables(room.to_string(), date, shift);
        self.cache.update::<Vec<Table>, _>(&key, |list| {
            list.retain(|t| !t.at(x, y));
            list.push(table.clone());
        })?;
        self.cache.invalidate(&key);
        Ok(table)
    }

    pub fn delete(&mut self, room: &str, date: NaiveDate, shift: Shift, x: u32, y: u32) -> AppResult<()> {
        self.api.delete(&endpoints::table(room, date, shift, x, y))?;
        info!(room, %date, %shift, x, y, "table removed");

        let key = QueryKey::Tables(room.to_string(), date, shift);
        self.cache
            .update::<Vec<Table>, _>(&key, |list| list.retain(|t| !t.at(x, y)))?;
        self.cache.invalidate(&key);
        self.cache
            .invalidate(&QueryKey::TableGroup(room.to_string(), date, shift, x, y));
        Ok(())
    }

    /// Ask the server to seat a reservation at the table on `(x, y)`.
    pub fn assign(
        &mut self,
        room: &str,
        date: NaiveDate,
        shift: Shift,
        x: u32,
        y: u32,
        name: &str,
    ) -> AppResult<()> {
        self.api
            .post_empty::<serde_json::Value>(&endpoints::assign(room, date, shift, x, y, name))?;
        info!(room, %date, %shift, x, y, reservation = name, "reservation assigned");

        let key = QueryKey::Tables(room.to_string(), date, shift);
        self.cache.update::<Vec<Table>, _>(&key, |list| {
            if let Some(t) = list.iter_mut().find(|t| t.at(x, y)) {
                t.status = TableStatus::Reserved;
                if t.reservation.is_none() {
                    t.reservation = Some(name.to_string());
                }
            }
        })?;
        self.cache.invalidate(&key);
        self.cache
            .invalidate(&QueryKey::TableGroup(room.to_string(), date, shift, x, y));
        Ok(())
    }

    /// Remove one reservation from the group at `(x, y)`; the table stays.
    pub fn ungroup(
        &mut self,
        room: &str,
        date: NaiveDate,
        shift: Shift,
        x: u32,
        y: u32,
        name: &str,
    ) -> AppResult<()> {
        self.api
            .delete(&endpoints::table_group_member(room, date, shift, x, y, name))?;
        info!(room, %date, %shift, x, y, reservation = name, "reservation removed from group");

        let group = QueryKey::TableGroup(room.to_string(), date, shift, x, y);
        let mut next = None;
        self.cache.update::<Vec<Reservation>, _>(&group, |members| {
            members.retain(|r| r.name != name);
            next = members.first().map(|r| r.name.clone());
        })?;

        // l'assegnatario incorporato passa al prossimo del gruppo, o il tavolo torna libero
        let key = QueryKey::Tables(room.to_string(), date, shift);
        self.cache.update::<Vec<Table>, _>(&key, |list| {
            if let Some(t) = list.iter_mut().find(|t| t.at(x, y))
                && t.reservation.as_deref() == Some(name)
            {
                t.reservation = next;
                if t.reservation.is_none() {
                    t.status = TableStatus::Free;
                }
            }
        })?;
        self.cache.invalidate(&group);
        self.cache.invalidate(&key);
        Ok(())
    }
}

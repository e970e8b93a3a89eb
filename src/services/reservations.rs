use crate::api::{ApiClient, endpoints};
use crate::cache::{QueryCache, QueryKey};
use crate::errors::{AppError, AppResult};
use crate::models::{Reservation, Shift};
use chrono::NaiveDate;
use tracing::info;

pub struct ReservationService<'a> {
    api: &'a ApiClient,
    cache: &'a mut QueryCache,
}

impl<'a> ReservationService<'a> {
    pub fn new(api: &'a ApiClient, cache: &'a mut QueryCache) -> Self {
        Self { api, cache }
    }

    pub fn list(&mut self) -> AppResult<Vec<Reservation>> {
        let api = self.api;
        self.cache
            .get_or_fetch(QueryKey::Reservations, || api.get(&endpoints::reservations()))
    }

    /// Reservations of one date, sorted by time then name.
    pub fn list_by_date(&mut self, date: NaiveDate) -> AppResult<Vec<Reservation>> {
        let mut out: Vec<Reservation> = self
            .list()?
            .into_iter()
            .filter(|r| r.date == date)
            .collect();
        out.sort_by(|a, b| a.time.cmp(&b.time).then_with(|| a.name.cmp(&b.name)));
        Ok(out)
    }

    pub fn list_by_shift(&mut self, date: NaiveDate, shift: Shift) -> AppResult<Vec<Reservation>> {
        Ok(self
            .list_by_date(date)?
            .into_iter()
            .filter(|r| r.shift() == shift)
            .collect())
    }

    pub fn get(&mut self, date: NaiveDate, name: &str) -> AppResult<Option<Reservation>> {
        let api = self.api;
        self.cache.get_or_fetch(QueryKey::Reservation(date, name.to_string()), || {
            api.get_optional(&endpoints::reservation(date, name))
        })
    }

    pub fn create(&mut self, reservation: &Reservation) -> AppResult<Reservation> {
        if reservation.name.trim().is_empty() {
            return Err(AppError::Reservation("name is required".into()));
        }
        if reservation.party_size == 0 {
            return Err(AppError::Reservation("party size must be at least 1".into()));
        }

        let created: Option<Reservation> =
            self.api.post(&endpoints::reservations(), reservation)?;
        let created = created.unwrap_or_else(|| reservation.clone());
        info!(name = %created.name, date = %created.date, "reservation created");

        let key = QueryKey::Reservation(created.date, created.name.clone());
        self.cache.set(key.clone(), &Some(created.clone()))?;
        self.cache.invalidate(&key);
        self.cache.invalidate(&QueryKey::Reservations);
        Ok(created)
    }

    pub fn delete(&mut self, date: NaiveDate, name: &str) -> AppResult<()> {
        self.api.delete(&endpoints::reservation(date, name))?;
        info!(name, %date, "reservation deleted");

        self.cache
            .update::<Vec<Reservation>, _>(&QueryKey::Reservations, |list| {
                list.retain(|r| !(r.date == date && r.name == name))
            })?;
        self.cache.invalidate(&QueryKey::Reservations);
        self.cache
            .invalidate(&QueryKey::Reservation(date, name.to_string()));
        // the server drops the reservation from any table group as well
        self.cache.invalidate_where(|k| {
            matches!(k, QueryKey::Tables(..) | QueryKey::TableGroup(..)) && k.date() == Some(date)
        });
        Ok(())
    }
}

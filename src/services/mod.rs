//! Per-resource data access: API calls routed through the shared cache.
//!
//! Each service borrows the API client and the cache for the duration of a
//! call chain, e.g. `services.tables().assign(..)`.

pub mod configurations;
pub mod reservations;
pub mod rooms;
pub mod tables;
pub mod templates;
pub mod working_days;

use crate::api::ApiClient;
use crate::cache::{QueryCache, QueryKey};
use crate::models::Shift;
use crate::models::working_day::FlagPolarity;
use chrono::NaiveDate;

pub use configurations::{Activation, ConfigurationService};
pub use reservations::ReservationService;
pub use rooms::RoomService;
pub use tables::{LayoutData, TableService};
pub use templates::TemplateService;
pub use working_days::WorkingDayService;

pub struct Services {
    api: ApiClient,
    cache: QueryCache,
    polarity: FlagPolarity,
}

impl Services {
    pub fn new(api: ApiClient, polarity: FlagPolarity) -> Self {
        Self {
            api,
            cache: QueryCache::new(),
            polarity,
        }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn polarity(&self) -> FlagPolarity {
        self.polarity
    }

    /// Mark everything the layout of one room/date/shift was built from as
    /// stale, zones included.
    pub fn invalidate_slot(&mut self, room: &str, date: NaiveDate, shift: Shift) {
        let zones = QueryKey::Room(room.to_string());
        let config = QueryKey::Configuration(room.to_string(), date, shift);
        self.cache.invalidate_where(|k| {
            k.is_layout_of(room, date, shift)
                || *k == zones
                || *k == config
                || *k == QueryKey::Reservations
        });
    }

    pub fn reservations(&mut self) -> ReservationService<'_> {
        ReservationService::new(&self.api, &mut self.cache)
    }

    pub fn rooms(&mut self) -> RoomService<'_> {
        RoomService::new(&self.api, &mut self.cache)
    }

    pub fn configurations(&mut self) -> ConfigurationService<'_> {
        ConfigurationService::new(&self.api, &mut self.cache)
    }

    pub fn tables(&mut self) -> TableService<'_> {
        TableService::new(&self.api, &mut self.cache)
    }

    pub fn templates(&mut self) -> TemplateService<'_> {
        TemplateService::new(&self.api, &mut self.cache)
    }

    pub fn working_days(&mut self) -> WorkingDayService<'_> {
        WorkingDayService::new(&self.api, &mut self.cache, self.polarity)
    }
}

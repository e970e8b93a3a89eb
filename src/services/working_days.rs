use crate::api::{ApiClient, endpoints};
use crate::cache::{QueryCache, QueryKey};
use crate::core::schedule;
use crate::errors::{AppError, AppResult};
use crate::models::working_day::FlagPolarity;
use crate::models::{DayType, Shift, WorkingDay};
use chrono::{NaiveDate, NaiveTime};
use tracing::info;

pub struct WorkingDayService<'a> {
    api: &'a ApiClient,
    cache: &'a mut QueryCache,
    polarity: FlagPolarity,
}

impl<'a> WorkingDayService<'a> {
    pub fn new(api: &'a ApiClient, cache: &'a mut QueryCache, polarity: FlagPolarity) -> Self {
        Self {
            api,
            cache,
            polarity,
        }
    }

    pub fn list(&mut self) -> AppResult<Vec<WorkingDay>> {
        let api = self.api;
        self.cache
            .get_or_fetch(QueryKey::WorkingDays, || api.get(&endpoints::working_days()))
    }

    pub fn by_type(&mut self, kind: DayType) -> AppResult<Vec<WorkingDay>> {
        let api = self.api;
        self.cache.get_or_fetch(QueryKey::WorkingDaysByType(kind), || {
            api.get(&endpoints::working_days_by_type(kind))
        })
    }

    /// Effective schedule of a date (special day first, then the weekday template).
    pub fn resolve(&mut self, date: NaiveDate) -> AppResult<Option<WorkingDay>> {
        let all = self.list()?;
        Ok(schedule::resolve(&all, date).cloned())
    }

    pub fn slots(&mut self, date: NaiveDate) -> AppResult<Vec<(Shift, NaiveTime)>> {
        let polarity = self.polarity;
        Ok(self
            .resolve(date)?
            .map(|wd| schedule::day_slots(&wd, polarity))
            .unwrap_or_default())
    }

    pub fn save(&mut self, day: &WorkingDay) -> AppResult<()> {
        if day.day_type == DayType::Special && day.date.is_none() {
            return Err(AppError::InvalidDate("a SPECIAL day needs a date".into()));
        }
        if day.day_type != DayType::Special && day.date.is_some() {
            return Err(AppError::InvalidDate(format!(
                "{} templates are not tied to a date",
                day.day_type
            )));
        }
        self.api
            .post::<_, serde_json::Value>(&endpoints::working_days(), day)?;
        info!(kind = %day.day_type, date = ?day.date, "working day saved");
        self.invalidate(day.day_type);
        Ok(())
    }

    pub fn delete_template(&mut self, kind: DayType) -> AppResult<()> {
        if kind == DayType::Special {
            return Err(AppError::InvalidDayType(
                "SPECIAL entries are deleted by date".into(),
            ));
        }
        self.api.delete(&endpoints::working_day_template(kind))?;
        info!(%kind, "working day template deleted");
        self.invalidate(kind);
        Ok(())
    }

    pub fn delete_special(&mut self, date: NaiveDate) -> AppResult<()> {
        self.api.delete(&endpoints::working_day_special(date))?;
        info!(%date, "special day deleted");
        self.invalidate(DayType::Special);
        Ok(())
    }

    fn invalidate(&mut self, kind: DayType) {
        self.cache.invalidate(&QueryKey::WorkingDays);
        self.cache.invalidate(&QueryKey::WorkingDaysByType(kind));
    }
}

use crate::models::{DayType, Shift};
use chrono::NaiveDate;

/// Identity tuple of a cached API resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Reservations,
    Reservation(NaiveDate, String),
    Rooms,
    Room(String),
    Configuration(String, NaiveDate, Shift),
    Tables(String, NaiveDate, Shift),
    TableGroup(String, NaiveDate, Shift, u32, u32),
    Templates(String),
    WorkingDays,
    WorkingDaysByType(DayType),
}

impl QueryKey {
    /// Room the key belongs to, if any.
    pub fn room(&self) -> Option<&str> {
        match self {
            QueryKey::Room(r)
            | QueryKey::Configuration(r, ..)
            | QueryKey::Tables(r, ..)
            | QueryKey::TableGroup(r, ..)
            | QueryKey::Templates(r) => Some(r),
            _ => None,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            QueryKey::Reservation(d, _)
            | QueryKey::Configuration(_, d, _)
            | QueryKey::Tables(_, d, _)
            | QueryKey::TableGroup(_, d, ..) => Some(*d),
            _ => None,
        }
    }

    /// True for the tables and groups of one room/date/shift.
    pub fn is_layout_of(&self, room: &str, date: NaiveDate, shift: Shift) -> bool {
        match self {
            QueryKey::Tables(r, d, s) | QueryKey::TableGroup(r, d, s, ..) => {
                r == room && *d == date && *s == shift
            }
            _ => false,
        }
    }
}

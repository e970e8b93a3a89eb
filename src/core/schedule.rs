//! Opening-hours resolution and reservation time slots.

use crate::models::working_day::FlagPolarity;
use crate::models::{DayType, Shift, WorkingDay};
use crate::utils::time::minutes_between;
use chrono::{Duration, NaiveDate, NaiveTime};

pub const SLOT_MINUTES: i64 = 15;

/// Effective schedule for a date: an exact `SPECIAL` entry first, then the
/// template of the date's weekday class.
pub fn resolve(entries: &[WorkingDay], date: NaiveDate) -> Option<&WorkingDay> {
    if let Some(special) = entries.iter().find(|e| e.is_special_for(date)) {
        return Some(special);
    }
    let class = DayType::of_date(date);
    entries.iter().find(|e| e.day_type == class)
}

/// Every 15 minutes over `[opens, closes]`, both ends included.
///
/// Produces `floor((closes - opens) / 15) + 1` times, or nothing when the
/// window is inverted.
pub fn slots(opens: NaiveTime, closes: NaiveTime) -> Vec<NaiveTime> {
    let span = minutes_between(opens, closes);
    if span < 0 {
        return Vec::new();
    }
    (0..=span / SLOT_MINUTES)
        .map(|i| opens + Duration::minutes(i * SLOT_MINUTES))
        .collect()
}

/// Slots of one shift, empty when the shift is closed.
pub fn shift_slots(day: &WorkingDay, shift: Shift, polarity: FlagPolarity) -> Vec<NaiveTime> {
    match day.window(shift).bounds(polarity) {
        Some((opens, closes)) => slots(opens, closes),
        None => Vec::new(),
    }
}

/// All bookable times of a day, lunch first.
pub fn day_slots(day: &WorkingDay, polarity: FlagPolarity) -> Vec<(Shift, NaiveTime)> {
    Shift::ALL
        .iter()
        .flat_map(|&s| shift_slots(day, s, polarity).into_iter().map(move |t| (s, t)))
        .collect()
}

pub fn is_bookable(day: &WorkingDay, time: NaiveTime, polarity: FlagPolarity) -> bool {
    day_slots(day, polarity).iter().any(|(_, t)| *t == time)
}

use super::shift::Shift;
use crate::errors::{AppError, AppResult};
use crate::utils::time::hhmm_opt;
use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DayType {
    Weekday,
    Saturday,
    Sunday,
    Special,
}

impl DayType {
    /// Template class of a calendar date (never `Special`).
    pub fn of_date(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sat => DayType::Saturday,
            Weekday::Sun => DayType::Sunday,
            _ => DayType::Weekday,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Weekday => "WEEKDAY",
            DayType::Saturday => "SATURDAY",
            DayType::Sunday => "SUNDAY",
            DayType::Special => "SPECIAL",
        }
    }

    pub fn parse(s: &str) -> AppResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "WEEKDAY" => Ok(DayType::Weekday),
            "SATURDAY" => Ok(DayType::Saturday),
            "SUNDAY" => Ok(DayType::Sunday),
            "SPECIAL" => Ok(DayType::Special),
            _ => Err(AppError::InvalidDayType(s.to_string())),
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Meaning of the `aperto` flag sent by the backend.
///
/// Two versions of the booking form disagree on it, so the polarity is a
/// configuration choice rather than a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FlagPolarity {
    /// `aperto: true` means the shift is open.
    #[default]
    Open,
    /// `aperto: true` means the shift is closed.
    Closed,
}

impl FlagPolarity {
    pub fn is_open(&self, flag: bool) -> bool {
        match self {
            FlagPolarity::Open => flag,
            FlagPolarity::Closed => !flag,
        }
    }

    pub fn flag_for(&self, open: bool) -> bool {
        self.is_open(open)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ShiftWindow {
    #[serde(rename = "aperto", default)]
    pub flag: bool,
    #[serde(rename = "apertura", default, with = "hhmm_opt")]
    pub opens: Option<NaiveTime>,
    #[serde(rename = "chiusura", default, with = "hhmm_opt")]
    pub closes: Option<NaiveTime>,
}

impl ShiftWindow {
    pub fn new(open: bool, opens: NaiveTime, closes: NaiveTime, polarity: FlagPolarity) -> Self {
        Self {
            flag: polarity.flag_for(open),
            opens: Some(opens),
            closes: Some(closes),
        }
    }

    pub fn closed(polarity: FlagPolarity) -> Self {
        Self {
            flag: polarity.flag_for(false),
            opens: None,
            closes: None,
        }
    }

    /// Opening bounds when the shift is open and both times are known.
    pub fn bounds(&self, polarity: FlagPolarity) -> Option<(NaiveTime, NaiveTime)> {
        if !polarity.is_open(self.flag) {
            return None;
        }
        Some((self.opens?, self.closes?))
    }
}

/// Opening hours of one day class, or of one specific date when `SPECIAL`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingDay {
    #[serde(rename = "tipo")]
    pub day_type: DayType,
    #[serde(rename = "data", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "pranzo", default)]
    pub lunch: ShiftWindow,
    #[serde(rename = "cena", default)]
    pub dinner: ShiftWindow,
}

impl WorkingDay {
    pub fn window(&self, shift: Shift) -> &ShiftWindow {
        match shift {
            Shift::Pranzo => &self.lunch,
            Shift::Cena => &self.dinner,
        }
    }

    pub fn is_special_for(&self, date: NaiveDate) -> bool {
        self.day_type == DayType::Special && self.date == Some(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_type_of_date() {
        let d = |s| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        assert_eq!(DayType::of_date(d("2024-05-01")), DayType::Weekday); // mercoledì
        assert_eq!(DayType::of_date(d("2024-05-04")), DayType::Saturday);
        assert_eq!(DayType::of_date(d("2024-05-05")), DayType::Sunday);
    }

    #[test]
    fn polarity_flips_the_flag() {
        let w: ShiftWindow =
            serde_json::from_str(r#"{"aperto":true,"apertura":"12:00","chiusura":"15:00"}"#)
                .unwrap();
        assert!(w.bounds(FlagPolarity::Open).is_some());
        assert!(w.bounds(FlagPolarity::Closed).is_none());
    }

    #[test]
    fn decodes_special_day() {
        let json = r#"{"tipo":"SPECIAL","data":"2024-12-25",
            "pranzo":{"aperto":true,"apertura":"12:00","chiusura":"15:00"},
            "cena":{"aperto":false}}"#;
        let wd: WorkingDay = serde_json::from_str(json).unwrap();
        assert_eq!(wd.day_type, DayType::Special);
        assert!(wd.is_special_for(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap()));
        assert_eq!(wd.dinner.opens, None);
    }
}

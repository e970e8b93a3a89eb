use chrono::{Datelike, NaiveDate, Weekday};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Accepts `YYYY-MM-DD`, `today` and `tomorrow`.
pub fn resolve_date(s: Option<&str>) -> Result<NaiveDate, String> {
    match s.map(str::trim) {
        None | Some("today") => Ok(today()),
        Some("tomorrow") => today()
            .succ_opt()
            .ok_or_else(|| "date out of range".to_string()),
        Some(other) => parse_date(other).ok_or_else(|| other.to_string()),
    }
}

pub fn weekday_str(d: &NaiveDate) -> &'static str {
    match d.weekday() {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

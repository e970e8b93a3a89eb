use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two daily dining periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Shift {
    Pranzo,
    Cena,
}

impl Shift {
    pub const ALL: [Shift; 2] = [Shift::Pranzo, Shift::Cena];

    /// Reservations before 15:00 belong to lunch, the rest to dinner.
    pub fn from_time(t: NaiveTime) -> Self {
        match NaiveTime::from_hms_opt(15, 0, 0) {
            Some(cutoff) if t < cutoff => Shift::Pranzo,
            _ => Shift::Cena,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Pranzo => "PRANZO",
            Shift::Cena => "CENA",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Shift::Pranzo => "Lunch",
            Shift::Cena => "Dinner",
        }
    }

    /// Accepts the wire names plus the english aliases used on the command line.
    pub fn parse(s: &str) -> AppResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "PRANZO" | "LUNCH" | "L" => Ok(Shift::Pranzo),
            "CENA" | "DINNER" | "D" => Ok(Shift::Cena),
            _ => Err(AppError::InvalidShift(s.to_string())),
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    #[test]
    fn infers_shift_from_time() {
        assert_eq!(Shift::from_time(t("12:30")), Shift::Pranzo);
        assert_eq!(Shift::from_time(t("14:59")), Shift::Pranzo);
        assert_eq!(Shift::from_time(t("15:00")), Shift::Cena);
        assert_eq!(Shift::from_time(t("20:15")), Shift::Cena);
    }

    #[test]
    fn parses_aliases() {
        assert_eq!(Shift::parse("pranzo").unwrap(), Shift::Pranzo);
        assert_eq!(Shift::parse("Dinner").unwrap(), Shift::Cena);
        assert!(Shift::parse("brunch").is_err());
    }
}

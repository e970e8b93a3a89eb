use super::shift::Shift;
use crate::utils::time::hhmm;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A table reservation. `(date, name)` is the identity on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "numeroPersone")]
    pub party_size: u32,
    #[serde(rename = "data")]
    pub date: NaiveDate, // ⇔ "yyyy-MM-dd"
    #[serde(rename = "ora", with = "hhmm")]
    pub time: NaiveTime, // ⇔ "HH:mm"
    #[serde(rename = "telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Reservation {
    pub fn new(name: impl Into<String>, party_size: u32, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            name: name.into(),
            party_size,
            date,
            time,
            phone: None,
            note: None,
        }
    }

    pub fn shift(&self) -> Shift {
        Shift::from_time(self.time)
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn time_str(&self) -> String {
        self.time.format("%H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_uses_backend_names() {
        let json = r#"{"nome":"Rossi","numeroPersone":4,"data":"2024-05-01","ora":"20:30","telefono":"333"}"#;
        let r: Reservation = serde_json::from_str(json).unwrap();
        assert_eq!(r.name, "Rossi");
        assert_eq!(r.party_size, 4);
        assert_eq!(r.time_str(), "20:30");
        assert_eq!(r.shift(), Shift::Cena);
        assert_eq!(r.note, None);

        let back = serde_json::to_value(&r).unwrap();
        assert_eq!(back["ora"], "20:30");
        assert_eq!(back["data"], "2024-05-01");
        assert!(back.get("note").is_none());
    }
}

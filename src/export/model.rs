// src/export/model.rs

use crate::models::Reservation;
use serde::Serialize;

/// Struttura “piatta” per export delle prenotazioni.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ReservationExport {
    pub date: String,
    pub time: String,
    pub shift: String,
    pub name: String,
    pub party_size: u32,
    pub phone: String,
    pub note: String,
}

impl From<&Reservation> for ReservationExport {
    fn from(r: &Reservation) -> Self {
        Self {
            date: r.date_str(),
            time: r.time_str(),
            shift: r.shift().to_string(),
            name: r.name.clone(),
            party_size: r.party_size,
            phone: r.phone.clone().unwrap_or_default(),
            note: r.note.clone().unwrap_or_default(),
        }
    }
}

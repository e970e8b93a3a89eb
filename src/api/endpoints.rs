//! REST paths of the booking API. Every dynamic segment is percent-encoded.

use crate::models::{DayType, Shift};
use chrono::NaiveDate;
use urlencoding::encode;

fn d(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// --- prenotazioni ---

pub fn reservations() -> String {
    "/api/prenotazioni".to_string()
}

pub fn reservation(date: NaiveDate, name: &str) -> String {
    format!("/api/prenotazioni/{}/{}", d(date), encode(name))
}

// --- sale ---

pub fn rooms() -> String {
    "/api/sala".to_string()
}

pub fn room(name: &str) -> String {
    format!("/api/sala/{}", encode(name))
}

pub fn room_zones(name: &str) -> String {
    format!("/api/sala/{}/zone", encode(name))
}

// --- configurazioni ---

pub fn configurations() -> String {
    "/api/sala/configurazioni".to_string()
}

pub fn configuration(room: &str, date: NaiveDate, shift: Shift) -> String {
    format!(
        "/api/sala/configurazioni/{}/{}/{}",
        encode(room),
        d(date),
        shift.as_str()
    )
}

// --- tavoli ---

pub fn tables(room: &str, date: NaiveDate, shift: Shift) -> String {
    format!("/api/sala/tavoli/{}/{}/{}", encode(room), d(date), shift.as_str())
}

pub fn table(room: &str, date: NaiveDate, shift: Shift, x: u32, y: u32) -> String {
    format!("{}/{x}/{y}", tables(room, date, shift))
}

pub fn assign(room: &str, date: NaiveDate, shift: Shift, x: u32, y: u32, name: &str) -> String {
    format!(
        "{}/assegna-prenotazione/{}",
        table(room, date, shift, x, y),
        encode(name)
    )
}

pub fn table_group(room: &str, date: NaiveDate, shift: Shift, x: u32, y: u32) -> String {
    format!("{}/prenotazioni-gruppo", table(room, date, shift, x, y))
}

pub fn table_group_member(
    room: &str,
    date: NaiveDate,
    shift: Shift,
    x: u32,
    y: u32,
    name: &str,
) -> String {
    format!("{}/{}", table_group(room, date, shift, x, y), encode(name))
}

// --- template sala ---

pub fn templates() -> String {
    "/api/sala/template".to_string()
}

pub fn room_templates(room: &str) -> String {
    format!("/api/sala/template/{}", encode(room))
}

pub fn room_template(room: &str, name: &str) -> String {
    format!("/api/sala/template/{}/{}", encode(room), encode(name))
}

pub fn apply_template(room: &str, name: &str) -> String {
    format!("{}/applica", room_template(room, name))
}

// --- working days ---

pub fn working_days() -> String {
    "/api/working-days".to_string()
}

pub fn working_days_by_type(kind: DayType) -> String {
    format!("/api/working-days/type/{}", kind.as_str())
}

pub fn working_day_template(kind: DayType) -> String {
    format!("/api/working-days/template/{}", kind.as_str())
}

pub fn working_day_special(date: NaiveDate) -> String {
    format!(
        "/api/working-days/special/{}/{}",
        DayType::Special.as_str(),
        d(date)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_are_encoded() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(
            configuration("Main Hall", date, Shift::Pranzo),
            "/api/sala/configurazioni/Main%20Hall/2024-05-01/PRANZO"
        );
        assert_eq!(
            assign("Main Hall", date, Shift::Cena, 2, 3, "De Luca"),
            "/api/sala/tavoli/Main%20Hall/2024-05-01/CENA/2/3/assegna-prenotazione/De%20Luca"
        );
        assert_eq!(
            working_day_special(date),
            "/api/working-days/special/SPECIAL/2024-05-01"
        );
    }
}

use crate::cli::context::{AppContext, parse_date_arg};
use crate::errors::AppResult;
use crate::models::{Reservation, Shift, WorkingDay};
use crate::models::working_day::FlagPolarity;
use crate::session::SessionService;
use crate::ui::messages::{header, warning};
use crate::utils::colors::colorize_flag;
use crate::utils::date::weekday_str;
use crate::utils::formatting::covers;

/// `12:00–15:00`, or `closed`.
pub fn describe_window(day: &WorkingDay, shift: Shift, polarity: FlagPolarity) -> String {
    match day.window(shift).bounds(polarity) {
        Some((o, c)) => format!("{}–{}", o.format("%H:%M"), c.format("%H:%M")),
        None => "closed".to_string(),
    }
}

/// (reservations, covers) of one shift.
pub fn shift_totals(reservations: &[Reservation], shift: Shift) -> (usize, u32) {
    reservations
        .iter()
        .filter(|r| r.shift() == shift)
        .fold((0, 0), |(n, c), r| (n + 1, c + r.party_size))
}

pub fn handle(ctx: &mut AppContext, date: &str) -> AppResult<()> {
    let date = parse_date_arg(date)?;
    let user = ctx.session()?.current_user()?;

    header(format!("rSala · {date} ({})", weekday_str(&date)));
    match &user {
        Some(s) => println!("👤 {}\n", s.username),
        None => println!("👤 not logged in\n"),
    }

    let services = ctx.services()?;
    let polarity = services.polarity();

    // Orari
    match services.working_days().resolve(date)? {
        Some(day) => {
            println!("🕒 Opening hours ({}):", day.day_type);
            for shift in Shift::ALL {
                println!("   {:<7} {}", shift.label(), describe_window(&day, shift, polarity));
            }
        }
        None => warning("No opening hours defined for this date."),
    }

    // Prenotazioni
    let reservations = services.reservations().list_by_date(date)?;
    println!("\n📅 Reservations:");
    for shift in Shift::ALL {
        let (n, c) = shift_totals(&reservations, shift);
        println!("   {:<7} {n:>3} bookings, {}", shift.label(), covers(c));
    }

    // Sale
    let rooms = services.rooms().list()?;
    println!("\n🍽️  Rooms:");
    if rooms.is_empty() {
        println!("   (none)");
    }
    for room in &rooms {
        let mut flags = Vec::with_capacity(Shift::ALL.len());
        for shift in Shift::ALL {
            let active = services.configurations().exists(&room.name, date, shift)?;
            flags.push(colorize_flag(shift.as_str(), active));
        }
        println!("   {:<24} {}", room.name, flags.join(" "));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn totals_split_by_shift() {
        let d = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let t = |s| NaiveTime::parse_from_str(s, "%H:%M").unwrap();
        let list = vec![
            Reservation::new("Rossi", 4, d, t("12:30")),
            Reservation::new("Bianchi", 2, d, t("13:00")),
            Reservation::new("Verdi", 6, d, t("20:00")),
        ];
        assert_eq!(shift_totals(&list, Shift::Pranzo), (2, 6));
        assert_eq!(shift_totals(&list, Shift::Cena), (1, 6));
    }
}

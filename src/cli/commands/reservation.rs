use crate::cli::context::{AppContext, parse_date_arg};
use crate::cli::parser::ReservationCmd;
use crate::core::schedule;
use crate::errors::{AppError, AppResult};
use crate::models::{Reservation, Shift};
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::ask_confirmation;
use crate::utils::colors::colorize_optional;
use crate::utils::formatting::{bold, covers, wrap_note};
use crate::utils::table::{Column, Table};
use crate::utils::time::require_time;

pub fn handle(cmd: &ReservationCmd, ctx: &mut AppContext) -> AppResult<()> {
    match cmd {
        ReservationCmd::List { date, shift } => list(ctx, date, shift.as_deref()),
        ReservationCmd::Show { name, date } => show(ctx, name, date),
        ReservationCmd::Add {
            name,
            people,
            date,
            time,
            phone,
            note,
            force,
        } => {
            let mut r = Reservation::new(name.trim(), *people, parse_date_arg(date)?, require_time(time)?);
            r.phone = phone.clone().filter(|p| !p.trim().is_empty());
            r.note = note.clone().filter(|n| !n.trim().is_empty());
            add(ctx, r, *force)
        }
        ReservationCmd::Del { name, date, yes } => del(ctx, name, date, *yes),
    }
}

pub fn render_list(reservations: &[Reservation]) -> String {
    let mut table = Table::new(vec![
        Column::new("TIME", 6),
        Column::new("SHIFT", 7),
        Column::new("NAME", 24),
        Column::new("PAX", 4),
        Column::new("PHONE", 16),
        Column::new("NOTE", 30),
    ]);
    for r in reservations {
        table.add_row(vec![
            r.time_str(),
            r.shift().to_string(),
            r.name.clone(),
            r.party_size.to_string(),
            colorize_optional(r.phone.as_deref().unwrap_or("--")),
            colorize_optional(r.note.as_deref().unwrap_or("--")),
        ]);
    }
    table.render()
}

fn list(ctx: &mut AppContext, date: &str, shift: Option<&str>) -> AppResult<()> {
    let date = parse_date_arg(date)?;
    let reservations = match shift {
        Some(s) => ctx
            .services()?
            .reservations()
            .list_by_shift(date, Shift::parse(s)?)?,
        None => ctx.services()?.reservations().list_by_date(date)?,
    };

    if reservations.is_empty() {
        info(format!("No reservations for {date}."));
        return Ok(());
    }

    println!("📅 Reservations for {}\n", bold(&date.to_string()));
    print!("{}", render_list(&reservations));

    let total: u32 = reservations.iter().map(|r| r.party_size).sum();
    println!("\n{} reservations, {}", reservations.len(), covers(total));
    Ok(())
}

fn show(ctx: &mut AppContext, name: &str, date: &str) -> AppResult<()> {
    let date = parse_date_arg(date)?;
    let r = ctx
        .services()?
        .reservations()
        .get(date, name)?
        .ok_or_else(|| AppError::NotFound(format!("reservation '{name}' on {date}")))?;

    println!("👥 {}", bold(&r.name));
    println!("   Date  : {} {} ({})", r.date_str(), r.time_str(), r.shift().label());
    println!("   Party : {}", covers(r.party_size));
    println!("   Phone : {}", colorize_optional(r.phone.as_deref().unwrap_or("--")));
    if let Some(note) = &r.note {
        println!("   Note  : {}", wrap_note(note, 60, "           "));
    }
    Ok(())
}

/// Reject times outside the bookable slots of the date, unless forced.
fn check_slot(ctx: &mut AppContext, r: &Reservation) -> AppResult<()> {
    let services = ctx.services()?;
    let polarity = services.polarity();
    let Some(day) = services.working_days().resolve(r.date)? else {
        return Err(AppError::Reservation(format!(
            "no opening hours defined for {} (use --force to book anyway)",
            r.date
        )));
    };
    if schedule::is_bookable(&day, r.time, polarity) {
        return Ok(());
    }

    let shift = r.shift();
    let available = schedule::shift_slots(&day, shift, polarity);
    let hint = match (available.first(), available.last()) {
        (Some(first), Some(last)) => format!(
            "{} slots run {}–{} every {} min",
            shift.label(),
            first.format("%H:%M"),
            last.format("%H:%M"),
            schedule::SLOT_MINUTES
        ),
        _ => format!("{} is closed", shift.label()),
    };
    Err(AppError::Reservation(format!(
        "{} is not a bookable time on {}: {hint}",
        r.time_str(),
        r.date
    )))
}

fn add(ctx: &mut AppContext, r: Reservation, force: bool) -> AppResult<()> {
    let user = ctx.require_user()?;
    if force {
        warning("Opening-hours check skipped (--force).");
    } else {
        check_slot(ctx, &r)?;
    }

    let created = ctx.services()?.reservations().create(&r)?;
    ctx.audit(
        "reservation_add",
        &created.name,
        &format!(
            "{} {} for {} by {user}",
            created.date_str(),
            created.time_str(),
            covers(created.party_size)
        ),
    );
    success(format!(
        "Reservation '{}' saved for {} at {} ({}).",
        created.name,
        created.date_str(),
        created.time_str(),
        covers(created.party_size)
    ));
    Ok(())
}

fn del(ctx: &mut AppContext, name: &str, date: &str, yes: bool) -> AppResult<()> {
    let user = ctx.require_user()?;
    let date = parse_date_arg(date)?;

    if !yes && !ask_confirmation(&format!("Delete reservation '{name}' on {date}?")) {
        info("Cancelled.");
        return Ok(());
    }

    ctx.services()?.reservations().delete(date, name)?;
    ctx.audit("reservation_del", name, &format!("{date} by {user}"));
    success(format!("Reservation '{name}' on {date} deleted."));
    Ok(())
}

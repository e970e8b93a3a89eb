use crate::cli::commands::dashboard::describe_window;
use crate::cli::context::{AppContext, parse_date_arg, parse_optional_date};
use crate::cli::parser::HoursCmd;
use crate::errors::{AppError, AppResult};
use crate::models::working_day::FlagPolarity;
use crate::models::{DayType, Shift, ShiftWindow, WorkingDay};
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::ask_confirmation;
use crate::utils::table::{Column, Table};
use crate::utils::time::require_time;

pub fn handle(cmd: &HoursCmd, ctx: &mut AppContext) -> AppResult<()> {
    match cmd {
        HoursCmd::List => {
            let services = ctx.services()?;
            let polarity = services.polarity();
            let days = services.working_days().list()?;
            print_days(&days, polarity);
            Ok(())
        }
        HoursCmd::Show { kind } => {
            let kind = DayType::parse(kind)?;
            let services = ctx.services()?;
            let polarity = services.polarity();
            let days = services.working_days().by_type(kind)?;
            print_days(&days, polarity);
            Ok(())
        }
        HoursCmd::Resolve { date } => {
            let date = parse_date_arg(date)?;
            let services = ctx.services()?;
            let polarity = services.polarity();
            match services.working_days().resolve(date)? {
                Some(day) => print_days(std::slice::from_ref(&day), polarity),
                None => warning(format!("No opening hours defined for {date}.")),
            }
            Ok(())
        }
        HoursCmd::Set {
            kind,
            date,
            lunch,
            lunch_closed,
            dinner,
            dinner_closed,
        } => {
            let user = ctx.require_user()?;
            let polarity = ctx.cfg.shift_flag_polarity;
            let day = WorkingDay {
                day_type: DayType::parse(kind)?,
                date: parse_optional_date(date.as_deref())?,
                lunch: window_arg(lunch.as_deref(), *lunch_closed, polarity)?,
                dinner: window_arg(dinner.as_deref(), *dinner_closed, polarity)?,
            };
            ctx.services()?.working_days().save(&day)?;
            ctx.audit(
                "hours_set",
                &target(&day.day_type, day.date.as_ref()),
                &format!(
                    "lunch {}, dinner {} by {user}",
                    describe_window(&day, Shift::Pranzo, polarity),
                    describe_window(&day, Shift::Cena, polarity)
                ),
            );
            success(format!("Opening hours for {} saved.", target(&day.day_type, day.date.as_ref())));
            Ok(())
        }
        HoursCmd::Delete { kind, date, yes } => {
            let user = ctx.require_user()?;
            let kind = DayType::parse(kind)?;
            let date = parse_optional_date(date.as_deref())?;
            let label = target(&kind, date.as_ref());
            if !yes && !ask_confirmation(&format!("Delete opening hours for {label}?")) {
                info("Cancelled.");
                return Ok(());
            }
            match (kind, date) {
                (DayType::Special, Some(d)) => ctx.services()?.working_days().delete_special(d)?,
                (DayType::Special, None) => {
                    return Err(AppError::InvalidDate("a SPECIAL day needs --date".into()));
                }
                (k, _) => ctx.services()?.working_days().delete_template(k)?,
            }
            ctx.audit("hours_del", &label, &format!("by {user}"));
            success(format!("Opening hours for {label} deleted."));
            Ok(())
        }
    }
}

fn target(kind: &DayType, date: Option<&chrono::NaiveDate>) -> String {
    match date {
        Some(d) => format!("{kind} {d}"),
        None => kind.to_string(),
    }
}

/// `HH:MM-HH:MM`, `closed` flag, or nothing (closed).
pub fn window_arg(
    raw: Option<&str>,
    closed: bool,
    polarity: FlagPolarity,
) -> AppResult<ShiftWindow> {
    if closed {
        return Ok(ShiftWindow::closed(polarity));
    }
    let Some(raw) = raw else {
        return Ok(ShiftWindow::closed(polarity));
    };
    let (o, c) = raw
        .split_once('-')
        .ok_or_else(|| AppError::InvalidTime(format!("{raw} (expected HH:MM-HH:MM)")))?;
    let (opens, closes) = (require_time(o)?, require_time(c)?);
    if closes < opens {
        return Err(AppError::InvalidTime(format!(
            "{raw}: closing time is before opening time"
        )));
    }
    Ok(ShiftWindow::new(true, opens, closes, polarity))
}

fn print_days(days: &[WorkingDay], polarity: FlagPolarity) {
    if days.is_empty() {
        info("No opening hours defined.");
        return;
    }
    let mut table = Table::new(vec![
        Column::new("TYPE", 9),
        Column::new("DATE", 11),
        Column::new("LUNCH", 12),
        Column::new("DINNER", 12),
    ]);
    for d in days {
        table.add_row(vec![
            d.day_type.to_string(),
            d.date.map(|x| x.to_string()).unwrap_or_else(|| "--".into()),
            describe_window(d, Shift::Pranzo, polarity),
            describe_window(d, Shift::Cena, polarity),
        ]);
    }
    print!("{}", table.render());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_argument_forms() {
        let p = FlagPolarity::Open;
        let w = window_arg(Some("12:00-15:00"), false, p).unwrap();
        assert!(w.bounds(p).is_some());
        assert!(window_arg(None, false, p).unwrap().bounds(p).is_none());
        assert!(window_arg(Some("12:00-15:00"), true, p).unwrap().bounds(p).is_none());
        assert!(window_arg(Some("15:00-12:00"), false, p).is_err());
        assert!(window_arg(Some("noon"), false, p).is_err());
    }

    #[test]
    fn closed_polarity_writes_inverted_flag() {
        let w = window_arg(Some("19:00-23:00"), false, FlagPolarity::Closed).unwrap();
        assert!(!w.flag);
        assert!(w.bounds(FlagPolarity::Closed).is_some());
    }
}

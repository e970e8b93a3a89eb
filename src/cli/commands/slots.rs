use crate::cli::context::{AppContext, parse_date_arg};
use crate::errors::AppResult;
use crate::models::Shift;
use crate::ui::messages::info;
use crate::utils::date::weekday_str;
use chrono::NaiveTime;

/// Slot times grouped by shift, four per line like a booking sheet.
pub fn render_slots(slots: &[(Shift, NaiveTime)]) -> String {
    let mut out = String::new();
    for shift in Shift::ALL {
        let times: Vec<String> = slots
            .iter()
            .filter(|(s, _)| *s == shift)
            .map(|(_, t)| t.format("%H:%M").to_string())
            .collect();
        if times.is_empty() {
            continue;
        }
        out.push_str(&format!("{}:\n", shift.label()));
        for chunk in times.chunks(4) {
            out.push_str(&format!("   {}\n", chunk.join("  ")));
        }
    }
    out
}

pub fn handle(ctx: &mut AppContext, date: &str, shift: Option<&str>) -> AppResult<()> {
    let date = parse_date_arg(date)?;
    let only = shift.map(Shift::parse).transpose()?;

    let mut slots = ctx.services()?.working_days().slots(date)?;
    if let Some(s) = only {
        slots.retain(|(sh, _)| *sh == s);
    }

    if slots.is_empty() {
        info(format!("No bookable times on {date}."));
        return Ok(());
    }

    let label = if ctx.cfg.show_weekday {
        format!("{date} ({})", weekday_str(&date))
    } else {
        date.to_string()
    };
    println!("🕒 Bookable times for {label}\n");
    print!("{}", render_slots(&slots));
    Ok(())
}

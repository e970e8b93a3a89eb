use crate::cli::commands::layout::load_state;
use crate::cli::context::AppContext;
use crate::cli::parser::TableCmd;
use crate::core::layout::LayoutState;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::ui::prompt::ask_confirmation;
use crate::utils::formatting::{covers, describe_status};
use crate::utils::colors::RESET;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &TableCmd, ctx: &mut AppContext) -> AppResult<()> {
    match cmd {
        TableCmd::List { slot } => {
            let (room, date, shift) = ctx.resolve_slot(slot)?;
            let state = load_state(ctx, &room, date, shift)?;
            list(&state)
        }
        TableCmd::Group { x, y, slot } => {
            let (room, date, shift) = ctx.resolve_slot(slot)?;
            let members = ctx.services()?.tables().group(&room, date, shift, *x, *y)?;
            if members.is_empty() {
                info(format!("Nobody seated at ({x},{y})."));
            }
            for r in &members {
                println!("   {} {:<24} {}", r.time_str(), r.name, covers(r.party_size));
            }
            Ok(())
        }
        TableCmd::Place { x, y, slot } => {
            let user = ctx.require_user()?;
            let (room, date, shift) = ctx.resolve_slot(slot)?;
            let state = load_state(ctx, &room, date, shift)?;
            state.check_placement(*x, *y)?;

            ctx.services()?.tables().create(&room, date, shift, *x, *y)?;
            ctx.audit(
                "table_place",
                &format!("{room} {date} {shift}"),
                &format!("({x},{y}) by {user}"),
            );
            ctx.remember_room(&room);
            success(format!("Table placed at ({x},{y})."));
            Ok(())
        }
        TableCmd::Remove { x, y, slot, yes } => {
            let user = ctx.require_user()?;
            let (room, date, shift) = ctx.resolve_slot(slot)?;
            let state = load_state(ctx, &room, date, shift)?;
            state.check_removal(*x, *y)?;

            let seated = state.group_at(*x, *y).len();
            if !yes
                && !ask_confirmation(&format!(
                    "Remove table ({x},{y}) in '{room}' ({seated} reservation(s) seated)?"
                ))
            {
                info("Cancelled.");
                return Ok(());
            }
            ctx.services()?.tables().delete(&room, date, shift, *x, *y)?;
            ctx.audit(
                "table_remove",
                &format!("{room} {date} {shift}"),
                &format!("({x},{y}) by {user}"),
            );
            success(format!("Table ({x},{y}) removed."));
            Ok(())
        }
        TableCmd::Assign {
            x,
            y,
            reservation,
            slot,
        } => {
            let user = ctx.require_user()?;
            let (room, date, shift) = ctx.resolve_slot(slot)?;
            let state = load_state(ctx, &room, date, shift)?;
            state.check_assignment(reservation, *x, *y)?;

            ctx.services()?
                .tables()
                .assign(&room, date, shift, *x, *y, reservation)?;
            ctx.audit(
                "table_assign",
                &format!("{room} {date} {shift}"),
                &format!("'{reservation}' to ({x},{y}) by {user}"),
            );
            ctx.remember_room(&room);
            success(format!("'{reservation}' seated at ({x},{y})."));
            Ok(())
        }
        TableCmd::Ungroup {
            x,
            y,
            reservation,
            slot,
        } => {
            let user = ctx.require_user()?;
            let (room, date, shift) = ctx.resolve_slot(slot)?;
            let state = load_state(ctx, &room, date, shift)?;
            state.check_ungroup(reservation, *x, *y)?;

            ctx.services()?
                .tables()
                .ungroup(&room, date, shift, *x, *y, reservation)?;
            ctx.audit(
                "table_ungroup",
                &format!("{room} {date} {shift}"),
                &format!("'{reservation}' from ({x},{y}) by {user}"),
            );
            success(format!("'{reservation}' removed from ({x},{y})."));
            Ok(())
        }
    }
}

/// Tables with their groups, then the reservations still waiting for a table.
pub fn render_tables(state: &LayoutState) -> String {
    let mut table = Table::new(vec![
        Column::new("CELL", 8),
        Column::new("STATUS", 10),
        Column::new("COVERS", 7),
        Column::new("SEATED", 40),
    ]);
    let mut tables: Vec<_> = state.tables().iter().collect();
    tables.sort_by_key(|t| (t.y, t.x));
    for t in tables {
        let (label, color) = describe_status(t.status);
        table.add_row(vec![
            format!("({},{})", t.x, t.y),
            format!("{color}{label}{RESET}"),
            state.covers_at(t.x, t.y).to_string(),
            state.group_at(t.x, t.y).join(", "),
        ]);
    }
    table.render()
}

fn list(state: &LayoutState) -> AppResult<()> {
    if !state.is_configured() {
        return Err(AppError::NotConfigured {
            room: state.room.clone(),
            date: state.date.to_string(),
            shift: state.shift.to_string(),
        });
    }
    if state.tables().is_empty() {
        info("No tables placed yet.");
    } else {
        print!("{}", render_tables(state));
    }

    let waiting = state.unassigned();
    if !waiting.is_empty() {
        println!("\n⏳ To seat:");
        for r in waiting {
            println!("   {} {:<24} {}", r.time_str(), r.name, covers(r.party_size));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Reservation, Room, Shift, Table as DiningTable, Zone, ZoneType};
    use crate::utils::table::strip_ansi;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn rendered_rows_follow_the_grid() {
        let mut room = Room::new("Veranda");
        room.zones.push(Zone::new(0, 0, 8, 6, ZoneType::Livable));
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let mut s = LayoutState::new(&room, date, Shift::Pranzo, true);
        let t = NaiveTime::from_hms_opt(12, 30, 0).unwrap();
        s.load(
            vec![DiningTable::free(3, 2), DiningTable::free(1, 0)],
            vec![Reservation::new("Rossi", 4, date, t)],
            &[],
        );
        s.apply_assignment("Rossi", 3, 2);

        let out = strip_ansi(&render_tables(&s));
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[1].starts_with("(1,0)"));
        assert!(lines[2].starts_with("(3,2)"));
        assert!(lines[2].contains("reserved"));
        assert!(lines[2].contains("Rossi"));
    }
}

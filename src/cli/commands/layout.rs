use crate::cli::context::AppContext;
use crate::cli::parser::SlotArgs;
use crate::core::drag::DragState;
use crate::core::layout::{EditMode, LayoutState, TapAction};
use crate::errors::{AppError, AppResult};
use crate::models::{Room, Shift};
use crate::services::Services;
use crate::ui::grid::{legend, render_layout};
use crate::ui::messages::{error, info, success, warning};
use crate::ui::prompt::{read_command, split_args};
use crate::utils::formatting::{bold, covers};
use chrono::NaiveDate;
use std::io::{self, BufRead};
use tracing::debug;

const HELP: &str = "\
commands:
  mode place|remove     what a tap does
  tap X Y               place a table, or remove one in remove mode
  drag NAME             pick up an unassigned reservation
  hover X Y             move the dragged reservation over a cell
  drop                  seat it at the hovered table
  cancel                abandon the drag
  ungroup NAME X Y      take a reservation off the table at (X,Y)
  zoom + | - | N        zoom step or absolute scale (0.5..3.5)
  pinch START CURRENT   two-finger zoom by finger distance
  fit W H               size cells to fit a W x H viewport
  refresh               reload from the server
  show | help | quit";

/// Build the editor state for a room/date/shift from the server.
pub fn load_state(
    ctx: &mut AppContext,
    room: &str,
    date: NaiveDate,
    shift: Shift,
) -> AppResult<LayoutState> {
    let services = ctx.services()?;
    let room = services.rooms().require(room)?;
    let mut state = LayoutState::new(&room, date, shift, false);
    sync_state(services, &mut state, &room)?;
    Ok(state)
}

/// Zones, configuration, tables and reservations of `state`'s slot.
fn sync_state(services: &mut Services, state: &mut LayoutState, room: &Room) -> AppResult<()> {
    let (date, shift) = (state.date, state.shift);
    state.set_zones(room);
    let configured = services.configurations().exists(&room.name, date, shift)?;
    state.set_configured(configured);
    if configured {
        let data = services.tables().load_layout(&room.name, date, shift)?;
        let reservations = services.reservations().list_by_shift(date, shift)?;
        state.load(data.tables, reservations, &data.groups);
    } else {
        state.load(Vec::new(), Vec::new(), &[]);
    }
    debug!(room = %room.name, %date, %shift, configured, tables = state.tables().len(), "layout loaded");
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Zoom {
    In,
    Out,
    To(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutCommand {
    Noop,
    Mode(EditMode),
    Tap(u32, u32),
    Drag(String),
    Hover(u32, u32),
    Drop,
    Cancel,
    Ungroup(u32, u32, String),
    Zoom(Zoom),
    Pinch(f64, f64),
    Fit(f64, f64),
    Refresh,
    Show,
    Help,
    Quit,
}

/// Server round-trips requested by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Place(u32, u32),
    Remove(u32, u32),
    Assign(String, u32, u32),
    Ungroup(String, u32, u32),
    Refresh,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Message(String),
    Redraw,
    Effect(Effect),
    Help,
    Quit,
}

fn arg<'a>(args: &'a [String], i: usize) -> AppResult<&'a str> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| AppError::Other(format!("missing argument #{i} (try `help`)")))
}

fn coord(args: &[String], i: usize) -> AppResult<u32> {
    let raw = arg(args, i)?;
    raw.parse()
        .map_err(|_| AppError::Other(format!("'{raw}' is not a cell coordinate")))
}

fn number(args: &[String], i: usize) -> AppResult<f64> {
    let raw = arg(args, i)?;
    raw.parse()
        .map_err(|_| AppError::Other(format!("'{raw}' is not a number")))
}

pub fn parse_command(args: &[String]) -> AppResult<LayoutCommand> {
    let Some(cmd) = args.first() else {
        return Ok(LayoutCommand::Noop);
    };
    let parsed = match cmd.to_lowercase().as_str() {
        "mode" | "m" => match arg(args, 1)?.to_lowercase().as_str() {
            "place" | "p" => LayoutCommand::Mode(EditMode::Place),
            "remove" | "r" => LayoutCommand::Mode(EditMode::Remove),
            other => return Err(AppError::Other(format!("unknown mode '{other}'"))),
        },
        "tap" | "t" => LayoutCommand::Tap(coord(args, 1)?, coord(args, 2)?),
        "drag" => {
            let name = args[1..].join(" ");
            if name.trim().is_empty() {
                return Err(AppError::Other("drag needs a reservation name".into()));
            }
            LayoutCommand::Drag(name)
        }
        "hover" | "h" => LayoutCommand::Hover(coord(args, 1)?, coord(args, 2)?),
        "drop" => LayoutCommand::Drop,
        "cancel" | "c" => LayoutCommand::Cancel,
        "ungroup" | "u" => {
            if args.len() < 4 {
                return Err(AppError::Other("ungroup needs NAME X Y".into()));
            }
            let n = args.len();
            let name = args[1..n - 2].join(" ");
            if name.trim().is_empty() {
                return Err(AppError::Other("ungroup needs NAME X Y".into()));
            }
            LayoutCommand::Ungroup(coord(args, n - 2)?, coord(args, n - 1)?, name)
        }
        "zoom" | "z" => match arg(args, 1)? {
            "+" | "in" => LayoutCommand::Zoom(Zoom::In),
            "-" | "out" => LayoutCommand::Zoom(Zoom::Out),
            _ => LayoutCommand::Zoom(Zoom::To(number(args, 1)?)),
        },
        "pinch" => LayoutCommand::Pinch(number(args, 1)?, number(args, 2)?),
        "fit" => LayoutCommand::Fit(number(args, 1)?, number(args, 2)?),
        "refresh" | "r" => LayoutCommand::Refresh,
        "show" | "s" => LayoutCommand::Show,
        "help" | "?" => LayoutCommand::Help,
        "quit" | "q" | "exit" => LayoutCommand::Quit,
        other => return Err(AppError::Other(format!("unknown command '{other}' (try `help`)"))),
    };
    Ok(parsed)
}

/// Apply a command to the local state. Anything that needs the server comes
/// back as an `Effect` after local validation has passed.
pub fn step(state: &mut LayoutState, cmd: LayoutCommand) -> AppResult<Step> {
    let out = match cmd {
        LayoutCommand::Noop => Step::Message(String::new()),
        LayoutCommand::Mode(mode) => {
            state.mode = mode;
            Step::Message(format!("mode: {mode:?}").to_lowercase())
        }
        LayoutCommand::Tap(x, y) => match state.tap(x, y) {
            TapAction::Place(_) => {
                state.check_placement(x, y)?;
                Step::Effect(Effect::Place(x, y))
            }
            TapAction::ConfirmRemove(_) => {
                state.check_removal(x, y)?;
                Step::Effect(Effect::Remove(x, y))
            }
        },
        LayoutCommand::Drag(name) => {
            state.begin_drag(&name)?;
            Step::Message(format!(
                "dragging '{name}', {} tables can take it",
                state.drop_targets().len()
            ))
        }
        LayoutCommand::Hover(x, y) => {
            if !state.drag.hover(x, y) {
                return Err(AppError::Assignment("nothing is being dragged".into()));
            }
            Step::Redraw
        }
        LayoutCommand::Drop => {
            let Some((name, (x, y))) = state.drag.drop_here() else {
                state.drag.reset();
                return Err(AppError::Assignment(
                    "drop needs a drag with a hovered cell; drag cancelled".into(),
                ));
            };
            state.drag.reset();
            state.check_assignment(&name, x, y)?;
            Step::Effect(Effect::Assign(name, x, y))
        }
        LayoutCommand::Cancel => {
            state.drag.cancel();
            state.drag.reset();
            Step::Message("drag cancelled".into())
        }
        LayoutCommand::Ungroup(x, y, name) => {
            state.check_ungroup(&name, x, y)?;
            Step::Effect(Effect::Ungroup(name, x, y))
        }
        LayoutCommand::Zoom(z) => {
            let scale = match z {
                Zoom::In => state.viewport.zoom_in(),
                Zoom::Out => state.viewport.zoom_out(),
                Zoom::To(s) => state.viewport.set_scale(s),
            };
            Step::Message(format!("zoom {scale:.2}x"))
        }
        LayoutCommand::Pinch(start, current) => {
            state.viewport.pinch_start(start);
            state.viewport.pinch_move(current);
            state.viewport.pinch_end();
            Step::Message(format!("zoom {:.2}x", state.viewport.scale()))
        }
        LayoutCommand::Fit(w, h) => {
            let (cols, rows) = (state.grid().width, state.grid().height);
            let cell = state.viewport.fit(w, h, cols, rows);
            Step::Message(format!("cell size {cell:.1}"))
        }
        LayoutCommand::Refresh => Step::Effect(Effect::Refresh),
        LayoutCommand::Show => Step::Redraw,
        LayoutCommand::Help => Step::Help,
        LayoutCommand::Quit => Step::Quit,
    };
    Ok(out)
}

fn print_state(state: &LayoutState) {
    println!(
        "🍽️  {} · {} {} · zoom {:.2}x · mode {:?}\n",
        bold(&state.room),
        state.date,
        state.shift,
        state.viewport.scale(),
        state.mode
    );
    if !state.is_configured() {
        warning(format!(
            "Not configured for this date/shift: run `rsala room activate \"{}\" --date {} --shift {}`",
            state.room, state.date, state.shift
        ));
    }
    print!("{}", render_layout(state));
    println!("{}", legend());

    let waiting = state.unassigned();
    if !waiting.is_empty() {
        println!("\n⏳ To seat:");
        for r in waiting {
            println!("   {} {:<24} {}", r.time_str(), r.name, covers(r.party_size));
        }
    }
}

fn confirm<R: BufRead>(input: &mut R, question: &str) -> AppResult<bool> {
    let answer = read_command(input, &format!("{question} [y/N]"))?;
    Ok(matches!(
        answer.as_deref().map(str::to_lowercase).as_deref(),
        Some("y") | Some("yes")
    ))
}

fn run_effect<R: BufRead>(
    ctx: &mut AppContext,
    state: &mut LayoutState,
    effect: Effect,
    user: &str,
    input: &mut R,
) -> AppResult<()> {
    let (room, date, shift) = (state.room.clone(), state.date, state.shift);
    let target = format!("{room} {date} {shift}");
    match effect {
        Effect::Place(x, y) => {
            let table = ctx.services()?.tables().create(&room, date, shift, x, y)?;
            state.apply_placement(table);
            ctx.audit("table_place", &target, &format!("({x},{y}) by {user}"));
            success(format!("Table placed at ({x},{y})."));
        }
        Effect::Remove(x, y) => {
            let seated = state.group_at(x, y).len();
            let question = if seated > 0 {
                format!("Remove table ({x},{y}) with {seated} reservation(s)?")
            } else {
                format!("Remove table ({x},{y})?")
            };
            if !confirm(input, &question)? {
                info("Kept.");
                return Ok(());
            }
            ctx.services()?.tables().delete(&room, date, shift, x, y)?;
            state.apply_removal(x, y);
            ctx.audit("table_remove", &target, &format!("({x},{y}) by {user}"));
            success(format!("Table ({x},{y}) removed."));
        }
        Effect::Assign(name, x, y) => {
            ctx.services()?
                .tables()
                .assign(&room, date, shift, x, y, &name)?;
            state.apply_assignment(&name, x, y);
            ctx.audit("table_assign", &target, &format!("'{name}' to ({x},{y}) by {user}"));
            success(format!("'{name}' seated at ({x},{y})."));
        }
        Effect::Ungroup(name, x, y) => {
            ctx.services()?
                .tables()
                .ungroup(&room, date, shift, x, y, &name)?;
            state.apply_ungroup(&name);
            ctx.audit("table_ungroup", &target, &format!("'{name}' from ({x},{y}) by {user}"));
            success(format!("'{name}' removed from ({x},{y})."));
        }
        Effect::Refresh => refresh(ctx, state)?,
    }
    Ok(())
}

/// Reload server data; local mode and zoom survive.
fn refresh(ctx: &mut AppContext, state: &mut LayoutState) -> AppResult<()> {
    let services = ctx.services()?;
    services.invalidate_slot(&state.room, state.date, state.shift);
    let room = services.rooms().require(&state.room)?;
    state.drag = DragState::default();
    sync_state(services, state, &room)?;
    info("Reloaded.");
    Ok(())
}

pub fn handle(ctx: &mut AppContext, slot: &SlotArgs, zoom: f64) -> AppResult<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    run(ctx, slot, zoom, &mut input)
}

pub fn run<R: BufRead>(ctx: &mut AppContext, slot: &SlotArgs, zoom: f64, input: &mut R) -> AppResult<()> {
    let user = ctx.require_user()?;
    let (room, date, shift) = ctx.resolve_slot(slot)?;
    let mut state = load_state(ctx, &room, date, shift)?;
    state.viewport.set_scale(zoom);
    ctx.remember_room(&state.room);

    print_state(&state);
    println!("{HELP}");

    while let Some(line) = read_command(input, "layout")? {
        let cmd = match parse_command(&split_args(&line)) {
            Ok(c) => c,
            Err(e) => {
                error(e);
                continue;
            }
        };
        match step(&mut state, cmd) {
            Ok(Step::Message(m)) if m.is_empty() => {}
            Ok(Step::Message(m)) => info(m),
            Ok(Step::Redraw) => print_state(&state),
            Ok(Step::Help) => println!("{HELP}"),
            Ok(Step::Quit) => break,
            Ok(Step::Effect(effect)) => match run_effect(ctx, &mut state, effect, &user, input) {
                Ok(()) => print_state(&state),
                // lo stato locale non è stato toccato
                Err(e) => error(e),
            },
            Err(e) => error(e),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Reservation, Room, Table, Zone, ZoneType};
    use chrono::NaiveTime;

    fn state() -> LayoutState {
        let mut room = Room::new("Main Hall");
        room.zones.push(Zone::new(0, 0, 8, 6, ZoneType::Livable));
        room.zones.push(Zone::new(0, 0, 2, 2, ZoneType::NonLivable));
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let mut s = LayoutState::new(&room, date, Shift::Cena, true);
        let t = NaiveTime::from_hms_opt(20, 0, 0).unwrap();
        s.load(
            vec![Table::free(4, 4)],
            vec![Reservation::new("Rossi", 4, date, t)],
            &[],
        );
        s
    }

    fn cmd(line: &str) -> LayoutCommand {
        parse_command(&split_args(line)).unwrap()
    }

    #[test]
    fn parses_names_with_spaces() {
        assert_eq!(cmd("drag Rossi Mario"), LayoutCommand::Drag("Rossi Mario".into()));
        assert_eq!(
            cmd("ungroup \"De Luca\" 1 2"),
            LayoutCommand::Ungroup(1, 2, "De Luca".into())
        );
        assert_eq!(
            cmd("ungroup Rossi Mario 4 4"),
            LayoutCommand::Ungroup(4, 4, "Rossi Mario".into())
        );
        assert!(parse_command(&split_args("ungroup 1 2")).is_err());
        assert_eq!(cmd("zoom 2"), LayoutCommand::Zoom(Zoom::To(2.0)));
        assert!(parse_command(&split_args("tap a 1")).is_err());
    }

    #[test]
    fn tap_validates_before_asking_the_server() {
        let mut s = state();
        assert_eq!(step(&mut s, cmd("tap 5 1")).unwrap(), Step::Effect(Effect::Place(5, 1)));
        assert!(step(&mut s, cmd("tap 0 0")).is_err()); // non livable
        assert!(step(&mut s, cmd("tap 4 4")).is_err()); // occupied

        step(&mut s, cmd("mode remove")).unwrap();
        assert_eq!(step(&mut s, cmd("tap 4 4")).unwrap(), Step::Effect(Effect::Remove(4, 4)));
        assert!(step(&mut s, cmd("tap 5 5")).is_err());
    }

    #[test]
    fn drag_hover_drop_assigns() {
        let mut s = state();
        step(&mut s, cmd("drag Rossi")).unwrap();
        assert_eq!(step(&mut s, cmd("hover 4 4")).unwrap(), Step::Redraw);
        assert_eq!(
            step(&mut s, cmd("drop")).unwrap(),
            Step::Effect(Effect::Assign("Rossi".into(), 4, 4))
        );
        assert!(!s.drag.is_dragging());
    }

    #[test]
    fn drop_on_empty_cell_is_rejected() {
        let mut s = state();
        step(&mut s, cmd("drag Rossi")).unwrap();
        step(&mut s, cmd("hover 6 5")).unwrap();
        assert!(step(&mut s, cmd("drop")).is_err());
        assert!(step(&mut s, cmd("drop")).is_err());
        assert!(step(&mut s, cmd("hover 1 1")).is_err());
    }

    #[test]
    fn zoom_is_clamped() {
        let mut s = state();
        step(&mut s, cmd("zoom 9")).unwrap();
        assert_eq!(s.viewport.scale(), 3.5);
        step(&mut s, cmd("pinch 100 25")).unwrap();
        assert_eq!(s.viewport.scale(), 0.875);
        step(&mut s, cmd("zoom -")).unwrap();
        assert_eq!(s.viewport.scale(), 0.625);
    }
}

use crate::cli::context::{AppContext, parse_date_arg};
use crate::cli::parser::RoomCmd;
use crate::core::grid;
use crate::errors::AppResult;
use crate::models::{Room, Shift};
use crate::services::Activation;
use crate::ui::grid::{legend, render_zones};
use crate::ui::messages::{info, success};
use crate::ui::prompt::ask_confirmation;
use crate::utils::colors::colorize_flag;
use crate::utils::formatting::bold;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &RoomCmd, ctx: &mut AppContext) -> AppResult<()> {
    match cmd {
        RoomCmd::List => list(ctx),
        RoomCmd::Show { name } => show(ctx, name),
        RoomCmd::Add { name } => add(ctx, name),
        RoomCmd::Del { name, yes } => del(ctx, name, *yes),
        RoomCmd::Activate { name, date, shift } => activate(ctx, name, date, shift),
        RoomCmd::Status { name, date } => status(ctx, name, date),
    }
}

pub fn render_rooms(rooms: &[Room]) -> String {
    let mut table = Table::new(vec![
        Column::new("ROOM", 24),
        Column::new("ZONES", 6),
        Column::new("GRID", 8),
        Column::new("LIVABLE", 8),
    ]);
    for room in rooms {
        let g = grid::Grid::from_zones(&room.zones);
        table.add_row(vec![
            room.name.clone(),
            room.zones.len().to_string(),
            format!("{}x{}", g.width, g.height),
            g.livable_cells().to_string(),
        ]);
    }
    table.render()
}

fn list(ctx: &mut AppContext) -> AppResult<()> {
    let rooms = ctx.services()?.rooms().list()?;
    if rooms.is_empty() {
        info("No rooms defined (use `rsala room add <name>`).");
        return Ok(());
    }
    print!("{}", render_rooms(&rooms));
    Ok(())
}

fn show(ctx: &mut AppContext, name: &str) -> AppResult<()> {
    let room = ctx.services()?.rooms().require(name)?;
    let (w, h) = grid::bounds(&room.zones);

    println!("🍽️  {} ({w}x{h})\n", bold(&room.name));
    print!("{}", render_zones(&room.zones, w, h, 1.0));
    println!("{}", legend());

    for (i, z) in room.zones.iter().enumerate() {
        println!(
            "   #{i:<2} {:<11} at ({},{}) size {}x{}",
            z.kind.as_str(),
            z.x,
            z.y,
            z.width,
            z.height
        );
    }
    ctx.remember_room(&room.name);
    Ok(())
}

fn add(ctx: &mut AppContext, name: &str) -> AppResult<()> {
    let user = ctx.require_user()?;
    let room = ctx.services()?.rooms().create(name)?;
    ctx.audit("room_add", &room.name, &format!("Room created by {user}"));
    success(format!("Room '{}' created.", room.name));
    Ok(())
}

fn del(ctx: &mut AppContext, name: &str, yes: bool) -> AppResult<()> {
    let user = ctx.require_user()?;
    if !yes
        && !ask_confirmation(&format!(
            "Delete room '{name}' with all its tables, configurations and templates?"
        ))
    {
        info("Cancelled.");
        return Ok(());
    }

    ctx.services()?.rooms().delete(name)?;
    ctx.audit("room_del", name, &format!("Room deleted by {user}"));
    success(format!("Room '{name}' deleted."));
    Ok(())
}

fn activate(ctx: &mut AppContext, name: &str, date: &str, shift: &str) -> AppResult<()> {
    let user = ctx.require_user()?;
    let date = parse_date_arg(date)?;
    let shift = Shift::parse(shift)?;

    let outcome = ctx.services()?.configurations().activate(name, date, shift)?;
    match outcome {
        Activation::Created => {
            ctx.audit(
                "room_activate",
                name,
                &format!("{date} {shift} activated by {user}"),
            );
            success(format!("Room '{name}' is now editable for {date} {shift}."));
        }
        Activation::AlreadyActive => {
            info(format!("Room '{name}' was already active for {date} {shift}."));
        }
    }
    ctx.remember_room(name);
    Ok(())
}

fn status(ctx: &mut AppContext, name: &str, date: &str) -> AppResult<()> {
    let date = parse_date_arg(date)?;
    let services = ctx.services()?;
    services.rooms().require(name)?;

    println!("🍽️  {} on {date}", bold(name));
    for shift in Shift::ALL {
        let active = services.configurations().exists(name, date, shift)?;
        let label = if active { "configured" } else { "not configured" };
        println!("   {:<7} {}", shift.as_str(), colorize_flag(label, active));
    }
    Ok(())
}

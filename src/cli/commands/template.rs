use crate::cli::context::AppContext;
use crate::cli::parser::TemplateCmd;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::ui::prompt::ask_confirmation;
use crate::utils::formatting::bold;

pub fn handle(cmd: &TemplateCmd, ctx: &mut AppContext) -> AppResult<()> {
    match cmd {
        TemplateCmd::List { room } => {
            let room = ctx.resolve_room(room.as_deref())?;
            let templates = ctx.services()?.templates().list(&room)?;
            if templates.is_empty() {
                info(format!("No templates for '{room}'."));
                return Ok(());
            }
            println!("📐 Templates of {}\n", bold(&room));
            for t in &templates {
                println!("   {:<24} {} tables", t.name, t.tables.len());
            }
            Ok(())
        }
        TemplateCmd::Create { name, slot } => {
            let user = ctx.require_user()?;
            let (room, date, shift) = ctx.resolve_slot(slot)?;
            // il template copia i tavoli di una sala già configurata
            ctx.services()?.configurations().require(&room, date, shift)?;

            ctx.services()?.templates().create(&room, name, date, shift)?;
            ctx.audit(
                "template_add",
                &format!("{room}/{name}"),
                &format!("from {date} {shift} by {user}"),
            );
            success(format!("Template '{name}' saved from {date} {shift}."));
            Ok(())
        }
        TemplateCmd::Apply { name, slot } => {
            let user = ctx.require_user()?;
            let (room, date, shift) = ctx.resolve_slot(slot)?;
            ctx.services()?.configurations().require(&room, date, shift)?;

            ctx.services()?.templates().apply(&room, name, date, shift)?;
            ctx.audit(
                "template_apply",
                &format!("{room}/{name}"),
                &format!("to {date} {shift} by {user}"),
            );
            ctx.remember_room(&room);
            success(format!("Template '{name}' applied to {date} {shift}."));
            Ok(())
        }
        TemplateCmd::Delete { name, room, yes } => {
            let user = ctx.require_user()?;
            let room = ctx.resolve_room(room.as_deref())?;
            if !yes && !ask_confirmation(&format!("Delete template '{name}' of '{room}'?")) {
                info("Cancelled.");
                return Ok(());
            }
            ctx.services()?.templates().delete(&room, name)?;
            ctx.audit("template_del", &format!("{room}/{name}"), &format!("by {user}"));
            success(format!("Template '{name}' deleted."));
            Ok(())
        }
    }
}

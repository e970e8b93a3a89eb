use crate::cli::context::AppContext;
use crate::cli::parser::ZonesCmd;
use crate::core::zone_editor::ZoneEditor;
use crate::errors::{AppError, AppResult};
use crate::models::ZoneType;
use crate::ui::grid::{legend, render_zones};
use crate::ui::messages::{error, info, success, warning};
use crate::ui::prompt::{read_command, split_args};
use crate::utils::formatting::bold;
use std::io::{self, BufRead};

const HELP: &str = "\
commands:
  template W H TYPE   shape to drop (TYPE: LIVABLE | NON_LIVABLE)
  drop X Y            add a zone with its top-left corner on (X,Y)
  remove N            delete zone #N
  size W H            resize the grid (3..30 per side)
  show                redraw the map
  save                send the zones to the server
  quit                leave (quit! discards unsaved changes)";

pub fn handle(cmd: &ZonesCmd, ctx: &mut AppContext) -> AppResult<()> {
    match cmd {
        ZonesCmd::Show { room } => {
            let room = ctx.services()?.rooms().require(room)?;
            let editor = ZoneEditor::new(room.zones.clone());
            print_map(&room.name, &editor);
            Ok(())
        }
        ZonesCmd::Edit { room } => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            edit(ctx, room, &mut input)
        }
    }
}

/// What the editor loop should do after one command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneAction {
    Done(String),
    Show,
    Help,
    Save,
    Quit { force: bool },
}

fn num(args: &[String], i: usize) -> AppResult<u32> {
    let raw = args
        .get(i)
        .ok_or_else(|| AppError::Zone(format!("missing argument #{i}")))?;
    raw.parse()
        .map_err(|_| AppError::Zone(format!("'{raw}' is not a number")))
}

/// Apply one editor command to `editor`.
pub fn apply_command(editor: &mut ZoneEditor, args: &[String]) -> AppResult<ZoneAction> {
    let Some(cmd) = args.first() else {
        return Ok(ZoneAction::Done(String::new()));
    };
    match cmd.to_lowercase().as_str() {
        "template" | "t" => {
            let (w, h) = (num(args, 1)?, num(args, 2)?);
            let kind = ZoneType::parse(args.get(3).map(String::as_str).unwrap_or("LIVABLE"))?;
            editor.set_template(w, h, kind)?;
            Ok(ZoneAction::Done(format!("template {w}x{h} {kind}")))
        }
        "drop" | "d" => {
            let z = editor.drop_template(num(args, 1)?, num(args, 2)?)?;
            Ok(ZoneAction::Done(format!(
                "zone #{} {} at ({},{}) size {}x{}",
                editor.zones().len() - 1,
                z.kind,
                z.x,
                z.y,
                z.width,
                z.height
            )))
        }
        "remove" | "rm" => {
            let idx = num(args, 1)? as usize;
            let z = editor.remove(idx)?;
            Ok(ZoneAction::Done(format!(
                "removed #{idx} {} at ({},{})",
                z.kind, z.x, z.y
            )))
        }
        "size" => {
            let (w, h) = editor.resize(num(args, 1)?, num(args, 2)?);
            Ok(ZoneAction::Done(format!("grid is now {w}x{h}")))
        }
        "show" | "s" => Ok(ZoneAction::Show),
        "help" | "?" => Ok(ZoneAction::Help),
        "save" => Ok(ZoneAction::Save),
        "quit" | "q" | "exit" => Ok(ZoneAction::Quit { force: false }),
        "quit!" | "q!" => Ok(ZoneAction::Quit { force: true }),
        other => Err(AppError::Zone(format!("unknown command '{other}' (try `help`)"))),
    }
}

fn print_map(name: &str, editor: &ZoneEditor) {
    let (w, h) = editor.size();
    println!("🧱 {} ({w}x{h}, {} zones)\n", bold(name), editor.zones().len());
    print!("{}", render_zones(editor.zones(), w, h, 1.0));
    println!("{}", legend());
}

pub fn edit<R: BufRead>(ctx: &mut AppContext, room: &str, input: &mut R) -> AppResult<()> {
    let user = ctx.require_user()?;
    let room = ctx.services()?.rooms().require(room)?;
    ctx.remember_room(&room.name);

    let mut editor = ZoneEditor::new(room.zones.clone());
    print_map(&room.name, &editor);
    println!("{HELP}");

    while let Some(line) = read_command(input, "zones")? {
        let args = split_args(&line);
        match apply_command(&mut editor, &args) {
            Ok(ZoneAction::Done(msg)) if msg.is_empty() => {}
            Ok(ZoneAction::Done(msg)) => info(msg),
            Ok(ZoneAction::Show) => print_map(&room.name, &editor),
            Ok(ZoneAction::Help) => println!("{HELP}"),
            Ok(ZoneAction::Save) => {
                match ctx.services()?.rooms().save_zones(&room.name, editor.zones()) {
                    Ok(saved) => {
                        editor.mark_saved();
                        ctx.audit(
                            "zones_save",
                            &saved.name,
                            &format!("{} zones saved by {user}", saved.zones.len()),
                        );
                        success(format!("{} zones saved.", saved.zones.len()));
                    }
                    // le modifiche locali restano, si può riprovare
                    Err(e) => error(e),
                }
            }
            Ok(ZoneAction::Quit { force }) => {
                if editor.is_dirty() && !force {
                    warning("Unsaved changes: `save` them or `quit!` to discard.");
                    continue;
                }
                break;
            }
            Err(e) => error(e),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Zone;

    fn run(editor: &mut ZoneEditor, line: &str) -> AppResult<ZoneAction> {
        apply_command(editor, &split_args(line))
    }

    #[test]
    fn template_then_drop_adds_zone() {
        let mut ed = ZoneEditor::new(vec![]);
        run(&mut ed, "template 3 2 NON_LIVABLE").unwrap();
        run(&mut ed, "drop 1 1").unwrap();
        assert_eq!(ed.zones(), &[Zone::new(1, 1, 3, 2, ZoneType::NonLivable)]);
        assert!(ed.is_dirty());
    }

    #[test]
    fn bad_input_is_an_error_not_a_panic() {
        let mut ed = ZoneEditor::new(vec![]);
        assert!(run(&mut ed, "drop x 1").is_err());
        assert!(run(&mut ed, "remove 0").is_err());
        assert!(run(&mut ed, "template 2 2 KITCHEN").is_err());
        assert!(run(&mut ed, "fly").is_err());
        assert!(ed.zones().is_empty());
    }

    #[test]
    fn control_commands() {
        let mut ed = ZoneEditor::new(vec![]);
        assert_eq!(run(&mut ed, "save").unwrap(), ZoneAction::Save);
        assert_eq!(run(&mut ed, "q!").unwrap(), ZoneAction::Quit { force: true });
        assert_eq!(run(&mut ed, "").unwrap(), ZoneAction::Done(String::new()));
        assert_eq!(
            run(&mut ed, "size 40 1").unwrap(),
            ZoneAction::Done("grid is now 30x3".into())
        );
    }
}

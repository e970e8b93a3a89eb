use crate::cli::context::{AppContext, parse_date_arg};
use crate::errors::AppResult;
use crate::export::{ExportFormat, ExportLogic};
use std::io;

pub fn handle(
    ctx: &mut AppContext,
    date: &str,
    format: ExportFormat,
    file: &str,
    force: bool,
) -> AppResult<()> {
    let date = parse_date_arg(date)?;
    let reservations = ctx.services()?.reservations().list_by_date(date)?;

    let stdin = io::stdin();
    let written = ExportLogic::export(&reservations, format, file, force, &mut stdin.lock())?;
    if written > 0 {
        ctx.audit(
            "export",
            file,
            &format!("{written} reservations of {date} as {}", format.as_str()),
        );
    }
    Ok(())
}

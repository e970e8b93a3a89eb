// src/export/logic.rs

use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::ReservationExport;
use crate::models::Reservation;
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;
use std::io::BufRead;
use std::path::PathBuf;

/// Logica di alto livello per l'export.
pub struct ExportLogic;

impl ExportLogic {
    /// Resolve the output path (`~` expanded, relative paths against the
    /// working directory) and refuse directories.
    pub fn output_path(file: &str) -> AppResult<PathBuf> {
        if file.trim().is_empty() {
            return Err(AppError::Export("output file is required".into()));
        }
        let path = expand_tilde(file.trim());
        let path = if path.is_absolute() {
            path
        } else {
            std::env::current_dir()?.join(path)
        };
        if path.is_dir() {
            return Err(AppError::Export(format!("{} is a directory", path.display())));
        }
        Ok(path)
    }

    /// Export delle prenotazioni, ordinate per ora.
    ///
    /// Returns the number of rows written; nothing is written when the list is empty.
    pub fn export<R: BufRead>(
        reservations: &[Reservation],
        format: ExportFormat,
        file: &str,
        force: bool,
        input: &mut R,
    ) -> AppResult<usize> {
        let path = Self::output_path(file)?;

        if reservations.is_empty() {
            warning("No reservations found for the selected date.");
            return Ok(0);
        }

        ensure_writable(&path, force, input)?;

        let mut sorted: Vec<&Reservation> = reservations.iter().collect();
        sorted.sort_by(|a, b| a.time.cmp(&b.time).then_with(|| a.name.cmp(&b.name)));
        let rows: Vec<ReservationExport> = sorted.into_iter().map(ReservationExport::from).collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, &path)?,
            ExportFormat::Json => export_json(&rows, &path)?,
        }

        Ok(rows.len())
    }
}

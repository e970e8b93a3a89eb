// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Verifica se un file può essere creato o sovrascritto.
///
/// - Se il file NON esiste → Ok
/// - Se esiste ed è abilitato `force` → Ok
/// - Se esiste e `force == false` → chiede conferma su `input`.
pub(crate) fn ensure_writable<R: BufRead>(path: &Path, force: bool, input: &mut R) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "export cancelled: existing file not overwritten".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn existing_file_needs_consent() {
        let dir = std::env::temp_dir().join(format!("rsala-fs-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("out.csv");
        std::fs::write(&path, "x").unwrap();

        assert!(ensure_writable(&path, false, &mut Cursor::new("n\n")).is_err());
        assert!(ensure_writable(&path, false, &mut Cursor::new("")).is_err());
        assert!(ensure_writable(&path, false, &mut Cursor::new("yes\n")).is_ok());
        assert!(ensure_writable(&path, true, &mut Cursor::new("")).is_ok());
        assert!(ensure_writable(&dir.join("new.csv"), false, &mut Cursor::new("")).is_ok());

        std::fs::remove_dir_all(&dir).ok();
    }
}

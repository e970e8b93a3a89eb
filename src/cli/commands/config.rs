use crate::cli::parser::Commands;
use crate::config::{Config, migrate};
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate: do_migrate,
        edit_config,
        editor,
    } = cmd
    {
        // Path del file di configurazione
        let path = Config::config_file();

        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration:\n");
            println!("{}", cfg.to_yaml()?);
        }

        // ---- CHECK CONFIG ----
        if *check {
            if !path.exists() {
                warning(format!(
                    "No configuration file at {} (defaults in use, run `rsala init`)",
                    path.display()
                ));
            } else {
                let content = std::fs::read_to_string(&path)?;
                let missing = migrate::missing_fields(&content)?;
                if missing.is_empty() {
                    success("Configuration file is complete.");
                } else {
                    warning(format!(
                        "Missing fields: {} (run `rsala config --migrate`)",
                        missing.join(", ")
                    ));
                }
            }
        }

        // ---- MIGRATE CONFIG ----
        if *do_migrate {
            let added = migrate::migrate_file(&path)?;
            if added.is_empty() {
                success("Nothing to migrate.");
            } else {
                success(format!("Added fields: {}", added.join(", ")));
            }
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            edit(&path, editor.clone());
        }
    }

    Ok(())
}

fn edit(path: &std::path::Path, requested_editor: Option<String>) {
    // Default editor basato sulla piattaforma
    let default_editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    // Se l’utente ha passato --editor, usiamo quello
    let editor_to_use = requested_editor.unwrap_or_else(|| default_editor.clone());

    match Command::new(&editor_to_use).arg(path).status() {
        Ok(s) if s.success() => {
            println!(
                "✅ Configuration file edited successfully using '{}'",
                editor_to_use
            );
        }
        Ok(_) | Err(_) => {
            eprintln!(
                "⚠️  Editor '{}' not available, falling back to '{}'",
                editor_to_use, default_editor
            );

            match Command::new(&default_editor).arg(path).status() {
                Ok(s) if s.success() => {
                    println!(
                        "✅ Configuration file edited successfully using fallback '{}'",
                        default_editor
                    );
                }
                Ok(_) | Err(_) => {
                    eprintln!(
                        "❌ Failed to edit configuration file using fallback '{}'",
                        default_editor
                    );
                }
            }
        }
    }
}

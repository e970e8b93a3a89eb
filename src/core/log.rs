use crate::db::log::{LogEntry, load_all};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::table::strip_ansi;
use ansi_term::Colour;

const MAX_OP_WIDTH: usize = 60;

/// Restituisce il colore ANSI in base all'operazione
pub fn color_for_operation(op: &str) -> Colour {
    match op {
        "init" => Colour::RGB(255, 153, 51), // arancione
        "login" | "logout" => Colour::Cyan,
        "migration_applied" => Colour::Purple,
        "export" => Colour::Blue,
        other if other.ends_with("_add") || other.ends_with("_place") || other.ends_with("_assign") => {
            Colour::Green
        }
        other if other.ends_with("_del") || other.ends_with("_remove") || other.ends_with("_ungroup") => {
            Colour::Red
        }
        other if other.ends_with("_save") || other.ends_with("_set") || other.ends_with("_activate") => {
            Colour::Yellow
        }
        _ => Colour::White,
    }
}

/// `operation (target)` truncated to `max` visible characters, with the
/// operation word colored.
pub fn format_op_target(entry: &LogEntry, max: usize) -> String {
    let plain = if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    };

    let visible = if plain.chars().count() > max {
        // taglio a max-3 + "..."
        let mut s: String = plain.chars().take(max.saturating_sub(3)).collect();
        s.push_str("...");
        s
    } else {
        plain
    };

    let color = color_for_operation(&entry.operation);
    match visible.split_once(' ') {
        Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
        None => color.paint(visible.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let entries = load_all(&pool.conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let dates: Vec<String> = entries
            .iter()
            .map(|e| {
                chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or_else(|_| e.date.clone())
            })
            .collect();
        let cells: Vec<String> = entries
            .iter()
            .map(|e| format_op_target(e, MAX_OP_WIDTH))
            .collect();

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = dates.iter().map(|d| d.len()).max().unwrap_or(10);
        let op_w = cells
            .iter()
            .map(|c| strip_ansi(c).chars().count())
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);

        println!("📜 Internal log:\n");

        for ((entry, date), cell) in entries.iter().zip(&dates).zip(&cells) {
            // padding calcolato sulle dimensioni reali SENZA ANSI
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(cell).chars().count()));
            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                entry.id,
                date,
                cell,
                padding,
                entry.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(op: &str, target: &str) -> LogEntry {
        LogEntry {
            id: 1,
            date: "2024-05-01T12:00:00+02:00".into(),
            operation: op.into(),
            target: target.into(),
            message: "m".into(),
        }
    }

    #[test]
    fn long_targets_are_truncated() {
        let e = entry("table_assign", &"x".repeat(100));
        let s = strip_ansi(&format_op_target(&e, 20));
        assert_eq!(s.chars().count(), 20);
        assert!(s.ends_with("..."));
        assert!(s.starts_with("table_assign ("));
    }

    #[test]
    fn operation_colors() {
        assert_eq!(color_for_operation("reservation_del"), Colour::Red);
        assert_eq!(color_for_operation("room_activate"), Colour::Yellow);
        assert_eq!(color_for_operation("table_place"), Colour::Green);
    }
}

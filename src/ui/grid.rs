//! Colored text rendering of room grids.

use crate::core::layout::LayoutState;
use crate::models::{TableStatus, Zone, ZoneType};
use crate::utils::colors::{BG_GREY, CYAN, GREEN, GREY, MAGENTA, RED, RESET, YELLOW};
use crate::core::grid;

/// Columns used by one cell at the given rendered cell size.
pub fn cell_columns(cell_size: f64) -> usize {
    (cell_size.round() as usize).max(1)
}

fn paint(glyph: &str, color: &str, width: usize) -> String {
    let mut s = String::with_capacity(width + 10);
    s.push_str(color);
    s.push_str(glyph);
    for _ in 1..width {
        s.push(' ');
    }
    s.push_str(RESET);
    s
}

fn axis(width: u32, cols: usize) -> String {
    let mut out = String::from("    ");
    for x in 0..width {
        let label = (x % 10).to_string();
        out.push_str(&format!("{:<cols$}", label, cols = cols));
    }
    out
}

fn zone_glyph(kind: Option<ZoneType>) -> (&'static str, &'static str) {
    match kind {
        Some(ZoneType::Livable) => ("·", GREEN),
        Some(ZoneType::NonLivable) => ("█", GREY),
        None => (" ", RESET),
    }
}

/// Zone map as edited by the zone editor.
pub fn render_zones(zones: &[Zone], width: u32, height: u32, cell_size: f64) -> String {
    let cols = cell_columns(cell_size);
    let mut out = axis(width, cols);
    out.push('\n');
    for y in 0..height {
        out.push_str(&format!("{:>3} ", y));
        for x in 0..width {
            let (g, c) = zone_glyph(grid::classify(zones, x, y));
            out.push_str(&paint(g, c, cols));
        }
        out.push('\n');
    }
    out
}

/// Full layout: zones, tables, groups and the current drag highlight.
pub fn render_layout(state: &LayoutState) -> String {
    let g = state.grid();
    let cols = cell_columns(state.viewport.cell_size());
    let hovered = state.drag.hovered();
    let targets = state.drop_targets();

    let mut out = axis(g.width, cols);
    out.push('\n');
    for y in 0..g.height {
        out.push_str(&format!("{:>3} ", y));
        for x in 0..g.width {
            let cell = match state.table_at(x, y) {
                Some(t) => {
                    let seated = state.group_at(x, y).len();
                    let glyph = if seated > 1 {
                        // più prenotazioni allo stesso tavolo
                        if seated > 9 { "+".to_string() } else { seated.to_string() }
                    } else {
                        "T".to_string()
                    };
                    let color = if hovered == Some((x, y)) {
                        MAGENTA
                    } else if targets.contains(&(x, y)) {
                        CYAN
                    } else {
                        match t.status {
                            TableStatus::Free => GREEN,
                            TableStatus::Reserved => YELLOW,
                            TableStatus::Occupied => RED,
                        }
                    };
                    paint(&glyph, &format!("{BG_GREY}{color}"), cols)
                }
                None if hovered == Some((x, y)) => paint("×", MAGENTA, cols),
                None => {
                    let (gl, c) = zone_glyph(g.classify(x, y));
                    paint(gl, c, cols)
                }
            };
            out.push_str(&cell);
        }
        out.push('\n');
    }
    out
}

pub fn legend() -> String {
    format!(
        "{GREEN}·{RESET} livable  {GREY}█{RESET} non-livable  {GREEN}T{RESET} free  {YELLOW}T{RESET} reserved  {RED}T{RESET} occupied  2-9 group size"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::table::strip_ansi;

    #[test]
    fn zone_map_has_one_line_per_row() {
        let zones = vec![
            Zone::new(0, 0, 8, 6, ZoneType::Livable),
            Zone::new(0, 0, 1, 1, ZoneType::NonLivable),
        ];
        let out = strip_ansi(&render_zones(&zones, 8, 6, 1.0));
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[1].starts_with("  0 █·"));
    }

    #[test]
    fn cell_columns_never_zero() {
        assert_eq!(cell_columns(0.2), 1);
        assert_eq!(cell_columns(2.6), 3);
    }
}

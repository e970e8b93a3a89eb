//! Table placement and reservation assignment on a room grid.
//!
//! `LayoutState` is the in-memory model behind the layout editor. It only
//! validates and records changes; the server round-trips live in
//! `services::tables`.

use crate::core::drag::DragState;
use crate::core::grid::Grid;
use crate::core::viewport::Viewport;
use crate::errors::{AppError, AppResult};
use crate::models::{Reservation, Room, Shift, Table, TableStatus, ZoneType};
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub type Cell = (u32, u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Place,
    Remove,
}

/// What a tap on a cell asks for, given the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapAction {
    Place(Cell),
    ConfirmRemove(Cell),
}

/// Reservation name → anchor cell of the group it sits in.
///
/// Built from the assignee embedded in each table plus the per-table group
/// listings; both sources are merged by reservation name.
pub fn reconcile_assignments(tables: &[Table], groups: &[(Cell, Vec<String>)]) -> BTreeMap<String, Cell> {
    let mut out = BTreeMap::new();
    for t in tables {
        if let Some(name) = &t.reservation {
            out.insert(name.clone(), (t.x, t.y));
        }
    }
    for (cell, names) in groups {
        for n in names {
            out.entry(n.clone()).or_insert(*cell);
        }
    }
    out
}

#[derive(Debug, Clone)]
pub struct LayoutState {
    pub room: String,
    pub date: NaiveDate,
    pub shift: Shift,
    pub mode: EditMode,
    pub drag: DragState<String>,
    pub viewport: Viewport,
    grid: Grid,
    tables: Vec<Table>,
    reservations: Vec<Reservation>,
    assigned: BTreeMap<String, Cell>,
    configured: bool,
}

impl LayoutState {
    pub fn new(room: &Room, date: NaiveDate, shift: Shift, configured: bool) -> Self {
        Self {
            room: room.name.clone(),
            date,
            shift,
            mode: EditMode::default(),
            drag: DragState::default(),
            viewport: Viewport::default(),
            grid: Grid::from_zones(&room.zones),
            tables: Vec::new(),
            reservations: Vec::new(),
            assigned: BTreeMap::new(),
            configured,
        }
    }

    /// Replace the server-derived data; local UI state (mode, zoom) is kept.
    pub fn load(
        &mut self,
        tables: Vec<Table>,
        reservations: Vec<Reservation>,
        groups: &[(Cell, Vec<String>)],
    ) {
        self.assigned = reconcile_assignments(&tables, groups);
        self.tables = tables;
        self.reservations = reservations
            .into_iter()
            .filter(|r| r.date == self.date && r.shift() == self.shift)
            .collect();
    }

    pub fn set_zones(&mut self, room: &Room) {
        self.grid = Grid::from_zones(&room.zones);
    }

    pub fn set_configured(&mut self, configured: bool) {
        self.configured = configured;
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn table_at(&self, x: u32, y: u32) -> Option<&Table> {
        self.tables.iter().find(|t| t.at(x, y))
    }

    pub fn is_assigned(&self, name: &str) -> bool {
        self.assigned.contains_key(name)
    }

    pub fn assigned_cell(&self, name: &str) -> Option<Cell> {
        self.assigned.get(name).copied()
    }

    pub fn group_at(&self, x: u32, y: u32) -> Vec<&str> {
        self.assigned
            .iter()
            .filter(|(_, c)| **c == (x, y))
            .map(|(n, _)| n.as_str())
            .collect()
    }

    pub fn unassigned(&self) -> Vec<&Reservation> {
        self.reservations
            .iter()
            .filter(|r| !self.is_assigned(&r.name))
            .collect()
    }

    fn require_configured(&self) -> AppResult<()> {
        if self.configured {
            Ok(())
        } else {
            Err(AppError::NotConfigured {
                room: self.room.clone(),
                date: self.date.to_string(),
                shift: self.shift.to_string(),
            })
        }
    }

    /// A table may only go on an in-bounds, livable, empty cell.
    pub fn check_placement(&self, x: u32, y: u32) -> AppResult<()> {
        self.require_configured()?;
        if !self.grid.in_bounds(x, y) {
            return Err(AppError::Placement(format!(
                "({x},{y}) is outside the {}x{} grid",
                self.grid.width, self.grid.height
            )));
        }
        match self.grid.classify(x, y) {
            Some(ZoneType::Livable) => {}
            Some(ZoneType::NonLivable) => {
                return Err(AppError::Placement(format!("({x},{y}) is not livable")));
            }
            None => {
                return Err(AppError::Placement(format!("({x},{y}) is outside every zone")));
            }
        }
        if self.table_at(x, y).is_some() {
            return Err(AppError::Placement(format!("({x},{y}) already has a table")));
        }
        Ok(())
    }

    pub fn check_removal(&self, x: u32, y: u32) -> AppResult<&Table> {
        self.require_configured()?;
        self.table_at(x, y)
            .ok_or_else(|| AppError::Placement(format!("no table at ({x},{y})")))
    }

    fn find_reservation(&self, name: &str) -> AppResult<&Reservation> {
        self.reservations
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| {
                AppError::Assignment(format!(
                    "no reservation '{name}' for {} {}",
                    self.date, self.shift
                ))
            })
    }

    /// Only reservations not yet sitting in a group can be dragged.
    pub fn check_draggable(&self, name: &str) -> AppResult<()> {
        self.find_reservation(name)?;
        if let Some((x, y)) = self.assigned_cell(name) {
            return Err(AppError::Assignment(format!(
                "'{name}' is already at table ({x},{y}); remove it from that group first"
            )));
        }
        Ok(())
    }

    pub fn check_assignment(&self, name: &str, x: u32, y: u32) -> AppResult<()> {
        self.require_configured()?;
        self.check_draggable(name)?;
        if self.table_at(x, y).is_none() {
            return Err(AppError::Assignment(format!("no table at ({x},{y})")));
        }
        Ok(())
    }

    pub fn check_ungroup(&self, name: &str, x: u32, y: u32) -> AppResult<()> {
        self.require_configured()?;
        match self.assigned_cell(name) {
            Some(cell) if cell == (x, y) => Ok(()),
            Some((ax, ay)) => Err(AppError::Assignment(format!(
                "'{name}' belongs to the group at ({ax},{ay}), not ({x},{y})"
            ))),
            None => Err(AppError::Assignment(format!("'{name}' is not assigned"))),
        }
    }

    pub fn begin_drag(&mut self, name: &str) -> AppResult<()> {
        self.check_draggable(name)?;
        if !self.drag.start(name.to_string()) {
            return Err(AppError::Assignment("another drag is in progress".into()));
        }
        Ok(())
    }

    pub fn tap(&self, x: u32, y: u32) -> TapAction {
        match self.mode {
            EditMode::Place => TapAction::Place((x, y)),
            EditMode::Remove => TapAction::ConfirmRemove((x, y)),
        }
    }

    /// Cells that would accept the current drag, or an empty list when idle.
    pub fn drop_targets(&self) -> Vec<Cell> {
        if self.drag.is_dragging() {
            self.tables.iter().map(|t| (t.x, t.y)).collect()
        } else {
            Vec::new()
        }
    }

    pub fn apply_placement(&mut self, table: Table) {
        self.tables.retain(|t| !t.at(table.x, table.y));
        self.tables.push(table);
    }

    pub fn apply_removal(&mut self, x: u32, y: u32) {
        self.tables.retain(|t| !t.at(x, y));
        self.assigned.retain(|_, c| *c != (x, y));
    }

    pub fn apply_assignment(&mut self, name: &str, x: u32, y: u32) {
        if let Some(t) = self.tables.iter_mut().find(|t| t.at(x, y)) {
            t.status = TableStatus::Reserved;
            if t.reservation.is_none() {
                t.reservation = Some(name.to_string());
            }
        }
        self.assigned.insert(name.to_string(), (x, y));
    }

    pub fn apply_ungroup(&mut self, name: &str) {
        let Some(cell) = self.assigned.remove(name) else {
            return;
        };
        let remaining: Option<String> = self
            .assigned
            .iter()
            .find(|(_, c)| **c == cell)
            .map(|(n, _)| n.clone());
        if let Some(t) = self.tables.iter_mut().find(|t| t.at(cell.0, cell.1)) {
            if t.reservation.as_deref() == Some(name) {
                t.reservation = remaining.clone();
            }
            if remaining.is_none() {
                t.status = TableStatus::Free;
            }
        }
    }

    /// Covers seated at a group anchor.
    pub fn covers_at(&self, x: u32, y: u32) -> u32 {
        let names = self.group_at(x, y);
        self.reservations
            .iter()
            .filter(|r| names.contains(&r.name.as_str()))
            .map(|r| r.party_size)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Zone;
    use chrono::NaiveTime;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn res(name: &str, time: &str, pax: u32) -> Reservation {
        Reservation::new(name, pax, date(), NaiveTime::parse_from_str(time, "%H:%M").unwrap())
    }

    fn main_hall() -> Room {
        let mut r = Room::new("Main Hall");
        r.zones = vec![
            Zone::new(0, 0, 8, 6, ZoneType::Livable),
            Zone::new(6, 0, 2, 2, ZoneType::NonLivable),
        ];
        r
    }

    fn state() -> LayoutState {
        let mut s = LayoutState::new(&main_hall(), date(), Shift::Pranzo, true);
        s.load(
            vec![Table::free(1, 1)],
            vec![res("Rossi", "12:30", 4), res("Bianchi", "13:00", 2), res("Verdi", "20:00", 3)],
            &[],
        );
        s
    }

    #[test]
    fn placement_rules() {
        let s = state();
        assert!(s.check_placement(2, 2).is_ok());
        assert!(s.check_placement(9, 9).is_err());
        assert!(s.check_placement(6, 1).is_err()); // non livable
        assert!(s.check_placement(1, 1).is_err()); // occupied
    }

    #[test]
    fn unconfigured_shift_refuses_edits() {
        let mut s = state();
        s.set_configured(false);
        assert!(matches!(
            s.check_placement(2, 2),
            Err(AppError::NotConfigured { .. })
        ));
        assert!(s.check_removal(1, 1).is_err());
    }

    #[test]
    fn only_reservations_of_the_shift_are_loaded() {
        let s = state();
        let names: Vec<_> = s.reservations().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Rossi", "Bianchi"]);
    }

    #[test]
    fn assigned_reservation_cannot_be_dragged_again() {
        let mut s = state();
        s.check_assignment("Rossi", 1, 1).unwrap();
        s.apply_assignment("Rossi", 1, 1);
        assert!(s.is_assigned("Rossi"));
        assert!(s.begin_drag("Rossi").is_err());
        assert!(s.check_assignment("Rossi", 1, 1).is_err());
        assert_eq!(s.table_at(1, 1).unwrap().status, TableStatus::Reserved);

        s.apply_ungroup("Rossi");
        assert!(s.begin_drag("Rossi").is_ok());
        assert_eq!(s.table_at(1, 1).unwrap().status, TableStatus::Free);
    }

    #[test]
    fn groups_share_an_anchor() {
        let mut s = state();
        s.apply_assignment("Rossi", 1, 1);
        s.apply_assignment("Bianchi", 1, 1);
        assert_eq!(s.group_at(1, 1), vec!["Bianchi", "Rossi"]);
        assert_eq!(s.covers_at(1, 1), 6);

        s.apply_ungroup("Rossi");
        let t = s.table_at(1, 1).unwrap();
        assert_eq!(t.reservation.as_deref(), Some("Bianchi"));
        assert_eq!(t.status, TableStatus::Reserved);
        assert!(s.check_ungroup("Rossi", 1, 1).is_err());
        assert!(s.check_ungroup("Bianchi", 2, 2).is_err());
    }

    #[test]
    fn reconcile_merges_both_sources() {
        let mut t = Table::free(3, 3);
        t.reservation = Some("Rossi".into());
        let groups = vec![((3, 3), vec!["Rossi".to_string(), "Neri".to_string()])];
        let m = reconcile_assignments(&[t], &groups);
        assert_eq!(m.len(), 2);
        assert_eq!(m["Neri"], (3, 3));
    }

    #[test]
    fn removing_a_table_releases_its_group() {
        let mut s = state();
        s.apply_assignment("Rossi", 1, 1);
        s.apply_removal(1, 1);
        assert!(s.table_at(1, 1).is_none());
        assert!(!s.is_assigned("Rossi"));
    }

    #[test]
    fn tap_follows_mode_and_drag_highlights_tables() {
        let mut s = state();
        assert_eq!(s.tap(2, 2), TapAction::Place((2, 2)));
        s.mode = EditMode::Remove;
        assert_eq!(s.tap(1, 1), TapAction::ConfirmRemove((1, 1)));
        assert!(s.drop_targets().is_empty());
        s.begin_drag("Bianchi").unwrap();
        assert_eq!(s.drop_targets(), vec![(1, 1)]);
    }
}

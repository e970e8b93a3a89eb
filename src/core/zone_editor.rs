//! Authoring of a room's livable / non-livable rectangles.

use crate::core::grid;
use crate::errors::{AppError, AppResult};
use crate::models::{Zone, ZoneType};

pub const MIN_SIDE: u32 = 3;
pub const MAX_SIDE: u32 = 30;

/// Shape dragged onto the grid to create a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneTemplate {
    pub width: u32,
    pub height: u32,
    pub kind: ZoneType,
}

impl Default for ZoneTemplate {
    fn default() -> Self {
        Self {
            width: 2,
            height: 2,
            kind: ZoneType::Livable,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ZoneEditor {
    zones: Vec<Zone>,
    width: u32,
    height: u32,
    pub template: ZoneTemplate,
    dirty: bool,
}

fn clamp_side(v: u32) -> u32 {
    v.clamp(MIN_SIDE, MAX_SIDE)
}

impl ZoneEditor {
    pub fn new(zones: Vec<Zone>) -> Self {
        let (w, h) = grid::bounds(&zones);
        Self {
            zones,
            width: clamp_side(w),
            height: clamp_side(h),
            template: ZoneTemplate::default(),
            dirty: false,
        }
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub fn resize(&mut self, width: u32, height: u32) -> (u32, u32) {
        self.width = clamp_side(width);
        self.height = clamp_side(height);
        (self.width, self.height)
    }

    pub fn set_template(&mut self, width: u32, height: u32, kind: ZoneType) -> AppResult<()> {
        if width == 0 || height == 0 {
            return Err(AppError::Zone("template sides must be at least 1".into()));
        }
        self.template = ZoneTemplate {
            width,
            height,
            kind,
        };
        Ok(())
    }

    /// Drop the current template with its top-left corner on `(x, y)`.
    pub fn drop_template(&mut self, x: u32, y: u32) -> AppResult<Zone> {
        let t = self.template;
        let right = x.saturating_add(t.width);
        let bottom = y.saturating_add(t.height);
        if right > self.width || bottom > self.height {
            return Err(AppError::Zone(format!(
                "{}x{} at ({x},{y}) exceeds the {}x{} grid",
                t.width, t.height, self.width, self.height
            )));
        }

        let zone = Zone::new(x, y, t.width, t.height, t.kind);
        self.zones.push(zone);
        self.dirty = true;
        Ok(zone)
    }

    pub fn remove(&mut self, index: usize) -> AppResult<Zone> {
        if index >= self.zones.len() {
            return Err(AppError::Zone(format!(
                "no zone #{index} (room has {})",
                self.zones.len()
            )));
        }
        self.dirty = true;
        Ok(self.zones.remove(index))
    }

    pub fn classify(&self, x: u32, y: u32) -> Option<ZoneType> {
        grid::classify(&self.zones, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_is_clamped() {
        let mut ed = ZoneEditor::new(vec![]);
        assert_eq!(ed.size(), (8, 6));
        assert_eq!(ed.resize(1, 50), (3, 30));
    }

    #[test]
    fn drop_appends_zone_at_cell() {
        let mut ed = ZoneEditor::new(vec![]);
        ed.set_template(3, 2, ZoneType::NonLivable).unwrap();
        let z = ed.drop_template(5, 4).unwrap();
        assert_eq!(z, Zone::new(5, 4, 3, 2, ZoneType::NonLivable));
        assert_eq!(ed.zones().len(), 1);
        assert!(ed.is_dirty());
    }

    #[test]
    fn drop_outside_grid_is_rejected() {
        let mut ed = ZoneEditor::new(vec![]);
        ed.set_template(3, 2, ZoneType::Livable).unwrap();
        assert!(ed.drop_template(6, 0).is_err()); // 6+3 > 8
        assert!(ed.drop_template(0, 5).is_err()); // 5+2 > 6
        assert!(ed.zones().is_empty());
        assert!(!ed.is_dirty());
    }

    #[test]
    fn remove_by_index() {
        let mut ed = ZoneEditor::new(vec![
            Zone::new(0, 0, 8, 6, ZoneType::Livable),
            Zone::new(0, 0, 1, 1, ZoneType::NonLivable),
        ]);
        assert_eq!(ed.classify(0, 0), Some(ZoneType::NonLivable));
        ed.remove(1).unwrap();
        assert_eq!(ed.classify(0, 0), Some(ZoneType::Livable));
        assert!(ed.remove(4).is_err());
    }

    #[test]
    fn zero_sized_template_is_refused() {
        let mut ed = ZoneEditor::new(vec![]);
        assert!(ed.set_template(0, 2, ZoneType::Livable).is_err());
    }
}

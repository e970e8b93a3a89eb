//! Room grid derived from a room's zone list.

use crate::core::zone_editor::MAX_SIDE;
use crate::models::{Zone, ZoneType};

pub const MIN_GRID_WIDTH: u32 = 8;
pub const MIN_GRID_HEIGHT: u32 = 6;
/// Zones coming from the server may reach further; nothing past this is drawn or placed.
pub const MAX_GRID_SIDE: u32 = MAX_SIDE;

/// Classify a cell against a zone list.
///
/// Any non-livable zone covering the cell wins, whatever livable zones
/// overlap it. `None` means the cell lies outside every zone.
pub fn classify(zones: &[Zone], x: u32, y: u32) -> Option<ZoneType> {
    let mut livable = false;
    for z in zones {
        if !z.contains(x, y) {
            continue;
        }
        match z.kind {
            ZoneType::NonLivable => return Some(ZoneType::NonLivable),
            ZoneType::Livable => livable = true,
        }
    }
    livable.then_some(ZoneType::Livable)
}

/// Bounding box of all zones, floored at 8×6 and capped at 30×30.
pub fn bounds(zones: &[Zone]) -> (u32, u32) {
    let (w, h) = zones.iter().fold((MIN_GRID_WIDTH, MIN_GRID_HEIGHT), |(w, h), z| {
        (w.max(z.right()), h.max(z.bottom()))
    });
    (w.min(MAX_GRID_SIDE), h.min(MAX_GRID_SIDE))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub width: u32,
    pub height: u32,
    zones: Vec<Zone>,
}

impl Grid {
    pub fn from_zones(zones: &[Zone]) -> Self {
        let (width, height) = bounds(zones);
        Self {
            width,
            height,
            zones: zones.to_vec(),
        }
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    pub fn classify(&self, x: u32, y: u32) -> Option<ZoneType> {
        if !self.in_bounds(x, y) {
            return None;
        }
        classify(&self.zones, x, y)
    }

    pub fn is_livable(&self, x: u32, y: u32) -> bool {
        self.classify(x, y) == Some(ZoneType::Livable)
    }

    pub fn livable_cells(&self) -> usize {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .filter(|&(x, y)| self.is_livable(x, y))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn livable(x: u32, y: u32, w: u32, h: u32) -> Zone {
        Zone::new(x, y, w, h, ZoneType::Livable)
    }

    fn blocked(x: u32, y: u32, w: u32, h: u32) -> Zone {
        Zone::new(x, y, w, h, ZoneType::NonLivable)
    }

    #[test]
    fn non_livable_dominates_regardless_of_order() {
        let a = vec![livable(0, 0, 8, 6), blocked(2, 2, 2, 2)];
        let b = vec![blocked(2, 2, 2, 2), livable(0, 0, 8, 6)];
        for zones in [a, b] {
            assert_eq!(classify(&zones, 3, 3), Some(ZoneType::NonLivable));
            assert_eq!(classify(&zones, 1, 1), Some(ZoneType::Livable));
        }
    }

    #[test]
    fn cells_outside_every_zone_are_unclassified() {
        let zones = vec![livable(0, 0, 2, 2)];
        assert_eq!(classify(&zones, 2, 0), None);
        assert_eq!(classify(&[], 0, 0), None);
    }

    #[test]
    fn bounds_are_floored() {
        assert_eq!(bounds(&[]), (8, 6));
        assert_eq!(bounds(&[livable(0, 0, 3, 3)]), (8, 6));
        assert_eq!(bounds(&[livable(5, 1, 7, 2), blocked(0, 4, 1, 5)]), (12, 9));
    }

    #[test]
    fn oversized_zones_are_capped() {
        let zones = vec![livable(0, 0, 4_000_000_000, 2), blocked(u32::MAX - 1, 0, 5, 5)];
        assert_eq!(bounds(&zones), (MAX_GRID_SIDE, 6));
        let grid = Grid::from_zones(&zones);
        assert!(!grid.in_bounds(MAX_GRID_SIDE, 0));
        assert_eq!(grid.livable_cells(), (MAX_GRID_SIDE * 2) as usize);
    }

    #[test]
    fn main_hall_example() {
        let grid = Grid::from_zones(&[livable(0, 0, 8, 6)]);
        assert!(grid.is_livable(2, 2));
        assert!(!grid.in_bounds(9, 9));
        assert!(!grid.is_livable(9, 9));
        assert_eq!(grid.livable_cells(), 48);
    }
}

//! Zoom and fit geometry for the layout editor.

pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 3.5;
pub const ZOOM_STEP: f64 = 0.25;
pub const DEFAULT_CELL: f64 = 3.0;
const MIN_CELL: f64 = 1.0;

fn clamp_scale(s: f64) -> f64 {
    if s.is_finite() {
        s.clamp(MIN_SCALE, MAX_SCALE)
    } else {
        1.0
    }
}

/// Two-finger pinch in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Pinch {
    start_distance: f64,
    start_scale: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    scale: f64,
    base_cell: f64,
    pinch: Option<Pinch>,
    /// Latest pinch scale not yet applied; coalesced until the next frame.
    pending: Option<f64>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            base_cell: DEFAULT_CELL,
            pinch: None,
            pending: None,
        }
    }
}

impl Viewport {
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn base_cell(&self) -> f64 {
        self.base_cell
    }

    /// Rendered cell size, never below one unit.
    pub fn cell_size(&self) -> f64 {
        (self.base_cell * self.scale).max(MIN_CELL)
    }

    pub fn set_scale(&mut self, scale: f64) -> f64 {
        self.scale = clamp_scale(scale);
        self.scale
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.set_scale(self.scale + ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.set_scale(self.scale - ZOOM_STEP)
    }

    /// Size the base cell so a `cols × rows` grid fits `width × height` at 1×.
    pub fn fit(&mut self, width: f64, height: f64, cols: u32, rows: u32) -> f64 {
        let cols = f64::from(cols.max(1));
        let rows = f64::from(rows.max(1));
        let candidate = (width / cols).min(height / rows);
        self.base_cell = if candidate.is_finite() && candidate > 0.0 {
            candidate.max(MIN_CELL)
        } else {
            MIN_CELL
        };
        self.base_cell
    }

    pub fn pinch_start(&mut self, distance: f64) {
        if distance > 0.0 && distance.is_finite() {
            self.pinch = Some(Pinch {
                start_distance: distance,
                start_scale: self.scale,
            });
        }
    }

    /// Record a new finger distance. Only the last update before a frame is kept.
    pub fn pinch_move(&mut self, distance: f64) -> Option<f64> {
        let p = self.pinch?;
        if !(distance > 0.0 && distance.is_finite()) {
            return None;
        }
        let target = clamp_scale(p.start_scale * distance / p.start_distance);
        self.pending = Some(target);
        Some(target)
    }

    pub fn pinch_end(&mut self) {
        self.frame();
        self.pinch = None;
    }

    /// Apply the coalesced pinch update, if any. Returns true when the scale changed.
    pub fn frame(&mut self) -> bool {
        match self.pending.take() {
            Some(s) if (s - self.scale).abs() > f64::EPSILON => {
                self.scale = s;
                true
            }
            _ => false,
        }
    }

    #[cfg(test)]
    fn is_pinching(&self) -> bool {
        self.pinch.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_is_bounded() {
        let mut v = Viewport::default();
        for _ in 0..20 {
            v.zoom_in();
        }
        assert_eq!(v.scale(), MAX_SCALE);
        for _ in 0..20 {
            v.zoom_out();
        }
        assert_eq!(v.scale(), MIN_SCALE);
        assert_eq!(v.set_scale(f64::NAN), 1.0);
    }

    #[test]
    fn pinch_updates_are_coalesced_per_frame() {
        let mut v = Viewport::default();
        v.pinch_start(100.0);
        v.pinch_move(150.0);
        v.pinch_move(200.0);
        assert_eq!(v.scale(), 1.0);
        assert!(v.frame());
        assert_eq!(v.scale(), 2.0);
        assert!(!v.frame());
        v.pinch_move(1000.0);
        v.pinch_end();
        assert_eq!(v.scale(), MAX_SCALE);
        assert!(!v.is_pinching());
    }

    #[test]
    fn pinch_without_start_is_ignored() {
        let mut v = Viewport::default();
        v.pinch_start(0.0);
        assert_eq!(v.pinch_move(50.0), None);
    }

    #[test]
    fn fit_never_yields_zero_cells() {
        let mut v = Viewport::default();
        assert_eq!(v.fit(80.0, 24.0, 8, 6), 4.0);
        assert_eq!(v.fit(0.0, 0.0, 0, 0), 1.0);
        assert_eq!(v.fit(-10.0, 5.0, 3, 3), 1.0);
        v.set_scale(0.5);
        assert!(v.cell_size() >= 1.0);
    }
}

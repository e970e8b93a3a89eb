//! Transient drag-and-drop state for the grid editors.

/// `Idle → Dragging → Dropped | Cancelled`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragState<P> {
    Idle,
    Dragging {
        payload: P,
        hover: Option<(u32, u32)>,
    },
    Dropped {
        payload: P,
        cell: (u32, u32),
    },
    Cancelled,
}

impl<P> Default for DragState<P> {
    fn default() -> Self {
        DragState::Idle
    }
}

impl<P: Clone> DragState<P> {
    pub fn start(&mut self, payload: P) -> bool {
        if matches!(self, DragState::Dragging { .. }) {
            return false;
        }
        *self = DragState::Dragging {
            payload,
            hover: None,
        };
        true
    }

    pub fn hover(&mut self, x: u32, y: u32) -> bool {
        match self {
            DragState::Dragging { hover, .. } => {
                *hover = Some((x, y));
                true
            }
            _ => false,
        }
    }

    /// Finish the drag on the hovered cell. Without a hover cell the drag is cancelled.
    pub fn drop_here(&mut self) -> Option<(P, (u32, u32))> {
        let next = match std::mem::replace(self, DragState::Idle) {
            DragState::Dragging {
                payload,
                hover: Some(cell),
            } => DragState::Dropped { payload, cell },
            DragState::Dragging { hover: None, .. } => DragState::Cancelled,
            other => other,
        };
        *self = next;
        match self {
            DragState::Dropped { payload, cell } => Some((payload.clone(), *cell)),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        if matches!(self, DragState::Dragging { .. }) {
            *self = DragState::Cancelled;
        }
    }

    pub fn reset(&mut self) {
        *self = DragState::Idle;
    }

    pub fn payload(&self) -> Option<&P> {
        match self {
            DragState::Dragging { payload, .. } => Some(payload),
            _ => None,
        }
    }

    pub fn hovered(&self) -> Option<(u32, u32)> {
        match self {
            DragState::Dragging { hover, .. } => *hover,
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_hover_drop() {
        let mut d: DragState<String> = DragState::default();
        assert!(d.start("Rossi".into()));
        assert!(!d.start("Bianchi".into()));
        assert!(d.hover(2, 3));
        assert_eq!(d.hovered(), Some((2, 3)));
        assert_eq!(d.drop_here(), Some(("Rossi".to_string(), (2, 3))));
        assert!(!d.is_dragging());
    }

    #[test]
    fn drop_without_hover_cancels() {
        let mut d: DragState<u8> = DragState::default();
        d.start(1);
        assert_eq!(d.drop_here(), None);
        assert_eq!(d, DragState::Cancelled);
        assert!(!d.hover(0, 0));
    }

    #[test]
    fn cancel_only_affects_active_drag() {
        let mut d: DragState<u8> = DragState::default();
        d.cancel();
        assert_eq!(d, DragState::Idle);
        d.start(7);
        d.cancel();
        assert_eq!(d, DragState::Cancelled);
        assert!(d.start(8));
    }
}

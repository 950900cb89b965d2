//! Keeps terminal geometry in step with the modal that hosts it.
//!
//! The container size is only known at draw time. A fit is requested
//! when the container first mounts, on every window resize, and once
//! more after the open delay has settled; the next draw applies it.

use std::time::Duration;

use ratatui::layout::Rect;

pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub rows: u16,
    pub cols: u16,
}

impl Geometry {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            rows: rows.max(1),
            cols: cols.max(1),
        }
    }

    pub fn from_area(area: Rect) -> Self {
        Self::new(area.height, area.width)
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new(24, 80)
    }
}

#[derive(Debug, Default)]
pub struct FitCoordinator {
    container: Option<Rect>,
    pending: bool,
    applied: Option<Geometry>,
}

impl FitCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the container; the next observation counts as a mount.
    pub fn unmount(&mut self) {
        self.container = None;
        self.pending = false;
        self.applied = None;
    }

    pub fn on_window_resize(&mut self) {
        self.pending = true;
    }

    pub fn on_settled(&mut self) {
        self.pending = true;
    }

    /// Record the container rect from the current draw.
    pub fn observe(&mut self, area: Rect) {
        if self.container.is_none() {
            self.pending = true;
        }
        self.container = Some(area);
    }

    /// Last geometry handed out, or the current container if never fitted.
    pub fn geometry(&self) -> Geometry {
        self.applied
            .or_else(|| self.container.map(Geometry::from_area))
            .unwrap_or_default()
    }

    /// Geometry to apply now, if a fit is pending and the container is known.
    pub fn take_fit(&mut self) -> Option<Geometry> {
        if !self.pending {
            return None;
        }
        let area = self.container?;
        self.pending = false;
        let geometry = Geometry::from_area(area);
        self.applied = Some(geometry);
        Some(geometry)
    }
}

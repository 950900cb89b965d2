//! Layout utilities for rect manipulation.
//!
//! Pure functions for computing layout areas. No state mutation.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Inset a rect horizontally by padding on both sides.
pub fn inset_horizontal(area: Rect, padding: u16) -> Rect {
    if area.width <= padding * 2 {
        return area;
    }
    Rect {
        x: area.x + padding,
        width: area.width - padding * 2,
        ..area
    }
}

/// Centered rect covering the given percentage of `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let percent_x = percent_x.min(100);
    let percent_y = percent_y.min(100);
    let [_, middle, _] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .areas(area);

    let [_, center, _] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .areas(middle);
    center
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_inside_and_centered() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(80, 50, area);
        assert_eq!(rect.width, 80);
        assert_eq!(rect.height, 20);
        assert_eq!(rect.x, 10);
        assert_eq!(rect.y, 10);
    }

    #[test]
    fn inset_keeps_narrow_areas() {
        let area = Rect::new(0, 0, 2, 1);
        assert_eq!(inset_horizontal(area, 1), area);
        assert_eq!(inset_horizontal(Rect::new(0, 0, 10, 1), 1), Rect::new(1, 0, 8, 1));
    }
}

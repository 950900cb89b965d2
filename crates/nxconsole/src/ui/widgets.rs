//! Reusable widget rendering functions.
//!
//! Pure functions that produce ratatui widgets from data.
//! No state mutation happens here.

use std::ops::Range;

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Rows of a list that fit in `height`, scrolled so `selected` is visible.
pub fn visible_window(len: usize, selected: usize, height: usize) -> Range<usize> {
    if height == 0 || len == 0 {
        return 0..0;
    }
    let start = selected.saturating_sub(height - 1).min(len.saturating_sub(height));
    start..(start + height).min(len)
}

/// Render a bordered list with the selected row highlighted.
pub fn render_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    items: Vec<Line<'static>>,
    selected: usize,
    focused: bool,
    empty_message: &str,
) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .border_style(border_style);

    let height = block.inner(area).height as usize;
    let lines = if items.is_empty() {
        vec![Line::from(Span::styled(
            empty_message.to_string(),
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        let window = visible_window(items.len(), selected, height);
        let start = window.start;
        items
            .into_iter()
            .enumerate()
            .skip(start)
            .take(window.len())
            .map(|(idx, line)| {
                if idx == selected && focused {
                    line.style(Style::default().fg(Color::Black).bg(Color::White))
                } else if idx == selected {
                    line.style(Style::default().add_modifier(Modifier::BOLD))
                } else {
                    line
                }
            })
            .collect()
    };
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Render a one-line hint or status bar.
pub fn render_status(frame: &mut Frame, area: Rect, text: &str, highlight: bool) {
    let style = if highlight {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(text.to_string(), style))),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::visible_window;

    #[test]
    fn window_follows_selection() {
        assert_eq!(visible_window(10, 0, 4), 0..4);
        assert_eq!(visible_window(10, 3, 4), 0..4);
        assert_eq!(visible_window(10, 4, 4), 1..5);
        assert_eq!(visible_window(10, 9, 4), 6..10);
        assert_eq!(visible_window(3, 2, 10), 0..3);
        assert_eq!(visible_window(0, 0, 4), 0..0);
        assert_eq!(visible_window(5, 2, 0), 0..0);
    }
}

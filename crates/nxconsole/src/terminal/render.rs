//! Screen-to-widget conversion.
//!
//! Turns the vt100 screen of a session into ratatui lines, merging runs
//! of equally styled cells into one span and marking the cursor cell.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use vt100::{Cell, Color as VtColor, Parser};

/// Render the visible screen area as styled lines.
pub fn render_lines(parser: &Parser, rows: u16, cols: u16) -> Vec<Line<'static>> {
    let screen = parser.screen();
    let (cursor_row, cursor_col) = screen.cursor_position();
    let show_cursor = !screen.hide_cursor() && screen.scrollback() == 0;

    (0..rows.max(1))
        .map(|row| {
            let mut line = LineBuilder::default();
            for col in 0..cols.max(1) {
                let Some(cell) = screen.cell(row, col) else {
                    line.push(Style::default(), " ");
                    continue;
                };
                if cell.is_wide_continuation() {
                    continue;
                }
                let mut style = cell_style(cell);
                if show_cursor && row == cursor_row && col == cursor_col {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                if cell.has_contents() {
                    line.push(style, &cell.contents());
                } else {
                    line.push(style, " ");
                }
            }
            line.finish()
        })
        .collect()
}

/// Accumulates cell text, starting a new span whenever the style changes.
#[derive(Default)]
struct LineBuilder {
    spans: Vec<Span<'static>>,
    text: String,
    style: Option<Style>,
}

impl LineBuilder {
    fn push(&mut self, style: Style, content: &str) {
        match self.style {
            Some(current) if current == style => {}
            Some(current) => {
                self.spans
                    .push(Span::styled(std::mem::take(&mut self.text), current));
                self.style = Some(style);
            }
            None => self.style = Some(style),
        }
        self.text.push_str(content);
    }

    fn finish(mut self) -> Line<'static> {
        match self.style {
            Some(style) => self.spans.push(Span::styled(self.text, style)),
            None => self.spans.push(Span::raw(String::new())),
        }
        Line::from(self.spans)
    }
}

fn cell_style(cell: &Cell) -> Style {
    let mut style = Style::default()
        .fg(map_color(cell.fgcolor()))
        .bg(map_color(cell.bgcolor()));
    let flags = [
        (cell.bold(), Modifier::BOLD),
        (cell.italic(), Modifier::ITALIC),
        (cell.underline(), Modifier::UNDERLINED),
        (cell.inverse(), Modifier::REVERSED),
    ];
    for (enabled, modifier) in flags {
        if enabled {
            style = style.add_modifier(modifier);
        }
    }
    style
}

fn map_color(color: VtColor) -> Color {
    match color {
        VtColor::Default => Color::Reset,
        VtColor::Idx(idx) => Color::Indexed(idx),
        VtColor::Rgb(r, g, b) => Color::Rgb(r, g, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn renders_requested_rows_and_columns() {
        let mut parser = Parser::new(4, 10, 0);
        parser.process(b"hi");
        let lines = render_lines(&parser, 4, 10);
        assert_eq!(lines.len(), 4);
        assert_eq!(line_text(&lines[0]), "hi        ");
    }

    #[test]
    fn colored_text_gets_its_own_span() {
        let mut parser = Parser::new(2, 10, 0);
        parser.process(b"\x1b[31mred\x1b[0m ok");
        let lines = render_lines(&parser, 2, 10);
        let first = &lines[0].spans[0];
        assert_eq!(first.content.as_ref(), "red");
        assert_eq!(first.style.fg, Some(Color::Indexed(1)));
    }

    #[test]
    fn cursor_cell_is_reversed() {
        let mut parser = Parser::new(2, 10, 0);
        parser.process(b"ab");
        let lines = render_lines(&parser, 2, 10);
        let cursor_span = lines[0]
            .spans
            .iter()
            .find(|span| span.style.add_modifier.contains(Modifier::REVERSED))
            .expect("cursor span");
        assert!(cursor_span.content.starts_with(' '));
    }
}

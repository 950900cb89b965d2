//! Terminal display surfaces.
//!
//! A surface is where remote output lands. Payloads are written in
//! arrival order without filtering so device-side ANSI sequences
//! (cursor movement, colors) behave as the device intended.

use ratatui::text::Line;
use vt100::Parser;

use super::render::render_lines;
use super::resize::Geometry;

pub const DEFAULT_SCROLLBACK: usize = 1000;

/// Write path shared by the real screen model and test doubles.
pub trait Surface {
    /// Append a payload to the display.
    fn write(&mut self, data: &str);

    /// Apply new row/column geometry.
    fn resize(&mut self, geometry: Geometry);

    /// Release the surface. Further writes are a caller bug.
    fn dispose(&mut self) {}
}

/// Options applied when a surface is created for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceOptions {
    pub scrollback: usize,
    /// Treat a bare line feed as carriage return + line feed.
    pub convert_eol: bool,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            scrollback: DEFAULT_SCROLLBACK,
            convert_eol: true,
        }
    }
}

/// VT100 screen model backing the terminal modal.
pub struct VtSurface {
    parser: Parser,
    geometry: Geometry,
    convert_eol: bool,
    last_was_cr: bool,
}

impl VtSurface {
    pub fn new(geometry: Geometry, options: SurfaceOptions) -> Self {
        Self {
            parser: Parser::new(geometry.rows, geometry.cols, options.scrollback),
            geometry,
            convert_eol: options.convert_eol,
            last_was_cr: false,
        }
    }

    pub fn render_lines(&self, rows: u16, cols: u16) -> Vec<Line<'static>> {
        render_lines(&self.parser, rows, cols)
    }

    fn process(&mut self, bytes: &[u8]) {
        if !self.convert_eol {
            self.parser.process(bytes);
            return;
        }
        let mut converted = Vec::with_capacity(bytes.len() + 8);
        for &byte in bytes {
            if byte == b'\n' && !self.last_was_cr {
                converted.push(b'\r');
            }
            converted.push(byte);
            self.last_was_cr = byte == b'\r';
        }
        self.parser.process(&converted);
    }
}

#[cfg(test)]
impl VtSurface {
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Plain text of the visible screen.
    pub fn contents(&self) -> String {
        self.parser.screen().contents()
    }
}

impl Surface for VtSurface {
    fn write(&mut self, data: &str) {
        if data.is_empty() {
            return;
        }
        self.process(data.as_bytes());
    }

    fn resize(&mut self, geometry: Geometry) {
        if geometry == self.geometry {
            return;
        }
        self.geometry = geometry;
        self.parser.set_size(geometry.rows, geometry.cols);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(rows: u16, cols: u16) -> VtSurface {
        VtSurface::new(Geometry::new(rows, cols), SurfaceOptions::default())
    }

    #[test]
    fn writes_render_verbatim_in_order() {
        let mut surface = surface(5, 40);
        surface.write("switch# ");
        surface.write("show version");
        assert_eq!(surface.contents().trim_end(), "switch# show version");
    }

    #[test]
    fn bare_line_feeds_start_a_new_line() {
        let mut surface = surface(5, 40);
        surface.write("IOS Version 15.2\nswitch# ");
        let contents = surface.contents();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "IOS Version 15.2");
        assert_eq!(lines[1].trim_end(), "switch#");
    }

    #[test]
    fn crlf_is_not_doubled() {
        let mut surface = surface(5, 40);
        surface.write("one\r");
        surface.write("\ntwo");
        let contents = surface.contents();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn raw_mode_keeps_line_feed_column() {
        let mut surface = VtSurface::new(
            Geometry::new(5, 20),
            SurfaceOptions {
                convert_eol: false,
                ..SurfaceOptions::default()
            },
        );
        surface.write("ab\ncd");
        let contents = surface.contents();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[1], "  cd");
    }

    #[test]
    fn ansi_sequences_are_interpreted_not_printed() {
        let mut surface = surface(3, 40);
        surface.write("\x1b[1;34m> \x1b[0mcmd");
        assert_eq!(surface.contents().trim_end(), "> cmd");
    }

    #[test]
    fn erase_sequence_removes_last_character() {
        let mut surface = surface(3, 40);
        surface.write("abc");
        surface.write("\x08 \x08");
        assert_eq!(surface.contents().trim_end(), "ab");
    }

    #[test]
    fn resize_updates_geometry() {
        let mut surface = surface(5, 40);
        surface.resize(Geometry::new(10, 100));
        assert_eq!(surface.geometry(), Geometry::new(10, 100));
        assert_eq!(surface.render_lines(10, 100).len(), 10);
    }
}

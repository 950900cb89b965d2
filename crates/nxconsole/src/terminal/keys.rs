//! Keystroke classification.
//!
//! The terminal surface hands us raw input data: a single character, a
//! control byte, an escape sequence, or a pasted chunk. Everything the
//! line editor reacts to is decided here, once, so the editor itself
//! never looks at byte values.

const CARRIAGE_RETURN: char = '\r';
const DELETE: char = '\x7f';
const BACKSPACE: char = '\x08';
const ESCAPE: char = '\x1b';

const ARROW_UP: [&str; 2] = ["\x1b[A", "\x1bOA"];
const ARROW_DOWN: [&str; 2] = ["\x1b[B", "\x1bOB"];

/// A classified chunk of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInput {
    Enter,
    Backspace,
    ArrowUp,
    ArrowDown,
    /// A printable character or a multi-character paste.
    Printable(String),
    Unrecognized,
}

/// Classify one chunk of input data as delivered by the surface.
///
/// The first character decides the class. Escape sequences other than
/// the up/down arrows (both normal and application cursor forms) are
/// unrecognized, as are lone control characters.
pub fn classify(data: &str) -> KeyInput {
    let Some(first) = data.chars().next() else {
        return KeyInput::Unrecognized;
    };

    match first {
        CARRIAGE_RETURN => KeyInput::Enter,
        DELETE | BACKSPACE => KeyInput::Backspace,
        ESCAPE => {
            if ARROW_UP.contains(&data) {
                KeyInput::ArrowUp
            } else if ARROW_DOWN.contains(&data) {
                KeyInput::ArrowDown
            } else {
                KeyInput::Unrecognized
            }
        }
        ch if !ch.is_control() => KeyInput::Printable(data.to_string()),
        _ if data.chars().count() > 1 => KeyInput::Printable(data.to_string()),
        _ => KeyInput::Unrecognized,
    }
}

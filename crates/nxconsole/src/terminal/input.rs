//! Key event encoding.
//!
//! Converts crossterm key events into the character data a terminal
//! would emit for them, which is what the line editor consumes.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Encode a key event as terminal input data.
///
/// Returns None for keys with no terminal encoding (function keys, media keys).
pub fn key_event_to_data(key: KeyEvent) -> Option<String> {
    let data = match key.code {
        KeyCode::Char(ch) => {
            let encoded = if key.modifiers.contains(KeyModifiers::CONTROL) {
                control_char(ch).map(String::from).unwrap_or_else(|| ch.to_string())
            } else {
                ch.to_string()
            };
            with_alt_prefix(key.modifiers, encoded)
        }
        KeyCode::Enter => with_alt_prefix(key.modifiers, "\r".to_string()),
        KeyCode::Tab => with_alt_prefix(key.modifiers, "\t".to_string()),
        KeyCode::BackTab => "\x1b[Z".to_string(),
        KeyCode::Backspace => with_alt_prefix(key.modifiers, "\x7f".to_string()),
        KeyCode::Esc => with_alt_prefix(key.modifiers, "\x1b".to_string()),
        KeyCode::Up => csi_key(key.modifiers, 'A'),
        KeyCode::Down => csi_key(key.modifiers, 'B'),
        KeyCode::Right => csi_key(key.modifiers, 'C'),
        KeyCode::Left => csi_key(key.modifiers, 'D'),
        KeyCode::Home => csi_key(key.modifiers, 'H'),
        KeyCode::End => csi_key(key.modifiers, 'F'),
        KeyCode::Delete => csi_tilde_key(key.modifiers, 3),
        KeyCode::PageUp => csi_tilde_key(key.modifiers, 5),
        KeyCode::PageDown => csi_tilde_key(key.modifiers, 6),
        _ => return None,
    };
    Some(data)
}

fn control_char(ch: char) -> Option<char> {
    let lower = ch.to_ascii_lowercase();
    if lower.is_ascii_lowercase() {
        return Some(((lower as u8 - b'a') + 1) as char);
    }
    None
}

fn with_alt_prefix(modifiers: KeyModifiers, data: String) -> String {
    if modifiers.contains(KeyModifiers::ALT) {
        format!("\x1b{data}")
    } else {
        data
    }
}

fn modifier_param(modifiers: KeyModifiers) -> Option<u8> {
    let mut value = 1;
    if modifiers.contains(KeyModifiers::SHIFT) {
        value += 1;
    }
    if modifiers.contains(KeyModifiers::ALT) {
        value += 2;
    }
    if modifiers.contains(KeyModifiers::CONTROL) {
        value += 4;
    }
    (value > 1).then_some(value)
}

fn csi_key(modifiers: KeyModifiers, final_char: char) -> String {
    match modifier_param(modifiers) {
        Some(param) => format!("\x1b[1;{param}{final_char}"),
        None => format!("\x1b[{final_char}"),
    }
}

fn csi_tilde_key(modifiers: KeyModifiers, code: u8) -> String {
    match modifier_param(modifiers) {
        Some(param) => format!("\x1b[{code};{param}~"),
        None => format!("\x1b[{code}~"),
    }
}

#[cfg(test)]
mod tests {
    use super::key_event_to_data;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn plain_keys_encode_like_a_terminal() {
        assert_eq!(key_event_to_data(key(KeyCode::Char('a'))).as_deref(), Some("a"));
        assert_eq!(key_event_to_data(key(KeyCode::Enter)).as_deref(), Some("\r"));
        assert_eq!(key_event_to_data(key(KeyCode::Backspace)).as_deref(), Some("\x7f"));
        assert_eq!(key_event_to_data(key(KeyCode::Up)).as_deref(), Some("\x1b[A"));
        assert_eq!(key_event_to_data(key(KeyCode::Down)).as_deref(), Some("\x1b[B"));
        assert_eq!(key_event_to_data(key(KeyCode::Delete)).as_deref(), Some("\x1b[3~"));
    }

    #[test]
    fn control_and_alt_modifiers() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_event_to_data(ctrl_c).as_deref(), Some("\x03"));
        let alt_b = KeyEvent::new(KeyCode::Char('b'), KeyModifiers::ALT);
        assert_eq!(key_event_to_data(alt_b).as_deref(), Some("\x1bb"));
        let shift_up = KeyEvent::new(KeyCode::Up, KeyModifiers::SHIFT);
        assert_eq!(key_event_to_data(shift_up).as_deref(), Some("\x1b[1;2A"));
    }

    #[test]
    fn function_keys_are_not_encoded() {
        assert_eq!(key_event_to_data(key(KeyCode::F(5))), None);
    }
}

//! Key chord parsing and matching.
//!
//! Parses key chord strings like "ctrl+]" or "alt+q" from config and
//! matches them against crossterm KeyEvents at runtime.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::KeymapConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyChord {
    pub key: KeyCode,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

/// Resolved app-level bindings.
#[derive(Debug, Clone)]
pub struct Keymap {
    pub close_session: KeyChord,
    pub quit: KeyChord,
}

impl Keymap {
    /// Resolve configured chords, keeping defaults for ones that do not parse.
    pub fn from_config(config: &KeymapConfig) -> Self {
        let defaults = Self::default();
        Self {
            close_session: resolve(&config.close_session, defaults.close_session),
            quit: resolve(&config.quit, defaults.quit),
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            close_session: KeyChord::ctrl(KeyCode::Char(']')),
            quit: KeyChord::plain(KeyCode::Char('q')),
        }
    }
}

fn resolve(input: &str, fallback: KeyChord) -> KeyChord {
    match parse_key_chord(input) {
        Some(chord) => chord,
        None => {
            tracing::warn!(chord = input, "unrecognized key chord, using default");
            fallback
        }
    }
}

impl KeyChord {
    fn plain(key: KeyCode) -> Self {
        Self {
            key,
            ctrl: false,
            alt: false,
            shift: false,
            meta: false,
        }
    }

    fn ctrl(key: KeyCode) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(key)
        }
    }

    /// Human-readable form for footer hints.
    pub fn label(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.alt {
            parts.push("Alt".to_string());
        }
        if self.shift {
            parts.push("Shift".to_string());
        }
        if self.meta {
            parts.push("Meta".to_string());
        }
        parts.push(match self.key {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(ch) => ch.to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            _ => "?".to_string(),
        });
        parts.join("+")
    }
}

pub fn parse_key_chord(input: &str) -> Option<KeyChord> {
    let trimmed = input.trim().to_lowercase();
    if trimmed.is_empty() {
        return None;
    }

    let parts: Vec<&str> = trimmed
        .split('+')
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect();
    if parts.is_empty() {
        return None;
    }

    let mut chord = KeyChord::plain(KeyCode::Null);
    for part in parts {
        match part {
            "ctrl" | "control" => chord.ctrl = true,
            "alt" | "option" => chord.alt = true,
            "shift" => chord.shift = true,
            "meta" | "cmd" | "super" => chord.meta = true,
            key => {
                if chord.key != KeyCode::Null {
                    return None;
                }
                chord.key = parse_key(key)?;
            }
        }
    }

    if chord.key == KeyCode::Null {
        return None;
    }
    Some(chord)
}

fn parse_key(key: &str) -> Option<KeyCode> {
    match key {
        "esc" | "escape" => Some(KeyCode::Esc),
        "enter" | "return" => Some(KeyCode::Enter),
        "tab" => Some(KeyCode::Tab),
        "space" | "spacebar" => Some(KeyCode::Char(' ')),
        _ => {
            let mut chars = key.chars();
            let first = chars.next()?;
            if chars.next().is_none() {
                Some(KeyCode::Char(first))
            } else {
                None
            }
        }
    }
}

/// Control byte a terminal sends for ctrl plus `ch`.
fn control_byte(ch: char) -> Option<u8> {
    match ch {
        ' ' | '@' | '2' => Some(0x00),
        '[' | '3' => Some(0x1b),
        '\\' | '4' => Some(0x1c),
        ']' | '5' => Some(0x1d),
        '^' | '6' => Some(0x1e),
        '_' | '7' => Some(0x1f),
        '?' | '8' => Some(0x7f),
        _ => {
            let lower = ch.to_ascii_lowercase();
            if lower.is_ascii_lowercase() {
                Some((lower as u8 - b'a') + 1)
            } else {
                None
            }
        }
    }
}

pub fn matches_chord(event: KeyEvent, chord: &KeyChord) -> bool {
    let modifiers = event.modifiers;
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let alt = modifiers.contains(KeyModifiers::ALT);
    let shift = modifiers.contains(KeyModifiers::SHIFT);
    let meta = modifiers.contains(KeyModifiers::SUPER) || modifiers.contains(KeyModifiers::META);

    if alt != chord.alt || meta != chord.meta || ctrl != chord.ctrl {
        return false;
    }

    match (event.code, chord.key) {
        // Terminals report ctrl+] and friends as ctrl+digit.
        (KeyCode::Char(got), KeyCode::Char(want)) if chord.ctrl => {
            got.eq_ignore_ascii_case(&want)
                || matches!((control_byte(got), control_byte(want)), (Some(a), Some(b)) if a == b)
        }
        (KeyCode::Char(got), KeyCode::Char(want)) => {
            got == want || (shift && got.eq_ignore_ascii_case(&want))
        }
        (got, want) => got == want && shift == chord.shift,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn parse_key_chord_reads_modifiers_and_key() {
        let chord = parse_key_chord("Ctrl+]").expect("chord");
        assert_eq!(chord.key, KeyCode::Char(']'));
        assert!(chord.ctrl && !chord.alt && !chord.shift);

        let chord = parse_key_chord("alt + space").expect("chord");
        assert_eq!(chord.key, KeyCode::Char(' '));
        assert!(chord.alt);
    }

    #[test]
    fn parse_key_chord_rejects_invalid_input() {
        assert!(parse_key_chord("").is_none());
        assert!(parse_key_chord("ctrl").is_none());
        assert!(parse_key_chord("ctrl+a+b").is_none());
        assert!(parse_key_chord("ctrl+pageup").is_none());
    }

    #[test]
    fn close_chord_matches_terminal_encodings() {
        let chord = parse_key_chord("ctrl+]").expect("chord");
        assert!(matches_chord(
            event(KeyCode::Char(']'), KeyModifiers::CONTROL),
            &chord
        ));
        assert!(matches_chord(
            event(KeyCode::Char('5'), KeyModifiers::CONTROL),
            &chord
        ));
        assert!(!matches_chord(event(KeyCode::Char(']'), KeyModifiers::NONE), &chord));
    }

    #[test]
    fn plain_chord_ignores_controlled_keys() {
        let chord = parse_key_chord("q").expect("chord");
        assert!(matches_chord(event(KeyCode::Char('q'), KeyModifiers::NONE), &chord));
        assert!(!matches_chord(event(KeyCode::Char('q'), KeyModifiers::CONTROL), &chord));
        assert!(!matches_chord(event(KeyCode::Char('w'), KeyModifiers::NONE), &chord));
    }

    #[test]
    fn keymap_falls_back_to_defaults_for_bad_chords() {
        let config = KeymapConfig {
            close_session: "ctrl+x".to_string(),
            quit: "hyper+".to_string(),
        };
        let keymap = Keymap::from_config(&config);
        assert_eq!(keymap.close_session.key, KeyCode::Char('x'));
        assert_eq!(keymap.quit, Keymap::default().quit);
        assert_eq!(Keymap::default().close_session.label(), "Ctrl+]");
    }
}

//! Local line editing for remote sessions.
//!
//! The remote device owns the prompt and echoes committed commands, so
//! the editor only keeps the uncommitted line, a bounded history, and
//! enough local echo for keystrokes and history recall to feel
//! immediate. It never interprets commands.

use std::collections::VecDeque;

use super::keys::{classify, KeyInput};

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Placeholder prompt drawn when a history entry is recalled.
pub const PROMPT_MARKER: &str = "\x1b[1;34m> \x1b[0m";

const CLEAR_LINE: &str = "\x1b[2K\r";
const ERASE_CHAR: &str = "\x08 \x08";

/// What the surface and connection should see after one input chunk.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// Bytes to write to the surface for local feedback.
    pub echo: String,
    /// A committed line to transmit.
    pub submit: Option<String>,
}

impl EditOutcome {
    fn echo(echo: impl Into<String>) -> Self {
        Self {
            echo: echo.into(),
            submit: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.echo.is_empty() && self.submit.is_none()
    }
}

#[derive(Debug)]
pub struct LineEditor {
    buffer: String,
    history: VecDeque<String>,
    history_limit: usize,
    // None while not browsing; otherwise always < history.len().
    cursor: Option<usize>,
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl LineEditor {
    pub fn new(history_limit: usize) -> Self {
        Self {
            buffer: String::new(),
            history: VecDeque::new(),
            history_limit: history_limit.max(1),
            cursor: None,
        }
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Classify and apply one chunk of raw input data.
    pub fn feed(&mut self, data: &str) -> EditOutcome {
        self.apply(classify(data))
    }

    pub fn apply(&mut self, input: KeyInput) -> EditOutcome {
        match input {
            KeyInput::Enter => self.submit(),
            KeyInput::Backspace => self.backspace(),
            KeyInput::ArrowUp => self.history_up(),
            KeyInput::ArrowDown => self.history_down(),
            KeyInput::Printable(text) => {
                self.buffer.push_str(&text);
                EditOutcome::echo(text)
            }
            KeyInput::Unrecognized => EditOutcome::default(),
        }
    }

    fn submit(&mut self) -> EditOutcome {
        self.cursor = None;
        if self.buffer.trim().is_empty() {
            return EditOutcome::default();
        }
        let line = std::mem::take(&mut self.buffer);
        self.history.push_front(line.clone());
        self.history.truncate(self.history_limit);
        EditOutcome {
            echo: String::new(),
            submit: Some(line),
        }
    }

    fn backspace(&mut self) -> EditOutcome {
        if self.buffer.pop().is_none() {
            return EditOutcome::default();
        }
        EditOutcome::echo(ERASE_CHAR)
    }

    fn history_up(&mut self) -> EditOutcome {
        let next = match self.cursor {
            None => 0,
            Some(index) => index + 1,
        };
        if next >= self.history.len() {
            return EditOutcome::default();
        }
        self.recall(next)
    }

    fn history_down(&mut self) -> EditOutcome {
        match self.cursor {
            Some(index) if index > 0 => self.recall(index - 1),
            // Past the newest entry: back to an empty prompt.
            _ => {
                self.cursor = None;
                self.buffer.clear();
                EditOutcome::echo(format!("{CLEAR_LINE}{PROMPT_MARKER}"))
            }
        }
    }

    fn recall(&mut self, index: usize) -> EditOutcome {
        let Some(entry) = self.history.get(index) else {
            return EditOutcome::default();
        };
        self.cursor = Some(index);
        self.buffer = entry.clone();
        EditOutcome::echo(format!("{CLEAR_LINE}{PROMPT_MARKER}{entry}"))
    }
}

#[cfg(test)]
impl LineEditor {
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Submitted lines, most recent first.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    pub fn history_cursor(&self) -> Option<usize> {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(editor: &mut LineEditor, inputs: &[&str]) -> Vec<EditOutcome> {
        inputs.iter().map(|input| editor.feed(input)).collect()
    }

    fn submitted(outcomes: &[EditOutcome]) -> Vec<String> {
        outcomes
            .iter()
            .filter_map(|outcome| outcome.submit.clone())
            .collect()
    }

    #[test]
    fn printable_input_concatenates_buffer_and_echo() {
        let mut editor = LineEditor::default();
        let outcomes = feed_all(&mut editor, &["s", "h", "o", "w", " ", "ip"]);
        assert_eq!(editor.buffer(), "show ip");
        let echoed: String = outcomes.iter().map(|o| o.echo.as_str()).collect();
        assert_eq!(echoed, "show ip");
        assert!(submitted(&outcomes).is_empty());
    }

    #[test]
    fn enter_submits_and_records_history() {
        let mut editor = LineEditor::default();
        editor.feed("show version");
        let outcome = editor.feed("\r");
        assert_eq!(outcome.submit.as_deref(), Some("show version"));
        assert!(outcome.echo.is_empty());
        assert_eq!(editor.buffer(), "");
        assert_eq!(editor.history().next(), Some("show version"));
        assert_eq!(editor.history_cursor(), None);
    }

    #[test]
    fn enter_transmits_line_verbatim() {
        let mut editor = LineEditor::default();
        editor.feed("  show run  ");
        let outcome = editor.feed("\r");
        assert_eq!(outcome.submit.as_deref(), Some("  show run  "));
    }

    #[test]
    fn blank_enter_never_touches_history() {
        let mut editor = LineEditor::default();
        editor.feed("cmd1");
        editor.feed("\r");
        for blank in ["", " ", "\t "] {
            if !blank.is_empty() {
                editor.feed(blank);
            }
            let outcome = editor.feed("\r");
            assert!(outcome.submit.is_none());
            assert_eq!(editor.history_len(), 1);
        }
    }

    #[test]
    fn blank_enter_resets_history_cursor() {
        let mut editor = LineEditor::default();
        editor.feed("cmd1");
        editor.feed("\r");
        editor.feed("\x1b[A");
        assert_eq!(editor.history_cursor(), Some(0));
        editor.feed("\x7f");
        editor.feed("\x7f");
        editor.feed("\x7f");
        editor.feed("\x7f");
        let outcome = editor.feed("\r");
        assert!(outcome.submit.is_none());
        assert_eq!(editor.history_cursor(), None);
    }

    #[test]
    fn history_is_capped_and_evicts_oldest() {
        let mut editor = LineEditor::default();
        for index in 1..=51 {
            editor.feed(&format!("cmd{index}"));
            editor.feed("\r");
        }
        let history: Vec<&str> = editor.history().collect();
        assert_eq!(history.len(), 50);
        assert_eq!(history[0], "cmd51");
        assert!(!history.contains(&"cmd1"));
        assert_eq!(history[49], "cmd2");
    }

    #[test]
    fn custom_history_limit_applies() {
        let mut editor = LineEditor::new(2);
        for line in ["a", "b", "c"] {
            editor.feed(line);
            editor.feed("\r");
        }
        let history: Vec<&str> = editor.history().collect();
        assert_eq!(history, vec!["c", "b"]);
    }

    #[test]
    fn backspace_edits_before_submit() {
        let mut editor = LineEditor::default();
        let outcomes = feed_all(&mut editor, &["a", "b", "c", "\x7f", "\x08", "x", "\r"]);
        assert_eq!(submitted(&outcomes), vec!["ax".to_string()]);
        assert_eq!(outcomes[3].echo, "\x08 \x08");
    }

    #[test]
    fn backspace_on_empty_buffer_is_silent() {
        let mut editor = LineEditor::default();
        let outcome = editor.feed("\x7f");
        assert!(outcome.is_empty());
        assert_eq!(editor.buffer(), "");
    }

    #[test]
    fn backspace_removes_whole_characters() {
        let mut editor = LineEditor::default();
        editor.feed("né");
        editor.feed("\x7f");
        assert_eq!(editor.buffer(), "n");
    }

    #[test]
    fn arrow_up_walks_back_and_stops_at_oldest() {
        let mut editor = LineEditor::default();
        for line in ["cmd1", "cmd2"] {
            editor.feed(line);
            editor.feed("\r");
        }

        let first = editor.feed("\x1b[A");
        assert_eq!(editor.history_cursor(), Some(0));
        assert_eq!(editor.buffer(), "cmd2");
        assert_eq!(first.echo, format!("\x1b[2K\r{PROMPT_MARKER}cmd2"));

        editor.feed("\x1b[A");
        assert_eq!(editor.history_cursor(), Some(1));
        assert_eq!(editor.buffer(), "cmd1");

        let beyond = editor.feed("\x1b[A");
        assert!(beyond.is_empty());
        assert_eq!(editor.history_cursor(), Some(1));
        assert_eq!(editor.buffer(), "cmd1");
    }

    #[test]
    fn arrow_down_returns_to_newer_entries_then_clears() {
        let mut editor = LineEditor::default();
        for line in ["cmd1", "cmd2"] {
            editor.feed(line);
            editor.feed("\r");
        }
        editor.feed("\x1b[A");
        editor.feed("\x1b[A");
        assert_eq!(editor.buffer(), "cmd1");

        editor.feed("\x1b[B");
        assert_eq!(editor.buffer(), "cmd2");
        assert_eq!(editor.history_cursor(), Some(0));

        let cleared = editor.feed("\x1b[B");
        assert_eq!(editor.buffer(), "");
        assert_eq!(editor.history_cursor(), None);
        assert_eq!(cleared.echo, format!("\x1b[2K\r{PROMPT_MARKER}"));
    }

    #[test]
    fn arrow_up_without_history_does_nothing() {
        let mut editor = LineEditor::default();
        editor.feed("partial");
        assert!(editor.feed("\x1b[A").is_empty());
        assert_eq!(editor.buffer(), "partial");
        assert_eq!(editor.history_cursor(), None);
    }

    #[test]
    fn arrow_down_without_cursor_clears_partial_line() {
        let mut editor = LineEditor::default();
        editor.feed("partial");
        let outcome = editor.feed("\x1b[B");
        assert_eq!(outcome.echo, format!("{CLEAR_LINE}{PROMPT_MARKER}"));
        assert!(outcome.submit.is_none());
        assert_eq!(editor.buffer(), "");
        assert_eq!(editor.history_cursor(), None);
    }

    #[test]
    fn arrow_down_after_submit_clears_typed_text() {
        let mut editor = LineEditor::default();
        editor.feed("cmd1");
        editor.feed("\r");
        editor.feed("partial");
        let outcome = editor.feed("\x1b[B");
        assert_eq!(outcome.echo, format!("{CLEAR_LINE}{PROMPT_MARKER}"));
        assert_eq!(editor.buffer(), "");
        assert_eq!(editor.history_cursor(), None);
        assert_eq!(editor.history_len(), 1);
    }

    #[test]
    fn recalled_entry_can_be_edited_and_resubmitted() {
        let mut editor = LineEditor::default();
        editor.feed("show interface");
        editor.feed("\r");
        editor.feed("\x1b[A");
        editor.feed(" brief");
        let outcome = editor.feed("\r");
        assert_eq!(outcome.submit.as_deref(), Some("show interface brief"));
        let history: Vec<&str> = editor.history().collect();
        assert_eq!(history, vec!["show interface brief", "show interface"]);
    }

    #[test]
    fn unrecognized_sequences_leave_state_untouched() {
        let mut editor = LineEditor::default();
        editor.feed("abc");
        for sequence in ["\x1b[C", "\x1b[D", "\x1b[3~", "\x03", "\t"] {
            assert!(editor.feed(sequence).is_empty());
        }
        assert_eq!(editor.buffer(), "abc");
    }

    #[test]
    fn history_cursor_stays_in_range() {
        let mut editor = LineEditor::new(3);
        let keys = ["a", "\r", "\x1b[A", "\x1b[A", "b", "\r", "\x1b[A", "\x1b[A", "\x1b[A"];
        for key in keys {
            editor.feed(key);
            if let Some(cursor) = editor.history_cursor() {
                assert!(cursor < editor.history_len());
            }
        }
    }
}

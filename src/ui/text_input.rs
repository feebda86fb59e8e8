use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Style;
use ratatui::text::{Line, Span};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Submit,
    Cancel,
    /// Tab / BackTab: the form should move focus.
    NextField,
    PrevField,
}

/// Editable text with a char-indexed cursor and readline-style bindings.
///
/// Single-line inputs submit on Enter. Multi-line inputs insert a newline on
/// Enter and submit on Ctrl+S instead.
#[derive(Clone, Debug)]
pub struct TextInput {
    text: String,
    /// Cursor position as a char index (0 = before first char).
    cursor: usize,
    multiline: bool,
}

impl TextInput {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.chars().count(),
            multiline: false,
        }
    }

    pub fn multiline(text: &str) -> Self {
        Self {
            multiline: true,
            ..Self::new(text)
        }
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn handle(&mut self, key: KeyEvent) -> InputResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Char('s') if ctrl => return InputResult::Submit,
            KeyCode::Enter if self.multiline => self.insert('\n'),
            KeyCode::Enter => return InputResult::Submit,
            KeyCode::Tab => return InputResult::NextField,
            KeyCode::BackTab => return InputResult::PrevField,

            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => {
                if self.cursor < self.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Up if self.multiline => self.move_vertical(-1),
            KeyCode::Down if self.multiline => self.move_vertical(1),
            KeyCode::Home => self.cursor = self.line_start(self.cursor),
            KeyCode::End => self.cursor = self.line_end(self.cursor),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.remove_char(self.cursor - 1);
                    self.cursor -= 1;
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.len() {
                    self.remove_char(self.cursor);
                }
            }
            KeyCode::Char('a') if ctrl => self.cursor = self.line_start(self.cursor),
            KeyCode::Char('e') if ctrl => self.cursor = self.line_end(self.cursor),
            KeyCode::Char('u') if ctrl => {
                self.text.clear();
                self.cursor = 0;
            }
            KeyCode::Char('w') if ctrl => self.delete_word_back(),
            KeyCode::Char(ch) if !ctrl => self.insert(ch),
            _ => {}
        }
        InputResult::Continue
    }

    /// Render the text as lines, painting the cursor cell with `cursor_style`
    /// when one is given.
    pub fn styled_lines(&self, text_style: Style, cursor_style: Option<Style>) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut run = String::new();

        for (i, ch) in self.text.chars().enumerate() {
            let at_cursor = cursor_style.is_some() && i == self.cursor;
            if at_cursor {
                if !run.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut run), text_style));
                }
                let shown = if ch == '\n' { " ".to_string() } else { ch.to_string() };
                spans.push(Span::styled(shown, cursor_style.unwrap_or(text_style)));
            } else if ch != '\n' {
                run.push(ch);
            }
            if ch == '\n' {
                if !run.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut run), text_style));
                }
                lines.push(Line::from(std::mem::take(&mut spans)));
            }
        }

        if !run.is_empty() {
            spans.push(Span::styled(run, text_style));
        }
        if let Some(style) = cursor_style
            && self.cursor >= self.len()
        {
            spans.push(Span::styled(" ", style));
        }
        lines.push(Line::from(spans));
        lines
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn insert(&mut self, ch: char) {
        let byte_offset = self.char_to_byte(self.cursor);
        self.text.insert(byte_offset, ch);
        self.cursor += 1;
    }

    fn remove_char(&mut self, char_idx: usize) {
        let byte_offset = self.char_to_byte(char_idx);
        if let Some(ch) = self.text[byte_offset..].chars().next() {
            self.text
                .replace_range(byte_offset..byte_offset + ch.len_utf8(), "");
        }
    }

    /// Convert char index to byte offset.
    fn char_to_byte(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    fn line_start(&self, pos: usize) -> usize {
        let chars: Vec<char> = self.text.chars().collect();
        let mut start = pos.min(chars.len());
        while start > 0 && chars[start - 1] != '\n' {
            start -= 1;
        }
        start
    }

    fn line_end(&self, pos: usize) -> usize {
        let chars: Vec<char> = self.text.chars().collect();
        let mut end = pos.min(chars.len());
        while end < chars.len() && chars[end] != '\n' {
            end += 1;
        }
        end
    }

    /// Move one line up (-1) or down (1), keeping the column where possible.
    fn move_vertical(&mut self, direction: i8) {
        let start = self.line_start(self.cursor);
        let column = self.cursor - start;
        if direction < 0 {
            if start == 0 {
                return;
            }
            let prev_start = self.line_start(start - 1);
            self.cursor = (prev_start + column).min(start - 1);
        } else {
            let end = self.line_end(self.cursor);
            if end >= self.len() {
                return;
            }
            let next_start = end + 1;
            self.cursor = (next_start + column).min(self.line_end(next_start));
        }
    }

    /// Delete word before cursor (unix-word-rubout: skip whitespace, then non-whitespace).
    fn delete_word_back(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = self.cursor;

        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !chars[pos - 1].is_whitespace() {
            pos -= 1;
        }

        let start_byte = self.char_to_byte(pos);
        let end_byte = self.char_to_byte(self.cursor);
        self.text.replace_range(start_byte..end_byte, "");
        self.cursor = pos;
    }
}

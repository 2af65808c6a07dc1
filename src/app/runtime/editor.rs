use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::presentation::EditorRender;

const INDENT: &str = "  ";

/// Multi-line buffer behind the schema editor modal.
///
/// The cursor column counts characters, not bytes.
pub(crate) struct SchemaEditor {
    lines: Vec<String>,
    row: usize,
    col: usize,
    error: Option<String>,
}

impl SchemaEditor {
    pub(crate) fn new(text: &str) -> Self {
        let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            lines,
            row: 0,
            col: 0,
            error: None,
        }
    }

    pub(crate) fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub(crate) fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub(crate) fn as_render(&self) -> EditorRender<'_> {
        EditorRender {
            lines: &self.lines,
            cursor: self.cursor(),
            error: self.error.as_deref(),
        }
    }

    /// Apply an editing key. Returns `true` when the buffer or cursor changed.
    pub(crate) fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }
        let changed = match key.code {
            KeyCode::Char(ch) => {
                self.insert_str(&ch.to_string());
                true
            }
            KeyCode::Tab => {
                self.insert_str(INDENT);
                true
            }
            KeyCode::Enter => {
                self.split_line();
                true
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Up => self.move_vertical(-1),
            KeyCode::Down => self.move_vertical(1),
            KeyCode::Home => {
                self.col = 0;
                true
            }
            KeyCode::End => {
                self.col = self.line_len(self.row);
                true
            }
            _ => false,
        };
        if changed {
            self.error = None;
        }
        changed
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines[row].chars().count()
    }

    fn byte_offset(&self, row: usize, col: usize) -> usize {
        let line = &self.lines[row];
        line.char_indices()
            .nth(col)
            .map(|(offset, _)| offset)
            .unwrap_or(line.len())
    }

    fn insert_str(&mut self, text: &str) {
        let offset = self.byte_offset(self.row, self.col);
        self.lines[self.row].insert_str(offset, text);
        self.col += text.chars().count();
    }

    fn split_line(&mut self) {
        let offset = self.byte_offset(self.row, self.col);
        let rest = self.lines[self.row].split_off(offset);
        self.lines.insert(self.row + 1, rest);
        self.row += 1;
        self.col = 0;
    }

    fn backspace(&mut self) -> bool {
        if self.col > 0 {
            let start = self.byte_offset(self.row, self.col - 1);
            let end = self.byte_offset(self.row, self.col);
            self.lines[self.row].replace_range(start..end, "");
            self.col -= 1;
            true
        } else if self.row > 0 {
            let current = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_len(self.row);
            self.lines[self.row].push_str(&current);
            true
        } else {
            false
        }
    }

    fn delete(&mut self) -> bool {
        if self.col < self.line_len(self.row) {
            let start = self.byte_offset(self.row, self.col);
            let end = self.byte_offset(self.row, self.col + 1);
            self.lines[self.row].replace_range(start..end, "");
            true
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
            true
        } else {
            false
        }
    }

    fn move_left(&mut self) -> bool {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.line_len(self.row);
        } else {
            return false;
        }
        true
    }

    fn move_right(&mut self) -> bool {
        if self.col < self.line_len(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        } else {
            return false;
        }
        true
    }

    fn move_vertical(&mut self, delta: i32) -> bool {
        let target = self.row as i64 + i64::from(delta);
        if target < 0 || target >= self.lines.len() as i64 {
            return false;
        }
        self.row = target as usize;
        self.col = self.col.min(self.line_len(self.row));
        true
    }
}

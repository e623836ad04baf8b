//! Editable text forms with a byte-indexed cursor on char boundaries

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
    /// Rendered as asterisks (private keys)
    pub masked: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Form {
    pub fields: Vec<Field>,
    pub selected: usize,
    pub cursor: usize,
}

impl Form {
    pub fn new(layout: &[(&'static str, bool)]) -> Self {
        Form {
            fields: layout
                .iter()
                .map(|(label, masked)| Field {
                    label: *label,
                    value: String::new(),
                    masked: *masked,
                })
                .collect(),
            selected: 0,
            cursor: 0,
        }
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }

    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value.into();
            if index == self.selected {
                self.cursor = field.value.len();
            }
        }
    }

    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
        self.selected = 0;
        self.cursor = 0;
    }

    fn current(&self) -> &str {
        self.value(self.selected)
    }

    fn current_mut(&mut self) -> Option<&mut String> {
        self.fields.get_mut(self.selected).map(|f| &mut f.value)
    }

    pub fn select(&mut self, index: usize) {
        if index < self.fields.len() {
            self.selected = index;
            self.cursor = self.current().len();
        }
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.select((self.selected + 1) % self.fields.len());
        }
    }

    pub fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            let prev = self.selected.checked_sub(1).unwrap_or(self.fields.len() - 1);
            self.select(prev);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.current()[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current();
        if self.cursor < input.len() {
            self.cursor = input[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(input.len());
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor = self.cursor;
        if let Some(input) = self.current_mut() {
            if cursor <= input.len() {
                input.insert(cursor, c);
                self.cursor = cursor + c.len_utf8();
            }
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let cursor = self.cursor;
        if let Some(input) = self.current_mut() {
            let prev = input[..cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev);
            self.cursor = prev;
        }
    }

    /// Cursor position in characters, for terminal placement
    pub fn cursor_column(&self) -> usize {
        self.current()[..self.cursor.min(self.current().len())].chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> Form {
        Form::new(&[("From", false), ("Key", true)])
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut f = form();
        for c in "wtf1".chars() {
            f.enter_char(c);
        }
        f.delete_char();
        assert_eq!(f.value(0), "wtf");
        assert_eq!(f.cursor, 3);
    }

    #[test]
    fn test_multibyte_cursor_moves() {
        let mut f = form();
        f.enter_char('a');
        f.enter_char('é');
        f.enter_char('b');
        f.move_cursor_left();
        f.move_cursor_left();
        assert_eq!(f.cursor, 1);
        assert_eq!(f.cursor_column(), 1);
        f.move_cursor_right();
        assert_eq!(f.cursor, 3);
        f.delete_char();
        assert_eq!(f.value(0), "ab");
    }

    #[test]
    fn test_field_cycling_and_clear() {
        let mut f = form();
        f.set_value(1, "secret");
        f.next_field();
        assert_eq!(f.selected, 1);
        assert_eq!(f.cursor, 6);
        f.next_field();
        assert_eq!(f.selected, 0);
        f.prev_field();
        assert_eq!(f.selected, 1);
        f.clear();
        assert_eq!(f.value(1), "");
        assert_eq!(f.selected, 0);
    }
}

//! Single-line input buffer used by the search bar and the form fields.

#[derive(Debug, Clone, Default)]
pub struct FieldBuffer {
    text: String,
    cursor: usize,
}

impl FieldBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from<T: Into<String>>(value: T) -> Self {
        let text = value.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn set<T: Into<String>>(&mut self, value: T) {
        self.text = value.into();
        self.cursor = self.text.len();
    }

    /// Character column of the cursor, for rendering.
    pub fn cursor_col(&self) -> usize {
        self.text[..self.cursor].chars().count()
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        let mut buf = [0u8; 4];
        let encoded = ch.encode_utf8(&mut buf);
        self.text.insert_str(self.cursor, encoded);
        self.cursor += encoded.len();
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        if let Some((idx, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.text.drain(idx..self.cursor);
            self.cursor = idx;
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor >= self.text.len() {
            return;
        }
        if let Some((idx, ch)) = self.text[self.cursor..].char_indices().next() {
            let end = self.cursor + idx + ch.len_utf8();
            self.text.drain(self.cursor..end);
        }
    }

    pub fn move_left(&mut self) {
        if let Some((idx, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.cursor = idx;
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor >= self.text.len() {
            return;
        }
        if let Some((idx, ch)) = self.text[self.cursor..].char_indices().next() {
            self.cursor += idx + ch.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_places_cursor_at_end() {
        let buffer = FieldBuffer::from("hello");
        assert_eq!(buffer.as_str(), "hello");
        assert_eq!(buffer.cursor_col(), 5);
    }

    #[test]
    fn editing_respects_char_boundaries() {
        let mut buffer = FieldBuffer::from("héllo");
        buffer.move_home();
        buffer.move_right();
        buffer.move_right();
        buffer.backspace();
        assert_eq!(buffer.as_str(), "hllo");

        buffer.insert_char('é');
        assert_eq!(buffer.as_str(), "héllo");
    }

    #[test]
    fn delete_removes_under_cursor() {
        let mut buffer = FieldBuffer::from("abc");
        buffer.move_home();
        buffer.delete_char();
        assert_eq!(buffer.as_str(), "bc");
        buffer.move_end();
        buffer.delete_char();
        assert_eq!(buffer.as_str(), "bc");
    }

    #[test]
    fn control_characters_are_ignored() {
        let mut buffer = FieldBuffer::new();
        buffer.insert_char('\n');
        buffer.insert_char('\r');
        buffer.insert_char('a');
        assert_eq!(buffer.as_str(), "a");
    }
}

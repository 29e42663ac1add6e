/// Raw input string built from discrete key edits.
///
/// Space commits the current word, backspace steps back one char (across a
/// word boundary when the current segment is empty). A space that would open
/// more segments than there are target words is refused.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    raw: String,
    word_count: usize,
}

impl InputBuffer {
    pub fn new(word_count: usize) -> Self {
        Self {
            raw: String::new(),
            word_count,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.raw.matches(' ').count() + 1
    }

    /// Returns whether the buffer changed.
    pub fn push(&mut self, c: char) -> bool {
        if c == ' ' {
            if self.segment_count() >= self.word_count {
                return false;
            }
        } else if c.is_control() {
            return false;
        }
        self.raw.push(c);
        true
    }

    pub fn backspace(&mut self) -> bool {
        self.raw.pop().is_some()
    }

    /// Drop the current segment, or the previous word when the current
    /// segment is already empty.
    pub fn delete_word(&mut self) -> bool {
        if self.raw.is_empty() {
            return false;
        }
        if self.raw.ends_with(' ') {
            self.raw.pop();
        }
        let keep = self.raw.rfind(' ').map_or(0, |i| i + 1);
        self.raw.truncate(keep);
        true
    }

    pub fn clear(&mut self) {
        self.raw.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(word_count: usize, keys: &str) -> InputBuffer {
        let mut buf = InputBuffer::new(word_count);
        for c in keys.chars() {
            buf.push(c);
        }
        buf
    }

    #[test]
    fn push_and_backspace() {
        let mut buf = typed(2, "th");
        assert_eq!(buf.as_str(), "th");
        assert!(buf.backspace());
        assert_eq!(buf.as_str(), "t");
        assert!(buf.backspace());
        assert!(!buf.backspace());
        assert!(buf.is_empty());
    }

    #[test]
    fn backspace_crosses_word_boundary() {
        let mut buf = typed(2, "the ");
        assert_eq!(buf.segment_count(), 2);
        buf.backspace();
        assert_eq!(buf.as_str(), "the");
        assert_eq!(buf.segment_count(), 1);
    }

    #[test]
    fn space_past_last_word_is_refused() {
        let mut buf = typed(2, "the cat");
        assert!(!buf.push(' '));
        assert_eq!(buf.as_str(), "the cat");
        assert!(buf.push('s'));
    }

    #[test]
    fn control_chars_are_ignored() {
        let mut buf = InputBuffer::new(1);
        assert!(!buf.push('\t'));
        assert!(!buf.push('\u{8}'));
        assert!(buf.is_empty());
    }

    #[test]
    fn delete_word_drops_current_segment() {
        let mut buf = typed(3, "the ca");
        assert!(buf.delete_word());
        assert_eq!(buf.as_str(), "the ");
        assert!(buf.delete_word());
        assert_eq!(buf.as_str(), "");
        assert!(!buf.delete_word());
    }

    #[test]
    fn clear_resets() {
        let mut buf = typed(3, "the c");
        buf.clear();
        assert_eq!(buf.as_str(), "");
        assert_eq!(buf.segment_count(), 1);
    }
}

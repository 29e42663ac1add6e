use std::collections::BTreeSet;

use crate::caret::CaretPosition;
use crate::classify::Word;

/// Receives classified words and caret moves from a session.
pub trait RenderSink {
    /// Create or replace the visual for `word.index`.
    fn draw_word(&mut self, word: &Word);
    fn place_caret(&mut self, caret: CaretPosition);
}

/// In-memory render target holding the last drawn version of every word.
///
/// Only words handed to [`RenderSink::draw_word`] are replaced, so the board
/// reflects exactly what an incremental renderer would show.
#[derive(Debug, Default, Clone)]
pub struct WordBoard {
    words: Vec<Option<Word>>,
    caret: Option<CaretPosition>,
    dirty: BTreeSet<usize>,
}

impl WordBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(word_count: usize) -> Self {
        Self {
            words: vec![None; word_count],
            ..Self::default()
        }
    }

    pub fn word(&self, index: usize) -> Option<&Word> {
        self.words.get(index).and_then(Option::as_ref)
    }

    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.words.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn caret(&self) -> Option<CaretPosition> {
        self.caret
    }

    /// Indices drawn since the last call, ascending.
    pub fn take_dirty(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.dirty).into_iter().collect()
    }

    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|w| *w = None);
        self.caret = None;
        self.dirty.clear();
    }
}

impl RenderSink for WordBoard {
    fn draw_word(&mut self, word: &Word) {
        if word.index >= self.words.len() {
            self.words.resize(word.index + 1, None);
        }
        self.words[word.index] = Some(word.clone());
        self.dirty.insert(word.index);
    }

    fn place_caret(&mut self, caret: CaretPosition) {
        self.caret = Some(caret);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caret::CaretSide;
    use crate::classify::classify_word_at;

    #[test]
    fn draw_word_replaces_by_index() {
        let mut board = WordBoard::with_capacity(2);
        board.draw_word(&classify_word_at(1, "cat", "c", true));
        assert!(board.word(0).is_none());
        assert_eq!(board.word(1).unwrap().letters.len(), 3);

        board.draw_word(&classify_word_at(1, "cat", "catss", true));
        assert_eq!(board.word(1).unwrap().letters.len(), 5);
        assert_eq!(board.take_dirty(), vec![1]);
        assert!(board.take_dirty().is_empty());
    }

    #[test]
    fn grows_for_unknown_indices() {
        let mut board = WordBoard::new();
        board.draw_word(&classify_word_at(3, "sat", "", false));
        assert_eq!(board.len(), 4);
        assert_eq!(board.words().count(), 1);
    }

    #[test]
    fn clear_forgets_words_and_caret() {
        let mut board = WordBoard::with_capacity(1);
        board.draw_word(&classify_word_at(0, "a", "", true));
        board.place_caret(CaretPosition::new(0, 0, CaretSide::At));
        board.clear();
        assert!(board.word(0).is_none());
        assert!(board.caret().is_none());
        assert_eq!(board.len(), 1);
    }
}

//! Word-level change detection between two typing states.
//!
//! Words are matched by position; the word count is fixed for a session so
//! there are no inserts or removals, only replaced words. Output keeps
//! ascending index order.

use itertools::Itertools;

use crate::classify::{TypingState, Word};
use crate::error::{Result, Violation};

/// Words of `current` that differ from the word at the same index in
/// `previous`, compared letter by letter on value, kind and caret.
pub fn diff(previous: &TypingState, current: &TypingState) -> Result<Vec<Word>> {
    if previous.len() != current.len() {
        return Err(Violation::WordCountMismatch {
            previous: previous.len(),
            current: current.len(),
        }
        .into());
    }

    Ok(previous
        .iter()
        .zip_eq(current.iter())
        .filter(|(prev, cur)| word_changed(prev, cur))
        .map(|(_, cur)| cur.clone())
        .collect())
}

fn word_changed(prev: &Word, cur: &Word) -> bool {
    prev.letters.len() != cur.letters.len()
        || prev
            .letters
            .iter()
            .zip(&cur.letters)
            .any(|(a, b)| a.value != b.value || a.kind != b.kind || a.caret != b.caret)
}

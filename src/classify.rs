use crate::error::{Result, Violation};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LetterKind {
    Correct,
    Incorrect,
    /// not typed yet
    Missing,
    /// typed past the end of the target word
    OutOfRange,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaretMark {
    /// caret sits before this letter
    At,
    /// caret sits right after this letter
    After,
    Not,
}

/// One classified position of a word
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Letter {
    pub value: char,
    pub kind: LetterKind,
    pub caret: CaretMark,
}

/// A target word with its letters classified against the typed input
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word {
    pub index: usize,
    pub letters: Vec<Letter>,
}

impl Word {
    pub fn is_correct(&self) -> bool {
        word_correct(&self.letters)
    }

    pub fn has_caret(&self) -> bool {
        self.letters.iter().any(|l| l.caret != CaretMark::Not)
    }

    pub fn text(&self) -> String {
        self.letters.iter().map(|l| l.value).collect()
    }
}

/// The classified view of every target word for one input snapshot.
///
/// Built fresh on every input change; its length is the target word count
/// for the whole session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypingState {
    words: Vec<Word>,
}

impl TypingState {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn get(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Word> {
        self.words.iter()
    }

    pub fn into_words(self) -> Vec<Word> {
        self.words
    }
}

impl From<Vec<Word>> for TypingState {
    fn from(words: Vec<Word>) -> Self {
        Self { words }
    }
}

impl<'a> IntoIterator for &'a TypingState {
    type Item = &'a Word;
    type IntoIter = std::slice::Iter<'a, Word>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}

/// Classify `input` against `target`, with index 0.
pub fn classify_word(target: &str, input: &str, is_active: bool) -> Word {
    classify_word_at(0, target, input, is_active)
}

/// Classify `input` against `target` for the word at `index`.
///
/// Positions are counted in chars; comparison is plain `char` equality.
pub fn classify_word_at(index: usize, target: &str, input: &str, is_active: bool) -> Word {
    let target: Vec<char> = target.chars().collect();
    let input: Vec<char> = input.chars().collect();
    let n = target.len().max(input.len());

    let letters = (0..n)
        .map(|i| {
            let kind = if i >= target.len() {
                LetterKind::OutOfRange
            } else if i >= input.len() {
                LetterKind::Missing
            } else if target[i] == input[i] {
                LetterKind::Correct
            } else {
                LetterKind::Incorrect
            };

            let value = if i < target.len() { target[i] } else { input[i] };

            Letter {
                value,
                kind,
                caret: caret_for(i, target.len(), input.len(), is_active),
            }
        })
        .collect();

    Word { index, letters }
}

fn caret_for(i: usize, target_len: usize, input_len: usize, is_active: bool) -> CaretMark {
    if !is_active {
        return CaretMark::Not;
    }
    if input_len < target_len {
        // before the next untyped target char
        if i == input_len {
            CaretMark::At
        } else {
            CaretMark::Not
        }
    } else if input_len > 0 && i == input_len - 1 {
        CaretMark::After
    } else {
        CaretMark::Not
    }
}

/// True when every letter is `Correct`, or every letter is `Missing`
/// (an untouched word is not wrong).
pub fn word_correct(letters: &[Letter]) -> bool {
    letters.iter().all(|l| l.kind == LetterKind::Correct)
        || letters.iter().all(|l| l.kind == LetterKind::Missing)
}

/// Classify every target word against its input segment.
///
/// The last segment marks the active word. At least one segment is required
/// (an empty session is a single empty segment) and there can't be more
/// segments than target words.
pub fn build_state<T, S>(target_words: &[T], input_segments: &[S]) -> Result<TypingState>
where
    T: AsRef<str>,
    S: AsRef<str>,
{
    if input_segments.is_empty() {
        return Err(Violation::NoInputSegments.into());
    }
    if input_segments.len() > target_words.len() {
        return Err(Violation::TooManySegments {
            segments: input_segments.len(),
            words: target_words.len(),
        }
        .into());
    }

    let active = input_segments.len() - 1;
    let words = target_words
        .iter()
        .enumerate()
        .map(|(i, target)| {
            let input = input_segments.get(i).map_or("", |s| s.as_ref());
            classify_word_at(i, target.as_ref(), input, i == active)
        })
        .collect();

    Ok(TypingState { words })
}

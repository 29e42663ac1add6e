use crate::classify::{CaretMark, TypingState};
use crate::error::{Result, Violation};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaretSide {
    At,
    After,
}

/// Logical caret location: word index, letter index within that word, and
/// which side of the letter the caret is drawn on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaretPosition {
    pub word: usize,
    pub letter: usize,
    pub side: CaretSide,
}

impl CaretPosition {
    pub fn new(word: usize, letter: usize, side: CaretSide) -> Self {
        Self { word, letter, side }
    }
}

/// Find the single caret-marked letter in `state`.
pub fn locate_caret(state: &TypingState) -> Result<CaretPosition> {
    let mut marks = state.iter().flat_map(|word| {
        word.letters
            .iter()
            .enumerate()
            .filter_map(move |(i, letter)| {
                let side = match letter.caret {
                    CaretMark::At => CaretSide::At,
                    CaretMark::After => CaretSide::After,
                    CaretMark::Not => return None,
                };
                Some(CaretPosition::new(word.index, i, side))
            })
    });

    match (marks.next(), marks.count()) {
        (Some(pos), 0) => Ok(pos),
        (None, _) => Err(Violation::CaretCount { found: 0 }.into()),
        (Some(_), rest) => Err(Violation::CaretCount { found: rest + 1 }.into()),
    }
}

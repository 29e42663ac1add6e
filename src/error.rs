use std::fmt;

/// Caller-side precondition that the engine found broken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Violation {
    /// `build_state` was handed zero input segments
    NoInputSegments,
    /// More input segments than target words
    TooManySegments { segments: usize, words: usize },
    /// Successive states disagree on the word count
    WordCountMismatch { previous: usize, current: usize },
    /// A state must carry exactly one caret mark
    CaretCount { found: usize },
    /// Target words must contain at least one character
    EmptyTargetWord { index: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoInputSegments => write!(f, "no input segments"),
            Self::TooManySegments { segments, words } => {
                write!(f, "{segments} input segments for {words} target words")
            }
            Self::WordCountMismatch { previous, current } => {
                write!(f, "word count changed from {previous} to {current}")
            }
            Self::CaretCount { found } => {
                write!(f, "expected exactly one caret mark, found {found}")
            }
            Self::EmptyTargetWord { index } => write!(f, "target word {index} is empty"),
        }
    }
}

/// Errors raised by the typing-state engine.
///
/// Every variant is a programming error in the adapter driving the engine,
/// never a user input problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineError {
    InvariantViolation(Violation),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvariantViolation(v) => write!(f, "invariant violation: {v}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<Violation> for EngineError {
    fn from(v: Violation) -> Self {
        Self::InvariantViolation(v)
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

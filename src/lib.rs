// Library surface for headless/integration tests and reuse.
// The typing-state engine lives in classify/diff/caret; everything else
// adapts it to a terminal.
pub mod app_dirs;
pub mod caret;
pub mod classify;
pub mod config;
pub mod diff;
pub mod error;
pub mod input;
pub mod logging;
pub mod render;
pub mod runtime;
pub mod session;
pub mod ui;
pub mod words;

pub use caret::{locate_caret, CaretPosition, CaretSide};
pub use classify::{
    build_state, classify_word, word_correct, CaretMark, Letter, LetterKind, TypingState, Word,
};
pub use diff::diff;
pub use error::{EngineError, Violation};
pub use session::{Session, Update};

use tracing::{debug, error, info};

use crate::caret::{locate_caret, CaretPosition};
use crate::classify::{build_state, LetterKind, TypingState, Word};
use crate::diff::diff;
use crate::error::{EngineError, Result, Violation};
use crate::render::RenderSink;

/// Split raw input into one segment per committed-or-in-progress word.
///
/// Always yields at least one segment; `""` gives `[""]`.
pub fn split_input(raw: &str) -> Vec<&str> {
    raw.split(' ').collect()
}

/// What a consumer has to redraw after one input change
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Update {
    /// Words to redraw, ascending by index
    pub words: Vec<Word>,
    /// Whether `words` is the whole board rather than a change-set
    pub full: bool,
    pub caret: CaretPosition,
}

/// Drives the engine for one set of target words.
///
/// Holds the only state that survives between keystrokes: the previously
/// rendered `TypingState`. Calls must be serialized; the caller owns the
/// session and feeds it one raw input string per edit event.
#[derive(Debug, Clone)]
pub struct Session {
    target_words: Vec<String>,
    previous: Option<TypingState>,
    segments: usize,
}

impl Session {
    pub fn new(target_words: Vec<String>) -> Result<Self> {
        if target_words.is_empty() {
            return Err(Violation::TooManySegments {
                segments: 1,
                words: 0,
            }
            .into());
        }
        if let Some(index) = target_words.iter().position(|w| w.is_empty()) {
            return Err(Violation::EmptyTargetWord { index }.into());
        }

        info!(words = target_words.len(), "session created");
        Ok(Self {
            target_words,
            previous: None,
            segments: 0,
        })
    }

    pub fn target_words(&self) -> &[String] {
        &self.target_words
    }

    pub fn word_count(&self) -> usize {
        self.target_words.len()
    }

    /// Last state handed out, if any.
    pub fn state(&self) -> Option<&TypingState> {
        self.previous.as_ref()
    }

    /// Classify `raw_input` and report what changed since the previous call.
    ///
    /// The first call after creation or [`Session::restart`] reports every
    /// word.
    pub fn apply(&mut self, raw_input: &str) -> Result<Update> {
        let segments = split_input(raw_input);
        let current = build_state(&self.target_words, &segments).inspect_err(log_violation)?;
        let caret = locate_caret(&current).inspect_err(log_violation)?;

        let (words, full) = match &self.previous {
            Some(previous) => (diff(previous, &current).inspect_err(log_violation)?, false),
            None => (current.words().to_vec(), true),
        };

        debug!(
            segments = segments.len(),
            changed = words.len(),
            full,
            caret_word = caret.word,
            caret_letter = caret.letter,
            "applied input"
        );

        self.segments = segments.len();
        self.previous = Some(current);
        Ok(Update { words, full, caret })
    }

    /// Back to an empty input with a full redraw.
    pub fn restart(&mut self) -> Result<Update> {
        info!("session restarted");
        self.previous = None;
        self.apply("")
    }

    /// [`Session::apply`] and push the result into `sink`.
    pub fn present<R: RenderSink>(&mut self, raw_input: &str, sink: &mut R) -> Result<Update> {
        let update = self.apply(raw_input)?;
        for word in &update.words {
            sink.draw_word(word);
        }
        sink.place_caret(update.caret);
        Ok(update)
    }

    /// Every word has input and the last one is typed to at least its length.
    pub fn is_finished(&self) -> bool {
        let Some(state) = &self.previous else {
            return false;
        };
        if self.segments < self.target_words.len() {
            return false;
        }
        state
            .words()
            .last()
            .is_some_and(|w| w.letters.iter().all(|l| l.kind != LetterKind::Missing))
    }
}

fn log_violation(err: &EngineError) {
    error!(%err, "typing engine rejected input");
}

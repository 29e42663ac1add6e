//! Target word sources.
//!
//! Every source trims entries and drops blank ones, so a session never sees
//! an empty target word.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

#[derive(Debug)]
pub enum WordSourceError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(String),
    UnknownList(String),
    /// Nothing left after dropping blank entries
    Empty,
}

impl fmt::Display for WordSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "reading {}: {}", path.display(), source),
            Self::Parse(msg) => write!(f, "invalid word list: {msg}"),
            Self::UnknownList(name) => write!(f, "unknown word list: {name}"),
            Self::Empty => write!(f, "word list has no words"),
        }
    }
}

impl std::error::Error for WordSourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Supplies the immutable target word list for a session.
pub trait WordSource {
    fn words(&self) -> Result<Vec<String>, WordSourceError>;
}

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WordList {
    #[default]
    English,
    EnglishShort,
}

/// Compiled-in JSON word list
#[derive(Deserialize, Clone, Debug)]
pub struct Language {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Language {
    pub fn load(list: WordList) -> Result<Self, WordSourceError> {
        let file_name = format!("{list}.json");
        let file = LANG_DIR
            .get_file(&file_name)
            .ok_or_else(|| WordSourceError::UnknownList(list.to_string()))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| WordSourceError::Parse(format!("{file_name} is not utf-8")))?;
        serde_json::from_str(contents).map_err(|e| WordSourceError::Parse(e.to_string()))
    }
}

/// Random sample of `count` words from a compiled-in list.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedWords {
    pub list: WordList,
    pub count: usize,
}

impl EmbeddedWords {
    pub fn new(list: WordList, count: usize) -> Self {
        Self { list, count }
    }
}

impl WordSource for EmbeddedWords {
    fn words(&self) -> Result<Vec<String>, WordSourceError> {
        let lang = Language::load(self.list)?;
        let pool = clean(lang.words)?;
        let mut rng = rand::thread_rng();

        let words: Vec<String> = if self.count <= pool.len() {
            pool.choose_multiple(&mut rng, self.count).cloned().collect()
        } else {
            (0..self.count)
                .filter_map(|_| pool.choose(&mut rng).cloned())
                .collect()
        };
        debug!(list = %self.list, count = words.len(), "sampled words");

        if words.is_empty() {
            return Err(WordSourceError::Empty);
        }
        Ok(words)
    }
}

/// Newline-delimited word file, read in order.
#[derive(Debug, Clone)]
pub struct FileWords {
    path: PathBuf,
    limit: Option<usize>,
}

impl FileWords {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl WordSource for FileWords {
    fn words(&self) -> Result<Vec<String>, WordSourceError> {
        let text = fs::read_to_string(&self.path).map_err(|source| WordSourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let mut words = clean(text.lines().map(str::to_string).collect())?;
        if let Some(limit) = self.limit {
            words.truncate(limit);
        }
        debug!(path = %self.path.display(), count = words.len(), "loaded word file");

        if words.is_empty() {
            return Err(WordSourceError::Empty);
        }
        Ok(words)
    }
}

/// Literal prompt split on whitespace.
#[derive(Debug, Clone)]
pub struct PromptWords(pub String);

impl WordSource for PromptWords {
    fn words(&self) -> Result<Vec<String>, WordSourceError> {
        clean(self.0.split_whitespace().map(str::to_string).collect())
    }
}

fn clean(words: Vec<String>) -> Result<Vec<String>, WordSourceError> {
    let words: Vec<String> = words
        .into_iter()
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        Err(WordSourceError::Empty)
    } else {
        Ok(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn embedded_lists_load() {
        let lang = Language::load(WordList::English).unwrap();
        assert_eq!(lang.name, "english");
        assert_eq!(lang.size as usize, lang.words.len());

        let short = Language::load(WordList::EnglishShort).unwrap();
        assert!(short.words.iter().all(|w| w.chars().count() <= 4));
    }

    #[test]
    fn embedded_words_samples_requested_count() {
        let words = EmbeddedWords::new(WordList::English, 15).words().unwrap();
        assert_eq!(words.len(), 15);
        assert!(words.iter().all(|w| !w.is_empty() && !w.contains(' ')));
    }

    #[test]
    fn embedded_words_repeats_when_pool_is_small() {
        let words = EmbeddedWords::new(WordList::EnglishShort, 500).words().unwrap();
        assert_eq!(words.len(), 500);
    }

    #[test]
    fn zero_count_is_empty() {
        assert_matches!(
            EmbeddedWords::new(WordList::English, 0).words(),
            Err(WordSourceError::Empty)
        );
    }

    #[test]
    fn file_words_drop_blank_lines() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "the\ncat\n\n  sat \n").unwrap();

        let words = FileWords::new(file.path()).words().unwrap();
        assert_eq!(words, vec!["the", "cat", "sat"]);

        let limited = FileWords::new(file.path()).with_limit(2).words().unwrap();
        assert_eq!(limited, vec!["the", "cat"]);
    }

    #[test]
    fn zero_limit_on_a_file_is_empty() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "the\ncat\n").unwrap();

        assert_matches!(
            FileWords::new(file.path()).with_limit(0).words(),
            Err(WordSourceError::Empty)
        );
    }

    #[test]
    fn bundled_sample_file_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/words.txt");
        let words = FileWords::new(path).words().unwrap();
        assert_eq!(words.len(), 40);
        assert_eq!(words[0], "the");
    }

    #[test]
    fn missing_file_is_io_error() {
        assert_matches!(
            FileWords::new("/definitely/not/here.txt").words(),
            Err(WordSourceError::Io { .. })
        );
    }

    #[test]
    fn prompt_words_split_on_whitespace() {
        let words = PromptWords("hello   world\tagain".into()).words().unwrap();
        assert_eq!(words, vec!["hello", "world", "again"]);
        assert_matches!(PromptWords("   ".into()).words(), Err(WordSourceError::Empty));
    }

    #[test]
    fn word_list_names() {
        assert_eq!(WordList::EnglishShort.to_string(), "english_short");
        assert_eq!(
            serde_json::to_string(&WordList::EnglishShort).unwrap(),
            "\"english_short\""
        );
    }
}

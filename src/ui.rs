use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::classify::{CaretMark, LetterKind, Word};
use crate::render::WordBoard;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

/// Typing screen: the word board plus a one-line legend
pub struct TypingView<'a> {
    pub board: &'a WordBoard,
    pub caret_visible: bool,
    pub finished: bool,
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn letter_style(kind: LetterKind) -> Style {
    match kind {
        LetterKind::Correct => bold().fg(Color::Green),
        LetterKind::Incorrect => bold().fg(Color::Red),
        LetterKind::Missing => bold().add_modifier(Modifier::DIM),
        LetterKind::OutOfRange => Style::default().fg(Color::Rgb(139, 0, 0)),
    }
}

fn caret_style(base: Style) -> Style {
    base.add_modifier(Modifier::REVERSED)
}

/// Spans for one word followed by its trailing gap.
///
/// Words that are not being typed and deviate from their target get
/// underlined. An `After` caret is drawn on the gap cell.
pub fn word_spans(word: &Word, caret_visible: bool) -> Vec<Span<'static>> {
    let flag_incorrect = !word.has_caret() && !word.is_correct();
    let mut gap_has_caret = false;

    let mut spans: Vec<Span<'static>> = word
        .letters
        .iter()
        .map(|letter| {
            let mut style = letter_style(letter.kind);
            if flag_incorrect {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            match letter.caret {
                CaretMark::At if caret_visible => style = caret_style(style),
                CaretMark::After => gap_has_caret = caret_visible,
                _ => {}
            }
            Span::styled(letter.value.to_string(), style)
        })
        .collect();

    let gap = if gap_has_caret {
        caret_style(Style::default())
    } else {
        Style::default()
    };
    spans.push(Span::styled(" ", gap));
    spans
}

impl Widget for &TypingView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let spans: Vec<Span> = self
            .board
            .words()
            .flat_map(|w| word_spans(w, self.caret_visible && !self.finished))
            .collect();
        let text_width: usize = spans.iter().map(|s| s.content.width()).sum();

        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let prompt_occupied_lines = if text_width <= max_chars_per_line as usize {
            1
        } else {
            ((text_width as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16
        };
        let padding = area.height.saturating_sub(prompt_occupied_lines + 1) / 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(padding),
                Constraint::Length(prompt_occupied_lines),
                Constraint::Length(VERTICAL_MARGIN),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let words = Paragraph::new(Line::from(spans))
            .alignment(if prompt_occupied_lines == 1 {
                // when the prompt is small enough to fit on one line
                // centering the text gives a nice zen feeling
                Alignment::Center
            } else {
                Alignment::Left
            })
            // keep trailing gaps, the caret can sit on them
            .wrap(Wrap { trim: false });
        words.render(chunks[1], buf);

        let legend = if self.finished {
            "done! (r)estart / (n)ew / (esc)ape"
        } else {
            "(ctrl+r)estart / (ctrl+n)ew / (esc)ape"
        };
        Paragraph::new(Span::styled(legend, italic_style))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_word_at;
    use crate::session::Session;

    fn rendered(view: &TypingView, area: Rect) -> String {
        let mut buffer = Buffer::empty(area);
        view.render(area, &mut buffer);
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    fn board_for(words: &[&str], input: &str) -> WordBoard {
        let mut session = Session::new(words.iter().map(|w| w.to_string()).collect()).unwrap();
        let mut board = WordBoard::with_capacity(words.len());
        session.present(input, &mut board).unwrap();
        board
    }

    #[test]
    fn caret_at_reverses_the_letter() {
        let spans = word_spans(&classify_word_at(0, "cat", "c", true), true);
        assert_eq!(spans.len(), 4);
        assert!(spans[1].style.add_modifier.contains(Modifier::REVERSED));
        assert!(!spans[0].style.add_modifier.contains(Modifier::REVERSED));
        assert_eq!(spans[0].style.fg, Some(Color::Green));
    }

    #[test]
    fn caret_after_reverses_the_gap() {
        let spans = word_spans(&classify_word_at(0, "cat", "cats", true), true);
        assert_eq!(spans.len(), 5);
        assert_eq!(spans[4].content, " ");
        assert!(spans[4].style.add_modifier.contains(Modifier::REVERSED));
        assert_eq!(spans[3].style, letter_style(LetterKind::OutOfRange));
    }

    #[test]
    fn hidden_caret_is_not_drawn() {
        let spans = word_spans(&classify_word_at(0, "cat", "", true), false);
        assert!(spans
            .iter()
            .all(|s| !s.style.add_modifier.contains(Modifier::REVERSED)));
    }

    #[test]
    fn committed_wrong_word_is_underlined() {
        let spans = word_spans(&classify_word_at(0, "cat", "cot", false), true);
        assert!(spans[0].style.add_modifier.contains(Modifier::UNDERLINED));

        let untouched = word_spans(&classify_word_at(1, "cat", "", false), true);
        assert!(!untouched[0].style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn view_renders_words_and_legend() {
        let board = board_for(&["hello", "world"], "hel");
        let view = TypingView {
            board: &board,
            caret_visible: true,
            finished: false,
        };
        let out = rendered(&view, Rect::new(0, 0, 80, 24));
        assert!(out.contains("hello world"));
        assert!(out.contains("(esc)ape"));
    }

    #[test]
    fn view_survives_tiny_areas() {
        let board = board_for(&["hello", "world", "again"], "");
        let view = TypingView {
            board: &board,
            caret_visible: true,
            finished: true,
        };
        let area = Rect::new(0, 0, 8, 3);
        let mut buffer = Buffer::empty(area);
        view.render(area, &mut buffer);
        assert_eq!(*buffer.area(), area);
    }
}

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use tracing::{info, trace, warn};

use typecaret::{
    config::{Config, ConfigStore, FileConfigStore},
    input::InputBuffer,
    logging,
    render::{RenderSink, WordBoard},
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    ui::TypingView,
    words::{EmbeddedWords, FileWords, PromptWords, WordList, WordSource},
    Session,
};

const TICK_RATE_MS: u64 = 500;

/// minimal typing test with per-letter feedback
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// number of words to use in test
    #[clap(short = 'w', long)]
    number_of_words: Option<usize>,

    /// built-in word list to sample from
    #[clap(short = 'l', long, value_enum)]
    word_list: Option<WordList>,

    /// newline-delimited file of target words, used in order
    #[clap(short = 'f', long)]
    words_file: Option<PathBuf>,

    /// custom prompt to use
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// keep the caret steady instead of blinking
    #[clap(long)]
    no_blink: bool,

    /// persist the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    fn apply_to(&self, mut cfg: Config) -> Config {
        if let Some(n) = self.number_of_words {
            cfg.number_of_words = n;
        }
        if let Some(list) = self.word_list {
            cfg.word_list = list;
        }
        if let Some(path) = &self.words_file {
            cfg.words_file = Some(path.clone());
        }
        if self.no_blink {
            cfg.caret_blink = false;
        }
        cfg
    }
}

#[derive(Debug)]
pub struct App {
    pub config: Config,
    pub prompt: Option<String>,
    pub session: Session,
    pub input: InputBuffer,
    pub board: WordBoard,
    pub caret_visible: bool,
}

impl App {
    pub fn new(config: Config, prompt: Option<String>) -> Result<Self, Box<dyn Error>> {
        let words = load_words(&config, prompt.as_deref())?;
        let mut app = Self {
            input: InputBuffer::new(words.len()),
            board: WordBoard::with_capacity(words.len()),
            session: Session::new(words)?,
            config,
            prompt,
            caret_visible: true,
        };
        app.session.present(app.input.as_str(), &mut app.board)?;
        Ok(app)
    }

    /// Same words, empty input.
    pub fn restart(&mut self) -> Result<(), Box<dyn Error>> {
        self.input.clear();
        self.board.clear();
        let update = self.session.restart()?;
        for word in &update.words {
            self.board.draw_word(word);
        }
        self.board.place_caret(update.caret);
        self.caret_visible = true;
        Ok(())
    }

    /// Fresh words from the configured source.
    pub fn renew(&mut self) -> Result<(), Box<dyn Error>> {
        *self = Self::new(self.config.clone(), self.prompt.clone())?;
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), Box<dyn Error>> {
        self.session.present(self.input.as_str(), &mut self.board)?;
        self.caret_visible = true;
        Ok(())
    }
}

fn load_words(config: &Config, prompt: Option<&str>) -> Result<Vec<String>, Box<dyn Error>> {
    let source: Box<dyn WordSource> = if let Some(prompt) = prompt {
        Box::new(PromptWords(prompt.to_string()))
    } else if let Some(path) = &config.words_file {
        Box::new(FileWords::new(path).with_limit(config.number_of_words))
    } else {
        Box::new(EmbeddedWords::new(config.word_list, config.number_of_words))
    };
    Ok(source.words()?)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let _log_guard = logging::init();

    let store = FileConfigStore::new();
    let config = cli.apply_to(store.load());
    if cli.save_config {
        if let Err(e) = store.save(&config) {
            warn!(error = %e, "could not save config");
        }
    }

    let mut app = App::new(config, cli.prompt.clone())?;
    info!(words = app.session.word_count(), "starting typing test");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

#[derive(Debug, PartialEq)]
enum Action {
    Continue,
    Redraw,
    Quit,
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    draw(terminal, app)?;
    loop {
        let action = match runner.step() {
            AppEvent::Tick => {
                if app.config.caret_blink && !app.session.is_finished() {
                    app.caret_visible = !app.caret_visible;
                    Action::Redraw
                } else {
                    Action::Continue
                }
            }
            AppEvent::Resize => Action::Redraw,
            AppEvent::Key(key) => on_key(app, key)?,
        };

        match action {
            Action::Quit => break,
            Action::Redraw => draw(terminal, app)?,
            Action::Continue => {}
        }
    }

    Ok(())
}

fn draw<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let view = TypingView {
        board: &app.board,
        caret_visible: app.caret_visible,
        finished: app.session.is_finished(),
    };
    terminal.draw(|f| f.render_widget(&view, f.area()))?;
    let redrawn = app.board.take_dirty();
    trace!(?redrawn, "frame drawn");
    Ok(())
}

fn on_key(app: &mut App, key: KeyEvent) -> Result<Action, Box<dyn Error>> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Esc => return Ok(Action::Quit),
        KeyCode::Char('c') if ctrl => return Ok(Action::Quit),
        KeyCode::Char('r') if ctrl => app.restart()?,
        KeyCode::Char('n') if ctrl => app.renew()?,
        _ if app.session.is_finished() => match key.code {
            KeyCode::Char('r') => app.restart()?,
            KeyCode::Char('n') => app.renew()?,
            KeyCode::Backspace => {
                if !app.input.backspace() {
                    return Ok(Action::Continue);
                }
                app.refresh()?;
            }
            _ => return Ok(Action::Continue),
        },
        KeyCode::Backspace | KeyCode::Char('h') | KeyCode::Char('w')
            if ctrl || (alt && key.code == KeyCode::Backspace) =>
        {
            if !app.input.delete_word() {
                return Ok(Action::Continue);
            }
            app.refresh()?;
        }
        KeyCode::Backspace => {
            if !app.input.backspace() {
                return Ok(Action::Continue);
            }
            app.refresh()?;
        }
        KeyCode::Char(c) if !ctrl => {
            if !app.input.push(c) {
                return Ok(Action::Continue);
            }
            app.refresh()?;
        }
        _ => return Ok(Action::Continue),
    }

    Ok(Action::Redraw)
}

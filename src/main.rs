pub mod app_dirs;
pub mod celebration;
pub mod config;
pub mod cookies;
pub mod environment;
pub mod game;
pub mod records;
pub mod runtime;
pub mod session;
pub mod storage;
pub mod ui;
pub mod util;

use crate::celebration::WinCelebration;
use crate::config::{Config, ConfigStore, FileConfigStore};
use crate::cookies::{CookieJar, PLAYER_COOKIE};
use crate::environment::EnvProbe;
use crate::game::{Game, GuessOutcome, ValidationError};
use crate::records::{HighScore, Records, Totals};
use crate::runtime::{CrosstermEventSource, GameEvent, Runner};
use crate::session::EnvSnapshot;
use crate::storage::Storage;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

const TICK_RATE_MS: u64 = 100;

/// hangman-style word-guessing tui with streak scoring and persistent records
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A hangman-style word-guessing TUI: one player types a secret word, the other \
guesses it letter by letter while the balloon deflates. Streak scoring, a persistent high \
score and per-visit records."
)]
pub struct Cli {
    /// player display name (skips the landing prompt)
    #[clap(short, long)]
    player: Option<String>,

    /// secret word to play immediately (skips the entry screen)
    #[clap(short = 'w', long)]
    secret: Option<String>,

    /// user agent string shown in the environment panel
    #[clap(long)]
    user_agent: Option<String>,

    /// url shown in the environment panel
    #[clap(long)]
    url: Option<String>,

    /// language tag shown in the environment panel
    #[clap(long)]
    lang: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Landing,
    Entry,
    Playing,
    Results,
}

/// Pending action behind the yes/no overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    LeaveGame,
    ClearHighScore,
}

pub struct App {
    pub config: Config,
    pub storage: Storage,
    pub jar: CookieJar,
    pub probe: EnvProbe,
    pub screen: Screen,
    pub confirm: Option<ConfirmAction>,
    pub player_input: String,
    pub secret_input: String,
    pub reveal_secret: bool,
    pub player: String,
    pub game: Option<Game>,
    pub snapshot: Option<EnvSnapshot>,
    pub totals: Totals,
    pub high_score: Option<HighScore>,
    pub status: Option<String>,
    pub celebration: WinCelebration,
}

impl App {
    pub fn new(cli: Cli, config: Config, storage: Storage, jar: CookieJar) -> Self {
        let probe = EnvProbe::detect(cli.user_agent.clone(), cli.url.clone(), cli.lang.clone());
        let player_input = cli
            .player
            .clone()
            .or_else(|| jar.get(PLAYER_COOKIE))
            .unwrap_or_default();
        let (totals, high_score) = {
            let records = Records::new(&storage);
            (records.totals(), records.high_score())
        };

        let mut app = Self {
            config,
            storage,
            jar,
            probe,
            screen: Screen::Landing,
            confirm: None,
            player_input,
            secret_input: String::new(),
            reveal_secret: false,
            player: String::new(),
            game: None,
            snapshot: None,
            totals,
            high_score,
            status: None,
            celebration: WinCelebration::new(),
        };

        if let Some(word) = cli.secret {
            if app.player_input.trim().is_empty() {
                app.player_input = app.config.messages.default_player.clone();
            }
            app.submit_landing();
            app.secret_input = word;
            app.submit_secret();
        } else if cli.player.is_some() {
            app.submit_landing();
        }

        app
    }

    /// Landing screen submit: validate the name, persist the cookie and the
    /// environment snapshot, move on to secret entry.
    pub fn submit_landing(&mut self) {
        let name = self.player_input.trim().to_string();
        if name.is_empty() {
            self.status = Some(self.config.messages.empty_player.clone());
            return;
        }

        let _ = self
            .jar
            .set(PLAYER_COOKIE, &name, Some(self.config.cookie_ttl_days));
        let snapshot = EnvSnapshot::capture(&self.probe);
        snapshot.save(&self.storage);
        self.snapshot = Some(snapshot);

        self.player = name;
        self.status = None;
        self.screen = Screen::Entry;
    }

    /// Entry screen submit: run the word through validation and start the
    /// round, or surface the configured message on the status line.
    pub fn submit_secret(&mut self) {
        match Game::start(&self.secret_input) {
            Ok(game) => {
                self.game = Some(game);
                self.secret_input.clear();
                self.reveal_secret = false;
                self.status = None;
                self.screen = Screen::Playing;
            }
            Err(err) => self.status = Some(self.validation_message(err)),
        }
    }

    fn validation_message(&self, err: ValidationError) -> String {
        let messages = &self.config.messages;
        match err {
            ValidationError::Empty => messages.empty_word.clone(),
            ValidationError::TooShort => messages.short_word.clone(),
            ValidationError::ContainsDigit => messages.digit_word.clone(),
        }
    }

    /// Route one guessed letter; a terminal outcome records the game and
    /// navigates to the results screen.
    pub fn guess(&mut self, letter: char, width: u16, height: u16) {
        let outcome = match self.game.as_mut() {
            Some(game) => game.guess(letter),
            None => return,
        };

        if matches!(outcome, GuessOutcome::Won | GuessOutcome::Lost) {
            if let Some(game) = &self.game {
                let (totals, high) = Records::new(&self.storage).record_game(game, &self.player);
                self.totals = totals;
                self.high_score = Some(high);
                if outcome == GuessOutcome::Won {
                    self.celebration.start(game.score, width, height);
                }
            }
            self.screen = Screen::Results;
        }
    }

    pub fn request_clear_high_score(&mut self) {
        if self.high_score.is_some() {
            self.confirm = Some(ConfirmAction::ClearHighScore);
        } else {
            self.status = Some(self.config.messages.no_high_score.clone());
        }
    }

    pub fn confirm_yes(&mut self) {
        match self.confirm.take() {
            Some(ConfirmAction::LeaveGame) => {
                let records = Records::new(&self.storage);
                if let Some(game) = &self.game {
                    records.log_abandoned(game, &self.player);
                }
                self.game = None;
                self.status = None;
                self.screen = Screen::Landing;
            }
            Some(ConfirmAction::ClearHighScore) => {
                let _ = Records::new(&self.storage).clear_high_score();
                self.high_score = None;
            }
            None => {}
        }
    }

    pub fn new_word(&mut self) {
        self.game = None;
        self.status = None;
        self.screen = Screen::Entry;
    }

    pub fn to_landing(&mut self) {
        self.game = None;
        self.status = None;
        self.screen = Screen::Landing;
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let config = FileConfigStore::new().load();
    let storage = Storage::open_default();
    let jar = CookieJar::open_default();
    let mut app = App::new(cli, config, storage, jar);

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

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );

    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            GameEvent::Tick => {
                app.celebration.update();
                if app.celebration.is_active {
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            GameEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            GameEvent::Key(key) => {
                let size = terminal.size().unwrap_or_default();
                if handle_key(app, key, size.width, size.height) {
                    break;
                }
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    Ok(())
}

/// Apply one key event to the app; returns true when the app should quit.
/// Each event is fully applied (state, win/loss evaluation, persistence)
/// before the next one is read.
fn handle_key(app: &mut App, key: KeyEvent, width: u16, height: u16) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if app.confirm.is_some() {
        match key.code {
            KeyCode::Char('y') => app.confirm_yes(),
            KeyCode::Char('n') | KeyCode::Esc => app.confirm = None,
            _ => {}
        }
        return false;
    }

    match app.screen {
        Screen::Landing => match key.code {
            KeyCode::Enter => app.submit_landing(),
            KeyCode::Backspace => {
                app.player_input.pop();
            }
            KeyCode::Delete => app.request_clear_high_score(),
            KeyCode::Esc => return true,
            KeyCode::Char(c) if !c.is_control() => app.player_input.push(c),
            _ => {}
        },
        Screen::Entry => match key.code {
            KeyCode::Enter => app.submit_secret(),
            KeyCode::Tab => app.reveal_secret = !app.reveal_secret,
            KeyCode::Backspace => {
                app.secret_input.pop();
            }
            KeyCode::Esc => {
                app.secret_input.clear();
                app.status = None;
                app.screen = Screen::Landing;
            }
            KeyCode::Char(c) if !c.is_control() => app.secret_input.push(c),
            _ => {}
        },
        Screen::Playing => match key.code {
            KeyCode::Esc => app.confirm = Some(ConfirmAction::LeaveGame),
            KeyCode::Char(c) if c.is_alphabetic() => app.guess(c, width, height),
            _ => {}
        },
        Screen::Results => match key.code {
            KeyCode::Enter => app.new_word(),
            KeyCode::Esc => app.to_landing(),
            _ => {}
        },
    }

    false
}

fn ui(app: &mut App, f: &mut Frame) {
    f.render_widget(&*app, f.area());
}

use std::collections::BTreeSet;
use std::fmt;

/// Wrong guesses allowed before the balloon deflates completely.
pub const MAX_ERRORS: u32 = 9;
/// Minimum secret length accepted by [`Game::start`].
pub const MIN_SECRET_LEN: usize = 4;
/// Placeholder shown for a position that has not been revealed yet.
pub const PLACEHOLDER: char = '_';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationError {
    Empty,
    TooShort,
    ContainsDigit,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Empty => write!(f, "secret word is empty"),
            ValidationError::TooShort => {
                write!(f, "secret word needs at least {} letters", MIN_SECRET_LEN)
            }
            ValidationError::ContainsDigit => write!(f, "secret word cannot contain digits"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Single explicit state tag for a game; there is no way back from a
/// terminal state without a fresh [`Game::start`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Active,
    Won,
    Lost,
}

/// What a single guess did to the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    Continue,
    Won,
    Lost,
}

/// Uppercase a guess the same way [`Game::start`] uppercases the secret,
/// so letters like 'ç' match their stored form.
fn uppercase(letter: char) -> char {
    letter.to_uppercase().next().unwrap_or(letter)
}

/// represents one word-guessing round
#[derive(Clone, Debug)]
pub struct Game {
    pub secret: Vec<char>,
    pub masked: Vec<char>,
    pub used: BTreeSet<char>,
    pub errors: u32,
    pub streak: u32,
    pub score: u32,
    pub status: GameStatus,
}

impl Game {
    /// Validate the raw secret and open a fresh round.
    ///
    /// The input is trimmed and uppercased before the checks run, so
    /// `" gato "` and `"GATO"` start identical games.
    pub fn start(raw: &str) -> Result<Self, ValidationError> {
        let word = raw.trim().to_uppercase();
        if word.is_empty() {
            return Err(ValidationError::Empty);
        }
        let secret: Vec<char> = word.chars().collect();
        if secret.len() < MIN_SECRET_LEN {
            return Err(ValidationError::TooShort);
        }
        if secret.iter().any(|c| c.is_ascii_digit()) {
            return Err(ValidationError::ContainsDigit);
        }

        Ok(Self {
            masked: vec![PLACEHOLDER; secret.len()],
            secret,
            used: BTreeSet::new(),
            errors: 0,
            streak: 0,
            score: 0,
            status: GameStatus::Active,
        })
    }

    /// Apply a guessed letter and report whether the round continues.
    ///
    /// Guessing on a finished round or re-guessing a used letter is a
    /// no-op that reports the current state, not an error.
    pub fn guess(&mut self, letter: char) -> GuessOutcome {
        let letter = uppercase(letter);

        match self.status {
            GameStatus::Won => return GuessOutcome::Won,
            GameStatus::Lost => return GuessOutcome::Lost,
            GameStatus::Active => {}
        }
        if self.used.contains(&letter) {
            return GuessOutcome::Continue;
        }
        self.used.insert(letter);

        let mut occurrences: u32 = 0;
        for (idx, c) in self.secret.iter().enumerate() {
            if *c == letter {
                self.masked[idx] = letter;
                occurrences += 1;
            }
        }

        if occurrences > 0 {
            // Streak scoring: +1, then +2, +3, ... and when the letter shows
            // up more than once the whole running score is multiplied by the
            // occurrence count (after the streak add, not instead of it).
            self.streak += 1;
            self.score += self.streak;
            if occurrences > 1 {
                self.score *= occurrences;
            }

            if !self.masked.contains(&PLACEHOLDER) {
                self.status = GameStatus::Won;
                return GuessOutcome::Won;
            }
            GuessOutcome::Continue
        } else {
            self.streak = 0;
            self.errors += 1;
            self.score = self.score.saturating_sub(1);

            if self.errors >= MAX_ERRORS {
                self.status = GameStatus::Lost;
                return GuessOutcome::Lost;
            }
            GuessOutcome::Continue
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Active
    }

    pub fn is_used(&self, letter: char) -> bool {
        self.used.contains(&uppercase(letter))
    }

    /// Space-separated mask, the way the word slots are displayed.
    pub fn masked_view(&self) -> String {
        let mut out = String::with_capacity(self.masked.len() * 2);
        for (idx, c) in self.masked.iter().enumerate() {
            if idx > 0 {
                out.push(' ');
            }
            out.push(*c);
        }
        out
    }

    pub fn secret_word(&self) -> String {
        self.secret.iter().collect()
    }

    pub fn remaining_tries(&self) -> u32 {
        MAX_ERRORS.saturating_sub(self.errors)
    }
}

//! Per-player game session.
//!
//! A [`GameSession`] tracks one attempt at one level: the guesses made so far,
//! their feedback rows, the aggregated keyboard, and whether the attempt has
//! been won or lost. It is mutated only through [`GameSession::submit_guess`]
//! and the level transitions, each of which returns an explicit result.

use crate::debug_log;
use crate::evaluator::{FeedbackRow, WORD_LENGTH, evaluate, is_solved, row_to_string};
use crate::keyboard::KeyboardState;
use crate::levels::LevelTable;
use std::fmt;

pub const MAX_GUESSES: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Errors reported back to the shell. None of them is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Input was not exactly five letters; carries the uppercased input
    InvalidGuess(String),
    /// The level is already won or lost
    GameAlreadyOver,
    /// `advance_level` called before winning
    LevelNotWon,
    /// `advance_level` called on the last level
    NoNextLevel,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGuess(_) => write!(f, "Guess must be {WORD_LENGTH} letters long."),
            Self::GameAlreadyOver => write!(f, "This level is over, no more guesses allowed."),
            Self::LevelNotWon => write!(f, "Win this level before moving on."),
            Self::NoNextLevel => write!(f, "There is no next level."),
        }
    }
}

impl std::error::Error for GameError {}

/// Result of one accepted guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessOutcome {
    pub feedback: FeedbackRow,
    pub status: GameStatus,
    pub guesses_remaining: usize,
}

/// Uppercase `raw` and check it is exactly five ASCII letters.
///
/// # Errors
/// Returns `GameError::InvalidGuess` otherwise.
pub fn normalize_guess(raw: &str) -> Result<String, GameError> {
    let guess = raw.to_uppercase();
    if guess.len() == WORD_LENGTH && guess.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(guess)
    } else {
        Err(GameError::InvalidGuess(guess))
    }
}

#[derive(Debug, Clone)]
pub struct GameSession<'a> {
    levels: &'a LevelTable,
    level: usize,
    solution: String,
    guesses: Vec<String>,
    feedback: Vec<FeedbackRow>,
    keyboard: KeyboardState,
    status: GameStatus,
}

impl<'a> GameSession<'a> {
    /// Start a session on `level` of `levels`.
    #[must_use]
    pub fn new(levels: &'a LevelTable, level: usize) -> Self {
        let mut session = Self {
            levels,
            level,
            solution: String::new(),
            guesses: Vec::with_capacity(MAX_GUESSES),
            feedback: Vec::with_capacity(MAX_GUESSES),
            keyboard: KeyboardState::new(),
            status: GameStatus::InProgress,
        };
        session.start_level(level);
        session
    }

    /// Reset everything for `level`.
    ///
    /// A level number outside the table keeps its number but plays the last
    /// table entry's word.
    pub fn start_level(&mut self, level: usize) {
        if !self.levels.contains_level(level) {
            log::warn!("Level {level} is not in the table, using the last level's word");
        }
        self.level = level;
        self.solution = self.levels.solution_for(level).to_string();
        self.guesses.clear();
        self.feedback.clear();
        self.keyboard = KeyboardState::new();
        self.status = GameStatus::InProgress;
        log::info!("Started level {level}");
    }

    /// Evaluate one guess and advance the state machine.
    ///
    /// # Errors
    /// `GameAlreadyOver` once the level is won or lost, `InvalidGuess` for
    /// malformed input. The session is left untouched in both cases.
    pub fn submit_guess(&mut self, raw: &str) -> Result<GuessOutcome, GameError> {
        if self.status.is_terminal() {
            debug_log!("submit_guess() - Rejected '{}', game is over", raw);
            return Err(GameError::GameAlreadyOver);
        }
        let guess = normalize_guess(raw)?;

        let row = evaluate(&guess, &self.solution);
        self.keyboard.record(&guess, &row);
        self.feedback.push(row);
        let solved = is_solved(&row);
        log::debug!("Guess {} -> {}", guess, row_to_string(&row));
        self.guesses.push(guess);

        self.status = if solved {
            GameStatus::Won
        } else if self.guesses.len() >= MAX_GUESSES {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        };
        debug_log!(
            "submit_guess() - Guess {} of {}, status {:?}",
            self.guesses.len(),
            MAX_GUESSES,
            self.status
        );
        if self.status.is_terminal() {
            log::info!("Level {} finished: {:?}", self.level, self.status);
        }

        Ok(GuessOutcome {
            feedback: row,
            status: self.status,
            guesses_remaining: self.guesses_remaining(),
        })
    }

    /// Move to the next level after a win.
    ///
    /// # Errors
    /// `LevelNotWon` unless the current level is won, `NoNextLevel` on the
    /// last level. Nothing changes on error.
    pub fn advance_level(&mut self) -> Result<usize, GameError> {
        if self.status != GameStatus::Won {
            return Err(GameError::LevelNotWon);
        }
        if !self.has_next_level() {
            return Err(GameError::NoNextLevel);
        }
        let next = self.level + 1;
        self.start_level(next);
        Ok(next)
    }

    /// Replay the current level from scratch.
    pub fn retry_level(&mut self) {
        self.start_level(self.level);
    }

    /// Back to level 1.
    pub fn reset(&mut self) {
        self.start_level(1);
    }

    #[must_use]
    pub fn has_next_level(&self) -> bool {
        self.levels.contains_level(self.level + 1)
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    #[must_use]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// The solution, but only once the level is over.
    #[must_use]
    pub fn revealed_solution(&self) -> Option<&str> {
        self.status.is_terminal().then_some(self.solution.as_str())
    }

    #[must_use]
    pub fn guesses(&self) -> &[String] {
        &self.guesses
    }

    #[must_use]
    pub fn feedback(&self) -> &[FeedbackRow] {
        &self.feedback
    }

    #[must_use]
    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.status == GameStatus::Won
    }

    #[must_use]
    pub fn guesses_remaining(&self) -> usize {
        MAX_GUESSES.saturating_sub(self.guesses.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::LetterFeedback::{Absent, Correct};

    const MISSES: [&str; MAX_GUESSES] = ["CRANE", "PLAIN", "QUICK", "BLIMP", "DRAFT", "GHOUL"];

    #[test]
    fn test_new_session_starts_in_progress() {
        let levels = LevelTable::builtin();
        let session = GameSession::new(&levels, 1);
        assert_eq!(session.level(), 1);
        assert_eq!(session.status(), GameStatus::InProgress);
        assert!(session.guesses().is_empty());
        assert!(session.feedback().is_empty());
        assert!(session.keyboard().is_untouched());
        assert_eq!(session.revealed_solution(), None);
        assert_eq!(session.guesses_remaining(), MAX_GUESSES);
    }

    #[test]
    fn test_win_on_level_one() {
        let levels = LevelTable::builtin();
        let mut session = GameSession::new(&levels, 1);

        let outcome = session.submit_guess("SPOON").unwrap();
        assert_eq!(outcome.feedback, [Correct, Absent, Correct, Absent, Absent]);
        assert_eq!(outcome.status, GameStatus::InProgress);
        assert_eq!(outcome.guesses_remaining, 5);

        let outcome = session.submit_guess("smoke").unwrap();
        assert_eq!(outcome.feedback, [Correct; WORD_LENGTH]);
        assert_eq!(outcome.status, GameStatus::Won);
        assert!(session.is_over());
        assert!(session.is_won());
        assert_eq!(session.revealed_solution(), Some("SMOKE"));
        assert_eq!(session.guesses(), ["SPOON", "SMOKE"]);

        assert_eq!(session.submit_guess("SMOKE"), Err(GameError::GameAlreadyOver));
        assert_eq!(session.status(), GameStatus::Won);
        assert_eq!(session.guesses().len(), 2);
    }

    #[test]
    fn test_loss_after_six_misses() {
        let levels = LevelTable::builtin();
        let mut session = GameSession::new(&levels, 1);
        for (i, guess) in MISSES.iter().enumerate() {
            let outcome = session.submit_guess(guess).unwrap();
            let expected = if i + 1 == MAX_GUESSES {
                GameStatus::Lost
            } else {
                GameStatus::InProgress
            };
            assert_eq!(outcome.status, expected);
        }
        assert!(session.is_over());
        assert!(!session.is_won());
        assert_eq!(session.revealed_solution(), Some("SMOKE"));

        assert_eq!(session.submit_guess("SMOKE"), Err(GameError::GameAlreadyOver));
        assert_eq!(session.guesses().len(), MAX_GUESSES);
        assert_eq!(session.feedback().len(), MAX_GUESSES);
    }

    #[test]
    fn test_win_on_sixth_guess() {
        let levels = LevelTable::builtin();
        let mut session = GameSession::new(&levels, 1);
        for guess in &MISSES[..MAX_GUESSES - 1] {
            session.submit_guess(guess).unwrap();
        }
        let outcome = session.submit_guess("SMOKE").unwrap();
        assert_eq!(outcome.status, GameStatus::Won);
        assert_eq!(outcome.guesses_remaining, 0);
    }

    #[test]
    fn test_invalid_guesses_do_not_mutate() {
        let levels = LevelTable::builtin();
        let mut session = GameSession::new(&levels, 1);
        session.submit_guess("CRANE").unwrap();
        let before = session.clone();

        for raw in ["ABC", "ABCD5", "", "TOOLONG", "AB DE", "ÉCLAT"] {
            assert!(matches!(
                session.submit_guess(raw),
                Err(GameError::InvalidGuess(_))
            ));
        }
        assert_eq!(session.guesses(), before.guesses());
        assert_eq!(session.feedback(), before.feedback());
        assert_eq!(session.keyboard(), before.keyboard());
        assert_eq!(session.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_normalize_guess() {
        assert_eq!(normalize_guess("crane"), Ok("CRANE".to_string()));
        assert_eq!(
            normalize_guess("abc"),
            Err(GameError::InvalidGuess("ABC".to_string()))
        );
        assert!(normalize_guess(" CRANE").is_err());
    }

    #[test]
    fn test_keyboard_follows_guesses() {
        let levels = LevelTable::builtin();
        let mut session = GameSession::new(&levels, 2);
        session.submit_guess("HORSE").unwrap();
        session.submit_guess("ROUTE").unwrap();
        let keyboard = session.keyboard();
        assert_eq!(keyboard.get('H'), Some(Correct));
        assert_eq!(keyboard.get('O'), Some(Correct));
        assert_eq!(keyboard.get('R'), Some(Absent));
        assert_eq!(keyboard.get('E'), Some(Correct));
    }

    #[test]
    fn test_advance_level() {
        let levels = LevelTable::builtin();
        let mut session = GameSession::new(&levels, 1);
        assert_eq!(session.advance_level(), Err(GameError::LevelNotWon));

        session.submit_guess("SMOKE").unwrap();
        assert!(session.has_next_level());
        assert_eq!(session.advance_level(), Ok(2));
        assert_eq!(session.level(), 2);
        assert_eq!(session.status(), GameStatus::InProgress);
        assert!(session.guesses().is_empty());
        assert!(session.keyboard().is_untouched());

        session.submit_guess("HOUSE").unwrap();
        assert!(!session.has_next_level());
        assert_eq!(session.advance_level(), Err(GameError::NoNextLevel));
        assert_eq!(session.level(), 2);
        assert!(session.is_won());
    }

    #[test]
    fn test_advance_after_loss_is_rejected() {
        let levels = LevelTable::builtin();
        let mut session = GameSession::new(&levels, 1);
        for guess in MISSES {
            session.submit_guess(guess).unwrap();
        }
        assert_eq!(session.advance_level(), Err(GameError::LevelNotWon));
        assert_eq!(session.status(), GameStatus::Lost);
    }

    #[test]
    fn test_retry_and_reset() {
        let levels = LevelTable::builtin();
        let mut session = GameSession::new(&levels, 2);
        session.submit_guess("CRANE").unwrap();
        session.retry_level();
        assert_eq!(session.level(), 2);
        assert!(session.guesses().is_empty());

        session.submit_guess("CRANE").unwrap();
        session.reset();
        assert_eq!(session.level(), 1);
        assert!(session.guesses().is_empty());
        assert_eq!(session.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_out_of_range_level_uses_last_word() {
        let levels = LevelTable::builtin();
        let mut session = GameSession::new(&levels, 7);
        assert_eq!(session.level(), 7);
        session.submit_guess("HOUSE").unwrap();
        assert!(session.is_won());
        assert_eq!(session.revealed_solution(), Some("HOUSE"));
        assert!(!session.has_next_level());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GameError::InvalidGuess("ABC".into()).to_string(),
            "Guess must be 5 letters long."
        );
        assert!(GameError::NoNextLevel.to_string().contains("next level"));
    }
}

// Library interface for wordle-levels
// Integration tests drive the game through these modules

pub mod cli;
pub mod evaluator;
pub mod game_state;
pub mod keyboard;
pub mod levels;
pub mod logging;
pub mod session;
pub mod tui;

// Re-export the game core for the shells and tests
pub use evaluator::{FeedbackRow, LetterFeedback, WORD_LENGTH, evaluate};
pub use game_state::{GameInterface, UserAction, game_loop};
pub use keyboard::KeyboardState;
pub use levels::LevelTable;
pub use session::{GameError, GameSession, GameStatus, GuessOutcome, MAX_GUESSES};

use crate::evaluator::{FeedbackRow, LetterFeedback};

/// On-screen keyboard layout, top row first.
pub const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

const ALPHABET_SIZE: usize = 26;

/// Best feedback seen so far for every letter of the alphabet.
///
/// `None` means the letter has not been guessed yet. Updates only ever move a
/// key up the `Absent < Present < Correct` ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyboardState {
    keys: [Option<LetterFeedback>; ALPHABET_SIZE],
}

fn letter_index(letter: char) -> Option<usize> {
    let upper = letter.to_ascii_uppercase();
    upper
        .is_ascii_uppercase()
        .then(|| (upper as u8 - b'A') as usize)
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of `letter`, or `None` if it is unused or not a letter.
    #[must_use]
    pub fn get(&self, letter: char) -> Option<LetterFeedback> {
        letter_index(letter).and_then(|i| self.keys[i])
    }

    /// Fold one evaluated guess into the aggregate.
    pub fn record(&mut self, guess: &str, row: &FeedbackRow) {
        for (letter, &feedback) in guess.chars().zip(row) {
            if let Some(i) = letter_index(letter) {
                self.keys[i] = self.keys[i].max(Some(feedback));
            }
        }
    }

    #[must_use]
    pub fn is_untouched(&self) -> bool {
        self.keys.iter().all(Option::is_none)
    }

    /// Letters `A..=Z` paired with their state.
    pub fn iter(&self) -> impl Iterator<Item = (char, Option<LetterFeedback>)> + '_ {
        (b'A'..=b'Z').map(char::from).zip(self.keys.iter().copied())
    }
}

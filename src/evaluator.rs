//! Guess evaluation.
//!
//! Compares a guess against the level solution and produces one
//! [`LetterFeedback`] per position, using the usual two-pass matching so that
//! repeated letters are never credited more often than the solution holds them.

pub const WORD_LENGTH: usize = 5;

/// Feedback for a single tile.
///
/// Variants are declared in precedence order, so `Ord` gives the ranking used
/// when folding several guesses into the keyboard state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LetterFeedback {
    /// Letter not matchable against any unclaimed solution letter (gray)
    Absent,
    /// Letter in the solution but at another position (yellow)
    Present,
    /// Letter at the same position as in the solution (green)
    Correct,
}

impl LetterFeedback {
    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => 'X',
        }
    }
}

pub type FeedbackRow = [LetterFeedback; WORD_LENGTH];

/// Returns true when every tile of the row is green.
#[must_use]
pub fn is_solved(row: &FeedbackRow) -> bool {
    row.iter().all(|&f| f == LetterFeedback::Correct)
}

/// Render a row as a `G`/`Y`/`X` string, e.g. `GXGXX`.
#[must_use]
pub fn row_to_string(row: &FeedbackRow) -> String {
    row.iter().map(|f| f.to_char()).collect()
}

/// Evaluate `guess` against `solution`.
///
/// Both words are compared case-insensitively. Callers must pass two
/// 5-letter words; the session validates guesses before they get here.
#[must_use]
pub fn evaluate(guess: &str, solution: &str) -> FeedbackRow {
    let guess: Vec<u8> = guess.bytes().map(|b| b.to_ascii_uppercase()).collect();
    let solution: Vec<u8> = solution.bytes().map(|b| b.to_ascii_uppercase()).collect();
    debug_assert_eq!(guess.len(), WORD_LENGTH);
    debug_assert_eq!(solution.len(), WORD_LENGTH);

    let mut row = [LetterFeedback::Absent; WORD_LENGTH];
    let mut pool: [Option<u8>; WORD_LENGTH] = [None; WORD_LENGTH];
    for (slot, &letter) in pool.iter_mut().zip(&solution) {
        *slot = Some(letter);
    }

    // First pass: greens claim their own position
    for (i, (g, s)) in guess.iter().zip(&solution).enumerate().take(WORD_LENGTH) {
        if g == s {
            row[i] = LetterFeedback::Correct;
            pool[i] = None;
        }
    }

    // Second pass: yellows claim the leftmost unclaimed occurrence
    for (i, &g) in guess.iter().enumerate().take(WORD_LENGTH) {
        if row[i] == LetterFeedback::Correct {
            continue;
        }
        if let Some(slot) = pool.iter_mut().find(|slot| **slot == Some(g)) {
            row[i] = LetterFeedback::Present;
            *slot = None;
        }
    }

    row
}

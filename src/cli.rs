use crate::evaluator::{LetterFeedback, WORD_LENGTH};
use crate::game_state::{GameInterface, UserAction};
use crate::keyboard::{KEYBOARD_ROWS, KeyboardState};
use crate::session::{GameSession, MAX_GUESSES};
use clap::Parser;
use std::io::{self, BufRead};
use std::path::PathBuf;

/// Wordle with levels
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited level file, one 5-letter solution per line
    #[arg(short = 'l', long = "levels")]
    pub levels_path: Option<PathBuf>,

    /// Level to start on
    #[arg(short = 's', long = "start", default_value_t = 1)]
    pub start_level: usize,

    /// Use the line-based interface instead of the TUI
    #[arg(long)]
    pub plain: bool,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Read one line and turn it into an action. Lines starting with `:` are
/// commands; anything else is a guess. End of input exits. Bytes that are
/// not UTF-8 are decoded lossily, so a garbled line is just a bad guess.
pub fn read_action<R: BufRead>(reader: &mut R) -> Option<UserAction> {
    println!("\nEnter your guess (or :next, :retry, :reset, :quit):");
    let mut buf = Vec::new();
    match reader.read_until(b'\n', &mut buf) {
        Ok(0) => return Some(UserAction::Exit),
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::Interrupted => return None,
        Err(e) => {
            println!("Could not read input: {e}");
            return Some(UserAction::Exit);
        }
    }
    // Undecodable bytes become U+FFFD and fail guess validation downstream
    let input = String::from_utf8_lossy(&buf);
    let input = input.trim();

    match input.to_lowercase().as_str() {
        "" => None,
        ":quit" | ":q" | "exit" => Some(UserAction::Exit),
        ":next" => Some(UserAction::NextLevel),
        ":retry" => Some(UserAction::Retry),
        ":reset" => Some(UserAction::Reset),
        cmd if cmd.starts_with(':') => {
            println!("Unknown command '{cmd}'.");
            None
        }
        _ => Some(UserAction::Guess(input.to_string())),
    }
}

fn tile(letter: char, feedback: LetterFeedback) -> String {
    match feedback {
        LetterFeedback::Correct => format!("[{letter}]"),
        LetterFeedback::Present => format!("({letter})"),
        LetterFeedback::Absent => format!(" {letter} "),
    }
}

/// Six rows of five tiles: `[X]` green, `(X)` yellow, ` X ` gray, `_` empty.
#[must_use]
pub fn format_board(session: &GameSession) -> String {
    let mut lines = Vec::with_capacity(MAX_GUESSES);
    for i in 0..MAX_GUESSES {
        let line = match (session.guesses().get(i), session.feedback().get(i)) {
            (Some(guess), Some(row)) => guess
                .chars()
                .zip(row)
                .map(|(letter, &feedback)| tile(letter, feedback))
                .collect::<Vec<_>>()
                .join(" "),
            _ => vec![" _ "; WORD_LENGTH].join(" "),
        };
        lines.push(line);
    }
    lines.join("\n")
}

/// Keyboard rows with the same markers as the board, except that eliminated
/// keys are shown in lowercase. Unused keys are uppercase and unbracketed.
#[must_use]
pub fn format_keyboard(keyboard: &KeyboardState) -> String {
    KEYBOARD_ROWS
        .iter()
        .map(|row| {
            row.chars()
                .map(|letter| match keyboard.get(letter) {
                    Some(LetterFeedback::Absent) => format!(" {} ", letter.to_ascii_lowercase()),
                    Some(feedback) => tile(letter, feedback),
                    None => format!(" {letter} "),
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Line-based [`GameInterface`] over any `BufRead`.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_level_start(&mut self, session: &GameSession) {
        println!("\n=== WORDLE: Level {} of {} ===", session.level(), session.level_count());
    }

    fn display_board(&mut self, session: &GameSession) {
        println!("\n{}\n", format_board(session));
        println!("{}", format_keyboard(session.keyboard()));
    }

    fn read_action(&mut self) -> Option<UserAction> {
        read_action(&mut self.reader)
    }

    fn display_warning(&mut self, message: &str) {
        println!("Warning: {message}");
    }

    fn display_win(&mut self, session: &GameSession) {
        let solution = session.revealed_solution().unwrap_or_default();
        println!("Correct! The word was {solution}.");
        if session.has_next_level() {
            println!("Type :next for the next level.");
        } else {
            println!("Congratulations! You have completed all levels!");
        }
    }

    fn display_loss(&mut self, session: &GameSession) {
        let solution = session.revealed_solution().unwrap_or_default();
        println!("Game over! The word was {solution}.");
        println!("Type :retry to try again.");
    }

    fn display_exit_message(&mut self) {
        println!("Exiting.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LevelTable;
    use std::io::Cursor;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["wordle-levels"]);
        assert_eq!(cli.levels_path, None);
        assert_eq!(cli.start_level, 1);
        assert!(!cli.plain);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_with_options() {
        let cli = Cli::parse_from([
            "wordle-levels",
            "--levels",
            "my_levels.txt",
            "-s",
            "2",
            "--plain",
            "-v",
        ]);
        assert_eq!(cli.levels_path, Some(PathBuf::from("my_levels.txt")));
        assert_eq!(cli.start_level, 2);
        assert!(cli.plain);
        assert!(cli.verbose);
    }

    #[test]
    fn test_read_action_guess_passes_raw_text() {
        let mut reader = Cursor::new("smoke\n");
        assert_eq!(
            read_action(&mut reader),
            Some(UserAction::Guess("smoke".to_string()))
        );

        // Validation is the session's job
        let mut reader = Cursor::new("  ab5 \n");
        assert_eq!(
            read_action(&mut reader),
            Some(UserAction::Guess("ab5".to_string()))
        );
    }

    #[test]
    fn test_read_action_commands() {
        let cases = [
            (":next\n", Some(UserAction::NextLevel)),
            (":RETRY\n", Some(UserAction::Retry)),
            (":reset\n", Some(UserAction::Reset)),
            (":quit\n", Some(UserAction::Exit)),
            ("exit\n", Some(UserAction::Exit)),
            (":bogus\n", None),
            ("\n", None),
        ];
        for (input, expected) in cases {
            let mut reader = Cursor::new(input);
            assert_eq!(read_action(&mut reader), expected, "input {input:?}");
        }
    }

    #[test]
    fn test_read_action_eof_exits() {
        let mut reader = Cursor::new("");
        assert_eq!(read_action(&mut reader), Some(UserAction::Exit));
    }

    #[test]
    fn test_read_action_survives_invalid_utf8() {
        let mut reader = Cursor::new(b"\xff\xfe\x41\nSMOKE\n".to_vec());
        match read_action(&mut reader) {
            Some(UserAction::Guess(text)) => assert!(text.ends_with('A')),
            other => panic!("expected a guess, got {other:?}"),
        }
        assert_eq!(
            read_action(&mut reader),
            Some(UserAction::Guess("SMOKE".to_string()))
        );
        assert_eq!(read_action(&mut reader), Some(UserAction::Exit));
    }

    #[test]
    fn test_format_board() {
        let levels = LevelTable::builtin();
        let mut session = GameSession::new(&levels, 1);
        session.submit_guess("SPOON").unwrap();
        let board = format_board(&session);
        let lines: Vec<&str> = board.lines().collect();
        assert_eq!(lines.len(), MAX_GUESSES);
        assert_eq!(lines[0], "[S]  P  [O]  O   N ");
        assert_eq!(lines[1], " _   _   _   _   _ ");
    }

    #[test]
    fn test_format_keyboard() {
        let levels = LevelTable::builtin();
        let mut session = GameSession::new(&levels, 1);
        session.submit_guess("SPOON").unwrap();
        let keyboard = format_keyboard(session.keyboard());
        let rows: Vec<&str> = keyboard.lines().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], " Q   W   E   R   T   Y   U   I  [O]  p ");
        assert!(rows[1].starts_with(" A  [S]  D "));
        assert_eq!(rows[2], " Z   X   C   V   B   n   M ");
    }
}

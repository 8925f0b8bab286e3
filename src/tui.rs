//! TUI (Terminal User Interface) front end
//!
//! Interactive terminal interface built on Ratatui and crossterm.
//!
//! # Architecture
//! - `InputState`: terminal-independent key handling, turns key presses into
//!   [`UserAction`]s
//! - `BoardView`: snapshot of the session used for rendering
//! - `TuiInterface`: owns the terminal and implements [`GameInterface`]
//!
//! # Input modes
//! - `EnteringGuess`: letters, Backspace, Enter to submit, Ctrl-R to reset
//! - `GameOver`: N next level (after a win), T try again, R reset

use crate::evaluator::{FeedbackRow, LetterFeedback, WORD_LENGTH};
use crate::game_state::{GameInterface, UserAction};
use crate::keyboard::{KEYBOARD_ROWS, KeyboardState};
use crate::session::{GameSession, MAX_GUESSES};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const BOARD_HEIGHT: u16 = (MAX_GUESSES as u16) * 2 - 1;
const KEYBOARD_HEIGHT: u16 = (KEYBOARD_ROWS.len() as u16) * 2 - 1;

// Tile colors, matching the usual Wordle palette
const CORRECT_COLOR: Color = Color::Rgb(106, 170, 100);
const PRESENT_COLOR: Color = Color::Rgb(201, 180, 88);
const ABSENT_COLOR: Color = Color::Rgb(120, 124, 126);
const UNUSED_KEY_COLOR: Color = Color::Rgb(211, 214, 218);

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

fn tile_colors(feedback: LetterFeedback) -> (Color, Color) {
    match feedback {
        LetterFeedback::Correct => (CORRECT_COLOR, Color::White),
        LetterFeedback::Present => (PRESENT_COLOR, Color::White),
        LetterFeedback::Absent => (ABSENT_COLOR, Color::White),
    }
}

fn key_style(state: Option<LetterFeedback>) -> Style {
    let (bg, fg) = state.map_or((UNUSED_KEY_COLOR, Color::Black), tile_colors);
    Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    EnteringGuess,
    GameOver { won: bool, has_next_level: bool },
}

/// Key handling without a terminal attached.
#[derive(Debug)]
struct InputState {
    current_input: String,
    mode: InputMode,
    error_message: String,
}

impl InputState {
    fn new() -> Self {
        Self {
            current_input: String::new(),
            mode: InputMode::EnteringGuess,
            error_message: String::new(),
        }
    }

    fn start_guessing(&mut self) {
        self.current_input.clear();
        self.error_message.clear();
        self.mode = InputMode::EnteringGuess;
    }

    fn finish(&mut self, won: bool, has_next_level: bool) {
        self.current_input.clear();
        self.mode = InputMode::GameOver { won, has_next_level };
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        if key.code == KeyCode::Esc {
            info_log!("handle_key() - ESC pressed, returning Exit");
            return Some(UserAction::Exit);
        }
        match self.mode {
            InputMode::EnteringGuess => self.handle_guess_key(key),
            InputMode::GameOver {
                won,
                has_next_level,
            } => Self::handle_game_over_key(key, won && has_next_level),
        }
    }

    fn handle_guess_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        self.error_message.clear();
        debug_log!(
            "handle_guess_key() - Processing key: {:?}, current_input: '{}'",
            key.code,
            self.current_input
        );

        match key.code {
            KeyCode::Char('r' | 'R') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                info_log!("handle_guess_key() - Ctrl-R pressed, returning Reset");
                return Some(UserAction::Reset);
            }
            KeyCode::Char(_) if Self::has_modifier_keys(&key) => {
                debug_log!(
                    "handle_guess_key() - Ignoring character with modifier: {:?}",
                    key.modifiers
                );
            }
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                if self.current_input.len() < WORD_LENGTH {
                    self.current_input.push(c.to_ascii_uppercase());
                }
            }
            KeyCode::Char(c) => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
            }
            KeyCode::Backspace => {
                self.current_input.pop();
            }
            KeyCode::Enter => {
                let guess = std::mem::take(&mut self.current_input);
                info_log!("handle_guess_key() - Enter pressed, submitting '{}'", guess);
                return Some(UserAction::Guess(guess));
            }
            _ => {
                debug_log!("handle_guess_key() - Ignoring key: {:?}", key.code);
            }
        }
        None
    }

    fn handle_game_over_key(key: KeyEvent, can_advance: bool) -> Option<UserAction> {
        match key.code {
            KeyCode::Char('n' | 'N') if can_advance => Some(UserAction::NextLevel),
            KeyCode::Char('t' | 'T') => Some(UserAction::Retry),
            KeyCode::Char('r' | 'R') => Some(UserAction::Reset),
            _ => None,
        }
    }
}

/// What the board and keyboard panels need from the session.
#[derive(Debug, Clone, Default)]
struct BoardView {
    level: usize,
    level_count: usize,
    guesses: Vec<String>,
    feedback: Vec<FeedbackRow>,
    keyboard: KeyboardState,
}

impl BoardView {
    fn from_session(session: &GameSession) -> Self {
        Self {
            level: session.level(),
            level_count: session.level_count(),
            guesses: session.guesses().to_vec(),
            feedback: session.feedback().to_vec(),
            keyboard: *session.keyboard(),
        }
    }
}

fn tile_span(letter: char, style: Style) -> Span<'static> {
    Span::styled(format!(" {letter} "), style)
}

/// One line per board row, with a spacer line between rows.
fn board_lines(view: &BoardView, current_input: Option<&str>) -> Vec<Line<'static>> {
    let empty_style = Style::default().fg(Color::White).bg(Color::DarkGray);
    let mut lines = Vec::with_capacity(MAX_GUESSES * 2);

    for i in 0..MAX_GUESSES {
        let mut spans = Vec::with_capacity(WORD_LENGTH * 2);
        match (view.guesses.get(i), view.feedback.get(i)) {
            (Some(guess), Some(row)) => {
                for (letter, &feedback) in guess.chars().zip(row) {
                    let (bg, fg) = tile_colors(feedback);
                    spans.push(tile_span(
                        letter,
                        Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
                    ));
                    spans.push(Span::raw(" "));
                }
            }
            _ => {
                let typed = current_input.filter(|_| i == view.guesses.len()).unwrap_or("");
                for j in 0..WORD_LENGTH {
                    let letter = typed.chars().nth(j).unwrap_or(' ');
                    spans.push(tile_span(letter, empty_style));
                    spans.push(Span::raw(" "));
                }
            }
        }
        spans.pop();
        lines.push(Line::from(spans));
        if i + 1 < MAX_GUESSES {
            lines.push(Line::from(""));
        }
    }
    lines
}

fn keyboard_lines(keyboard: &KeyboardState) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(KEYBOARD_ROWS.len() * 2);
    for (i, row) in KEYBOARD_ROWS.iter().enumerate() {
        let mut spans = Vec::new();
        for letter in row.chars() {
            spans.push(tile_span(letter, key_style(keyboard.get(letter))));
            spans.push(Span::raw(" "));
        }
        spans.pop();
        lines.push(Line::from(spans));
        if i + 1 < KEYBOARD_ROWS.len() {
            lines.push(Line::from(""));
        }
    }
    lines
}

fn instructions_text(mode: InputMode) -> &'static str {
    match mode {
        InputMode::EnteringGuess => {
            "Type your 5-letter guess | ENTER: Submit | CTRL-R: Reset to level 1 | ESC: Quit"
        }
        InputMode::GameOver {
            won: true,
            has_next_level: true,
        } => "N: Next level | T: Try again | R: Reset to level 1 | ESC: Quit",
        InputMode::GameOver { .. } => "T: Try again | R: Reset to level 1 | ESC: Quit",
    }
}

/// Main TUI interface component.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    input: InputState,
    view: BoardView,
    message: String,
    message_style: Style,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete");

        Ok(Self {
            terminal,
            input: InputState::new(),
            view: BoardView::default(),
            message: String::new(),
            message_style: MESSAGE_STYLE,
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let view = &self.view;
        let input = &self.input;
        let message = Span::styled(self.message.as_str(), self.message_style);
        self.terminal.draw(|f| {
            Self::render(f, view, input, message);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render(f: &mut Frame, view: &BoardView, input: &InputState, message: Span) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                   // Title
                Constraint::Length(BOARD_HEIGHT + 2),    // Board
                Constraint::Length(KEYBOARD_HEIGHT + 2), // Keyboard
                Constraint::Min(3),                      // Messages
                Constraint::Length(3),                   // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0], view);
        let typing = matches!(input.mode, InputMode::EnteringGuess);
        let current = typing.then_some(input.current_input.as_str());
        Self::render_panel(f, chunks[1], "Board", board_lines(view, current));
        Self::render_panel(f, chunks[2], "Keyboard", keyboard_lines(&view.keyboard));
        Self::render_messages(f, chunks[3], message, &input.error_message);
        Self::render_instructions(f, chunks[4], input.mode);
    }

    fn render_title(f: &mut Frame, area: Rect, view: &BoardView) {
        let title = Paragraph::new(format!(
            "WORDLE - Level {} of {}",
            view.level, view.level_count
        ))
        .style(HEADER_STYLE)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_panel(f: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().title(title).borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_messages(f: &mut Frame, area: Rect, message: Span, error_message: &str) {
        let mut lines = Vec::new();
        if !message.content.is_empty() {
            lines.push(Line::from(vec![message]));
        }
        if !error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(error_message, ERROR_STYLE)]));
        }
        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Messages").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, mode: InputMode) {
        let paragraph = Paragraph::new(instructions_text(mode))
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            // Release and Repeat would double the input on some terminals
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                // Alt-tab can leak replacement or control characters
                if let KeyCode::Char(c) = key.code
                    && (c == '\u{FFFD}' || c.is_control())
                {
                    debug_log!("handle_input() - Ignoring invalid character: {:?}", c);
                    return Ok(None);
                }
                Ok(self.input.handle_key(key))
            }
            _ => {
                debug_log!("handle_input() - Ignoring non-key event");
                Ok(None)
            }
        }
    }

    fn set_message(&mut self, message: String, style: Style) {
        self.message = message;
        self.message_style = style;
    }
}

impl GameInterface for TuiInterface {
    fn display_level_start(&mut self, session: &GameSession) {
        self.input.start_guessing();
        self.view = BoardView::from_session(session);
        self.set_message(format!("Level {} - guess the word!", session.level()), MESSAGE_STYLE);
        self.draw_or_log();
    }

    fn display_board(&mut self, session: &GameSession) {
        self.view = BoardView::from_session(session);
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<UserAction> {
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }
            match self.handle_input() {
                Ok(Some(action)) => {
                    info_log!("read_action() - Action received: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {}
                Err(_e) => {
                    info_log!("read_action() - Error handling input, returning Exit");
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_warning(&mut self, message: &str) {
        self.input.error_message = message.to_string();
        self.draw_or_log();
    }

    fn display_win(&mut self, session: &GameSession) {
        let has_next_level = session.has_next_level();
        self.input.finish(true, has_next_level);
        self.view = BoardView::from_session(session);
        let solution = session.revealed_solution().unwrap_or_default();
        let message = if has_next_level {
            format!("Correct! The word was {solution}.")
        } else {
            format!("Correct! The word was {solution}. Congratulations! You have completed all levels!")
        };
        self.set_message(message, SUCCESS_STYLE);
        self.draw_or_log();
    }

    fn display_loss(&mut self, session: &GameSession) {
        self.input.finish(false, session.has_next_level());
        self.view = BoardView::from_session(session);
        let solution = session.revealed_solution().unwrap_or_default();
        self.set_message(format!("Game over! The word was {solution}."), ERROR_STYLE);
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.set_message("Exiting...".to_string(), MESSAGE_STYLE);
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

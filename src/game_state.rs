use crate::levels::LevelTable;
use crate::session::{GameError, GameSession, GameStatus};
use crate::{debug_log, info_log};

/// Something the player asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Raw text; the session validates it
    Guess(String),
    NextLevel,
    Retry,
    Reset,
    Exit,
}

/// Front end driven by [`game_loop`]. Implemented by the line-based CLI and
/// the TUI.
pub trait GameInterface {
    fn display_level_start(&mut self, session: &GameSession);
    fn display_board(&mut self, session: &GameSession);
    /// `None` means nothing actionable happened yet and the loop should redraw.
    fn read_action(&mut self) -> Option<UserAction>;
    fn display_warning(&mut self, message: &str);
    fn display_win(&mut self, session: &GameSession);
    fn display_loss(&mut self, session: &GameSession);
    fn display_exit_message(&mut self);
}

/// Play from `start_level` until the player exits. Returns the final session.
pub fn game_loop<'a, I: GameInterface + ?Sized>(
    levels: &'a LevelTable,
    start_level: usize,
    interface: &mut I,
) -> GameSession<'a> {
    let mut session = GameSession::new(levels, start_level);
    interface.display_level_start(&session);

    loop {
        interface.display_board(&session);
        let Some(action) = interface.read_action() else {
            continue;
        };
        debug_log!("game_loop() - Action: {:?}", action);

        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::Reset => {
                session.reset();
                interface.display_level_start(&session);
            }
            UserAction::Retry => {
                session.retry_level();
                interface.display_level_start(&session);
            }
            UserAction::NextLevel => match session.advance_level() {
                Ok(_) => {
                    info_log!("game_loop() - Advanced to level {}", session.level());
                    interface.display_level_start(&session);
                }
                Err(e) => interface.display_warning(&e.to_string()),
            },
            UserAction::Guess(raw) => match session.submit_guess(&raw) {
                Ok(outcome) => match outcome.status {
                    GameStatus::Won => interface.display_win(&session),
                    GameStatus::Lost => interface.display_loss(&session),
                    GameStatus::InProgress => {}
                },
                Err(GameError::GameAlreadyOver) if session.is_won() => {
                    interface.display_win(&session);
                }
                Err(GameError::GameAlreadyOver) => interface.display_loss(&session),
                Err(e) => interface.display_warning(&e.to_string()),
            },
        }
    }

    session
}

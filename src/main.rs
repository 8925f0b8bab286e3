use anyhow::{Context, Result};
use std::io;
use wordle_levels::cli::{CliInterface, parse_cli};
use wordle_levels::game_loop;
use wordle_levels::levels::LevelTable;
use wordle_levels::logging::init_logging;
use wordle_levels::tui::TuiInterface;

fn main() -> Result<()> {
    let cli = parse_cli();

    let log_path = match init_logging(cli.verbose) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Logging disabled: {e:#}");
            None
        }
    };

    let levels = LevelTable::resolve(cli.levels_path.as_deref())?;
    log::info!(
        "Loaded {} levels, starting at level {}",
        levels.len(),
        cli.start_level
    );

    if cli.plain {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock());
        game_loop(&levels, cli.start_level, &mut interface);
    } else {
        let mut interface = TuiInterface::new().context("failed to initialize terminal")?;
        let session = game_loop(&levels, cli.start_level, &mut interface);
        interface.cleanup().context("failed to restore terminal")?;
        log::info!("Exited on level {}", session.level());
    }

    if let Some(path) = log_path {
        println!("Log written to {}", path.display());
    }
    Ok(())
}

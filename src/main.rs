use anyhow::{Context, Result};
use std::io;

use combat::{GameEvent, Presentation};
use save::{AUTO_SAVE_SLOT, AutoSave, SaveSystem};
use terminal_adventure::{ConsolePresenter, GameConfig, GameSession, SessionEnd};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let config = GameConfig::from_env();
    let save_system = SaveSystem::new(&config.save_dir)
        .with_context(|| format!("Failed to open save directory {}", config.save_dir.display()))?;

    let stdin = io::stdin();
    let mut presenter = ConsolePresenter::new(stdin.lock(), io::stdout());

    // 有自动存档时直接继续
    let resumed = save_system.quick_load();
    let auto_save = AutoSave::new(save_system, config.auto_save);
    let mut session = match resumed {
        Some(state) => {
            presenter.notify(GameEvent::GameLoaded {
                slot: AUTO_SAVE_SLOT,
            });
            GameSession::resume(state, &config, auto_save, &mut presenter)
        }
        None => GameSession::new_game(&config, auto_save, &mut presenter),
    };

    match session.run() {
        SessionEnd::Quit => println!("Farewell, {}.", session.hero().name),
        SessionEnd::Defeated => println!(
            "{} has fallen at level {}. Game over.",
            session.hero().name,
            session.hero().level()
        ),
    }
    Ok(())
}

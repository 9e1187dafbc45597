use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use minesweeper_engine::Game;
use minesweeper_tui::{
    Result,
    app::run,
    config::{Config, LogConfig},
    logging::init_tracing,
    render::exit_message,
};
use tracing::{error, info};

async fn try_main() -> Result<()> {
    init_tracing(&LogConfig::from_env())?;

    if !io::stdin().is_terminal() {
        return Err("This is not a terminal, the program must be run from a terminal".into());
    }

    let config = Config::from_env()?;
    info!(
        "Starting minesweeper: {}x{} at {}% mines, seed {:?}",
        config.params.width, config.params.height, config.params.density, config.seed
    );

    let game = match config.seed {
        Some(seed) => Game::with_seed(config.params, seed)?,
        None => Game::new(config.params)?,
    };

    let last = run(game).await?;
    println!("{}", exit_message(last.status));
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match try_main().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

use std::{
    io::{self, Write},
    process::ExitCode,
};

use config::Config;
use error::AppError;
use finals_leaderboard_api::{LeaderboardApi, LeaderboardClient};
use tracing::{error, info};

mod config;
mod error;
mod logging;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;
    let api = LeaderboardClient::with_config(config.client.clone())?;

    info!(
        leaderboard = %config.leaderboard,
        name = config.player_name.as_deref(),
        variant = config.leaderboard_type.as_deref(),
        "🏆 Fetching leaderboard"
    );

    let fetched = api
        .fetch_leaderboard(
            config.leaderboard,
            config.player_name.as_deref(),
            config.leaderboard_type.as_deref(),
        )
        .await;
    api.log_metrics();
    let table = fetched?;

    info!(rows = table.len(), "Leaderboard fetched");

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &table)?;
    writeln!(stdout)?;

    Ok(())
}

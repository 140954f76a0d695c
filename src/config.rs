use std::{env, time::Duration};

use finals_leaderboard_api::{ClientConfig, Leaderboard};

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub leaderboard: Leaderboard,
    pub player_name: Option<String>,
    pub leaderboard_type: Option<String>,
    pub client: ClientConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source, empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let leaderboard = lookup("LEADERBOARD")
            .ok_or_else(|| AppError::Config("LEADERBOARD must be set".into()))?
            .parse::<Leaderboard>()
            .map_err(AppError::Config)?;

        let player_name = lookup("PLAYER_NAME");

        let leaderboard_type = lookup("LEADERBOARD_TYPE");
        if leaderboard_type.is_some() && !leaderboard.has_variants() {
            return Err(AppError::Config(format!(
                "LEADERBOARD_TYPE is not supported by the {} leaderboard",
                leaderboard
            )));
        }

        let mut client = ClientConfig::default();
        if let Some(root) = lookup("FINALS_API_ROOT") {
            client.api_root = root;
        }
        if let Some(secs) = lookup("HTTP_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|_| AppError::Config(format!("invalid HTTP_TIMEOUT_SECS: {}", secs)))?;
            client.timeout = Some(Duration::from_secs(secs));
        }

        Ok(Self {
            leaderboard,
            player_name,
            leaderboard_type,
            client,
        })
    }
}

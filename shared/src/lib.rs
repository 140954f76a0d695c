use std::fmt;

use serde::{Deserialize, Serialize};

pub mod endpoint;
pub mod errors;
pub mod table;
pub mod traits;

pub use endpoint::{FetchOptions, Leaderboard, PlatformTagging};
pub use table::{LeaderboardRow, LeaderboardTable};

/// Platforms served by the per-platform leaderboards, in merge order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Steam,
    Xbox,
    Psn,
}

impl Platform {
    /// Fixed order used when merging crossplay results.
    pub const ALL: [Platform; 3] = [Platform::Steam, Platform::Xbox, Platform::Psn];

    /// Suffix appended to a crossplay base url to target this platform.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Steam => "steam",
            Platform::Xbox => "xbox",
            Platform::Psn => "psn",
        }
    }

    /// Column holding the player's account name on this platform.
    pub fn name_column(&self) -> &'static str {
        match self {
            Platform::Steam => "steamName",
            Platform::Xbox => "xboxName",
            Platform::Psn => "psnName",
        }
    }

    /// Indicator column set when the player plays on this platform.
    pub fn user_column(&self) -> &'static str {
        match self {
            Platform::Steam => "steamUser",
            Platform::Xbox => "xboxUser",
            Platform::Psn => "psnUser",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

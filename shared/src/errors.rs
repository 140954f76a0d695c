use thiserror::Error;

use crate::Platform;

/// Low level failure of a single call to the leaderboard API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("HTTP status error: {0}")]
    Status(reqwest::StatusCode),

    #[error("Decoding raw response error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Error returned to callers of a leaderboard fetch.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Failed to fetch leaderboard data: {0}")]
    Leaderboard(#[source] ApiError),

    #[error("Failed to fetch {platform} data: {source}")]
    Platform {
        platform: Platform,
        #[source]
        source: ApiError,
    },

    #[error("A leaderboard endpoint can't be empty")]
    EmptyEndpoint,
}

impl RequestError {
    /// Platform whose request failed, if the failure happened during a crossplay merge.
    pub fn platform(&self) -> Option<Platform> {
        match self {
            RequestError::Platform { platform, .. } => Some(*platform),
            _ => None,
        }
    }

    /// HTTP status returned by the API, if the failure was a non-success response.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            RequestError::Leaderboard(ApiError::Status(status))
            | RequestError::Platform {
                source: ApiError::Status(status),
                ..
            } => Some(*status),
            _ => None,
        }
    }
}

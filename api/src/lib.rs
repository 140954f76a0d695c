//! HTTP client for THE FINALS leaderboard API.
//!
//! [`LeaderboardClient`] provides the transport; every leaderboard operation
//! comes from the [`LeaderboardApi`] trait it implements.

pub mod api;

pub use api::{
    LeaderboardClient,
    client::{ApiClientBase, ClientConfig},
    metrics::RequestMetrics,
};
pub use finals_leaderboard_shared::{
    FetchOptions, Leaderboard, LeaderboardRow, LeaderboardTable, Platform, PlatformTagging,
    errors::{ApiError, RequestError},
    traits::api::{ApiRequest, LeaderboardApi},
};

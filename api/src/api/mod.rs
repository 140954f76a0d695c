use async_trait::async_trait;
use bytes::Bytes;
use finals_leaderboard_shared::{
    errors::ApiError,
    traits::api::{ApiRequest, LeaderboardApi},
};

use client::{ApiClientBase, ClientConfig};

pub mod client;
pub mod metrics;

/// High level client implementing every leaderboard of THE FINALS API.
#[derive(Debug)]
pub struct LeaderboardClient(ApiClientBase);

impl LeaderboardClient {
    /// Create a client for the public API with default settings.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, ApiError> {
        Ok(Self(ApiClientBase::new(config)?))
    }

    /// Log how many requests this client performed and at which rate.
    pub fn log_metrics(&self) {
        self.0.metrics.log_summary();
    }

    /// Amount of HTTP requests issued so far.
    pub fn request_count(&self) -> u64 {
        self.0.metrics.count()
    }
}

#[async_trait]
impl ApiRequest for LeaderboardClient {
    async fn request(&self, url: String) -> Result<Bytes, ApiError> {
        self.0.request(url).await
    }
}

impl LeaderboardApi for LeaderboardClient {
    fn api_root(&self) -> &str {
        self.0.api_root()
    }
}

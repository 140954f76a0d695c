use std::{sync::Arc, time::Duration};

use bytes::Bytes;
use finals_leaderboard_shared::{endpoint::DEFAULT_API_ROOT, errors::ApiError};

use super::metrics::RequestMetrics;

/// Settings of the underlying HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root url of the API, without the `/leaderboard` segment.
    pub api_root: String,
    pub user_agent: String,
    /// Whole request timeout. No timeout when `None`.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: None,
        }
    }
}

#[derive(Debug)]
pub struct ApiClientBase {
    client: reqwest::Client,
    api_root: String,
    pub metrics: Arc<RequestMetrics>,
}

impl ApiClientBase {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_root: config.api_root,
            metrics: RequestMetrics::new("finals-leaderboard"),
        })
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    pub async fn request(&self, url: String) -> Result<Bytes, ApiError> {
        self.metrics.inc();

        let res = self.client.get(url).send().await?;
        let status = res.status();
        if !status.is_success() {
            tracing::debug!("[FINALS-API] {} answered {}", res.url(), status);
            return Err(ApiError::Status(status));
        }

        Ok(res.bytes().await?)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;

    use super::*;

    fn client_for(server: &MockServer) -> ApiClientBase {
        ApiClientBase::new(ClientConfig {
            api_root: server.url("/v1"),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn default_config_targets_the_public_api() {
        let config = ClientConfig::default();
        assert_eq!(config.api_root, "https://api.the-finals-leaderboard.com/v1");
        assert!(config.user_agent.starts_with("finals-leaderboard-api/"));
        assert_eq!(config.timeout, None);
    }

    #[tokio::test]
    async fn request_returns_body_and_counts() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/leaderboard/cb1");
                then.status(200).body(r#"{"data":[]}"#);
            })
            .await;
        let client = client_for(&server);

        let body = client.request(server.url("/v1/leaderboard/cb1")).await.unwrap();

        assert_eq!(&body[..], br#"{"data":[]}"#);
        assert_eq!(client.metrics.count(), 1);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn request_maps_non_success_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/leaderboard/cb2");
                then.status(503);
            })
            .await;
        let client = client_for(&server);

        let res = client.request(server.url("/v1/leaderboard/cb2")).await;

        assert!(matches!(res, Err(ApiError::Status(s)) if s.as_u16() == 503));
    }

    #[tokio::test]
    async fn request_propagates_reqwest_error() {
        let client = ApiClientBase::new(ClientConfig::default()).unwrap();

        let bad_url = "ht!tp://invalid-url".to_string(); // incorrect schema

        let res = client.request(bad_url).await;

        assert!(matches!(res, Err(ApiError::Reqwest(_))));
    }
}

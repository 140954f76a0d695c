pub mod api {
    use std::fmt::Debug;

    use async_trait::async_trait;
    use bytes::Bytes;
    use futures::future::try_join_all;
    use serde::Deserialize;

    use crate::{
        Leaderboard, LeaderboardRow, LeaderboardTable, Platform,
        endpoint::{self, FetchOptions},
        errors::{ApiError, RequestError},
    };

    /// Trait implemented by structures capable of performing raw HTTP GET requests
    /// to the leaderboard API.
    #[async_trait]
    pub trait ApiRequest: Send + Sync + Debug {
        async fn request(&self, url: String) -> Result<Bytes, ApiError>;
    }

    #[derive(Deserialize)]
    struct Envelope<T> {
        data: T,
    }

    #[derive(Deserialize)]
    struct CommunityEventData {
        entries: Vec<LeaderboardRow>,
    }

    /// Extract the rows of a raw response body.
    pub fn decode_rows(
        raw: &[u8],
        community_event: bool,
    ) -> Result<Vec<LeaderboardRow>, ApiError> {
        if community_event {
            let body: Envelope<CommunityEventData> = serde_json::from_slice(raw)?;
            Ok(body.data.entries)
        } else {
            let body: Envelope<Vec<LeaderboardRow>> = serde_json::from_slice(raw)?;
            Ok(body.data)
        }
    }

    async fn request_rows<A: ApiRequest + ?Sized>(
        api: &A,
        url: String,
        community_event: bool,
    ) -> Result<Vec<LeaderboardRow>, ApiError> {
        let raw = api.request(url).await?;
        decode_rows(&raw, community_event)
    }

    /// THE FINALS leaderboard API.
    ///
    /// Everything is built on top of [`ApiRequest::request`], implementors only
    /// provide the transport and the api root.
    #[async_trait]
    pub trait LeaderboardApi: ApiRequest {
        /// Root url of the API, e.g. `https://api.the-finals-leaderboard.com/v1`.
        fn api_root(&self) -> &str;

        async fn fetch(
            &self,
            endpoint: &str,
            options: FetchOptions,
        ) -> Result<LeaderboardTable, RequestError> {
            if endpoint.trim().is_empty() {
                return Err(RequestError::EmptyEndpoint);
            }

            if options.crossplay {
                return self.fetch_crossplay(endpoint, options).await;
            }

            let url = endpoint::leaderboard_url(self.api_root(), endpoint, &options);
            tracing::trace!("[FINALS-API] fetch {}", url);

            let rows = request_rows(self, url, options.community_event)
                .await
                .map_err(RequestError::Leaderboard)?;
            let table = LeaderboardTable::new(rows);

            if options.process_data {
                Ok(table.derive_indicator_columns())
            } else {
                Ok(table)
            }
        }

        /// Fetch the steam, xbox and psn parts of a leaderboard and merge them.
        async fn fetch_crossplay(
            &self,
            endpoint: &str,
            options: FetchOptions,
        ) -> Result<LeaderboardTable, RequestError> {
            let base = endpoint::base_url(self.api_root(), endpoint, &options);
            if options.process_data {
                tracing::debug!(
                    "[FINALS-API] indicator columns are not derived for crossplay merges"
                );
            }

            let parts = try_join_all(Platform::ALL.map(|platform| {
                let url = endpoint::platform_url(&base, platform, &options);
                async move {
                    tracing::trace!("[FINALS-API] fetch {} part {}", platform, url);
                    request_rows(self, url, false)
                        .await
                        .map(|rows| (platform, rows))
                        .map_err(|source| RequestError::Platform { platform, source })
                }
            }))
            .await?;

            let table =
                LeaderboardTable::merge_crossplay(parts, options.sort_key(), options.tagging);
            tracing::debug!(
                "[FINALS-API] merged {} crossplay rows from {}",
                table.len(),
                base
            );

            Ok(table)
        }

        /// Fetch one of the known leaderboards.
        ///
        /// `kind` is only used by leaderboards having variants.
        async fn fetch_leaderboard(
            &self,
            leaderboard: Leaderboard,
            name: Option<&str>,
            kind: Option<&str>,
        ) -> Result<LeaderboardTable, RequestError> {
            let mut options = leaderboard.options().with_name(name);
            if leaderboard.has_variants() {
                options = options.with_kind(kind);
            } else if kind.is_some_and(|k| !k.is_empty()) {
                tracing::warn!(
                    "[FINALS-API] {} has no variants, ignoring {:?}",
                    leaderboard,
                    kind
                );
            }
            self.fetch(leaderboard.endpoint(), options).await
        }

        async fn get_cb1_leaderboard(
            &self,
            name: Option<&str>,
        ) -> Result<LeaderboardTable, RequestError> {
            self.fetch_leaderboard(Leaderboard::ClosedBeta1, name, None).await
        }

        async fn get_cb2_leaderboard(
            &self,
            name: Option<&str>,
        ) -> Result<LeaderboardTable, RequestError> {
            self.fetch_leaderboard(Leaderboard::ClosedBeta2, name, None).await
        }

        async fn get_ob_leaderboard(
            &self,
            name: Option<&str>,
        ) -> Result<LeaderboardTable, RequestError> {
            self.fetch_leaderboard(Leaderboard::OpenBeta, name, None).await
        }

        async fn get_s1_leaderboard(
            &self,
            name: Option<&str>,
        ) -> Result<LeaderboardTable, RequestError> {
            self.fetch_leaderboard(Leaderboard::Season1, name, None).await
        }

        async fn get_s2_leaderboard(
            &self,
            name: Option<&str>,
        ) -> Result<LeaderboardTable, RequestError> {
            self.fetch_leaderboard(Leaderboard::Season2, name, None).await
        }

        async fn get_s3_leaderboard(
            &self,
            name: Option<&str>,
            kind: Option<&str>,
        ) -> Result<LeaderboardTable, RequestError> {
            self.fetch_leaderboard(Leaderboard::Season3, name, kind).await
        }

        async fn get_s4_leaderboard(
            &self,
            name: Option<&str>,
            kind: Option<&str>,
        ) -> Result<LeaderboardTable, RequestError> {
            self.fetch_leaderboard(Leaderboard::Season4, name, kind).await
        }

        async fn get_s5_leaderboard(
            &self,
            name: Option<&str>,
            kind: Option<&str>,
        ) -> Result<LeaderboardTable, RequestError> {
            self.fetch_leaderboard(Leaderboard::Season5, name, kind).await
        }

        async fn get_s6_leaderboard(
            &self,
            name: Option<&str>,
            kind: Option<&str>,
        ) -> Result<LeaderboardTable, RequestError> {
            self.fetch_leaderboard(Leaderboard::Season6, name, kind).await
        }

        async fn get_the_finals_leaderboard(
            &self,
            name: Option<&str>,
        ) -> Result<LeaderboardTable, RequestError> {
            self.fetch_leaderboard(Leaderboard::TheFinals, name, None).await
        }

        async fn get_orf_leaderboard(
            &self,
            name: Option<&str>,
        ) -> Result<LeaderboardTable, RequestError> {
            self.fetch_leaderboard(Leaderboard::Orf, name, None).await
        }

        async fn get_ce44_leaderboard(
            &self,
            name: Option<&str>,
        ) -> Result<LeaderboardTable, RequestError> {
            self.fetch_leaderboard(Leaderboard::CommunityEvent44, name, None).await
        }

        async fn get_ce48_leaderboard(
            &self,
            name: Option<&str>,
        ) -> Result<LeaderboardTable, RequestError> {
            self.fetch_leaderboard(Leaderboard::CommunityEvent48, name, None).await
        }
    }

}

use async_trait::async_trait;
use reqwest::Url;

#[cfg(test)]
use mockall::automock;

use crate::api::fetcher::Fetcher;
use crate::models::{ClientError, LeaderboardEntry, Result};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait LeaderboardApi: Send + Sync {
    /// Number of participants across the whole leaderboard
    async fn total_participants(&self) -> Result<u64>;

    /// The single entry standing at `rank`
    async fn entry_at_rank(&self, rank: u64) -> Result<LeaderboardEntry>;

    /// Total score of the entry at `rank`, truncated to an integer
    async fn total_score_at_rank(&self, rank: u64) -> Result<i64>;
}

/// Leaderboard API client. Pagination doubles as rank lookup: page N with
/// size 1 holds exactly the Nth-ranked entry.
#[derive(Clone)]
pub struct LeaderboardClient {
    fetcher: Fetcher,
    base_url: Url,
}

impl LeaderboardClient {
    pub fn new(fetcher: Fetcher, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self { fetcher, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn rank_url(&self, rank: u64) -> String {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("page", &rank.to_string())
            .append_pair("size", "1");
        url.to_string()
    }
}

#[async_trait]
impl LeaderboardApi for LeaderboardClient {
    async fn total_participants(&self) -> Result<u64> {
        let response = self.fetcher.fetch(self.base_url.as_str()).await?;
        Ok(response.data.total)
    }

    async fn entry_at_rank(&self, rank: u64) -> Result<LeaderboardEntry> {
        let response = self.fetcher.fetch(&self.rank_url(rank)).await?;

        response
            .data
            .entries
            .into_iter()
            .next()
            .ok_or(ClientError::EmptyResult { rank })
    }

    async fn total_score_at_rank(&self, rank: u64) -> Result<i64> {
        let entry = self.entry_at_rank(rank).await?;
        Ok(entry.total_points())
    }
}

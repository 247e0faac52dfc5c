use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One participant as reported by the leaderboard API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u64,
    pub address: String,
    pub score: f64,
    pub multiplier: u32,
    /// Server-computed `score * multiplier`; never recomputed locally.
    #[serde(rename = "totalScore")]
    pub total_score: f64,
}

impl LeaderboardEntry {
    /// Total score truncated toward zero.
    pub fn total_points(&self) -> i64 {
        self.total_score.trunc() as i64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageEnvelope {
    #[serde(rename = "items", default)]
    pub entries: Vec<LeaderboardEntry>,
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub size: u64,
    pub total: u64,
    #[serde(default)]
    pub total_pages: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub data: PageEnvelope,
    #[serde(rename = "lastUpdated", default)]
    pub last_updated: i64,
}

impl ApiResponse {
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.last_updated)
    }

    pub fn first_entry(&self) -> Option<&LeaderboardEntry> {
        self.data.entries.first()
    }
}

//! Resolves the point thresholds at fixed percentile cutoffs of a remote
//! leaderboard: one totals lookup, then a concurrent rank lookup per
//! percentile through a retrying HTTP fetcher.

pub mod models;
pub mod config;
pub mod api;
pub mod resolver;

pub use models::{ApiResponse, ClientError, Cutoff, CutoffReport, FetchError, LeaderboardEntry, ResolveError, TransportError};
pub use config::Settings;
pub use api::{Fetcher, LeaderboardApi, LeaderboardClient, ReqwestTransport, RetryPolicy};
pub use resolver::PercentileResolver;

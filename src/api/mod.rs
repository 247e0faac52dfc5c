pub mod client;
pub mod fetcher;
pub mod resilience;
pub mod transport;

pub use client::{LeaderboardApi, LeaderboardClient};
pub use fetcher::Fetcher;
pub use resilience::{retry_with_backoff, retry_with_backoff_if, RetryPolicy};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};

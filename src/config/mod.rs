pub mod settings;

pub use settings::{AppSettings, LeaderboardSettings, RetrySettings, Settings, DEFAULT_BASE_URL};

pub mod error;
pub mod leaderboard;
pub mod percentile;

pub use error::*;
pub use leaderboard::*;
pub use percentile::*;

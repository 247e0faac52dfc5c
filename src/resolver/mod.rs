pub mod percentile;

pub use percentile::PercentileResolver;

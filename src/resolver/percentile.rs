use futures::future::join_all;
use std::sync::Arc;
use tracing::{error, info};

use crate::api::LeaderboardApi;
use crate::models::{is_valid_percentile, rank_for, Cutoff, CutoffReport, ResolveError};

/// Resolves percentile cutoffs into point thresholds.
///
/// The total participant count is fetched first; then every percentile gets
/// its own spawned lookup task. Tasks only read the total and each returns
/// the value for its own slot, so results are placed by dispatch index no
/// matter which task finishes first. All tasks are joined before anything is
/// reported, and any failure discards the whole result.
pub struct PercentileResolver {
    client: Arc<dyn LeaderboardApi>,
}

impl PercentileResolver {
    pub fn new(client: Arc<dyn LeaderboardApi>) -> Self {
        Self { client }
    }

    /// Point threshold for each percentile, in input order.
    pub async fn resolve(&self, percentiles: &[f64]) -> Result<Vec<i64>, ResolveError> {
        Ok(self.resolve_report(percentiles).await?.points())
    }

    pub async fn resolve_report(&self, percentiles: &[f64]) -> Result<CutoffReport, ResolveError> {
        if let Some((index, value)) = percentiles
            .iter()
            .enumerate()
            .find(|(_, p)| !is_valid_percentile(**p))
        {
            return Err(ResolveError::InvalidPercentile { index, value: *value });
        }

        info!("Fetching total participant count");
        let total = self
            .client
            .total_participants()
            .await
            .map_err(ResolveError::TotalsUnavailable)?;

        info!("Dispatching {} rank lookups for {} participants", percentiles.len(), total);
        let ranks: Vec<u64> = percentiles.iter().map(|p| rank_for(total, *p)).collect();

        let tasks = ranks.iter().map(|&rank| {
            let client = self.client.clone();
            tokio::spawn(async move { client.total_score_at_rank(rank).await })
        });

        let outcomes = join_all(tasks).await;

        let mut cutoffs = Vec::with_capacity(percentiles.len());
        let mut first_error = None;

        // The lowest-index failure is the one reported.
        for ((outcome, &rank), &percentile) in outcomes.into_iter().zip(&ranks).zip(percentiles) {
            if first_error.is_some() {
                continue;
            }
            match outcome {
                Ok(Ok(total_points)) => cutoffs.push(Cutoff {
                    percentile,
                    rank,
                    total_points,
                }),
                Ok(Err(source)) => {
                    first_error = Some(ResolveError::LookupFailed {
                        rank,
                        percentile,
                        source,
                    })
                }
                Err(join_error) => {
                    first_error = Some(ResolveError::TaskAborted {
                        rank,
                        percentile,
                        message: join_error.to_string(),
                    })
                }
            }
        }

        if let Some(err) = first_error {
            error!("Error calculating points: {}", err);
            return Err(err);
        }

        info!("Resolved {} cutoffs", cutoffs.len());
        Ok(CutoffReport {
            total_participants: total,
            cutoffs,
        })
    }
}

// Repository trait for run snapshot access
use crate::domain::metric::TimePeriod;
use crate::domain::snapshot::RunSnapshot;
use async_trait::async_trait;

/// Source of snapshot sequences: a telemetry store in production, a seeded
/// generator in development and tests. Implementations must return snapshots
/// in chronological order, oldest first; the analyzer never re-sorts.
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// List all runner IDs known to the store.
    async fn list_runner_ids(&self) -> anyhow::Result<Vec<String>>;

    /// Fetch one runner's snapshots for the trailing window selected by
    /// `period`, time-ordered ascending. An unknown runner yields an empty
    /// sequence, not an error.
    async fn fetch_snapshots(
        &self,
        runner_id: &str,
        period: TimePeriod,
    ) -> anyhow::Result<Vec<RunSnapshot>>;
}

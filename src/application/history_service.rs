// History service - Use case for building a runner's history overview
use crate::application::snapshot_repository::SnapshotRepository;
use crate::application::trend_analyzer::{average_for_metric, generate_insights, stats_for_metric};
use crate::domain::history::{HistoryOverview, MetricSummary};
use crate::domain::metric::{EnabledMetrics, Insight, MetricType, TimePeriod};
use crate::domain::runner::Runner;
use std::sync::Arc;

#[derive(Clone)]
pub struct HistoryService {
    repository: Arc<dyn SnapshotRepository>,
}

impl HistoryService {
    pub fn new(repository: Arc<dyn SnapshotRepository>) -> Self {
        Self { repository }
    }

    /// Build the history overview for one runner: fresh snapshots for the
    /// period, stats for the enabled metrics, the full insight list. Nothing
    /// is cached; every call recomputes from the sequence it loaded.
    pub async fn overview(
        &self,
        runner_id: &str,
        period: TimePeriod,
        enabled: &EnabledMetrics,
    ) -> anyhow::Result<HistoryOverview> {
        let runner = Runner::new(runner_id.to_string());
        let snapshots = self.repository.fetch_snapshots(runner_id, period).await?;
        tracing::debug!(
            "Loaded {} snapshots for runner {} ({})",
            snapshots.len(),
            runner.id,
            period.label()
        );

        let title = format!("{} ({})", runner.name, period.label());
        let metrics = MetricType::ALL
            .into_iter()
            .filter(|m| enabled.contains(*m))
            .map(|m| MetricSummary::new(m, stats_for_metric(m, &snapshots)))
            .collect();
        let insights = generate_insights(&snapshots);

        Ok(HistoryOverview::new(
            title,
            snapshots.len(),
            metrics,
            insights,
        ))
    }

    /// Average of one metric over the period. Zero when the runner has no
    /// snapshots in the window.
    pub async fn metric_average(
        &self,
        runner_id: &str,
        metric: MetricType,
        period: TimePeriod,
    ) -> anyhow::Result<i32> {
        let snapshots = self.repository.fetch_snapshots(runner_id, period).await?;
        Ok(average_for_metric(metric, &snapshots))
    }

    /// Insights only, for clients that don't need the stats table.
    pub async fn insights(
        &self,
        runner_id: &str,
        period: TimePeriod,
    ) -> anyhow::Result<Vec<Insight>> {
        let snapshots = self.repository.fetch_snapshots(runner_id, period).await?;
        Ok(generate_insights(&snapshots))
    }
}

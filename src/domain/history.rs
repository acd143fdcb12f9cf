// History overview domain model
use super::metric::{Insight, MetricStats, MetricType};
use serde::Serialize;

/// Stats for one metric, labelled for display.
#[derive(Debug, Clone, Serialize)]
pub struct MetricSummary {
    pub metric: MetricType,
    pub display_name: &'static str,
    pub stats: MetricStats,
}

impl MetricSummary {
    pub fn new(metric: MetricType, stats: MetricStats) -> Self {
        Self {
            metric,
            display_name: metric.display_name(),
            stats,
        }
    }
}

/// Everything a client needs to render one runner's history view: labelled
/// stats for the enabled metrics plus the derived insight list.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryOverview {
    pub title: String,
    pub snapshot_count: usize,
    pub metrics: Vec<MetricSummary>,
    pub insights: Vec<Insight>,
}

impl HistoryOverview {
    pub fn new(
        title: String,
        snapshot_count: usize,
        metrics: Vec<MetricSummary>,
        insights: Vec<Insight>,
    ) -> Self {
        Self {
            title,
            snapshot_count,
            metrics,
            insights,
        }
    }
}

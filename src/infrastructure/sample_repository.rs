// Seeded sample snapshot repository
//
// Stand-in for the telemetry store during development and demos. Sequences
// are a deterministic function of (seed, runner id, day count): each metric
// follows a gentle drift with per-day jitter, clamped to the 0-100 scale.
use crate::application::snapshot_repository::SnapshotRepository;
use crate::domain::metric::{MetricType, TimePeriod};
use crate::domain::snapshot::RunSnapshot;
use anyhow::Result;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

const MS_PER_DAY: i64 = 86_400_000;

/// Day count substituted for the unbounded period.
const UNBOUNDED_PERIOD_DAYS: i64 = 180;

#[derive(Debug, Clone)]
pub struct SampleSnapshotRepository {
    seed: u64,
    runners: Vec<String>,
}

impl SampleSnapshotRepository {
    pub fn new(seed: u64, runners: Vec<String>) -> Self {
        Self { seed, runners }
    }

    fn runner_seed(&self, runner_id: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        runner_id.hash(&mut hasher);
        self.seed ^ hasher.finish()
    }

    /// One snapshot per day, ending at `end_ms`, oldest first.
    fn generate_series(runner_seed: u64, end_ms: i64, days: i64) -> Vec<RunSnapshot> {
        let mut rng = StdRng::seed_from_u64(runner_seed);

        // Per-metric starting level and a slow per-day drift. Some metrics
        // trend up, some down, most barely move, so the analyzer has real
        // variety to classify.
        let baselines: Vec<f64> = (0..MetricType::ALL.len())
            .map(|_| rng.gen_range(45.0..80.0))
            .collect();
        let drifts: Vec<f64> = (0..MetricType::ALL.len())
            .map(|_| rng.gen_range(-0.25..0.25))
            .collect();

        (0..days)
            .map(|day| {
                let mut values = [0i32; 7];
                for (i, slot) in values.iter_mut().enumerate() {
                    let jitter: f64 = rng.gen_range(-6.0..6.0);
                    let raw = baselines[i] + drifts[i] * day as f64 + jitter;
                    *slot = (raw.round() as i32).clamp(0, 100);
                }
                let recorded_at_ms = end_ms - (days - 1 - day) * MS_PER_DAY;
                RunSnapshot::new(
                    recorded_at_ms,
                    values[0],
                    values[1],
                    values[2],
                    values[3],
                    values[4],
                    values[5],
                    values[6],
                )
            })
            .collect()
    }
}

#[async_trait]
impl SnapshotRepository for SampleSnapshotRepository {
    async fn list_runner_ids(&self) -> Result<Vec<String>> {
        Ok(self.runners.clone())
    }

    async fn fetch_snapshots(
        &self,
        runner_id: &str,
        period: TimePeriod,
    ) -> Result<Vec<RunSnapshot>> {
        if !self.runners.iter().any(|r| r == runner_id) {
            return Ok(Vec::new());
        }

        let days = period.days().unwrap_or(UNBOUNDED_PERIOD_DAYS);
        let end_ms = chrono::Utc::now().timestamp_millis();
        Ok(Self::generate_series(
            self.runner_seed(runner_id),
            end_ms,
            days,
        ))
    }
}

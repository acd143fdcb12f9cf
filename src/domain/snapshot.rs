// Run snapshot domain model
use super::metric::MetricType;
use serde::Serialize;

/// One per-run observation: a timestamp plus a 0-100 score for every tracked
/// metric. Immutable once created; sequences are chronological, oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSnapshot {
    pub recorded_at_ms: i64,
    pub efficiency: i32,
    pub braking: i32,
    pub impact: i32,
    pub sway: i32,
    pub variation: i32,
    pub warmup: i32,
    pub endurance: i32,
}

impl RunSnapshot {
    pub fn new(
        recorded_at_ms: i64,
        efficiency: i32,
        braking: i32,
        impact: i32,
        sway: i32,
        variation: i32,
        warmup: i32,
        endurance: i32,
    ) -> Self {
        Self {
            recorded_at_ms,
            efficiency,
            braking,
            impact,
            sway,
            variation,
            warmup,
            endurance,
        }
    }

    pub fn value(&self, metric: MetricType) -> i32 {
        match metric {
            MetricType::Efficiency => self.efficiency,
            MetricType::Braking => self.braking,
            MetricType::Impact => self.impact,
            MetricType::Sway => self.sway,
            MetricType::Variation => self.variation,
            MetricType::Warmup => self.warmup,
            MetricType::Endurance => self.endurance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessor_covers_every_metric() {
        let snapshot = RunSnapshot::new(0, 1, 2, 3, 4, 5, 6, 7);
        let expected = [1, 2, 3, 4, 5, 6, 7];

        for (metric, want) in MetricType::ALL.into_iter().zip(expected) {
            assert_eq!(snapshot.value(metric), want);
        }
    }
}

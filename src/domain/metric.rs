// Metric domain models - tracked metrics, derived stats, insights
use serde::Serialize;
use std::collections::BTreeSet;

/// The seven tracked force-portrait metrics, all scored 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    Efficiency,
    Braking,
    Impact,
    Sway,
    Variation,
    Warmup,
    Endurance,
}

impl MetricType {
    /// All metrics in declaration order. Insight generation iterates this
    /// order, so it also fixes the ordering of per-metric insights.
    pub const ALL: [MetricType; 7] = [
        MetricType::Efficiency,
        MetricType::Braking,
        MetricType::Impact,
        MetricType::Sway,
        MetricType::Variation,
        MetricType::Warmup,
        MetricType::Endurance,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            MetricType::Efficiency => "Efficiency",
            MetricType::Braking => "Braking",
            MetricType::Impact => "Impact",
            MetricType::Sway => "Sway",
            MetricType::Variation => "Variation",
            MetricType::Warmup => "Warm-up",
            MetricType::Endurance => "Endurance",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            MetricType::Efficiency => "efficiency",
            MetricType::Braking => "braking",
            MetricType::Impact => "impact",
            MetricType::Sway => "sway",
            MetricType::Variation => "variation",
            MetricType::Warmup => "warmup",
            MetricType::Endurance => "endurance",
        }
    }

    pub fn from_slug(slug: &str) -> Option<MetricType> {
        MetricType::ALL.into_iter().find(|m| m.slug() == slug)
    }
}

/// Qualitative direction of change between the first and second half of a
/// metric's value sequence. Percent payloads are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "direction", content = "percent", rename_all = "snake_case")]
pub enum Trend {
    Improving(i32),
    Declining(i32),
    Stable,
}

/// Summary statistics for one metric over a snapshot sequence. Derived and
/// ephemeral; recomputed from the sequence on every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricStats {
    pub average: i32,
    pub best: i32,
    pub worst: i32,
    pub range: i32,
    pub consistency: i32,
    pub trend: Trend,
}

impl MetricStats {
    /// Stats for a metric with no data. Everything zero, trend stable.
    pub fn empty() -> Self {
        Self {
            average: 0,
            best: 0,
            worst: 0,
            range: 0,
            consistency: 0,
            trend: Trend::Stable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightSeverity {
    Positive,
    Info,
    Warning,
    Neutral,
}

/// A human-readable observation synthesized from metric trends. Produced per
/// request and handed to the client; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub icon: &'static str,
    pub title: String,
    pub message: String,
    pub severity: InsightSeverity,
}

impl Insight {
    pub fn improving(metric: MetricType, percent: i32) -> Self {
        Self {
            icon: "arrow.up.circle.fill",
            title: format!("{} improving", metric.display_name()),
            message: format!(
                "{} is up {}% across this period. Keep doing what you're doing.",
                metric.display_name(),
                percent
            ),
            severity: InsightSeverity::Positive,
        }
    }

    pub fn declining(metric: MetricType, percent: i32) -> Self {
        Self {
            icon: "arrow.down.circle.fill",
            title: format!("{} declining", metric.display_name()),
            message: format!(
                "{} is down {}% across this period. Worth attention in your next sessions.",
                metric.display_name(),
                percent
            ),
            severity: InsightSeverity::Warning,
        }
    }

    pub fn excellent_consistency(mean_consistency: i32) -> Self {
        Self {
            icon: "star.circle.fill",
            title: "Excellent consistency".to_string(),
            message: format!(
                "Your form holds steady from run to run. Average consistency is {}%.",
                mean_consistency
            ),
            severity: InsightSeverity::Info,
        }
    }

    pub fn keep_training() -> Self {
        Self {
            icon: "figure.run",
            title: "Keep training".to_string(),
            message: "No strong movement in your metrics yet. Log more runs to unlock trends."
                .to_string(),
            severity: InsightSeverity::Neutral,
        }
    }
}

/// Trailing window of data considered by a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimePeriod {
    #[default]
    Week,
    Month,
    Quarter,
    Year,
    All,
}

impl TimePeriod {
    /// Trailing day count, or None for an unbounded window.
    pub fn days(self) -> Option<i64> {
        match self {
            TimePeriod::Week => Some(7),
            TimePeriod::Month => Some(30),
            TimePeriod::Quarter => Some(90),
            TimePeriod::Year => Some(365),
            TimePeriod::All => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimePeriod::Week => "last 7 days",
            TimePeriod::Month => "last 30 days",
            TimePeriod::Quarter => "last 90 days",
            TimePeriod::Year => "last 365 days",
            TimePeriod::All => "all time",
        }
    }

    pub fn from_slug(slug: &str) -> Option<TimePeriod> {
        match slug {
            "week" => Some(TimePeriod::Week),
            "month" => Some(TimePeriod::Month),
            "quarter" => Some(TimePeriod::Quarter),
            "year" => Some(TimePeriod::Year),
            "all" => Some(TimePeriod::All),
            _ => None,
        }
    }
}

/// The set of metrics enabled for display. A plain value: toggling produces
/// a new set instead of mutating shared state, so callers thread it through
/// requests explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnabledMetrics(BTreeSet<MetricType>);

impl EnabledMetrics {
    pub fn all() -> Self {
        Self(MetricType::ALL.into_iter().collect())
    }

    pub fn from_metrics<I: IntoIterator<Item = MetricType>>(metrics: I) -> Self {
        Self(metrics.into_iter().collect())
    }

    /// Flip membership of one metric, returning the resulting set.
    pub fn toggle(&self, metric: MetricType) -> Self {
        let mut set = self.0.clone();
        if !set.remove(&metric) {
            set.insert(metric);
        }
        Self(set)
    }

    pub fn contains(&self, metric: MetricType) -> bool {
        self.0.contains(&metric)
    }
}

impl Default for EnabledMetrics {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_slug_round_trip() {
        for metric in MetricType::ALL {
            assert_eq!(MetricType::from_slug(metric.slug()), Some(metric));
        }
        assert_eq!(MetricType::from_slug("cadence"), None);
    }

    #[test]
    fn test_period_days() {
        assert_eq!(TimePeriod::Week.days(), Some(7));
        assert_eq!(TimePeriod::Month.days(), Some(30));
        assert_eq!(TimePeriod::Quarter.days(), Some(90));
        assert_eq!(TimePeriod::Year.days(), Some(365));
        assert_eq!(TimePeriod::All.days(), None);
        assert_eq!(TimePeriod::from_slug("month"), Some(TimePeriod::Month));
        assert_eq!(TimePeriod::from_slug("fortnight"), None);
    }

    #[test]
    fn test_toggle_returns_new_value() {
        let all = EnabledMetrics::all();
        let without_sway = all.toggle(MetricType::Sway);

        assert!(all.contains(MetricType::Sway));
        assert!(!without_sway.contains(MetricType::Sway));

        let back = without_sway.toggle(MetricType::Sway);
        assert_eq!(back, all);
    }

    #[test]
    fn test_enabled_metrics_default_is_all() {
        let enabled = EnabledMetrics::default();
        for metric in MetricType::ALL {
            assert!(enabled.contains(metric));
        }
    }
}

// Trend analyzer - pure statistics over a chronological snapshot sequence
//
// Every function here is total: empty sequences, single points, and zero
// averages fall back to 0 / Stable / a guaranteed non-empty insight list.
// Inputs are assumed already time-ordered ascending; nothing here re-sorts.
use crate::domain::metric::{Insight, MetricStats, MetricType, Trend};
use crate::domain::snapshot::RunSnapshot;

/// Half-to-half change below this magnitude (in percent) counts as stable.
pub const TREND_SENSITIVITY_PCT: i32 = 3;

/// A trend only becomes an insight when its magnitude exceeds this.
pub const INSIGHT_TREND_PCT: i32 = 5;

/// Mean per-metric consistency at or above this earns the consistency insight.
pub const CONSISTENCY_BAR: i32 = 75;

/// Truncating integer average of one metric across all snapshots. Zero for an
/// empty sequence.
pub fn average_for_metric(metric: MetricType, points: &[RunSnapshot]) -> i32 {
    let values: Vec<i32> = points.iter().map(|p| p.value(metric)).collect();
    average(&values)
}

/// Full stats for one metric: average, best, worst, range, consistency and
/// the half-to-half trend. A metric with no data gets zeroed stats with a
/// stable trend rather than an error.
pub fn stats_for_metric(metric: MetricType, points: &[RunSnapshot]) -> MetricStats {
    let values: Vec<i32> = points.iter().map(|p| p.value(metric)).collect();
    if values.is_empty() {
        return MetricStats::empty();
    }

    let average = average(&values);
    let best = values.iter().copied().max().unwrap_or(0);
    let worst = values.iter().copied().min().unwrap_or(0);
    let range = best - worst;
    // Inverse-volatility score, floored so a pathological range never goes
    // negative.
    let consistency = (100 - range).max(0);

    MetricStats {
        average,
        best,
        worst,
        range,
        consistency,
        trend: calculate_trend(&values),
    }
}

/// Classify a chronological value sequence by comparing the average of its
/// first floor(n/2) values against its last floor(n/2) values. For odd n the
/// middle element belongs to neither half.
pub fn calculate_trend(values: &[i32]) -> Trend {
    if values.len() < 2 {
        return Trend::Stable;
    }

    let half = values.len() / 2;
    let first = &values[..half];
    let second = &values[values.len() - half..];
    if first.is_empty() || second.is_empty() {
        return Trend::Stable;
    }

    let first_avg = average(first);
    let second_avg = average(second);
    if first_avg == 0 {
        return Trend::Stable;
    }

    let percent_change = (second_avg - first_avg) * 100 / first_avg;
    if percent_change > TREND_SENSITIVITY_PCT {
        Trend::Improving(percent_change)
    } else if percent_change < -TREND_SENSITIVITY_PCT {
        Trend::Declining(percent_change.abs())
    } else {
        Trend::Stable
    }
}

/// Derive the prioritized insight list: per-metric trend insights in metric
/// declaration order, then the consistency insight, then a single fallback
/// when nothing else fired. Never returns an empty list.
pub fn generate_insights(points: &[RunSnapshot]) -> Vec<Insight> {
    let mut insights = Vec::new();
    let mut consistency_total = 0;

    for metric in MetricType::ALL {
        let stats = stats_for_metric(metric, points);
        consistency_total += stats.consistency;

        match stats.trend {
            Trend::Improving(percent) if percent > INSIGHT_TREND_PCT => {
                insights.push(Insight::improving(metric, percent));
            }
            Trend::Declining(percent) if percent > INSIGHT_TREND_PCT => {
                insights.push(Insight::declining(metric, percent));
            }
            _ => {}
        }
    }

    let mean_consistency = consistency_total / MetricType::ALL.len() as i32;
    if mean_consistency >= CONSISTENCY_BAR {
        insights.push(Insight::excellent_consistency(mean_consistency));
    }

    if insights.is_empty() {
        insights.push(Insight::keep_training());
    }

    insights
}

fn average(values: &[i32]) -> i32 {
    if values.is_empty() {
        return 0;
    }
    values.iter().sum::<i32>() / values.len() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metric::InsightSeverity;

    /// Snapshots where every metric carries the same value per point.
    fn uniform_snapshots(values: &[i32]) -> Vec<RunSnapshot> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| RunSnapshot::new(i as i64 * 86_400_000, v, v, v, v, v, v, v))
            .collect()
    }

    #[test]
    fn test_average_of_empty_sequence_is_zero() {
        for metric in MetricType::ALL {
            assert_eq!(average_for_metric(metric, &[]), 0);
        }
    }

    #[test]
    fn test_stats_of_empty_sequence_are_zeroed_and_stable() {
        for metric in MetricType::ALL {
            let stats = stats_for_metric(metric, &[]);
            assert_eq!(stats, MetricStats::empty());
            assert_eq!(stats.trend, Trend::Stable);
        }
    }

    #[test]
    fn test_average_truncates() {
        // (10 + 11 + 11) / 3 = 10 with integer division
        let points = uniform_snapshots(&[10, 11, 11]);
        assert_eq!(average_for_metric(MetricType::Efficiency, &points), 10);
    }

    #[test]
    fn test_single_point_is_always_stable() {
        let points = uniform_snapshots(&[87]);
        for metric in MetricType::ALL {
            assert_eq!(stats_for_metric(metric, &points).trend, Trend::Stable);
        }
    }

    #[test]
    fn test_flat_sequence() {
        let points = uniform_snapshots(&[10, 10, 10, 10]);
        let stats = stats_for_metric(MetricType::Braking, &points);

        assert_eq!(stats.average, 10);
        assert_eq!(stats.best, 10);
        assert_eq!(stats.worst, 10);
        assert_eq!(stats.range, 0);
        assert_eq!(stats.consistency, 100);
        assert_eq!(stats.trend, Trend::Stable);
    }

    #[test]
    fn test_consistency_never_negative() {
        // Range 120 would push 100 - range below zero without the floor.
        let points = uniform_snapshots(&[0, 120]);
        let stats = stats_for_metric(MetricType::Impact, &points);
        assert_eq!(stats.range, 120);
        assert_eq!(stats.consistency, 0);
    }

    #[test]
    fn test_improving_trend() {
        // Halves [50,50] and [80,80]: (80-50)/50*100 = 60
        assert_eq!(calculate_trend(&[50, 50, 80, 80]), Trend::Improving(60));
    }

    #[test]
    fn test_declining_trend_truncates_toward_zero() {
        // (50-80)/80*100 = -37.5, truncated to -37
        assert_eq!(calculate_trend(&[80, 80, 50, 50]), Trend::Declining(37));
    }

    #[test]
    fn test_odd_length_discards_middle_element() {
        // Halves of size 2 ([60,61] and [60,61]); middle 59 is ignored.
        assert_eq!(calculate_trend(&[60, 61, 59, 60, 61]), Trend::Stable);
    }

    #[test]
    fn test_zero_first_half_average_is_stable() {
        assert_eq!(calculate_trend(&[0, 0, 40, 40]), Trend::Stable);
    }

    #[test]
    fn test_change_within_sensitivity_band_is_stable() {
        // (103-100)/100*100 = 3, not strictly above the band
        assert_eq!(calculate_trend(&[100, 100, 103, 103]), Trend::Stable);
        assert_eq!(calculate_trend(&[100, 100, 104, 104]), Trend::Improving(4));
    }

    #[test]
    fn test_insights_never_empty() {
        assert!(!generate_insights(&[]).is_empty());
        assert!(!generate_insights(&uniform_snapshots(&[42])).is_empty());
    }

    #[test]
    fn test_fallback_insight_on_empty_input() {
        // Empty input: no trends fire and mean consistency is 0.
        let insights = generate_insights(&[]);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0], Insight::keep_training());
    }

    #[test]
    fn test_flat_high_data_yields_only_consistency_insight() {
        // Every metric flat: no trend insights, consistency 100 across the
        // board, so only the consistency insight fires.
        let insights = generate_insights(&uniform_snapshots(&[70, 70, 70, 70]));
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].severity, InsightSeverity::Info);
        assert_eq!(insights[0].title, "Excellent consistency");
    }

    #[test]
    fn test_trend_insights_precede_consistency_insight() {
        // Mild improvement (90 vs 80 = 12%) with range 10 keeps consistency
        // at 90, so both kinds of insight fire for every metric.
        let insights = generate_insights(&uniform_snapshots(&[80, 80, 90, 90]));

        assert_eq!(insights.len(), MetricType::ALL.len() + 1);
        for (insight, metric) in insights.iter().zip(MetricType::ALL) {
            assert_eq!(insight.severity, InsightSeverity::Positive);
            assert!(insight.title.starts_with(metric.display_name()));
        }
        assert_eq!(
            insights.last().map(|i| i.severity),
            Some(InsightSeverity::Info)
        );
    }

    #[test]
    fn test_declining_insight_is_a_warning() {
        let insights = generate_insights(&uniform_snapshots(&[90, 90, 40, 40]));
        assert!(
            insights
                .iter()
                .any(|i| i.severity == InsightSeverity::Warning)
        );
    }

    #[test]
    fn test_small_trends_do_not_become_insights() {
        // 5% improvement is at, not above, the insight threshold.
        let insights = generate_insights(&uniform_snapshots(&[100, 100, 105, 105]));
        assert!(
            insights
                .iter()
                .all(|i| i.severity != InsightSeverity::Positive)
        );
    }

    #[test]
    fn test_queries_are_idempotent() {
        let points = uniform_snapshots(&[55, 61, 58, 72, 69]);

        for metric in MetricType::ALL {
            assert_eq!(
                stats_for_metric(metric, &points),
                stats_for_metric(metric, &points)
            );
            assert_eq!(
                average_for_metric(metric, &points),
                average_for_metric(metric, &points)
            );
        }
        assert_eq!(generate_insights(&points), generate_insights(&points));
    }
}

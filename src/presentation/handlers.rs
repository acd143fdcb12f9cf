// HTTP request handlers
use crate::domain::metric::{EnabledMetrics, MetricType, TimePeriod};
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub period: Option<String>,
    /// Comma-separated metric slugs selecting the enabled set; all metrics
    /// when absent.
    pub metrics: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List all runners known to the snapshot store
pub async fn list_runners(State(state): State<Arc<AppState>>) -> Response {
    match state.runner_service.list_runners().await {
        Ok(runners) => Json(runners).into_response(),
        Err(e) => {
            tracing::error!("Error listing runners: {:#}", e);
            (StatusCode::BAD_GATEWAY, "snapshot store unavailable").into_response()
        }
    }
}

/// Stats and insights for one runner over the selected period
pub async fn get_history(
    Path(id): Path<String>,
    Query(query): Query<HistoryQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let period = match parse_period(query.period.as_deref()) {
        Ok(period) => period,
        Err(response) => return response,
    };
    let enabled = match parse_enabled_metrics(query.metrics.as_deref()) {
        Ok(enabled) => enabled,
        Err(response) => return response,
    };

    match state.history_service.overview(&id, period, &enabled).await {
        Ok(overview) => Json(overview).into_response(),
        Err(e) => {
            tracing::error!("Error building history for {}: {:#}", id, e);
            (StatusCode::BAD_GATEWAY, "snapshot store unavailable").into_response()
        }
    }
}

/// Average score of one metric over the selected period
pub async fn get_average(
    Path((id, metric_slug)): Path<(String, String)>,
    Query(query): Query<HistoryQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let Some(metric) = MetricType::from_slug(&metric_slug) else {
        return (
            StatusCode::BAD_REQUEST,
            format!("unknown metric '{}'", metric_slug),
        )
            .into_response();
    };
    let period = match parse_period(query.period.as_deref()) {
        Ok(period) => period,
        Err(response) => return response,
    };

    match state.history_service.metric_average(&id, metric, period).await {
        Ok(average) => Json(serde_json::json!({
            "metric": metric.slug(),
            "average": average,
        }))
        .into_response(),
        Err(e) => {
            tracing::error!("Error computing average for {}: {:#}", id, e);
            (StatusCode::BAD_GATEWAY, "snapshot store unavailable").into_response()
        }
    }
}

/// Insight list only, for lightweight clients
pub async fn get_insights(
    Path(id): Path<String>,
    Query(query): Query<HistoryQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let period = match parse_period(query.period.as_deref()) {
        Ok(period) => period,
        Err(response) => return response,
    };

    match state.history_service.insights(&id, period).await {
        Ok(insights) => Json(insights).into_response(),
        Err(e) => {
            tracing::error!("Error building insights for {}: {:#}", id, e);
            (StatusCode::BAD_GATEWAY, "snapshot store unavailable").into_response()
        }
    }
}

fn parse_period(slug: Option<&str>) -> Result<TimePeriod, Response> {
    match slug {
        None => Ok(TimePeriod::default()),
        Some(slug) => TimePeriod::from_slug(slug).ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                format!("unknown period '{}'", slug),
            )
                .into_response()
        }),
    }
}

fn parse_enabled_metrics(list: Option<&str>) -> Result<EnabledMetrics, Response> {
    let Some(list) = list else {
        return Ok(EnabledMetrics::all());
    };

    // Start from the empty set and toggle each named metric in; a slug
    // listed twice toggles itself back out.
    let mut enabled = EnabledMetrics::from_metrics([]);
    for slug in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match MetricType::from_slug(slug) {
            Some(metric) => enabled = enabled.toggle(metric),
            None => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    format!("unknown metric '{}'", slug),
                )
                    .into_response());
            }
        }
    }

    Ok(enabled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_period_defaults_to_week() {
        assert_eq!(parse_period(None).unwrap(), TimePeriod::Week);
        assert_eq!(parse_period(Some("quarter")).unwrap(), TimePeriod::Quarter);
        assert!(parse_period(Some("decade")).is_err());
    }

    #[test]
    fn test_parse_enabled_metrics() {
        assert_eq!(parse_enabled_metrics(None).unwrap(), EnabledMetrics::all());

        let picked = parse_enabled_metrics(Some("efficiency, sway")).unwrap();
        assert!(picked.contains(MetricType::Efficiency));
        assert!(picked.contains(MetricType::Sway));
        assert!(!picked.contains(MetricType::Braking));

        assert!(parse_enabled_metrics(Some("efficiency,cadence")).is_err());
    }
}

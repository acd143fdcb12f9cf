// InfluxDB-backed snapshot repository
use crate::application::snapshot_repository::SnapshotRepository;
use crate::domain::metric::{MetricType, TimePeriod};
use crate::domain::snapshot::RunSnapshot;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

const MEASUREMENT: &str = "run_snapshot";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snapshot store request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("snapshot store returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("snapshot store rejected query: {0}")]
    Query(String),
}

#[derive(Debug, Clone)]
pub struct InfluxRepository {
    host: String,
    token: String,
    database: String,
    retention_policy: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct InfluxQLResponse {
    results: Vec<InfluxQLResult>,
}

#[derive(Debug, Deserialize)]
struct InfluxQLResult {
    #[serde(default)]
    series: Option<Vec<InfluxQLSeries>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InfluxQLSeries {
    #[allow(dead_code)]
    name: String,
    columns: Vec<String>,
    values: Vec<Vec<serde_json::Value>>,
}

impl InfluxRepository {
    pub fn new(host: String, token: String, database: String, retention_policy: String) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            token,
            database,
            retention_policy,
            client: reqwest::Client::new(),
        }
    }

    fn build_query_url(&self, query: &str) -> String {
        let encoded_query = urlencoding::encode(query);
        format!(
            "{}/query?db={}&rp={}&q={}",
            self.host, self.database, self.retention_policy, encoded_query
        )
    }

    async fn execute_query(&self, query: &str) -> Result<InfluxQLResponse, StoreError> {
        let url = self.build_query_url(query);
        tracing::debug!("Executing snapshot query: {}", query);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Token {}", self.token))
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status { status, body });
        }

        let data = response.json::<InfluxQLResponse>().await?;

        if let Some(result) = data.results.first() {
            if let Some(error) = &result.error {
                return Err(StoreError::Query(error.clone()));
            }
        }

        Ok(data)
    }

    /// Map one result series to snapshots. Rows missing the timestamp or any
    /// metric field are skipped rather than failing the whole fetch.
    fn snapshots_from_series(series: &InfluxQLSeries) -> Vec<RunSnapshot> {
        let column_index = |name: &str| series.columns.iter().position(|c| c == name);

        let Some(time_idx) = column_index("time") else {
            return Vec::new();
        };
        let metric_indices: Vec<Option<usize>> = MetricType::ALL
            .iter()
            .map(|m| column_index(m.slug()))
            .collect();

        let mut snapshots = Vec::with_capacity(series.values.len());
        'rows: for row in &series.values {
            let Some(time_str) = row.get(time_idx).and_then(|v| v.as_str()) else {
                continue;
            };
            let Ok(time) = chrono::DateTime::parse_from_rfc3339(time_str) else {
                tracing::debug!("Skipping row with unparseable timestamp: {}", time_str);
                continue;
            };

            let mut values = [0i32; 7];
            for (slot, idx) in values.iter_mut().zip(metric_indices.iter().copied()) {
                let field = idx.and_then(|i| row.get(i)).and_then(|v| v.as_f64());
                match field {
                    Some(v) => *slot = v as i32,
                    None => continue 'rows,
                }
            }

            snapshots.push(RunSnapshot::new(
                time.timestamp_millis(),
                values[0],
                values[1],
                values[2],
                values[3],
                values[4],
                values[5],
                values[6],
            ));
        }

        snapshots
    }
}

#[async_trait]
impl SnapshotRepository for InfluxRepository {
    async fn list_runner_ids(&self) -> Result<Vec<String>> {
        let query = format!("SHOW TAG VALUES FROM {} WITH KEY = runner", MEASUREMENT);
        let response = self.execute_query(&query).await?;

        let mut runners = Vec::new();
        if let Some(result) = response.results.first() {
            if let Some(series) = &result.series {
                for s in series {
                    for row in &s.values {
                        // SHOW TAG VALUES rows are [key, value]
                        if let Some(runner) = row.get(1).and_then(|v| v.as_str()) {
                            runners.push(runner.to_string());
                        }
                    }
                }
            }
        }

        Ok(runners)
    }

    async fn fetch_snapshots(
        &self,
        runner_id: &str,
        period: TimePeriod,
    ) -> Result<Vec<RunSnapshot>> {
        let fields = MetricType::ALL
            .iter()
            .map(|m| m.slug())
            .collect::<Vec<_>>()
            .join(", ");
        let window = match period.days() {
            Some(days) => format!(" AND time >= now() - {}d", days),
            None => String::new(),
        };
        let query = format!(
            "SELECT {} FROM {} WHERE runner = '{}'{} ORDER BY time ASC",
            fields,
            MEASUREMENT,
            runner_id.replace('\'', ""),
            window
        );

        let response = self.execute_query(&query).await?;

        let mut snapshots = Vec::new();
        if let Some(result) = response.results.first() {
            if let Some(series) = &result.series {
                for s in series {
                    snapshots.extend(Self::snapshots_from_series(s));
                }
            }
        }

        tracing::debug!(
            "Fetched {} snapshots for runner {} ({})",
            snapshots.len(),
            runner_id,
            period.label()
        );
        Ok(snapshots)
    }
}

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub snapshots: SnapshotSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

/// Which snapshot source backs the service.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotSource {
    Influx,
    Sample,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SnapshotSettings {
    pub source: SnapshotSource,
    pub influx: Option<InfluxSettings>,
    #[serde(default)]
    pub sample: SampleSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InfluxSettings {
    pub host: String,
    pub token: String,
    pub database: String,
    pub retention_policy: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SampleSettings {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_runners")]
    pub runners: Vec<String>,
}

impl Default for SampleSettings {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            runners: default_runners(),
        }
    }
}

fn default_seed() -> u64 {
    42
}

fn default_runners() -> Vec<String> {
    vec![
        "anna_k".to_string(),
        "marathon_mike".to_string(),
        "trail_tessa".to_string(),
    ]
}

pub fn load_service_config() -> anyhow::Result<ServiceConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/service"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_sample_config() {
        let toml = r#"
            [server]
            bind = "127.0.0.1:9090"

            [snapshots]
            source = "sample"

            [snapshots.sample]
            seed = 7
            runners = ["anna_k"]
        "#;

        let settings = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap();
        let cfg: ServiceConfig = settings.try_deserialize().unwrap();

        assert_eq!(cfg.server.bind, "127.0.0.1:9090");
        assert_eq!(cfg.snapshots.source, SnapshotSource::Sample);
        assert!(cfg.snapshots.influx.is_none());
        assert_eq!(cfg.snapshots.sample.seed, 7);
        assert_eq!(cfg.snapshots.sample.runners, vec!["anna_k".to_string()]);
    }

    #[test]
    fn test_deserialize_influx_config_with_defaults() {
        let toml = r#"
            [snapshots]
            source = "influx"

            [snapshots.influx]
            host = "http://localhost:8086"
            token = "secret"
            database = "running"
            retention_policy = "autogen"
        "#;

        let settings = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap();
        let cfg: ServiceConfig = settings.try_deserialize().unwrap();

        assert_eq!(cfg.server.bind, "0.0.0.0:8080");
        assert_eq!(cfg.snapshots.source, SnapshotSource::Influx);
        let influx = cfg.snapshots.influx.unwrap();
        assert_eq!(influx.database, "running");
        assert_eq!(cfg.snapshots.sample.seed, 42);
    }
}

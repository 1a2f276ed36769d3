use crate::gbdt::GbmParams;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub training: TrainingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Where the fitted pipeline is persisted and loaded from
    #[serde(default = "default_artifact_path")]
    pub artifact_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrainingConfig {
    /// Labeled CSV with columns age, sex, bmi, children, smoker, region, charges
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Held-out fraction of the dataset
    #[serde(default = "default_test_ratio")]
    pub test_ratio: f64,

    /// Shuffle seed; fixed so the split is reproducible
    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_n_estimators")]
    pub n_estimators: usize,

    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,

    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    #[serde(default = "default_min_samples_leaf")]
    pub min_samples_leaf: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            artifact_path: default_artifact_path(),
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            test_ratio: default_test_ratio(),
            seed: default_seed(),
            n_estimators: default_n_estimators(),
            learning_rate: default_learning_rate(),
            max_depth: default_max_depth(),
            min_samples_leaf: default_min_samples_leaf(),
        }
    }
}

impl From<&TrainingConfig> for GbmParams {
    fn from(cfg: &TrainingConfig) -> Self {
        Self {
            n_estimators: cfg.n_estimators,
            learning_rate: cfg.learning_rate,
            max_depth: cfg.max_depth,
            min_samples_leaf: cfg.min_samples_leaf,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_artifact_path() -> PathBuf {
    PathBuf::from("model/pipeline.bin")
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/insurance.csv")
}

fn default_test_ratio() -> f64 {
    0.2
}

fn default_seed() -> u64 {
    42
}

fn default_n_estimators() -> usize {
    100
}

fn default_learning_rate() -> f64 {
    0.1
}

fn default_max_depth() -> usize {
    3
}

fn default_min_samples_leaf() -> usize {
    1
}

/// Load configuration from an optional TOML file plus PREDICTOR-prefixed
/// environment overrides (e.g. PREDICTOR_SERVER__PORT), then validate it.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("PREDICTOR").separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if !(cfg.training.test_ratio > 0.0 && cfg.training.test_ratio < 1.0) {
        anyhow::bail!(
            "training.test_ratio must be strictly between 0 and 1, got {}",
            cfg.training.test_ratio
        );
    }

    if cfg.training.learning_rate <= 0.0 {
        anyhow::bail!(
            "training.learning_rate must be positive, got {}",
            cfg.training.learning_rate
        );
    }

    if cfg.training.max_depth == 0 {
        anyhow::bail!("training.max_depth must be at least 1");
    }

    if cfg.training.min_samples_leaf == 0 {
        anyhow::bail!("training.min_samples_leaf must be at least 1");
    }

    if cfg.server.host.parse::<std::net::IpAddr>().is_err() {
        anyhow::bail!("server.host is not a valid IP address: {}", cfg.server.host);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_training_contract() {
        let cfg = Config::default();
        assert_eq!(cfg.training.test_ratio, 0.2);
        assert_eq!(cfg.training.seed, 42);
        assert_eq!(cfg.training.n_estimators, 100);
        assert_eq!(cfg.training.max_depth, 3);
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.model.artifact_path, PathBuf::from("model/pipeline.bin"));
    }

    #[test]
    fn test_partial_toml_fills_in_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [server]
            port = 9000

            [training]
            n_estimators = 25
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.training.n_estimators, 25);
        assert_eq!(cfg.training.seed, 42);
    }

    #[test]
    fn test_validate_rejects_bad_test_ratio() {
        let mut cfg = Config::default();
        cfg.training.test_ratio = 1.5;
        assert!(validate_config(&cfg).is_err());
        cfg.training.test_ratio = 0.0;
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_host() {
        let mut cfg = Config::default();
        cfg.server.host = "not-an-ip".to_string();
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_gbm_params_from_training_config() {
        let params = GbmParams::from(&TrainingConfig::default());
        assert_eq!(params.n_estimators, 100);
        assert_eq!(params.max_depth, 3);
        assert!((params.learning_rate - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_load_config_without_file_uses_defaults() {
        let cfg = load_config(Path::new("does-not-exist.toml")).unwrap();
        assert_eq!(cfg.training.seed, 42);
    }
}

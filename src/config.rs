use config::{ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub dataset_path: String,
    pub max_tree_depth: usize,
    pub fallback_top_k: usize,
}

impl Config {
    /// Defaults, layered under an optional `disha.toml` file and `DISHA_*`
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        config::Config::builder()
            .set_default("port", 8000)?
            .set_default("dataset_path", "data/survey.csv")?
            .set_default("max_tree_depth", 16)?
            .set_default("fallback_top_k", 3)?
            .add_source(File::with_name("disha").required(false))
            .add_source(Environment::with_prefix("DISHA"))
            .build()?
            .try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            dataset_path: "data/survey.csv".to_string(),
            max_tree_depth: 16,
            fallback_top_k: 3,
        }
    }
}

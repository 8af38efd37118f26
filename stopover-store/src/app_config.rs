use serde::Deserialize;
use std::env;
use stopover_evaluator::RankingConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    pub offers: OffersConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OffersConfig {
    /// Directory holding `{ORIGIN}-{DESTINATION}.json` offer dumps
    pub fixture_dir: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::load_from("config", &run_mode)
    }

    pub fn load_from(dir: &str, run_mode: &str) -> Result<Self, config::ConfigError> {
        let s = config::Config::builder()
            .add_source(config::File::with_name(&format!("{}/default", dir)))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("{}/{}", dir, run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name(&format!("{}/local", dir)).required(false))
            // e.g. `STOPOVER__RANKING__TOP_K=3`
            .add_source(config::Environment::with_prefix("STOPOVER").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_layers_run_mode_over_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            r#"
                [server]
                port = 8000

                [ranking]
                top_k = 2

                [offers]
                fixture_dir = "fixtures"
            "#,
        )
        .unwrap();
        fs::write(
            dir.path().join("staging.toml"),
            r#"
                [ranking]
                top_k = 4
                max_bonus = 40.0
            "#,
        )
        .unwrap();

        let config = Config::load_from(dir.path().to_str().unwrap(), "staging").unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.ranking.top_k, 4);
        assert_eq!(config.ranking.max_bonus, Some(40.0));
        assert_eq!(config.ranking.bonus_per_match, 20.0);
        assert_eq!(config.offers.fixture_dir, "fixtures");
    }

    #[test]
    fn test_missing_default_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from(dir.path().to_str().unwrap(), "development").is_err());
    }
}

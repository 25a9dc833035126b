use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;

use crate::matching::aggregator::Weights;
use crate::matching::education::default_levels;
use crate::matching::skill_matcher::DEFAULT_FUZZY_THRESHOLD;
use crate::matching::taxonomy::default_families;
use crate::matching::EngineConfig;

/// Application configuration loaded from environment variables.
/// Matching tables default to the built-in ones unless a path is given.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub fuzzy_threshold: f64,
    pub weights: Weights,
    pub taxonomy_path: Option<PathBuf>,
    pub education_hierarchy_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            fuzzy_threshold: match lookup("MATCH_FUZZY_THRESHOLD") {
                Some(raw) => raw
                    .trim()
                    .parse::<f64>()
                    .context("MATCH_FUZZY_THRESHOLD must be a number")?,
                None => DEFAULT_FUZZY_THRESHOLD,
            },
            weights: match lookup("MATCH_WEIGHTS") {
                Some(raw) => parse_weights(&raw)?,
                None => Weights::default(),
            },
            taxonomy_path: lookup("TAXONOMY_PATH").map(PathBuf::from),
            education_hierarchy_path: lookup("EDUCATION_HIERARCHY_PATH").map(PathBuf::from),
        })
    }

    /// Assembles the engine configuration, reading any table overrides from
    /// disk. Table contents are validated by `MatchingEngine::new`.
    pub fn engine_config(&self) -> Result<EngineConfig> {
        let taxonomy = match &self.taxonomy_path {
            Some(path) => read_json(path)?,
            None => default_families(),
        };
        let hierarchy = match &self.education_hierarchy_path {
            Some(path) => read_json(path)?,
            None => default_levels(),
        };

        Ok(EngineConfig {
            fuzzy_threshold: self.fuzzy_threshold,
            weights: self.weights,
            taxonomy,
            hierarchy,
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::from_lookup(|_| None).expect("defaults always parse")
    }
}

/// `"exp,edu,skill"`, e.g. `"0.35,0.25,0.40"`.
fn parse_weights(raw: &str) -> Result<Weights> {
    let parts = raw
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("MATCH_WEIGHTS must be three numbers, got '{raw}'"))?;

    let [experience, education, skills] = parts[..] else {
        bail!("MATCH_WEIGHTS must be exactly three numbers (experience,education,skills), got '{raw}'");
    };

    Weights::new(experience, education, skills)
        .with_context(|| format!("MATCH_WEIGHTS '{raw}' is not a valid weight set"))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;
    use crate::matching::error::ConfigError;
    use crate::matching::MatchingEngine;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.fuzzy_threshold, DEFAULT_FUZZY_THRESHOLD);
        assert_eq!(config.weights, Weights::default());
        assert!(config.taxonomy_path.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("MATCH_FUZZY_THRESHOLD", "0.95"),
            ("MATCH_WEIGHTS", "0.5, 0.2, 0.3"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.fuzzy_threshold, 0.95);
        assert_eq!(config.weights.experience, 0.5);
        assert_eq!(config.weights.skills, 0.3);
    }

    #[test]
    fn test_bad_port_is_error() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
    }

    #[test]
    fn test_weights_need_three_numbers() {
        assert!(config_from(&[("MATCH_WEIGHTS", "0.5,0.5")]).is_err());
        assert!(config_from(&[("MATCH_WEIGHTS", "a,b,c")]).is_err());
    }

    #[test]
    fn test_weight_sum_violation_fails_config_load() {
        let err = config_from(&[("MATCH_WEIGHTS", "0.3,0.3,0.3")]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::WeightSum { .. })
        ));
    }

    #[test]
    fn test_taxonomy_file_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"family": "lang", "skills": {{"elixir": ["ex"], "erlang": ["otp"]}}}}]"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let config = config_from(&[("TAXONOMY_PATH", &path)]).unwrap();
        let engine = MatchingEngine::new(config.engine_config().unwrap()).unwrap();
        assert_eq!(engine.taxonomy().resolve("OTP"), Some("erlang"));
        assert_eq!(engine.taxonomy().resolve("react"), None);
    }

    #[test]
    fn test_hierarchy_file_with_duplicate_alias_fails_startup() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "Junior", "aliases": ["cert"]}}, {{"name": "Senior", "aliases": ["cert"]}}]"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let config = config_from(&[("EDUCATION_HIERARCHY_PATH", &path)]).unwrap();
        assert!(matches!(
            MatchingEngine::new(config.engine_config().unwrap()),
            Err(ConfigError::DuplicateDegreeAlias { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_error() {
        let config = config_from(&[("TAXONOMY_PATH", "/nonexistent/taxonomy.json")]).unwrap();
        assert!(config.engine_config().is_err());
    }
}

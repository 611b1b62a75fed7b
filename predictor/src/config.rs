use std::{env, path::PathBuf, str::FromStr};

use crate::{PredictorError, Result};

pub const DEFAULT_MODEL_PATH: &str = "housing_model.json";
pub const DEFAULT_SCALER_PATH: &str = "scaler.json";

pub const MODEL_PATH_VAR: &str = "HOUSING_MODEL_PATH";
pub const SCALER_PATH_VAR: &str = "HOUSING_SCALER_PATH";
pub const PERSIST_VAR: &str = "HOUSING_PERSIST";
pub const STRICT_VAR: &str = "HOUSING_STRICT";

/// How the reindexing step treats values it has to make up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Zero-fill missing columns and unknown categories, reporting them.
    #[default]
    Lenient,
    /// Reject the input instead.
    Strict,
}

/// Whether loaded artifacts are written back when a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistPolicy {
    #[default]
    Never,
    Always,
}

impl FromStr for PersistPolicy {
    type Err = PredictorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "never" => Ok(Self::Never),
            "always" => Ok(Self::Always),
            other => Err(PredictorError::InvalidConfig(format!(
                "unknown persist policy '{other}', expected never or always"
            ))),
        }
    }
}

/// Where the artifacts live and how a session treats its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictorConfig {
    pub model_path: PathBuf,
    pub scaler_path: PathBuf,
    pub persist: PersistPolicy,
    pub strictness: Strictness,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            scaler_path: PathBuf::from(DEFAULT_SCALER_PATH),
            persist: PersistPolicy::default(),
            strictness: Strictness::default(),
        }
    }
}

impl PredictorConfig {
    /// Builds a configuration from the process environment, falling back to the defaults.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if a variable holds a value that cannot be understood.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(MODEL_PATH_VAR) {
            config.model_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(SCALER_PATH_VAR) {
            config.scaler_path = PathBuf::from(path);
        }
        if let Some(policy) = lookup(PERSIST_VAR) {
            config.persist = policy.parse()?;
        }
        if let Some(strict) = lookup(STRICT_VAR) {
            config.strictness = if parse_flag(STRICT_VAR, &strict)? {
                Strictness::Strict
            } else {
                Strictness::Lenient
            };
        }

        Ok(config)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(PredictorError::InvalidConfig(format!(
            "{key} must be a boolean, got '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = PredictorConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config, PredictorConfig::default());
        assert_eq!(config.persist, PersistPolicy::Never);
        assert_eq!(config.strictness, Strictness::Lenient);
    }

    #[test]
    fn variables_override_defaults() {
        let config = PredictorConfig::from_lookup(lookup(&[
            (MODEL_PATH_VAR, "/srv/m.json"),
            (SCALER_PATH_VAR, "/srv/s.json"),
            (PERSIST_VAR, "Always"),
            (STRICT_VAR, "yes"),
        ]))
        .unwrap();

        assert_eq!(config.model_path, PathBuf::from("/srv/m.json"));
        assert_eq!(config.scaler_path, PathBuf::from("/srv/s.json"));
        assert_eq!(config.persist, PersistPolicy::Always);
        assert_eq!(config.strictness, Strictness::Strict);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = PredictorConfig::from_lookup(lookup(&[(PERSIST_VAR, "sometimes")])).unwrap_err();
        assert!(matches!(err, PredictorError::InvalidConfig(_)));

        let err = PredictorConfig::from_lookup(lookup(&[(STRICT_VAR, "maybe")])).unwrap_err();
        assert!(err.to_string().contains(STRICT_VAR));
    }
}

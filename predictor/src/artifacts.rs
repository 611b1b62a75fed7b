use std::{
    fs,
    path::{Path, PathBuf},
};

use log::info;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    PredictorError, Result,
    config::PredictorConfig,
    features::{FEATURE_NAMES, NUM_FEATURES},
    pipeline::Predictor,
    regressor::Model,
    scaler::Scaler,
};

/// The pair of files a session reads its scaler and model from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactStore {
    model_path: PathBuf,
    scaler_path: PathBuf,
}

impl ArtifactStore {
    /// Creates a new `ArtifactStore`.
    ///
    /// # Arguments
    /// * `model_path` - Where `housing_model.json` lives.
    /// * `scaler_path` - Where `scaler.json` lives.
    pub fn new(model_path: impl Into<PathBuf>, scaler_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            scaler_path: scaler_path.into(),
        }
    }

    pub fn from_config(config: &PredictorConfig) -> Self {
        Self::new(&config.model_path, &config.scaler_path)
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn scaler_path(&self) -> &Path {
        &self.scaler_path
    }

    /// Gate run before anything else: both files must exist.
    ///
    /// # Errors
    /// `ArtifactsMissing` listing every absent file.
    pub fn check_available(&self) -> Result<()> {
        let missing: Vec<PathBuf> = [&self.model_path, &self.scaler_path]
            .into_iter()
            .filter(|p| !p.is_file())
            .cloned()
            .collect();

        if missing.is_empty() {
            return Ok(());
        }

        Err(PredictorError::ArtifactsMissing {
            model: self.model_path.clone(),
            scaler: self.scaler_path.clone(),
            missing,
        })
    }

    /// Checks both files exist, reads and validates them.
    ///
    /// # Returns
    /// A predictor owning the loaded scaler and model.
    pub fn load(&self) -> Result<Predictor> {
        self.check_available()?;

        let scaler: Scaler = read_json(&self.scaler_path)?;
        scaler
            .validate()
            .map_err(|reason| invalid(&self.scaler_path, reason))?;

        let model: Model = read_json(&self.model_path)?;
        model
            .validate()
            .map_err(|reason| invalid(&self.model_path, reason))?;

        info!(
            "loaded {} scaler from {} and {} model from {}",
            scaler.kind(),
            self.scaler_path.display(),
            model.kind(),
            self.model_path.display()
        );

        Ok(Predictor::new(scaler, model))
    }

    /// Writes the predictor's scaler and model back to their source paths.
    pub fn persist(&self, predictor: &Predictor) -> Result<()> {
        write_json(&self.scaler_path, predictor.scaler())?;
        write_json(&self.model_path, predictor.model())?;

        info!(
            "rewrote artifacts {} and {}",
            self.scaler_path.display(),
            self.model_path.display()
        );
        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| PredictorError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut content = serde_json::to_string_pretty(value).map_err(|source| PredictorError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    content.push('\n');
    fs::write(path, content)?;
    Ok(())
}

fn invalid(path: &Path, reason: String) -> PredictorError {
    PredictorError::InvalidArtifact {
        path: path.to_path_buf(),
        reason,
    }
}

/// Artifacts must name the features in the exact order they will be fed.
pub(crate) fn check_feature_names(names: &[String]) -> std::result::Result<(), String> {
    if names.len() != NUM_FEATURES {
        return Err(format!(
            "expected {NUM_FEATURES} feature names, got {}",
            names.len()
        ));
    }

    match names.iter().zip(FEATURE_NAMES).position(|(a, b)| a != b) {
        Some(i) => Err(format!(
            "feature {i} is '{}', expected '{}'",
            names[i], FEATURE_NAMES[i]
        )),
        None => Ok(()),
    }
}

pub(crate) fn check_vector(what: &str, values: &[f64]) -> std::result::Result<(), String> {
    if values.len() != NUM_FEATURES {
        return Err(format!(
            "{what} has {} values, expected {NUM_FEATURES}",
            values.len()
        ));
    }

    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(format!("{what}[{i}] is not finite")),
        None => Ok(()),
    }
}

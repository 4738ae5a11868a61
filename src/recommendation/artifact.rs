//! Classifier artifact
//!
//! The trained forest plus what startup learned about it. Built once during
//! startup (or reloaded from a JSON cache file) and shared read-only for the
//! life of the process.

use linfa::prelude::Records;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use super::categories::{Goal, Preference, Sport};
use super::dataset::{encode, holdout_split, training_dataset};
use super::decider::SportClassifier;
use super::forest::RandomForest;
use super::metrics::PerformanceTimer;
use crate::config::ModelConfig;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    forest: RandomForest,
    training_rows: usize,
    holdout_accuracy: Option<f64>,
}

impl ClassifierArtifact {
    /// Fit the forest on the training split of the encoded table
    pub fn train(config: &ModelConfig) -> Result<Self> {
        let _timer = PerformanceTimer::new("classifier_training");

        let (train, test) = holdout_split(&training_dataset(), config.test_fraction, config.split_seed);
        let forest = RandomForest::fit(&train, Sport::ALL.len(), config.forest_params())?;

        let holdout_accuracy = if test.nsamples() == 0 {
            None
        } else {
            let mut correct = 0;
            for (features, &label) in test.records().outer_iter().zip(test.targets().iter()) {
                if forest.predict(&features.to_vec())? == label {
                    correct += 1;
                }
            }
            Some(correct as f64 / test.nsamples() as f64)
        };

        Ok(Self {
            forest,
            training_rows: train.nsamples(),
            holdout_accuracy,
        })
    }

    /// Reuse the cached artifact when it matches `config`, otherwise train
    /// and (if a cache path is configured) write the result back.
    pub fn load_or_train(config: &ModelConfig) -> Result<Self> {
        let Some(path) = config.artifact_path.as_deref() else {
            return Self::train(config);
        };

        if path.exists() {
            match Self::load(path) {
                Ok(artifact) if artifact.forest.params() == config.forest_params() => {
                    info!("📦 Loaded classifier artifact from {}", path.display());
                    return Ok(artifact);
                }
                Ok(_) => warn!(
                    "Cached artifact at {} was trained with different parameters, retraining",
                    path.display()
                ),
                Err(e) => warn!("Ignoring unreadable artifact at {}: {}", path.display(), e),
            }
        }

        let artifact = Self::train(config)?;
        artifact.save(path)?;
        info!("💾 Saved classifier artifact to {}", path.display());
        Ok(artifact)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| Error::artifact(format!("failed to read {}", path.display()), e))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| Error::artifact(format!("failed to parse {}", path.display()), e))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec(self)?;
        std::fs::write(path, json)
            .map_err(|e| Error::artifact(format!("failed to write {}", path.display()), e))
    }

    pub fn n_trees(&self) -> usize {
        self.forest.n_trees()
    }

    pub fn training_rows(&self) -> usize {
        self.training_rows
    }

    pub fn holdout_accuracy(&self) -> Option<f64> {
        self.holdout_accuracy
    }
}

impl SportClassifier for ClassifierArtifact {
    fn predict(&self, age: i64, bmi: f64, goal: &str, preference: &str) -> Result<Sport> {
        let timer = PerformanceTimer::new("classifier_prediction");
        let goal: Goal = goal.parse().map_err(|_| Error::unrecognized("Goal", goal))?;
        let preference: Preference = preference
            .parse()
            .map_err(|_| Error::unrecognized("Preference", preference))?;

        let code = self.forest.predict(&encode(age as f64, bmi, goal, preference))?;
        timer.log_if_slow(50);
        Sport::from_code(code)
            .ok_or_else(|| Error::classifier(format!("decoded unknown sport code {}", code)))
    }
}

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::model::encoder::LabelEncoder;
use crate::model::pipeline::{FeatureRow, Pipeline, PipelineError, PipelineSpec};

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("model artifact is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model artifact is inconsistent: {0}")]
    Invalid(String),

    #[error("failed to transform training row {row}: {source}")]
    TrainingRow {
        row: usize,
        #[source]
        source: PipelineError,
    },
}

#[derive(Debug, Deserialize)]
struct RawArtifact {
    pipeline: PipelineSpec,
    label_encoder: LabelEncoder,
    interest_encoder: LabelEncoder,
    #[serde(rename = "X")]
    x: Vec<FeatureRow>,
    y: Vec<usize>,
}

/// Everything the predictor needs, loaded once at startup and never mutated.
#[derive(Debug)]
pub struct ModelArtifact {
    pub pipeline: Pipeline,
    pub label_encoder: LabelEncoder,
    pub interest_encoder: LabelEncoder,
    /// Training rows already run through the preprocessor, in original order.
    pub training_features: Vec<Vec<f64>>,
    pub training_labels: Vec<usize>,
}

impl ModelArtifact {
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        info!("Loading model artifact from {}", path.display());
        let raw = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ArtifactError> {
        let raw: RawArtifact = serde_json::from_str(raw)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawArtifact) -> Result<Self, ArtifactError> {
        let pipeline = Pipeline::compile(raw.pipeline)?;

        if pipeline.n_classes() != raw.label_encoder.len() {
            return Err(ArtifactError::Invalid(format!(
                "classifier scores {} classes but the label encoder knows {}",
                pipeline.n_classes(),
                raw.label_encoder.len()
            )));
        }
        if raw.x.len() != raw.y.len() {
            return Err(ArtifactError::Invalid(format!(
                "{} training rows but {} labels",
                raw.x.len(),
                raw.y.len()
            )));
        }
        if let Some(code) = raw.y.iter().find(|&&code| code >= raw.label_encoder.len()) {
            return Err(ArtifactError::Invalid(format!(
                "training label {code} has no class name"
            )));
        }

        let training_features = raw
            .x
            .iter()
            .enumerate()
            .map(|(row, features)| {
                pipeline
                    .transform(features)
                    .map_err(|source| ArtifactError::TrainingRow { row, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            pipeline,
            label_encoder: raw.label_encoder,
            interest_encoder: raw.interest_encoder,
            training_features,
            training_labels: raw.y,
        })
    }
}

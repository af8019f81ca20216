//! Predicts job roles from the classifier output, falling back to the
//! nearest training rows when no role clears the threshold.
//!
//! `predict` reports every failure as a `PredictionError`. The request path
//! collapses errors into [`FALLBACK_ROLES`] through [`or_fallback`].

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::encoder::EncoderError;
use crate::model::pipeline::{FeatureRow, PipelineError};
use crate::model::similarity::{cosine_similarity, top_k_indices};
use crate::model::ModelArtifact;

/// Returned whenever prediction fails for any reason.
pub const FALLBACK_ROLES: [&str; 2] = ["Data Analyst", "Software Developer"];

pub const DEFAULT_THRESHOLD: f64 = 0.3;

const NEIGHBOURS: usize = 2;

#[derive(Debug, Error, PartialEq)]
pub enum PredictionError {
    #[error(transparent)]
    Encoder(#[from] EncoderError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("similarity fallback needs at least 2 training rows, artifact has {0}")]
    InsufficientTrainingData(usize),

    #[error("skill at position {0} is not a string")]
    NonTextSkill(usize),
}

/// Accepts a skills list only when every item is a JSON string.
pub fn skill_texts(skills: &[Value]) -> Result<Vec<String>, PredictionError> {
    skills
        .iter()
        .enumerate()
        .map(|(i, skill)| {
            skill
                .as_str()
                .map(str::to_string)
                .ok_or(PredictionError::NonTextSkill(i))
        })
        .collect()
}

/// Collapses a prediction result into roles, substituting [`FALLBACK_ROLES`]
/// for any error.
pub fn or_fallback(result: Result<Vec<String>, PredictionError>) -> Vec<String> {
    match result {
        Ok(roles) => roles,
        Err(e) => {
            warn!("Prediction error, returning fallback roles: {e}");
            FALLBACK_ROLES.iter().map(|r| r.to_string()).collect()
        }
    }
}

pub struct RolePredictor {
    artifact: ModelArtifact,
    threshold: f64,
}

impl RolePredictor {
    pub fn new(artifact: ModelArtifact, threshold: f64) -> Self {
        Self {
            artifact,
            threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    /// Predicts roles for a skills list and interest category.
    ///
    /// Roles scoring at least `threshold` are returned in label order. When
    /// none qualifies, the two most similar training rows decide the result,
    /// most similar first; the pair may repeat a role.
    pub fn predict(
        &self,
        skills: &[String],
        interest: &str,
        threshold: f64,
    ) -> Result<Vec<String>, PredictionError> {
        let skills_text = skills.join(" ").to_lowercase();
        let interest_encoded = self.artifact.interest_encoder.transform(interest)?;

        let input = self.artifact.pipeline.transform(&FeatureRow {
            skills: skills_text,
            interest_encoded,
        })?;
        let probabilities = self.artifact.pipeline.predict_proba(&input)?;

        let mut roles = Vec::new();
        for (code, probability) in probabilities.iter().enumerate() {
            if *probability >= threshold {
                roles.push(self.artifact.label_encoder.inverse_transform(code)?.to_string());
            }
        }

        if roles.is_empty() {
            debug!("No role cleared threshold {threshold}; using similarity fallback");
            roles = self.nearest_roles(&input)?;
        }

        Ok(roles)
    }

    /// Request-path entry point for a raw JSON skills list. Items that are
    /// not strings take the same fallback path as any other failure.
    pub fn predict_json_or_fallback(&self, skills: &[Value], interest: &str) -> Vec<String> {
        or_fallback(
            skill_texts(skills).and_then(|texts| self.predict(&texts, interest, self.threshold)),
        )
    }

    fn nearest_roles(&self, input: &[f64]) -> Result<Vec<String>, PredictionError> {
        let training = &self.artifact.training_features;
        if training.len() < NEIGHBOURS {
            return Err(PredictionError::InsufficientTrainingData(training.len()));
        }

        let similarities: Vec<f64> = training
            .iter()
            .map(|row| cosine_similarity(input, row))
            .collect();

        top_k_indices(&similarities, NEIGHBOURS)
            .into_iter()
            .map(|row| -> Result<String, PredictionError> {
                let code = self.artifact.training_labels[row];
                Ok(self.artifact.label_encoder.inverse_transform(code)?.to_string())
            })
            .collect()
    }
}

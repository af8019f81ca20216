//! Feature transform + classifier stages of the trained pipeline.
//!
//! The preprocessor turns a `{skills, interest_encoded}` row into one dense
//! vector: the TF-IDF block for the skills text comes first, followed by the
//! interest columns. The classifier maps that vector to one probability per
//! known role.

use std::collections::HashMap;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::model::ArtifactError;

#[derive(Debug, Error, PartialEq)]
pub enum PipelineError {
    #[error("interest code {code} is outside the {categories} one-hot categories")]
    InterestOutOfRange { code: usize, categories: usize },

    #[error("feature vector has {actual} columns, classifier expects {expected}")]
    FeatureWidth { expected: usize, actual: usize },
}

/// One input row, shaped like the training rows stored in the artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureRow {
    pub skills: String,
    pub interest_encoded: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Serialized form
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PipelineSpec {
    pub preprocessor: PreprocessorSpec,
    pub classifier: ClassifierSpec,
}

#[derive(Debug, Deserialize)]
pub struct PreprocessorSpec {
    pub skills: TfidfSpec,
    #[serde(default)]
    pub interest: InterestTransform,
}

fn default_token_pattern() -> String {
    r"(?u)\b\w\w+\b".to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

#[derive(Debug, Deserialize)]
pub struct TfidfSpec {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InterestTransform {
    #[default]
    Passthrough,
    OneHot { categories: usize },
}

impl InterestTransform {
    fn width(&self) -> usize {
        match self {
            InterestTransform::Passthrough => 1,
            InterestTransform::OneHot { categories } => *categories,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiClass {
    #[default]
    Multinomial,
    Ovr,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierSpec {
    LogisticRegression {
        #[serde(default)]
        multi_class: MultiClass,
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Compiled pipeline
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    token_pattern: Regex,
    ngram_range: (usize, usize),
    sublinear_tf: bool,
    norm: Option<Norm>,
}

impl TfidfVectorizer {
    fn compile(spec: TfidfSpec) -> Result<Self, ArtifactError> {
        if spec.idf.len() != spec.vocabulary.len() {
            return Err(ArtifactError::Invalid(format!(
                "idf has {} weights for a vocabulary of {} terms",
                spec.idf.len(),
                spec.vocabulary.len()
            )));
        }
        if let Some((term, col)) = spec
            .vocabulary
            .iter()
            .find(|&(_, &col)| col >= spec.idf.len())
        {
            return Err(ArtifactError::Invalid(format!(
                "vocabulary term {term:?} maps to column {col}, out of range"
            )));
        }
        let (min_n, max_n) = spec.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ArtifactError::Invalid(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }
        let token_pattern = Regex::new(&spec.token_pattern).map_err(|e| {
            ArtifactError::Invalid(format!("token_pattern does not compile: {e}"))
        })?;

        Ok(Self {
            vocabulary: spec.vocabulary,
            idf: spec.idf,
            token_pattern,
            ngram_range: spec.ngram_range,
            sublinear_tf: spec.sublinear_tf,
            norm: spec.norm,
        })
    }

    fn width(&self) -> usize {
        self.idf.len()
    }

    fn terms(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = self
            .token_pattern
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            terms.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        terms
    }

    fn transform_into(&self, text: &str, out: &mut Vec<f64>) {
        let mut block = vec![0.0_f64; self.width()];
        for term in self.terms(text) {
            if let Some(&col) = self.vocabulary.get(&term) {
                block[col] += 1.0;
            }
        }

        for (col, value) in block.iter_mut().enumerate() {
            if *value > 0.0 && self.sublinear_tf {
                *value = 1.0 + value.ln();
            }
            *value *= self.idf[col];
        }

        let norm = match self.norm {
            Some(Norm::L2) => block.iter().map(|v| v * v).sum::<f64>().sqrt(),
            Some(Norm::L1) => block.iter().map(|v| v.abs()).sum::<f64>(),
            None => 0.0,
        };
        if norm > 0.0 {
            block.iter_mut().for_each(|v| *v /= norm);
        }

        out.extend(block);
    }
}

#[derive(Debug)]
struct LogisticRegression {
    multi_class: MultiClass,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
}

impl LogisticRegression {
    fn n_classes(&self) -> usize {
        // A binary model stores a single row scoring the positive class.
        if self.coef.len() == 1 {
            2
        } else {
            self.coef.len()
        }
    }

    fn decision(&self, features: &[f64]) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect()
    }

    fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        let scores = self.decision(features);

        if scores.len() == 1 {
            let positive = sigmoid(scores[0]);
            return vec![1.0 - positive, positive];
        }

        match self.multi_class {
            MultiClass::Multinomial => softmax(&scores),
            MultiClass::Ovr => {
                let raw: Vec<f64> = scores.into_iter().map(sigmoid).collect();
                let total: f64 = raw.iter().sum();
                raw.into_iter().map(|p| p / total).collect()
            }
        }
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

/// Immutable, validated pipeline ready for inference.
#[derive(Debug)]
pub struct Pipeline {
    skills: TfidfVectorizer,
    interest: InterestTransform,
    classifier: LogisticRegression,
}

impl Pipeline {
    pub fn compile(spec: PipelineSpec) -> Result<Self, ArtifactError> {
        let skills = TfidfVectorizer::compile(spec.preprocessor.skills)?;
        let interest = spec.preprocessor.interest;
        let width = skills.width() + interest.width();

        let ClassifierSpec::LogisticRegression {
            multi_class,
            coef,
            intercept,
        } = spec.classifier;

        if coef.is_empty() {
            return Err(ArtifactError::Invalid("classifier has no coefficients".into()));
        }
        if intercept.len() != coef.len() {
            return Err(ArtifactError::Invalid(format!(
                "classifier has {} coef rows but {} intercepts",
                coef.len(),
                intercept.len()
            )));
        }
        if let Some(row) = coef.iter().position(|row| row.len() != width) {
            return Err(ArtifactError::Invalid(format!(
                "coef row {row} has {} columns, preprocessor produces {width}",
                coef[row].len()
            )));
        }

        Ok(Self {
            skills,
            interest,
            classifier: LogisticRegression {
                multi_class,
                coef,
                intercept,
            },
        })
    }

    /// Width of the vector produced by [`Pipeline::transform`].
    pub fn feature_width(&self) -> usize {
        self.skills.width() + self.interest.width()
    }

    pub fn n_classes(&self) -> usize {
        self.classifier.n_classes()
    }

    pub fn transform(&self, row: &FeatureRow) -> Result<Vec<f64>, PipelineError> {
        let mut features = Vec::with_capacity(self.feature_width());
        self.skills.transform_into(&row.skills, &mut features);

        match self.interest {
            InterestTransform::Passthrough => features.push(row.interest_encoded as f64),
            InterestTransform::OneHot { categories } => {
                if row.interest_encoded >= categories {
                    return Err(PipelineError::InterestOutOfRange {
                        code: row.interest_encoded,
                        categories,
                    });
                }
                let start = features.len();
                features.resize(start + categories, 0.0);
                features[start + row.interest_encoded] = 1.0;
            }
        }

        Ok(features)
    }

    /// One probability per class, indexed by label code.
    pub fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, PipelineError> {
        if features.len() != self.feature_width() {
            return Err(PipelineError::FeatureWidth {
                expected: self.feature_width(),
                actual: features.len(),
            });
        }
        Ok(self.classifier.predict_proba(features))
    }
}

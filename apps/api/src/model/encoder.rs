use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EncoderError {
    #[error("unknown category: {0:?}")]
    UnknownCategory(String),

    #[error("code {code} is out of range for {len} classes")]
    UnknownCode { code: usize, len: usize },
}

#[derive(Debug, Deserialize)]
struct RawLabelEncoder {
    classes: Vec<String>,
}

/// Bidirectional string ↔ integer code mapping. The code of a class is its
/// position in `classes`.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawLabelEncoder")]
pub struct LabelEncoder {
    classes: Vec<String>,
    index: HashMap<String, usize>,
}

impl From<RawLabelEncoder> for LabelEncoder {
    fn from(raw: RawLabelEncoder) -> Self {
        Self::new(raw.classes)
    }
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        let index = classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        Self { classes, index }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn transform(&self, value: &str) -> Result<usize, EncoderError> {
        self.index
            .get(value)
            .copied()
            .ok_or_else(|| EncoderError::UnknownCategory(value.to_string()))
    }

    pub fn inverse_transform(&self, code: usize) -> Result<&str, EncoderError> {
        self.classes
            .get(code)
            .map(String::as_str)
            .ok_or(EncoderError::UnknownCode {
                code,
                len: self.classes.len(),
            })
    }
}

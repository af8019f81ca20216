//! Small hand-built artifact shared by tests.
//!
//! Vocabulary columns: python, sql, excel, react, javascript, css, docker,
//! then the passthrough interest column. "docker" carries no weight in any
//! class, so a docker-only profile scores every role at 0.25.

use serde_json::{json, Value};

use crate::model::ModelArtifact;

pub fn sample_artifact() -> Value {
    json!({
        "pipeline": {
            "preprocessor": {
                "skills": {
                    "vocabulary": {
                        "python": 0, "sql": 1, "excel": 2,
                        "react": 3, "javascript": 4, "css": 5,
                        "docker": 6
                    },
                    "idf": [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]
                },
                "interest": { "kind": "passthrough" }
            },
            "classifier": {
                "kind": "logistic_regression",
                "coef": [
                    [4.0, 4.0, 4.0, -2.0, -2.0, -2.0, 0.0, -2.0],
                    [-2.0, -2.0, -2.0, 4.0, 4.0, 4.0, 0.0, 2.0],
                    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
                ],
                "intercept": [0.0, 0.0, 0.0, 0.0]
            }
        },
        "label_encoder": {
            "classes": ["Data Analyst", "Frontend Developer", "Software Developer", "Backend Developer"]
        },
        "interest_encoder": { "classes": ["Data", "Web"] },
        "X": [
            { "skills": "python sql", "interest_encoded": 0 },
            { "skills": "docker python", "interest_encoded": 1 },
            { "skills": "react css", "interest_encoded": 1 },
            { "skills": "docker", "interest_encoded": 0 }
        ],
        "y": [0, 2, 1, 3]
    })
}

pub fn sample_model() -> ModelArtifact {
    ModelArtifact::from_json(&sample_artifact().to_string()).unwrap()
}

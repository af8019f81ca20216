// Trained role classifier: artifact loading, encoders, feature pipeline and
// the similarity helpers used by the nearest-neighbour fallback.

pub mod artifact;
pub mod encoder;
pub mod pipeline;
pub mod similarity;

#[cfg(test)]
pub mod fixtures;

pub use artifact::{ArtifactError, ModelArtifact};

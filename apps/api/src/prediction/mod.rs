// Role prediction: classifier inference with fallback, plus the reference
// video links attached to each predicted role.

pub mod handlers;
pub mod predictor;
pub mod video_links;

pub use predictor::RolePredictor;

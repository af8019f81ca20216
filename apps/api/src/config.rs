use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{ensure, Context, Result};

use crate::llm_client::DEFAULT_MODEL;
use crate::prediction::predictor::DEFAULT_THRESHOLD;

/// Application configuration loaded from environment variables.
/// Relative asset locations default to paths under the executable's directory.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub model_path: PathBuf,
    pub jobs_csv_path: PathBuf,
    pub templates_dir: PathBuf,
    pub static_dir: PathBuf,
    /// Optional at startup; chat requests fail until it is set.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: Option<String>,
    pub chat_timeout: Option<Duration>,
    pub prediction_threshold: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_dir = match var("APP_BASE_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => executable_dir()?,
        };
        let assets_dir = base_dir.join("attached_assets");

        let prediction_threshold = match var("PREDICTION_THRESHOLD") {
            Some(raw) => raw
                .parse::<f64>()
                .context("PREDICTION_THRESHOLD must be a number")?,
            None => DEFAULT_THRESHOLD,
        };
        ensure!(
            (0.0..=1.0).contains(&prediction_threshold),
            "PREDICTION_THRESHOLD must be between 0 and 1, got {prediction_threshold}"
        );

        let chat_timeout = var("CHAT_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>()
                    .map(Duration::from_secs)
                    .context("CHAT_TIMEOUT_SECS must be a whole number of seconds")
            })
            .transpose()?;

        Ok(Config {
            port: var("PORT")
                .unwrap_or_else(|| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            model_path: path_or(var("MODEL_PATH"), &assets_dir, "job_model.json"),
            jobs_csv_path: path_or(var("JOBS_CSV_PATH"), &assets_dir, "jobs.csv"),
            templates_dir: path_or(var("TEMPLATES_DIR"), &base_dir, "templates"),
            static_dir: path_or(var("STATIC_DIR"), &base_dir, "static"),
            gemini_api_key: var("GEMINI_API_KEY"),
            gemini_model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_base_url: var("GEMINI_BASE_URL"),
            chat_timeout,
            prediction_threshold,
        })
    }
}

fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("cannot locate the running executable")?;
    exe.parent()
        .map(Path::to_path_buf)
        .context("executable path has no parent directory")
}

fn path_or(value: Option<String>, base: &Path, default: &str) -> PathBuf {
    value
        .map(PathBuf::from)
        .unwrap_or_else(|| base.join(default))
}

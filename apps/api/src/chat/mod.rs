//! Chat proxy: wraps the user's message in the counsellor prompt, forwards it
//! to the configured `ChatBackend` and cleans up the reply.

pub mod handlers;
pub mod prompts;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::llm_client::{ChatBackend, LlmError};

static BOLD_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold marker pattern is valid"));

/// Removes markdown bold markers: `**text**` → `text`, everywhere in the string.
pub fn strip_bold(text: &str) -> String {
    BOLD_MARKER.replace_all(text, "$1").into_owned()
}

pub async fn ask(backend: &dyn ChatBackend, message: &str) -> Result<String, LlmError> {
    let prompt = prompts::counselor_prompt(message);
    let reply = backend.generate(&prompt).await?;
    Ok(strip_bold(&reply))
}

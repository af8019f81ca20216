/// Prefix steering the model toward short career-counselling answers.
pub const COUNSELOR_PREFIX: &str =
    "You are a career counselor helping users with job-related questions so give answer in short.";

pub fn counselor_prompt(message: &str) -> String {
    format!("{COUNSELOR_PREFIX}\nUser: {message}")
}

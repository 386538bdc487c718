use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("inference error: {0}")]
    Inference(#[from] InferenceError),
    #[error("tool error: {0}")]
    Tool(#[from] ToolError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing {what}. Set {} in your environment", .vars.join(" or "))]
    MissingCredential {
        what: &'static str,
        vars: &'static [&'static str],
    },
}

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("API returned {status}: {body}")]
    ApiError { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    Parse(String),
}

/// Failures of the weather lookup. Everything except `Configuration` is an
/// upstream failure.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    #[error("request failed: {0}")]
    Request(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("weather API returned {status}: {body}")]
    ApiError { status: u16, body: String },
    #[error("failed to parse weather response: {0}")]
    Parse(String),
}

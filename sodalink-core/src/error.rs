use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // Network errors
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),

    // Extraction errors
    #[error("embedded data not found")]
    PayloadNotFound,

    #[error("JSON parse failed: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("audio data not found")]
    AudioDataNotFound,

    // Catch-all for failures outside the classes above
    #[error("unknown error: {detail}")]
    Unknown { detail: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;

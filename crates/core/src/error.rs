use thiserror::Error;

#[derive(Error, Debug)]
pub enum TldwError {
    #[error("No transcript found for video {video_id}")]
    NoTranscriptFound { video_id: String },

    #[error("Captions unavailable for video {video_id}: {reason}")]
    CaptionsUnavailable { video_id: String, reason: String },

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response from {service}: {reason}")]
    InvalidResponse { service: &'static str, reason: String },

    #[error("Invalid chunk config: overlap {overlap} must be smaller than chunk size {size}")]
    InvalidChunkConfig { size: usize, overlap: usize },

    #[error("Chunk config rejected by splitter: {0}")]
    ChunkConfig(#[from] text_splitter::ChunkConfigError),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, TldwError>;

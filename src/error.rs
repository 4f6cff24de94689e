use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API key not set. Put YOUTUBE_API in the environment or a .env file.")]
    ApiKeyMissing,

    #[error("Channel ID not set. Put CHANNEL_ID in the environment or a .env file.")]
    ChannelIdMissing,

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed API response: {0}")]
    MalformedResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the upstream refused the call because the key ran out of quota
    pub fn is_quota_exhausted(&self) -> bool {
        matches!(self, Error::QuotaExceeded(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmashcutError {
    #[error("Please upload a valid SRT file")]
    InvalidFileType { file_name: String },

    #[error("Failed to read file")]
    ReadFailed {
        file_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No valid subtitle entries found in the file")]
    NoEntries { file_name: String },

    #[error("Segment interval must be a positive number of minutes, got {minutes}")]
    InvalidInterval { minutes: f64 },

    #[error("Please configure your OpenRouter API key first")]
    MissingApiKey,

    #[error("Please select an AI model first")]
    MissingModel,

    #[error("Invalid API key. Please check your OpenRouter API key.")]
    InvalidApiKey,

    #[error("Insufficient credits. Please add credits to your OpenRouter account.")]
    InsufficientCredits,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("API request failed ({status}): {message}")]
    ApiFailed { status: u16, message: String },

    #[error("Invalid YouTube URL. Please enter a valid YouTube video link.")]
    InvalidVideoUrl { url: String },

    #[error("Please sign in with YouTube first to fetch video details.")]
    MissingAccessToken,

    #[error("Authentication expired. Please sign in again.")]
    AuthExpired,

    #[error("Access denied. Please check your YouTube API permissions.")]
    AccessDenied,

    #[error("Video not found. Please check the URL and try again.")]
    VideoNotFound { video_id: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, SmashcutError>;

#[derive(thiserror::Error, Debug)]
pub enum OpenAlexError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("OpenAlex API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

pub type Result<T> = std::result::Result<T, OpenAlexError>;

#[derive(thiserror::Error, Debug)]
pub enum ZoteroError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Zotero API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("invalid library type {0:?}: must be \"user\" or \"group\"")]
    InvalidLibraryType(String),
}

pub type Result<T> = std::result::Result<T, ZoteroError>;

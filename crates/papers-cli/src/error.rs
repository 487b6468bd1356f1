use papers_core::SyncError;
use papers_zotero::ZoteroError;

use crate::config::ConfigError;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Could not connect to Zotero: {0}")]
    Connect(#[source] ZoteroError),
    #[error("Error processing papers: {0}")]
    Sync(#[from] SyncError),
    #[error("Unexpected error: {0}")]
    Unexpected(#[source] BoxError),
}

impl AppError {
    /// Every failure exits with 1; only cancellation and success exit with 0.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Each `source()` below this error, outermost first.
    pub fn causes(&self) -> Vec<String> {
        let mut causes = Vec::new();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }
        causes
    }
}

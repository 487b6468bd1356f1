use papers_zotero::ZoteroError;

#[derive(thiserror::Error, Debug)]
pub enum SyncError {
    #[error("could not fetch collection {key}: {source}")]
    Collection {
        key: String,
        #[source]
        source: ZoteroError,
    },
    #[error("could not list items of collection {key}: {source}")]
    Items {
        key: String,
        #[source]
        source: ZoteroError,
    },
    #[error("could not fetch full text for item {key}: {source}")]
    FullText {
        key: String,
        #[source]
        source: ZoteroError,
    },
}

pub mod error;
pub mod export;
pub mod library;
pub mod record;

pub use error::SyncError;
pub use export::{ExportReport, export_papers, markdown_document, markdown_path, sanitize_filename};
pub use library::{PaperLibrary, SyncSummary};
pub use record::{PaperRecord, looks_like_doi, strip_doi_prefix};
pub use papers_openalex::OpenAlexClient;
pub use papers_zotero::{LibraryType, ZoteroClient};

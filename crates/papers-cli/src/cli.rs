use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "fulltext-to-markdown",
    version,
    about = "Retrieve fulltext from Zotero, convert to markdown, and add to an Obsidian directory",
    after_help = "Environment variables: ZOTERO_API_KEY, ZOTERO_LIBRARY_ID, ZOTERO_COLLECTION_KEY, \
ZOTERO_LIBRARY_TYPE, OBSIDIAN_DIRECTORY, OPENALEX_MAILTO, OPENALEX_KEY"
)]
pub struct Cli {
    /// Zotero API key (prompted for when missing)
    #[arg(long, env = "ZOTERO_API_KEY", hide_env_values = true)]
    pub zotero_api_key: Option<String>,

    /// Zotero library ID (prompted for when missing)
    #[arg(long, env = "ZOTERO_LIBRARY_ID")]
    pub zotero_library_id: Option<String>,

    /// Zotero collection key (prompted for when missing)
    #[arg(long, env = "ZOTERO_COLLECTION_KEY")]
    pub zotero_collection_key: Option<String>,

    /// Zotero library type: user or group
    #[arg(long, env = "ZOTERO_LIBRARY_TYPE", default_value = "user")]
    pub zotero_library_type: String,

    /// Obsidian directory to save markdown files (created if missing)
    #[arg(long, env = "OBSIDIAN_DIRECTORY")]
    pub obsidian_directory: Option<PathBuf>,

    /// Show what would be processed without saving files
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

use std::io;
use std::path::{Path, PathBuf};

use papers_zotero::LibraryType;

use crate::cli::Cli;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Invalid library type: {0}. Must be 'user' or 'group'.")]
    InvalidLibraryType(String),
    #[error("Cannot create directory {}: {source}", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} exists but is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("{} is required", .0.label())]
    MissingCredential(Field),
    #[error("Could not read {}: {source}", .field.label())]
    Prompt {
        field: Field,
        #[source]
        source: io::Error,
    },
}

/// Flags and environment merged and validated, before prompting. Credentials
/// may still be missing.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub api_key: Option<String>,
    pub library_id: Option<String>,
    pub collection_key: Option<String>,
    pub library_type: LibraryType,
    pub output_dir: Option<PathBuf>,
    pub dry_run: bool,
    pub verbose: bool,
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub library_id: String,
    pub collection_key: String,
    pub library_type: LibraryType,
    pub output_dir: Option<PathBuf>,
    pub dry_run: bool,
    pub verbose: bool,
}

impl Config {
    /// Where the exporter should write: never anywhere under `--dry-run`.
    pub fn export_dir(&self) -> Option<&Path> {
        if self.dry_run {
            None
        } else {
            self.output_dir.as_deref()
        }
    }
}

/// A value the run needs that flags and environment may leave unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ApiKey,
    LibraryId,
    CollectionKey,
    OutputDirectory,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::ApiKey => "Zotero API key",
            Field::LibraryId => "Zotero library ID",
            Field::CollectionKey => "Zotero collection key",
            Field::OutputDirectory => "Obsidian directory",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Field::ApiKey => "Please enter your Zotero API key: ",
            Field::LibraryId => "Please enter your Zotero library ID: ",
            Field::CollectionKey => "Please enter your Zotero collection key: ",
            Field::OutputDirectory => {
                "Please enter your Obsidian directory to save markdown files (optional, press Enter to skip): "
            }
        }
    }

    /// Read without echo.
    pub fn is_secret(self) -> bool {
        matches!(self, Field::ApiKey)
    }

    /// An empty answer aborts the run. Optional fields stay unset instead.
    pub fn is_required(self) -> bool {
        !matches!(self, Field::OutputDirectory)
    }
}

impl Settings {
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::ApiKey => self.api_key = Some(value),
            Field::LibraryId => self.library_id = Some(value),
            Field::CollectionKey => self.collection_key = Some(value),
            Field::OutputDirectory => self.output_dir = Some(PathBuf::from(value)),
        }
    }

    fn is_set(&self, field: Field) -> bool {
        match field {
            Field::ApiKey => self.api_key.is_some(),
            Field::LibraryId => self.library_id.is_some(),
            Field::CollectionKey => self.collection_key.is_some(),
            Field::OutputDirectory => self.output_dir.is_some(),
        }
    }

    /// Turn complete settings into a [`Config`]; the first missing required
    /// field is an error.
    pub fn into_config(self) -> Result<Config, ConfigError> {
        let require = |value: Option<String>, field| value.ok_or(ConfigError::MissingCredential(field));
        Ok(Config {
            api_key: require(self.api_key, Field::ApiKey)?,
            library_id: require(self.library_id, Field::LibraryId)?,
            collection_key: require(self.collection_key, Field::CollectionKey)?,
            library_type: self.library_type,
            output_dir: self.output_dir,
            dry_run: self.dry_run,
            verbose: self.verbose,
        })
    }
}

/// Validate parsed flags/environment: the library type must be `user` or
/// `group`, and an output directory must be (or become) a directory. Blank
/// strings count as unset.
pub fn resolve(cli: Cli) -> Result<Settings, ConfigError> {
    let library_type = cli
        .zotero_library_type
        .parse::<LibraryType>()
        .map_err(|_| ConfigError::InvalidLibraryType(cli.zotero_library_type.clone()))?;

    let output_dir = cli
        .obsidian_directory
        .filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = &output_dir {
        ensure_output_dir(dir)?;
    }

    Ok(Settings {
        api_key: non_blank(cli.zotero_api_key),
        library_id: non_blank(cli.zotero_library_id),
        collection_key: non_blank(cli.zotero_collection_key),
        library_type,
        output_dir,
        dry_run: cli.dry_run,
        verbose: cli.verbose,
    })
}

/// Create `path` (with parents) when missing; fail when it exists as
/// something other than a directory.
pub fn ensure_output_dir(path: &Path) -> Result<(), ConfigError> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|source| ConfigError::CreateDirectory {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Created directory: {}", path.display());
    } else if !path.is_dir() {
        return Err(ConfigError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}

/// Fields still unset after [`resolve`], in prompting order. Pure: no I/O.
pub fn missing_fields(settings: &Settings) -> Vec<Field> {
    [
        Field::ApiKey,
        Field::LibraryId,
        Field::CollectionKey,
        Field::OutputDirectory,
    ]
    .into_iter()
    .filter(|f| !settings.is_set(*f))
    .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

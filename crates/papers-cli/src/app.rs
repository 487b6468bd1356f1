use std::io::Write;

use papers_core::{ExportReport, PaperLibrary, export_papers};
use papers_openalex::OpenAlexClient;
use papers_zotero::ZoteroClient;

use crate::cli::Cli;
use crate::config::{self, Config};
use crate::error::AppError;
use crate::prompt::{self, Prompter};

/// How a run ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// Interrupted with Ctrl-C.
    Cancelled,
}

/// Log how the run ended and return its exit status: 0 on completion or
/// cancellation, the error's code otherwise. With `verbose`, an error's
/// cause chain is written to `err_out`.
pub fn exit_status(outcome: Result<Outcome, AppError>, verbose: bool, err_out: &mut impl Write) -> u8 {
    match outcome {
        Ok(Outcome::Completed) => 0,
        Ok(Outcome::Cancelled) => {
            tracing::info!("Operation cancelled by user");
            0
        }
        Err(err) => {
            tracing::error!("{err}");
            if verbose {
                for cause in err.causes() {
                    let _ = writeln!(err_out, "  caused by: {cause}");
                }
            }
            err.exit_code()
        }
    }
}

/// Resolve configuration, prompt for what is missing, then sync and export.
///
/// `connect` builds the API clients once the configuration is complete, so
/// nothing touches the network when resolution or prompting fails.
pub async fn run<P, F>(cli: Cli, mut prompter: P, connect: F) -> Result<ExportReport, AppError>
where
    P: Prompter + Send + 'static,
    F: FnOnce(&Config) -> (ZoteroClient, OpenAlexClient),
{
    let settings = config::resolve(cli)?;

    // Prompting blocks on stdin; keep it off the runtime thread so Ctrl-C is
    // still observed, and carry the scoped subscriber along.
    let dispatch = tracing::dispatcher::get_default(|d| d.clone());
    let config = tokio::task::spawn_blocking(move || {
        tracing::dispatcher::with_default(&dispatch, || prompt::complete(settings, &mut prompter))
    })
    .await
    .map_err(|e| AppError::Unexpected(e.into()))??;

    let (zotero, openalex) = connect(&config);
    sync_and_export(&config, zotero, openalex).await
}

/// Build the clients for a resolved configuration.
pub fn connect(config: &Config) -> (ZoteroClient, OpenAlexClient) {
    let zotero = ZoteroClient::new(config.library_id.as_str(), config.api_key.as_str())
        .with_library_type(config.library_type);
    (zotero, OpenAlexClient::from_env())
}

pub async fn sync_and_export(
    config: &Config,
    zotero: ZoteroClient,
    openalex: OpenAlexClient,
) -> Result<ExportReport, AppError> {
    tracing::info!("Initializing Zotero client...");
    zotero.get_key_info().await.map_err(AppError::Connect)?;
    tracing::debug!(
        library_type = %zotero.library_type(),
        library_id = zotero.library_id(),
        "Zotero key accepted"
    );

    tracing::info!("Initializing OpenAlex client...");
    let mut library = PaperLibrary::new(zotero, openalex, config.collection_key.as_str());
    let summary = library.sync_zotero_collection().await?;
    tracing::info!("{summary}");

    let report = export_papers(library.papers(), config.export_dir());
    if config.verbose {
        if !report.skipped.is_empty() {
            tracing::info!("Skipped without full text: {}", report.skipped.join(", "));
        }
        if !report.failed.is_empty() {
            tracing::info!("Failed to save: {}", report.failed.join(", "));
        }
    }
    Ok(report)
}

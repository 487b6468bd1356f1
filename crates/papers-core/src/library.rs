use std::fmt;

use papers_openalex::{GetParams, ListParams, OpenAlexClient, Work};
use papers_zotero::{Item, ItemListParams, ZoteroClient};

use crate::error::SyncError;
use crate::record::{PaperRecord, looks_like_doi, strip_doi_prefix};

/// Attachment content types Zotero indexes for full text, in the order they
/// are tried.
const FULLTEXT_CONTENT_TYPES: &[&str] = &["application/pdf", "application/epub+zip", "text/html"];

/// Outcome of a collection sync, printed as the run's status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSummary {
    pub collection_key: String,
    pub collection_name: String,
    pub papers: usize,
    pub with_fulltext: usize,
    pub enriched: usize,
}

impl fmt::Display for SyncSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Synced {} papers from collection '{}' ({}): {} with full text, {} matched in OpenAlex",
            self.papers, self.collection_name, self.collection_key, self.with_fulltext, self.enriched
        )
    }
}

/// A Zotero collection pulled into memory, with full texts and OpenAlex
/// metadata merged in.
pub struct PaperLibrary {
    zotero: ZoteroClient,
    openalex: OpenAlexClient,
    collection_key: String,
    papers: Vec<PaperRecord>,
}

impl PaperLibrary {
    pub fn new(
        zotero: ZoteroClient,
        openalex: OpenAlexClient,
        collection_key: impl Into<String>,
    ) -> Self {
        Self {
            zotero,
            openalex,
            collection_key: collection_key.into(),
            papers: Vec::new(),
        }
    }

    /// Papers from the last sync, in Zotero order.
    pub fn papers(&self) -> &[PaperRecord] {
        &self.papers
    }

    /// Fetch the collection from Zotero and replace the in-memory papers.
    ///
    /// Any Zotero failure aborts the sync. OpenAlex lookups are best-effort:
    /// a failed lookup leaves the record with its Zotero metadata.
    pub async fn sync_zotero_collection(&mut self) -> Result<SyncSummary, SyncError> {
        let key = self.collection_key.clone();
        let collection = self
            .zotero
            .get_collection(&key)
            .await
            .map_err(|source| SyncError::Collection { key: key.clone(), source })?;
        let items = self
            .zotero
            .all_collection_top_items(&key)
            .await
            .map_err(|source| SyncError::Items { key: key.clone(), source })?;
        tracing::debug!(collection = %key, items = items.len(), "fetched collection items");

        let mut papers = Vec::with_capacity(items.len());
        let mut enriched = 0;
        for item in &items {
            if item.is_note() || item.is_annotation() {
                tracing::debug!(key = %item.key, item_type = %item.data.item_type, "skipping non-paper item");
                continue;
            }
            let mut record = PaperRecord::from_zotero_item(item);
            record.fulltext = self.fetch_fulltext(item).await?;
            if let Some(work) = self.lookup_openalex(&record).await {
                record.fill_from_openalex(&work);
                enriched += 1;
            }
            papers.push(record);
        }

        let with_fulltext = papers.iter().filter(|p| p.usable_fulltext().is_some()).count();
        self.papers = papers;
        Ok(SyncSummary {
            collection_key: key,
            collection_name: collection.data.name,
            papers: self.papers.len(),
            with_fulltext,
            enriched,
        })
    }

    /// First non-blank full text among the item's indexable attachments. A
    /// standalone attachment is its own candidate.
    async fn fetch_fulltext(&self, item: &Item) -> Result<Option<String>, SyncError> {
        let candidates: Vec<String> = if item.is_attachment() {
            vec![item.key.clone()]
        } else if item.meta.num_children == Some(0) {
            Vec::new()
        } else {
            let children = self
                .zotero
                .list_item_children(
                    &item.key,
                    &ItemListParams::builder().item_type("attachment").limit(100).build(),
                )
                .await
                .map_err(|source| SyncError::FullText { key: item.key.clone(), source })?;
            let mut attachments: Vec<(usize, String)> = children
                .items
                .into_iter()
                .filter_map(|child| {
                    let rank = FULLTEXT_CONTENT_TYPES
                        .iter()
                        .position(|t| child.data.content_type.as_deref() == Some(*t))?;
                    Some((rank, child.key))
                })
                .collect();
            // Stable: keeps Zotero order among attachments of the same type
            attachments.sort_by_key(|(rank, _)| *rank);
            attachments.into_iter().map(|(_, key)| key).collect()
        };

        for key in candidates {
            let text = self
                .zotero
                .get_item_fulltext(&key)
                .await
                .map_err(|source| SyncError::FullText { key: key.clone(), source })?;
            if let Some(text) = text.filter(|t| !t.content.trim().is_empty()) {
                return Ok(Some(text.content));
            }
        }
        tracing::debug!(key = %item.key, "no indexed full text");
        Ok(None)
    }

    /// Resolve the record in OpenAlex: by DOI when it is well-formed, else by
    /// title search.
    async fn lookup_openalex(&self, record: &PaperRecord) -> Option<Work> {
        let doi = record.doi.as_deref().filter(|d| looks_like_doi(d));
        let result = if let Some(doi) = doi {
            let id = format!("doi:{}", strip_doi_prefix(doi));
            self.openalex.get_work(&id, &GetParams::default()).await
        } else if !record.title.trim().is_empty() {
            let params = ListParams::builder()
                .search(record.title.as_str())
                .per_page(1)
                .build();
            match self.openalex.list_works(&params).await {
                Ok(resp) => match resp.results.into_iter().next() {
                    Some(work) => Ok(work),
                    None => {
                        tracing::debug!(title = %record.title, "no OpenAlex match");
                        return None;
                    }
                },
                Err(e) => Err(e),
            }
        } else {
            return None;
        };
        match result {
            Ok(work) => Some(work),
            Err(e) => {
                tracing::warn!(key = %record.key, "OpenAlex lookup failed: {e}");
                None
            }
        }
    }
}

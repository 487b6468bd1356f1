use std::fmt;
use std::str::FromStr;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{Result, ZoteroError};
use crate::params::ItemListParams;
use crate::types::{Collection, FullText, Item, PagedResponse};

const DEFAULT_BASE_URL: &str = "https://api.zotero.org";
const API_VERSION: &str = "3";
/// Largest `limit` the API accepts.
const MAX_PAGE_SIZE: u32 = 100;

/// Whether a library id names a personal library or a group library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LibraryType {
    #[default]
    User,
    Group,
}

impl LibraryType {
    pub fn as_str(self) -> &'static str {
        match self {
            LibraryType::User => "user",
            LibraryType::Group => "group",
        }
    }

    fn path_segment(self) -> &'static str {
        match self {
            LibraryType::User => "users",
            LibraryType::Group => "groups",
        }
    }
}

impl fmt::Display for LibraryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LibraryType {
    type Err = ZoteroError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "user" => Ok(LibraryType::User),
            "group" => Ok(LibraryType::Group),
            other => Err(ZoteroError::InvalidLibraryType(other.to_string())),
        }
    }
}

#[derive(Clone)]
pub struct ZoteroClient {
    http: Client,
    base_url: String,
    library_type: LibraryType,
    library_id: String,
    api_key: String,
}

impl fmt::Debug for ZoteroClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoteroClient")
            .field("base_url", &self.base_url)
            .field("library_type", &self.library_type)
            .field("library_id", &self.library_id)
            .finish_non_exhaustive()
    }
}

impl ZoteroClient {
    /// Client for a user library. Use [`with_library_type`](Self::with_library_type)
    /// for group libraries.
    pub fn new(library_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            library_type: LibraryType::User,
            library_id: library_id.into(),
            api_key: api_key.into(),
        }
    }

    pub fn with_library_type(mut self, library_type: LibraryType) -> Self {
        self.library_type = library_type;
        self
    }

    /// Point the client at another host (used by tests against a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn library_type(&self) -> LibraryType {
        self.library_type
    }

    pub fn library_id(&self) -> &str {
        &self.library_id
    }

    fn library_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}{}",
            self.base_url,
            self.library_type.path_segment(),
            self.library_id,
            path
        )
    }

    async fn send(&self, url: &str, query: &[(&str, String)]) -> Result<Response> {
        tracing::debug!(%url, "zotero request");
        let resp = self
            .http
            .get(url)
            .header("Zotero-API-Key", &self.api_key)
            .header("Zotero-API-Version", API_VERSION)
            .query(query)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ZoteroError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        let body = self.send(url, query).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get_paged<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &ItemListParams,
    ) -> Result<PagedResponse<T>> {
        let resp = self.send(url, &params.to_query_pairs()).await?;
        let total_results = resp
            .headers()
            .get("Total-Results")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let body = resp.text().await?;
        let items = serde_json::from_str(&body)?;
        Ok(PagedResponse {
            items,
            total_results,
        })
    }

    /// Details of the API key in use (`GET /keys/current`). Fails with a 403
    /// `Api` error when the key is invalid.
    pub async fn get_key_info(&self) -> Result<serde_json::Value> {
        let url = format!("{}/keys/current", self.base_url);
        self.get_json(&url, &[]).await
    }

    pub async fn get_collection(&self, key: &str) -> Result<Collection> {
        let url = self.library_url(&format!("/collections/{key}"));
        self.get_json(&url, &[("format", "json".to_string())]).await
    }

    /// One page of the top-level items in a collection (child attachments and
    /// notes excluded).
    pub async fn list_collection_top_items(
        &self,
        key: &str,
        params: &ItemListParams,
    ) -> Result<PagedResponse<Item>> {
        let url = self.library_url(&format!("/collections/{key}/items/top"));
        self.get_paged(&url, params).await
    }

    /// Every top-level item in a collection, fetched page by page.
    pub async fn all_collection_top_items(&self, key: &str) -> Result<Vec<Item>> {
        let mut items = Vec::new();
        loop {
            let params = ItemListParams {
                start: Some(items.len() as u32),
                limit: Some(MAX_PAGE_SIZE),
                ..Default::default()
            };
            let page = self.list_collection_top_items(key, &params).await?;
            let fetched = page.items.len();
            items.extend(page.items);
            let done = match page.total_results {
                Some(total) => items.len() as u64 >= total,
                None => fetched < MAX_PAGE_SIZE as usize,
            };
            if done || fetched == 0 {
                break;
            }
        }
        Ok(items)
    }

    pub async fn list_item_children(
        &self,
        key: &str,
        params: &ItemListParams,
    ) -> Result<PagedResponse<Item>> {
        let url = self.library_url(&format!("/items/{key}/children"));
        self.get_paged(&url, params).await
    }

    /// Indexed full text of an attachment. `Ok(None)` when the attachment has
    /// not been indexed (the API answers 404).
    pub async fn get_item_fulltext(&self, key: &str) -> Result<Option<FullText>> {
        let url = self.library_url(&format!("/items/{key}/fulltext"));
        match self.get_json(&url, &[]).await {
            Ok(text) => Ok(Some(text)),
            Err(ZoteroError::Api { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::{OpenAlexError, Result};
use crate::params::{GetParams, ListParams};
use crate::types::{ListResponse, Work};

const DEFAULT_BASE_URL: &str = "https://api.openalex.org";

#[derive(Debug, Clone)]
pub struct OpenAlexClient {
    http: Client,
    base_url: String,
    mailto: Option<String>,
    api_key: Option<String>,
}

impl Default for OpenAlexClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenAlexClient {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            mailto: None,
            api_key: None,
        }
    }

    /// Client configured from `OPENALEX_MAILTO` (polite pool address) and
    /// `OPENALEX_KEY`. Unset or blank variables are ignored.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        let mut client = Self::new();
        client.mailto = var("OPENALEX_MAILTO");
        client.api_key = var("OPENALEX_KEY");
        client
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_mailto(mut self, mailto: impl Into<String>) -> Self {
        self.mailto = Some(mailto.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// `base_url` with `segments` appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let invalid = || OpenAlexError::InvalidBaseUrl(self.base_url.clone());
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        mut query: Vec<(&'static str, String)>,
    ) -> Result<T> {
        if let Some(mailto) = &self.mailto {
            query.push(("mailto", mailto.clone()));
        }
        if let Some(key) = &self.api_key {
            query.push(("api_key", key.clone()));
        }
        let url = self.endpoint(segments)?;
        tracing::debug!(%url, "openalex request");
        let resp = self.http.get(url).query(&query).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(OpenAlexError::Api {
                status: status.as_u16(),
                message,
            });
        }
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Get a single work by OpenAlex ID (`W…`, with or without the URI
    /// prefix) or by DOI (`doi:10.…`). Characters such as `#` or `?` in a
    /// DOI are escaped, not treated as URL syntax.
    pub async fn get_work(&self, id: &str, params: &GetParams) -> Result<Work> {
        let id = id.strip_prefix("https://openalex.org/").unwrap_or(id);
        let mut segments = vec!["works"];
        segments.extend(id.split('/'));
        self.get_json(&segments, params.to_query_pairs()).await
    }

    pub async fn list_works(&self, params: &ListParams) -> Result<ListResponse<Work>> {
        self.get_json(&["works"], params.to_query_pairs()).await
    }
}

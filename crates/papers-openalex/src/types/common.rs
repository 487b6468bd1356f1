use serde::{Deserialize, Serialize};

/// Pagination metadata returned with every list response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListMeta {
    /// Total number of matching entities.
    pub count: Option<i64>,
    pub db_response_time_ms: Option<i64>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default)]
    pub meta: ListMeta,
    pub results: Vec<T>,
}

/// Strip the `https://openalex.org/` prefix from an entity ID URI.
pub fn short_id(id: &str) -> &str {
    id.strip_prefix("https://openalex.org/").unwrap_or(id)
}

/// Query parameters for list endpoints.
///
/// ```
/// use papers_openalex::ListParams;
///
/// let params = ListParams::builder().search("sparse voxel octrees").per_page(1).build();
/// assert_eq!(params.per_page, Some(1));
/// ```
#[derive(Debug, Clone, Default, bon::Builder)]
pub struct ListParams {
    /// Full-text search across title, abstract and fulltext.
    #[builder(into)]
    pub search: Option<String>,
    /// Comma-separated filter expression (`publication_year:2020,is_oa:true`).
    #[builder(into)]
    pub filter: Option<String>,
    #[builder(into)]
    pub sort: Option<String>,
    /// Results per page, 1..=200.
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    /// Comma-separated list of top-level fields to return.
    #[builder(into)]
    pub select: Option<String>,
}

impl ListParams {
    pub(crate) fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(v) = &self.search {
            pairs.push(("search", v.clone()));
        }
        if let Some(v) = &self.filter {
            pairs.push(("filter", v.clone()));
        }
        if let Some(v) = &self.sort {
            pairs.push(("sort", v.clone()));
        }
        if let Some(v) = self.per_page {
            pairs.push(("per_page", v.to_string()));
        }
        if let Some(v) = self.page {
            pairs.push(("page", v.to_string()));
        }
        if let Some(v) = &self.select {
            pairs.push(("select", v.clone()));
        }
        pairs
    }
}

/// Query parameters for single-entity endpoints.
#[derive(Debug, Clone, Default, bon::Builder)]
pub struct GetParams {
    #[builder(into)]
    pub select: Option<String>,
}

impl GetParams {
    pub(crate) fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        self.select
            .iter()
            .map(|s| ("select", s.clone()))
            .collect()
    }
}

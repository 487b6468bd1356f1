/// Query parameters shared by the item listing endpoints.
///
/// Build with the generated builder or a struct literal over `Default`:
///
/// ```
/// use papers_zotero::ItemListParams;
///
/// let a = ItemListParams::builder().q("rendering").limit(5).build();
/// let b = ItemListParams { limit: Some(5), ..Default::default() };
/// assert_eq!(a.limit, b.limit);
/// ```
#[derive(Debug, Clone, Default, bon::Builder)]
pub struct ItemListParams {
    /// Item type filter, supports Zotero boolean syntax (`-attachment || note`).
    #[builder(into)]
    pub item_type: Option<String>,
    /// Quick search text.
    #[builder(into)]
    pub q: Option<String>,
    /// `titleCreatorYear` (default) or `everything`.
    #[builder(into)]
    pub qmode: Option<String>,
    #[builder(into)]
    pub sort: Option<String>,
    /// Zero-based offset of the first item.
    pub start: Option<u32>,
    /// Page size, 1..=100.
    pub limit: Option<u32>,
}

impl ItemListParams {
    pub(crate) fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("format", "json".to_string())];
        if let Some(v) = &self.item_type {
            pairs.push(("itemType", v.clone()));
        }
        if let Some(v) = &self.q {
            pairs.push(("q", v.clone()));
        }
        if let Some(v) = &self.qmode {
            pairs.push(("qmode", v.clone()));
        }
        if let Some(v) = &self.sort {
            pairs.push(("sort", v.clone()));
        }
        if let Some(v) = self.start {
            pairs.push(("start", v.to_string()));
        }
        if let Some(v) = self.limit {
            pairs.push(("limit", v.to_string()));
        }
        pairs
    }
}

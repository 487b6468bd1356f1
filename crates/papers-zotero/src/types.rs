use serde::{Deserialize, Serialize};

/// One page of a listing endpoint.
#[derive(Debug, Clone)]
pub struct PagedResponse<T> {
    pub items: Vec<T>,
    /// Value of the `Total-Results` header, when the API sent one.
    pub total_results: Option<u64>,
}

/// A library item: a regular item (journal article, book, ...), an
/// attachment, a note or an annotation.
///
/// # Example
///
/// ```json
/// {
///   "key": "X42A7DEE",
///   "version": 1214,
///   "meta": {"creatorSummary": "Lorentz et al.", "parsedDate": "2021-03-04", "numChildren": 2},
///   "data": {"key": "X42A7DEE", "itemType": "journalArticle", "title": "..." }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub key: String,
    pub version: Option<u64>,
    #[serde(default)]
    pub meta: ItemMeta,
    pub data: ItemData,
}

impl Item {
    pub fn is_attachment(&self) -> bool {
        self.data.item_type == "attachment"
    }

    pub fn is_note(&self) -> bool {
        self.data.item_type == "note"
    }

    pub fn is_annotation(&self) -> bool {
        self.data.item_type == "annotation"
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemMeta {
    pub creator_summary: Option<String>,
    /// Normalized `YYYY`, `YYYY-MM` or `YYYY-MM-DD` form of `data.date`.
    pub parsed_date: Option<String>,
    pub num_children: Option<u32>,
}

/// Editable fields of an item. Only the fields this crate reads are modelled;
/// the rest of the payload is ignored on deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemData {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub item_type: String,
    pub title: Option<String>,
    #[serde(default)]
    pub creators: Vec<Creator>,
    pub date: Option<String>,
    #[serde(rename = "DOI")]
    pub doi: Option<String>,
    pub abstract_note: Option<String>,
    pub publication_title: Option<String>,
    pub proceedings_title: Option<String>,
    /// Attachments only: MIME type of the stored file.
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    pub creator_type: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Single-field form, used for institutional authors.
    pub name: Option<String>,
}

impl Creator {
    /// "First Last", or the single-field name. `None` when both are blank.
    pub fn display_name(&self) -> Option<String> {
        if let (Some(first), Some(last)) = (&self.first_name, &self.last_name) {
            let name = format!("{first} {last}").trim().to_string();
            if !name.is_empty() {
                return Some(name);
            }
        }
        self.name.clone().filter(|n| !n.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub key: String,
    pub version: Option<u64>,
    #[serde(default)]
    pub meta: CollectionMeta,
    pub data: CollectionData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionMeta {
    pub num_collections: Option<u32>,
    pub num_items: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionData {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub name: String,
}

/// Indexed full-text content of an attachment, as returned by
/// `GET /items/{key}/fulltext`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullText {
    pub content: String,
    /// PDFs report pages.
    pub indexed_pages: Option<u32>,
    pub total_pages: Option<u32>,
    /// Other documents report characters.
    pub indexed_chars: Option<u64>,
    pub total_chars: Option<u64>,
}

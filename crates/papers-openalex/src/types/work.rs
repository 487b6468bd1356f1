use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A scholarly work: article, preprint, book chapter, dataset, ...
///
/// Only the fields used for metadata enrichment are modelled.
///
/// # Example
///
/// ```json
/// {
///   "id": "https://openalex.org/W2741809807",
///   "doi": "https://doi.org/10.7717/peerj.4375",
///   "display_name": "The state of OA",
///   "publication_year": 2018,
///   "cited_by_count": 1043,
///   "authorships": [{"author_position": "first", "author": {"display_name": "Heather Piwowar"}}]
/// }
/// ```
///
/// # ID formats
///
/// `get_work` accepts the OpenAlex key (`W2741809807`), the full URI, or a
/// DOI in the form `doi:10.7717/peerj.4375`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Work {
    /// OpenAlex ID URI (e.g. `"https://openalex.org/W2741809807"`).
    pub id: String,

    /// DOI as a full URL (e.g. `"https://doi.org/10.7717/peerj.4375"`).
    pub doi: Option<String>,

    /// Title as displayed. Same as `title` for almost all works.
    pub display_name: Option<String>,

    pub title: Option<String>,

    pub publication_year: Option<i32>,

    /// ISO 8601 date (e.g. `"2018-02-13"`).
    pub publication_date: Option<String>,

    /// Work type (`article`, `book-chapter`, `dataset`, ...).
    #[serde(rename = "type")]
    pub work_type: Option<String>,

    pub cited_by_count: Option<i64>,

    pub authorships: Option<Vec<Authorship>>,

    /// Where the work is best accessed (publisher landing page, venue).
    pub primary_location: Option<Location>,

    pub open_access: Option<OpenAccess>,

    /// Abstract as word → positions. Use [`Work::abstract_text`] to rebuild it.
    pub abstract_inverted_index: Option<HashMap<String, Vec<usize>>>,
}

impl Work {
    /// Rebuild the plain-text abstract from `abstract_inverted_index`.
    pub fn abstract_text(&self) -> Option<String> {
        let index = self.abstract_inverted_index.as_ref()?;
        let mut positioned: Vec<(usize, &str)> = index
            .iter()
            .flat_map(|(word, positions)| positions.iter().map(move |&p| (p, word.as_str())))
            .collect();
        if positioned.is_empty() {
            return None;
        }
        positioned.sort_unstable_by_key(|(p, _)| *p);
        let words: Vec<&str> = positioned.into_iter().map(|(_, w)| w).collect();
        Some(words.join(" "))
    }

    /// Author display names in authorship order.
    pub fn author_names(&self) -> Vec<String> {
        self.authorships
            .iter()
            .flatten()
            .filter_map(|a| a.author.as_ref()?.display_name.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Authorship {
    /// `first`, `middle` or `last`.
    pub author_position: Option<String>,
    pub author: Option<DehydratedAuthor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DehydratedAuthor {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub orcid: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub source: Option<DehydratedSource>,
    pub is_oa: Option<bool>,
    pub landing_page_url: Option<String>,
    pub pdf_url: Option<String>,
}

/// Journal, repository or conference a work appears in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DehydratedSource {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub issn: Option<Vec<String>>,
    pub issn_l: Option<String>,
    #[serde(rename = "type")]
    pub source_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAccess {
    pub is_oa: Option<bool>,
    /// `gold`, `green`, `hybrid`, `bronze`, `diamond` or `closed`.
    pub oa_status: Option<String>,
    pub oa_url: Option<String>,
}

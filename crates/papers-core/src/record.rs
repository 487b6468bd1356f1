use papers_openalex::Work;
use papers_zotero::Item;

/// One synchronized paper: Zotero metadata, OpenAlex enrichment, and the
/// indexed full text of its attachment when Zotero has one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaperRecord {
    /// Zotero item key.
    pub key: String,
    pub item_type: String,
    pub title: String,
    pub authors: Vec<String>,
    pub year: Option<u32>,
    /// Bare DOI, without `https://doi.org/` or `doi:` prefix.
    pub doi: Option<String>,
    pub venue: Option<String>,
    pub abstract_text: Option<String>,
    /// Short OpenAlex work ID (`W…`).
    pub openalex_id: Option<String>,
    pub cited_by_count: Option<i64>,
    pub fulltext: Option<String>,
}

impl PaperRecord {
    /// Build a record from a Zotero item's metadata. Full text and OpenAlex
    /// fields are left empty.
    pub fn from_zotero_item(item: &Item) -> Self {
        let data = &item.data;
        let authors = data
            .creators
            .iter()
            .filter_map(|c| c.display_name())
            .collect();
        // Try parsed_date first, then raw date field
        let year = item
            .meta
            .parsed_date
            .as_deref()
            .or(data.date.as_deref())
            .and_then(|d| d.split('-').next())
            .and_then(|y| y.trim().parse().ok());
        Self {
            key: item.key.clone(),
            item_type: data.item_type.clone(),
            title: data.title.clone().unwrap_or_default(),
            authors,
            year,
            doi: non_blank(data.doi.as_deref()).map(|d| strip_doi_prefix(d).to_string()),
            venue: non_blank(data.publication_title.as_deref())
                .or_else(|| non_blank(data.proceedings_title.as_deref()))
                .map(str::to_string),
            abstract_text: non_blank(data.abstract_note.as_deref()).map(str::to_string),
            ..Default::default()
        }
    }

    /// Merge OpenAlex metadata. Fields Zotero already filled are kept.
    pub fn fill_from_openalex(&mut self, work: &Work) {
        if self.openalex_id.is_none() {
            self.openalex_id = Some(papers_openalex::short_id(&work.id).to_string());
        }
        if self.cited_by_count.is_none() {
            self.cited_by_count = work.cited_by_count;
        }
        if self.doi.is_none() {
            self.doi = work.doi.as_deref().map(|d| strip_doi_prefix(d).to_string());
        }
        if self.title.trim().is_empty() {
            if let Some(title) = work.display_name.clone().or_else(|| work.title.clone()) {
                self.title = title;
            }
        }
        if self.authors.is_empty() {
            self.authors = work.author_names();
        }
        if self.year.is_none() {
            self.year = work.publication_year.and_then(|y| u32::try_from(y).ok());
        }
        if self.venue.is_none() {
            self.venue = work
                .primary_location
                .as_ref()
                .and_then(|l| l.source.as_ref())
                .and_then(|s| s.display_name.clone());
        }
        if self.abstract_text.is_none() {
            self.abstract_text = work.abstract_text();
        }
    }

    /// The full text, if present and not blank.
    pub fn usable_fulltext(&self) -> Option<&str> {
        self.fulltext.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Identifies the record in log messages: its title, or `#index` when
    /// the title is blank.
    pub fn label(&self, index: usize) -> String {
        if self.title.trim().is_empty() {
            format!("#{index}")
        } else {
            self.title.clone()
        }
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

pub fn looks_like_doi(input: &str) -> bool {
    let s = strip_doi_prefix(input);
    s.starts_with("10.") && s.contains('/')
}

pub fn strip_doi_prefix(doi: &str) -> &str {
    doi.strip_prefix("https://doi.org/")
        .or_else(|| doi.strip_prefix("http://doi.org/"))
        .or_else(|| doi.strip_prefix("https://dx.doi.org/"))
        .or_else(|| doi.strip_prefix("doi:"))
        .unwrap_or(doi)
}

//! Async client for the [Zotero Web API v3](https://www.zotero.org/support/dev/web_api/v3/start).
//!
//! Covers the read-only slice needed to pull a collection and the indexed
//! full text of its attachments:
//!
//! ```no_run
//! # async fn demo() -> papers_zotero::Result<()> {
//! use papers_zotero::{ItemListParams, LibraryType, ZoteroClient};
//!
//! let client = ZoteroClient::new("123456", "api-key").with_library_type(LibraryType::Group);
//! let page = client
//!     .list_collection_top_items("ABCD2345", &ItemListParams::builder().limit(10).build())
//!     .await?;
//! for item in &page.items {
//!     println!("{} {:?}", item.key, item.data.title);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod params;
mod types;

pub use client::{LibraryType, ZoteroClient};
pub use error::{Result, ZoteroError};
pub use params::ItemListParams;
pub use types::{
    Collection, CollectionData, CollectionMeta, Creator, FullText, Item, ItemData, ItemMeta,
    PagedResponse,
};

//! Async client for the [OpenAlex](https://openalex.org) works API.
//!
//! Only works are modelled: lookup by id or DOI, and search.

mod client;
mod error;
mod params;
mod types;

pub use client::OpenAlexClient;
pub use error::{OpenAlexError, Result};
pub use params::{GetParams, ListParams};
pub use types::*;

//! HadithStore - read-only hadith collections over HTTP
//!
//! Serves per-narrator hadith collections stored as JSON files. Each
//! collection is loaded on first use and cached for the life of the process.
//!
//! # Architecture
//!
//! ```text
//! data/
//! ├── abu-daud.json     # [{"number": 1, "arab": "...", "id": "..."}, ...]
//! ├── bukhari.json
//! └── muslim.json
//! ```
//!
//! The file stem is the narrator key. [`CollectionStore`] answers four
//! queries: list narrators, one narrator's page, one record, and a page over
//! every narrator taken as one sequence in listing order.
//!
//! # Example
//!
//! ```ignore
//! use hadithstore::{CollectionStore, QuerySpec};
//!
//! let store = CollectionStore::open("./data");
//! let page = store.query("bukhari", &QuerySpec::new(2, 10).with_search("shalat"))?;
//! let record = store.fetch_one("muslim", 42)?;
//! let all = store.query_all(&QuerySpec::default())?;
//! ```

pub mod cli;
pub mod config;
pub mod error;
mod filter;
pub mod http;
mod record;
pub mod source;
mod store;
pub mod window;

pub use error::StoreError;
pub use record::{NarratorKey, PageResult, QuerySpec, Record};
pub use source::{CollectionSource, DirSource};
pub use store::{Collection, CollectionStore};

/// Default page number
pub const DEFAULT_PAGE: usize = 1;

/// Default records per page
pub const DEFAULT_LIMIT: usize = 10;

/// Largest accepted records per page
pub const MAX_LIMIT: usize = 100;

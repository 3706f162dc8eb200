//! Record, query and page types

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT};

/// Narrator key, the base name of a collection file
pub type NarratorKey = String;

/// A single hadith entry within a narrator's collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Hadith number, unique within its narrator's collection
    pub number: u32,
    /// Arabic text
    #[serde(rename = "arab")]
    pub primary_text: String,
    /// Indonesian translation
    #[serde(rename = "id")]
    pub translated_text: String,
}

/// Filter and pagination parameters for a query.
///
/// Callers are expected to hand in values that already satisfy `page >= 1`
/// and `1 <= limit <= MAX_LIMIT`; [`QuerySpec::clamped`] produces such values
/// from raw user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub page: usize,
    pub limit: usize,
    pub search_text: Option<String>,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search_text: None,
        }
    }
}

impl QuerySpec {
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page,
            limit,
            search_text: None,
        }
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    /// Build a spec from unvalidated input, substituting defaults for missing
    /// values and clamping the rest to the nearest valid bound
    pub fn clamped(page: Option<i64>, limit: Option<i64>, search_text: Option<String>) -> Self {
        let page = page.map(|p| p.max(1) as usize).unwrap_or(DEFAULT_PAGE);
        let limit = limit
            .map(|l| l.clamp(1, MAX_LIMIT as i64) as usize)
            .unwrap_or(DEFAULT_LIMIT);
        let search_text = search_text.filter(|s| !s.is_empty());

        Self {
            page,
            limit,
            search_text,
        }
    }

    /// The search text, if present and non-empty
    pub fn search(&self) -> Option<&str> {
        self.search_text.as_deref().filter(|s| !s.is_empty())
    }
}

/// One page of records plus the number of records that matched overall
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PageResult {
    pub items: Vec<Record>,
    pub total_matching: usize,
}

impl PageResult {
    /// Number of pages needed to show every match at `limit` per page
    pub fn total_pages(&self, limit: usize) -> usize {
        if limit == 0 {
            return 0;
        }
        self.total_matching.div_ceil(limit)
    }
}

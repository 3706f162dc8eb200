//! Case-insensitive substring filter over record text

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::record::Record;

/// Matches records whose Arabic text or translation contains a literal
/// needle, ignoring case
#[derive(Debug, Clone)]
pub enum TextFilter {
    Regex(Regex),
    /// Used when the needle is too large to compile; compares lowercased text
    Lowercase(String),
}

impl TextFilter {
    pub fn new(needle: &str) -> Self {
        match RegexBuilder::new(&regex::escape(needle)).case_insensitive(true).build() {
            Ok(regex) => Self::Regex(regex),
            Err(e) => {
                debug!(error = %e, "Search text did not compile, using lowercase comparison");
                Self::Lowercase(needle.to_lowercase())
            }
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Self::Regex(regex) => regex.is_match(&record.translated_text) || regex.is_match(&record.primary_text),
            Self::Lowercase(needle) => {
                record.translated_text.to_lowercase().contains(needle.as_str())
                    || record.primary_text.to_lowercase().contains(needle.as_str())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(arab: &str, id: &str) -> Record {
        Record {
            number: 1,
            primary_text: arab.to_string(),
            translated_text: id.to_string(),
        }
    }

    #[test]
    fn test_matches_translation_ignoring_case() {
        let filter = TextFilter::new("SHALAT");
        assert!(filter.matches(&record("", "tentang shalat berjamaah")));
        assert!(!filter.matches(&record("", "tentang puasa")));
    }

    #[test]
    fn test_matches_primary_text() {
        let filter = TextFilter::new("الصلاة");
        assert!(filter.matches(&record("باب الصلاة", "bab")));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let filter = TextFilter::new("(a.b)");
        assert!(filter.matches(&record("", "x (a.b) y")));
        assert!(!filter.matches(&record("", "x (axb) y")));
    }

    #[test]
    fn test_lowercase_fallback_agrees() {
        let filter = TextFilter::Lowercase("puasa".to_string());
        assert!(filter.matches(&record("", "Bab PUASA Ramadhan")));
        assert!(!filter.matches(&record("", "bab zakat")));
    }
}

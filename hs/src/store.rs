//! Core CollectionStore implementation

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};
use crate::filter::TextFilter;
use crate::record::{NarratorKey, PageResult, QuerySpec, Record};
use crate::source::{CollectionSource, DirSource};
use crate::window::{BlockWindows, PageWindow};

/// A loaded collection, shared with callers without copying
pub type Collection = Arc<[Record]>;

/// Cache state for one narrator.
///
/// `len` is filled by count-only passes; `collection` by full loads. Both are
/// set at most once and never cleared.
#[derive(Debug, Default)]
struct Slot {
    collection: Option<Collection>,
    len: Option<usize>,
}

/// Shape of a record for counting. Field types match [`Record`], so a file
/// counts only if it would also load; text is borrowed from the input.
#[derive(Deserialize)]
struct RecordShape<'a> {
    #[serde(rename = "number")]
    _number: u32,
    #[serde(rename = "arab", borrow)]
    _arab: Cow<'a, str>,
    #[serde(rename = "id", borrow)]
    _id: Cow<'a, str>,
}

/// Loads narrator collections on first use and answers page queries over them
pub struct CollectionStore {
    source: Box<dyn CollectionSource>,
    slots: RwLock<HashMap<NarratorKey, Arc<Mutex<Slot>>>>,
}

impl CollectionStore {
    /// Open a store over a directory of `<narrator>.json` files.
    ///
    /// Nothing is loaded here; a missing or empty directory is only reported
    /// in the log and surfaces as an error on first use.
    pub fn open(data_dir: impl AsRef<Path>) -> Self {
        let source = DirSource::new(data_dir);
        match source.list() {
            Ok(narrators) if narrators.is_empty() => {
                warn!(data_dir = %source.root().display(), "No collection files found")
            }
            Ok(narrators) => {
                info!(data_dir = %source.root().display(), count = narrators.len(), "Opened collection store")
            }
            Err(e) => warn!(data_dir = %source.root().display(), error = %e, "Data directory is not readable"),
        }
        Self::with_source(source)
    }

    pub fn with_source(source: impl CollectionSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Narrator keys in listing order
    pub fn list_narrators(&self) -> Result<Vec<NarratorKey>> {
        self.source.list()
    }

    /// One page of a narrator's records, optionally filtered by search text
    pub fn query(&self, narrator: &str, spec: &QuerySpec) -> Result<PageResult> {
        let collection = self.collection(narrator)?;
        let window = PageWindow::new(spec.page, spec.limit);

        let Some(needle) = spec.search() else {
            return Ok(PageResult {
                items: window.slice(&collection[..]).to_vec(),
                total_matching: collection.len(),
            });
        };

        let filter = TextFilter::new(needle);
        let mut page = PageResult::default();
        collect_matches(&collection, &filter, &window, &mut page);
        Ok(page)
    }

    /// The first record in a narrator's collection with the given number.
    ///
    /// Any integer is accepted; numbers no record can carry, such as negative
    /// ones, are simply not found.
    pub fn fetch_one(&self, narrator: &str, number: i64) -> Result<Record> {
        let collection = self.collection(narrator)?;
        collection
            .iter()
            .find(|r| i64::from(r.number) == number)
            .cloned()
            .ok_or_else(|| StoreError::RecordNotFound {
                narrator: narrator.to_string(),
                number,
            })
    }

    /// One page over all narrators' records, taken as a single sequence in
    /// narrator listing order
    pub fn query_all(&self, spec: &QuerySpec) -> Result<PageResult> {
        let narrators = self.list_narrators()?;
        let window = PageWindow::new(spec.page, spec.limit);

        match spec.search() {
            Some(needle) => self.query_all_filtered(&narrators, &window, needle),
            None => self.query_all_unfiltered(&narrators, &window),
        }
    }

    // Match counts are unknown until each collection is scanned, so every
    // narrator is loaded and filtered
    fn query_all_filtered(&self, narrators: &[NarratorKey], window: &PageWindow, needle: &str) -> Result<PageResult> {
        let filter = TextFilter::new(needle);
        let mut page = PageResult::default();
        for narrator in narrators {
            let collection = self.collection(narrator)?;
            collect_matches(&collection, &filter, window, &mut page);
        }
        Ok(page)
    }

    fn query_all_unfiltered(&self, narrators: &[NarratorKey], window: &PageWindow) -> Result<PageResult> {
        let sizes = narrators
            .iter()
            .map(|n| self.narrator_len(n))
            .collect::<Result<Vec<_>>>()?;

        let total_matching: usize = sizes.iter().sum();

        let mut items = Vec::with_capacity(window.range(total_matching).len());
        for slice in BlockWindows::new(sizes.iter().copied(), *window) {
            let collection = self.collection(&narrators[slice.block])?;
            items.extend_from_slice(&collection[slice.range]);
        }

        Ok(PageResult { items, total_matching })
    }

    /// Number of records in a narrator's collection.
    ///
    /// Uses the cached collection when present; otherwise parses the file for
    /// its length only and remembers the count.
    fn narrator_len(&self, narrator: &str) -> Result<usize> {
        let slot = self.slot(narrator);
        let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(collection) = &guard.collection {
            return Ok(collection.len());
        }
        if let Some(len) = guard.len {
            return Ok(len);
        }

        let bytes = self.read_source(narrator)?;
        let shapes: Vec<RecordShape> = serde_json::from_slice(&bytes).map_err(|source| StoreError::MalformedCollection {
            narrator: narrator.to_string(),
            source,
        })?;

        debug!(narrator, len = shapes.len(), "Counted collection");
        guard.len = Some(shapes.len());
        Ok(shapes.len())
    }

    /// The narrator's collection, loading it on first use.
    ///
    /// Concurrent first calls for the same narrator serialize on the slot
    /// mutex, so the source is read once.
    fn collection(&self, narrator: &str) -> Result<Collection> {
        let slot = self.slot(narrator);
        let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(collection) = &guard.collection {
            debug!(narrator, "Collection cache hit");
            return Ok(collection.clone());
        }

        let bytes = self.read_source(narrator)?;
        let records: Vec<Record> = serde_json::from_slice(&bytes).map_err(|source| StoreError::MalformedCollection {
            narrator: narrator.to_string(),
            source,
        })?;

        info!(narrator, records = records.len(), "Loaded collection");
        let collection: Collection = records.into();
        guard.len = Some(collection.len());
        guard.collection = Some(collection.clone());
        Ok(collection)
    }

    fn read_source(&self, narrator: &str) -> Result<Vec<u8>> {
        self.source.read(narrator).inspect_err(|e| {
            if matches!(e, StoreError::NarratorNotFound { .. }) {
                self.forget(narrator);
            }
        })
    }

    fn slot(&self, narrator: &str) -> Arc<Mutex<Slot>> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(slot) = slots.get(narrator) {
            return slot.clone();
        }
        drop(slots);

        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots.entry(narrator.to_string()).or_default().clone()
    }

    // Keys that never resolve must not accumulate slots. The map and the
    // failing caller hold one reference each; any more means another caller
    // is waiting on the slot and it stays.
    fn forget(&self, narrator: &str) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(slot) = slots.get(narrator)
            && Arc::strong_count(slot) <= 2
        {
            slots.remove(narrator);
        }
    }

    /// Whether a narrator's records are held in memory
    pub fn is_cached(&self, narrator: &str) -> bool {
        let slot = self
            .slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(narrator)
            .cloned();
        slot.is_some_and(|slot| {
            slot.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .collection
                .is_some()
        })
    }
}

/// Append matches from `records` that fall in `window` to `page`, counting
/// every match in `page.total_matching`
fn collect_matches(records: &[Record], filter: &TextFilter, window: &PageWindow, page: &mut PageResult) {
    for record in records.iter().filter(|r| filter.matches(r)) {
        if window.contains(page.total_matching) {
            page.items.push(record.clone());
        }
        page.total_matching += 1;
    }
}

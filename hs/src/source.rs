//! Where collection bytes come from

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, StoreError};
use crate::record::NarratorKey;

/// File extension that marks a collection file
pub const COLLECTION_EXTENSION: &str = "json";

/// Backing storage for narrator collections
pub trait CollectionSource: Send + Sync {
    /// Narrator keys in listing order
    fn list(&self) -> Result<Vec<NarratorKey>>;

    /// Raw bytes of one narrator's collection.
    ///
    /// Returns [`StoreError::NarratorNotFound`] when the narrator has no
    /// backing collection.
    fn read(&self, narrator: &str) -> Result<Vec<u8>>;
}

/// A directory of `<narrator>.json` files
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn unavailable(&self, path: &Path, source: std::io::Error) -> StoreError {
        StoreError::StorageUnavailable {
            path: path.to_path_buf(),
            source,
        }
    }

    fn collection_path(&self, narrator: &str) -> Option<PathBuf> {
        // Keys are plain file stems; anything that could leave the directory is not a narrator
        let plain = !narrator.is_empty()
            && narrator != "."
            && narrator != ".."
            && !narrator.contains(['/', '\\', '\0']);
        plain.then(|| self.root.join(format!("{}.{}", narrator, COLLECTION_EXTENSION)))
    }
}

impl CollectionSource for DirSource {
    fn list(&self) -> Result<Vec<NarratorKey>> {
        let entries = fs::read_dir(&self.root).map_err(|e| self.unavailable(&self.root, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| self.unavailable(&self.root, e))?;
            let path = entry.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != COLLECTION_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }

        // read_dir order is filesystem dependent; listing order is by file name
        names.sort();
        Ok(names)
    }

    fn read(&self, narrator: &str) -> Result<Vec<u8>> {
        let not_found = || StoreError::NarratorNotFound {
            narrator: narrator.to_string(),
        };
        let path = self.collection_path(narrator).ok_or_else(not_found)?;

        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Err(not_found()),
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(not_found()),
            Err(e) => return Err(self.unavailable(&path, e)),
        }

        debug!(narrator, path = %path.display(), "Reading collection file");
        fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => not_found(),
            _ => self.unavailable(&path, e),
        })
    }
}

// ── Storage locations ──
//
// Merged by path, never pruned: the status payload has no "removed"
// signal, so an entry missing from one poll is not evidence it is gone.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageLocation {
    pub path: String,
    pub name: Option<String>,
    pub read_only: Option<bool>,
    /// Bytes.
    pub free_space: Option<u64>,
}

/// Ordered storage collection, unique by path.
///
/// Existing paths are replaced in place and keep their position; new
/// paths are appended in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageList {
    by_path: IndexMap<String, StorageLocation>,
}

impl StorageList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a batch of snapshots. Idempotent: merging the same batch
    /// twice leaves the list as merging it once.
    pub fn merge<I>(&mut self, incoming: I)
    where
        I: IntoIterator<Item = StorageLocation>,
    {
        for location in incoming {
            // `IndexMap::insert` keeps the slot of an existing key.
            self.by_path.insert(location.path.clone(), location);
        }
    }

    pub fn get(&self, path: &str) -> Option<&StorageLocation> {
        self.by_path.get(path)
    }

    pub fn position(&self, path: &str) -> Option<usize> {
        self.by_path.get_index_of(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StorageLocation> {
        self.by_path.values()
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}

impl Serialize for StorageList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.by_path.values())
    }
}

impl<'a> IntoIterator for &'a StorageList {
    type Item = &'a StorageLocation;
    type IntoIter = indexmap::map::Values<'a, String, StorageLocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.by_path.values()
    }
}

//! A whole-file JSON collection
//!
//! Loads a `Vec<T>` from one JSON file at startup and rewrites the complete
//! file after each mutation. Ids are allocated from a monotonic counter
//! initialized to `max(id) + 1` at load time, so ids are never reused even
//! after deletions.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::types::{Record, Result};

/// An in-memory collection mirrored to a single JSON file.
pub struct JsonCollection<T> {
    path: PathBuf,
    items: Vec<T>,
    next_id: u64,
}

impl<T> JsonCollection<T>
where
    T: Record + Serialize + DeserializeOwned,
{
    /// Load the collection from its backing file.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let raw = tokio::fs::read_to_string(&path).await?;
        let items: Vec<T> = serde_json::from_str(&raw)?;
        let next_id = items.iter().map(Record::id).max().unwrap_or(0) + 1;
        debug!(
            count = items.len(),
            next_id,
            "loaded collection from {}",
            path.display()
        );
        Ok(Self {
            path,
            items,
            next_id,
        })
    }

    /// Create an in-memory collection and write its initial file.
    pub async fn create(path: impl Into<PathBuf>, items: Vec<T>) -> Result<Self> {
        let next_id = items.iter().map(Record::id).max().unwrap_or(0) + 1;
        let collection = Self {
            path: path.into(),
            items,
            next_id,
        };
        collection.persist().await?;
        Ok(collection)
    }

    /// All items, in stored order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the collection holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find an item by id.
    pub fn get(&self, id: u64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Find an item by id, mutably.
    pub fn get_mut(&mut self, id: u64) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    /// True when an item with this id exists.
    pub fn contains(&self, id: u64) -> bool {
        self.get(id).is_some()
    }

    /// Allocate the next id. Monotonic; never reused.
    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append an item. The caller is responsible for having allocated its id
    /// through [`JsonCollection::allocate_id`].
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Remove the item with this id, returning it.
    pub fn remove(&mut self, id: u64) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Rewrite the backing file with the complete current state.
    ///
    /// Writes to a sibling temp file first and renames it over the target,
    /// so a crash mid-write never leaves a torn file at the canonical path.
    pub async fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.items)?;
        let tmp = tmp_path(&self.path);
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(count = self.items.len(), "persisted {}", self.path.display());
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

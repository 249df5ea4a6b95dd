//! Shared slide storage for multi-component access.
//!
//! Provides a thread-safe [`SlideStore`] that HTTP routes, the template
//! engine, and export handlers share. Writes are whole-document snapshots:
//! the store never sees a partially mutated slide, which is the consistency
//! obligation the persistence collaborator relies on. Persistence itself is
//! fire-and-forget to an optional data directory; a failed write is logged
//! and retried on the next snapshot, never surfaced to the editing path.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::schema::SlideDocument;
use crate::slide::{Slide, SlideId};

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested slide does not exist.
    #[error("Slide not found: {0}")]
    SlideNotFound(String),
    /// An I/O error occurred during persistence.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Thread-safe slide storage shared across routes and engines.
///
/// # Example
///
/// ```
/// use deck_core::store::SlideStore;
/// use deck_core::slide::Slide;
///
/// let store = SlideStore::new();
/// let slide = Slide::new();
/// let id = slide.id;
/// store.insert(slide);
/// assert!(store.get(id).is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SlideStore {
    slides: Arc<RwLock<HashMap<SlideId, Slide>>>,
    /// Optional data directory for filesystem persistence.
    data_dir: Option<PathBuf>,
}

impl SlideStore {
    /// Create an in-memory store with no persistence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with filesystem persistence.
    ///
    /// Slides are saved as JSON files in `data_dir`. The directory is
    /// created if it doesn't exist, and any slide documents already present
    /// are loaded.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created or
    /// scanned.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        let store = Self {
            slides: Arc::new(RwLock::new(HashMap::new())),
            data_dir: Some(data_dir),
        };
        store.load_all()?;
        Ok(store)
    }

    /// Get a slide snapshot by id.
    #[must_use]
    pub fn get(&self, id: SlideId) -> Option<Slide> {
        let slides = self
            .slides
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        slides.get(&id).cloned()
    }

    /// Insert or replace a slide as a whole-document snapshot.
    pub fn insert(&self, slide: Slide) {
        let id = slide.id;
        {
            let mut slides = self
                .slides
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            slides.insert(id, slide);
        }
        self.persist(id);
    }

    /// Remove a slide.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SlideNotFound`] if the slide does not exist.
    pub fn remove(&self, id: SlideId) -> Result<Slide, StoreError> {
        let removed = {
            let mut slides = self
                .slides
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            slides
                .remove(&id)
                .ok_or_else(|| StoreError::SlideNotFound(id.to_string()))?
        };
        if let Some(ref data_dir) = self.data_dir {
            let path = data_dir.join(format!("{id}.json"));
            if let Err(e) = std::fs::remove_file(&path) {
                tracing::warn!("Failed to remove persisted slide {id}: {e}");
            }
        }
        Ok(removed)
    }

    /// All slides ordered by their deck position.
    #[must_use]
    pub fn list(&self) -> Vec<Slide> {
        let slides = self
            .slides
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut all: Vec<Slide> = slides.values().cloned().collect();
        all.sort_by_key(|slide| slide.order);
        all
    }

    /// Number of stored slides.
    #[must_use]
    pub fn len(&self) -> usize {
        let slides = self
            .slides
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        slides.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Save a slide to disk as JSON. No-op without a data directory; a
    /// failed write is logged, not raised.
    fn persist(&self, id: SlideId) {
        let Some(ref data_dir) = self.data_dir else {
            return;
        };
        let Some(slide) = self.get(id) else {
            return;
        };
        let doc = SlideDocument::from(&slide);
        let json = match serde_json::to_string_pretty(&doc) {
            Ok(j) => j,
            Err(e) => {
                tracing::warn!("Failed to serialize slide {id}: {e}");
                return;
            }
        };
        let path = data_dir.join(format!("{id}.json"));
        if let Err(e) = std::fs::write(&path, json) {
            tracing::warn!("Failed to persist slide {id} to {}: {e}", path.display());
        }
    }

    /// Load every slide document in the data directory into memory.
    fn load_all(&self) -> Result<(), StoreError> {
        let Some(ref data_dir) = self.data_dir else {
            return Ok(());
        };
        for entry in std::fs::read_dir(data_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let contents = std::fs::read_to_string(&path)?;
            let doc: SlideDocument = serde_json::from_str(&contents)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            let slide = doc.into_slide().map_err(StoreError::Serialization)?;
            let mut slides = self
                .slides
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            slides.insert(slide.id, slide);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, Position, ShapeConfig, ShapeStyle, Size};

    fn slide_with_shape() -> Slide {
        let mut slide = Slide::new();
        slide.create_element(
            ElementKind::Shape {
                style: ShapeStyle::default(),
                config: ShapeConfig::default(),
            },
            Position::new(10.0, 10.0),
            Size::fixed(100.0, 50.0),
        );
        slide
    }

    #[test]
    fn test_insert_get_remove() {
        let store = SlideStore::new();
        let slide = slide_with_shape();
        let id = slide.id;

        store.insert(slide);
        assert_eq!(store.len(), 1);
        assert!(store.get(id).is_some());

        store.remove(id).expect("remove");
        assert!(store.is_empty());
        assert!(store.remove(id).is_err());
    }

    #[test]
    fn test_list_orders_by_deck_position() {
        let store = SlideStore::new();
        let second = Slide::new().with_order(2);
        let first = Slide::new().with_order(1);
        let second_id = second.id;
        let first_id = first.id;
        store.insert(second);
        store.insert(first);

        let ids: Vec<SlideId> = store.list().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![first_id, second_id]);
    }

    #[test]
    fn test_persistence_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let slide = slide_with_shape();
        let id = slide.id;

        {
            let store = SlideStore::with_data_dir(dir.path()).expect("store");
            store.insert(slide.clone());
        }

        let reloaded = SlideStore::with_data_dir(dir.path()).expect("reload");
        assert_eq!(reloaded.get(id), Some(slide));
    }
}

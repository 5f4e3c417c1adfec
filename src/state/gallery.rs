//! The gallery's domain state: images, collections and download history.

use crate::error::{Result, ValidationError};
use crate::models::{CategoryFilter, Collection, DownloadRecord, Image, new_id};
use crate::state::persistence::{Persistence, Slot};
use chrono::Utc;
use log::debug;

/// Owns the three record lists and mirrors every change to the store.
///
/// No mutation touches more than one list, so each one writes exactly the
/// slot it changed.
#[derive(Debug)]
pub struct Gallery {
    images: Vec<Image>,
    collections: Vec<Collection>,
    downloads: Vec<DownloadRecord>,
    persistence: Persistence,
}

impl Gallery {
    /// Loads the stored records and starts mirroring changes.
    pub fn open(mut persistence: Persistence) -> Self {
        let snapshot = persistence.hydrate();
        Self {
            images: snapshot.images,
            collections: snapshot.collections,
            downloads: snapshot.downloads,
            persistence,
        }
    }

    /// A gallery with no durable store.
    pub fn in_memory() -> Self {
        Self::open(Persistence::detached())
    }

    pub fn is_persistent(&self) -> bool {
        self.persistence.is_available()
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn image(&self, id: &str) -> Option<&Image> {
        self.images.iter().find(|image| image.id == id)
    }

    /// Images ordered newest first.
    pub fn sorted_images(&self) -> Vec<&Image> {
        let mut images: Vec<&Image> = self.images.iter().collect();
        images.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        images
    }

    /// Newest-first images passing the category filter.
    pub fn filtered_images(&self, filter: CategoryFilter) -> Vec<&Image> {
        self.sorted_images()
            .into_iter()
            .filter(|image| filter.matches(image))
            .collect()
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn collection(&self, id: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.id == id)
    }

    /// Images a collection refers to, in gallery order.
    ///
    /// Ids that no longer resolve are skipped.
    pub fn collection_images(&self, collection_id: &str) -> Vec<&Image> {
        let Some(collection) = self.collection(collection_id) else {
            return Vec::new();
        };
        self.sorted_images()
            .into_iter()
            .filter(|image| collection.contains(&image.id))
            .collect()
    }

    pub fn downloads(&self) -> &[DownloadRecord] {
        &self.downloads
    }

    pub fn download(&self, id: &str) -> Option<&DownloadRecord> {
        self.downloads.iter().find(|record| record.id == id)
    }

    /// Flips the favorite flag and returns the new value.
    ///
    /// Returns `None` without touching anything when the id is unknown.
    pub fn toggle_favorite(&mut self, image_id: &str) -> Option<bool> {
        let image = self.images.iter_mut().find(|image| image.id == image_id)?;
        image.is_favorite = !image.is_favorite;
        let favorite = image.is_favorite;
        self.persist(Slot::Images);
        Some(favorite)
    }

    /// Inserts a fully formed image at the front.
    pub fn add_image(&mut self, image: Image) {
        debug!("Adding image {} ({})", image.id, image.title);
        self.images.insert(0, image);
        self.persist(Slot::Images);
    }

    /// Creates an empty collection.
    ///
    /// The name is trimmed; a blank name is rejected. A blank description is
    /// stored as absent.
    pub fn create_collection(
        &mut self,
        name: &str,
        description: Option<&str>,
    ) -> Result<&Collection> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyCollectionName.into());
        }

        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        self.collections.push(Collection {
            id: new_id(),
            name: name.to_string(),
            description,
            image_ids: Vec::new(),
            created_at: Utc::now(),
        });
        self.persist(Slot::Collections);

        let index = self.collections.len() - 1;
        Ok(&self.collections[index])
    }

    /// Removes a collection. Images are not affected.
    pub fn delete_collection(&mut self, collection_id: &str) -> bool {
        let before = self.collections.len();
        self.collections.retain(|c| c.id != collection_id);
        let removed = self.collections.len() != before;
        if removed {
            self.persist(Slot::Collections);
        }
        removed
    }

    /// Appends an image id to a collection.
    ///
    /// Neither existing membership nor the image itself is checked.
    pub fn add_to_collection(&mut self, collection_id: &str, image_id: &str) -> bool {
        let Some(collection) = self.collection_mut(collection_id) else {
            return false;
        };
        collection.image_ids.push(image_id.to_string());
        self.persist(Slot::Collections);
        true
    }

    /// Removes every occurrence of an image id from a collection.
    pub fn remove_from_collection(&mut self, collection_id: &str, image_id: &str) -> bool {
        let Some(collection) = self.collection_mut(collection_id) else {
            return false;
        };
        collection.image_ids.retain(|id| id != image_id);
        self.persist(Slot::Collections);
        true
    }

    /// Prepends a snapshot of the image to the download history.
    pub fn record_download(&mut self, image: &Image) -> &DownloadRecord {
        self.downloads.insert(0, DownloadRecord::snapshot(image));
        self.persist(Slot::Downloads);
        &self.downloads[0]
    }

    /// Empties the download history and returns how many records were dropped.
    pub fn clear_downloads(&mut self) -> usize {
        let cleared = self.downloads.len();
        self.downloads.clear();
        self.persist(Slot::Downloads);
        cleared
    }

    fn collection_mut(&mut self, collection_id: &str) -> Option<&mut Collection> {
        self.collections.iter_mut().find(|c| c.id == collection_id)
    }

    fn persist(&mut self, slot: Slot) {
        match slot {
            Slot::Images => self.persistence.mirror(slot, &self.images),
            Slot::Collections => self.persistence.mirror(slot, &self.collections),
            Slot::Downloads => self.persistence.mirror(slot, &self.downloads),
        }
    }
}

impl Default for Gallery {
    fn default() -> Self {
        Self::in_memory()
    }
}

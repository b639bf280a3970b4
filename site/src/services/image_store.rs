//! In-memory image store
//!
//! Plays the part of the browser's object URLs: uploaded bytes are kept in
//! memory and served under `/images/<id>` until released.

use async_trait::async_trait;
use shared::{Locator, ProcessId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::traits::ImageStore;
use crate::types::{ImageHandle, StoredImage};

#[derive(Clone, Default)]
pub struct InMemoryImageStore {
    images: Arc<RwLock<HashMap<Uuid, StoredImage>>>,
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn insert(&self, handle: ImageHandle) -> StoredImage {
        let id = handle.content_id();
        let stored = StoredImage {
            locator: Locator::for_image(id),
            content_type: handle.content_type,
            bytes: handle.bytes,
        };

        self.images.write().await.insert(id, stored.clone());
        shared::process_debug!(ProcessId::current(), "🖼️ Holding image {} ({} bytes)", stored.locator, stored.len());

        stored
    }

    async fn get(&self, locator: &Locator) -> Option<StoredImage> {
        let id = locator.image_id()?;
        self.images.read().await.get(&id).cloned()
    }

    async fn release(&self, locator: &Locator) -> bool {
        let Some(id) = locator.image_id() else {
            return false;
        };

        let released = self.images.write().await.remove(&id).is_some();
        if released {
            shared::process_debug!(ProcessId::current(), "🧹 Released image {}", locator);
        }
        released
    }

    async fn held_count(&self) -> usize {
        self.images.read().await.len()
    }
}

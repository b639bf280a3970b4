//! Tests for the InMemoryImageStore service

use super::fixtures::*;
use crate::services::InMemoryImageStore;
use crate::traits::ImageStore;

mod in_memory_image_store_tests {
    use super::*;

    #[tokio::test]
    async fn test_store_starts_empty() {
        let store = InMemoryImageStore::new();
        assert_eq!(store.held_count().await, 0);
    }

    #[tokio::test]
    async fn test_insert_then_get() {
        let store = InMemoryImageStore::new();

        let stored = store.insert(create_png_handle()).await;
        assert!(stored.locator.as_str().starts_with("/images/"));
        assert_eq!(stored.content_type, "image/png");
        assert_eq!(stored.bytes.as_ref(), PNG_BYTES);
        assert_eq!(store.held_count().await, 1);

        let fetched = store.get(&stored.locator).await.unwrap();
        assert_eq!(fetched.bytes, stored.bytes);
    }

    #[tokio::test]
    async fn test_same_content_shares_locator() {
        let store = InMemoryImageStore::new();

        let first = store.insert(create_jpeg_handle(1)).await;
        let second = store.insert(create_jpeg_handle(1)).await;

        assert_eq!(first.locator, second.locator);
        assert_eq!(store.held_count().await, 1);
    }

    #[tokio::test]
    async fn test_distinct_content_gets_distinct_locators() {
        let store = InMemoryImageStore::new();

        let first = store.insert(create_jpeg_handle(1)).await;
        let second = store.insert(create_jpeg_handle(2)).await;

        assert_ne!(first.locator, second.locator);
        assert_eq!(store.held_count().await, 2);
    }

    #[tokio::test]
    async fn test_release_drops_image() {
        let store = InMemoryImageStore::new();
        let stored = store.insert(create_png_handle()).await;

        assert!(store.release(&stored.locator).await);
        assert!(store.get(&stored.locator).await.is_none());
        assert_eq!(store.held_count().await, 0);

        // Second release is a no-op
        assert!(!store.release(&stored.locator).await);
    }

    #[tokio::test]
    async fn test_foreign_locator_is_not_held() {
        let store = InMemoryImageStore::new();
        let external = result_locator();

        assert!(store.get(&external).await.is_none());
        assert!(!store.release(&external).await);
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let store = InMemoryImageStore::new();
        let clone = store.clone();

        let stored = store.insert(create_png_handle()).await;
        assert!(clone.get(&stored.locator).await.is_some());
    }
}

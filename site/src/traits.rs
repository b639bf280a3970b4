//! Service trait definitions for dependency injection
//!
//! The analyzer and the image store are the two collaborators the workflow
//! controller talks to; both are mockable for tests.

use async_trait::async_trait;
use shared::Locator;

use crate::error::AnalysisFailed;
use crate::types::{ImageHandle, StoredImage};

/// Turns a selected image into an analysis result.
///
/// Single-shot: the controller calls `analyze` once per submission and never
/// retries. Latency is unspecified.
#[mockall::automock]
#[async_trait]
pub trait AnalyzeOperation: Send + Sync {
    /// Analyze the image, returning the result locator
    async fn analyze(&self, image: &StoredImage) -> Result<Locator, AnalysisFailed>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Holds uploaded image bytes behind locators until they are released
#[mockall::automock]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store the image and return it with its locator. Inserting identical
    /// content again yields the same locator.
    async fn insert(&self, handle: ImageHandle) -> StoredImage;

    /// Look up a held image
    async fn get(&self, locator: &Locator) -> Option<StoredImage>;

    /// Free the image behind the locator. Returns whether anything was held.
    async fn release(&self, locator: &Locator) -> bool;

    /// Number of images currently held
    async fn held_count(&self) -> usize;
}

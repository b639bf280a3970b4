//! Type definitions for the site
//!
//! Input handles and stored images exchanged between the HTTP layer, the
//! controller and the analyzers.

use axum::body::Bytes;
use shared::Locator;
use uuid::Uuid;

/// Namespace for content-addressed image ids
const IMAGE_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a4e_93d0_4b8e_a5c7_1d2e_3f40_5a6b);

/// A file chosen by the user: raw bytes plus the media type the browser reported
#[derive(Debug, Clone)]
pub struct ImageHandle {
    pub bytes: Bytes,
    pub content_type: String,
    pub file_name: Option<String>,
}

impl ImageHandle {
    pub fn new(bytes: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.into(),
            file_name: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// A handle with no content is treated as a cancelled picker
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Advisory media type check; nothing inspects the bytes themselves
    pub fn is_image(&self) -> bool {
        self.content_type.to_ascii_lowercase().starts_with("image/")
    }

    /// Deterministic id derived from media type and content
    pub fn content_id(&self) -> Uuid {
        let mut name = Vec::with_capacity(self.content_type.len() + 1 + self.bytes.len());
        name.extend_from_slice(self.content_type.as_bytes());
        name.push(0);
        name.extend_from_slice(&self.bytes);
        Uuid::new_v5(&IMAGE_NAMESPACE, &name)
    }
}

/// An image held by the site and reachable through its locator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub locator: Locator,
    pub content_type: String,
    pub bytes: Bytes,
}

impl StoredImage {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

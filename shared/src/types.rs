//! Core shared types and identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use uuid::Uuid;

use crate::errors::{SharedError, SharedResult};

/// Global process ID - initialized once per binary
static PROCESS_ID: OnceLock<ProcessId> = OnceLock::new();

/// Process identifier attached to every log line
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProcessId {
    /// The `site` binary serving the page
    Site,
    /// Library use without a binary (tests, embedding)
    #[default]
    Embedded,
}

impl ProcessId {
    /// Initialize the global process ID for the site binary
    pub fn init_site() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Site)
    }

    /// Get the global process ID, falling back to `Embedded` when no binary set it
    pub fn current() -> &'static ProcessId {
        PROCESS_ID.get_or_init(ProcessId::default)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessId::Site => write!(f, "site"),
            ProcessId::Embedded => write!(f, "embedded"),
        }
    }
}

/// Opaque, renderable reference to binary data (an uploaded image or an
/// analysis result). Never the data itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    /// Path prefix under which held images are served
    pub const IMAGE_PREFIX: &'static str = "/images/";

    pub fn new(value: impl Into<String>) -> SharedResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(SharedError::InvalidLocator { input: value });
        }
        Ok(Self(value))
    }

    /// Locator for an image held by this process
    pub fn for_image(id: Uuid) -> Self {
        Self(format!("{}{}", Self::IMAGE_PREFIX, id))
    }

    /// Image id when this locator points at a locally held image
    pub fn image_id(&self) -> Option<Uuid> {
        self.0
            .strip_prefix(Self::IMAGE_PREFIX)
            .and_then(|id| Uuid::parse_str(id).ok())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Locator {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

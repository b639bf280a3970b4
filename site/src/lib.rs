//! AXIOME demo site library
//!
//! The image submission workflow, its analyzers and image store, and the
//! server-rendered marketing page that hosts it.

pub mod config;
pub mod controller;
pub mod core;
pub mod error;
pub mod services;
pub mod site_impl;
pub mod traits;
pub mod types;
pub mod web;

// Re-export main types
pub use config::{SiteArgs, SiteConfig};
pub use controller::WorkflowController;
pub use error::{ANALYSIS_FAILED_MESSAGE, AnalysisFailed, SiteError, SiteResult};
pub use site_impl::Site;
pub use types::{ImageHandle, StoredImage};

// Re-export trait definitions
pub use traits::{AnalyzeOperation, ImageStore};

// Re-export service implementations
pub use services::{HttpAnalyzer, InMemoryImageStore, SimulatedAnalyzer};

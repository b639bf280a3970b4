//! Service tests for the site
//!
//! Covers the image store and both analyzer implementations.

pub mod helpers;
pub mod image_store;

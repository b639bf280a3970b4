//! Shared types for the AXIOME demo site
//!
//! Holds the process identity used by logging, the opaque `Locator`
//! reference handed to the presentation layer, and the shared error type.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;

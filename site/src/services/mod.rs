//! Service implementations
//!
//! Real implementations of the service traits for production use

pub mod http_analyzer;
pub mod image_store;
pub mod simulated_analyzer;

#[cfg(test)]
mod tests;

// Re-export service implementations
pub use http_analyzer::HttpAnalyzer;
pub use image_store::InMemoryImageStore;
pub use simulated_analyzer::SimulatedAnalyzer;

//! Presentation layer: the rendered page and the HTTP handlers

pub mod handlers;
pub mod page;

pub use page::render_page;

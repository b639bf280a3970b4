//! Core business logic modules
//!
//! Pure business logic with no I/O dependencies

pub mod i18n;
pub mod view;
pub mod workflow;

// Re-export commonly used types
pub use i18n::{Locale, Strings};
pub use view::{DemoView, ViewPhase, render};
pub use workflow::{SelectionPolicy, Settlement, SubmissionWorkflow, SubmitTicket, WorkflowState};

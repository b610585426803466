//! Diagram and summary generation.
//!
//! The [`DependencyGenerator`] orchestrates the whole pipeline; the
//! emitters turn finalized dependency sets into D2 source files, rendered
//! images and the markdown summary.

pub mod diagram;
pub mod generator;
pub mod summary;

pub use diagram::DiagramEmitter;
pub use generator::DependencyGenerator;
pub use summary::{summary_content, SUMMARY_FILENAME};

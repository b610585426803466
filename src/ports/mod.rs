//! Outbound ports - infrastructure interfaces.
//!
//! These ports define the interfaces the core uses to reach external
//! systems: remote package feeds, the solution/project file reader, the
//! external diagram renderer, and the console.

pub mod console;
pub mod feed_client;
pub mod renderer;
pub mod solution_reader;

pub use console::ConsoleLogger;
pub use feed_client::{DependencyGroup, FeedClient, PackageDependency};
pub use renderer::{DiagramRenderer, RenderOutcome};
pub use solution_reader::SolutionReader;

//! Dependency-set construction for diagram emission.
//!
//! Walks the project graph (transitively through project references) to
//! compute, per scope, the deduplicated set of nodes, edges and style
//! directives to draw, the multi-version conflict groups, and the
//! diagram-safe aliases.

pub mod alias;
pub mod conflicts;
pub mod dependency_set;
pub mod walker;

pub use alias::{diagram_alias, package_alias, package_group_alias, project_alias};
pub use conflicts::packages_with_multiple_versions;
pub use dependency_set::DependencySet;
pub use walker::DependencyWalker;

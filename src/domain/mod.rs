//! The solution/project/reference domain model.
//!
//! Projects and their reference sets are produced once per run by the
//! solution reader, have their package references expanded by the resolver,
//! and are immutable from then on.

pub mod condition;
pub mod project;

pub use condition::ReferenceCondition;
pub use project::{
    FrameworkReference, PackageReference, ProjectReference, ReferenceSet, SolutionProject,
};

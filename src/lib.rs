//! sln-diagram - dependency diagram generator for .NET solutions
//!
//! Parses a Visual Studio solution, resolves each project's declared and
//! transitive NuGet package references from one or more remote feeds, and
//! renders the result as D2 dependency diagrams plus a markdown summary.
//!
//! # Architecture
//!
//! The crate is organised into the following layers:
//!
//! - **Domain** (`domain`): the solution/project/reference model
//! - **Resolution** (`resolution`): recursive, depth-bounded, cached package
//!   resolution against remote feeds
//! - **Aggregation** (`aggregation`): dependency-set construction, version
//!   conflict grouping, and diagram alias/style derivation
//! - **Generation** (`generation`): diagram and summary emission plus the
//!   orchestrating generator
//! - **Ports** (`ports`): interface definitions for infrastructure
//! - **Adapters** (`adapters`): concrete implementations of ports
//! - **Shared** (`shared`): common error and result types

pub mod adapters;
pub mod aggregation;
pub mod cli;
pub mod config;
pub mod domain;
pub mod generation;
pub mod ports;
pub mod resolution;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::console::ColorConsoleLogger;
    pub use crate::adapters::d2::D2Cli;
    pub use crate::adapters::msbuild::MsbuildSolutionReader;
    pub use crate::adapters::network::NugetFeedClient;
    pub use crate::aggregation::{DependencySet, DependencyWalker};
    pub use crate::config::{
        DiagramDirection, DiagramImageFormat, DiagramOptions, ExportOptions, FillStyle,
        GeneratorConfig, NugetPackageFeed, ProjectOptions,
    };
    pub use crate::domain::{
        FrameworkReference, PackageReference, ProjectReference, ReferenceCondition, ReferenceSet,
        SolutionProject,
    };
    pub use crate::generation::DependencyGenerator;
    pub use crate::ports::{
        ConsoleLogger, DependencyGroup, DiagramRenderer, FeedClient, PackageDependency,
        RenderOutcome, SolutionReader,
    };
    pub use crate::resolution::PackageResolver;
    pub use crate::shared::error::{ExitCode, GeneratorError};
    pub use crate::shared::Result;
}

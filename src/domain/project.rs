use super::condition::ReferenceCondition;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A project discovered in the solution.
///
/// Identity is the unique project name. The reference sets are raw when the
/// project leaves the solution reader; the generator filters them against the
/// active target framework and expands each declared package reference
/// through the resolver before the project is used for aggregation.
#[derive(Debug, Clone)]
pub struct SolutionProject {
    pub name: String,
    pub path: PathBuf,
    pub target_frameworks: Vec<String>,
    pub dependencies: Vec<ReferenceSet>,
}

impl SolutionProject {
    /// Whether any of the project's target frameworks includes the given
    /// moniker. A substring match is used so that platform-suffixed monikers
    /// such as `net8.0-windows` are matched by `net8.0`.
    pub fn targets_framework(&self, target_framework: &str) -> bool {
        self.target_frameworks
            .iter()
            .any(|framework| framework.contains(target_framework))
    }

    pub fn project_references(&self) -> impl Iterator<Item = &ProjectReference> {
        self.dependencies
            .iter()
            .flat_map(|set| set.project_references.iter())
    }

    pub fn framework_references(&self) -> impl Iterator<Item = &FrameworkReference> {
        self.dependencies
            .iter()
            .flat_map(|set| set.framework_references.iter())
    }

    pub fn package_references(&self) -> impl Iterator<Item = &PackageReference> {
        self.dependencies
            .iter()
            .flat_map(|set| set.package_references.iter())
    }
}

/// The subset of a project's references declared under one conditional
/// guard. Multiple reference sets whose condition matches the active target
/// framework are each merged into the effective dependency set.
#[derive(Debug, Clone)]
pub struct ReferenceSet {
    pub condition: ReferenceCondition,
    /// The raw condition string as written in the project file, kept for
    /// log output. Empty for unconditional sets.
    pub raw_condition: String,
    pub project_references: Vec<ProjectReference>,
    pub framework_references: Vec<FrameworkReference>,
    pub package_references: Vec<PackageReference>,
}

impl ReferenceSet {
    pub fn unconditional() -> Self {
        Self {
            condition: ReferenceCondition::Unconditional,
            raw_condition: String::new(),
            project_references: Vec::new(),
            framework_references: Vec::new(),
            package_references: Vec::new(),
        }
    }
}

/// A reference to another project in the solution, by resolved absolute
/// path. The referenced project is located by filename lookup in the parsed
/// project map; a reference that cannot be resolved fails the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectReference {
    pub path: PathBuf,
}

impl ProjectReference {
    /// The project name implied by the reference path (the file stem).
    pub fn project_name(&self) -> String {
        project_name_from_path(&self.path)
    }
}

/// The project name implied by a project file path.
pub fn project_name_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// A platform framework reference. Leaf node, never expanded further.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkReference {
    pub name: String,
}

/// A NuGet package reference, either declared explicitly by a project
/// (depth 0) or pulled in transitively by another package (depth = hops
/// from the explicit reference).
///
/// Forms a tree rooted at each explicit reference. The transitive list is
/// shared (`Arc`) so that cache hits in the resolver return the identical
/// subtree without re-querying the feed.
#[derive(Debug, Clone)]
pub struct PackageReference {
    pub name: String,
    pub version: String,
    is_transitive: bool,
    depth: usize,
    pub transitive_references: Arc<Vec<PackageReference>>,
}

impl PackageReference {
    /// An explicit package reference as declared by a project.
    pub fn declared(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            is_transitive: false,
            depth: 0,
            transitive_references: Arc::new(Vec::new()),
        }
    }

    /// An implicit package reference discovered `depth` hops below an
    /// explicit reference.
    pub fn transitive(name: impl Into<String>, version: impl Into<String>, depth: usize) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            is_transitive: true,
            depth,
            transitive_references: Arc::new(Vec::new()),
        }
    }

    pub fn with_transitive_references(mut self, references: Arc<Vec<PackageReference>>) -> Self {
        self.transitive_references = references;
        self
    }

    pub fn is_transitive(&self) -> bool {
        self.is_transitive
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Collects this reference and every descendant as (name, version)
    /// pairs, ignoring any depth bound.
    pub fn collect_name_versions(&self, into: &mut Vec<(String, String)>) {
        into.push((self.name.clone(), self.version.clone()));

        for reference in self.transitive_references.iter() {
            reference.collect_name_versions(into);
        }
    }
}

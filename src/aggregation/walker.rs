use super::alias::{diagram_alias, package_alias, project_alias};
use super::conflicts::cycle_error;
use super::dependency_set::DependencySet;
use crate::config::DiagramOptions;
use crate::domain::{PackageReference, SolutionProject};
use crate::shared::error::GeneratorError;
use crate::shared::Result;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Walks a scope of the project graph and appends its nodes, edges and
/// style directives to a [`DependencySet`].
///
/// Three reference kinds are handled per project: framework references are
/// leaf edges with the fixed framework style; package references are
/// expanded recursively while their depth stays within the scope's
/// transitive bound (deeper nodes are pruned silently); project references
/// are recursed without any depth limit, with an edge from the referenced
/// project back to the referrer.
///
/// The walk keeps an explicit path stack so a project-reference cycle
/// fails fast instead of recursing forever, and a completed set so shared
/// subgraphs are walked once.
pub struct DependencyWalker<'a> {
    projects: &'a BTreeMap<String, SolutionProject>,
    diagram: &'a DiagramOptions,
}

impl<'a> DependencyWalker<'a> {
    pub fn new(projects: &'a BTreeMap<String, SolutionProject>, diagram: &'a DiagramOptions) -> Self {
        Self { projects, diagram }
    }

    /// Appends one project scope. `conflicts` maps version-conflicting
    /// package names to their group container alias, computed over this
    /// scope's deep closure.
    pub fn append_project(
        &self,
        project: &SolutionProject,
        conflicts: &HashMap<String, String>,
        set: &mut DependencySet,
        max_transitive_depth: usize,
    ) -> Result<()> {
        let mut stack = Vec::new();
        let mut completed = HashSet::new();

        stack.push(project.name.clone());

        let alias = self.project_alias(&project.name);
        set.add_line(format!("{}: {}", alias, project.name));

        self.append_framework_references(project, &alias, set);
        self.append_package_references(project, &alias, conflicts, set, max_transitive_depth);
        self.append_project_references(
            project,
            &alias,
            conflicts,
            set,
            max_transitive_depth,
            &mut stack,
            &mut completed,
        )?;

        stack.pop();
        Ok(())
    }

    fn append_framework_references(
        &self,
        project: &SolutionProject,
        project_alias: &str,
        set: &mut DependencySet,
    ) {
        for framework in project.framework_references() {
            let framework_alias = diagram_alias(&framework.name);

            set.add_line(format!("{} <- {}", framework_alias, project_alias));
            set.add_framework_style(&framework_alias, &self.diagram.framework_style);
        }
    }

    fn append_package_references(
        &self,
        project: &SolutionProject,
        parent_alias: &str,
        conflicts: &HashMap<String, String>,
        set: &mut DependencySet,
        max_transitive_depth: usize,
    ) {
        for package in project.package_references() {
            self.append_package(package, parent_alias, conflicts, set, max_transitive_depth);
        }
    }

    fn append_package(
        &self,
        package: &PackageReference,
        parent_alias: &str,
        conflicts: &HashMap<String, String>,
        set: &mut DependencySet,
        max_transitive_depth: usize,
    ) {
        // Pruning is silent: neither the node nor the edge to it is drawn.
        if package.depth() > max_transitive_depth {
            return;
        }

        let alias = self.package_alias(package, conflicts, set);

        set.add_line(format!("{}: {}\\nv{}", alias, package.name, package.version));
        set.observe_package(&alias, package.is_transitive());
        set.add_line(format!("{} <- {}", alias, parent_alias));

        for transitive in package.transitive_references.iter() {
            self.append_package(transitive, &alias, conflicts, set, max_transitive_depth);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn append_project_references(
        &self,
        project: &SolutionProject,
        parent_alias: &str,
        conflicts: &HashMap<String, String>,
        set: &mut DependencySet,
        max_transitive_depth: usize,
        stack: &mut Vec<String>,
        completed: &mut HashSet<String>,
    ) -> Result<()> {
        for reference in project.project_references() {
            let referenced_name = reference.project_name();

            let referenced = self.projects.get(&referenced_name).ok_or_else(|| {
                GeneratorError::UnresolvedProjectReference {
                    name: referenced_name.clone(),
                }
            })?;

            self.append_referenced_project(
                referenced,
                conflicts,
                set,
                max_transitive_depth,
                stack,
                completed,
            )?;

            set.add_line(format!(
                "{} <- {}",
                self.project_alias(&referenced_name),
                parent_alias
            ));
        }

        Ok(())
    }

    /// Referenced projects contribute their node plus their package and
    /// project references; framework references are only drawn for the
    /// scope's root project.
    fn append_referenced_project(
        &self,
        project: &SolutionProject,
        conflicts: &HashMap<String, String>,
        set: &mut DependencySet,
        max_transitive_depth: usize,
        stack: &mut Vec<String>,
        completed: &mut HashSet<String>,
    ) -> Result<()> {
        if completed.contains(&project.name) {
            return Ok(());
        }

        if stack.contains(&project.name) {
            return Err(cycle_error(stack, &project.name));
        }

        stack.push(project.name.clone());

        let alias = self.project_alias(&project.name);
        set.add_line(format!("{}: {}", alias, project.name));

        self.append_package_references(project, &alias, conflicts, set, max_transitive_depth);
        self.append_project_references(
            project,
            &alias,
            conflicts,
            set,
            max_transitive_depth,
            stack,
            completed,
        )?;

        stack.pop();
        completed.insert(project.name.clone());

        Ok(())
    }

    fn project_alias(&self, project_name: &str) -> String {
        project_alias(project_name, &self.diagram.group_name_prefix)
    }

    /// Nodes of a version-conflicting package are nested under the
    /// package's synthetic group container; the container line itself is
    /// emitted lazily, at most once per scope.
    fn package_alias(
        &self,
        package: &PackageReference,
        conflicts: &HashMap<String, String>,
        set: &mut DependencySet,
    ) -> String {
        let alias = package_alias(&package.name, &package.version);

        match conflicts.get(&package.name) {
            Some(group_alias) => {
                set.add_line(format!("{}: \"\"", group_alias));
                format!("{}.{}", group_alias, alias)
            }
            None => alias,
        }
    }
}

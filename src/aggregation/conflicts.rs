//! Version-conflict detection over a scope's deep transitive closure.

use super::alias::package_group_alias;
use crate::domain::SolutionProject;
use crate::shared::error::GeneratorError;
use crate::shared::Result;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Computes the package names that appear with two or more distinct
/// versions anywhere in the scope rooted at `project`.
///
/// The closure follows project references without a depth limit and
/// collects package versions regardless of any package depth bound - the
/// conflict decision must not change with the diagram's pruning depth.
/// Returns a map from the conflicting package name to its synthetic group
/// container alias.
pub fn packages_with_multiple_versions(
    project: &SolutionProject,
    projects: &BTreeMap<String, SolutionProject>,
) -> Result<HashMap<String, String>> {
    let mut pairs: BTreeSet<(String, String)> = BTreeSet::new();
    let mut stack = Vec::new();
    let mut completed = HashSet::new();

    collect_deep_package_versions(project, projects, &mut pairs, &mut stack, &mut completed)?;

    let mut versions_by_name: BTreeMap<&str, usize> = BTreeMap::new();

    for (name, _version) in &pairs {
        *versions_by_name.entry(name.as_str()).or_insert(0) += 1;
    }

    Ok(versions_by_name
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| (name.to_string(), package_group_alias(name)))
        .collect())
}

fn collect_deep_package_versions(
    project: &SolutionProject,
    projects: &BTreeMap<String, SolutionProject>,
    pairs: &mut BTreeSet<(String, String)>,
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

    let mut flattened = Vec::new();
    for package in project.package_references() {
        package.collect_name_versions(&mut flattened);
    }
    pairs.extend(flattened);

    for reference in project.project_references() {
        let referenced_name = reference.project_name();

        let referenced = projects.get(&referenced_name).ok_or_else(|| {
            GeneratorError::UnresolvedProjectReference {
                name: referenced_name.clone(),
            }
        })?;

        collect_deep_package_versions(referenced, projects, pairs, stack, completed)?;
    }

    stack.pop();
    completed.insert(project.name.clone());

    Ok(())
}

/// Builds the cycle error naming the offending reference chain.
pub(crate) fn cycle_error(stack: &[String], repeated: &str) -> anyhow::Error {
    let mut chain: Vec<&str> = stack.iter().map(String::as_str).collect();
    chain.push(repeated);

    GeneratorError::ProjectReferenceCycle {
        chain: chain.join(" -> "),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PackageReference, ProjectReference, ReferenceSet};
    use std::path::PathBuf;
    use std::sync::Arc;

    fn project(name: &str) -> SolutionProject {
        SolutionProject {
            name: name.to_string(),
            path: PathBuf::from(format!("/solution/{0}/{0}.csproj", name)),
            target_frameworks: vec!["net8.0".to_string()],
            dependencies: vec![ReferenceSet::unconditional()],
        }
    }

    fn add_package(project: &mut SolutionProject, package: PackageReference) {
        project.dependencies[0].package_references.push(package);
    }

    fn add_project_reference(project: &mut SolutionProject, name: &str) {
        project.dependencies[0].project_references.push(ProjectReference {
            path: PathBuf::from(format!("/solution/{0}/{0}.csproj", name)),
        });
    }

    fn index(projects: Vec<SolutionProject>) -> BTreeMap<String, SolutionProject> {
        projects
            .into_iter()
            .map(|project| (project.name.clone(), project))
            .collect()
    }

    #[test]
    fn test_no_conflicts_for_single_versions() {
        let mut a = project("A");
        add_package(&mut a, PackageReference::declared("X", "1.0.0"));

        let projects = index(vec![a]);
        let conflicts =
            packages_with_multiple_versions(projects.get("A").unwrap(), &projects).unwrap();

        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_conflict_across_project_references() {
        let mut a = project("A");
        add_package(&mut a, PackageReference::declared("Bar", "1.0.0"));
        add_project_reference(&mut a, "B");

        let mut b = project("B");
        add_package(&mut b, PackageReference::declared("Bar", "2.0.0"));

        let projects = index(vec![a, b]);
        let conflicts =
            packages_with_multiple_versions(projects.get("A").unwrap(), &projects).unwrap();

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts.get("Bar").unwrap(), "bar-group");
    }

    #[test]
    fn test_conflict_detected_in_deep_transitive_references() {
        // The conflicting second version sits below an explicit reference;
        // depth plays no role in conflict detection.
        let transitive = PackageReference::transitive("Bar", "2.0.0", 3);
        let middle = PackageReference::transitive("Middle", "1.0.0", 2)
            .with_transitive_references(Arc::new(vec![transitive]));
        let explicit = PackageReference::declared("Top", "1.0.0")
            .with_transitive_references(Arc::new(vec![middle]));

        let mut a = project("A");
        add_package(&mut a, explicit);
        add_package(&mut a, PackageReference::declared("Bar", "1.0.0"));

        let projects = index(vec![a]);
        let conflicts =
            packages_with_multiple_versions(projects.get("A").unwrap(), &projects).unwrap();

        assert_eq!(conflicts.keys().collect::<Vec<_>>(), vec!["Bar"]);
    }

    #[test]
    fn test_duplicate_same_version_is_not_a_conflict() {
        let mut a = project("A");
        add_package(&mut a, PackageReference::declared("X", "1.0.0"));
        add_project_reference(&mut a, "B");

        let mut b = project("B");
        add_package(&mut b, PackageReference::declared("X", "1.0.0"));

        let projects = index(vec![a, b]);
        let conflicts =
            packages_with_multiple_versions(projects.get("A").unwrap(), &projects).unwrap();

        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_unresolved_project_reference_is_fatal() {
        let mut a = project("A");
        add_project_reference(&mut a, "Missing");

        let projects = index(vec![a]);
        let error = packages_with_multiple_versions(projects.get("A").unwrap(), &projects)
            .unwrap_err();

        let generator_error = error.downcast::<GeneratorError>().unwrap();
        assert!(matches!(
            generator_error,
            GeneratorError::UnresolvedProjectReference { .. }
        ));
    }

    #[test]
    fn test_project_reference_cycle_is_fatal() {
        let mut a = project("A");
        add_project_reference(&mut a, "B");

        let mut b = project("B");
        add_project_reference(&mut b, "A");

        let projects = index(vec![a, b]);
        let error = packages_with_multiple_versions(projects.get("A").unwrap(), &projects)
            .unwrap_err();

        let generator_error = error.downcast::<GeneratorError>().unwrap();
        match generator_error {
            GeneratorError::ProjectReferenceCycle { chain } => {
                assert_eq!(chain, "A -> B -> A");
            }
            other => panic!("expected cycle error, got {other:?}"),
        }
    }

    #[test]
    fn test_diamond_references_are_walked_once() {
        // A -> B, A -> C, B -> D, C -> D: no cycle, D visited once.
        let mut a = project("A");
        add_project_reference(&mut a, "B");
        add_project_reference(&mut a, "C");

        let mut b = project("B");
        add_project_reference(&mut b, "D");

        let mut c = project("C");
        add_project_reference(&mut c, "D");

        let mut d = project("D");
        add_package(&mut d, PackageReference::declared("X", "1.0.0"));

        let projects = index(vec![a, b, c, d]);
        let conflicts =
            packages_with_multiple_versions(projects.get("A").unwrap(), &projects).unwrap();

        assert!(conflicts.is_empty());
    }
}

//! Markdown dependency summary emission.

use crate::domain::SolutionProject;
use crate::shared::error::GeneratorError;
use crate::shared::Result;
use std::collections::{BTreeMap, BTreeSet, HashSet};

pub const SUMMARY_FILENAME: &str = "Dependency Summary.md";

/// Shields.io badge markup for the known target framework monikers.
/// Monikers without an entry simply get no badge.
const TARGET_FRAMEWORK_BADGES: [(&str, &str); 8] = [
    (
        "net8.0",
        "![](https://img.shields.io/badge/.NET-8.0-purple.svg)",
    ),
    (
        "net8.0-windows",
        "![](https://img.shields.io/badge/.NET-8.0--windows-purple.svg)",
    ),
    (
        "net7.0",
        "![](https://img.shields.io/badge/.NET-7.0-blue.svg)",
    ),
    (
        "net7.0-windows",
        "![](https://img.shields.io/badge/.NET-7.0--windows-blue.svg)",
    ),
    (
        "net6.0",
        "![](https://img.shields.io/badge/.NET-6.0-orange.svg)",
    ),
    (
        "net6.0-windows",
        "![](https://img.shields.io/badge/.NET-6.0--windows-orange.svg)",
    ),
    (
        "netstandard2.1",
        "![](https://img.shields.io/badge/.NET-standard2.1-green.svg)",
    ),
    (
        "netstandard2.0",
        "![](https://img.shields.io/badge/.NET-standard2.0-red.svg)",
    ),
];

/// The badge line for a project's target frameworks, in badge-table order.
fn framework_badges(target_frameworks: &[String]) -> String {
    TARGET_FRAMEWORK_BADGES
        .iter()
        .filter(|(moniker, _)| target_frameworks.iter().any(|tfm| tfm == moniker))
        .map(|(_, badge)| *badge)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds the complete `Dependency Summary.md` content for the parsed
/// projects.
///
/// One section per project: framework badges, then a flat, sorted,
/// deduplicated bullet list of everything the project depends on -
/// referenced project names, framework reference names, and every package
/// in the deep closure as `Name vVersion`. Explicit and transitive packages
/// are merged. A project with no dependencies at all lists the literal
/// `* None`.
pub fn summary_content(projects: &BTreeMap<String, SolutionProject>) -> Result<String> {
    let mut content = String::new();

    content.push_str("# Dependency Summary\n\n");

    for project in projects.values() {
        content.push_str(&format!("## {}\n\n", project.name));
        content.push_str(&framework_badges(&project.target_frameworks));
        content.push('\n');
        content.push('\n');
        content.push_str("### Dependencies\n\n");

        let dependencies = collect_project_dependencies(project, projects)?;

        if dependencies.is_empty() {
            content.push_str("* None\n");
        } else {
            for dependency in &dependencies {
                content.push_str(&format!("* {}\n", dependency));
            }
        }

        content.push_str("\n<br>\n\n---\n\n<br>\n\n");
    }

    Ok(content)
}

/// The flat, sorted dependency closure of one project: framework names,
/// referenced project names (recursively), and `Name vVersion` for every
/// package reachable at any depth.
fn collect_project_dependencies(
    project: &SolutionProject,
    projects: &BTreeMap<String, SolutionProject>,
) -> Result<Vec<String>> {
    let mut dependencies = BTreeSet::new();
    let mut visited = HashSet::new();

    for framework in project.framework_references() {
        dependencies.insert(framework.name.clone());
    }

    collect_packages(project, &mut dependencies);

    for reference in project.project_references() {
        collect_referenced_project(
            &reference.project_name(),
            projects,
            &mut dependencies,
            &mut visited,
        )?;
    }

    Ok(dependencies.into_iter().collect())
}

fn collect_referenced_project(
    project_name: &str,
    projects: &BTreeMap<String, SolutionProject>,
    dependencies: &mut BTreeSet<String>,
    visited: &mut HashSet<String>,
) -> Result<()> {
    if !visited.insert(project_name.to_string()) {
        return Ok(());
    }

    let project = projects
        .get(project_name)
        .ok_or_else(|| GeneratorError::UnresolvedProjectReference {
            name: project_name.to_string(),
        })?;

    dependencies.insert(project_name.to_string());
    collect_packages(project, dependencies);

    for reference in project.project_references() {
        collect_referenced_project(&reference.project_name(), projects, dependencies, visited)?;
    }

    Ok(())
}

fn collect_packages(project: &SolutionProject, dependencies: &mut BTreeSet<String>) {
    let mut pairs = Vec::new();

    for package in project.package_references() {
        package.collect_name_versions(&mut pairs);
    }

    for (name, version) in pairs {
        dependencies.insert(format!("{} v{}", name, version));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FrameworkReference, PackageReference, ProjectReference, ReferenceSet};
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

    fn index(projects: Vec<SolutionProject>) -> BTreeMap<String, SolutionProject> {
        projects
            .into_iter()
            .map(|project| (project.name.clone(), project))
            .collect()
    }

    #[test]
    fn test_zero_dependency_project_lists_none() {
        let projects = index(vec![project("Empty")]);
        let content = summary_content(&projects).unwrap();

        assert!(content.contains("## Empty"));
        assert!(content.contains("* None"));
        assert!(!content.contains("* Empty"));
    }

    #[test]
    fn test_badges_for_known_frameworks() {
        let mut a = project("A");
        a.target_frameworks = vec!["net8.0".to_string(), "netstandard2.0".to_string()];

        let projects = index(vec![a]);
        let content = summary_content(&projects).unwrap();

        assert!(content.contains(".NET-8.0-purple"));
        assert!(content.contains(".NET-standard2.0-red"));
    }

    #[test]
    fn test_unknown_framework_has_no_badge() {
        let mut a = project("A");
        a.target_frameworks = vec!["net48".to_string()];

        let projects = index(vec![a]);
        let content = summary_content(&projects).unwrap();

        assert!(!content.contains("img.shields.io"));
    }

    #[test]
    fn test_dependencies_are_flat_sorted_and_merged() {
        let transitive = PackageReference::transitive("Zebra.Utils", "2.0.0", 1);
        let explicit = PackageReference::declared("Alpha.Core", "1.0.0")
            .with_transitive_references(Arc::new(vec![transitive]));

        let mut a = project("A");
        a.dependencies[0].package_references.push(explicit);
        a.dependencies[0].framework_references.push(FrameworkReference {
            name: "Microsoft.AspNetCore.App".to_string(),
        });
        a.dependencies[0].project_references.push(ProjectReference {
            path: PathBuf::from("/solution/B/B.csproj"),
        });

        let mut b = project("B");
        b.dependencies[0]
            .package_references
            .push(PackageReference::declared("Alpha.Core", "1.0.0"));

        let projects = index(vec![a, b]);
        let content = summary_content(&projects).unwrap();

        let section_start = content.find("## A").unwrap();
        let section_end = content.find("## B").unwrap();
        let section = &content[section_start..section_end];

        let bullets: Vec<&str> = section
            .lines()
            .filter(|line| line.starts_with("* "))
            .collect();

        assert_eq!(
            bullets,
            vec![
                "* Alpha.Core v1.0.0",
                "* B",
                "* Microsoft.AspNetCore.App",
                "* Zebra.Utils v2.0.0",
            ]
        );
    }

    #[test]
    fn test_unresolved_project_reference_is_fatal() {
        let mut a = project("A");
        a.dependencies[0].project_references.push(ProjectReference {
            path: PathBuf::from("/solution/Missing/Missing.csproj"),
        });

        let projects = index(vec![a]);
        let error = summary_content(&projects).unwrap_err();
        let generator_error = error.downcast::<GeneratorError>().unwrap();

        assert!(matches!(
            generator_error,
            GeneratorError::UnresolvedProjectReference { .. }
        ));
    }

    #[test]
    fn test_mutually_referencing_projects_do_not_hang() {
        let mut a = project("A");
        a.dependencies[0].project_references.push(ProjectReference {
            path: PathBuf::from("/solution/B/B.csproj"),
        });

        let mut b = project("B");
        b.dependencies[0].project_references.push(ProjectReference {
            path: PathBuf::from("/solution/A/A.csproj"),
        });

        let projects = index(vec![a, b]);
        let content = summary_content(&projects).unwrap();

        assert!(content.contains("## A"));
        assert!(content.contains("## B"));
    }
}

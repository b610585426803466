//! Solution and project file reader.
//!
//! Parses just enough of the `.sln` and `.csproj` formats to extract the
//! project list and each project's reference item groups. Anything beyond
//! that (imported props files, wildcard items, custom MSBuild logic) is
//! out of scope; a project relying on imports for its target framework is
//! rejected.

use crate::domain::{
    FrameworkReference, PackageReference, ProjectReference, ReferenceCondition, ReferenceSet,
    SolutionProject,
};
use crate::ports::SolutionReader;
use crate::shared::error::GeneratorError;
use crate::shared::Result;
use async_trait::async_trait;
use regex::Regex;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

fn solution_project_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r#"(?m)^Project\("\{[0-9A-Fa-f-]+\}"\)\s*=\s*"([^"]+)",\s*"([^"]+)","#)
            .expect("solution project pattern is valid")
    })
}

fn target_frameworks_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"<TargetFrameworks?\s*>([^<]*)</TargetFrameworks?\s*>")
            .expect("target framework pattern is valid")
    })
}

fn item_group_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?s)<ItemGroup(\s[^>]*)?>(.*?)</ItemGroup>")
            .expect("item group pattern is valid")
    })
}

fn condition_attribute_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r#"Condition\s*=\s*"([^"]*)""#).expect("condition pattern is valid")
    })
}

fn package_reference_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"<PackageReference\b[^>]*>").expect("package reference pattern is valid")
    })
}

fn project_reference_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"<ProjectReference\b[^>]*>").expect("project reference pattern is valid")
    })
}

fn framework_reference_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"<FrameworkReference\b[^>]*>").expect("framework reference pattern is valid")
    })
}

fn attribute(element: &str, name: &str) -> Option<String> {
    // Attribute values never contain an escaped quote in project files we
    // accept, so a simple scan is enough.
    let marker = format!("{}=\"", name);
    let start = element.find(&marker)? + marker.len();
    let end = element[start..].find('"')? + start;
    Some(element[start..end].to_string())
}

/// MsbuildSolutionReader adapter parsing `.sln` and `.csproj` files from
/// the filesystem.
pub struct MsbuildSolutionReader;

impl MsbuildSolutionReader {
    pub fn new() -> Self {
        Self
    }

    async fn read_file(path: &Path) -> Result<String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|error| {
                GeneratorError::SolutionParse {
                    path: path.to_path_buf(),
                    details: error.to_string(),
                }
                .into()
            })
    }

    /// The projects listed in the solution file, as (name, absolute path)
    /// pairs. Only `.csproj` entries are considered; solution folders and
    /// other project types are skipped.
    fn solution_projects(solution_path: &Path, content: &str) -> Vec<(String, PathBuf)> {
        let solution_folder = solution_path.parent().unwrap_or_else(|| Path::new(""));

        solution_project_regex()
            .captures_iter(content)
            .filter_map(|captures| {
                let name = captures[1].to_string();
                let relative = captures[2].replace('\\', "/");

                if !relative.to_lowercase().ends_with(".csproj") {
                    return None;
                }

                Some((name, normalize_path(&solution_folder.join(relative))))
            })
            .collect()
    }

    async fn parse_project(
        project_name: &str,
        project_path: &Path,
        target_framework: &str,
    ) -> Result<Option<SolutionProject>> {
        let content = Self::read_file(project_path).await?;

        let target_frameworks = parse_target_frameworks(&content);

        if target_frameworks.is_empty() {
            return Err(GeneratorError::SolutionParse {
                path: project_path.to_path_buf(),
                details:
                    "does not specify a target framework. Importing of Directory.Build.Props is not supported."
                        .to_string(),
            }
            .into());
        }

        // WPF style projects may target net8.0-windows; a plain net8.0
        // request must still match them.
        if !target_frameworks
            .iter()
            .any(|framework| framework.contains(target_framework))
        {
            return Ok(None);
        }

        let project_folder = project_path.parent().unwrap_or_else(|| Path::new(""));
        let dependencies = parse_reference_sets(project_folder, &content);

        Ok(Some(SolutionProject {
            name: project_name.to_string(),
            path: project_path.to_path_buf(),
            target_frameworks,
            dependencies,
        }))
    }
}

impl Default for MsbuildSolutionReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SolutionReader for MsbuildSolutionReader {
    async fn parse(
        &self,
        solution_path: &Path,
        include: &[Regex],
        exclude: &[Regex],
        target_framework: &str,
    ) -> Result<Vec<SolutionProject>> {
        let content = Self::read_file(solution_path).await?;

        let mut entries: Vec<(String, PathBuf)> = Self::solution_projects(solution_path, &content)
            .into_iter()
            .filter(|(_, path)| {
                let path_text = path.to_string_lossy();

                include.iter().any(|regex| regex.is_match(&path_text))
                    && !exclude.iter().any(|regex| regex.is_match(&path_text))
            })
            .collect();

        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let mut projects = Vec::new();

        for (name, path) in entries {
            if let Some(project) = Self::parse_project(&name, &path, target_framework).await? {
                projects.push(project);
            }
        }

        Ok(projects)
    }
}

fn parse_target_frameworks(content: &str) -> Vec<String> {
    target_frameworks_regex()
        .captures_iter(content)
        .flat_map(|captures| {
            captures[1]
                .split(';')
                .map(|framework| framework.trim().to_string())
                .collect::<Vec<_>>()
        })
        .filter(|framework| !framework.is_empty())
        .collect()
}

/// One reference set per `<ItemGroup>`, keeping the group's raw condition
/// for later evaluation against the active target framework.
fn parse_reference_sets(project_folder: &Path, content: &str) -> Vec<ReferenceSet> {
    item_group_regex()
        .captures_iter(content)
        .filter_map(|captures| {
            let attributes = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
            let body = &captures[2];

            let raw_condition = condition_attribute_regex()
                .captures(attributes)
                .map(|c| c[1].to_string())
                .unwrap_or_default();

            let set = ReferenceSet {
                condition: ReferenceCondition::parse(&raw_condition),
                raw_condition,
                project_references: parse_project_references(project_folder, body),
                framework_references: parse_framework_references(body),
                package_references: parse_package_references(body),
            };

            let is_empty = set.project_references.is_empty()
                && set.framework_references.is_empty()
                && set.package_references.is_empty();

            (!is_empty).then_some(set)
        })
        .collect()
}

fn parse_package_references(body: &str) -> Vec<PackageReference> {
    package_reference_regex()
        .find_iter(body)
        .filter_map(|element| {
            let element = element.as_str();
            let name = attribute(element, "Include")?;
            // Entries without a version (e.g. Update items under central
            // package management) are not drawn.
            let version = attribute(element, "Version")?;
            Some(PackageReference::declared(name, version))
        })
        .collect()
}

fn parse_project_references(project_folder: &Path, body: &str) -> Vec<ProjectReference> {
    project_reference_regex()
        .find_iter(body)
        .filter_map(|element| {
            let include = attribute(element.as_str(), "Include")?;
            let relative = include.replace('\\', "/");

            Some(ProjectReference {
                path: normalize_path(&project_folder.join(relative)),
            })
        })
        .collect()
}

fn parse_framework_references(body: &str) -> Vec<FrameworkReference> {
    framework_reference_regex()
        .find_iter(body)
        .filter_map(|element| {
            attribute(element.as_str(), "Include").map(|name| FrameworkReference { name })
        })
        .collect()
}

/// Collapses `.` and `..` components so that relative project reference
/// paths resolve to the same absolute path however they are reached.
fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(Component::ParentDir);
                }
            }
            other => normalized.push(other),
        }
    }

    normalized
}

//! The orchestrating generator: parse, resolve, aggregate, emit.

use crate::aggregation::{diagram_alias, packages_with_multiple_versions, DependencySet, DependencyWalker};
use crate::config::GeneratorConfig;
use crate::domain::SolutionProject;
use crate::generation::diagram::DiagramEmitter;
use crate::generation::summary::{summary_content, SUMMARY_FILENAME};
use crate::ports::{ConsoleLogger, DiagramRenderer, FeedClient, SolutionReader};
use crate::resolution::PackageResolver;
use crate::shared::error::GeneratorError;
use crate::shared::Result;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Parses a solution, resolves every project's package dependency tree
/// from the configured feeds, and exports the dependency summary plus the
/// per-project and all-projects D2 diagrams, once per configured target
/// framework.
///
/// The pipeline per target framework is sequential: prepare the export
/// folder, parse, expand package references through the resolver, then
/// emit. The resolver (and its cache) lives for exactly one target
/// framework pass, since the resolved trees are framework-specific.
pub struct DependencyGenerator {
    config: GeneratorConfig,
    reader: Arc<dyn SolutionReader>,
    feeds: Vec<Arc<dyn FeedClient>>,
    renderer: Arc<dyn DiagramRenderer>,
    logger: Arc<dyn ConsoleLogger>,
}

impl DependencyGenerator {
    /// Validates the configuration up front; nothing is written or
    /// resolved for an invalid configuration.
    pub fn new(
        config: GeneratorConfig,
        reader: Arc<dyn SolutionReader>,
        feeds: Vec<Arc<dyn FeedClient>>,
        renderer: Arc<dyn DiagramRenderer>,
        logger: Arc<dyn ConsoleLogger>,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            reader,
            feeds,
            renderer,
            logger,
        })
    }

    /// Runs the full pipeline for every configured target framework.
    pub async fn create_diagrams(&self) -> Result<()> {
        let target_frameworks = self.config.target_frameworks.clone();

        for target_framework in &target_frameworks {
            self.create_diagrams_for_framework(target_framework).await?;
        }

        Ok(())
    }

    async fn create_diagrams_for_framework(&self, target_framework: &str) -> Result<()> {
        let export_path = self.config.export.root_path.join(target_framework);
        self.prepare_export_folder(&export_path).await?;

        let include = compile_patterns(&self.config.projects.include_patterns)?;
        let exclude = compile_patterns(&self.config.projects.exclude_patterns)?;

        let solution_path = &self.config.projects.solution_path;
        let projects = self
            .reader
            .parse(solution_path, &include, &exclude, target_framework)
            .await?;

        if projects.is_empty() {
            self.logger.report_warning(&format!(
                "No projects found in {} using the regex(es) {}",
                file_name(solution_path),
                self.config.projects.include_patterns.join(", ")
            ));
            return Ok(());
        }

        let projects = self.expand_package_references(projects, target_framework).await?;

        for project in projects.values() {
            self.log_dependencies(project);
        }

        self.export_summary(&export_path, &projects).await?;
        self.export_individual_diagrams(&export_path, &projects).await?;
        self.export_all_diagram(&export_path, &projects).await?;

        self.logger.report_completion(&format!(
            "Diagram generation for {} complete.",
            target_framework
        ));

        Ok(())
    }

    async fn prepare_export_folder(&self, export_path: &Path) -> Result<()> {
        tokio::fs::create_dir_all(export_path)
            .await
            .map_err(|error| GeneratorError::FileWrite {
                path: export_path.to_path_buf(),
                details: error.to_string(),
            })?;

        if self.config.export.clear_contents {
            clear_folder(export_path).await?;
        }

        Ok(())
    }

    /// Filters each project's reference sets against the active target
    /// framework and expands every declared package reference into its
    /// transitive tree through a fresh resolver.
    async fn expand_package_references(
        &self,
        projects: Vec<SolutionProject>,
        target_framework: &str,
    ) -> Result<BTreeMap<String, SolutionProject>> {
        let resolver = PackageResolver::new(
            self.feeds.clone(),
            self.config.max_transitive_depth(),
            Arc::clone(&self.logger),
        );

        let total = projects.len();
        let mut expanded = BTreeMap::new();

        for (index, mut project) in projects.into_iter().enumerate() {
            self.logger.report_progress(index + 1, total, &project.name);

            project
                .dependencies
                .retain(|set| set.condition.matches(target_framework));

            for set in &mut project.dependencies {
                for package in &mut set.package_references {
                    let transitive = resolver
                        .resolve(&package.name, &package.version, target_framework)
                        .await?;

                    *package = package.clone().with_transitive_references(transitive);
                }
            }

            expanded.insert(project.name.clone(), project);
        }

        Ok(expanded)
    }

    async fn export_summary(
        &self,
        export_path: &Path,
        projects: &BTreeMap<String, SolutionProject>,
    ) -> Result<()> {
        let content = summary_content(projects)?;
        let summary_path = export_path.join(SUMMARY_FILENAME);

        tokio::fs::write(&summary_path, content)
            .await
            .map_err(|error| GeneratorError::FileWrite {
                path: summary_path.clone(),
                details: error.to_string(),
            })?;

        Ok(())
    }

    async fn export_individual_diagrams(
        &self,
        export_path: &Path,
        projects: &BTreeMap<String, SolutionProject>,
    ) -> Result<()> {
        let emitter = DiagramEmitter::new(Arc::clone(&self.renderer), Arc::clone(&self.logger));
        let walker = DependencyWalker::new(projects, &self.config.diagram);

        for project in projects.values() {
            let conflicts = packages_with_multiple_versions(project, projects)?;

            let mut set = DependencySet::new();
            walker.append_project(
                project,
                &conflicts,
                &mut set,
                self.config.projects.individual_transitive_depth,
            )?;

            let lines = set.finalize(&self.config.diagram);
            let source = DiagramEmitter::d2_source(&self.config.diagram, &lines);

            emitter
                .export(
                    export_path,
                    &diagram_alias(&project.name),
                    &source,
                    &self.config.export.image_formats,
                )
                .await?;
        }

        Ok(())
    }

    async fn export_all_diagram(
        &self,
        export_path: &Path,
        projects: &BTreeMap<String, SolutionProject>,
    ) -> Result<()> {
        let emitter = DiagramEmitter::new(Arc::clone(&self.renderer), Arc::clone(&self.logger));
        let walker = DependencyWalker::new(projects, &self.config.diagram);

        let mut set = DependencySet::new();

        for project in projects.values() {
            let conflicts = packages_with_multiple_versions(project, projects)?;

            walker.append_project(
                project,
                &conflicts,
                &mut set,
                self.config.projects.all_transitive_depth,
            )?;
        }

        let lines = set.finalize(&self.config.diagram);
        let source = DiagramEmitter::d2_source(&self.config.diagram, &lines);

        let scope_alias = format!("{}-all", self.config.diagram.group_name.to_lowercase());

        emitter
            .export(
                export_path,
                &scope_alias,
                &source,
                &self.config.export.image_formats,
            )
            .await?;

        Ok(())
    }

    /// Logs each of the project's direct dependencies, sorted per kind. A
    /// package appearing at multiple versions anywhere in the project's
    /// flat package closure is reported as a warning.
    fn log_dependencies(&self, project: &SolutionProject) {
        let mut referenced_projects: Vec<String> = project
            .project_references()
            .map(|reference| reference.project_name())
            .collect();
        referenced_projects.sort();

        for name in referenced_projects {
            self.logger
                .report(&format!("{} depends on {}", project.name, name));
        }

        let mut frameworks: Vec<&str> = project
            .framework_references()
            .map(|framework| framework.name.as_str())
            .collect();
        frameworks.sort();

        for name in frameworks {
            self.logger
                .report(&format!("{} depends on {}", project.name, name));
        }

        let mut pairs = Vec::new();
        for package in project.package_references() {
            package.collect_name_versions(&mut pairs);
        }
        pairs.sort();
        pairs.dedup();

        let mut versions_by_name: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, version) in pairs {
            versions_by_name.entry(name).or_default().push(version);
        }

        for (name, versions) in versions_by_name {
            if let [version] = versions.as_slice() {
                self.logger.report(&format!(
                    "{} depends on {} v{}",
                    project.name, name, version
                ));
            } else {
                let joined = versions
                    .iter()
                    .map(|version| format!("v{}", version))
                    .collect::<Vec<_>>()
                    .join(", ");

                self.logger.report_warning(&format!(
                    "{} depends on multiple versions of {} {}",
                    project.name, name, joined
                ));
            }
        }
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|error| {
                GeneratorError::InvalidConfig {
                    message: format!("the pattern '{}' is not a valid regex: {}", pattern, error),
                }
                .into()
            })
        })
        .collect()
}

/// Deletes the files directly inside the folder; subfolders are left alone.
async fn clear_folder(path: &Path) -> Result<()> {
    let mut entries = tokio::fs::read_dir(path)
        .await
        .map_err(|error| GeneratorError::FileRead {
            path: path.to_path_buf(),
            details: error.to_string(),
        })?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|error| GeneratorError::FileRead {
            path: path.to_path_buf(),
            details: error.to_string(),
        })?
    {
        if entry.file_type().await.map(|ft| ft.is_file()).unwrap_or(false) {
            tokio::fs::remove_file(entry.path())
                .await
                .map_err(|error| GeneratorError::FileWrite {
                    path: entry.path(),
                    details: error.to_string(),
                })?;
        }
    }

    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_clear_folder_removes_files_only() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("stale.d2"), "x").unwrap();
        std::fs::write(dir.path().join("stale.svg"), "x").unwrap();
        std::fs::create_dir(dir.path().join("keep")).unwrap();

        clear_folder(dir.path()).await.unwrap();

        let remaining: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();

        assert_eq!(remaining, vec![std::ffi::OsString::from("keep")]);
    }

    #[test]
    fn test_compile_patterns_surfaces_bad_regex() {
        let result = compile_patterns(&["[unclosed".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_compile_patterns_accepts_valid_regexes() {
        let compiled = compile_patterns(&[".*\\.csproj".to_string(), "Tests".to_string()]).unwrap();
        assert_eq!(compiled.len(), 2);
        assert!(compiled[0].is_match("/solution/A/A.csproj"));
    }
}

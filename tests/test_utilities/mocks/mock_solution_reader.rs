use async_trait::async_trait;
use regex::Regex;
use sln_diagram::prelude::*;
use std::path::Path;

/// Mock SolutionReader serving an in-memory project list.
///
/// Applies the same include/exclude/target-framework filtering contract as
/// the real reader so tests can exercise the "no projects matched" path.
pub struct MockSolutionReader {
    projects: Vec<SolutionProject>,
}

impl MockSolutionReader {
    pub fn new(projects: Vec<SolutionProject>) -> Self {
        Self { projects }
    }
}

#[async_trait]
impl SolutionReader for MockSolutionReader {
    async fn parse(
        &self,
        _solution_path: &Path,
        include: &[Regex],
        exclude: &[Regex],
        target_framework: &str,
    ) -> Result<Vec<SolutionProject>> {
        let mut projects: Vec<SolutionProject> = self
            .projects
            .iter()
            .filter(|project| {
                let path_text = project.path.to_string_lossy();

                include.iter().any(|regex| regex.is_match(&path_text))
                    && !exclude.iter().any(|regex| regex.is_match(&path_text))
                    && project.targets_framework(target_framework)
            })
            .cloned()
            .collect();

        projects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(projects)
    }
}

use crate::domain::SolutionProject;
use crate::shared::Result;
use async_trait::async_trait;
use regex::Regex;
use std::path::Path;

/// SolutionReader port for parsing a solution into its projects.
///
/// The reader's output is treated as ground truth: each project carries its
/// resolved target-framework list and raw (pre-package-expansion) reference
/// sets. Projects are returned in stable name order. Project paths are
/// matched against the include patterns first; a project is then dropped
/// again if any exclude pattern matches.
#[async_trait]
pub trait SolutionReader: Send + Sync {
    /// Parses the solution and returns the matching projects that target
    /// `target_framework`.
    async fn parse(
        &self,
        solution_path: &Path,
        include: &[Regex],
        exclude: &[Regex],
        target_framework: &str,
    ) -> Result<Vec<SolutionProject>>;
}

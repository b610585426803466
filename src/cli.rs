use clap::Parser;
use std::path::PathBuf;

use crate::config::{
    load_config_from_path, DiagramDirection, DiagramImageFormat, DiagramOptions, ExportOptions,
    GeneratorConfig, NugetPackageFeed, ProjectOptions,
};
use crate::shared::Result;

/// Generate D2 dependency diagrams for a .NET solution
#[derive(Parser, Debug)]
#[command(name = "sln-diagram")]
#[command(version)]
#[command(
    about = "Generate D2 dependency diagrams and a markdown summary for a .NET solution",
    long_about = None
)]
pub struct Args {
    /// Path to a JSON configuration file; CLI flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the solution file to be parsed
    #[arg(short, long)]
    pub solution: Option<PathBuf>,

    /// Regex a project path must match to be included.
    /// Can be specified multiple times: -i "Lib" -i "App"
    #[arg(short, long = "include", value_name = "PATTERN")]
    pub include: Vec<String>,

    /// Regex that drops an otherwise-included project (repeatable)
    #[arg(short = 'e', long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Target framework to resolve, e.g. net8.0 (repeatable; each gets its
    /// own export subfolder)
    #[arg(short = 't', long = "target-framework", value_name = "TFM")]
    pub target_frameworks: Vec<String>,

    /// NuGet feed source URI (repeatable; order sets resolution priority)
    #[arg(long = "feed", value_name = "URI")]
    pub feeds: Vec<String>,

    /// Basic-auth username applied to feeds given with --feed
    #[arg(long, value_name = "USER")]
    pub feed_username: Option<String>,

    /// Basic-auth password applied to feeds given with --feed
    #[arg(long, value_name = "PASSWORD")]
    pub feed_password: Option<String>,

    /// Transitive package depth for the individual project diagrams
    #[arg(long, value_name = "DEPTH")]
    pub individual_depth: Option<usize>,

    /// Transitive package depth for the all-projects diagram
    #[arg(long, value_name = "DEPTH")]
    pub all_depth: Option<usize>,

    /// Export root path; a subfolder is created per target framework
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Image format to render: svg, png or pdf (repeatable)
    #[arg(long = "image-format", value_name = "FORMAT")]
    pub image_formats: Vec<DiagramImageFormat>,

    /// Delete the existing files in each export folder before generating
    #[arg(long)]
    pub clear: bool,

    /// Label of the group container all project nodes are nested under
    #[arg(long, value_name = "NAME")]
    pub group_name: Option<String>,

    /// Alias prefix for project nodes inside the group container
    #[arg(long, value_name = "PREFIX")]
    pub group_prefix: Option<String>,

    /// Diagram flow direction: left, right, up or down
    #[arg(long, value_name = "DIRECTION")]
    pub direction: Option<DiagramDirection>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Builds the effective configuration: the configuration file (when
    /// given) supplies the base, and each CLI flag that was provided
    /// overrides its counterpart. Validation happens when the generator is
    /// constructed.
    pub fn into_config(self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => load_config_from_path(path)?,
            None => GeneratorConfig {
                package_feeds: Vec::new(),
                projects: ProjectOptions {
                    solution_path: PathBuf::new(),
                    include_patterns: Vec::new(),
                    exclude_patterns: Vec::new(),
                    individual_transitive_depth: 1,
                    all_transitive_depth: 1,
                },
                diagram: DiagramOptions::default(),
                export: ExportOptions {
                    clear_contents: false,
                    root_path: PathBuf::new(),
                    image_formats: Vec::new(),
                },
                target_frameworks: Vec::new(),
            },
        };

        if let Some(solution) = self.solution {
            config.projects.solution_path = solution;
        }

        if !self.include.is_empty() {
            config.projects.include_patterns = self.include;
        }

        if !self.exclude.is_empty() {
            config.projects.exclude_patterns = self.exclude;
        }

        if !self.target_frameworks.is_empty() {
            config.target_frameworks = self.target_frameworks;
        }

        if !self.feeds.is_empty() {
            config.package_feeds = self
                .feeds
                .into_iter()
                .map(|source_uri| NugetPackageFeed {
                    source_uri,
                    username: self.feed_username.clone(),
                    password: self.feed_password.clone(),
                })
                .collect();
        }

        if let Some(depth) = self.individual_depth {
            config.projects.individual_transitive_depth = depth;
        }

        if let Some(depth) = self.all_depth {
            config.projects.all_transitive_depth = depth;
        }

        if let Some(output) = self.output {
            config.export.root_path = output;
        }

        if !self.image_formats.is_empty() {
            config.export.image_formats = self.image_formats;
        }

        if self.clear {
            config.export.clear_contents = true;
        }

        if let Some(group_name) = self.group_name {
            config.diagram.group_name = group_name;
        }

        if let Some(group_prefix) = self.group_prefix {
            config.diagram.group_name_prefix = group_prefix;
        }

        if let Some(direction) = self.direction {
            config.diagram.direction = direction;
        }

        Ok(config)
    }
}

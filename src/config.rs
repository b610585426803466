//! Configuration for the dependency generator.
//!
//! Options can come from a JSON configuration file, from CLI flags, or a
//! mix of both (CLI overrides the file). Validation runs before any
//! resolution work begins; an invalid configuration is fatal and produces
//! no partial output.

use anyhow::Context;
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::shared::error::GeneratorError;
use crate::shared::Result;

/// A NuGet feed to resolve package dependency manifests from, with optional
/// basic-auth credentials.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NugetPackageFeed {
    pub source_uri: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Which projects of the solution are processed and how deep their package
/// dependency trees are expanded.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOptions {
    /// Path to the solution file to be parsed.
    pub solution_path: PathBuf,

    /// One or more regex patterns matched against each project's absolute
    /// path; only matching projects are processed.
    pub include_patterns: Vec<String>,

    /// Regex patterns that drop an otherwise-included project.
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// How deep to traverse transitive package references in each
    /// individual project diagram.
    pub individual_transitive_depth: usize,

    /// How deep to traverse transitive package references in the "all
    /// projects" diagram.
    pub all_transitive_depth: usize,
}

/// Flow direction of the generated diagrams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramDirection {
    #[default]
    Left,
    Right,
    Up,
    Down,
}

impl fmt::Display for DiagramDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self {
            DiagramDirection::Left => "left",
            DiagramDirection::Right => "right",
            DiagramDirection::Up => "up",
            DiagramDirection::Down => "down",
        };
        write!(f, "{}", direction)
    }
}

impl FromStr for DiagramDirection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(DiagramDirection::Left),
            "right" => Ok(DiagramDirection::Right),
            "up" => Ok(DiagramDirection::Up),
            "down" => Ok(DiagramDirection::Down),
            _ => Err(format!(
                "Invalid direction: {}. Please specify 'left', 'right', 'up' or 'down'",
                s
            )),
        }
    }
}

/// Fill color and opacity applied to one class of diagram node.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FillStyle {
    pub fill: String,
    pub opacity: f64,
}

impl FillStyle {
    pub fn new(fill: impl Into<String>, opacity: f64) -> Self {
        Self {
            fill: fill.into(),
            opacity,
        }
    }
}

/// Diagram styling options.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramOptions {
    #[serde(default)]
    pub direction: DiagramDirection,
    #[serde(default = "DiagramOptions::default_framework_style")]
    pub framework_style: FillStyle,
    #[serde(default = "DiagramOptions::default_package_style")]
    pub package_style: FillStyle,
    #[serde(default = "DiagramOptions::default_transitive_style")]
    pub transitive_style: FillStyle,

    /// Label of the group container all project nodes are nested under.
    pub group_name: String,

    /// Alias prefix namespacing project aliases away from package and
    /// framework aliases.
    pub group_name_prefix: String,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            direction: DiagramDirection::default(),
            framework_style: Self::default_framework_style(),
            package_style: Self::default_package_style(),
            transitive_style: Self::default_transitive_style(),
            group_name: "Solution".to_string(),
            group_name_prefix: "sln".to_string(),
        }
    }
}

impl DiagramOptions {
    fn default_framework_style() -> FillStyle {
        FillStyle::new("#98fb98", 1.0)
    }

    fn default_package_style() -> FillStyle {
        FillStyle::new("#add8e6", 1.0)
    }

    fn default_transitive_style() -> FillStyle {
        FillStyle::new("#dcdcdc", 0.8)
    }
}

/// The image formats that can be created from the generated D2 files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramImageFormat {
    Svg,
    Png,
    Pdf,
}

impl DiagramImageFormat {
    /// The file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            DiagramImageFormat::Svg => "svg",
            DiagramImageFormat::Png => "png",
            DiagramImageFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for DiagramImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for DiagramImageFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "svg" => Ok(DiagramImageFormat::Svg),
            "png" => Ok(DiagramImageFormat::Png),
            "pdf" => Ok(DiagramImageFormat::Pdf),
            _ => Err(format!(
                "Invalid image format: {}. Please specify 'svg', 'png' or 'pdf'",
                s
            )),
        }
    }
}

/// Export path and image format options.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    /// Clears the files in each per-framework export folder when true.
    #[serde(default)]
    pub clear_contents: bool,

    /// Root export path; a subfolder is created per target framework.
    pub root_path: PathBuf,

    /// Can be empty, or one or more of svg, png, pdf.
    #[serde(default)]
    pub image_formats: Vec<DiagramImageFormat>,
}

/// The full generator configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    #[serde(default)]
    pub package_feeds: Vec<NugetPackageFeed>,
    pub projects: ProjectOptions,
    pub diagram: DiagramOptions,
    pub export: ExportOptions,

    /// The target frameworks to resolve; each produces its own export
    /// subfolder.
    pub target_frameworks: Vec<String>,
}

impl GeneratorConfig {
    /// Validates the configuration. All checks run before any resolution
    /// work begins.
    pub fn validate(&self) -> Result<()> {
        if self.projects.solution_path.as_os_str().is_empty() {
            return Err(invalid("the solution path must not be empty"));
        }

        if self.projects.include_patterns.is_empty() {
            return Err(invalid("at least one include pattern is required"));
        }

        for pattern in self
            .projects
            .include_patterns
            .iter()
            .chain(self.projects.exclude_patterns.iter())
        {
            if let Err(error) = Regex::new(pattern) {
                return Err(invalid(&format!(
                    "the pattern '{}' is not a valid regex: {}",
                    pattern, error
                )));
            }
        }

        if self.package_feeds.is_empty() {
            return Err(invalid("at least one package feed is required"));
        }

        for feed in &self.package_feeds {
            if feed.source_uri.trim().is_empty() {
                return Err(invalid("a package feed source URI must not be empty"));
            }
        }

        if self.target_frameworks.is_empty() {
            return Err(invalid("at least one target framework is required"));
        }

        if self.target_frameworks.iter().any(|tfm| tfm.trim().is_empty()) {
            return Err(invalid("a target framework must not be empty"));
        }

        if self.diagram.group_name.trim().is_empty() {
            return Err(invalid("the diagram group name must not be empty"));
        }

        if self.diagram.group_name_prefix.trim().is_empty() {
            return Err(invalid("the diagram group name prefix must not be empty"));
        }

        for (label, style) in [
            ("framework", &self.diagram.framework_style),
            ("package", &self.diagram.package_style),
            ("transitive", &self.diagram.transitive_style),
        ] {
            validate_fill_style(label, style)?;
        }

        if self.export.root_path.as_os_str().is_empty() {
            return Err(invalid("the export root path must not be empty"));
        }

        Ok(())
    }

    /// The resolver expands to the deeper of the two configured diagram
    /// depths; each diagram then prunes at its own bound.
    pub fn max_transitive_depth(&self) -> usize {
        self.projects
            .individual_transitive_depth
            .max(self.projects.all_transitive_depth)
    }
}

fn invalid(message: &str) -> anyhow::Error {
    GeneratorError::InvalidConfig {
        message: message.to_string(),
    }
    .into()
}

fn validate_fill_style(label: &str, style: &FillStyle) -> Result<()> {
    let fill = style.fill.trim();

    let is_hex_color = fill.len() == 7
        && fill.starts_with('#')
        && fill[1..].chars().all(|c| c.is_ascii_hexdigit());

    if !is_hex_color {
        return Err(invalid(&format!(
            "the {} style fill '{}' must be a '#rrggbb' color",
            label, style.fill
        )));
    }

    if !(0.0..=1.0).contains(&style.opacity) {
        return Err(invalid(&format!(
            "the {} style opacity {} must be between 0 and 1",
            label, style.opacity
        )));
    }

    Ok(())
}

/// Load a configuration from an explicit JSON file path.
pub fn load_config_from_path(path: &Path) -> Result<GeneratorConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: GeneratorConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

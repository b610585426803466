use crate::config::{DiagramOptions, FillStyle};
use std::collections::{HashMap, HashSet};

/// Accumulates the output lines for one diagram scope.
///
/// Node, edge, group-container and framework-style lines are plain set
/// entries (a line is added at most once). Package style lines are not
/// added directly: each package sighting is recorded as an observation and
/// the style lines are derived at finalization - an alias that was ever
/// seen as an explicit reference gets the explicit style, otherwise the
/// transitive style. Deriving styles from the full observation set makes
/// the result independent of visitation order.
#[derive(Debug, Default)]
pub struct DependencySet {
    lines: HashSet<String>,
    package_observations: HashMap<String, bool>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a line; returns whether it was newly inserted.
    pub fn add_line(&mut self, line: impl Into<String>) -> bool {
        self.lines.insert(line.into())
    }

    pub fn contains(&self, line: &str) -> bool {
        self.lines.contains(line)
    }

    /// Records that a package alias was seen in an explicit or transitive
    /// role. Explicit wins: once seen as explicit, the alias stays
    /// explicit.
    pub fn observe_package(&mut self, alias: &str, is_transitive: bool) {
        let explicit = self
            .package_observations
            .entry(alias.to_string())
            .or_insert(false);

        if !is_transitive {
            *explicit = true;
        }
    }

    /// Framework nodes always use the fixed framework style.
    pub fn add_framework_style(&mut self, alias: &str, style: &FillStyle) {
        self.lines.insert(style_fill_line(alias, style));
        self.lines.insert(style_opacity_line(alias, style));
    }

    /// Folds the package observations into style lines and returns the
    /// complete, unordered line set for emission.
    pub fn finalize(mut self, diagram: &DiagramOptions) -> HashSet<String> {
        for (alias, explicit) in &self.package_observations {
            let style = if *explicit {
                &diagram.package_style
            } else {
                &diagram.transitive_style
            };

            self.lines.insert(style_fill_line(alias, style));
            self.lines.insert(style_opacity_line(alias, style));
        }

        self.lines
    }
}

fn style_fill_line(alias: &str, style: &FillStyle) -> String {
    format!("{}.style.fill: \"{}\"", alias, style.fill)
}

fn style_opacity_line(alias: &str, style: &FillStyle) -> String {
    format!("{}.style.opacity: {}", alias, style.opacity)
}

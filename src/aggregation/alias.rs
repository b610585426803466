//! Stable, diagram-safe alias derivation.

/// Derives a diagram-safe identifier from a project, framework or package
/// name: `.` becomes `-` and the result is lowercased.
pub fn diagram_alias(name: &str) -> String {
    name.replace('.', "-").to_lowercase()
}

/// Project aliases are namespaced under the diagram group prefix to avoid
/// collisions with package and framework aliases.
pub fn project_alias(project_name: &str, group_prefix: &str) -> String {
    format!("{}.{}", group_prefix, diagram_alias(project_name))
}

/// A package alias is derived from the name and version together, so each
/// distinct version gets its own node.
pub fn package_alias(package_name: &str, version: &str) -> String {
    diagram_alias(&format!("{}_{}", package_name, version))
}

/// The synthetic container node alias for a version-conflicting package
/// name.
pub fn package_group_alias(package_name: &str) -> String {
    format!("{}-group", diagram_alias(package_name))
}

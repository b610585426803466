use crate::domain::PackageReference;
use crate::ports::{ConsoleLogger, DependencyGroup, FeedClient, PackageDependency};
use crate::shared::error::GeneratorError;
use crate::shared::Result;
use dashmap::DashMap;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::sync::Arc;

/// Known target framework monikers, most recent runtime first. When a
/// package segments its dependencies by target framework, the first moniker
/// in this list that the package provides a group for is used.
pub const TARGET_FRAMEWORK_ORDER_PREFERENCE: [&str; 7] = [
    "net8.0",
    "net7.0",
    "net6.0",
    "net5.0",
    "netcoreapp3.1",
    "netstandard2.1",
    "netstandard2.0",
];

/// Reduces a bracketed version range to its lower bound.
///
/// `[2.1.1, 3.0.0)` becomes `2.1.1`. This "assume minimum version" policy is
/// deliberate: version ambiguity is flagged in the diagrams rather than
/// auto-resolved.
pub fn assumed_version(version: &str) -> String {
    let version = version.trim();

    if let Some(inner) = version.strip_prefix(['[', '(']) {
        let inner = inner.strip_suffix([']', ')']).unwrap_or(inner);

        return inner
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
    }

    version.to_string()
}

/// Resolves a package's transitive dependency tree from the configured
/// feeds, depth-bounded, with memoization.
///
/// Resolved dependency lists are cached by (name, normalized version) for
/// the lifetime of the resolver; a cache hit returns the identical shared
/// subtree without any remote call. Feeds are tried in configured order and
/// the first feed that knows the package wins.
///
/// Execution is sequential within one run, so the concurrent map is all the
/// guarding the cache needs; a parallelized caller would additionally have
/// to ensure at-most-once in-flight resolution per key.
pub struct PackageResolver {
    feeds: Vec<Arc<dyn FeedClient>>,
    cache: DashMap<(String, String), Arc<Vec<PackageReference>>>,
    max_depth: usize,
    logger: Arc<dyn ConsoleLogger>,
}

impl PackageResolver {
    pub fn new(
        feeds: Vec<Arc<dyn FeedClient>>,
        max_depth: usize,
        logger: Arc<dyn ConsoleLogger>,
    ) -> Self {
        Self {
            feeds,
            cache: DashMap::new(),
            max_depth,
            logger,
        }
    }

    /// Resolves the direct dependencies of an explicitly declared package
    /// reference, with each dependency's own dependencies expanded
    /// recursively up to the configured maximum depth.
    pub async fn resolve(
        &self,
        package_name: &str,
        version: &str,
        target_framework: &str,
    ) -> Result<Arc<Vec<PackageReference>>> {
        self.resolve_recursively(package_name, version, 1, target_framework)
            .await
    }

    fn resolve_recursively<'a>(
        &'a self,
        package_name: &'a str,
        version: &'a str,
        depth: usize,
        target_framework: &'a str,
    ) -> BoxFuture<'a, Result<Arc<Vec<PackageReference>>>> {
        async move {
            // Terminal case: nodes beyond the bound are not expanded, and no
            // network access happens for them.
            if depth > self.max_depth {
                return Ok(Arc::new(Vec::new()));
            }

            let version = assumed_version(version);
            let cache_key = (package_name.to_string(), version.clone());

            if let Some(cached) = self.cache.get(&cache_key) {
                self.logger.report_detail("  Resolved from the cache.");
                return Ok(Arc::clone(cached.value()));
            }

            self.logger.report(&format!(
                "Processing package references for {} v{} ({})",
                package_name, version, target_framework
            ));

            let mut resolved = None;

            for feed in &self.feeds {
                let Some(groups) = feed.resolve_dependencies(package_name, &version).await? else {
                    continue;
                };

                let dependencies = select_dependency_group(package_name, &version, groups)?;
                let mut package_references = Vec::with_capacity(dependencies.len());

                for dependency in dependencies {
                    let dependency_version = assumed_version(&dependency.version_range);

                    let transitive_references = self
                        .resolve_recursively(
                            &dependency.name,
                            &dependency_version,
                            depth + 1,
                            target_framework,
                        )
                        .await?;

                    package_references.push(
                        PackageReference::transitive(dependency.name, dependency_version, depth)
                            .with_transitive_references(transitive_references),
                    );
                }

                resolved = Some(package_references);
                break;
            }

            let package_references = resolved.ok_or_else(|| GeneratorError::PackageNotResolved {
                name: package_name.to_string(),
                version: version.clone(),
            })?;

            let shared = Arc::new(package_references);
            self.cache.insert(cache_key, Arc::clone(&shared));

            Ok(shared)
        }
        .boxed()
    }
}

/// Selects the dependency group to use for a package manifest.
///
/// A manifest with no framework-segmented groups resolves to an empty
/// dependency list. Otherwise exactly one group is chosen via the moniker
/// preference order; no intersection with the known monikers fails the
/// resolution.
fn select_dependency_group(
    package_name: &str,
    version: &str,
    groups: Vec<DependencyGroup>,
) -> Result<Vec<PackageDependency>> {
    let mut framework_groups: Vec<(String, Vec<PackageDependency>)> = groups
        .into_iter()
        .filter_map(|group| match group.target_framework {
            Some(framework) if !framework.trim().is_empty() => {
                Some((framework.to_lowercase(), group.dependencies))
            }
            _ => None,
        })
        .collect();

    if framework_groups.is_empty() {
        return Ok(Vec::new());
    }

    for preferred in TARGET_FRAMEWORK_ORDER_PREFERENCE {
        if let Some(index) = framework_groups
            .iter()
            .position(|(framework, _)| framework == preferred)
        {
            return Ok(framework_groups.swap_remove(index).1);
        }
    }

    let available = framework_groups
        .iter()
        .map(|(framework, _)| framework.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    Err(GeneratorError::NoUsableTargetFramework {
        name: package_name.to_string(),
        version: version.to_string(),
        available,
    }
    .into())
}

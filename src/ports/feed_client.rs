use crate::shared::Result;
use async_trait::async_trait;

/// A direct dependency declared by a package, as reported by a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDependency {
    pub name: String,
    /// May be an exact version or a bracketed range expression such as
    /// `[2.1.1, 3.0.0)`; normalization happens in the resolver.
    pub version_range: String,
}

/// One dependency group from a package manifest. Feeds segment a package's
/// dependencies by the target framework each group applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyGroup {
    /// `None` (or empty) when the group is not framework-specific.
    pub target_framework: Option<String>,
    pub dependencies: Vec<PackageDependency>,
}

/// FeedClient port for resolving package dependency manifests.
///
/// One instance represents one configured feed. The resolver queries feeds
/// in the configured priority order and stops at the first feed that knows
/// the requested package/version.
#[async_trait]
pub trait FeedClient: Send + Sync {
    /// Resolves the dependency manifest for an exact package identity.
    ///
    /// # Returns
    /// `Ok(None)` when this feed does not know the package/version (the
    /// resolver will then try the next configured feed).
    ///
    /// # Errors
    /// Returns an error for transport failures or unexpected feed
    /// responses; these abort the run.
    async fn resolve_dependencies(
        &self,
        package_name: &str,
        version: &str,
    ) -> Result<Option<Vec<DependencyGroup>>>;

    /// The feed identity used in log output.
    fn source(&self) -> &str;
}

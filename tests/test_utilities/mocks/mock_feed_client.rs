use async_trait::async_trait;
use sln_diagram::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Mock FeedClient serving canned dependency manifests.
///
/// Records every (name, version) request so tests can assert on call
/// counts and caching behaviour.
pub struct MockFeedClient {
    manifests: HashMap<(String, String), Vec<DependencyGroup>>,
    call_count: AtomicUsize,
    requested: Mutex<Vec<(String, String)>>,
}

impl MockFeedClient {
    pub fn new() -> Self {
        Self {
            manifests: HashMap::new(),
            call_count: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Registers a manifest with a single `net8.0` dependency group listing
    /// the given (name, version range) dependencies.
    pub fn with_manifest(
        mut self,
        package: &str,
        version: &str,
        dependencies: &[(&str, &str)],
    ) -> Self {
        let group = DependencyGroup {
            target_framework: Some("net8.0".to_string()),
            dependencies: dependencies
                .iter()
                .map(|(name, range)| PackageDependency {
                    name: name.to_string(),
                    version_range: range.to_string(),
                })
                .collect(),
        };

        self.manifests
            .insert((package.to_string(), version.to_string()), vec![group]);
        self
    }

    /// Registers a manifest with explicit dependency groups.
    pub fn with_groups(mut self, package: &str, version: &str, groups: Vec<DependencyGroup>) -> Self {
        self.manifests
            .insert((package.to_string(), version.to_string()), groups);
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<(String, String)> {
        self.requested.lock().unwrap().clone()
    }

    pub fn requests_for(&self, package: &str) -> usize {
        self.requested
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == package)
            .count()
    }
}

impl Default for MockFeedClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedClient for MockFeedClient {
    async fn resolve_dependencies(
        &self,
        package_name: &str,
        version: &str,
    ) -> Result<Option<Vec<DependencyGroup>>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requested
            .lock()
            .unwrap()
            .push((package_name.to_string(), version.to_string()));

        Ok(self
            .manifests
            .get(&(package_name.to_string(), version.to_string()))
            .cloned())
    }

    fn source(&self) -> &str {
        "mock://feed"
    }
}

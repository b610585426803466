use crate::config::NugetPackageFeed;
use crate::ports::{DependencyGroup, FeedClient, PackageDependency};
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogEntry {
    #[serde(default)]
    dependency_groups: Vec<CatalogDependencyGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogDependencyGroup {
    #[serde(default)]
    target_framework: Option<String>,
    #[serde(default)]
    dependencies: Vec<CatalogDependency>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogDependency {
    id: String,
    #[serde(default)]
    range: String,
}

/// NugetFeedClient adapter for resolving package dependency manifests from
/// a NuGet catalog-entry endpoint.
///
/// One instance represents one configured feed. Requests the registration
/// document `{feed}/{lowercase-id}/{version}.json` with optional basic
/// auth; a 404 means the feed does not know the package, which is not an
/// error (the resolver moves on to the next feed).
pub struct NugetFeedClient {
    client: reqwest::Client,
    source_uri: String,
    username: Option<String>,
    password: Option<String>,
    max_retries: u32,
}

impl NugetFeedClient {
    pub fn new(feed: &NugetPackageFeed) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("sln-diagram/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            source_uri: feed.source_uri.trim_end_matches('/').to_string(),
            username: feed.username.clone(),
            password: feed.password.clone(),
            max_retries: 3,
        })
    }

    /// Validates package name and version for URL safety.
    fn validate_url_component(component: &str, component_type: &str) -> Result<()> {
        if component.contains('/') || component.contains('\\') {
            anyhow::bail!(
                "Security: {} contains path separators which are not allowed",
                component_type
            );
        }

        if component.contains("..") {
            anyhow::bail!(
                "Security: {} contains '..' which is not allowed",
                component_type
            );
        }

        if component.contains('#') || component.contains('?') || component.contains('@') {
            anyhow::bail!(
                "Security: {} contains URL-unsafe characters",
                component_type
            );
        }

        Ok(())
    }

    fn manifest_url(&self, package_name: &str, version: &str) -> String {
        let encoded_package = urlencoding::encode(package_name);
        let encoded_version = urlencoding::encode(version);

        format!(
            "{}/{}/{}.json",
            self.source_uri,
            encoded_package.to_lowercase(),
            encoded_version.to_lowercase()
        )
    }

    async fn fetch_with_retry(
        &self,
        package_name: &str,
        version: &str,
    ) -> Result<Option<CatalogEntry>> {
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match self.fetch_catalog_entry(package_name, version).await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    }
                }
            }
        }

        Err(last_error.unwrap())
    }

    async fn fetch_catalog_entry(
        &self,
        package_name: &str,
        version: &str,
    ) -> Result<Option<CatalogEntry>> {
        Self::validate_url_component(package_name, "Package name")?;
        Self::validate_url_component(version, "Version")?;

        let url = self.manifest_url(package_name, version);

        let mut request = self.client.get(&url);

        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.password.as_deref());
        }

        let response = request.send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            anyhow::bail!(
                "The feed {} returned status code {}",
                self.source_uri,
                response.status()
            );
        }

        let entry: CatalogEntry = response.json().await?;
        Ok(Some(entry))
    }
}

#[async_trait]
impl FeedClient for NugetFeedClient {
    async fn resolve_dependencies(
        &self,
        package_name: &str,
        version: &str,
    ) -> Result<Option<Vec<DependencyGroup>>> {
        let Some(entry) = self.fetch_with_retry(package_name, version).await? else {
            return Ok(None);
        };

        let groups = entry
            .dependency_groups
            .into_iter()
            .map(|group| DependencyGroup {
                target_framework: group.target_framework,
                dependencies: group
                    .dependencies
                    .into_iter()
                    .map(|dependency| PackageDependency {
                        name: dependency.id,
                        version_range: dependency.range,
                    })
                    .collect(),
            })
            .collect();

        Ok(Some(groups))
    }

    fn source(&self) -> &str {
        &self.source_uri
    }
}

use crate::{DepscopeConfig, DepscopeError, Result};
use futures::StreamExt;
use futures::stream;
use governor::{Quota, RateLimiter};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

type GithubRateLimiter = Arc<
    RateLimiter<
        governor::state::NotKeyed,
        governor::state::InMemoryState,
        governor::clock::DefaultClock,
    >,
>;

#[derive(Debug, Clone, Serialize)]
pub struct PackageHealth {
    pub name: String,
    pub latest: Option<String>,
    pub downloads_last_month: Option<u64>,
    pub repository: Option<String>,
    pub stars: Option<u64>,
    pub open_issues: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RegistryDocument {
    #[serde(default, rename = "dist-tags")]
    dist_tags: std::collections::BTreeMap<String, String>,
    #[serde(default)]
    repository: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct DownloadsPoint {
    downloads: u64,
}

#[derive(Debug, Deserialize)]
struct GithubRepo {
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    open_issues_count: u64,
}

/// Registry and source-hosting lookups behind one shared rate limit.
///
/// The GitHub quota is global across all packages in a run; registry and
/// downloads endpoints are not metered.
pub struct HealthClient {
    client: reqwest::Client,
    github_limiter: GithubRateLimiter,
    registry_url: String,
    downloads_api_url: String,
    github_token: Option<String>,
    concurrency: usize,
}

impl HealthClient {
    pub fn new(config: &DepscopeConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!("depscope/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| DepscopeError::HttpClient {
                reason: err.to_string(),
            })?;

        let per_minute = NonZeroU32::new(config.github_requests_per_minute.max(1))
            .unwrap_or(NonZeroU32::MIN);
        let github_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)));

        Ok(HealthClient {
            client,
            github_limiter,
            registry_url: config.registry_url.clone(),
            downloads_api_url: config.downloads_api_url.clone(),
            github_token: config.github_token.clone(),
            concurrency: config.health_concurrency,
        })
    }

    /// Health of every named package, fetched with bounded concurrency.
    /// Output order is input order regardless of completion order.
    pub async fn report(&self, names: &[String]) -> Vec<PackageHealth> {
        stream::iter(names.iter().cloned())
            .map(|name| self.package_health(name))
            .buffered(self.concurrency.max(1))
            .collect()
            .await
    }

    /// Lookups are best-effort: any endpoint failing leaves its fields
    /// empty rather than failing the report.
    async fn package_health(&self, name: String) -> PackageHealth {
        let encoded = encode_package_name(&name);

        let registry_url = format!("{}/{}", self.registry_url, encoded);
        let registry_doc: Option<RegistryDocument> = self.get_json(&registry_url).await.ok();

        let downloads_url = format!(
            "{}/downloads/point/last-month/{}",
            self.downloads_api_url, encoded
        );
        let downloads: Option<DownloadsPoint> = self.get_json(&downloads_url).await.ok();

        let repository = registry_doc
            .as_ref()
            .and_then(|doc| doc.repository.as_ref())
            .and_then(repository_url);

        let github = match repository.as_deref().and_then(parse_github_repo) {
            Some((owner, repo)) => self.github_repo(&owner, &repo).await.ok(),
            None => None,
        };

        PackageHealth {
            name,
            latest: registry_doc.and_then(|doc| doc.dist_tags.get("latest").cloned()),
            downloads_last_month: downloads.map(|point| point.downloads),
            repository,
            stars: github.as_ref().map(|repo| repo.stargazers_count),
            open_issues: github.map(|repo| repo.open_issues_count),
        }
    }

    async fn github_repo(&self, owner: &str, repo: &str) -> Result<GithubRepo> {
        self.github_limiter.until_ready().await;

        let url = format!("https://api.github.com/repos/{}/{}", owner, repo);
        let mut request = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");

        if let Some(token) = &self.github_token {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().await.map_err(|err| DepscopeError::Http {
            url: url.clone(),
            reason: err.to_string(),
        })?;

        if !response.status().is_success() {
            return Err(DepscopeError::Http {
                url,
                reason: format!("status {}", response.status()),
            });
        }

        response.json().await.map_err(|err| DepscopeError::Http {
            url,
            reason: err.to_string(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| DepscopeError::Http {
                url: url.to_string(),
                reason: err.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(DepscopeError::Http {
                url: url.to_string(),
                reason: format!("status {}", response.status()),
            });
        }

        response.json().await.map_err(|err| DepscopeError::Http {
            url: url.to_string(),
            reason: err.to_string(),
        })
    }
}

pub async fn health(config: &DepscopeConfig, names: &[String]) -> Result<Vec<PackageHealth>> {
    let client = HealthClient::new(config)?;
    Ok(client.report(names).await)
}

/// The registry keeps a scope's leading `@` literal; only the slash in
/// `@scope/name` is percent-encoded.
fn encode_package_name(name: &str) -> String {
    if name.starts_with('@') {
        name.replace('/', "%2F")
    } else {
        name.to_string()
    }
}

/// The registry's `repository` field is either a string or
/// `{type, url, directory?}`.
fn repository_url(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(url) => Some(url.clone()),
        serde_json::Value::Object(obj) => obj
            .get("url")
            .and_then(|url| url.as_str())
            .map(String::from),
        _ => None,
    }
}

/// Extract (owner, repo) from the URL forms npm manifests use:
/// `git+https://github.com/o/r.git`, `git://github.com/o/r`,
/// `git@github.com:o/r.git`, `github:o/r`, plain `https://...`.
fn parse_github_repo(url: &str) -> Option<(String, String)> {
    let rest = if let Some(short) = url.strip_prefix("github:") {
        short
    } else {
        let marker = url.find("github.com")?;
        url[marker + "github.com".len()..].trim_start_matches([':', '/'])
    };

    let mut segments = rest.split('/');
    let owner = segments.next()?.trim();
    let repo = segments.next()?.trim().trim_end_matches(".git");

    if owner.is_empty() || repo.is_empty() {
        return None;
    }

    Some((owner.to_string(), repo.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scoped_names_keep_the_at_sign() {
        assert_eq!(encode_package_name("@babel/core"), "@babel%2Fcore");
        assert_eq!(encode_package_name("@types/node"), "@types%2Fnode");
        assert_eq!(encode_package_name("lodash"), "lodash");
    }

    #[test]
    fn parses_common_repository_url_forms() {
        let cases = [
            "git+https://github.com/lodash/lodash.git",
            "git://github.com/lodash/lodash.git",
            "git@github.com:lodash/lodash.git",
            "https://github.com/lodash/lodash",
            "github:lodash/lodash",
        ];

        for case in cases {
            assert_eq!(
                parse_github_repo(case),
                Some(("lodash".to_string(), "lodash".to_string())),
                "failed on {case}"
            );
        }
    }

    #[test]
    fn non_github_hosts_are_ignored() {
        assert_eq!(parse_github_repo("https://gitlab.com/o/r"), None);
        assert_eq!(parse_github_repo("github:"), None);
    }

    #[test]
    fn repository_field_accepts_both_shapes() {
        assert_eq!(
            repository_url(&json!("https://github.com/o/r")),
            Some("https://github.com/o/r".to_string())
        );
        assert_eq!(
            repository_url(&json!({"type": "git", "url": "git://github.com/o/r.git"})),
            Some("git://github.com/o/r.git".to_string())
        );
        assert_eq!(repository_url(&json!(42)), None);
    }

    #[tokio::test]
    #[ignore] // requires network access
    async fn fetches_live_health_for_a_small_package() {
        let config = DepscopeConfig::from_env();
        let reports = health(&config, &["left-pad".to_string()]).await.unwrap();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].downloads_last_month.is_some());
    }
}

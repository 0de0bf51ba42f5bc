use std::env;

#[derive(Debug, Clone)]
pub struct DepscopeConfig {
    pub registry_url: String,
    pub downloads_api_url: String,
    pub health_concurrency: usize,
    pub github_requests_per_minute: u32,
    pub github_token: Option<String>,
}

impl DepscopeConfig {
    pub fn from_env() -> Self {
        let registry_url = env::var("DEPSCOPE_REGISTRY")
            .unwrap_or_else(|_| "https://registry.npmjs.org".to_string());

        let downloads_api_url = env::var("DEPSCOPE_DOWNLOADS_API")
            .unwrap_or_else(|_| "https://api.npmjs.org".to_string());

        let health_concurrency = env::var("DEPSCOPE_HEALTH_CONCURRENCY")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .filter(|&n| n > 0)
            .unwrap_or(4);

        // GitHub allows 60 unauthenticated requests per hour; stay under it by default
        let github_requests_per_minute = env::var("DEPSCOPE_GITHUB_RPM")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .filter(|&n| n > 0)
            .unwrap_or(30);

        let github_token = env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());

        DepscopeConfig {
            registry_url,
            downloads_api_url,
            health_concurrency,
            github_requests_per_minute,
            github_token,
        }
    }
}

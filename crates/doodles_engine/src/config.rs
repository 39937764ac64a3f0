use crate::{FetchSettings, RetryPolicy};

pub const DEFAULT_HOST: &str = "www.sonnydoodles.com";
pub const DEFAULT_KEY: &str = "54bb180f2d54c9f46767bd867f4f6565";
pub const DEFAULT_ENDPOINT: &str = "https://api.indexnow.org/indexnow";
pub const USER_AGENT: &str = "sonnydoodles-indexnow-submit/1.0";

/// Everything one submission run needs. Built once at process entry.
#[derive(Debug, Clone)]
pub struct IndexNowConfig {
    pub host: String,
    pub key: String,
    pub sitemap_url: String,
    pub endpoint: String,
    pub retry: RetryPolicy,
    pub fetch: FetchSettings,
}

impl Default for IndexNowConfig {
    fn default() -> Self {
        Self::for_host(DEFAULT_HOST)
    }
}

impl IndexNowConfig {
    /// Defaults for `host`, with the sitemap at `https://{host}/sitemap.xml`.
    pub fn for_host(host: impl Into<String>) -> Self {
        let host = host.into();
        Self {
            sitemap_url: default_sitemap_url(&host),
            host,
            key: DEFAULT_KEY.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            retry: RetryPolicy::default(),
            fetch: FetchSettings::default(),
        }
    }
}

pub fn default_sitemap_url(host: &str) -> String {
    format!("https://{host}/sitemap.xml")
}

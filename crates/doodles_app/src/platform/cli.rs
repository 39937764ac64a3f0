use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use doodles_engine::{
    default_sitemap_url, IndexNowConfig, RetryPolicy, DEFAULT_ENDPOINT, DEFAULT_HOST, DEFAULT_KEY,
};

/// Submit site URLs to the IndexNow API.
///
/// URLs given on the command line are submitted as-is; without any, the
/// site's sitemap is fetched and every http(s) `<loc>` entry is submitted.
#[derive(Debug, Parser)]
#[command(name = "submit-indexnow", version)]
pub struct Cli {
    /// Absolute URLs to submit.
    #[arg(value_name = "URL")]
    pub urls: Vec<String>,

    /// Site host the key belongs to [default: www.sonnydoodles.com].
    #[arg(long, env = "INDEXNOW_HOST")]
    pub host: Option<String>,

    /// IndexNow key; `https://{host}/{key}.txt` must serve it.
    #[arg(long, env = "INDEXNOW_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Sitemap to read when no URLs are given [default: https://{host}/sitemap.xml].
    #[arg(long, env = "SITEMAP_URL")]
    pub sitemap_url: Option<String>,

    /// IndexNow endpoint [default: https://api.indexnow.org/indexnow].
    #[arg(long, env = "INDEXNOW_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Sitemap fetch attempts before giving up [default: 8].
    #[arg(long, env = "INDEXNOW_RETRIES")]
    pub retries: Option<String>,

    /// Fixed pause between sitemap fetch attempts, in milliseconds [default: 7500].
    #[arg(long, env = "INDEXNOW_RETRY_DELAY_MS")]
    pub retry_delay_ms: Option<String>,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolves the run configuration. Blank values, as left behind by an
    /// unset CI secret, fall back to the defaults.
    pub fn config(&self) -> anyhow::Result<IndexNowConfig> {
        let host = non_blank(&self.host).unwrap_or(DEFAULT_HOST);
        let defaults = RetryPolicy::default();

        let max_attempts = match non_blank(&self.retries) {
            Some(raw) => raw
                .parse::<u32>()
                .with_context(|| format!("invalid retry count {raw:?}"))?,
            None => defaults.max_attempts,
        };
        let delay = match non_blank(&self.retry_delay_ms) {
            Some(raw) => Duration::from_millis(
                raw.parse::<u64>()
                    .with_context(|| format!("invalid retry delay {raw:?}"))?,
            ),
            None => defaults.delay,
        };

        let mut config = IndexNowConfig::for_host(host);
        config.key = non_blank(&self.key).unwrap_or(DEFAULT_KEY).to_string();
        config.sitemap_url = non_blank(&self.sitemap_url)
            .map(str::to_string)
            .unwrap_or_else(|| default_sitemap_url(host));
        config.endpoint = non_blank(&self.endpoint)
            .unwrap_or(DEFAULT_ENDPOINT)
            .to_string();
        config.retry = RetryPolicy::new(max_attempts, delay);
        Ok(config)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

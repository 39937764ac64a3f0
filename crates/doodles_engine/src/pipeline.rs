use doodles_core::{extract_sitemap_urls, normalize_cli_urls, partition_by_host, UrlSet};
use doodles_logging::{doodles_info, doodles_warn};
use thiserror::Error;

use crate::{
    retry_with_policy, Delay, FetchError, IndexNowClient, IndexNowConfig, ReqwestFetcher,
    ReqwestSubmitter, SubmissionPayload, SubmitError, SubmitResponse, TextFetcher, TokioDelay,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlSource {
    Cli,
    Sitemap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    pub source: UrlSource,
    pub urls: Vec<String>,
    pub host_mismatches: usize,
    pub response: SubmitResponse,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("No URLs found to submit.")]
    NoUrls,
    #[error("Failed to fetch {url} after {attempts} attempts")]
    SitemapUnavailable {
        url: String,
        attempts: u32,
        #[source]
        last: FetchError,
    },
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// Collects URLs (CLI first, sitemap otherwise) and submits them in one batch.
pub async fn run_submission<S: AsRef<str>>(
    config: &IndexNowConfig,
    cli_args: &[S],
    fetcher: &dyn TextFetcher,
    client: &dyn IndexNowClient,
    delay: &dyn Delay,
) -> Result<SubmissionReport, PipelineError> {
    let (urls, source) = collect_urls(config, cli_args, fetcher, delay).await?;
    if urls.is_empty() {
        return Err(PipelineError::NoUrls);
    }

    let partition = partition_by_host(&urls, &config.host);
    if !partition.mismatched.is_empty() {
        doodles_warn!(
            "Warning: {} URLs are outside host {} and may be ignored by IndexNow.",
            partition.mismatched.len(),
            config.host
        );
    }

    doodles_info!("Submitting {} URL(s) for host {}", urls.len(), config.host);
    let payload = SubmissionPayload::new(&config.host, &config.key, urls.to_strings());
    let response = client.submit(&config.endpoint, &payload).await?;

    Ok(SubmissionReport {
        source,
        urls: payload.url_list,
        host_mismatches: partition.mismatched.len(),
        response,
    })
}

async fn collect_urls<S: AsRef<str>>(
    config: &IndexNowConfig,
    cli_args: &[S],
    fetcher: &dyn TextFetcher,
    delay: &dyn Delay,
) -> Result<(UrlSet, UrlSource), PipelineError> {
    let cli_urls = normalize_cli_urls(cli_args.iter().map(|arg| AsRef::<str>::as_ref(arg)));
    if !cli_urls.is_empty() {
        return Ok((cli_urls, UrlSource::Cli));
    }

    let url = config.sitemap_url.as_str();
    let document = retry_with_policy(&config.retry, delay, url, move |_attempt| {
        fetcher.fetch_text(url)
    })
    .await
    .map_err(|exhausted| PipelineError::SitemapUnavailable {
        url: url.to_string(),
        attempts: exhausted.attempts,
        last: exhausted.last,
    })?;

    Ok((extract_sitemap_urls(&document.text), UrlSource::Sitemap))
}

/// Production wiring: reqwest for both network legs and tokio for delays.
pub struct SubmissionEngine {
    fetcher: ReqwestFetcher,
    client: ReqwestSubmitter,
    delay: TokioDelay,
}

impl SubmissionEngine {
    pub fn new(config: &IndexNowConfig) -> Result<Self, SubmitError> {
        Ok(Self {
            fetcher: ReqwestFetcher::new(config.fetch.clone()),
            client: ReqwestSubmitter::new(&config.fetch)?,
            delay: TokioDelay,
        })
    }

    pub async fn run<S: AsRef<str>>(
        &self,
        config: &IndexNowConfig,
        cli_args: &[S],
    ) -> Result<SubmissionReport, PipelineError> {
        run_submission(config, cli_args, &self.fetcher, &self.client, &self.delay).await
    }
}

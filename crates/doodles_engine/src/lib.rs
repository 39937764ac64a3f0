//! Doodles engine: sitemap fetching with retry and IndexNow submission.
mod config;
mod decode;
mod fetch;
mod pipeline;
mod retry;
mod submit;
mod types;

pub use config::{
    default_sitemap_url, IndexNowConfig, DEFAULT_ENDPOINT, DEFAULT_HOST, DEFAULT_KEY, USER_AGENT,
};
pub use decode::{decode_text, DecodeError, DecodedText};
pub use fetch::{FetchSettings, ReqwestFetcher, TextFetcher};
pub use pipeline::{run_submission, PipelineError, SubmissionEngine, SubmissionReport, UrlSource};
pub use retry::{retry_with_policy, Delay, RetryExhausted, RetryPolicy, TokioDelay};
pub use submit::{
    key_location, IndexNowClient, ReqwestSubmitter, SubmissionPayload, SubmitError,
    SubmitResponse, JSON_CONTENT_TYPE,
};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchedText};

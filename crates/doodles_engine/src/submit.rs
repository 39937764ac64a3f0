use doodles_logging::doodles_info;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::FetchSettings;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Body of an IndexNow batch submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub host: String,
    pub key: String,
    pub key_location: String,
    pub url_list: Vec<String>,
}

impl SubmissionPayload {
    pub fn new(host: impl Into<String>, key: impl Into<String>, url_list: Vec<String>) -> Self {
        let host = host.into();
        let key = key.into();
        let key_location = key_location(&host, &key);
        Self {
            host,
            key,
            key_location,
            url_list,
        }
    }
}

/// Where the indexing service expects to find the verification key file.
pub fn key_location(host: &str, key: &str) -> String {
    format!("https://{host}/{key}.txt")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("invalid IndexNow endpoint {endpoint}: {message}")]
    InvalidEndpoint { endpoint: String, message: String },
    #[error("failed to encode IndexNow payload: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("IndexNow request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("IndexNow submit failed with status {status}{}", body_suffix(.body))]
    Rejected { status: u16, body: String },
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

/// Sends a payload to an IndexNow endpoint. A single attempt; no retry.
#[async_trait::async_trait]
pub trait IndexNowClient: Send + Sync {
    async fn submit(
        &self,
        endpoint: &str,
        payload: &SubmissionPayload,
    ) -> Result<SubmitResponse, SubmitError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSubmitter {
    client: reqwest::Client,
}

impl ReqwestSubmitter {
    pub fn new(settings: &FetchSettings) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .user_agent(settings.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl IndexNowClient for ReqwestSubmitter {
    async fn submit(
        &self,
        endpoint: &str,
        payload: &SubmissionPayload,
    ) -> Result<SubmitResponse, SubmitError> {
        let url = reqwest::Url::parse(endpoint).map_err(|err| SubmitError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        })?;
        let body = serde_json::to_vec(payload)?;

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?.trim().to_string();
        if !status.is_success() {
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        doodles_info!("IndexNow submit accepted ({})", status.as_u16());
        if !body.is_empty() {
            doodles_info!("{}", body);
        }

        Ok(SubmitResponse {
            status: status.as_u16(),
            body,
        })
    }
}

pub mod cancel;
pub mod data_url;

use crate::{
    config::ClientConfig,
    error::{IllustraError, Result},
    models::{RawIllustrationRequest, SummaryEnvelope},
};
use reqwest::{header, Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub use cancel::cancellable;
pub use data_url::DataUrl;

pub const SUMMARY_UNAVAILABLE: &str = "Unable to generate summary";
pub const SUMMARY_CANCELLED: &str = "Summary generation cancelled";
pub const SUMMARY_FAILED: &str = "Summary generation failed";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageIllustration {
    pub summary: String,
    pub image_url: DataUrl,
}

/// Reader-side facade over the gateway endpoint.
#[derive(Clone)]
pub struct AiClient {
    http: Client,
    endpoint: String,
}

impl AiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| IllustraError::Configuration(format!("HTTP client: {}", e)))?;
        Ok(Self::with_http_client(config.endpoint, http))
    }

    pub fn with_http_client(endpoint: impl Into<String>, http: Client) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Never fails: the result is the summary, `SUMMARY_CANCELLED`, or
    /// `SUMMARY_FAILED`.
    pub async fn summarize_text(&self, text: &str, token: &CancellationToken) -> String {
        match cancellable(token, self.fetch_summary(text)).await {
            Ok(summary) if summary.is_empty() => SUMMARY_UNAVAILABLE.to_string(),
            Ok(summary) => summary,
            Err(IllustraError::Cancelled) => {
                log::debug!("Summary request cancelled");
                SUMMARY_CANCELLED.to_string()
            }
            Err(e) => {
                log::error!("Summarization error: {}", e);
                SUMMARY_FAILED.to_string()
            }
        }
    }

    pub async fn generate_image(
        &self,
        prompt: &str,
        style: Option<&str>,
        token: &CancellationToken,
    ) -> Result<DataUrl> {
        let result = cancellable(token, self.fetch_image(prompt, style)).await;
        match &result {
            Err(IllustraError::Cancelled) => log::debug!("Image request cancelled"),
            Err(e) => log::error!("Image generation error: {}", e),
            Ok(_) => {}
        }
        result
    }

    /// Illustrates the raw page text. No summary is requested.
    pub async fn process_page(
        &self,
        page_content: &str,
        style: Option<&str>,
        token: &CancellationToken,
    ) -> Result<PageIllustration> {
        let image_url = self.generate_image(page_content, style, token).await?;
        Ok(PageIllustration {
            summary: String::new(),
            image_url,
        })
    }

    async fn post(&self, body: &RawIllustrationRequest) -> Result<Response> {
        Ok(self.http.post(&self.endpoint).json(body).send().await?)
    }

    async fn fetch_summary(&self, text: &str) -> Result<String> {
        let response = self.post(&RawIllustrationRequest::summarize(text)).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(IllustraError::Request(format!(
                "Summarization failed: {}",
                status
            )));
        }
        let envelope: SummaryEnvelope = response.json().await?;
        Ok(envelope.result.summary)
    }

    async fn fetch_image(&self, prompt: &str, style: Option<&str>) -> Result<DataUrl> {
        let response = self
            .post(&RawIllustrationRequest::illustrate(prompt, style))
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(IllustraError::ImageGeneration {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let mime = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(data_url::FALLBACK_MIME)
            .to_string();
        let bytes = response.bytes().await?;
        DataUrl::encode(mime, bytes.to_vec()).await
    }
}

pub mod handler;
pub mod image_client;
pub mod summary_client;

use crate::{
    config::{Credentials, GatewayConfig},
    error::{IllustraError, Result},
    models::{IllustrationRequest, ImagePayload, RawIllustrationRequest},
};
use reqwest::Client;
use std::time::Duration;

pub use image_client::ImageClient;
pub use summary_client::{
    PrimaryProvider, SecondaryProvider, SummaryClient, SummaryProvider, SummaryReply,
};

/// Outcome of one gateway invocation, before it is turned into HTTP.
#[derive(Debug, Clone)]
pub enum GatewayResponse {
    Summary(SummaryReply),
    Image(ImagePayload),
}

impl GatewayResponse {
    pub fn status(&self) -> u16 {
        match self {
            GatewayResponse::Summary(reply) => reply.status,
            GatewayResponse::Image(image) => image.status,
        }
    }
}

#[derive(Clone)]
pub struct Gateway {
    config: GatewayConfig,
    summary_client: SummaryClient,
    image_client: ImageClient,
}

impl Gateway {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.upstream_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| IllustraError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            summary_client: SummaryClient::new(client.clone(), &config.endpoints),
            image_client: ImageClient::new(client, &config.endpoints),
            config,
        })
    }

    pub fn with_summary_client(mut self, summary_client: SummaryClient) -> Self {
        self.summary_client = summary_client;
        self
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn summary(&self) -> &SummaryClient {
        &self.summary_client
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }

    /// Validates a raw POST body and dispatches it. Credentials are checked
    /// before the body fields.
    pub async fn handle(&self, body: &[u8]) -> Result<GatewayResponse> {
        let raw = RawIllustrationRequest::from_body(body)?;
        let credentials = self.config.credentials.resolve()?;

        match IllustrationRequest::try_from(raw)? {
            IllustrationRequest::Summarize { text } => self
                .summarize(&text, &credentials)
                .await
                .map(GatewayResponse::Summary),
            IllustrationRequest::Illustrate { prompt, style } => self
                .illustrate(&prompt, style.as_deref(), &credentials)
                .await
                .map(GatewayResponse::Image),
        }
    }

    pub async fn summarize(&self, text: &str, credentials: &Credentials) -> Result<SummaryReply> {
        log::info!("Summarizing {} characters of text", text.chars().count());
        self.summary_client.summarize(text, credentials).await
    }

    pub async fn illustrate(
        &self,
        prompt: &str,
        style: Option<&str>,
        credentials: &Credentials,
    ) -> Result<ImagePayload> {
        let prompt = clamp_prompt(prompt, self.config.max_prompt_chars)?;
        let style = style
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(self.config.default_style.as_str());
        self.image_client.generate(style, &prompt, credentials).await
    }
}

fn clamp_prompt(prompt: &str, max_chars: usize) -> Result<String> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return Err(IllustraError::BadRequest(
            "Image prompt must not be empty.".into(),
        ));
    }
    match trimmed.char_indices().nth(max_chars) {
        Some((cut, _)) => Ok(trimmed[..cut].trim_end().to_string()),
        None => Ok(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_prompt_trims_and_truncates() {
        assert_eq!(clamp_prompt("  a dragon  ", 256).unwrap(), "a dragon");
        assert_eq!(clamp_prompt("abcdef", 3).unwrap(), "abc");
        assert_eq!(clamp_prompt("дракон", 3).unwrap(), "дра");
        assert_eq!(clamp_prompt("abc", 3).unwrap(), "abc");
    }

    #[test]
    fn test_clamp_prompt_rejects_blank() {
        assert!(matches!(
            clamp_prompt("   ", 256),
            Err(IllustraError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_credentials_checked_before_fields() {
        let gateway = Gateway::new(GatewayConfig::new()).unwrap();
        assert!(matches!(
            gateway.handle(b"{}").await,
            Err(IllustraError::Configuration(_))
        ));
    }
}

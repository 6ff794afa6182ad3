use crate::{
    config::{Credentials, ProviderEndpoints},
    error::{IllustraError, Result},
    logger::Timer,
    models::{
        normalize_primary, normalize_secondary, PrimaryResponse, SecondaryResponse,
        SummaryEnvelope,
    },
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryReply {
    pub status: u16,
    pub envelope: SummaryEnvelope,
}

#[async_trait]
pub trait SummaryProvider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn summarize(&self, text: &str, credentials: &Credentials) -> Result<SummaryReply>;
}

/// Workflow service running the `summary_agent`. Anything but a 200 with a
/// JSON body is reported as `Upstream`.
pub struct PrimaryProvider {
    client: Client,
    url: String,
}

impl PrimaryProvider {
    pub fn new(client: Client, endpoints: &ProviderEndpoints) -> Self {
        Self {
            client,
            url: endpoints.primary_url.clone(),
        }
    }
}

#[async_trait]
impl SummaryProvider for PrimaryProvider {
    fn name(&self) -> &'static str {
        "primary"
    }

    async fn summarize(&self, text: &str, credentials: &Credentials) -> Result<SummaryReply> {
        let api_key = credentials
            .primary_api_key
            .as_deref()
            .ok_or_else(|| IllustraError::Upstream("primary API key not configured".into()))?;

        let payload = json!({
            "text": text,
            "agent_names": ["summary_agent"],
            "args": { "type": "summarize_text" }
        });

        let _timer = Timer::new("primary summarization");
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| IllustraError::Upstream(format!("request failed: {}", e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(IllustraError::Upstream(format!("status {}", status.as_u16())));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| IllustraError::Upstream(format!("invalid JSON: {}", e)))?;

        Ok(SummaryReply {
            status: status.as_u16(),
            envelope: normalize_primary(PrimaryResponse::from_value(body)),
        })
    }
}

/// Hosted BART model. Its status is passed through as-is.
pub struct SecondaryProvider {
    client: Client,
    endpoints: ProviderEndpoints,
}

impl SecondaryProvider {
    pub fn new(client: Client, endpoints: &ProviderEndpoints) -> Self {
        Self {
            client,
            endpoints: endpoints.clone(),
        }
    }
}

#[async_trait]
impl SummaryProvider for SecondaryProvider {
    fn name(&self) -> &'static str {
        "secondary"
    }

    async fn summarize(&self, text: &str, credentials: &Credentials) -> Result<SummaryReply> {
        let payload = json!({
            "input_text": text,
            "min_length": 150
        });

        let _timer = Timer::new("secondary summarization");
        let response = self
            .client
            .post(self.endpoints.summarization_url(&credentials.account_id))
            .bearer_auth(&credentials.api_token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body: Value = response.json().await?;

        Ok(SummaryReply {
            status,
            envelope: normalize_secondary(SecondaryResponse::from_value(body)),
        })
    }
}

#[derive(Clone)]
pub struct SummaryClient {
    primary: Arc<dyn SummaryProvider>,
    secondary: Arc<dyn SummaryProvider>,
}

impl SummaryClient {
    pub fn new(client: Client, endpoints: &ProviderEndpoints) -> Self {
        Self::with_providers(
            Arc::new(PrimaryProvider::new(client.clone(), endpoints)),
            Arc::new(SecondaryProvider::new(client, endpoints)),
        )
    }

    pub fn with_providers(
        primary: Arc<dyn SummaryProvider>,
        secondary: Arc<dyn SummaryProvider>,
    ) -> Self {
        Self { primary, secondary }
    }

    /// Tries the primary to completion, then the secondary exactly once if
    /// the primary failed.
    pub async fn summarize(&self, text: &str, credentials: &Credentials) -> Result<SummaryReply> {
        match self.primary.summarize(text, credentials).await {
            Ok(reply) => {
                log::info!("Summary served by {} provider", self.primary.name());
                Ok(reply)
            }
            Err(e) => {
                log::warn!(
                    "{} provider failed ({}), falling back to {}",
                    self.primary.name(),
                    e,
                    self.secondary.name()
                );
                let reply = self.secondary.summarize(text, credentials).await?;
                log::info!(
                    "Summary served by {} provider with status {}",
                    self.secondary.name(),
                    reply.status
                );
                Ok(reply)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeProvider {
        name: &'static str,
        reply: std::result::Result<SummaryReply, &'static str>,
        calls: AtomicUsize,
    }

    impl FakeProvider {
        fn ok(name: &'static str, status: u16, summary: &str) -> Arc<Self> {
            Arc::new(Self {
                name,
                reply: Ok(SummaryReply {
                    status,
                    envelope: SummaryEnvelope::new(summary),
                }),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(name: &'static str, message: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                reply: Err(message),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SummaryProvider for FakeProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn summarize(&self, _text: &str, _credentials: &Credentials) -> Result<SummaryReply> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply
                .clone()
                .map_err(|msg| IllustraError::Upstream(msg.to_string()))
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            account_id: "acct".into(),
            api_token: "token".into(),
            primary_api_key: Some("io".into()),
        }
    }

    #[tokio::test]
    async fn test_primary_success_skips_secondary() {
        let primary = FakeProvider::ok("primary", 200, "A fox runs.");
        let secondary = FakeProvider::ok("secondary", 200, "unused");
        let client = SummaryClient::with_providers(primary.clone(), secondary.clone());

        let reply = client.summarize("text", &credentials()).await.unwrap();
        assert_eq!(reply.envelope.summary(), "A fox runs.");
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 0);
    }

    #[tokio::test]
    async fn test_primary_failure_calls_secondary_once() {
        let primary = FakeProvider::failing("primary", "status 503");
        let secondary = FakeProvider::ok("secondary", 200, "Fox summary.");
        let client = SummaryClient::with_providers(primary.clone(), secondary.clone());

        let reply = client.summarize("text", &credentials()).await.unwrap();
        assert_eq!(reply.status, 200);
        assert_eq!(reply.envelope.summary(), "Fox summary.");
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);
    }

    #[tokio::test]
    async fn test_both_failing_surfaces_secondary_error() {
        let primary = FakeProvider::failing("primary", "status 503");
        let secondary = FakeProvider::failing("secondary", "secondary down");
        let client = SummaryClient::with_providers(primary, secondary.clone());

        let err = client.summarize("text", &credentials()).await.unwrap_err();
        assert!(err.to_string().contains("secondary down"));
        assert_eq!(secondary.calls(), 1);
    }

    #[tokio::test]
    async fn test_primary_without_key_fails_without_network() {
        let endpoints = ProviderEndpoints::new().with_primary_url("http://127.0.0.1:1/unreachable");
        let provider = PrimaryProvider::new(Client::new(), &endpoints);
        let mut creds = credentials();
        creds.primary_api_key = None;

        match provider.summarize("text", &creds).await {
            Err(IllustraError::Upstream(msg)) => assert!(msg.contains("not configured")),
            other => panic!("expected upstream error, got {other:?}"),
        }
    }
}

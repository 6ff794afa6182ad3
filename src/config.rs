use crate::error::{IllustraError, Result};
use std::env;
use std::fmt;

pub const DEFAULT_ENDPOINT_PATH: &str = "/api/illustrate";
pub const DEFAULT_PRIMARY_URL: &str = "https://api.intelligence.io.solutions/api/v1/workflows/run";
pub const DEFAULT_CLOUDFLARE_BASE_URL: &str = "https://api.cloudflare.com/client/v4";
pub const DEFAULT_STYLE: &str = "Futuristic";
pub const DEFAULT_MAX_PROMPT_CHARS: usize = 256;

const MISSING_CREDENTIALS: &str = "Cloudflare credentials not set in environment variables";

#[derive(Clone, Default)]
pub struct CredentialsConfig {
    pub account_id: Option<String>,
    pub api_token: Option<String>,
    pub primary_api_key: Option<String>,
}

/// Secrets resolved for a single request.
#[derive(Clone)]
pub struct Credentials {
    pub account_id: String,
    pub api_token: String,
    pub primary_api_key: Option<String>,
}

impl fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("account_id", &self.account_id.as_ref().map(|_| "<redacted>"))
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field(
                "primary_api_key",
                &self.primary_api_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account_id", &"<redacted>")
            .field("api_token", &"<redacted>")
            .field(
                "primary_api_key",
                &self.primary_api_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl CredentialsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        CredentialsConfig {
            account_id: non_empty(env::var("CLOUDFLARE_ACCOUNT_ID").ok()),
            api_token: non_empty(env::var("CLOUDFLARE_API_TOKEN").ok()),
            primary_api_key: non_empty(env::var("IO_API_KEY").ok()),
        }
    }

    pub fn with_credentials(
        mut self,
        account_id: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        self.account_id = Some(account_id.into());
        self.api_token = Some(api_token.into());
        self
    }

    pub fn with_primary_api_key(mut self, key: impl Into<String>) -> Self {
        self.primary_api_key = Some(key.into());
        self
    }

    pub fn has_credentials(&self) -> bool {
        non_empty(self.account_id.clone()).is_some() && non_empty(self.api_token.clone()).is_some()
    }

    /// Fails with a fixed message when the account id or API token is absent.
    /// The primary key stays optional.
    pub fn resolve(&self) -> Result<Credentials> {
        let account_id = non_empty(self.account_id.clone());
        let api_token = non_empty(self.api_token.clone());
        match (account_id, api_token) {
            (Some(account_id), Some(api_token)) => Ok(Credentials {
                account_id,
                api_token,
                primary_api_key: non_empty(self.primary_api_key.clone()),
            }),
            _ => Err(IllustraError::Configuration(MISSING_CREDENTIALS.into())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProviderEndpoints {
    pub primary_url: String,
    pub cloudflare_base_url: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        ProviderEndpoints {
            primary_url: DEFAULT_PRIMARY_URL.to_string(),
            cloudflare_base_url: DEFAULT_CLOUDFLARE_BASE_URL.to_string(),
        }
    }
}

impl ProviderEndpoints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        ProviderEndpoints {
            primary_url: env::var("PRIMARY_API_URL").unwrap_or(defaults.primary_url),
            cloudflare_base_url: env::var("CLOUDFLARE_API_BASE_URL")
                .unwrap_or(defaults.cloudflare_base_url),
        }
    }

    pub fn with_primary_url(mut self, url: impl Into<String>) -> Self {
        self.primary_url = url.into();
        self
    }

    pub fn with_cloudflare_base_url(mut self, url: impl Into<String>) -> Self {
        self.cloudflare_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn summarization_url(&self, account_id: &str) -> String {
        format!(
            "{}/accounts/{}/ai/run/@cf/facebook/bart-large-cnn",
            self.cloudflare_base_url, account_id
        )
    }

    pub fn image_url(&self, account_id: &str) -> String {
        format!(
            "{}/accounts/{}/ai/run/@cf/stabilityai/stable-diffusion-xl-base-1.0",
            self.cloudflare_base_url, account_id
        )
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub endpoint_path: String,
    pub credentials: CredentialsConfig,
    pub endpoints: ProviderEndpoints,
    pub default_style: String,
    pub max_prompt_chars: usize,
    pub upstream_timeout_secs: Option<u64>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            host: None,
            port: None,
            endpoint_path: DEFAULT_ENDPOINT_PATH.to_string(),
            credentials: CredentialsConfig::default(),
            endpoints: ProviderEndpoints::default(),
            default_style: DEFAULT_STYLE.to_string(),
            max_prompt_chars: DEFAULT_MAX_PROMPT_CHARS,
            upstream_timeout_secs: None,
        }
    }
}

impl GatewayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let host = env::var("HOST").ok();
        let port = env::var("PORT").ok().and_then(|port| port.parse().ok());
        let endpoint_path =
            env::var("GATEWAY_PATH").unwrap_or_else(|_| DEFAULT_ENDPOINT_PATH.to_string());
        let default_style = non_empty(env::var("ILLUSTRATION_STYLE").ok())
            .unwrap_or_else(|| DEFAULT_STYLE.to_string());
        let max_prompt_chars = env::var("MAX_PROMPT_CHARS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_PROMPT_CHARS);
        let upstream_timeout_secs = env::var("UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok());

        GatewayConfig {
            host,
            port,
            endpoint_path,
            credentials: CredentialsConfig::from_env(),
            endpoints: ProviderEndpoints::from_env(),
            default_style,
            max_prompt_chars,
            upstream_timeout_secs,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_endpoint_path(mut self, path: impl Into<String>) -> Self {
        self.endpoint_path = path.into();
        self
    }

    pub fn with_credentials(mut self, credentials: CredentialsConfig) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_endpoints(mut self, endpoints: ProviderEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_default_style(mut self, style: impl Into<String>) -> Self {
        self.default_style = style.into();
        self
    }

    pub fn with_max_prompt_chars(mut self, max: usize) -> Self {
        self.max_prompt_chars = max;
        self
    }

    pub fn with_upstream_timeout(mut self, secs: u64) -> Self {
        self.upstream_timeout_secs = Some(secs);
        self
    }

    pub fn bind_address(&self) -> (String, u16) {
        (
            self.host.clone().unwrap_or_else(|| "127.0.0.1".to_string()),
            self.port.unwrap_or(8080),
        )
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            endpoint: format!("http://127.0.0.1:8080{}", DEFAULT_ENDPOINT_PATH),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        ClientConfig {
            endpoint: endpoint.into(),
            timeout_secs: None,
        }
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        ClientConfig {
            endpoint: env::var("ILLUSTRA_GATEWAY_URL").unwrap_or(defaults.endpoint),
            timeout_secs: env::var("ILLUSTRA_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok()),
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

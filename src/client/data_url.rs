use crate::error::{IllustraError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const FALLBACK_MIME: &str = "application/octet-stream";

/// `data:<mime>;base64,<payload>`, renderable without a second fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataUrl(String);

impl DataUrl {
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        let mime = if mime.trim().is_empty() {
            FALLBACK_MIME
        } else {
            mime.trim()
        };
        DataUrl(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
    }

    /// Encodes on the blocking pool so large images do not stall the runtime.
    pub async fn encode(mime: String, bytes: Vec<u8>) -> Result<Self> {
        tokio::task::spawn_blocking(move || DataUrl::from_bytes(&mime, &bytes))
            .await
            .map_err(|e| IllustraError::Internal(format!("data URL encoding failed: {}", e)))
    }

    pub fn parse(value: &str) -> Result<Self> {
        let url = DataUrl(value.to_string());
        url.split()?;
        Ok(url)
    }

    fn split(&self) -> Result<(&str, &str)> {
        let rest = self
            .0
            .strip_prefix("data:")
            .ok_or_else(|| IllustraError::Serialization("not a data URL".into()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| IllustraError::Serialization("data URL without payload".into()))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| IllustraError::Serialization("data URL is not base64".into()))?;
        Ok((mime, payload))
    }

    pub fn mime_type(&self) -> &str {
        self.split().map(|(mime, _)| mime).unwrap_or(FALLBACK_MIME)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let (_, payload) = self.split()?;
        STANDARD
            .decode(payload)
            .map_err(|e| IllustraError::Serialization(format!("invalid base64: {}", e)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DataUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

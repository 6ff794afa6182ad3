use crate::error::{IllustraError, Result};
use serde::{Deserialize, Serialize};

pub const MISSING_FIELDS: &str = "Missing text or imagePrompt in request body";

/// Body accepted by the gateway endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIllustrationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl RawIllustrationRequest {
    pub fn summarize(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn illustrate(prompt: impl Into<String>, style: Option<&str>) -> Self {
        Self {
            image_prompt: Some(prompt.into()),
            style: style.map(String::from),
            ..Default::default()
        }
    }

    /// Empty body means `{}`.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|_| IllustraError::BadRequest("Invalid JSON in request body".into()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IllustrationRequest {
    Summarize { text: String },
    Illustrate { prompt: String, style: Option<String> },
}

impl TryFrom<RawIllustrationRequest> for IllustrationRequest {
    type Error = IllustraError;

    fn try_from(raw: RawIllustrationRequest) -> Result<Self> {
        let present = |v: Option<String>| v.filter(|s| !s.is_empty());

        if let Some(text) = present(raw.text) {
            return Ok(IllustrationRequest::Summarize { text });
        }
        if let Some(prompt) = present(raw.image_prompt) {
            return Ok(IllustrationRequest::Illustrate {
                prompt,
                style: present(raw.style),
            });
        }
        Err(IllustraError::BadRequest(MISSING_FIELDS.into()))
    }
}

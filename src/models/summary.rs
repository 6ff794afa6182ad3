//! Summary shapes: the canonical envelope and one tagged union per provider.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryBody {
    #[serde(default)]
    pub summary: String,
}

/// `{ "result": { "summary": ... } }`, whichever provider answered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryEnvelope {
    #[serde(default)]
    pub result: SummaryBody,
}

impl SummaryEnvelope {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            result: SummaryBody {
                summary: summary.into(),
            },
        }
    }

    pub fn summary(&self) -> &str {
        &self.result.summary
    }
}

/// Workflow agent output.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrimaryResponse {
    #[serde(default)]
    pub result: Option<PrimaryResult>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PrimaryResult {
    Structured { summary: String },
    Text(String),
    Other(Value),
}

/// Hosted BART output.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecondaryResponse {
    #[serde(default)]
    pub result: Option<SecondaryResult>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SecondaryResult {
    Batch(Vec<SummaryText>),
    Single {
        #[serde(default)]
        summary: Option<String>,
    },
    Other(Value),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryText {
    #[serde(default)]
    pub summary_text: Option<String>,
}

impl PrimaryResponse {
    /// Any JSON document is accepted; shapes without `result` normalize to "".
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

impl SecondaryResponse {
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

pub fn normalize_primary(response: PrimaryResponse) -> SummaryEnvelope {
    let summary = match response.result {
        Some(PrimaryResult::Structured { summary }) => summary,
        Some(PrimaryResult::Text(text)) => text,
        Some(PrimaryResult::Other(Value::Null)) | None => String::new(),
        Some(PrimaryResult::Other(other)) => other.to_string(),
    };
    SummaryEnvelope::new(summary)
}

pub fn normalize_secondary(response: SecondaryResponse) -> SummaryEnvelope {
    let summary = match response.result {
        Some(SecondaryResult::Batch(items)) => items
            .into_iter()
            .next()
            .and_then(|item| item.summary_text)
            .unwrap_or_default(),
        Some(SecondaryResult::Single { summary }) => summary.unwrap_or_default(),
        Some(SecondaryResult::Other(_)) | None => String::new(),
    };
    SummaryEnvelope::new(summary)
}

use actix_web::{
    http::{header, StatusCode},
    HttpResponse, ResponseError,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum IllustraError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("{0}")]
    Configuration(String),
    #[error("Upstream provider failed: {0}")]
    Upstream(String),
    #[error("Request error: {0}")]
    Request(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Image generation failed: {status} {reason}")]
    ImageGeneration { status: u16, reason: String },
    #[error("Request cancelled")]
    Cancelled,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IllustraError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, IllustraError::Cancelled)
    }
}

impl From<reqwest::Error> for IllustraError {
    fn from(e: reqwest::Error) -> Self {
        IllustraError::Request(e.to_string())
    }
}

impl From<serde_json::Error> for IllustraError {
    fn from(e: serde_json::Error) -> Self {
        IllustraError::Serialization(e.to_string())
    }
}

impl ResponseError for IllustraError {
    fn status_code(&self) -> StatusCode {
        match self {
            IllustraError::BadRequest(_) => StatusCode::BAD_REQUEST,
            IllustraError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        if let IllustraError::MethodNotAllowed = self {
            response.insert_header((header::ALLOW, "POST"));
        }
        response.json(json!({ "error": self.to_string() }))
    }
}

pub type Result<T> = std::result::Result<T, IllustraError>;

use serde::{Deserialize, Serialize};

/// Structured error body for expected conditions (not-found, paywall, validation).
#[derive(Debug, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
#[derive(Clone)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_paywall: Option<bool>,
}

impl ErrorResponse {
    pub fn message(message: &str) -> Self {
        ErrorResponse {
            message: message.to_string(),
            field: None,
            show_paywall: None,
        }
    }

    pub fn validation(message: &str, field: &str) -> Self {
        ErrorResponse {
            message: message.to_string(),
            field: Some(field.to_string()),
            show_paywall: None,
        }
    }

    pub fn paywall(message: &str) -> Self {
        ErrorResponse {
            message: message.to_string(),
            field: None,
            show_paywall: Some(true),
        }
    }
}

/// Body of a failed POST /api/generate-image. Upstream detail stays in the server
/// log; the client only ever sees the generic message.
#[derive(Debug, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
#[derive(Clone)]
pub struct GenerationErrorResponse {
    pub error: String,
}

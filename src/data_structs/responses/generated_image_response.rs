use serde::{Deserialize, Serialize};

/// Body of a successful POST /api/generate-image. remainingCredits is absent for
/// guests (the client keeps the guest counter); showPaywall flips to true when the
/// commit lost a race and this was the caller's last delivered generation.
#[derive(Debug, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
#[derive(Clone)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImageResponse {
    pub image_data: String,
    pub mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_credits: Option<i64>,
    pub show_paywall: bool,
}

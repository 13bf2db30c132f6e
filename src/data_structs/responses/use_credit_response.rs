use serde::{Deserialize, Serialize};

/// Body of a successful POST /api/user/use-credit. remainingCredits is -1 for
/// paid members (unlimited).
#[derive(Debug, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
#[derive(Clone)]
#[serde(rename_all = "camelCase")]
pub struct UseCreditResponse {
    pub success: bool,
    pub remaining_credits: i64,
    pub show_paywall: bool,
}

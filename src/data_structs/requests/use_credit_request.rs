use serde::{Deserialize, Serialize};

/// Body of POST /api/user/use-credit.
#[derive(Debug)]
#[derive(Serialize, Deserialize)]
#[derive(Clone)]
#[serde(rename_all = "camelCase")]
pub struct UseCreditRequest {
    pub user_id: Option<String>,
}

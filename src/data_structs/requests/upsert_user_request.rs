use serde::{Deserialize, Serialize};

/// Body of POST /api/users, sent by the auth integration when a login completes.
/// Creates the ledger row with the configured free allowance on first sight of an
/// identity; later calls only refresh the profile fields.
#[derive(Debug)]
#[derive(Serialize, Deserialize)]
#[derive(Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpsertUserRequest {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

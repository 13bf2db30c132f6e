use serde::{Deserialize, Serialize};

/// Body of POST /api/generate-image. Ephemeral; never persisted. At least one of
/// prompt and image must be present. The image is a base64 canvas snapshot,
/// optionally wrapped in a data URL.
#[derive(Debug)]
#[derive(Serialize, Deserialize)]
#[derive(Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageRequest {
    pub prompt: Option<String>,
    pub image: Option<String>,
    pub user_id: Option<String>,
}

impl GenerateImageRequest {
    pub fn has_input(&self) -> bool {
        self.prompt.as_deref().map_or(false, |p| !p.trim().is_empty())
            || self.image.as_deref().map_or(false, |i| !i.is_empty())
    }
}

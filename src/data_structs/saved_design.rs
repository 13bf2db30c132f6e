use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlRow;
use sqlx::Row;

use crate::database::decode_optional_string_list;

/// A Fire Vault entry: one generated (or uploaded) design a user chose to keep.
#[derive(Debug, PartialEq)]
#[derive(Serialize, Deserialize)]
#[derive(Clone)]
#[serde(rename_all = "camelCase")]
pub struct SavedDesign {
    pub id: i64,
    pub user_id: Option<String>,
    pub image_url: String,
    pub prompt: String,
    pub canvas_image_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_favorite: bool,
    pub created_at: i64,
}

impl SavedDesign {
    pub fn decode(row: &MySqlRow) -> Result<Self, sqlx::Error> {
        Ok(SavedDesign {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            image_url: row.try_get("image_url")?,
            prompt: row.try_get("prompt")?,
            canvas_image_url: row.try_get("canvas_image_url")?,
            tags: decode_optional_string_list(row, "tags")?,
            is_favorite: row.try_get("is_favorite")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[derive(Debug, PartialEq)]
#[derive(Serialize, Deserialize)]
#[derive(Clone)]
#[serde(rename_all = "camelCase")]
pub struct InsertSavedDesign {
    pub user_id: Option<String>,
    pub image_url: String,
    pub prompt: String,
    pub canvas_image_url: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub is_favorite: bool,
}

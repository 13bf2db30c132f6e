use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlRow;
use sqlx::Row;

use crate::database::decode_string_list;

#[derive(Debug, PartialEq)]
#[derive(Serialize, Deserialize)]
#[derive(Clone)]
#[serde(rename_all = "camelCase")]
pub struct Tutorial {
    pub id: i64,
    pub title: String,
    pub image_source: String,
    pub style_category: String,
    pub difficulty_level: String,
    pub tools_required: Vec<String>,
    pub tutorial_content: String,
    pub creator_credit: Option<String>,
    pub created_at: i64,
}

impl Tutorial {
    pub fn decode(row: &MySqlRow) -> Result<Self, sqlx::Error> {
        Ok(Tutorial {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            image_source: row.try_get("image_source")?,
            style_category: row.try_get("style_category")?,
            difficulty_level: row.try_get("difficulty_level")?,
            tools_required: decode_string_list(row, "tools_required")?,
            tutorial_content: row.try_get("tutorial_content")?,
            creator_credit: row.try_get("creator_credit")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[derive(Debug, PartialEq)]
#[derive(Serialize, Deserialize)]
#[derive(Clone)]
#[serde(rename_all = "camelCase")]
pub struct InsertTutorial {
    pub title: String,
    pub image_source: String,
    pub style_category: String,
    pub difficulty_level: String,
    pub tools_required: Vec<String>,
    pub tutorial_content: String,
    pub creator_credit: Option<String>,
}

use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlRow;
use sqlx::Row;

use crate::database::decode_optional_string_list;

/// A Seasonal Vault entry: a curated design filed under a season or occasion
/// (Winter, Spring, Summer, Fall, Holiday).
#[derive(Debug, PartialEq)]
#[derive(Serialize, Deserialize)]
#[derive(Clone)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalDesign {
    pub id: i64,
    pub title: String,
    pub image_url: String,
    pub season: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub featured: bool,
    pub created_at: i64,
}

impl SeasonalDesign {
    pub fn decode(row: &MySqlRow) -> Result<Self, sqlx::Error> {
        Ok(SeasonalDesign {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            image_url: row.try_get("image_url")?,
            season: row.try_get("season")?,
            category: row.try_get("category")?,
            description: row.try_get("description")?,
            tags: decode_optional_string_list(row, "tags")?,
            featured: row.try_get("featured")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[derive(Debug, PartialEq)]
#[derive(Serialize, Deserialize)]
#[derive(Clone)]
#[serde(rename_all = "camelCase")]
pub struct InsertSeasonalDesign {
    pub title: String,
    pub image_url: String,
    pub season: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub featured: bool,
}

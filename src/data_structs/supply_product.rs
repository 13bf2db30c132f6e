use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlRow;
use sqlx::Row;

use crate::database::decode_optional_string_list;

/// A Supply Suite catalog entry. Product links are member-only on the client;
/// the server returns the full record either way.
#[derive(Debug, PartialEq)]
#[derive(Serialize, Deserialize)]
#[derive(Clone)]
#[serde(rename_all = "camelCase")]
pub struct SupplyProduct {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub product_url: Option<String>,
    pub price: Option<String>,
    pub utility: Option<String>,
    pub tags: Option<Vec<String>>,
    pub featured: bool,
    pub member_only: bool,
    pub created_at: i64,
}

impl SupplyProduct {
    pub fn decode(row: &MySqlRow) -> Result<Self, sqlx::Error> {
        Ok(SupplyProduct {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            brand: row.try_get("brand")?,
            category: row.try_get("category")?,
            description: row.try_get("description")?,
            image_url: row.try_get("image_url")?,
            product_url: row.try_get("product_url")?,
            price: row.try_get("price")?,
            utility: row.try_get("utility")?,
            tags: decode_optional_string_list(row, "tags")?,
            featured: row.try_get("featured")?,
            member_only: row.try_get("member_only")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[derive(Debug, PartialEq)]
#[derive(Serialize, Deserialize)]
#[derive(Clone)]
#[serde(rename_all = "camelCase")]
pub struct InsertSupplyProduct {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub product_url: Option<String>,
    pub price: Option<String>,
    pub utility: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub member_only: bool,
}

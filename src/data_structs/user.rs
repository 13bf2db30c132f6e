use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlRow;
use sqlx::Row;

use crate::data_structs::credit_ledger::CreditLedgerEntry;

/// One row of the users table. The credit ledger lives directly on this row; there
/// is no separate ledger table.
#[derive(Debug, PartialEq)]
#[derive(Serialize, Deserialize)]
#[derive(Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub credits: i64,
    pub generations_used: i64,
    pub is_paid_member: bool,
    pub created_at: i64,
}

impl User {
    pub fn decode(row: &MySqlRow) -> Result<Self, sqlx::Error> {
        Ok(User {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            profile_image_url: row.try_get("profile_image_url")?,
            credits: row.try_get("credits")?,
            generations_used: row.try_get("generations_used")?,
            is_paid_member: row.try_get("is_paid_member")?,
            created_at: row.try_get("created_at")?,
        })
    }

    pub fn ledger_entry(&self) -> CreditLedgerEntry {
        CreditLedgerEntry {
            credits: self.credits,
            generations_used: self.generations_used,
            is_paid_member: self.is_paid_member,
        }
    }
}

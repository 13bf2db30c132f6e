use serde::{Deserialize, Serialize};

use crate::data_structs::credit_ledger::CreditLedgerEntry;

/// Body of GET /api/user/credits.
#[derive(Debug, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
#[derive(Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreditStatusResponse {
    pub credits: i64,
    pub generations_used: i64,
    pub is_paid_member: bool,
    pub can_generate: bool,
}

impl CreditStatusResponse {
    pub fn from_entry(entry: &CreditLedgerEntry) -> Self {
        CreditStatusResponse {
            credits: entry.credits,
            generations_used: entry.generations_used,
            is_paid_member: entry.is_paid_member,
            can_generate: entry.can_generate(),
        }
    }
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sentinel value reported as remainingCredits for paid members.
pub const UNLIMITED_CREDITS: i64 = -1;

/// The per-user generation allowance as stored on the users row.
#[derive(Debug, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
#[derive(Clone)]
pub struct CreditLedgerEntry {
    pub credits: i64,
    pub generations_used: i64,
    pub is_paid_member: bool,
}

impl CreditLedgerEntry {
    /// The fixed virtual entry served to guests. Never persisted; the client keeps
    /// its own counter for the one free guest generation.
    pub fn guest(policy: &CreditPolicy) -> Self {
        CreditLedgerEntry {
            credits: policy.free_allowance,
            generations_used: 0,
            is_paid_member: false,
        }
    }

    pub fn can_generate(&self) -> bool {
        self.is_paid_member || self.credits > self.generations_used
    }

    pub fn remaining_credits(&self) -> i64 {
        if self.is_paid_member {
            UNLIMITED_CREDITS
        } else {
            (self.credits - self.generations_used).max(0)
        }
    }
}

/// Result of a committed usage increment.
#[derive(Debug)]
#[derive(Serialize)]
pub struct UsageReceipt {
    pub generations_used: i64,
    pub remaining_credits: i64,
}

/// Credit policy knobs loaded from config.yml, so the free allowance is not a
/// literal buried in code.
#[derive(Debug, Clone)]
pub struct CreditPolicy {
    pub free_allowance: i64,
}

impl Default for CreditPolicy {
    fn default() -> Self {
        CreditPolicy { free_allowance: 1 }
    }
}

#[derive(Debug, Error)]
pub enum LedgerError {
    /// The identity is not in the users table. Distinct from guest, which is a
    /// recognized sentinel and never reaches the ledger.
    #[error("user not found in the credit ledger")]
    NotFound,
    /// A free user is out of allowance at commit time.
    #[error("free generation allowance exhausted")]
    NoCreditsRemaining,
    #[error("ledger query failed: {0}")]
    Database(#[from] sqlx::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(credits: i64, used: i64, paid: bool) -> CreditLedgerEntry {
        CreditLedgerEntry {
            credits,
            generations_used: used,
            is_paid_member: paid,
        }
    }

    #[test]
    fn paid_members_can_always_generate() {
        assert!(entry(1, 0, true).can_generate());
        assert!(entry(1, 5, true).can_generate());
        assert!(entry(0, 9999, true).can_generate());
    }

    #[test]
    fn free_users_can_generate_until_allowance_is_spent() {
        assert!(entry(1, 0, false).can_generate());
        assert!(!entry(1, 1, false).can_generate());
        assert!(entry(3, 2, false).can_generate());
        assert!(!entry(3, 3, false).can_generate());
    }

    #[test]
    fn paid_members_report_the_unlimited_sentinel() {
        assert_eq!(entry(1, 5, true).remaining_credits(), UNLIMITED_CREDITS);
    }

    #[test]
    fn free_remaining_credits_never_go_negative() {
        assert_eq!(entry(3, 1, false).remaining_credits(), 2);
        assert_eq!(entry(1, 1, false).remaining_credits(), 0);
        // a race-lost commit can overshoot by one; report zero, not -1
        assert_eq!(entry(1, 2, false).remaining_credits(), 0);
    }

    #[test]
    fn guest_entry_follows_the_configured_allowance() {
        let entry = CreditLedgerEntry::guest(&CreditPolicy { free_allowance: 2 });
        assert_eq!(entry.credits, 2);
        assert_eq!(entry.generations_used, 0);
        assert!(!entry.is_paid_member);
        assert!(entry.can_generate());
    }
}

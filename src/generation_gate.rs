use async_trait::async_trait;
use thiserror::Error;

use crate::data_structs::caller_identity::CallerIdentity;
use crate::data_structs::credit_ledger::{CreditLedgerEntry, LedgerError, UsageReceipt};
use crate::database::DatabasePool;
use crate::image_generation::{EncodedImage, GeminiImageClient, GenerationError};

/// The gate's view of the credit ledger.
#[async_trait]
pub trait CreditLedger {
    async fn credit_status(&self, user_id: &str) -> Result<CreditLedgerEntry, LedgerError>;
    async fn commit_usage(&self, user_id: &str) -> Result<UsageReceipt, LedgerError>;
}

#[async_trait]
impl CreditLedger for DatabasePool {
    async fn credit_status(&self, user_id: &str) -> Result<CreditLedgerEntry, LedgerError> {
        self.get_credit_status(user_id).await
    }

    async fn commit_usage(&self, user_id: &str) -> Result<UsageReceipt, LedgerError> {
        self.increment_usage(user_id).await
    }
}

/// The gate's view of the upstream image model.
#[async_trait]
pub trait ImageGenerator {
    async fn generate(&self, prompt: &str, source_image: Option<&str>) -> Result<EncodedImage, GenerationError>;
}

#[async_trait]
impl ImageGenerator for GeminiImageClient {
    async fn generate(&self, prompt: &str, source_image: Option<&str>) -> Result<EncodedImage, GenerationError> {
        GeminiImageClient::generate(self, prompt, source_image).await
    }
}

/// Terminal Done state of one gated generation.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub image: EncodedImage,
    /// None for guests; the client keeps the guest counter. -1 means unlimited.
    pub remaining_credits: Option<i64>,
    pub show_paywall: bool,
}

#[derive(Debug, Error)]
pub enum GateError {
    /// The caller's identity is not in the ledger (and is not the guest sentinel).
    #[error("caller is not present in the credit ledger")]
    UnknownUser,
    /// The check step found no allowance; nothing was generated, nothing spent.
    #[error("free generation allowance exhausted")]
    Denied,
    #[error(transparent)]
    Ledger(LedgerError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Sequences one request through check -> generate -> commit.
///
/// The check and the commit are deliberately not serialized across requests: two
/// concurrent calls from a nearly-exhausted user can both pass the check and both
/// render, granting one extra generation. The losing commit still delivers its
/// image (it cannot be revoked) but flags showPaywall so the client stops
/// offering more. Guests skip the ledger entirely.
pub async fn run_generation<L: CreditLedger, G: ImageGenerator>(
    ledger: &L,
    imagen: &G,
    caller: &CallerIdentity,
    prompt: &str,
    source_image: Option<&str>,
) -> Result<GenerationOutcome, GateError> {

    let user_id = match caller {
        CallerIdentity::Guest => {
            let image = imagen.generate(prompt, source_image).await?;
            return Ok(GenerationOutcome {
                image,
                remaining_credits: None,
                show_paywall: false,
            });
        }
        CallerIdentity::Identified(user_id) => user_id,
    };

    // Check
    let status = match ledger.credit_status(user_id).await {
        Ok(status) => status,
        Err(LedgerError::NotFound) => return Err(GateError::UnknownUser),
        Err(err) => return Err(GateError::Ledger(err)),
    };
    if !status.can_generate() {
        return Err(GateError::Denied);
    }

    // Generate. A failure here leaves the ledger untouched.
    let image = imagen.generate(prompt, source_image).await?;

    // Commit. Losing the race to the last credit still delivers the image.
    match ledger.commit_usage(user_id).await {
        Ok(receipt) => Ok(GenerationOutcome {
            image,
            remaining_credits: Some(receipt.remaining_credits),
            show_paywall: false,
        }),
        Err(LedgerError::NoCreditsRemaining) => {
            log::warn!("user {} lost the commit race; delivering the render and flagging the paywall", user_id);
            Ok(GenerationOutcome {
                image,
                remaining_credits: Some(0),
                show_paywall: true,
            })
        }
        Err(LedgerError::NotFound) => Err(GateError::UnknownUser),
        Err(err) => Err(GateError::Ledger(err)),
    }
}

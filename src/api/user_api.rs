use actix_web::{get, post, HttpResponse, Responder, web};
use serde::Deserialize;

use crate::data_structs::caller_identity::CallerIdentity;
use crate::data_structs::credit_ledger::{CreditLedgerEntry, LedgerError, UsageReceipt};
use crate::data_structs::requests::upsert_user_request::UpsertUserRequest;
use crate::data_structs::requests::use_credit_request::UseCreditRequest;
use crate::data_structs::responses::credit_status_response::CreditStatusResponse;
use crate::data_structs::responses::error_response::ErrorResponse;
use crate::data_structs::responses::use_credit_response::UseCreditResponse;
use crate::SharedResources;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditStatusQuery {
    user_id: Option<String>,
}

#[get("/user/credits")]
pub async fn credit_status(data: web::Data<SharedResources>, query: web::Query<CreditStatusQuery>) -> impl Responder {
    let database = &data.get_ref().database;

    match CallerIdentity::parse(query.user_id.as_deref()) {
        CallerIdentity::Guest => {
            let entry = CreditLedgerEntry::guest(&data.get_ref().credit_policy);
            HttpResponse::Ok().json(CreditStatusResponse::from_entry(&entry))
        }
        CallerIdentity::Identified(user_id) => {
            match database.get_credit_status(&user_id).await {
                Ok(entry) => HttpResponse::Ok().json(CreditStatusResponse::from_entry(&entry)),
                Err(LedgerError::NotFound) => {
                    HttpResponse::NotFound().json(ErrorResponse::message("User not found"))
                }
                Err(err) => {
                    log::error!("credit status lookup failed for {}: {}", user_id, err);
                    HttpResponse::InternalServerError().json(ErrorResponse::message("Failed to fetch credit status"))
                }
            }
        }
    }
}

#[post("/user/use-credit")]
pub async fn use_credit(data: web::Data<SharedResources>, payload: web::Json<UseCreditRequest>) -> impl Responder {
    let database = &data.get_ref().database;

    match CallerIdentity::parse(payload.user_id.as_deref()) {
        // Guest usage lives in a client-side counter and is never persisted;
        // acknowledge the spend without touching the ledger.
        CallerIdentity::Guest => HttpResponse::Ok().json(UseCreditResponse {
            success: true,
            remaining_credits: 0,
            show_paywall: false,
        }),
        CallerIdentity::Identified(user_id) => {
            use_credit_reply(database.increment_usage(&user_id).await, &user_id)
        }
    }
}

fn use_credit_reply(result: Result<UsageReceipt, LedgerError>, user_id: &str) -> HttpResponse {
    match result {
        Ok(receipt) => HttpResponse::Ok().json(UseCreditResponse {
            success: true,
            remaining_credits: receipt.remaining_credits,
            show_paywall: false,
        }),
        Err(LedgerError::NoCreditsRemaining) => {
            HttpResponse::Forbidden().json(ErrorResponse::paywall(
                "You've used your free generation. Join Nail Check to keep designing.",
            ))
        }
        Err(LedgerError::NotFound) => {
            HttpResponse::NotFound().json(ErrorResponse::message("User not found"))
        }
        Err(err) => {
            log::error!("credit commit failed for {}: {}", user_id, err);
            HttpResponse::InternalServerError().json(ErrorResponse::message("Failed to use credit"))
        }
    }
}

/// Called by the auth integration when a login completes. First sight of an id
/// creates the ledger row with the configured free allowance.
#[post("/users")]
pub async fn upsert_user(data: web::Data<SharedResources>, payload: web::Json<UpsertUserRequest>) -> impl Responder {
    let request: UpsertUserRequest = payload.into_inner();
    if request.id.trim().is_empty() || request.id.trim().eq_ignore_ascii_case("guest") {
        return HttpResponse::BadRequest().json(ErrorResponse::validation(
            "A persistent user id is required",
            "id",
        ));
    }

    match data.get_ref().database.upsert_user(&request, &data.get_ref().credit_policy).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(err) => {
            log::error!("user upsert failed for {}: {}", request.id, err);
            HttpResponse::InternalServerError().json(ErrorResponse::message("Failed to save user"))
        }
    }
}

#[get("/users/{id}")]
pub async fn user_profile(data: web::Data<SharedResources>, path: web::Path<String>) -> impl Responder {
    let user_id = path.into_inner();
    match data.get_ref().database.get_user(&user_id).await {
        Ok(Some(user)) => HttpResponse::Ok().json(user),
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse::message("User profile not found")),
        Err(err) => {
            log::error!("user profile fetch failed for {}: {}", user_id, err);
            HttpResponse::InternalServerError().json(ErrorResponse::message("Failed to fetch user"))
        }
    }
}

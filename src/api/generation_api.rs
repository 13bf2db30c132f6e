use actix_web::{post, HttpResponse, Responder, web};

use crate::data_structs::caller_identity::CallerIdentity;
use crate::data_structs::requests::generate_image_request::GenerateImageRequest;
use crate::data_structs::responses::error_response::{ErrorResponse, GenerationErrorResponse};
use crate::data_structs::responses::generated_image_response::GeneratedImageResponse;
use crate::generation_gate::{run_generation, GateError};
use crate::image_generation::{GenerationError, GENERIC_FAILURE_MESSAGE};
use crate::SharedResources;

#[post("/generate-image")]
pub async fn generate_image(data: web::Data<SharedResources>, payload: web::Json<GenerateImageRequest>) -> impl Responder {
    let request: GenerateImageRequest = payload.into_inner();

    if !request.has_input() {
        return HttpResponse::BadRequest().json(GenerationErrorResponse {
            error: "A prompt or a canvas image is required to begin.".to_string(),
        });
    }

    let caller = CallerIdentity::parse(request.user_id.as_deref());
    let prompt = request.prompt.as_deref().unwrap_or("");

    match run_generation(
        &data.get_ref().database,
        &data.get_ref().imagen,
        &caller,
        prompt,
        request.image.as_deref(),
    ).await {
        Ok(outcome) => HttpResponse::Ok().json(GeneratedImageResponse {
            image_data: outcome.image.data,
            mime_type: outcome.image.mime_type,
            remaining_credits: outcome.remaining_credits,
            show_paywall: outcome.show_paywall,
        }),
        Err(GateError::Denied) => HttpResponse::Forbidden().json(ErrorResponse::paywall(
            "You've used your free generation. Join Nail Check to keep designing.",
        )),
        Err(GateError::UnknownUser) => {
            HttpResponse::NotFound().json(ErrorResponse::message("User not found"))
        }
        Err(GateError::Generation(GenerationError::BadSourceImage)) => {
            HttpResponse::BadRequest().json(GenerationErrorResponse {
                error: "The canvas image could not be read. Please re-upload and try again.".to_string(),
            })
        }
        Err(err) => {
            // full upstream detail stays server-side; the client gets the generic line
            log::error!("image generation failed: {}", err);
            HttpResponse::InternalServerError().json(GenerationErrorResponse {
                error: GENERIC_FAILURE_MESSAGE.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{test, web, App};

    use super::*;
    use crate::data_structs::credit_ledger::CreditPolicy;
    use crate::database::DatabasePool;
    use crate::image_generation::GeminiImageClient;
    use crate::SharedResources;

    fn test_resources() -> SharedResources {
        SharedResources {
            database: DatabasePool::connect_lazy_for_tests(),
            imagen: GeminiImageClient::new("test-key", "gemini-1.5-flash"),
            credit_policy: CreditPolicy::default(),
        }
    }

    #[actix_web::test]
    async fn empty_request_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_resources()))
                .service(generate_image),
        ).await;

        let req = test::TestRequest::post()
            .uri("/generate-image")
            .set_json(GenerateImageRequest {
                prompt: None,
                image: None,
                user_id: Some("guest".to_string()),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn unreadable_canvas_image_is_rejected_before_the_upstream_call() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_resources()))
                .service(generate_image),
        ).await;

        let req = test::TestRequest::post()
            .uri("/generate-image")
            .set_json(GenerateImageRequest {
                prompt: Some("chrome tips".to_string()),
                image: Some("data:image/png;base64,@@not-base64@@".to_string()),
                user_id: Some("guest".to_string()),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}

use actix_web::{delete, get, post, HttpResponse, Responder, web};
use serde::Deserialize;

use crate::data_structs::responses::error_response::ErrorResponse;
use crate::data_structs::saved_design::InsertSavedDesign;
use crate::data_structs::seasonal_design::InsertSeasonalDesign;
use crate::data_structs::supply_product::InsertSupplyProduct;
use crate::data_structs::tutorial::InsertTutorial;
use crate::SharedResources;

/// Empty query-string values ("?style=") mean "no filter".
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

fn internal_error(context: &str, err: impl std::fmt::Display) -> HttpResponse {
    log::error!("{}: {}", context, err);
    HttpResponse::InternalServerError().json(ErrorResponse::message("Something went wrong"))
}

// ------------------------------------------------------------------
// Tutorials
// ------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct TutorialListQuery {
    search: Option<String>,
    style: Option<String>,
    difficulty: Option<String>,
}

#[get("/tutorials")]
pub async fn list_tutorials(data: web::Data<SharedResources>, query: web::Query<TutorialListQuery>) -> impl Responder {
    let result = data.get_ref().database.get_tutorials(
        non_empty(query.search.as_deref()),
        non_empty(query.style.as_deref()),
        non_empty(query.difficulty.as_deref()),
    ).await;
    match result {
        Ok(tutorials) => HttpResponse::Ok().json(tutorials),
        Err(err) => internal_error("tutorial list failed", err),
    }
}

#[get("/tutorials/{id}")]
pub async fn get_tutorial(data: web::Data<SharedResources>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    match data.get_ref().database.get_tutorial(id).await {
        Ok(Some(tutorial)) => HttpResponse::Ok().json(tutorial),
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse::message("Tutorial not found")),
        Err(err) => internal_error("tutorial fetch failed", err),
    }
}

#[post("/tutorials")]
pub async fn create_tutorial(data: web::Data<SharedResources>, payload: web::Json<InsertTutorial>) -> impl Responder {
    let tutorial: InsertTutorial = payload.into_inner();
    if tutorial.title.trim().is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse::validation("Title is required", "title"));
    }
    if tutorial.tutorial_content.trim().is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse::validation("Tutorial content is required", "tutorialContent"));
    }

    match data.get_ref().database.create_tutorial(&tutorial).await {
        Ok(created) => HttpResponse::Created().json(created),
        Err(err) => internal_error("tutorial create failed", err),
    }
}

// ------------------------------------------------------------------
// Fire Vault (saved designs)
// ------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDesignListQuery {
    user_id: Option<String>,
}

#[get("/designs")]
pub async fn list_saved_designs(data: web::Data<SharedResources>, query: web::Query<SavedDesignListQuery>) -> impl Responder {
    match data.get_ref().database.get_saved_designs(non_empty(query.user_id.as_deref())).await {
        Ok(designs) => HttpResponse::Ok().json(designs),
        Err(err) => internal_error("saved design list failed", err),
    }
}

#[post("/designs")]
pub async fn save_design(data: web::Data<SharedResources>, payload: web::Json<InsertSavedDesign>) -> impl Responder {
    let design: InsertSavedDesign = payload.into_inner();
    if design.image_url.trim().is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse::validation("An image is required", "imageUrl"));
    }

    match data.get_ref().database.save_design(&design).await {
        Ok(created) => HttpResponse::Created().json(created),
        Err(err) => internal_error("design save failed", err),
    }
}

#[delete("/designs/{id}")]
pub async fn delete_design(data: web::Data<SharedResources>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    match data.get_ref().database.delete_design(id).await {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => HttpResponse::NotFound().json(ErrorResponse::message("Design not found")),
        Err(err) => internal_error("design delete failed", err),
    }
}

#[post("/designs/{id}/favorite")]
pub async fn toggle_favorite(data: web::Data<SharedResources>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    match data.get_ref().database.toggle_favorite(id).await {
        Ok(Some(design)) => HttpResponse::Ok().json(design),
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse::message("Design not found")),
        Err(err) => internal_error("favorite toggle failed", err),
    }
}

// ------------------------------------------------------------------
// Seasonal Vault
// ------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SeasonalListQuery {
    season: Option<String>,
}

#[get("/seasonal")]
pub async fn list_seasonal_designs(data: web::Data<SharedResources>, query: web::Query<SeasonalListQuery>) -> impl Responder {
    match data.get_ref().database.get_seasonal_designs(non_empty(query.season.as_deref())).await {
        Ok(designs) => HttpResponse::Ok().json(designs),
        Err(err) => internal_error("seasonal list failed", err),
    }
}

#[post("/seasonal")]
pub async fn create_seasonal_design(data: web::Data<SharedResources>, payload: web::Json<InsertSeasonalDesign>) -> impl Responder {
    let design: InsertSeasonalDesign = payload.into_inner();
    if design.season.trim().is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse::validation("Season is required", "season"));
    }

    match data.get_ref().database.create_seasonal_design(&design).await {
        Ok(created) => HttpResponse::Created().json(created),
        Err(err) => internal_error("seasonal create failed", err),
    }
}

// ------------------------------------------------------------------
// Supply Suite
// ------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SupplyListQuery {
    category: Option<String>,
    search: Option<String>,
}

#[get("/supplies")]
pub async fn list_supply_products(data: web::Data<SharedResources>, query: web::Query<SupplyListQuery>) -> impl Responder {
    let result = data.get_ref().database.get_supply_products(
        non_empty(query.category.as_deref()),
        non_empty(query.search.as_deref()),
    ).await;
    match result {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(err) => internal_error("supply list failed", err),
    }
}

#[post("/supplies")]
pub async fn create_supply_product(data: web::Data<SharedResources>, payload: web::Json<InsertSupplyProduct>) -> impl Responder {
    let product: InsertSupplyProduct = payload.into_inner();
    if product.name.trim().is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse::validation("Product name is required", "name"));
    }

    match data.get_ref().database.create_supply_product(&product).await {
        Ok(created) => HttpResponse::Created().json(created),
        Err(err) => internal_error("supply create failed", err),
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
    async fn blank_tutorial_title_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_resources()))
                .service(create_tutorial),
        ).await;

        let req = test::TestRequest::post()
            .uri("/tutorials")
            .set_json(InsertTutorial {
                title: "   ".to_string(),
                image_source: "https://example.com/nails.jpg".to_string(),
                style_category: "French".to_string(),
                difficulty_level: "Beginner".to_string(),
                tools_required: vec!["Top Coat".to_string()],
                tutorial_content: "1. Paint.".to_string(),
                creator_credit: None,
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.field.as_deref(), Some("title"));
    }

    #[actix_web::test]
    async fn design_without_an_image_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_resources()))
                .service(save_design),
        ).await;

        let req = test::TestRequest::post()
            .uri("/designs")
            .set_json(InsertSavedDesign {
                user_id: None,
                image_url: "".to_string(),
                prompt: "spikey black chrome".to_string(),
                canvas_image_url: None,
                tags: None,
                is_favorite: false,
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}

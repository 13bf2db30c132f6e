pub mod content_api;
pub mod generation_api;
pub mod user_api;

use actix_web::{get, Responder};

#[get("/ping")]
pub async fn debug_ping() -> impl Responder {
    // just to test that the server is running
    "Pong!"
}

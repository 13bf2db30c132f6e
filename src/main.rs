pub mod api;
pub mod database;
pub mod generation_gate;
pub mod image_generation;

pub mod data_structs {
    pub mod caller_identity;
    pub mod credit_ledger;
    pub mod saved_design;
    pub mod seasonal_design;
    pub mod supply_product;
    pub mod tutorial;
    pub mod user;

    pub mod requests {
        pub mod generate_image_request;
        pub mod upsert_user_request;
        pub mod use_credit_request;
    }

    pub mod responses {
        pub mod credit_status_response;
        pub mod error_response;
        pub mod generated_image_response;
        pub mod use_credit_response;
    }
}

use std::fs::File;
use std::io::Read;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use yaml_rust::YamlLoader;

use crate::data_structs::credit_ledger::CreditPolicy;
use crate::database::DatabasePool;
use crate::image_generation::GeminiImageClient;

pub struct SharedResources {
    database: DatabasePool,
    imagen: GeminiImageClient,
    credit_policy: CreditPolicy,
}

impl Clone for SharedResources {
    fn clone(&self) -> Self {
        return SharedResources {
            database: self.database.clone(),
            imagen: self.imagen.clone(),
            credit_policy: self.credit_policy.clone(),
        }
    }
}

pub fn read_file_as_str(file_path: &str) -> String {
    let mut buf: String = String::new();
    let mut file = File::open(file_path)
        .expect("Error! A config.yml file was not found in the current directory.");
    file.read_to_string(&mut buf).expect("Error reading config.yml!");
    return buf;
}

async fn load() -> Result<SharedResources, std::io::Error> {
    log::info!("Loading configurations...");

    let buf: String = read_file_as_str("config.yml");
    let config = match YamlLoader::load_from_str(&buf) {
        Ok(config) => config,
        Err(_) => panic!("Error loading yml file")
    };
    let config = &config[0];

    log::info!("Connecting to the database...");

    let creds = &config["mysql"];
    let host = creds["host"].as_str().expect("mysql.host not found!");
    let port = creds["port"].as_i64().expect("mysql.port not found!") as i16;
    let user = creds["username"].as_str().expect("mysql.username not found!");
    let pass = creds["password"].as_str().expect("mysql.password not found!");
    let database = creds["database"].as_str().expect("mysql.database not found!");
    let database: DatabasePool = DatabasePool::new(host, port, user, pass, database).await;
    database.init().await;

    log::info!("Loading the image model configuration...");

    let gemini = &config["gemini"];
    let api_key = gemini["api-key"].as_str().expect("gemini.api-key not found!");
    let model = gemini["model"].as_str().unwrap_or("gemini-1.5-flash");
    let imagen = GeminiImageClient::new(api_key, model);

    let free_allowance = config["credits"]["free-allowance"].as_i64().unwrap_or(1);
    let credit_policy = CreditPolicy { free_allowance };

    let shared_resources = SharedResources {
        database,
        imagen,
        credit_policy,
    };

    return Ok(shared_resources);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let shared_resources = load().await?;

    log::info!("Starting HTTP server...");
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(shared_resources.clone()))
            .wrap(Cors::permissive())
            .wrap(Logger::new("%a \"%r\" %s %b \"%{User-Agent}i\" %T"))
            .service(web::scope("/api")
                .service(api::debug_ping)
                .service(api::user_api::credit_status)
                .service(api::user_api::use_credit)
                .service(api::user_api::upsert_user)
                .service(api::user_api::user_profile)
                .service(api::generation_api::generate_image)
                .service(api::content_api::list_tutorials)
                .service(api::content_api::get_tutorial)
                .service(api::content_api::create_tutorial)
                .service(api::content_api::list_saved_designs)
                .service(api::content_api::save_design)
                .service(api::content_api::delete_design)
                .service(api::content_api::toggle_favorite)
                .service(api::content_api::list_seasonal_designs)
                .service(api::content_api::create_seasonal_design)
                .service(api::content_api::list_supply_products)
                .service(api::content_api::create_supply_product)
            )
    })
        .bind(("0.0.0.0", 8080))?
        .run()
        .await
}

use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use flowerbeds::{
    api::{json_config, openapi::ApiDoc, routes, AppState},
    config::AppConfig,
    search::SpeciesClient,
    store::{MemoryObjectStore, MemoryStore},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;
    let species = SpeciesClient::new(&config.species).map_err(std::io::Error::other)?;
    let state = web::Data::new(AppState::new(
        Arc::new(MemoryStore::new()),
        Arc::new(MemoryObjectStore::new(config.object_base_url.clone())),
        Arc::new(species),
    ));

    let bind_addr = config.bind_addr.clone();
    log::info!("🌷 Flower beds API started at http://{bind_addr}");
    log::info!("   species search via {}", config.species.base_url);
    log::info!("   📖 Swagger UI → http://{bind_addr}/swagger-ui/");
    log::info!("   📌 OpenAPI document → http://{bind_addr}/api-docs/openapi.json");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .app_data(json_config())
            .configure(routes::configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}

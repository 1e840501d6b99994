use std::sync::Arc;

use actix_web::{web, HttpResponse};
use tokio::sync::Mutex;

use crate::logic::beds::BedManager;
use crate::models::request::ErrorResponse;
use crate::search::SpeciesSearch;
use crate::store::{CatalogStore, ObjectStore};

pub mod handlers;
pub mod openapi;
pub mod routes;

/// Shared application state. The bed manager sits behind a mutex so only one
/// editing session exists and edits are applied one at a time.
pub struct AppState {
    pub beds: Mutex<BedManager>,
    pub store: Arc<dyn CatalogStore>,
    pub objects: Arc<dyn ObjectStore>,
    pub species: Arc<dyn SpeciesSearch>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        objects: Arc<dyn ObjectStore>,
        species: Arc<dyn SpeciesSearch>,
    ) -> Self {
        Self {
            beds: Mutex::new(BedManager::new(store.clone())),
            store,
            objects,
            species,
        }
    }
}

/// JSON extractor config answering malformed bodies with `400 {"error": ...}`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = format!("JSON deserialization error: {err}");
        actix_web::error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ErrorResponse { error: message }),
        )
        .into()
    })
}

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{web, App};
use async_trait::async_trait;
use flowerbeds::{
    api::{json_config, routes::configure, AppState},
    models::{
        flower::Hardiness,
        request::Pagination,
        species::{SpeciesDetail, SpeciesSummary},
    },
    search::{SearchError, SpeciesPage, SpeciesSearch},
    store::{MemoryObjectStore, MemoryStore},
};

pub const CDN: &str = "https://cdn.test";

/// Species backend with two canned species: 1 is a tulip, 2 has no name.
pub struct StubSpecies;

#[async_trait]
impl SpeciesSearch for StubSpecies {
    async fn search(&self, query: &str, page: u32, per_page: u32) -> Result<SpeciesPage, SearchError> {
        let items: Vec<SpeciesSummary> = [(1, "tulip"), (3, "rose")]
            .into_iter()
            .filter(|(_, name)| query.trim().is_empty() || name.contains(query.trim()))
            .map(|(id, name)| SpeciesSummary {
                id,
                common_name: name.to_string(),
                scientific_name: String::new(),
                default_image: None,
            })
            .collect();
        Ok(SpeciesPage {
            pagination: Pagination {
                page: page as usize,
                per_page: per_page as usize,
                total: items.len(),
                total_pages: 2,
            },
            items,
        })
    }

    async fn details(&self, id: u64) -> Result<SpeciesDetail, SearchError> {
        match id {
            1 => Ok(SpeciesDetail {
                common_name: "tulip".into(),
                scientific_name: "Tulipa gesneriana".into(),
                default_image: None,
                cycle: "Perennial".into(),
                watering: "Average".into(),
                sunlight: vec!["full sun".into()],
                hardiness: Hardiness { min: 3.0, max: 8.0 },
                flowering_season: "Spring".into(),
                description: String::new(),
            }),
            2 => Ok(SpeciesDetail {
                common_name: String::new(),
                scientific_name: String::new(),
                default_image: None,
                cycle: "Unknown cycle".into(),
                watering: "Unknown watering".into(),
                sunlight: vec![],
                hardiness: Hardiness::default(),
                flowering_season: "Unknown season".into(),
                description: String::new(),
            }),
            _ => Err(SearchError::Status {
                status: 404,
                reason: "Not Found".into(),
            }),
        }
    }
}

pub fn state() -> (Arc<MemoryStore>, web::Data<AppState>) {
    let store = Arc::new(MemoryStore::new());
    let state = web::Data::new(AppState::new(
        store.clone(),
        Arc::new(MemoryObjectStore::new(CDN)),
        Arc::new(StubSpecies),
    ));
    (store, state)
}

pub fn build_app(
    state: web::Data<AppState>,
) -> actix_web::App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .app_data(json_config())
        .configure(configure)
}

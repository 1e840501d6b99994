use actix_web::{get, http::Method, post, web, HttpResponse};

use crate::{
    api::AppState,
    error::BedError,
    logic::catalog::save_species,
    models::request::{
        link, links, ApiResponse, ErrorResponse, Links, PaginatedResponse, SpeciesQuery,
    },
    search::{DEFAULT_PAGE, DEFAULT_PER_PAGE},
};

fn species_links(id: u64) -> Links {
    links([
        ("self", format!("/api/species/{id}"), Method::GET),
        ("save", format!("/api/species/{id}/save"), Method::POST),
    ])
}

/// Search URL with the query string percent-encoded.
fn search_href(q: &str, page: u32, per_page: u32) -> String {
    let query = serde_urlencoded::to_string([
        ("q", q.to_string()),
        ("page", page.to_string()),
        ("per_page", per_page.to_string()),
    ])
    .unwrap_or_default();
    format!("/api/species?{query}")
}

/// GET /api/species
/// Searches the species database; a missing or blank `q` lists everything.
#[utoipa::path(
    get,
    path = "/api/species",
    tag = "species",
    params(SpeciesQuery),
    responses(
        (status = 200, description = "One page of matching species", body = [SpeciesSummary]),
        (status = 502, description = "Species API failure", body = ErrorResponse),
    )
)]
#[get("/species")]
pub async fn search_species(
    state: web::Data<AppState>,
    query: web::Query<SpeciesQuery>,
) -> Result<HttpResponse, BedError> {
    let SpeciesQuery { q, page, per_page } = query.into_inner();
    let q = q.unwrap_or_default();
    let page = page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE);
    let per_page = per_page.filter(|p| *p > 0).unwrap_or(DEFAULT_PER_PAGE);

    let result = state.species.search(&q, page, per_page).await?;
    log::debug!("species search '{q}' page {page}: {} result(s)", result.items.len());

    let mut page_links = links([("self", search_href(&q, page, per_page), Method::GET)]);
    if (page as usize) < result.pagination.total_pages {
        page_links.insert(
            "next".to_string(),
            link(search_href(&q, page + 1, per_page), Method::GET),
        );
    }
    if page > 1 {
        page_links.insert(
            "prev".to_string(),
            link(search_href(&q, page - 1, per_page), Method::GET),
        );
    }

    let items = result
        .items
        .into_iter()
        .map(|s| {
            let links = species_links(s.id);
            ApiResponse::new(s, links)
        })
        .collect();
    Ok(HttpResponse::Ok().json(PaginatedResponse::new(items, page_links, result.pagination)))
}

/// GET /api/species/{id}
/// Full details with placeholders for anything the database lacks.
#[utoipa::path(
    get,
    path = "/api/species/{id}",
    tag = "species",
    params(("id" = u64, Path, description = "Species id")),
    responses(
        (status = 200, description = "Species details", body = SpeciesDetail),
        (status = 502, description = "Species API failure", body = ErrorResponse),
    )
)]
#[get("/species/{id}")]
pub async fn get_species(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> Result<HttpResponse, BedError> {
    let id = path.into_inner();
    let detail = state.species.details(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new(detail, species_links(id))))
}

/// POST /api/species/{id}/save
/// Copies a species into the flower catalog.
#[utoipa::path(
    post,
    path = "/api/species/{id}/save",
    tag = "species",
    params(("id" = u64, Path, description = "Species id")),
    responses(
        (status = 201, description = "Flower created from the species", body = Flower),
        (status = 422, description = "Species has no common name", body = ErrorResponse),
        (status = 502, description = "Species API or store failure", body = ErrorResponse),
    )
)]
#[post("/species/{id}/save")]
pub async fn save_species_as_flower(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> Result<HttpResponse, BedError> {
    let id = path.into_inner();
    match save_species(state.store.as_ref(), state.species.as_ref(), id).await? {
        Some(flower) => {
            let flower_id = flower.id.clone();
            Ok(HttpResponse::Created().json(ApiResponse::new(
                flower,
                links([
                    ("self", format!("/api/flowers/{flower_id}"), Method::GET),
                    ("collection", "/api/flowers".to_string(), Method::GET),
                ]),
            )))
        }
        None => Ok(HttpResponse::UnprocessableEntity().json(ErrorResponse {
            error: format!("Species {id} has no common name and was not saved."),
        })),
    }
}

use actix_web::{delete, get, http::Method, post, put, web, HttpResponse};
use chrono::Utc;

use crate::{
    api::AppState,
    error::BedError,
    logic::catalog::{attach_image, save_flower},
    models::{
        flower::Flower,
        request::{links, ApiResponse, FlowerForm, Links, PaginatedResponse, Pagination},
    },
};

fn flower_links(id: &str) -> Links {
    links([
        ("self", format!("/api/flowers/{id}"), Method::GET),
        ("update", format!("/api/flowers/{id}"), Method::PUT),
        ("delete", format!("/api/flowers/{id}"), Method::DELETE),
        ("image", format!("/api/flowers/{id}/image"), Method::POST),
    ])
}

fn wrap(flower: Flower) -> ApiResponse<Flower> {
    let links = flower_links(&flower.id);
    ApiResponse::new(flower, links)
}

/// GET /api/flowers
/// The user's flower catalog.
#[utoipa::path(
    get,
    path = "/api/flowers",
    tag = "flowers",
    responses(
        (status = 200, description = "All flowers", body = [Flower]),
        (status = 502, description = "Store failure", body = ErrorResponse),
    )
)]
#[get("/flowers")]
pub async fn list_flowers(state: web::Data<AppState>) -> Result<HttpResponse, BedError> {
    let flowers = state.store.list_flowers().await?;
    let total = flowers.len();
    Ok(HttpResponse::Ok().json(PaginatedResponse::new(
        flowers.into_iter().map(wrap).collect(),
        links([
            ("self", "/api/flowers".to_string(), Method::GET),
            ("create", "/api/flowers".to_string(), Method::POST),
            ("search", "/api/species".to_string(), Method::GET),
        ]),
        Pagination::single_page(total),
    )))
}

/// GET /api/flowers/{id}
#[utoipa::path(
    get,
    path = "/api/flowers/{id}",
    tag = "flowers",
    params(("id" = String, Path, description = "Flower id")),
    responses(
        (status = 200, description = "The flower", body = Flower),
        (status = 404, description = "Unknown flower", body = ErrorResponse),
    )
)]
#[get("/flowers/{id}")]
pub async fn get_flower(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, BedError> {
    let flower = state.store.get_flower(&path).await?;
    Ok(HttpResponse::Ok().json(wrap(flower)))
}

/// POST /api/flowers
/// Adds a flower from the form; the common name is required.
#[utoipa::path(
    post,
    path = "/api/flowers",
    tag = "flowers",
    request_body = FlowerForm,
    responses(
        (status = 201, description = "Flower created", body = Flower),
        (status = 400, description = "Invalid form", body = ErrorResponse),
    )
)]
#[post("/flowers")]
pub async fn create_flower(
    state: web::Data<AppState>,
    form: web::Json<FlowerForm>,
) -> Result<HttpResponse, BedError> {
    let flower = save_flower(
        state.store.as_ref(),
        state.objects.as_ref(),
        None,
        &form,
        None,
        Utc::now(),
    )
    .await?;
    Ok(HttpResponse::Created().json(wrap(flower)))
}

/// PUT /api/flowers/{id}
/// Replaces a flower's attributes, keeping its image.
#[utoipa::path(
    put,
    path = "/api/flowers/{id}",
    tag = "flowers",
    params(("id" = String, Path, description = "Flower id")),
    request_body = FlowerForm,
    responses(
        (status = 200, description = "Flower updated", body = Flower),
        (status = 400, description = "Invalid form", body = ErrorResponse),
        (status = 404, description = "Unknown flower", body = ErrorResponse),
    )
)]
#[put("/flowers/{id}")]
pub async fn update_flower(
    state: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Json<FlowerForm>,
) -> Result<HttpResponse, BedError> {
    let flower = save_flower(
        state.store.as_ref(),
        state.objects.as_ref(),
        Some(path.as_str()),
        &form,
        None,
        Utc::now(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(wrap(flower)))
}

/// POST /api/flowers/{id}/image
/// Uploads raw image bytes and points the flower at the stored copy.
#[utoipa::path(
    post,
    path = "/api/flowers/{id}/image",
    tag = "flowers",
    params(("id" = String, Path, description = "Flower id")),
    request_body(content = Vec<u8>, content_type = "image/jpeg"),
    responses(
        (status = 200, description = "Flower with its new image", body = Flower),
        (status = 404, description = "Unknown flower", body = ErrorResponse),
        (status = 502, description = "Upload failed", body = ErrorResponse),
    )
)]
#[post("/flowers/{id}/image")]
pub async fn upload_image(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, BedError> {
    let flower = attach_image(
        state.store.as_ref(),
        state.objects.as_ref(),
        &path,
        body.to_vec(),
        Utc::now(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(wrap(flower)))
}

/// DELETE /api/flowers/{id}
/// Grid cells that reference the flower are left as they are.
#[utoipa::path(
    delete,
    path = "/api/flowers/{id}",
    tag = "flowers",
    params(("id" = String, Path, description = "Flower id")),
    responses(
        (status = 204, description = "Flower deleted"),
        (status = 404, description = "Unknown flower", body = ErrorResponse),
    )
)]
#[delete("/flowers/{id}")]
pub async fn delete_flower(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, BedError> {
    state.store.delete_flower(&path).await?;
    log::info!("deleted flower {}", path.as_str());
    Ok(HttpResponse::NoContent().finish())
}

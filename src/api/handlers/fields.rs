use actix_web::{get, http::Method, post, web, HttpResponse};
use serde_json::json;

use crate::{
    api::AppState,
    error::BedError,
    models::{
        field::Field,
        request::{
            links, ApiResponse, CreateFieldRequest, DeletionState, Links, PaginatedResponse,
            Pagination,
        },
    },
};

fn field_links(id: &str) -> Links {
    links([
        ("open", format!("/api/fields/{id}/session"), Method::POST),
        ("select-for-deletion", format!("/api/fields/{id}/select-for-deletion"), Method::POST),
        ("collection", "/api/fields".to_string(), Method::GET),
    ])
}

fn deletion_links() -> Links {
    links([
        ("confirm", "/api/fields/deletion/confirm".to_string(), Method::POST),
        ("cancel", "/api/fields/deletion/cancel".to_string(), Method::POST),
    ])
}

/// GET /api/fields
/// Lists every field.
#[utoipa::path(
    get,
    path = "/api/fields",
    tag = "fields",
    responses(
        (status = 200, description = "All fields, each in an ApiResponse envelope", body = [Field]),
        (status = 502, description = "Store failure", body = ErrorResponse),
    )
)]
#[get("/fields")]
pub async fn list_fields(state: web::Data<AppState>) -> Result<HttpResponse, BedError> {
    let fields = state.beds.lock().await.list_fields().await?;
    let total = fields.len();
    let items: Vec<ApiResponse<Field>> = fields
        .into_iter()
        .map(|f| {
            let links = field_links(&f.id);
            ApiResponse::new(f, links)
        })
        .collect();
    Ok(HttpResponse::Ok().json(PaginatedResponse::new(
        items,
        links([
            ("self", "/api/fields".to_string(), Method::GET),
            ("create", "/api/fields".to_string(), Method::POST),
        ]),
        Pagination::single_page(total),
    )))
}

/// POST /api/fields
/// Creates a field with an empty grid after validating name and extents.
#[utoipa::path(
    post,
    path = "/api/fields",
    tag = "fields",
    request_body = CreateFieldRequest,
    responses(
        (status = 201, description = "Field created", body = Field),
        (status = 400, description = "Invalid name or extents", body = ErrorResponse),
    )
)]
#[post("/fields")]
pub async fn create_field(
    state: web::Data<AppState>,
    body: web::Json<CreateFieldRequest>,
) -> Result<HttpResponse, BedError> {
    let field = state.beds.lock().await.create_field(&body).await?;
    let links = field_links(&field.id);
    Ok(HttpResponse::Created().json(ApiResponse::new(field, links)))
}

/// POST /api/fields/{id}/select-for-deletion
/// First step of deleting a field; selecting it again deselects it.
#[utoipa::path(
    post,
    path = "/api/fields/{id}/select-for-deletion",
    tag = "fields",
    params(("id" = String, Path, description = "Field id")),
    responses(
        (status = 200, description = "Current deletion selection", body = DeletionState),
        (status = 404, description = "Unknown field", body = ErrorResponse),
    )
)]
#[post("/fields/{id}/select-for-deletion")]
pub async fn select_for_deletion(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, BedError> {
    let id = path.into_inner();
    state.store.get_field(&id).await?;
    let mut beds = state.beds.lock().await;
    let pending = beds.select_for_deletion(&id).map(str::to_string);
    Ok(HttpResponse::Ok().json(ApiResponse::new(
        DeletionState {
            pending_field_id: pending,
        },
        deletion_links(),
    )))
}

/// POST /api/fields/deletion/confirm
/// Deletes the selected field.
#[utoipa::path(
    post,
    path = "/api/fields/deletion/confirm",
    tag = "fields",
    responses(
        (status = 200, description = "Field deleted"),
        (status = 409, description = "No field selected for deletion", body = ErrorResponse),
    )
)]
#[post("/fields/deletion/confirm")]
pub async fn confirm_deletion(state: web::Data<AppState>) -> Result<HttpResponse, BedError> {
    let id = state.beds.lock().await.confirm_deletion().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new(
        json!({ "deleted": id }),
        links([("collection", "/api/fields".to_string(), Method::GET)]),
    )))
}

/// POST /api/fields/deletion/cancel
#[utoipa::path(
    post,
    path = "/api/fields/deletion/cancel",
    tag = "fields",
    responses((status = 200, description = "Selection cleared", body = DeletionState))
)]
#[post("/fields/deletion/cancel")]
pub async fn cancel_deletion(state: web::Data<AppState>) -> HttpResponse {
    state.beds.lock().await.cancel_deletion();
    HttpResponse::Ok().json(ApiResponse::new(
        DeletionState {
            pending_field_id: None,
        },
        links([("collection", "/api/fields".to_string(), Method::GET)]),
    ))
}

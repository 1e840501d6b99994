use actix_web::{delete, get, http::Method, post, put, web, HttpResponse};
use chrono::Utc;

use crate::{
    api::AppState,
    error::BedError,
    logic::beds::EditSession,
    models::{
        request::{links, ApiResponse, Links, SelectFlowerRequest},
        Coordinate,
    },
};

fn session_links() -> Links {
    links([
        ("self", "/api/session".to_string(), Method::GET),
        ("select-flower", "/api/session/flower".to_string(), Method::PUT),
        ("toggle", "/api/session/toggle".to_string(), Method::POST),
        ("clear", "/api/session/clear".to_string(), Method::POST),
        ("save", "/api/session/save".to_string(), Method::POST),
        ("close", "/api/session".to_string(), Method::DELETE),
    ])
}

fn render(session: &EditSession) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::new(session.view(Utc::now()), session_links()))
}

/// POST /api/fields/{id}/session
/// Opens a field for editing, replacing any open session.
#[utoipa::path(
    post,
    path = "/api/fields/{id}/session",
    tag = "session",
    params(("id" = String, Path, description = "Field id")),
    responses(
        (status = 200, description = "Opened session", body = SessionView),
        (status = 404, description = "Unknown field", body = ErrorResponse),
    )
)]
#[post("/fields/{id}/session")]
pub async fn open_session(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, BedError> {
    let mut beds = state.beds.lock().await;
    let session = beds.open_field(&path).await?;
    Ok(render(session))
}

/// GET /api/session
#[utoipa::path(
    get,
    path = "/api/session",
    tag = "session",
    responses(
        (status = 200, description = "Current session", body = SessionView),
        (status = 409, description = "No open session", body = ErrorResponse),
    )
)]
#[get("/session")]
pub async fn get_session(state: web::Data<AppState>) -> Result<HttpResponse, BedError> {
    let beds = state.beds.lock().await;
    Ok(render(beds.session()?))
}

/// PUT /api/session/flower
/// Chooses the flower that toggles will place.
#[utoipa::path(
    put,
    path = "/api/session/flower",
    tag = "session",
    request_body = SelectFlowerRequest,
    responses(
        (status = 200, description = "Updated session", body = SessionView),
        (status = 404, description = "Flower not in palette", body = ErrorResponse),
        (status = 409, description = "No open session", body = ErrorResponse),
    )
)]
#[put("/session/flower")]
pub async fn select_flower(
    state: web::Data<AppState>,
    body: web::Json<SelectFlowerRequest>,
) -> Result<HttpResponse, BedError> {
    let mut beds = state.beds.lock().await;
    Ok(render(beds.select_flower(&body.flower_id)?))
}

/// POST /api/session/toggle
/// Places the selected flower at a cell, or removes it if already there.
#[utoipa::path(
    post,
    path = "/api/session/toggle",
    tag = "session",
    request_body = Coordinate,
    responses(
        (status = 200, description = "Updated session", body = SessionView),
        (status = 409, description = "No open session", body = ErrorResponse),
    )
)]
#[post("/session/toggle")]
pub async fn toggle_cell(
    state: web::Data<AppState>,
    body: web::Json<Coordinate>,
) -> Result<HttpResponse, BedError> {
    let mut beds = state.beds.lock().await;
    Ok(render(beds.toggle(body.row, body.col, Utc::now())?))
}

/// POST /api/session/clear
#[utoipa::path(
    post,
    path = "/api/session/clear",
    tag = "session",
    responses(
        (status = 200, description = "Every cell emptied", body = SessionView),
        (status = 409, description = "No open session", body = ErrorResponse),
    )
)]
#[post("/session/clear")]
pub async fn clear_grid(state: web::Data<AppState>) -> Result<HttpResponse, BedError> {
    let mut beds = state.beds.lock().await;
    Ok(render(beds.clear()?))
}

/// POST /api/session/save
/// Persists the grid and closes the session.
#[utoipa::path(
    post,
    path = "/api/session/save",
    tag = "session",
    responses(
        (status = 200, description = "Saved field", body = Field),
        (status = 409, description = "No open session", body = ErrorResponse),
        (status = 502, description = "Store failure; session stays open", body = ErrorResponse),
    )
)]
#[post("/session/save")]
pub async fn save_session(state: web::Data<AppState>) -> Result<HttpResponse, BedError> {
    let field = state.beds.lock().await.save().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new(
        field,
        links([("collection", "/api/fields".to_string(), Method::GET)]),
    )))
}

/// DELETE /api/session
/// Closes the session without saving.
#[utoipa::path(
    delete,
    path = "/api/session",
    tag = "session",
    responses((status = 204, description = "Session closed"))
)]
#[delete("/session")]
pub async fn close_session(state: web::Data<AppState>) -> HttpResponse {
    if !state.beds.lock().await.close() {
        log::debug!("close requested with no open session");
    }
    HttpResponse::NoContent().finish()
}

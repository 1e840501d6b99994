use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::request::ErrorResponse;
use crate::search::SearchError;
use crate::store::StoreError;

/// Input rejected before anything is written.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field name must not be empty.")]
    EmptyFieldName,
    #[error("{axis} must be a whole number from 1 to {max}, got '{value}'.", max = crate::models::field::MAX_EXTENT)]
    InvalidDimension { axis: &'static str, value: String },
    #[error("Please enter a flower name.")]
    EmptyFlowerName,
    #[error("Hardiness {bound} must be a number, got '{value}'.")]
    InvalidHardiness { bound: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum BedError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("No field is open for editing.")]
    NoSession,
    #[error("No field is selected for deletion.")]
    NoPendingDeletion,
    #[error("Flower '{0}' is not in this session's palette.")]
    UnknownFlower(String),
}

impl ResponseError for BedError {
    fn status_code(&self) -> StatusCode {
        match self {
            BedError::Validation(_) => StatusCode::BAD_REQUEST,
            BedError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            BedError::Store(_) | BedError::Search(_) => StatusCode::BAD_GATEWAY,
            BedError::NoSession | BedError::NoPendingDeletion => StatusCode::CONFLICT,
            BedError::UnknownFlower(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

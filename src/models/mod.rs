use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod field;
pub mod flower;
pub mod grid;
pub mod request;
pub mod species;

/// Convenience alias for a two-dimensional grid.
pub type Matrix<T> = Vec<Vec<T>>;

/// A zero-based (row, col) position within a bed grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

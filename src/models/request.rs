use std::collections::HashMap;

use actix_web::http::Method;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::{IntoParams, ToSchema};

use crate::models::{field::MAX_EXTENT, Matrix};

/// Serde adapter for `actix_web::http::Method` (serialises as its uppercase string).
mod method_serde {
    use actix_web::http::Method;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(method: &Method, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(method.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Method, D::Error> {
        let s = String::deserialize(d)?;
        Method::from_bytes(s.as_bytes()).map_err(serde::de::Error::custom)
    }
}

/// A single HAL-style hyperlink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    #[serde(with = "method_serde")]
    pub method: Method,
}

/// Map of relation name → link, serialised as the `_links` field in responses.
pub type Links = HashMap<String, Link>;

/// Helper to build a `Link` from an href and an HTTP method.
pub fn link(href: impl Into<String>, method: Method) -> Link {
    Link {
        href: href.into(),
        method,
    }
}

/// Builds a `Links` map from `(relation, href, method)` triples.
pub fn links<const N: usize>(entries: [(&str, String, Method); N]) -> Links {
    entries
        .into_iter()
        .map(|(rel, href, method)| (rel.to_string(), link(href, method)))
        .collect()
}

/// Pagination metadata included in responses that return lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl Pagination {
    /// Metadata for a list returned in full.
    pub fn single_page(total: usize) -> Self {
        Self {
            page: 1,
            per_page: total,
            total,
            total_pages: 1,
        }
    }
}

/// Generic single-item response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub payload: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl<T> ApiResponse<T> {
    pub fn new(payload: T, links: Links) -> Self {
        Self {
            payload,
            errors: vec![],
            links,
        }
    }
}

/// Generic paginated list response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub payload: Vec<T>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(rename = "_links")]
    pub links: Links,
    pub pagination: Pagination,
}

impl<T> PaginatedResponse<T> {
    pub fn new(payload: Vec<T>, links: Links, pagination: Pagination) -> Self {
        Self {
            payload,
            errors: vec![],
            links,
            pagination,
        }
    }
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// A row or column count as typed by the user: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum Dimension {
    Whole(i64),
    Fraction(f64),
    Text(String),
}

impl Dimension {
    /// The whole count in `1..=MAX_EXTENT` this input denotes, if any.
    pub fn as_count(&self) -> Option<usize> {
        let n = match self {
            Dimension::Whole(n) => *n,
            Dimension::Fraction(_) => return None,
            Dimension::Text(s) => s.trim().parse::<i64>().ok()?,
        };
        usize::try_from(n).ok().filter(|n| (1..=MAX_EXTENT).contains(n))
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::Whole(n) => write!(f, "{n}"),
            Dimension::Fraction(x) => write!(f, "{x}"),
            Dimension::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateFieldRequest {
    #[serde(default)]
    pub name: String,
    pub rows: Dimension,
    pub cols: Dimension,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelectFlowerRequest {
    pub flower_id: String,
}

/// Flower attributes as entered in the add/edit form. Everything is text.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct FlowerForm {
    pub common_name: String,
    pub scientific_name: String,
    pub cycle: String,
    pub watering: String,
    pub sunlight: String,
    pub flowering_season: String,
    pub description: String,
    pub hardiness_min: String,
    pub hardiness_max: String,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SpeciesQuery {
    /// Free-text search; blank lists every species.
    pub q: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// State of the two-step field deletion.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletionState {
    pub pending_field_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaletteEntry {
    pub id: String,
    pub common_name: String,
    pub color: String,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CellView {
    pub row: usize,
    pub col: usize,
    pub flower_id: Option<String>,
    /// Epoch milliseconds.
    pub planted_at: Option<i64>,
    /// First letter of the flower name, uppercased.
    pub label: String,
    pub age: String,
    pub color: String,
}

/// Everything needed to draw an open editing session.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub field_id: String,
    pub name: String,
    pub rows: usize,
    pub cols: usize,
    pub selected_flower_id: Option<String>,
    pub palette: Vec<PaletteEntry>,
    pub grid: Matrix<CellView>,
    pub occupied: usize,
}

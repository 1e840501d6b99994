//! Client for the Perenual plant-species API.
//!
//! Responses are decoded leniently: absent or null attributes are replaced by
//! placeholders at this boundary, so callers always see complete records.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::{
    flower::{lenient_number, FlowerImage, Hardiness},
    request::Pagination,
    species::{
        SpeciesDetail, SpeciesSummary, UNKNOWN_CYCLE, UNKNOWN_SEASON, UNKNOWN_SPECIES,
        UNKNOWN_WATERING,
    },
};

pub const DEFAULT_BASE_URL: &str = "https://perenual.com/api/v2";
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 30;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Species API returned {status}: {reason}")]
    Status { status: u16, reason: String },
    #[error("Species API request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Species API answer to {path} could not be decoded: {source}")]
    Decode {
        path: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesPage {
    pub items: Vec<SpeciesSummary>,
    pub pagination: Pagination,
}

#[async_trait]
pub trait SpeciesSearch: Send + Sync {
    /// One page of species matching `query`; a blank query lists everything.
    async fn search(&self, query: &str, page: u32, per_page: u32) -> Result<SpeciesPage, SearchError>;

    async fn details(&self, id: u64) -> Result<SpeciesDetail, SearchError>;
}

#[derive(Debug, Clone)]
pub struct SpeciesConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl Default for SpeciesConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP implementation of [`SpeciesSearch`]. Each call is a single request.
pub struct SpeciesClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl SpeciesClient {
    pub fn new(config: &SpeciesConfig) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            client,
        })
    }

    async fn fetch<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, SearchError> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("species API {path} answered {status}");
            return Err(SearchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| {
            log::warn!("species API {path} sent an undecodable body: {source}");
            SearchError::Decode {
                path: path.to_string(),
                source,
            }
        })
    }
}

#[async_trait]
impl SpeciesSearch for SpeciesClient {
    async fn search(&self, query: &str, page: u32, per_page: u32) -> Result<SpeciesPage, SearchError> {
        let mut params = Vec::with_capacity(3);
        if !query.trim().is_empty() {
            params.push(("q", query.to_string()));
        }
        params.push(("page", page.to_string()));
        params.push(("per_page", per_page.to_string()));

        let raw: RawPage = self.fetch("/species-list", &params).await?;
        Ok(raw.into_page(page, per_page))
    }

    async fn details(&self, id: u64) -> Result<SpeciesDetail, SearchError> {
        let raw: RawDetail = self.fetch(&format!("/species/details/{id}"), &[]).await?;
        Ok(raw.into())
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawImage {
    thumbnail: Option<String>,
    medium_url: Option<String>,
}

impl From<RawImage> for FlowerImage {
    fn from(raw: RawImage) -> Self {
        FlowerImage {
            thumbnail: raw.thumbnail.unwrap_or_default(),
            medium_url: raw.medium_url.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawSummary {
    id: u64,
    common_name: Option<Value>,
    scientific_name: Option<Value>,
    default_image: Option<RawImage>,
}

#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(default)]
    data: Vec<RawSummary>,
    current_page: Option<usize>,
    last_page: Option<usize>,
    total: Option<usize>,
}

impl RawPage {
    fn into_page(self, page: u32, per_page: u32) -> SpeciesPage {
        let items: Vec<SpeciesSummary> = self
            .data
            .into_iter()
            .map(|raw| SpeciesSummary {
                id: raw.id,
                common_name: text(raw.common_name).unwrap_or_else(|| UNKNOWN_SPECIES.into()),
                scientific_name: text(raw.scientific_name).unwrap_or_default(),
                default_image: raw.default_image.map(FlowerImage::from),
            })
            .collect();
        let pagination = Pagination {
            page: self.current_page.unwrap_or(page as usize),
            per_page: per_page as usize,
            total: self.total.unwrap_or(items.len()),
            total_pages: self.last_page.unwrap_or(1),
        };
        SpeciesPage { items, pagination }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawHardiness {
    min: Option<Value>,
    max: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDetail {
    common_name: Option<Value>,
    scientific_name: Option<Value>,
    default_image: Option<RawImage>,
    cycle: Option<Value>,
    watering: Option<Value>,
    sunlight: Option<Value>,
    hardiness: Option<RawHardiness>,
    flowering_season: Option<Value>,
    description: Option<Value>,
}

impl From<RawDetail> for SpeciesDetail {
    fn from(raw: RawDetail) -> Self {
        let hardiness = raw.hardiness.unwrap_or_default();
        SpeciesDetail {
            common_name: text(raw.common_name).unwrap_or_else(|| UNKNOWN_SPECIES.into()),
            scientific_name: text(raw.scientific_name).unwrap_or_default(),
            default_image: raw.default_image.map(FlowerImage::from),
            cycle: text(raw.cycle).unwrap_or_else(|| UNKNOWN_CYCLE.into()),
            watering: text(raw.watering).unwrap_or_else(|| UNKNOWN_WATERING.into()),
            sunlight: list(raw.sunlight),
            hardiness: Hardiness {
                min: lenient_number(hardiness.min),
                max: lenient_number(hardiness.max),
            },
            flowering_season: text(raw.flowering_season)
                .unwrap_or_else(|| UNKNOWN_SEASON.into()),
            description: text(raw.description).unwrap_or_default(),
        }
    }
}

/// A string, or a list of strings joined with ", ".
fn text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .into_iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        _ => None,
    }
}

fn list(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) => vec![s],
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_placeholders_for_empty_body() {
        let raw: RawDetail = serde_json::from_value(json!({})).unwrap();
        let detail = SpeciesDetail::from(raw);
        assert_eq!(detail.common_name, "Unknown species");
        assert_eq!(detail.scientific_name, "");
        assert_eq!(detail.cycle, "Unknown cycle");
        assert_eq!(detail.watering, "Unknown watering");
        assert_eq!(detail.flowering_season, "Unknown season");
        assert!(detail.sunlight.is_empty());
        assert_eq!(detail.hardiness, Hardiness::default());
        assert_eq!(detail.description, "");
        assert!(detail.default_image.is_none());
    }

    #[test]
    fn test_detail_nulls_behave_like_missing() {
        let raw: RawDetail = serde_json::from_value(json!({
            "common_name": null,
            "cycle": null,
            "hardiness": null,
            "default_image": null
        }))
        .unwrap();
        let detail = SpeciesDetail::from(raw);
        assert_eq!(detail.common_name, "Unknown species");
        assert_eq!(detail.cycle, "Unknown cycle");
        assert_eq!(detail.hardiness, Hardiness::default());
    }

    #[test]
    fn test_detail_full_record() {
        let raw: RawDetail = serde_json::from_value(json!({
            "common_name": "tulip",
            "scientific_name": ["Tulipa gesneriana"],
            "cycle": "Perennial",
            "watering": "Average",
            "sunlight": ["full sun", "part shade"],
            "hardiness": { "min": "3", "max": 8 },
            "flowering_season": "Spring",
            "description": "Cup-shaped flowers.",
            "default_image": { "thumbnail": "https://img/t.jpg", "medium_url": null }
        }))
        .unwrap();
        let detail = SpeciesDetail::from(raw);
        assert_eq!(detail.scientific_name, "Tulipa gesneriana");
        assert_eq!(detail.sunlight, vec!["full sun", "part shade"]);
        assert_eq!(detail.hardiness, Hardiness { min: 3.0, max: 8.0 });
        let image = detail.default_image.unwrap();
        assert_eq!(image.thumbnail, "https://img/t.jpg");
        assert_eq!(image.medium_url, "");
    }

    #[test]
    fn test_page_fills_missing_names() {
        let raw: RawPage = serde_json::from_value(json!({
            "data": [
                { "id": 1, "common_name": "rose", "scientific_name": ["Rosa"] },
                { "id": 2 }
            ],
            "current_page": 2,
            "last_page": 9,
            "total": 270
        }))
        .unwrap();
        let page = raw.into_page(2, 30);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].scientific_name, "Rosa");
        assert_eq!(page.items[1].common_name, "Unknown species");
        assert_eq!(page.items[1].scientific_name, "");
        assert_eq!(page.pagination.total, 270);
        assert_eq!(page.pagination.total_pages, 9);
    }

    #[test]
    fn test_page_without_metadata() {
        let raw: RawPage = serde_json::from_value(json!({ "data": [{ "id": 7 }] })).unwrap();
        let page = raw.into_page(1, 30);
        assert_eq!(page.pagination, Pagination { page: 1, per_page: 30, total: 1, total_pages: 1 });
    }
}

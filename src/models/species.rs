use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::flower::{FlowerImage, FlowerRecord, Hardiness, Sunlight};

pub const UNKNOWN_SPECIES: &str = "Unknown species";
pub const UNKNOWN_CYCLE: &str = "Unknown cycle";
pub const UNKNOWN_WATERING: &str = "Unknown watering";
pub const UNKNOWN_SEASON: &str = "Unknown season";

/// One entry of a species search result page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SpeciesSummary {
    pub id: u64,
    pub common_name: String,
    pub scientific_name: String,
    pub default_image: Option<FlowerImage>,
}

/// Full species record with every placeholder already filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SpeciesDetail {
    pub common_name: String,
    pub scientific_name: String,
    pub default_image: Option<FlowerImage>,
    pub cycle: String,
    pub watering: String,
    pub sunlight: Vec<String>,
    pub hardiness: Hardiness,
    pub flowering_season: String,
    pub description: String,
}

impl From<SpeciesDetail> for FlowerRecord {
    fn from(detail: SpeciesDetail) -> Self {
        FlowerRecord {
            common_name: Some(detail.common_name),
            scientific_name: Some(detail.scientific_name),
            cycle: Some(detail.cycle),
            watering: Some(detail.watering),
            sunlight: Some(Sunlight::Many(detail.sunlight)),
            hardiness: Some(detail.hardiness),
            flowering_season: Some(detail.flowering_season),
            description: Some(detail.description),
            default_image: detail.default_image,
        }
    }
}

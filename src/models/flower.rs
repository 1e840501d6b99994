use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

/// Sunlight requirement. Hand-entered flowers store a free-form string, flowers
/// saved from the species API store a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum Sunlight {
    One(String),
    Many(Vec<String>),
}

impl fmt::Display for Sunlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sunlight::One(s) => f.write_str(s),
            Sunlight::Many(list) => f.write_str(&list.join(", ")),
        }
    }
}

/// A JSON number or numeric string; anything else is 0.
pub fn lenient_number(value: Option<Value>) -> f64 {
    let n = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

fn zone<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(lenient_number(Option::<Value>::deserialize(d)?))
}

/// Anything but an object counts as no hardiness at all.
fn hardiness<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Hardiness>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

/// USDA hardiness zone range. Species records carry zones as strings, so
/// either form decodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Hardiness {
    #[serde(default, deserialize_with = "zone")]
    pub min: f64,
    #[serde(default, deserialize_with = "zone")]
    pub max: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FlowerImage {
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub medium_url: String,
}

impl FlowerImage {
    /// Uploads have a single rendition, used for both sizes.
    pub fn single(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            thumbnail: url.clone(),
            medium_url: url,
        }
    }
}

/// The body of a `flowers` document. Every attribute is optional in storage.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FlowerRecord {
    pub common_name: Option<String>,
    pub scientific_name: Option<String>,
    pub cycle: Option<String>,
    pub watering: Option<String>,
    pub sunlight: Option<Sunlight>,
    #[serde(default, deserialize_with = "hardiness")]
    pub hardiness: Option<Hardiness>,
    pub flowering_season: Option<String>,
    pub description: Option<String>,
    pub default_image: Option<FlowerImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Flower {
    pub id: String,
    #[serde(flatten)]
    pub record: FlowerRecord,
}

impl Flower {
    /// Common name, or an empty string for unnamed entries.
    pub fn name(&self) -> &str {
        self.record.common_name.as_deref().unwrap_or("")
    }
}

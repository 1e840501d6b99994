use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Extent used when a stored field carries no usable `rows`/`cols`.
pub const DEFAULT_EXTENT: usize = 5;

/// Largest accepted row or column count.
pub const MAX_EXTENT: usize = 100;

/// Decoders that fill defaults instead of rejecting loosely-typed documents.
mod lenient {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::{FieldCell, DEFAULT_EXTENT, MAX_EXTENT};

    pub fn extent<'de, D: Deserializer<'de>>(d: D) -> Result<usize, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(value
            .as_ref()
            .and_then(Value::as_u64)
            .filter(|n| *n > 0)
            .map(|n| usize::try_from(n).map_or(MAX_EXTENT, |n| n.min(MAX_EXTENT)))
            .unwrap_or(DEFAULT_EXTENT))
    }

    pub fn cells<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<FieldCell>, D::Error> {
        Ok(Option::<Vec<FieldCell>>::deserialize(d)?.unwrap_or_default())
    }

    pub fn flower_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(Option::<String>::deserialize(d)?.filter(|id| !id.is_empty()))
    }

    /// Only numeric epoch milliseconds count as a planting time.
    pub fn planted_at<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(value
            .as_ref()
            .and_then(Value::as_f64)
            .and_then(|ms| DateTime::from_timestamp_millis(ms as i64)))
    }
}

/// One planting slot as persisted in a field document's `grid` array.
///
/// `row`/`col` are signed so that malformed entries still decode and can be
/// dropped during reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldCell {
    pub row: i64,
    pub col: i64,
    #[serde(default, deserialize_with = "lenient::flower_id")]
    pub flower_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::planted_at",
        serialize_with = "chrono::serde::ts_milliseconds_option::serialize"
    )]
    #[schema(value_type = Option<i64>)]
    pub planted_at: Option<DateTime<Utc>>,
}

impl FieldCell {
    pub fn empty(row: usize, col: usize) -> Self {
        Self {
            row: row as i64,
            col: col as i64,
            flower_id: None,
            planted_at: None,
        }
    }
}

/// A planting bed as stored in the `fields` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Field {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_extent", deserialize_with = "lenient::extent")]
    pub rows: usize,
    #[serde(default = "default_extent", deserialize_with = "lenient::extent")]
    pub cols: usize,
    #[serde(default, deserialize_with = "lenient::cells")]
    pub grid: Vec<FieldCell>,
}

fn default_extent() -> usize {
    DEFAULT_EXTENT
}

/// The body of a new `fields` document. Only built from validated input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRecord {
    pub name: String,
    pub rows: usize,
    pub cols: usize,
    pub grid: Vec<FieldCell>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_extents_default_to_five() {
        let field: Field = serde_json::from_value(json!({ "id": "f1", "name": "Bed" })).unwrap();
        assert_eq!(field.rows, DEFAULT_EXTENT);
        assert_eq!(field.cols, DEFAULT_EXTENT);
        assert!(field.grid.is_empty());
    }

    #[test]
    fn test_null_grid_decodes_as_empty() {
        let field: Field =
            serde_json::from_value(json!({ "id": "f1", "name": "Bed", "rows": 2, "cols": 2, "grid": null }))
                .unwrap();
        assert!(field.grid.is_empty());
        assert_eq!(field.rows, 2);
    }

    #[test]
    fn test_zero_extent_falls_back_to_default() {
        let field: Field =
            serde_json::from_value(json!({ "id": "f1", "rows": 0, "cols": 3 })).unwrap();
        assert_eq!(field.rows, DEFAULT_EXTENT);
        assert_eq!(field.cols, 3);
    }

    #[test]
    fn test_oversized_extent_is_clamped() {
        let field: Field = serde_json::from_value(
            json!({ "id": "f1", "rows": u64::MAX, "cols": 100_000 }),
        )
        .unwrap();
        assert_eq!(field.rows, MAX_EXTENT);
        assert_eq!(field.cols, MAX_EXTENT);
    }

    #[test]
    fn test_cell_without_planting_fields() {
        let cell: FieldCell = serde_json::from_value(json!({ "row": 1, "col": 2 })).unwrap();
        assert_eq!(cell, FieldCell::empty(1, 2));
    }

    #[test]
    fn test_cell_empty_flower_id_is_none() {
        let cell: FieldCell =
            serde_json::from_value(json!({ "row": 0, "col": 0, "flowerId": "", "plantedAt": null }))
                .unwrap();
        assert!(cell.flower_id.is_none());
        assert!(cell.planted_at.is_none());
    }

    #[test]
    fn test_cell_non_numeric_planted_at_is_ignored() {
        let cell: FieldCell = serde_json::from_value(
            json!({ "row": 0, "col": 0, "flowerId": "tulip", "plantedAt": "yesterday" }),
        )
        .unwrap();
        assert_eq!(cell.flower_id.as_deref(), Some("tulip"));
        assert!(cell.planted_at.is_none());
    }

    #[test]
    fn test_cell_serialises_planted_at_as_millis() {
        let cell = FieldCell {
            row: 0,
            col: 1,
            flower_id: Some("tulip".into()),
            planted_at: DateTime::from_timestamp_millis(1_700_000_000_123),
        };
        let value = serde_json::to_value(&cell).unwrap();
        assert_eq!(value["plantedAt"], json!(1_700_000_000_123_i64));
        assert_eq!(value["flowerId"], json!("tulip"));
    }

    #[test]
    fn test_empty_cell_serialises_nulls() {
        let value = serde_json::to_value(FieldCell::empty(1, 0)).unwrap();
        assert_eq!(
            value,
            json!({ "row": 1, "col": 0, "flowerId": null, "plantedAt": null })
        );
    }
}
